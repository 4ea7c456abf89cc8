//! Core domain types for featherweight
//!
//! Two families of types live here:
//!
//! - **History records** supplied by the journal/conversation store
//!   ([`UserHistory`] and its collections). They are read, never mutated.
//! - **Analysis results** built fresh on every call ([`NumberPattern`],
//!   [`ChakraBalance`], [`KarmicTheme`], ...). None of them are persisted here.
//!
//! ## Annotation ranges
//!
//! | Field | Expected range |
//! |-------|----------------|
//! | `TextRecord::emotional_tone` | 0.0 – 1.0 |
//! | `TextRecord::consciousness_level` | 0.0 – 6.0 |
//! | `LifeEvent::consciousness_level` | 0.0 – 1.0 |
//! | `PracticeLog::effectiveness` | 0.0 – 1.0 |
//!
//! Annotations are passed through as supplied. Out-of-range values are not
//! rejected or clamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::lexicon::Archetype;

// ============================================
// History records
// ============================================

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
    /// Free-text content
    pub content: String,
    /// Externally assigned emotional tone
    #[serde(default)]
    pub emotional_tone: Option<f64>,
    /// Externally assigned consciousness level
    #[serde(default)]
    pub consciousness_level: Option<f64>,
    /// Pre-tagged spiritual themes
    #[serde(default)]
    pub spiritual_themes: Vec<String>,
}

impl TextRecord {
    /// Create an entry with no annotations.
    pub fn new(timestamp: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            content: content.into(),
            emotional_tone: None,
            consciousness_level: None,
            spiritual_themes: Vec::new(),
        }
    }

    /// Attach a consciousness-level annotation.
    pub fn with_consciousness_level(mut self, level: f64) -> Self {
        self.consciousness_level = Some(level);
        self
    }
}

/// Who sent a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The journaling user
    User,
    /// The Flappy persona
    Flappy,
}

/// A message within a conversation thread (web chat, email, or SMS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub content: String,
    /// Pre-tagged spiritual insights
    #[serde(default)]
    pub spiritual_insights: Vec<String>,
}

/// An ordered conversation between the user and Flappy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationThread {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
}

/// A significant life event logged by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    /// Pre-tagged lessons (e.g. "Self-Worth")
    #[serde(default)]
    pub spiritual_lessons: Vec<String>,
    /// Pre-tagged archetype names (e.g. "The Hero")
    #[serde(default)]
    pub archetypal_themes: Vec<String>,
    #[serde(default)]
    pub consciousness_level: Option<f64>,
}

impl LifeEvent {
    /// Create an event with no tags.
    pub fn new(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
            spiritual_lessons: Vec::new(),
            archetypal_themes: Vec::new(),
            consciousness_level: None,
        }
    }

    /// Tag the event with a lesson.
    pub fn with_lesson(mut self, lesson: impl Into<String>) -> Self {
        self.spiritual_lessons.push(lesson.into());
        self
    }

    /// Tag the event with an archetype name.
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetypal_themes.push(archetype.into());
        self
    }
}

/// One logged session of a spiritual practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeLog {
    pub timestamp: DateTime<Utc>,
    /// Practice name (e.g. "Meditation")
    pub practice: String,
    /// Self-reported effectiveness
    pub effectiveness: f64,
}

/// A synchronicity the user noticed and logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynchronicityLog {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Everything the store knows about one user.
///
/// Collections are not required to be chronologically sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserHistory {
    pub user_id: String,
    #[serde(default)]
    pub journal_entries: Vec<TextRecord>,
    #[serde(default)]
    pub conversations: Vec<ConversationThread>,
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub practice_logs: Vec<PracticeLog>,
    #[serde(default)]
    pub synchronicity_logs: Vec<SynchronicityLog>,
}

impl UserHistory {
    /// Create an empty history for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Load a history export from a JSON file.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// All messages across all threads.
    pub fn messages(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.conversations.iter().flat_map(|t| t.messages.iter())
    }

    /// Flattened list of every message, in thread order.
    pub fn all_messages(&self) -> Vec<ConversationMessage> {
        self.messages().cloned().collect()
    }

    /// The full concatenated historical text, newline-joined.
    ///
    /// Contains journal content, every conversation message (both senders),
    /// life-event descriptions and synchronicity-log descriptions.
    pub fn corpus_text(&self) -> String {
        let journal = self.journal_entries.iter().map(|e| e.content.as_str());
        let messages = self.messages().map(|m| m.content.as_str());
        let events = self.life_events.iter().map(|e| e.description.as_str());
        let syncs = self.synchronicity_logs.iter().map(|s| s.description.as_str());

        journal
            .chain(messages)
            .chain(events)
            .chain(syncs)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text written by the user: journal entries, user-sent messages and
    /// life-event descriptions.
    pub fn authored_text(&self) -> String {
        let journal = self.journal_entries.iter().map(|e| e.content.as_str());
        let messages = self
            .messages()
            .filter(|m| m.sender == Sender::User)
            .map(|m| m.content.as_str());
        let events = self.life_events.iter().map(|e| e.description.as_str());

        journal
            .chain(messages)
            .chain(events)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The most recently written journal entry, if any.
    pub fn latest_entry(&self) -> Option<&TextRecord> {
        self.journal_entries.iter().max_by_key(|e| e.timestamp)
    }

    /// Journal entries written within `days` of `now`, newest first.
    pub fn recent_entries(&self, now: DateTime<Utc>, days: i64) -> Vec<&TextRecord> {
        let cutoff = now - chrono::Duration::days(days);
        let mut entries: Vec<&TextRecord> = self
            .journal_entries
            .iter()
            .filter(|e| e.timestamp >= cutoff && e.timestamp <= now)
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Check whether the history holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.journal_entries.is_empty()
            && self.messages().next().is_none()
            && self.life_events.is_empty()
            && self.practice_logs.is_empty()
            && self.synchronicity_logs.is_empty()
    }
}

// ============================================
// Analysis results
// ============================================

/// A sacred number found in text.
///
/// `frequency` and `synchronicity_level` always carry the same value; both
/// names are kept for existing consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberPattern {
    pub number: u64,
    pub spiritual_significance: &'static str,
    pub frequency: f64,
    pub manifestation_areas: Vec<String>,
    pub synchronicity_level: f64,
}

/// The seven chakra axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chakra {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl Chakra {
    /// All axes, root to crown.
    pub const ALL: [Chakra; 7] = [
        Chakra::Root,
        Chakra::Sacral,
        Chakra::SolarPlexus,
        Chakra::Heart,
        Chakra::Throat,
        Chakra::ThirdEye,
        Chakra::Crown,
    ];

    /// Get the display name for this chakra.
    pub fn name(&self) -> &'static str {
        match self {
            Chakra::Root => "Root",
            Chakra::Sacral => "Sacral",
            Chakra::SolarPlexus => "Solar Plexus",
            Chakra::Heart => "Heart",
            Chakra::Throat => "Throat",
            Chakra::ThirdEye => "Third Eye",
            Chakra::Crown => "Crown",
        }
    }
}

/// Seven axis scores in [0, 1] plus their mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChakraBalance {
    pub root: f64,
    pub sacral: f64,
    pub solar_plexus: f64,
    pub heart: f64,
    pub throat: f64,
    pub third_eye: f64,
    pub crown: f64,
    pub overall: f64,
}

impl Default for ChakraBalance {
    fn default() -> Self {
        Self::from_axes([0.5; 7])
    }
}

impl ChakraBalance {
    /// Build a balance from axis values in [`Chakra::ALL`] order, computing `overall`.
    pub fn from_axes(axes: [f64; 7]) -> Self {
        let overall = axes.iter().sum::<f64>() / axes.len() as f64;
        Self {
            root: axes[0],
            sacral: axes[1],
            solar_plexus: axes[2],
            heart: axes[3],
            throat: axes[4],
            third_eye: axes[5],
            crown: axes[6],
            overall,
        }
    }

    /// Score for a single axis.
    pub fn get(&self, chakra: Chakra) -> f64 {
        match chakra {
            Chakra::Root => self.root,
            Chakra::Sacral => self.sacral,
            Chakra::SolarPlexus => self.solar_plexus,
            Chakra::Heart => self.heart,
            Chakra::Throat => self.throat,
            Chakra::ThirdEye => self.third_eye,
            Chakra::Crown => self.crown,
        }
    }

    /// Iterate `(axis, score)` pairs, root to crown.
    pub fn iter(&self) -> impl Iterator<Item = (Chakra, f64)> + '_ {
        Chakra::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// The lowest-scoring axis; ties go to the axis nearer the root.
    pub fn weakest(&self) -> Chakra {
        self.iter()
            .fold((Chakra::Root, f64::INFINITY), |acc, (c, v)| {
                if v < acc.1 {
                    (c, v)
                } else {
                    acc
                }
            })
            .0
    }
}

/// An archetype detected in text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypalTheme {
    pub archetype: Archetype,
    pub name: &'static str,
    pub relevance: f64,
    pub matched_keywords: Vec<&'static str>,
    pub guidance: &'static str,
    pub manifestation: String,
}

/// The fixed set of karmic themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KarmicThemeKind {
    #[serde(rename = "Self-Worth")]
    SelfWorth,
    Boundaries,
    Trust,
    Power,
    Love,
    Forgiveness,
}

impl KarmicThemeKind {
    pub const ALL: [KarmicThemeKind; 6] = [
        KarmicThemeKind::SelfWorth,
        KarmicThemeKind::Boundaries,
        KarmicThemeKind::Trust,
        KarmicThemeKind::Power,
        KarmicThemeKind::Love,
        KarmicThemeKind::Forgiveness,
    ];

    /// Get the display name for this theme.
    pub fn name(&self) -> &'static str {
        match self {
            KarmicThemeKind::SelfWorth => "Self-Worth",
            KarmicThemeKind::Boundaries => "Boundaries",
            KarmicThemeKind::Trust => "Trust",
            KarmicThemeKind::Power => "Power",
            KarmicThemeKind::Love => "Love",
            KarmicThemeKind::Forgiveness => "Forgiveness",
        }
    }
}

/// A recurring karmic theme found across a history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KarmicTheme {
    pub theme: KarmicThemeKind,
    pub integration_level: f64,
    pub manifestation_patterns: Vec<String>,
    pub healing_suggestions: Vec<&'static str>,
    pub transcendence_indicators: Vec<String>,
}

/// Which sub-scan produced a synchronicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynchronicityKind {
    Date,
    Number,
    Theme,
    Archetype,
}

/// A recurring coincidence across logged events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynchronicityPattern {
    pub kind: SynchronicityKind,
    pub pattern: String,
    pub frequency: f64,
    pub evidence: Vec<String>,
    pub significance: &'static str,
}

/// Which cycle analysis produced a temporal pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalKind {
    ConsciousnessExpansion,
    PracticeEffectiveness,
    LifeLesson,
    SynchronicityWave,
}

/// A cyclical pattern with a projected next occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalPattern {
    pub kind: TemporalKind,
    pub pattern: String,
    pub frequency: f64,
    /// Average cycle length in days
    pub manifestation_cycle: f64,
    pub evidence: Vec<String>,
    pub significance: &'static str,
    pub next_occurrence: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    fn sample_history() -> UserHistory {
        let mut history = UserHistory::new("user-1");
        history.journal_entries = vec![
            TextRecord::new(ts(2), "second entry"),
            TextRecord::new(ts(1), "first entry"),
        ];
        history.conversations = vec![ConversationThread {
            id: "t1".to_string(),
            messages: vec![
                ConversationMessage {
                    timestamp: ts(3),
                    sender: Sender::User,
                    content: "user says hi".to_string(),
                    spiritual_insights: vec![],
                },
                ConversationMessage {
                    timestamp: ts(3),
                    sender: Sender::Flappy,
                    content: "flappy replies".to_string(),
                    spiritual_insights: vec![],
                },
            ],
        }];
        history.life_events = vec![LifeEvent::new(ts(4), "moved house")];
        history.synchronicity_logs = vec![SynchronicityLog {
            timestamp: ts(5),
            description: "saw a heron".to_string(),
        }];
        history
    }

    #[test]
    fn test_corpus_text_includes_everything() {
        let text = sample_history().corpus_text();
        for needle in ["second entry", "first entry", "user says hi", "flappy replies", "moved house", "saw a heron"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_authored_text_skips_flappy() {
        let text = sample_history().authored_text();
        assert!(text.contains("user says hi"));
        assert!(text.contains("moved house"));
        assert!(!text.contains("flappy replies"));
        assert!(!text.contains("saw a heron"));
    }

    #[test]
    fn test_latest_and_recent_entries() {
        let history = sample_history();
        assert_eq!(history.latest_entry().unwrap().content, "second entry");

        let recent = history.recent_entries(ts(10), 30);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "second entry");

        assert!(history.recent_entries(ts(10), 8).len() == 1);
    }

    #[test]
    fn test_history_deserializes_with_missing_collections() {
        let json = r#"{ "user_id": "u", "journal_entries": [
            { "timestamp": "2024-03-01T09:00:00Z", "content": "hello" }
        ] }"#;
        let history: UserHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.journal_entries.len(), 1);
        assert!(history.journal_entries[0].consciousness_level.is_none());
        assert!(history.life_events.is_empty());
        assert!(!history.is_empty());
        assert!(UserHistory::new("x").is_empty());
    }

    #[test]
    fn test_chakra_balance_default_is_neutral() {
        let balance = ChakraBalance::default();
        assert!(balance.iter().all(|(_, v)| v == 0.5));
        assert_eq!(balance.overall, 0.5);
    }

    #[test]
    fn test_chakra_weakest() {
        let balance = ChakraBalance::from_axes([0.5, 0.5, 0.2, 0.5, 0.2, 0.5, 0.5]);
        assert_eq!(balance.weakest(), Chakra::SolarPlexus);
        assert_eq!(balance.get(Chakra::Throat), 0.2);
    }

    #[test]
    fn test_karmic_theme_serializes_display_name() {
        let json = serde_json::to_string(&KarmicThemeKind::SelfWorth).unwrap();
        assert_eq!(json, "\"Self-Worth\"");
    }
}
