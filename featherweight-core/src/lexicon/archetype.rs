//! Archetype detection
//!
//! Scores twenty narrative archetypes by keyword relevance. Only ten of them
//! carry keyword tables; the other ten can never score above zero and are
//! never returned.

use serde::Serialize;

use super::matched_keywords;
use crate::types::ArchetypalTheme;

const KEYWORD_WEIGHT: f64 = 0.2;
const RELEVANCE_THRESHOLD: f64 = 0.3;
const MAX_ARCHETYPES: usize = 3;

const FALLBACK_GUIDANCE: &str = "Notice where this energy lives in you and what it asks of you.";
const FALLBACK_MANIFESTATION: &str = "{name} energy is stirring through {keywords}";

/// Narrative archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Hero,
    Sage,
    Healer,
    Warrior,
    Mystic,
    Lover,
    Creator,
    Caregiver,
    Explorer,
    Magician,
    Innocent,
    Orphan,
    Rebel,
    Ruler,
    Jester,
    Everyman,
    Shadow,
    Trickster,
    Teacher,
    Seeker,
}

impl Archetype {
    /// All archetypes, in scoring order.
    pub const ALL: [Archetype; 20] = [
        Archetype::Hero,
        Archetype::Sage,
        Archetype::Healer,
        Archetype::Warrior,
        Archetype::Mystic,
        Archetype::Lover,
        Archetype::Creator,
        Archetype::Caregiver,
        Archetype::Explorer,
        Archetype::Magician,
        Archetype::Innocent,
        Archetype::Orphan,
        Archetype::Rebel,
        Archetype::Ruler,
        Archetype::Jester,
        Archetype::Everyman,
        Archetype::Shadow,
        Archetype::Trickster,
        Archetype::Teacher,
        Archetype::Seeker,
    ];

    /// Get the display name for this archetype.
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Hero => "The Hero",
            Archetype::Sage => "The Sage",
            Archetype::Healer => "The Healer",
            Archetype::Warrior => "The Warrior",
            Archetype::Mystic => "The Mystic",
            Archetype::Lover => "The Lover",
            Archetype::Creator => "The Creator",
            Archetype::Caregiver => "The Caregiver",
            Archetype::Explorer => "The Explorer",
            Archetype::Magician => "The Magician",
            Archetype::Innocent => "The Innocent",
            Archetype::Orphan => "The Orphan",
            Archetype::Rebel => "The Rebel",
            Archetype::Ruler => "The Ruler",
            Archetype::Jester => "The Jester",
            Archetype::Everyman => "The Everyman",
            Archetype::Shadow => "The Shadow",
            Archetype::Trickster => "The Trickster",
            Archetype::Teacher => "The Teacher",
            Archetype::Seeker => "The Seeker",
        }
    }

    /// Keywords that raise this archetype's relevance. Empty for archetypes
    /// without a table.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Archetype::Hero => &["courage", "brave", "challenge", "overcome", "victory", "quest"],
            Archetype::Sage => &["wisdom", "knowledge", "truth", "understand", "learn", "insight"],
            Archetype::Healer => &["heal", "recover", "restore", "wellness", "mend"],
            Archetype::Warrior => &["fight", "battle", "strength", "discipline", "protect"],
            Archetype::Mystic => &["meditat", "spiritual", "divine", "transcend", "mystery", "sacred"],
            Archetype::Lover => &["love", "passion", "romance", "intimacy", "beauty", "connection"],
            Archetype::Creator => &["create", "creative", "imagine", "build", "design", "artist"],
            Archetype::Caregiver => &["care", "nurtur", "support", "help", "give"],
            Archetype::Explorer => &["explore", "adventure", "journey", "discover", "travel", "freedom"],
            Archetype::Magician => &["transform", "manifest", "magic", "alchemy", "vision"],
            _ => &[],
        }
    }

    /// Guidance shown alongside a detected archetype.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Archetype::Hero => Some("Trust your courage; the challenge in front of you is the path."),
            Archetype::Sage => Some("Make space for reflection and let understanding ripen before acting."),
            Archetype::Healer => Some("Tend to your own wounds with the care you offer others."),
            Archetype::Warrior => Some("Channel your strength into protecting what matters, not into the fight itself."),
            Archetype::Mystic => Some("Stillness is your doorway; return to it daily."),
            Archetype::Lover => Some("Let connection be a practice of presence rather than longing."),
            Archetype::Creator => Some("Give your ideas form, even imperfect form, and let them teach you."),
            Archetype::Caregiver => Some("Nurture others from overflow, not from depletion."),
            Archetype::Explorer => Some("Follow your curiosity and notice what each new horizon reveals about you."),
            Archetype::Magician => Some("Your intention is a lever; set it clearly and act in alignment."),
            _ => None,
        }
    }

    /// Manifestation template; `{name}` and `{keywords}` are substituted.
    fn manifestation_template(&self) -> Option<&'static str> {
        match self {
            Archetype::Hero => Some("{name} rises to meet what you face through {keywords}"),
            Archetype::Sage => Some("{name} seeks meaning through {keywords}"),
            Archetype::Healer => Some("{name} is restoring wholeness through {keywords}"),
            Archetype::Warrior => Some("{name} stands firm through {keywords}"),
            Archetype::Mystic => Some("{name} reaches beyond the veil through {keywords}"),
            Archetype::Lover => Some("{name} opens to connection through {keywords}"),
            Archetype::Creator => Some("{name} is giving shape to something new through {keywords}"),
            Archetype::Caregiver => Some("{name} offers itself through {keywords}"),
            Archetype::Explorer => Some("{name} is called outward through {keywords}"),
            Archetype::Magician => Some("{name} is turning intention into form through {keywords}"),
            _ => None,
        }
    }

    fn manifestation(&self, matched: &[&str]) -> String {
        self.manifestation_template()
            .unwrap_or(FALLBACK_MANIFESTATION)
            .replace("{name}", self.name())
            .replace("{keywords}", &matched.join(", "))
    }
}

/// Detect up to three archetypes in `text`, most relevant first.
///
/// Relevance is 0.2 per matched keyword, clamped to 1.0; only archetypes
/// above 0.3 are kept. Ties keep table order.
pub fn detect_archetypes(text: &str) -> Vec<ArchetypalTheme> {
    let lower = text.to_lowercase();

    let mut themes: Vec<ArchetypalTheme> = Archetype::ALL
        .into_iter()
        .filter_map(|archetype| {
            let matched = matched_keywords(&lower, archetype.keywords());
            let relevance = (matched.len() as f64 * KEYWORD_WEIGHT).min(1.0);
            if relevance <= RELEVANCE_THRESHOLD {
                return None;
            }
            Some(ArchetypalTheme {
                archetype,
                name: archetype.name(),
                relevance,
                guidance: archetype.guidance().unwrap_or(FALLBACK_GUIDANCE),
                manifestation: archetype.manifestation(&matched),
                matched_keywords: matched,
            })
        })
        .collect();

    themes.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    themes.truncate(MAX_ARCHETYPES);
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_is_below_threshold() {
        assert!(detect_archetypes("a little courage").is_empty());
        assert!(detect_archetypes("").is_empty());
    }

    #[test]
    fn test_hero_detection() {
        let themes = detect_archetypes("It took courage to overcome this challenge");
        assert_eq!(themes.len(), 1);
        let hero = &themes[0];
        assert_eq!(hero.archetype, Archetype::Hero);
        assert!((hero.relevance - 0.6).abs() < 1e-9);
        assert_eq!(hero.matched_keywords, vec!["courage", "challenge", "overcome"]);
        assert_eq!(
            hero.manifestation,
            "The Hero rises to meet what you face through courage, challenge, overcome"
        );
    }

    #[test]
    fn test_at_most_three_sorted_by_relevance() {
        let text = "courage brave challenge overcome victory quest \
                    wisdom knowledge truth \
                    heal recover \
                    fight battle strength discipline";
        let themes = detect_archetypes(text);
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0].archetype, Archetype::Hero);
        assert_eq!(themes[0].relevance, 1.0);
        assert_eq!(themes[1].archetype, Archetype::Warrior);
        assert_eq!(themes[2].archetype, Archetype::Sage);
        assert!(themes.iter().all(|t| t.relevance > 0.3));
        assert!(themes.windows(2).all(|w| w[0].relevance >= w[1].relevance));
    }

    #[test]
    fn test_archetypes_without_tables_never_score() {
        for archetype in [Archetype::Rebel, Archetype::Jester, Archetype::Seeker] {
            assert!(archetype.keywords().is_empty());
            assert!(archetype.guidance().is_none());
        }
        let themes = detect_archetypes("rebel jester trickster shadow orphan ruler");
        assert!(themes.is_empty());
    }

    #[test]
    fn test_fallback_manifestation() {
        assert_eq!(
            Archetype::Seeker.manifestation(&["search"]),
            "The Seeker energy is stirring through search"
        );
    }
}
