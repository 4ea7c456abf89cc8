//! Insight report assembly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PatternAnalyzer;
use crate::config::ReportConfig;
use crate::lexicon;
use crate::types::{
    ArchetypalTheme, ChakraBalance, KarmicTheme, NumberPattern, SynchronicityPattern,
    TemporalPattern, UserHistory,
};

/// Every analysis for one user, computed against a single reference instant.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    /// User the history belongs to
    pub user_id: String,
    /// Reference instant the report was computed against
    pub generated_at: DateTime<Utc>,
    /// The text the lexical scans ran over
    pub analyzed_text: String,
    pub sacred_numbers: Vec<NumberPattern>,
    pub chakra_balance: ChakraBalance,
    pub archetypes: Vec<ArchetypalTheme>,
    /// Hz, in [200, 800]
    pub vibrational_frequency: f64,
    /// Hz
    pub emotional_frequency: f64,
    /// In [3, 6]
    pub consciousness_level: f64,
    /// In [0, 1]
    pub quantum_coherence: f64,
    pub karmic_themes: Vec<KarmicTheme>,
    /// None when disabled in config
    pub synchronicities: Option<Vec<SynchronicityPattern>>,
    /// None when disabled in config
    pub temporal_patterns: Option<Vec<TemporalPattern>>,
}

impl InsightReport {
    /// Whether any history-derived section found something.
    pub fn has_history_patterns(&self) -> bool {
        !self.karmic_themes.is_empty()
            || self.synchronicities.as_ref().is_some_and(|s| !s.is_empty())
            || self.temporal_patterns.as_ref().is_some_and(|t| !t.is_empty())
    }
}

impl PatternAnalyzer {
    /// Run every analysis once and bundle the results.
    ///
    /// `text` defaults to the most recent journal entry, or the empty string
    /// when the history has none.
    pub fn generate_report(
        &self,
        text: Option<&str>,
        history: &UserHistory,
        config: &ReportConfig,
    ) -> InsightReport {
        let analyzed_text = match text {
            Some(text) => text.to_string(),
            None => history
                .latest_entry()
                .map(|e| e.content.clone())
                .unwrap_or_default(),
        };

        let mut sacred_numbers = self.analyze_sacred_numbers(&analyzed_text, Some(history));
        sacred_numbers.truncate(config.max_number_patterns);

        let mut archetypes = lexicon::detect_archetypes(&analyzed_text);
        archetypes.truncate(config.max_archetypes);

        let mut karmic_themes = self.identify_karmic_themes(history);
        karmic_themes.truncate(config.max_karmic_themes);

        let synchronicities = config.include_synchronicities.then(|| {
            let messages = history.all_messages();
            let mut found =
                self.detect_synchronicities(&history.life_events, Some(messages.as_slice()));
            found.truncate(config.max_synchronicities);
            found
        });

        let temporal_patterns = config.include_temporal.then(|| {
            let mut found = self.identify_temporal_patterns(history);
            found.truncate(config.max_temporal_patterns);
            found
        });

        let report = InsightReport {
            user_id: history.user_id.clone(),
            generated_at: self.now(),
            chakra_balance: self.score_chakra_balance(&analyzed_text, Some(history)),
            vibrational_frequency: lexicon::score_vibrational_frequency(&analyzed_text),
            emotional_frequency: lexicon::score_emotional_frequency(&analyzed_text),
            consciousness_level: lexicon::score_consciousness_level(&analyzed_text),
            quantum_coherence: lexicon::score_quantum_coherence(&analyzed_text),
            analyzed_text,
            sacred_numbers,
            archetypes,
            karmic_themes,
            synchronicities,
            temporal_patterns,
        };

        tracing::info!(
            user_id = %report.user_id,
            numbers = report.sacred_numbers.len(),
            archetypes = report.archetypes.len(),
            karmic_themes = report.karmic_themes.len(),
            "Generated insight report"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LifeEvent, TextRecord};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn history() -> UserHistory {
        let mut history = UserHistory::new("seeker");
        history.journal_entries = vec![
            TextRecord::new(now() - Duration::days(9), "older entry about 7 stars"),
            TextRecord::new(now() - Duration::days(1), "I saw 1111 and felt joy and love"),
        ];
        history.life_events = (0..3)
            .map(|i| {
                LifeEvent::new(now() - Duration::days(30 - i * 10), "lesson")
                    .with_lesson("Patience")
            })
            .collect();
        history
    }

    #[test]
    fn test_defaults_to_latest_entry() {
        let analyzer = PatternAnalyzer::at(now());
        let report = analyzer.generate_report(None, &history(), &ReportConfig::default());
        assert_eq!(report.analyzed_text, "I saw 1111 and felt joy and love");
        assert_eq!(report.sacred_numbers[0].number, 1111);
        assert_eq!(report.generated_at, now());
        assert_eq!(report.user_id, "seeker");
    }

    #[test]
    fn test_empty_history_uses_empty_text() {
        let analyzer = PatternAnalyzer::at(now());
        let report =
            analyzer.generate_report(None, &UserHistory::new("u"), &ReportConfig::default());
        assert_eq!(report.analyzed_text, "");
        assert_eq!(report.chakra_balance, ChakraBalance::default());
        assert_eq!(report.vibrational_frequency, 432.0);
        assert_eq!(report.emotional_frequency, 432.0);
        assert_eq!(report.consciousness_level, 3.0);
        assert_eq!(report.quantum_coherence, 0.5);
        assert!(!report.has_history_patterns());
    }

    #[test]
    fn test_explicit_text_overrides_latest_entry() {
        let analyzer = PatternAnalyzer::at(now());
        let report =
            analyzer.generate_report(Some("nothing here"), &history(), &ReportConfig::default());
        assert_eq!(report.analyzed_text, "nothing here");
        assert!(report.sacred_numbers.is_empty());
    }

    #[test]
    fn test_limits_and_toggles() {
        let config = ReportConfig {
            max_number_patterns: 1,
            include_synchronicities: false,
            include_temporal: false,
            ..Default::default()
        };
        let analyzer = PatternAnalyzer::at(now());
        let report = analyzer.generate_report(Some("3 7 11 22 33"), &history(), &config);
        assert_eq!(report.sacred_numbers.len(), 1);
        assert!(report.synchronicities.is_none());
        assert!(report.temporal_patterns.is_none());
    }

    #[test]
    fn test_history_sections_populated() {
        let analyzer = PatternAnalyzer::at(now());
        let report = analyzer.generate_report(None, &history(), &ReportConfig::default());
        let syncs = report.synchronicities.as_ref().unwrap();
        assert!(syncs.iter().any(|s| s.pattern == "Recurring Theme: Patience"));
        let temporal = report.temporal_patterns.as_ref().unwrap();
        assert!(temporal.iter().any(|t| t.pattern == "Life Lesson: Patience"));
        assert!(report.has_history_patterns());
    }
}
