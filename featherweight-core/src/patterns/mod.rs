//! Temporal and historical pattern analysis
//!
//! Runs the [`crate::lexicon`] scans across a user's whole history to find
//! recurring numbers, karmic themes, synchronicities and cycles:
//! - `numbers`: sacred numbers in the current text plus ones recurring in history
//! - `karmic`: karmic themes and their integration level
//! - `synchronicity`: date, number, theme and archetype coincidences
//! - `temporal`: consciousness, practice, lesson and synchronicity cycles
//! - `report`: one [`InsightReport`] bundling every analysis
//!
//! ## Reference time
//!
//! Windows such as "the last 30 days" and projections such as "now + average
//! gap" are measured from [`PatternAnalyzer::now`], never from the clock
//! directly. Fixing that instant makes every result a pure function of the
//! inputs.

pub mod karmic;
pub mod numbers;
pub mod report;
pub mod synchronicity;
pub mod temporal;

pub use karmic::identify_karmic_themes;
pub use numbers::analyze_sacred_numbers;
pub use report::InsightReport;
pub use synchronicity::detect_synchronicities;
pub use temporal::identify_temporal_patterns;

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

use crate::lexicon;
use crate::types::{
    ChakraBalance, ConversationMessage, KarmicTheme, LifeEvent, NumberPattern,
    SynchronicityPattern, TemporalPattern, UserHistory,
};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Entry point for history-aware analysis.
#[derive(Debug, Clone, Copy)]
pub struct PatternAnalyzer {
    now: DateTime<Utc>,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAnalyzer {
    /// Analyzer anchored at the current wall-clock time.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Analyzer anchored at a fixed instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// The reference instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn analyze_sacred_numbers(
        &self,
        text: &str,
        history: Option<&UserHistory>,
    ) -> Vec<NumberPattern> {
        analyze_sacred_numbers(text, history)
    }

    pub fn score_chakra_balance(&self, text: &str, history: Option<&UserHistory>) -> ChakraBalance {
        lexicon::score_chakra_balance(text, history, self.now)
    }

    pub fn identify_karmic_themes(&self, history: &UserHistory) -> Vec<KarmicTheme> {
        identify_karmic_themes(history, self.now)
    }

    pub fn detect_synchronicities(
        &self,
        events: &[LifeEvent],
        conversations: Option<&[ConversationMessage]>,
    ) -> Vec<SynchronicityPattern> {
        detect_synchronicities(events, conversations)
    }

    pub fn identify_temporal_patterns(&self, history: &UserHistory) -> Vec<TemporalPattern> {
        identify_temporal_patterns(history, self.now)
    }
}

/// Fractional days from `from` to `to`.
pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// `ts` shifted by a fractional number of days, rounded to the millisecond.
pub(crate) fn add_days(ts: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    ts + Duration::milliseconds((days * MILLIS_PER_DAY).round() as i64)
}

/// Mean of successive gaps (in days) between sorted timestamps.
pub(crate) fn average_gap(sorted: &[DateTime<Utc>]) -> Option<f64> {
    if sorted.len() < 2 {
        return None;
    }
    let gaps: Vec<f64> = sorted.windows(2).map(|w| days_between(w[0], w[1])).collect();
    Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
}

/// Occurrence counter that remembers first-seen order.
///
/// Each key collects the evidence strings recorded with it.
pub(crate) struct Tally<K> {
    order: Vec<K>,
    entries: HashMap<K, Vec<String>>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    pub(crate) fn record(&mut self, key: K, evidence: impl Into<String>) {
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.entry(key).or_default().push(evidence.into());
    }

    /// Keys seen at least `min` times, first-seen order, with their evidence.
    pub(crate) fn at_least(self, min: usize) -> Vec<(K, Vec<String>)> {
        let mut entries = self.entries;
        self.order
            .into_iter()
            .filter_map(|key| {
                let evidence = entries.remove(&key)?;
                (evidence.len() >= min).then_some((key, evidence))
            })
            .collect()
    }
}

/// Descending order for `f64` keys; stable when used with `sort_by`.
pub(crate) fn descending(a: f64, b: f64) -> std::cmp::Ordering {
    b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_days_between_and_add_days() {
        assert_eq!(days_between(day(1), day(11)), 10.0);
        assert_eq!(days_between(day(11), day(1)), -10.0);
        assert_eq!(add_days(day(1), 12.0), day(13));
        assert_eq!(add_days(day(1), 0.5), day(1) + Duration::hours(12));
    }

    #[test]
    fn test_average_gap() {
        assert_eq!(average_gap(&[day(1)]), None);
        assert_eq!(average_gap(&[day(1), day(11), day(23), day(31)]), Some(10.0));
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let mut tally = Tally::new();
        tally.record("b", "1");
        tally.record("a", "2");
        tally.record("b", "3");
        tally.record("a", "4");
        tally.record("c", "5");

        let kept = tally.at_least(2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], ("b", vec!["1".to_string(), "3".to_string()]));
        assert_eq!(kept[1].0, "a");
    }

    #[test]
    fn test_analyzer_reference_time() {
        let analyzer = PatternAnalyzer::at(day(5));
        assert_eq!(analyzer.now(), day(5));
    }
}
