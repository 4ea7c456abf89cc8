//! Sacred numbers across the current text and history.

use std::collections::HashSet;

use super::{descending, Tally};
use crate::lexicon::{extract_numbers, score_sacred_number};
use crate::types::{NumberPattern, UserHistory};

/// Minimum token count for a number to count as recurring in history.
const RECURRENCE_THRESHOLD: usize = 3;
const RECURRENCE_BOOST: f64 = 0.05;

const RECURRING_AREA: &str = "Recurring Pattern";

/// Sacred numbers in `text`, plus sacred numbers recurring in `history`.
///
/// Numbers from the current text come first in reading order, each value
/// once. Every sacred number occurring as a token at least three times in the
/// history corpus adds a further pattern with +0.05 per occurrence (clamped
/// to 1.0) tagged "Recurring Pattern", even when the current text produced
/// the same value. The result is sorted by descending synchronicity level,
/// ties keeping that order.
pub fn analyze_sacred_numbers(text: &str, history: Option<&UserHistory>) -> Vec<NumberPattern> {
    let mut seen = HashSet::new();
    let mut patterns: Vec<NumberPattern> = extract_numbers(text)
        .into_iter()
        .filter(|n| seen.insert(*n))
        .filter_map(|n| score_sacred_number(n, text, history))
        .collect();

    if let Some(history) = history {
        let corpus = history.corpus_text();
        let mut tally = Tally::new();
        for number in extract_numbers(&corpus) {
            tally.record(number, number.to_string());
        }

        for (number, occurrences) in tally.at_least(RECURRENCE_THRESHOLD) {
            let Some(mut pattern) = score_sacred_number(number, &corpus, Some(history)) else {
                continue;
            };
            let boosted = pattern.frequency + RECURRENCE_BOOST * occurrences.len() as f64;
            pattern.frequency = boosted.min(1.0);
            pattern.synchronicity_level = pattern.frequency;
            pattern.manifestation_areas.push(RECURRING_AREA.to_string());
            patterns.push(pattern);
        }
    }

    patterns.sort_by(|a, b| descending(a.synchronicity_level, b.synchronicity_level));

    tracing::debug!(count = patterns.len(), "Analyzed sacred numbers");
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextRecord;
    use chrono::Utc;

    fn history_with(entries: &[&str]) -> UserHistory {
        let mut history = UserHistory::new("u");
        history.journal_entries = entries
            .iter()
            .map(|c| TextRecord::new(Utc::now(), *c))
            .collect();
        history
    }

    #[test]
    fn test_current_text_only() {
        let patterns = analyze_sacred_numbers("Woke at 3:33, saw 7 crows and 1111 on a sign", None);
        let numbers: Vec<u64> = patterns.iter().map(|p| p.number).collect();
        // "sign" boosts every number: 33 and 1111 clamp to 1.0, then 7 (0.9), 3 (0.8)
        assert_eq!(numbers.len(), 4);
        assert!(numbers[..2].contains(&33) && numbers[..2].contains(&1111));
        assert_eq!(&numbers[2..], &[7, 3]);
    }

    #[test]
    fn test_duplicates_are_reported_once() {
        let patterns = analyze_sacred_numbers("11 and 11 and 11", None);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].number, 11);
    }

    #[test]
    fn test_no_numbers_no_patterns() {
        assert!(analyze_sacred_numbers("just words", None).is_empty());
        assert!(analyze_sacred_numbers("", Some(&UserHistory::new("u"))).is_empty());
        assert!(analyze_sacred_numbers("42 and 1000", None).is_empty());
    }

    #[test]
    fn test_recurring_history_numbers_are_added() {
        let history = history_with(&["seeing 22 everywhere", "22 again", "22 on the bus"]);
        let patterns = analyze_sacred_numbers("nothing numeric today", Some(&history));
        assert_eq!(patterns.len(), 1);
        let pattern = &patterns[0];
        assert_eq!(pattern.number, 22);
        assert_eq!(pattern.frequency, 1.0);
        assert_eq!(pattern.synchronicity_level, pattern.frequency);
        assert!(pattern.manifestation_areas.contains(&"Recurring Pattern".to_string()));
    }

    #[test]
    fn test_history_numbers_below_threshold_are_skipped() {
        let history = history_with(&["saw 144 once", "and 144 twice"]);
        assert!(analyze_sacred_numbers("", Some(&history)).is_empty());
    }

    #[test]
    fn test_history_recurrence_adds_pattern_alongside_current_text() {
        let history = history_with(&["7", "7", "7"]);
        let patterns = analyze_sacred_numbers("lucky 7", Some(&history));
        assert_eq!(patterns.len(), 2);
        assert!(patterns.iter().all(|p| p.number == 7));

        // Boosted history pattern sorts ahead of the plain sighting
        let recurring = &patterns[0];
        assert!(recurring
            .manifestation_areas
            .contains(&"Recurring Pattern".to_string()));
        assert_eq!(recurring.frequency, 1.0);
        assert_eq!(patterns[1].manifestation_areas, vec!["General Awareness"]);
        // 0.8 base plus the history boost for three corpus occurrences
        assert!((patterns[1].frequency - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_equal_levels_keep_reading_order() {
        // 11 and 22 both score 0.9
        let numbers = |text: &str| -> Vec<u64> {
            analyze_sacred_numbers(text, None)
                .iter()
                .map(|p| p.number)
                .collect()
        };
        assert_eq!(numbers("22 then 11"), vec![22, 11]);
        assert_eq!(numbers("11 then 22"), vec![11, 22]);
    }

    #[test]
    fn test_sorted_descending() {
        let history = history_with(&["3 3 3 3"]);
        let patterns = analyze_sacred_numbers("saw 144 and 11", Some(&history));
        assert!(patterns
            .windows(2)
            .all(|w| w[0].synchronicity_level >= w[1].synchronicity_level));
    }
}
