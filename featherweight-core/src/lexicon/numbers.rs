//! Sacred-number extraction and scoring.

use regex::Regex;
use std::sync::LazyLock;

use super::matched_keywords;
use crate::types::{NumberPattern, UserHistory};

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex: digit run pattern"));

/// Sacred numbers: (value, significance, base frequency)
const SACRED_NUMBERS: &[(u64, &str, f64)] = &[
    (3, "Creativity, communication, divine trinity", 0.7),
    (7, "Spiritual awakening, inner wisdom, mysticism", 0.8),
    (11, "Master number: intuition, illumination, spiritual insight", 0.9),
    (22, "Master builder: turning dreams into reality", 0.9),
    (33, "Master teacher: compassion, healing, selfless service", 0.9),
    (108, "Sacred wholeness, the unity of existence", 0.85),
    (144, "Light codes, ascension, divine order", 0.8),
    (432, "Universal harmony, natural resonance", 0.85),
    (528, "Love frequency, transformation, miracles", 0.85),
    (777, "Divine luck, spiritual alignment", 0.9),
    (888, "Abundance, infinite flow, prosperity", 0.9),
    (999, "Completion, endings, humanitarian purpose", 0.9),
    (1111, "Awakening, portal, new beginnings", 0.95),
];

/// Context words that signal a spiritually charged sighting.
const SPIRITUAL_CONTEXT: &[&str] = &[
    "divine",
    "spirit",
    "universe",
    "sign",
    "angel",
    "synchronicity",
    "soul",
    "sacred",
    "meditat",
    "prayer",
];

const CONTEXT_BOOST: f64 = 0.1;
const HISTORY_BOOST: f64 = 0.15;

/// Life areas a number can show up in, keyed by context words.
const MANIFESTATION_AREAS: &[(&str, &[&str])] = &[
    ("Career", &["work", "job", "career", "business", "project"]),
    ("Relationships", &["partner", "relationship", "friend", "family", "love"]),
    ("Health", &["health", "body", "healing", "sleep", "energy"]),
    ("Abundance", &["money", "abundance", "financ", "wealth", "prosper"]),
    ("Spiritual Growth", &["spirit", "meditat", "prayer", "soul", "awaken"]),
    ("Creativity", &["creat", "artist", "paint", "music", "writing"]),
];

const DEFAULT_MANIFESTATION_AREA: &str = "General Awareness";

/// Find every maximal run of ASCII digits, left to right, duplicates included.
///
/// Runs too large for `u64` saturate to `u64::MAX`.
pub fn extract_numbers(text: &str) -> Vec<u64> {
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Significance and base frequency for a sacred number.
pub fn sacred_significance(number: u64) -> Option<(&'static str, f64)> {
    SACRED_NUMBERS
        .iter()
        .find(|(n, _, _)| *n == number)
        .map(|(_, significance, base)| (*significance, *base))
}

/// Score a number seen in `context`.
///
/// Returns `None` for anything outside the sacred-number table. The score
/// starts at the table's base frequency, gains 0.1 when the context holds a
/// spiritual keyword and 0.15 when the number appears more than twice in the
/// history corpus, then clamps to [0, 1].
pub fn score_sacred_number(
    number: u64,
    context: &str,
    history: Option<&UserHistory>,
) -> Option<NumberPattern> {
    let (significance, base) = sacred_significance(number)?;
    let context_lower = context.to_lowercase();

    let mut frequency = base;
    if !matched_keywords(&context_lower, SPIRITUAL_CONTEXT).is_empty() {
        frequency += CONTEXT_BOOST;
    }
    if let Some(history) = history {
        if occurrences(number, &history.corpus_text()) > 2 {
            frequency += HISTORY_BOOST;
        }
    }
    let frequency = frequency.clamp(0.0, 1.0);

    Some(NumberPattern {
        number,
        spiritual_significance: significance,
        frequency,
        manifestation_areas: manifestation_areas(&context_lower),
        synchronicity_level: frequency,
    })
}

/// Non-overlapping occurrences of the number's decimal form in `text`.
///
/// Substring count, so "11" is found twice in "1111".
pub(crate) fn occurrences(number: u64, text: &str) -> usize {
    text.matches(number.to_string().as_str()).count()
}

fn manifestation_areas(context_lower: &str) -> Vec<String> {
    let areas: Vec<String> = MANIFESTATION_AREAS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| context_lower.contains(kw)))
        .map(|(area, _)| area.to_string())
        .collect();

    if areas.is_empty() {
        vec![DEFAULT_MANIFESTATION_AREA.to_string()]
    } else {
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextRecord;
    use chrono::Utc;

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("I saw 11:11 and 333 today"), vec![11, 11, 333]);
        assert_eq!(extract_numbers("room a7b, flight XY1111."), vec![7, 1111]);
        assert!(extract_numbers("no digits here").is_empty());
        assert!(extract_numbers("").is_empty());
    }

    #[test]
    fn test_extract_numbers_saturates() {
        let huge = "99999999999999999999999999";
        assert_eq!(extract_numbers(huge), vec![u64::MAX]);
    }

    #[test]
    fn test_non_sacred_numbers_are_ignored() {
        for n in [0, 1, 2, 4, 12, 100, 1234, 4321] {
            assert!(score_sacred_number(n, "divine sign from the universe", None).is_none());
        }
    }

    #[test]
    fn test_1111_base_and_context() {
        let plain = score_sacred_number(1111, "", None).unwrap();
        assert_eq!(plain.frequency, 0.95);
        assert_eq!(plain.spiritual_significance, "Awakening, portal, new beginnings");
        assert_eq!(plain.manifestation_areas, vec!["General Awareness"]);

        let boosted = score_sacred_number(1111, "a divine moment", None).unwrap();
        assert_eq!(boosted.frequency, 1.0);
        assert_eq!(boosted.synchronicity_level, boosted.frequency);
    }

    #[test]
    fn test_context_boost_is_exactly_point_one() {
        let plain = score_sacred_number(7, "", None).unwrap();
        let boosted = score_sacred_number(7, "Felt the SPIRIT move", None).unwrap();
        assert!((boosted.frequency - plain.frequency - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_history_boost() {
        let mut history = UserHistory::new("u");
        history.journal_entries = vec![
            TextRecord::new(Utc::now(), "Saw 333 on a plate"),
            TextRecord::new(Utc::now(), "and 33 again"),
        ];
        // "3" occurs five times as a substring across the corpus
        let with = score_sacred_number(3, "", Some(&history)).unwrap();
        assert!((with.frequency - 0.85).abs() < 1e-9);

        // "108" never appears
        let without = score_sacred_number(108, "", Some(&history)).unwrap();
        assert_eq!(without.frequency, 0.85);
    }

    #[test]
    fn test_manifestation_areas() {
        let pattern = score_sacred_number(22, "Saw it at work, then with my partner", None).unwrap();
        assert_eq!(pattern.manifestation_areas, vec!["Career", "Relationships"]);
    }

    #[test]
    fn test_occurrences_is_substring_count() {
        assert_eq!(occurrences(11, "1111 and 11"), 3);
        assert_eq!(occurrences(7, "none"), 0);
    }
}
