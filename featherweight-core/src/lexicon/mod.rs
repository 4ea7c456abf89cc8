//! Lexical signal extraction
//!
//! Stateless, deterministic scans of a single block of text:
//! - `numbers`: digit-run extraction and sacred-number scoring
//! - `chakra`: seven-axis chakra balance
//! - `archetype`: archetype relevance
//! - `frequency`: vibrational/emotional frequency, consciousness level and
//!   quantum coherence scores
//!
//! Every keyword check is a case-insensitive *substring* test, not a
//! whole-word match. A keyword embedded in a longer word still matches
//! ("throat" matches "throatitis").

pub mod archetype;
pub mod chakra;
pub mod frequency;
pub mod numbers;

pub use archetype::{detect_archetypes, Archetype};
pub use chakra::score_chakra_balance;
pub use frequency::{
    score_consciousness_level, score_emotional_frequency, score_quantum_coherence,
    score_vibrational_frequency,
};
pub use numbers::{extract_numbers, sacred_significance, score_sacred_number};

/// Keywords from `keywords` contained in already-lowercased `text`, in table order.
pub fn matched_keywords(text_lower: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|kw| text_lower.contains(kw))
        .collect()
}

/// Number of keywords contained in already-lowercased `text`.
pub fn count_matches(text_lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text_lower.contains(*kw)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matching() {
        // Keywords match inside longer words
        assert_eq!(count_matches("throatitis", &["throat"]), 1);
        assert_eq!(matched_keywords("a broken heartbreak", &["heart", "lung"]), vec!["heart"]);
    }

    #[test]
    fn test_each_keyword_counts_once() {
        assert_eq!(count_matches("love love love", &["love"]), 1);
        assert_eq!(count_matches("", &["love"]), 0);
    }
}
