//! Frequency and level scores.
//!
//! Four single-number readings of a text: vibrational frequency (Hz-like,
//! 200–800), emotional frequency, consciousness level (3.0–6.0) and quantum
//! coherence (0–1).

use super::count_matches;

const BASE_VIBRATION: f64 = 432.0;
const MIN_VIBRATION: f64 = 200.0;
const MAX_VIBRATION: f64 = 800.0;

const SPIRITUAL_WORDS: &[&str] = &[
    "love", "peace", "light", "divine", "spirit", "soul", "grace", "bless", "sacred", "harmony",
];
const EXPANSIVE_WORDS: &[&str] = &["grow", "expand", "open", "free", "abundan", "grateful"];
const CONTRACTIVE_WORDS: &[&str] = &["fear", "anger", "hate", "worry", "stress", "doubt", "sad"];

/// Emotion words and their frequencies.
const EMOTION_FREQUENCIES: &[(&str, f64)] = &[
    ("joy", 540.0),
    ("love", 528.0),
    ("peace", 600.0),
    ("gratitude", 570.0),
    ("compassion", 555.0),
    ("hope", 500.0),
    ("trust", 480.0),
    ("courage", 450.0),
    ("acceptance", 420.0),
    ("fear", 360.0),
    ("sadness", 300.0),
    ("anger", 250.0),
    ("shame", 200.0),
];

const NEUTRAL_EMOTION: f64 = 432.0;

const BASE_CONSCIOUSNESS: f64 = 3.0;
const MAX_CONSCIOUSNESS: f64 = 6.0;
const CONSCIOUSNESS_STEP: f64 = 0.5;

const CONSCIOUSNESS_CATEGORIES: &[(&str, &[&str])] = &[
    ("unity", &["oneness", "unity", "connected", "interconnect", "whole"]),
    ("transcendence", &["transcend", "beyond", "infinite", "eternal", "awaken"]),
    ("presence", &["presence", "here and now", "aware", "mindful", "stillness"]),
    ("love", &["unconditional", "compassion", "love", "kindness", "acceptance"]),
    ("wisdom", &["wisdom", "insight", "understanding", "truth", "clarity"]),
];

const BASE_COHERENCE: f64 = 0.5;
const COHERENCE_STEP: f64 = 0.08;
const INCOHERENCE_STEP: f64 = 0.1;

const COHERENCE_WORDS: &[&str] = &[
    "aligned", "harmony", "balance", "flow", "clarity", "centered", "peace", "integrated",
    "focused", "calm",
];
const INCOHERENCE_WORDS: &[&str] = &[
    "scattered", "chaos", "conflict", "confused", "overwhelm", "torn", "anxious", "stuck",
    "fragment", "restless",
];

/// Vibrational frequency of a text.
///
/// Starts at 432. Each whitespace-delimited word adds 20 when it contains a
/// spiritual word, 15 when it contains an expansive word and subtracts 10
/// when it contains a contractive word. The sum is clamped to [200, 800].
pub fn score_vibrational_frequency(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut frequency = BASE_VIBRATION;

    for word in lower.split_whitespace() {
        if SPIRITUAL_WORDS.iter().any(|w| word.contains(w)) {
            frequency += 20.0;
        }
        if EXPANSIVE_WORDS.iter().any(|w| word.contains(w)) {
            frequency += 15.0;
        }
        if CONTRACTIVE_WORDS.iter().any(|w| word.contains(w)) {
            frequency -= 10.0;
        }
    }

    frequency.clamp(MIN_VIBRATION, MAX_VIBRATION)
}

/// Emotional frequency of a text.
///
/// Sums the frequency of every emotion word present and divides by
/// `matches + 1`. Returns 432 when no emotion word is present.
pub fn score_emotional_frequency(text: &str) -> f64 {
    let lower = text.to_lowercase();

    let (sum, matches) = EMOTION_FREQUENCIES
        .iter()
        .filter(|(emotion, _)| lower.contains(emotion))
        .fold((0.0, 0usize), |(sum, n), (_, freq)| (sum + freq, n + 1));

    if matches == 0 {
        NEUTRAL_EMOTION
    } else {
        sum / (matches as f64 + 1.0)
    }
}

/// Consciousness level of a text, in [3.0, 6.0].
///
/// Every matched keyword across all five categories adds 0.5.
pub fn score_consciousness_level(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let matches: usize = CONSCIOUSNESS_CATEGORIES
        .iter()
        .map(|(_, keywords)| count_matches(&lower, keywords))
        .sum();

    (BASE_CONSCIOUSNESS + matches as f64 * CONSCIOUSNESS_STEP).min(MAX_CONSCIOUSNESS)
}

/// Quantum coherence of a text, in [0, 1].
pub fn score_quantum_coherence(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let coherent = count_matches(&lower, COHERENCE_WORDS) as f64;
    let incoherent = count_matches(&lower, INCOHERENCE_WORDS) as f64;

    (BASE_COHERENCE + coherent * COHERENCE_STEP - incoherent * INCOHERENCE_STEP).clamp(0.0, 1.0)
}
