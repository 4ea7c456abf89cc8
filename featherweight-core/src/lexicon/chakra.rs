//! Chakra balance scoring.
//!
//! Each axis starts at 0.5, gains 0.1 per open keyword and loses 0.15 per
//! blocked keyword. With a history, a light trend from recent journal
//! entries is blended in at 10% weight.

use chrono::{DateTime, Utc};

use super::count_matches;
use crate::types::{Chakra, ChakraBalance, UserHistory};

const NEUTRAL: f64 = 0.5;
const OPEN_WEIGHT: f64 = 0.1;
const BLOCKED_WEIGHT: f64 = 0.15;

const TREND_WINDOW_DAYS: i64 = 30;
const TREND_MAX_ENTRIES: usize = 10;
const TREND_KEYWORD_WEIGHT: f64 = 0.1;
const TREND_BLEND: f64 = 0.1;

/// Keywords signalling an open, flowing axis.
fn open_keywords(chakra: Chakra) -> &'static [&'static str] {
    match chakra {
        Chakra::Root => &["grounded", "secure", "stable", "safe", "rooted", "home"],
        Chakra::Sacral => &["creative", "passion", "pleasure", "sensual", "playful", "desire"],
        Chakra::SolarPlexus => &["confident", "power", "strong", "determined", "willpower", "motivated"],
        Chakra::Heart => &["love", "heart", "compassion", "open", "forgive", "kind", "grateful"],
        Chakra::Throat => &["express", "truth", "speak", "voice", "communicat", "honest"],
        Chakra::ThirdEye => &["intuition", "insight", "vision", "clarity", "dream", "imagine"],
        Chakra::Crown => &["divine", "spiritual", "universe", "oneness", "enlighten", "transcend"],
    }
}

/// Keywords signalling a blocked axis.
fn blocked_keywords(chakra: Chakra) -> &'static [&'static str] {
    match chakra {
        Chakra::Root => &["insecure", "unstable", "fear", "anxious", "scarcity", "unsafe"],
        Chakra::Sacral => &["guilt", "numb", "repressed", "shame", "addict"],
        Chakra::SolarPlexus => &["powerless", "weak", "helpless", "controlling", "doubt"],
        Chakra::Heart => &["lonely", "heartbreak", "resent", "jealous", "bitter", "closed"],
        Chakra::Throat => &["silenced", "lying", "unheard", "misunderstood", "gossip"],
        Chakra::ThirdEye => &["confused", "illusion", "denial", "foggy"],
        Chakra::Crown => &["disconnected", "meaningless", "isolated", "cynical"],
    }
}

/// Smaller additive-only set used for the history trend.
fn trend_keywords(chakra: Chakra) -> &'static [&'static str] {
    match chakra {
        Chakra::Root => &["ground", "safe"],
        Chakra::Sacral => &["creat", "passion"],
        Chakra::SolarPlexus => &["confiden", "power"],
        Chakra::Heart => &["love", "heart"],
        Chakra::Throat => &["express", "truth"],
        Chakra::ThirdEye => &["intuit", "vision"],
        Chakra::Crown => &["spirit", "divine"],
    }
}

/// Score the seven axes for `text`, optionally blending in the trend from
/// up to 10 journal entries written in the 30 days before `now`.
///
/// Every axis stays within [0, 1]; `overall` is the mean after all adjustments.
pub fn score_chakra_balance(
    text: &str,
    history: Option<&UserHistory>,
    now: DateTime<Utc>,
) -> ChakraBalance {
    let lower = text.to_lowercase();

    let mut axes = [NEUTRAL; 7];
    for (axis, chakra) in axes.iter_mut().zip(Chakra::ALL) {
        let open = count_matches(&lower, open_keywords(chakra)) as f64;
        let blocked = count_matches(&lower, blocked_keywords(chakra)) as f64;
        *axis = (NEUTRAL + open * OPEN_WEIGHT - blocked * BLOCKED_WEIGHT).clamp(0.0, 1.0);
    }

    if let Some(trend) = history.and_then(|h| trend(h, now)) {
        for (axis, delta) in axes.iter_mut().zip(trend) {
            *axis = (*axis + delta * TREND_BLEND).clamp(0.0, 1.0);
        }
    }

    ChakraBalance::from_axes(axes)
}

/// Average per-entry trend hits, or `None` when no entry falls in the window.
fn trend(history: &UserHistory, now: DateTime<Utc>) -> Option<[f64; 7]> {
    let recent = history.recent_entries(now, TREND_WINDOW_DAYS);
    let recent: Vec<_> = recent.into_iter().take(TREND_MAX_ENTRIES).collect();
    if recent.is_empty() {
        return None;
    }

    let mut totals = [0.0; 7];
    for entry in &recent {
        let lower = entry.content.to_lowercase();
        for (total, chakra) in totals.iter_mut().zip(Chakra::ALL) {
            *total += count_matches(&lower, trend_keywords(chakra)) as f64 * TREND_KEYWORD_WEIGHT;
        }
    }

    let n = recent.len() as f64;
    tracing::debug!(entries = recent.len(), "Blending chakra trend");
    Some(totals.map(|t| t / n))
}
