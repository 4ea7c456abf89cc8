//! Karmic theme identification.
//!
//! A theme manifests when one of its indicator keywords appears anywhere in
//! the user's authored text. Its integration level is
//! `1 - recent / total`, where `recent` counts manifestations whose keyword
//! also appears in a journal entry from the last 90 days. Themes are returned
//! in ascending integration order, so the themes most alive right now come
//! first.

use chrono::{DateTime, Utc};

use crate::lexicon::matched_keywords;
use crate::types::{KarmicTheme, KarmicThemeKind, UserHistory};

const RECENT_WINDOW_DAYS: i64 = 90;
const TRANSCENDENCE_WINDOW_DAYS: i64 = 60;
const TRANSCENDENCE_MAX_ENTRIES: usize = 5;

/// Fixed rule set for one theme.
struct ThemeRules {
    indicators: &'static [&'static str],
    healing: &'static [&'static str],
    resolution: &'static [&'static str],
}

fn rules(kind: KarmicThemeKind) -> ThemeRules {
    match kind {
        KarmicThemeKind::SelfWorth => ThemeRules {
            indicators: &["not good enough", "worthless", "unworthy", "inadequate", "failure", "deserve"],
            healing: &[
                "Write three things you appreciate about yourself each morning",
                "Notice the inner critic and answer it as you would a friend",
                "Accept compliments without deflecting them",
            ],
            resolution: &["i am worthy", "proud of myself", "self-love", "believe in myself", "valued"],
        },
        KarmicThemeKind::Boundaries => ThemeRules {
            indicators: &["people pleas", "can't say no", "overcommit", "taken advantage", "boundary", "boundaries"],
            healing: &[
                "Practice saying no to one small request this week",
                "Check in with your body before agreeing to anything",
                "Name one need out loud each day",
            ],
            resolution: &["said no", "set a boundary", "protected my time", "honored my needs", "stood up for"],
        },
        KarmicThemeKind::Trust => ThemeRules {
            indicators: &["betray", "trust", "suspicious", "abandon", "lied to"],
            healing: &[
                "Start with small acts of trust and notice the outcome",
                "Journal about a time trust was honored",
                "Separate past betrayals from present people",
            ],
            resolution: &["trusting", "let go of control", "surrender", "safe to open", "faith"],
        },
        KarmicThemeKind::Power => ThemeRules {
            indicators: &["powerless", "control", "helpless", "dominat", "victim"],
            healing: &[
                "List the choices that are fully yours today",
                "Move your body in a way that feels strong",
                "Replace \"I have to\" with \"I choose to\"",
            ],
            resolution: &["empowered", "my own power", "took charge", "reclaimed", "confident"],
        },
        KarmicThemeKind::Love => ThemeRules {
            indicators: &["unloved", "rejected", "lonely", "heartbreak", "abandoned"],
            healing: &[
                "Offer yourself the tenderness you seek from others",
                "Reach out to one person who makes you feel seen",
                "Practice a loving-kindness meditation",
            ],
            resolution: &["loved", "connected", "open heart", "cherished", "belong"],
        },
        KarmicThemeKind::Forgiveness => ThemeRules {
            indicators: &["resent", "grudge", "anger", "can't forgive", "blame", "bitter"],
            healing: &[
                "Write a letter you never send to the person you resent",
                "Acknowledge the hurt fully before trying to release it",
                "Forgive yourself for one old mistake",
            ],
            resolution: &["forgave", "forgiven", "let it go", "released", "peace with"],
        },
    }
}

/// Identify karmic themes across `history`, least integrated first.
///
/// Themes without any manifestation are omitted.
pub fn identify_karmic_themes(history: &UserHistory, now: DateTime<Utc>) -> Vec<KarmicTheme> {
    let authored = history.authored_text().to_lowercase();
    if authored.is_empty() {
        return Vec::new();
    }

    let recent_text: Vec<String> = history
        .recent_entries(now, RECENT_WINDOW_DAYS)
        .into_iter()
        .map(|e| e.content.to_lowercase())
        .collect();

    let latest: Vec<_> = history
        .recent_entries(now, TRANSCENDENCE_WINDOW_DAYS)
        .into_iter()
        .take(TRANSCENDENCE_MAX_ENTRIES)
        .collect();

    let mut themes: Vec<KarmicTheme> = KarmicThemeKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let rules = rules(kind);
            let manifested = matched_keywords(&authored, rules.indicators);
            if manifested.is_empty() {
                return None;
            }

            let recent = manifested
                .iter()
                .filter(|kw| recent_text.iter().any(|t| t.contains(*kw)))
                .count();
            let integration_level = 1.0 - recent as f64 / manifested.len() as f64;

            let transcendence_indicators = latest
                .iter()
                .flat_map(|entry| {
                    let lower = entry.content.to_lowercase();
                    matched_keywords(&lower, rules.resolution)
                        .into_iter()
                        .map(move |kw| {
                            format!("\"{}\" on {}", kw, entry.timestamp.format("%Y-%m-%d"))
                        })
                        .collect::<Vec<_>>()
                })
                .collect();

            Some(KarmicTheme {
                theme: kind,
                integration_level,
                manifestation_patterns: manifested
                    .iter()
                    .map(|kw| format!("Recurring reference to \"{}\"", kw))
                    .collect(),
                healing_suggestions: rules.healing.to_vec(),
                transcendence_indicators,
            })
        })
        .collect();

    themes.sort_by(|a, b| {
        a.integration_level
            .partial_cmp(&b.integration_level)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!(count = themes.len(), "Identified karmic themes");
    themes
}
