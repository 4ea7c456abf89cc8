//! Synchronicity detection across life events.
//!
//! Four independent scans, concatenated and sorted by descending frequency:
//!
//! | Scan | Flags | Frequency |
//! |------|-------|-----------|
//! | Date | day or month of 11, 22 or 33 | 0.8 per event |
//! | Number | number token seen ≥3 times | count / events |
//! | Theme | lesson or insight tag seen ≥3 times | count / events |
//! | Archetype | archetype tag seen ≥2 times | count / events |

use chrono::Datelike;

use super::{descending, Tally};
use crate::lexicon::extract_numbers;
use crate::types::{ConversationMessage, LifeEvent, SynchronicityKind, SynchronicityPattern};

const SACRED_DATE_VALUES: [u32; 3] = [11, 22, 33];
const SACRED_DATE_FREQUENCY: f64 = 0.8;

const NUMBER_THRESHOLD: usize = 3;
const THEME_THRESHOLD: usize = 3;
const ARCHETYPE_THRESHOLD: usize = 2;

const DATE_SIGNIFICANCE: &str = "Master-number dates mark moments of alignment and activation";
const NUMBER_SIGNIFICANCE: &str = "A number returning again and again is asking for your attention";
const THEME_SIGNIFICANCE: &str = "The same lesson keeps arriving until it is fully received";
const ARCHETYPE_SIGNIFICANCE: &str = "An archetype repeating across events shows the role life is inviting you into";

/// Detect synchronicities in `events`, with optional conversation insights
/// feeding the theme scan.
pub fn detect_synchronicities(
    events: &[LifeEvent],
    conversations: Option<&[ConversationMessage]>,
) -> Vec<SynchronicityPattern> {
    // Floor of 1 so insight-only themes still get a finite frequency
    let total_events = events.len().max(1) as f64;

    let mut patterns = date_synchronicities(events);
    patterns.extend(number_synchronicities(events, total_events));
    patterns.extend(theme_synchronicities(events, conversations, total_events));
    patterns.extend(archetype_synchronicities(events, total_events));

    patterns.sort_by(|a, b| descending(a.frequency, b.frequency));

    tracing::debug!(
        events = events.len(),
        count = patterns.len(),
        "Detected synchronicities"
    );
    patterns
}

fn date_synchronicities(events: &[LifeEvent]) -> Vec<SynchronicityPattern> {
    events
        .iter()
        .filter(|event| {
            let date = event.timestamp.date_naive();
            SACRED_DATE_VALUES.contains(&date.day()) || SACRED_DATE_VALUES.contains(&date.month())
        })
        .map(|event| SynchronicityPattern {
            kind: SynchronicityKind::Date,
            pattern: format!("Sacred Date: {}", event.timestamp.format("%B %-d")),
            frequency: SACRED_DATE_FREQUENCY,
            evidence: vec![event.description.clone()],
            significance: DATE_SIGNIFICANCE,
        })
        .collect()
}

fn number_synchronicities(events: &[LifeEvent], total_events: f64) -> Vec<SynchronicityPattern> {
    let mut tally = Tally::new();
    for event in events {
        for number in extract_numbers(&event.description) {
            tally.record(number, event.description.clone());
        }
    }

    tally
        .at_least(NUMBER_THRESHOLD)
        .into_iter()
        .map(|(number, mut evidence)| {
            let frequency = evidence.len() as f64 / total_events;
            evidence.dedup();
            SynchronicityPattern {
                kind: SynchronicityKind::Number,
                pattern: format!("Recurring Number: {}", number),
                frequency,
                evidence,
                significance: NUMBER_SIGNIFICANCE,
            }
        })
        .collect()
}

fn theme_synchronicities(
    events: &[LifeEvent],
    conversations: Option<&[ConversationMessage]>,
    total_events: f64,
) -> Vec<SynchronicityPattern> {
    let mut tally = Tally::new();
    for event in events {
        for lesson in &event.spiritual_lessons {
            tally.record(lesson.clone(), event.description.clone());
        }
    }
    for message in conversations.unwrap_or_default() {
        for insight in &message.spiritual_insights {
            tally.record(insight.clone(), message.content.clone());
        }
    }

    tally
        .at_least(THEME_THRESHOLD)
        .into_iter()
        .map(|(theme, evidence)| SynchronicityPattern {
            kind: SynchronicityKind::Theme,
            pattern: format!("Recurring Theme: {}", theme),
            frequency: evidence.len() as f64 / total_events,
            evidence,
            significance: THEME_SIGNIFICANCE,
        })
        .collect()
}

fn archetype_synchronicities(events: &[LifeEvent], total_events: f64) -> Vec<SynchronicityPattern> {
    let mut tally = Tally::new();
    for event in events {
        for archetype in &event.archetypal_themes {
            tally.record(archetype.clone(), event.description.clone());
        }
    }

    tally
        .at_least(ARCHETYPE_THRESHOLD)
        .into_iter()
        .map(|(archetype, evidence)| SynchronicityPattern {
            kind: SynchronicityKind::Archetype,
            pattern: format!("Archetypal Echo: {}", archetype),
            frequency: evidence.len() as f64 / total_events,
            evidence,
            significance: ARCHETYPE_SIGNIFICANCE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    fn insight_message(insight: &str) -> ConversationMessage {
        ConversationMessage {
            timestamp: at(1, 1),
            sender: Sender::User,
            content: format!("talking about {}", insight),
            spiritual_insights: vec![insight.to_string()],
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(detect_synchronicities(&[], None).is_empty());
        assert!(detect_synchronicities(&[], Some(&[][..])).is_empty());
    }

    #[test]
    fn test_date_synchronicities() {
        let events = vec![
            LifeEvent::new(at(3, 11), "met a mentor"),
            LifeEvent::new(at(11, 5), "new job"),
            LifeEvent::new(at(4, 22), "moved"),
            LifeEvent::new(at(4, 21), "ordinary day"),
        ];
        let patterns = detect_synchronicities(&events, None);
        assert_eq!(patterns.len(), 3);
        assert!(patterns.iter().all(|p| p.kind == SynchronicityKind::Date));
        assert!(patterns.iter().all(|p| p.frequency == 0.8));
        assert_eq!(patterns[0].pattern, "Sacred Date: March 11");
        assert_eq!(patterns[1].evidence, vec!["new job"]);
    }

    #[test]
    fn test_number_synchronicities() {
        let events = vec![
            LifeEvent::new(at(1, 2), "Flight 444 was delayed"),
            LifeEvent::new(at(1, 3), "Hotel room 444"),
            LifeEvent::new(at(1, 4), "Receipt total 444, then 12"),
            LifeEvent::new(at(1, 5), "Nothing numeric"),
        ];
        let patterns = detect_synchronicities(&events, None);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern, "Recurring Number: 444");
        assert_eq!(patterns[0].frequency, 0.75);
        assert_eq!(patterns[0].evidence.len(), 3);
    }

    #[test]
    fn test_theme_synchronicities_include_conversations() {
        let events = vec![
            LifeEvent::new(at(1, 2), "a").with_lesson("Patience"),
            LifeEvent::new(at(1, 3), "b").with_lesson("Patience"),
        ];
        let messages = vec![insight_message("Patience")];

        assert!(detect_synchronicities(&events, None).is_empty());

        let patterns = detect_synchronicities(&events, Some(messages.as_slice()));
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, SynchronicityKind::Theme);
        assert_eq!(patterns[0].pattern, "Recurring Theme: Patience");
        assert_eq!(patterns[0].frequency, 1.5);
    }

    #[test]
    fn test_archetype_synchronicities_and_ordering() {
        let events = vec![
            LifeEvent::new(at(3, 11), "x").with_archetype("The Hero"),
            LifeEvent::new(at(1, 3), "y").with_archetype("The Hero"),
            LifeEvent::new(at(1, 4), "z").with_archetype("The Sage"),
            LifeEvent::new(at(1, 5), "w").with_archetype("The Hero"),
        ];
        let patterns = detect_synchronicities(&events, None);
        assert_eq!(patterns.len(), 2);
        // 0.8 (date) beats 0.75 (3 of 4 events)
        assert_eq!(patterns[0].kind, SynchronicityKind::Date);
        assert_eq!(patterns[1].pattern, "Archetypal Echo: The Hero");
        assert_eq!(patterns[1].frequency, 0.75);
    }
}
