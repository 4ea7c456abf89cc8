//! Temporal cycle analysis.
//!
//! Four independent cycle analyses over a history, concatenated and sorted
//! by descending frequency:
//! - consciousness-expansion cycles from journal consciousness levels
//! - practice-effectiveness rhythms from practice logs
//! - life-lesson recurrence from tagged life events
//! - synchronicity waves from synchronicity logs

use chrono::{DateTime, Duration, Utc};

use super::{add_days, average_gap, days_between, descending};
use crate::types::{TemporalKind, TemporalPattern, TextRecord, UserHistory};

const MIN_CONSCIOUSNESS_ENTRIES: usize = 5;
const CONSCIOUSNESS_JUMP: f64 = 0.5;

const MIN_PRACTICE_LOGS: usize = 3;
const PRACTICE_CYCLE_DAYS: i64 = 30;

const MIN_LESSON_EVENTS: usize = 3;
const MIN_SYNCHRONICITY_LOGS: usize = 3;

const CONSCIOUSNESS_SIGNIFICANCE: &str =
    "Your awareness expands in waves; each leap integrates before the next begins";
const PRACTICE_SIGNIFICANCE: &str = "Practices deepen in monthly rhythms; revisit their effect regularly";
const LESSON_SIGNIFICANCE: &str = "This lesson returns on a rhythm until it is integrated";
const WAVE_SIGNIFICANCE: &str = "Synchronicities cluster in waves; the next crest is approaching";

/// Find cyclical patterns in `history`, projecting each cycle's next
/// occurrence.
pub fn identify_temporal_patterns(history: &UserHistory, now: DateTime<Utc>) -> Vec<TemporalPattern> {
    let mut patterns = Vec::new();
    patterns.extend(consciousness_cycles(&history.journal_entries, now));
    patterns.extend(practice_cycles(history, now));
    patterns.extend(lesson_cycles(history));
    patterns.extend(synchronicity_waves(history));

    patterns.sort_by(|a, b| descending(a.frequency, b.frequency));

    tracing::debug!(count = patterns.len(), "Identified temporal patterns");
    patterns
}

/// Jumps of more than 0.5 between chronologically adjacent entries.
///
/// Needs at least five dated entries. A pair is only compared when both
/// entries carry a level; an unannotated entry breaks adjacency. The first
/// gap is measured from the earliest entry to the first jump, each later gap
/// from the previous jump.
fn consciousness_cycles(entries: &[TextRecord], now: DateTime<Utc>) -> Option<TemporalPattern> {
    if entries.len() < MIN_CONSCIOUSNESS_ENTRIES {
        return None;
    }
    let mut sorted: Vec<&TextRecord> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let mut evidence = Vec::new();
    let mut gaps = Vec::new();
    let mut previous = sorted[0].timestamp;
    for pair in sorted.windows(2) {
        let (Some(before), Some(after)) = (pair[0].consciousness_level, pair[1].consciousness_level)
        else {
            continue;
        };
        if after - before > CONSCIOUSNESS_JUMP {
            let ts = pair[1].timestamp;
            gaps.push(days_between(previous, ts));
            evidence.push(format!(
                "Level rose from {:.1} to {:.1} on {}",
                before,
                after,
                ts.format("%Y-%m-%d")
            ));
            previous = ts;
        }
    }
    if gaps.is_empty() {
        return None;
    }

    let cycle = gaps.iter().sum::<f64>() / gaps.len() as f64;
    Some(TemporalPattern {
        kind: TemporalKind::ConsciousnessExpansion,
        pattern: "Consciousness Expansion Cycle".to_string(),
        frequency: gaps.len() as f64 / (sorted.len() - 1) as f64,
        manifestation_cycle: cycle,
        evidence,
        significance: CONSCIOUSNESS_SIGNIFICANCE,
        next_occurrence: add_days(now, cycle),
    })
}

fn practice_cycles(history: &UserHistory, now: DateTime<Utc>) -> Vec<TemporalPattern> {
    let total = history.practice_logs.len();
    let mut practices: Vec<(&str, Vec<f64>)> = Vec::new();
    for log in &history.practice_logs {
        match practices.iter_mut().find(|(name, _)| *name == log.practice) {
            Some((_, scores)) => scores.push(log.effectiveness),
            None => practices.push((log.practice.as_str(), vec![log.effectiveness])),
        }
    }

    practices
        .into_iter()
        .filter(|(_, scores)| scores.len() >= MIN_PRACTICE_LOGS)
        .map(|(name, scores)| {
            let average = scores.iter().sum::<f64>() / scores.len() as f64;
            TemporalPattern {
                kind: TemporalKind::PracticeEffectiveness,
                pattern: format!("Practice Rhythm: {}", name),
                frequency: scores.len() as f64 / total as f64,
                manifestation_cycle: PRACTICE_CYCLE_DAYS as f64,
                evidence: vec![format!(
                    "Average effectiveness {:.2} over {} sessions",
                    average,
                    scores.len()
                )],
                significance: PRACTICE_SIGNIFICANCE,
                next_occurrence: now + Duration::days(PRACTICE_CYCLE_DAYS),
            }
        })
        .collect()
}

fn lesson_cycles(history: &UserHistory) -> Vec<TemporalPattern> {
    let total = history.life_events.len();
    let mut lessons: Vec<(&str, Vec<DateTime<Utc>>, Vec<String>)> = Vec::new();
    for event in &history.life_events {
        let mut tagged: Vec<&str> = event.spiritual_lessons.iter().map(String::as_str).collect();
        tagged.sort_unstable();
        tagged.dedup();
        for lesson in tagged {
            match lessons.iter_mut().find(|(name, _, _)| *name == lesson) {
                Some((_, times, evidence)) => {
                    times.push(event.timestamp);
                    evidence.push(event.description.clone());
                }
                None => lessons.push((lesson, vec![event.timestamp], vec![event.description.clone()])),
            }
        }
    }

    lessons
        .into_iter()
        .filter(|(_, times, _)| times.len() >= MIN_LESSON_EVENTS)
        .filter_map(|(lesson, mut times, evidence)| {
            times.sort();
            let cycle = average_gap(&times)?;
            let last = *times.last()?;
            Some(TemporalPattern {
                kind: TemporalKind::LifeLesson,
                pattern: format!("Life Lesson: {}", lesson),
                frequency: times.len() as f64 / total as f64,
                manifestation_cycle: cycle,
                evidence,
                significance: LESSON_SIGNIFICANCE,
                next_occurrence: add_days(last, cycle),
            })
        })
        .collect()
}

/// Frequency is expected occurrences per day, capped at 1.
fn synchronicity_waves(history: &UserHistory) -> Option<TemporalPattern> {
    if history.synchronicity_logs.len() < MIN_SYNCHRONICITY_LOGS {
        return None;
    }
    let mut times: Vec<DateTime<Utc>> =
        history.synchronicity_logs.iter().map(|s| s.timestamp).collect();
    times.sort();

    let cycle = average_gap(&times)?;
    let last = *times.last()?;
    let frequency = if cycle > 0.0 { (1.0 / cycle).min(1.0) } else { 1.0 };

    Some(TemporalPattern {
        kind: TemporalKind::SynchronicityWave,
        pattern: "Synchronicity Wave".to_string(),
        frequency,
        manifestation_cycle: cycle,
        evidence: vec![format!("{} synchronicities logged", times.len())],
        significance: WAVE_SIGNIFICANCE,
        next_occurrence: add_days(last, cycle),
    })
}
