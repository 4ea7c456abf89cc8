//! featherweight-insight - spiritual pattern report CLI
//!
//! Analyze a Featherweight history export and print the patterns found in it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use featherweight_core::format::{format_days, format_percent, format_relative_to};
use featherweight_core::{Config, InsightReport, KarmicTheme, PatternAnalyzer, UserHistory};

#[derive(Parser, Debug)]
#[command(name = "featherweight-insight")]
#[command(about = "Featherweight insight report - patterns across your journey")]
#[command(version)]
struct Args {
    /// History export (JSON) to analyze
    history: PathBuf,

    /// Text to analyze (default: the most recent journal entry)
    #[arg(long)]
    text: Option<String>,

    /// Reference time in RFC 3339 (default: now)
    #[arg(long)]
    now: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Config file (default: ~/.config/featherweight/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration and logging
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = featherweight_core::logging::init(&config.logging).ok();

    let history = UserHistory::load_from(&args.history)
        .with_context(|| format!("failed to load history from {}", args.history.display()))?;
    tracing::debug!(
        path = %args.history.display(),
        entries = history.journal_entries.len(),
        events = history.life_events.len(),
        "Loaded history"
    );
    if history.is_empty() {
        tracing::warn!(path = %args.history.display(), "History export holds no records");
    }

    let analyzer = match &args.now {
        Some(now) => {
            let now = DateTime::parse_from_rfc3339(now)
                .context("Invalid --now. Use RFC 3339 (e.g., 2024-06-01T12:00:00Z)")?;
            PatternAnalyzer::at(now.with_timezone(&Utc))
        }
        None => PatternAnalyzer::new(),
    };

    let report = analyzer.generate_report(args.text.as_deref(), &history, &config.report);

    match args.export.as_deref() {
        Some("json") => print_json(&report)?,
        Some("md") => print_markdown(&report),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&report),
    }

    Ok(())
}

fn print_terminal(report: &InsightReport) {
    let title = format!("INSIGHTS FOR {}", report.user_id.to_uppercase());

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    // Energy
    println!("ENERGY");
    println!(
        "   Vibration:     {:<10.0} Emotion:   {:.0} Hz",
        report.vibrational_frequency, report.emotional_frequency
    );
    println!(
        "   Consciousness: {:<10.1} Coherence: {}",
        report.consciousness_level,
        format_percent(report.quantum_coherence)
    );
    println!();

    // Chakras
    println!("CHAKRAS (overall {})", format_percent(report.chakra_balance.overall));
    for (chakra, score) in report.chakra_balance.iter() {
        let filled = (score * 20.0).round() as usize;
        println!(
            "   {:<13} {}{} {}",
            chakra.name(),
            "█".repeat(filled),
            "░".repeat(20 - filled.min(20)),
            format_percent(score)
        );
    }
    println!(
        "   Needs attention: {}",
        report.chakra_balance.weakest().name()
    );
    println!();

    if !report.sacred_numbers.is_empty() {
        println!("SACRED NUMBERS");
        for pattern in &report.sacred_numbers {
            println!(
                "   {:<6} {:<40} {}",
                pattern.number,
                pattern.spiritual_significance,
                format_percent(pattern.synchronicity_level)
            );
        }
        println!();
    }

    if !report.archetypes.is_empty() {
        println!("ARCHETYPES");
        for theme in &report.archetypes {
            println!("   {} ({})", theme.name, format_percent(theme.relevance));
            println!("      \"{}\"", theme.guidance);
        }
        println!();
    }

    if !report.karmic_themes.is_empty() {
        println!("KARMIC THEMES");
        for theme in &report.karmic_themes {
            println!(
                "   {:<12} integration {}",
                theme.theme.name(),
                format_percent(theme.integration_level)
            );
            if let Some(suggestion) = theme.healing_suggestions.first() {
                println!("      Try: {}", suggestion);
            }
        }
        println!();
    }

    if let Some(syncs) = report.synchronicities.as_ref().filter(|s| !s.is_empty()) {
        println!("SYNCHRONICITIES");
        for sync in syncs {
            println!("   {} ({:.2})", sync.pattern, sync.frequency);
        }
        println!();
    }

    if let Some(cycles) = report.temporal_patterns.as_ref().filter(|t| !t.is_empty()) {
        println!("CYCLES");
        for cycle in cycles {
            println!(
                "   {:<36} every {:<10} next {}",
                cycle.pattern,
                format_days(cycle.manifestation_cycle),
                format_relative_to(cycle.next_occurrence, report.generated_at)
            );
        }
        println!();
    }

    if !report.has_history_patterns() {
        println!("  No recurring patterns found in this history yet.");
        println!();
    }
}

fn print_markdown(report: &InsightReport) {
    println!("# Insights for {}", report.user_id);
    println!();
    println!(
        "*Generated {}*",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    // Energy table
    println!("## Energy");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Vibrational frequency | {:.0} Hz |", report.vibrational_frequency);
    println!("| Emotional frequency | {:.0} Hz |", report.emotional_frequency);
    println!("| Consciousness level | {:.1} |", report.consciousness_level);
    println!("| Quantum coherence | {} |", format_percent(report.quantum_coherence));
    println!();

    println!("## Chakra Balance");
    println!();
    println!("| Chakra | Score |");
    println!("|--------|-------|");
    for (chakra, score) in report.chakra_balance.iter() {
        println!("| {} | {} |", chakra.name(), format_percent(score));
    }
    println!(
        "| **Overall** | **{}** |",
        format_percent(report.chakra_balance.overall)
    );
    println!();
    println!(
        "*Needs attention: {}*",
        report.chakra_balance.weakest().name()
    );
    println!();

    if !report.sacred_numbers.is_empty() {
        println!("## Sacred Numbers");
        println!();
        for pattern in &report.sacred_numbers {
            println!(
                "- **{}** - {} ({})",
                pattern.number,
                pattern.spiritual_significance,
                pattern.manifestation_areas.join(", ")
            );
        }
        println!();
    }

    if !report.archetypes.is_empty() {
        println!("## Archetypes");
        println!();
        for theme in &report.archetypes {
            println!(
                "- **{}** ({}) - *\"{}\"*",
                theme.name,
                format_percent(theme.relevance),
                theme.guidance
            );
        }
        println!();
    }

    if !report.karmic_themes.is_empty() {
        println!("## Karmic Themes");
        println!();
        for theme in &report.karmic_themes {
            println!("### {}", karmic_heading(theme));
            println!();
            for suggestion in &theme.healing_suggestions {
                println!("- {}", suggestion);
            }
            println!();
        }
    }

    if let Some(syncs) = report.synchronicities.as_ref().filter(|s| !s.is_empty()) {
        println!("## Synchronicities");
        println!();
        for sync in syncs {
            println!("- **{}** - {}", sync.pattern, sync.significance);
        }
        println!();
    }

    if let Some(cycles) = report.temporal_patterns.as_ref().filter(|t| !t.is_empty()) {
        println!("## Cycles");
        println!();
        println!("| Pattern | Cycle | Next |");
        println!("|---------|-------|------|");
        for cycle in cycles {
            println!(
                "| {} | {} | {} |",
                cycle.pattern,
                format_days(cycle.manifestation_cycle),
                cycle.next_occurrence.format("%Y-%m-%d")
            );
        }
        println!();
    }

    println!("---");
    println!("*Generated by featherweight-insight*");
}

/// "Self-Worth (integration 40%)"; 1.0 means fully unresolved.
fn karmic_heading(theme: &KarmicTheme) -> String {
    format!(
        "{} (integration {})",
        theme.theme.name(),
        format_percent(theme.integration_level)
    )
}

fn print_json(report: &InsightReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
