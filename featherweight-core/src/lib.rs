//! # featherweight-core
//!
//! Pattern analysis for Featherweight journal and conversation histories.
//!
//! This library provides:
//! - Domain types for journal entries, conversations, life events and logs
//! - Lexical signal extraction over a single text ([`lexicon`])
//! - Temporal and historical pattern aggregation ([`patterns`])
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Analysis runs in two layers:
//! - **Lexicon:** stateless keyword and number scoring of one text block
//! - **Patterns:** the lexicon scans run across a whole [`UserHistory`],
//!   measured against the [`PatternAnalyzer`]'s reference instant
//!
//! Nothing is persisted. Every call recomputes from its inputs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use featherweight_core::{Config, PatternAnalyzer, UserHistory};
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let history = UserHistory::load_from(Path::new("history.json")).expect("failed to load history");
//!
//! let report = PatternAnalyzer::new().generate_report(None, &history, &config.report);
//! println!("{} sacred numbers", report.sacred_numbers.len());
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, ReportConfig};
pub use error::{Error, Result};
pub use lexicon::Archetype;
pub use patterns::{InsightReport, PatternAnalyzer};
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod format;
pub mod lexicon;
pub mod logging;
pub mod patterns;
pub mod types;
