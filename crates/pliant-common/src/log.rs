//! Engine diagnostics with colored terminal output.
//!
//! The engine never prints directly. Every message goes through a logger
//! callback on the node's config, and [`default_log`] is what a fresh config
//! installs.

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Severity of a diagnostic message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// Recoverable misuse reported by the engine.
    Error,
    /// Suspicious input that still produced a layout.
    Warn,
    /// General information.
    Info,
    /// Tree dumps requested through the config.
    Debug,
    /// Per-node trace output (the `layout-trace` feature).
    Verbose,
    /// A broken tree invariant. The operation that logged it was refused.
    Fatal,
}

/// Write one message to stderr, colored by level.
///
/// # Example
/// ```ignore
/// default_log(LogLevel::Warn, "measure callback returned a negative width");
/// ```
pub fn default_log(level: LogLevel, message: &str) {
    let line = format!("[Pliant {level}] {}", message.trim_end());
    match level {
        LogLevel::Error | LogLevel::Fatal => eprintln!("{}", line.red()),
        LogLevel::Warn => eprintln!("{}", line.yellow()),
        LogLevel::Info => eprintln!("{line}"),
        LogLevel::Debug | LogLevel::Verbose => eprintln!("{}", line.dimmed()),
    }
}
