//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for verbose-only output
//! - per-file status lines (✓/✗) for batch processing
//!
//! # Example
//!
//! ```ignore
//! log!("run"; "processing {} files", count);
//! status_success("dist/index.html");
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "run" => prefix.bright_blue().bold().to_string(),
        "check" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Lines (per-file results)
// ============================================================================

/// Display a success line (✓ prefix, green).
pub fn status_success(message: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{} {}", "✓".green(), message).ok();
    stdout.flush().ok();
}

/// Display an error line (✗ prefix, red) with optional detail.
pub fn status_error(summary: &str, detail: &str) {
    let mut stdout = stdout().lock();
    if detail.is_empty() {
        writeln!(stdout, "{} {}", "✗".red(), summary).ok();
    } else {
        writeln!(stdout, "{} {}\n  {}", "✗".red(), summary, detail.dimmed()).ok();
    }
    stdout.flush().ok();
}

/// Display an unchanged/skipped line (dimmed, no symbol).
pub fn status_unchanged(message: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "  {}", message.dimmed()).ok();
    stdout.flush().ok();
}
