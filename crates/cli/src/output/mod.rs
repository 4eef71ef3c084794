//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also handles tables, spinners, prompts and colored
//! output.

mod formatter;
mod progress;
pub mod prompt;
mod table;

pub use formatter::{Color, Formatter};
pub use progress::Spinner;
pub use table::{NO_RESULTS, Table};

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
