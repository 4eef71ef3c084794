//! Output formatter for human-readable and JSON output
//!
//! Ensures consistent output formatting across all commands.

use console::{Style, Term};
use serde::Serialize;

use super::OutputConfig;
use super::table::{FALLBACK_WIDTH, NO_RESULTS, Table};

/// Foreground colours used for emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Cyan,
    Magenta,
}

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on configuration.
/// When JSON mode is enabled, all output is strict JSON without colors or progress.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Output configuration this formatter was built from
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Styling follows terminal detection unless colours are switched off
    fn style(&self, style: Style) -> Style {
        if self.colors_enabled() {
            style
        } else {
            style.force_styling(false)
        }
    }

    /// Render text in bold
    pub fn bold(&self, text: &str) -> String {
        self.style(Style::new().bold()).apply_to(text).to_string()
    }

    /// Render text in a colour
    pub fn colored(&self, text: &str, color: Color) -> String {
        let style = match color {
            Color::Green => Style::new().green(),
            Color::Yellow => Style::new().yellow(),
            Color::Red => Style::new().red(),
            Color::Cyan => Style::new().cyan(),
            Color::Magenta => Style::new().magenta(),
        };
        self.style(style).apply_to(text).to_string()
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        println!("{} {message}", self.colored("✓", Color::Green));
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            eprintln!("{} {message}", self.colored("✗", Color::Red));
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{} {message}", self.colored("⚠", Color::Yellow));
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Print a table sized to the terminal, header in bold
    pub fn table(&self, table: &Table) {
        if self.config.quiet {
            return;
        }

        for line in self.table_lines(table, terminal_width) {
            println!("{line}");
        }
    }

    /// Lines of a table; the terminal is only measured when there are rows
    fn table_lines(&self, table: &Table, width: impl FnOnce() -> usize) -> Vec<String> {
        if table.is_empty() {
            return vec![NO_RESULTS.to_string()];
        }
        let Some(rendered) = table.render(width()) else {
            return vec![NO_RESULTS.to_string()];
        };

        std::iter::once(self.bold(&rendered.header))
            .chain(rendered.rows)
            .collect()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

/// Width of the attached terminal, or the fallback when there is none
fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map_or(FALLBACK_WIDTH, |(_, cols)| usize::from(cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(!formatter.is_quiet());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_no_color_output_is_plain() {
        let config = OutputConfig {
            no_color: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(!formatter.colors_enabled());
        assert_eq!(formatter.bold("Invocation 1"), "Invocation 1");
        assert_eq!(formatter.colored("ok", Color::Green), "ok");
    }

    #[test]
    fn test_empty_table_does_not_measure_terminal() {
        let formatter = Formatter::default();
        let table = Table::new().column("Alias", Vec::<String>::new());

        let lines = formatter.table_lines(&table, || panic!("terminal measured"));
        assert_eq!(lines, vec![NO_RESULTS.to_string()]);
    }

    #[test]
    fn test_table_lines_use_given_width() {
        let config = OutputConfig {
            no_color: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        let table = Table::new()
            .column("Alias", ["redfox"])
            .column("ID", ["f2db41e1fa331b3e"]);

        let lines = formatter.table_lines(&table, || 200);
        assert_eq!(lines, vec!["Alias   ID", "redfox  f2db41e1fa331b3e"]);
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        console::set_colors_enabled(true);
        let formatter = Formatter::default();
        let text = formatter.colored("error", Color::Red);
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("error"));
    }
}
