//
//  jira-cli
//  output/mod.rs
//

//! # Output Module
//!
//! Output formatting for the CLI, supporting three formats:
//!
//! - **Table format**: Human-readable fixed-width columns for interactive
//!   terminal use
//! - **CSV format**: Spreadsheet-friendly rows for export and piping
//! - **JSON format**: Machine-readable output for scripting and automation
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for types that can be rendered as tables or CSV
//!
//! ## Example
//!
//! ```rust,ignore
//! use jira_cli::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&issue_listing)?;
//! writer.write_success("Issue created");
//! ```

use serde::Serialize;

/// Represents the available output formats for CLI output.
///
/// # Notes
///
/// The default output format is [`OutputFormat::Table`], which provides the
/// best experience for interactive terminal use with color support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable fixed-width columns with optional color support.
    #[default]
    Table,
    /// Comma-separated values with a header row, RFC 4180 quoting.
    Csv,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

/// A unified output writer that handles multiple output formats.
///
/// `OutputWriter` abstracts away the details of different output formats
/// and provides a consistent API for writing data, status messages, and
/// errors.
///
/// # Notes
///
/// Color output is automatically detected based on terminal capabilities.
/// Colors are disabled when output is piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    ///
    /// The writer automatically detects whether color output is supported
    /// based on terminal capabilities.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a new output writer configured for table output.
    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    /// Checks if color output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Returns the output format configured for this writer.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value to stdout using the configured output format.
    ///
    /// The value must implement [`Serialize`] (for JSON output) and
    /// [`TableOutput`] (for table and CSV output).
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                value.print_table(self.color);
            }
            OutputFormat::Csv => {
                println!("{}", T::csv_header());
                println!("{}", value.csv_row());
            }
        }
        Ok(())
    }

    /// Writes a list of values to stdout using the configured output format.
    ///
    /// For JSON format, the entire list is serialized as a JSON array. For
    /// CSV, one header row precedes all value rows. For tables, each value
    /// renders individually.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(values)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                for value in values {
                    value.print_table(self.color);
                }
            }
            OutputFormat::Csv => {
                println!("{}", T::csv_header());
                for value in values {
                    println!("{}", value.csv_row());
                }
            }
        }
        Ok(())
    }

    /// Writes an error message to stderr.
    ///
    /// The message is prefixed with "error:" and styled in red when color
    /// output is enabled. Errors always go to stderr, regardless of format.
    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {msg}");
        }
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {msg}");
        }
    }

    /// Writes an informational message to stdout, unstyled.
    pub fn write_info(&self, msg: &str) {
        println!("{msg}");
    }

    /// Writes a success message to stdout with a green checkmark.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {msg}");
        }
    }
}

/// A trait for types that can be rendered as table or CSV output.
///
/// Types implementing this trait can be written through an [`OutputWriter`].
/// For JSON output, types must also implement [`Serialize`].
pub trait TableOutput {
    /// Renders the type as a table row or section.
    ///
    /// Implementations should use the `color` parameter to conditionally
    /// apply styling, and be mindful of terminal width.
    fn print_table(&self, color: bool);

    /// Returns the CSV header row for this type.
    fn csv_header() -> String
    where
        Self: Sized;

    /// Renders the type as one CSV data row.
    ///
    /// Use [`csv_escape`] on every field so commas, quotes, and newlines
    /// in the data survive.
    fn csv_row(&self) -> String;
}

/// Prints a styled header with an underline.
///
/// ASCII dashes are used for the underline for terminal compatibility.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.len()));
}

/// Prints a key-value pair, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{key}: {value}");
    }
}

/// Quotes a CSV field per RFC 4180.
///
/// Fields containing a comma, double quote, or newline are wrapped in
/// double quotes with inner quotes doubled; everything else passes through
/// unchanged.
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Joins already-escaped or raw fields into one CSV row.
pub fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}
