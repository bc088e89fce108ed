//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), including the run
//! summary and the progress bar shown while documents render.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use packetdoc_schemas::{BatchReport, DocumentOutcome, SkipReason};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the report of a documentation run
    fn format_report(&self, report: &BatchReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    #[cfg(test)]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Disable progress indicators regardless of the terminal
    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "✓".green(), message))
        } else {
            self.writeln(&format!("✓ {}", message))
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write already formatted data
    fn emit(&mut self, formatted: &str) -> Result<()> {
        trace!(bytes = formatted.len(), "Outputting data");

        if self.format == OutputFormat::Yaml {
            // serde_yaml already ends documents with a newline
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Write the run report.
    ///
    /// Human output lists every failed document and a summary; machine
    /// formats serialize the whole report, even in quiet mode.
    pub fn report(&mut self, report: &BatchReport) -> Result<()> {
        if self.format != OutputFormat::Human {
            let formatted = self.format.format_report(report)?;
            return self.emit(&formatted);
        }

        let failures: Vec<Vec<String>> = report
            .failures()
            .map(|entry| {
                let message = match &entry.outcome {
                    DocumentOutcome::Skipped(SkipReason::Failed { message }) => message.clone(),
                    _ => String::new(),
                };
                vec![entry.name(), message]
            })
            .collect();

        if !failures.is_empty() {
            self.section("Failed documents")?;
            self.table(&["Document", "Reason"], failures)?;
        }

        if self.quiet {
            return Ok(());
        }
        self.writeln("")?;
        for line in summary_lines(report) {
            match line {
                SummaryLine::Done(text) => self.success(&text)?,
                SummaryLine::Problem(text) => self.warning(&text)?,
            }
        }
        Ok(())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// One line of the human run summary
enum SummaryLine {
    Done(String),
    Problem(String),
}

impl SummaryLine {
    fn text(&self) -> &str {
        match self {
            Self::Done(text) | Self::Problem(text) => text,
        }
    }
}

/// Summary lines of a run, one fact per line
fn summary_lines(report: &BatchReport) -> Vec<SummaryLine> {
    let mut lines = vec![SummaryLine::Done(format!(
        "Generated {} packet documentation files",
        report.rendered
    ))];

    if report.skipped > 0 {
        lines.push(SummaryLine::Done(format!("Skipped {} payload fragments", report.skipped)));
    }
    if report.failed > 0 {
        lines.push(SummaryLine::Problem(format!("{} documents failed to render", report.failed)));
    }

    lines.push(SummaryLine::Done(format!("Output directory: {}", report.output_dir.display())));
    if let Some(index) = &report.index {
        lines.push(SummaryLine::Done(format!("Open {} in your browser", index.display())));
    }
    lines
}

fn format_report_human(report: &BatchReport) -> String {
    summary_lines(report)
        .iter()
        .map(SummaryLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}
