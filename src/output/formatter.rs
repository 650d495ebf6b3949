//! Styled message rendering with quiet and verbose gating.
//!
//! Every message carries a [`MessageLevel`] that decides its prefix glyph
//! and color. Info and success lines disappear in quiet mode; warnings and
//! errors always print; debug lines only appear in verbose mode.
//!
//! # Examples
//!
//! ```
//! use pdfbind::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.success("Added 2 PDF file(s)");
//! formatter.warning("big.pdf is too large (12.00 MB, max 10.00 MB)");
//! ```

use std::io::{self, Write};

use crate::config::Config;

/// Severity of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Plain informational line.
    Info,
    /// A completed action.
    Success,
    /// A recoverable problem, shown even in quiet mode.
    Warning,
    /// A failure, shown even in quiet mode.
    Error,
    /// Extra detail, shown only in verbose mode.
    Debug,
}

impl MessageLevel {
    /// Prefix glyph and ANSI color for this level.
    fn decoration(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }
}

/// Renders terminal output for a merge run.
///
/// Construction decides once whether color is available; every print goes
/// through the same level-based gating after that.
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// A formatter with explicit quiet and verbose flags.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: stdout_supports_color(),
        }
    }

    /// A formatter matching the run configuration.
    ///
    /// JSON mode implies quiet so the summary on stdout stays parseable.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose)
    }

    /// A formatter that only prints warnings and errors.
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// A formatter that also prints debug and detail lines.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(MessageLevel::Success, message);
        }
    }

    /// Print a warning. Shown in every mode.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error. Shown in every mode.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a debug line. Shown only in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.emit(MessageLevel::Debug, message);
        }
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        let (prefix, color) = level.decoration();
        if self.colored && !color.is_empty() {
            println!("{color}{prefix}{message}\x1b[0m");
        } else {
            println!("{prefix}{message}");
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a horizontal rule. Shown only in verbose mode.
    pub fn separator(&self) {
        if self.verbose {
            println!("────────────────────────────────────────");
        }
    }

    /// Print an indented `label: value` line. Shown only in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Render the in-place progress line.
    ///
    /// The current line is rewritten on every call; reaching 100 emits the
    /// trailing newline. Suppressed in quiet mode.
    pub fn progress(&self, percent: u8, message: Option<&str>) {
        if self.quiet {
            return;
        }
        let message = message.unwrap_or("");
        print!("\r\x1b[K  [{percent:>3}%] {message}");
        io::stdout().flush().ok();
        if percent >= 100 {
            println!();
        }
    }

    /// Erase the in-place progress line so a full line can print cleanly.
    pub fn clear_line(&self) {
        if !self.quiet {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    /// Print an empty line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print a numbered list entry. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Whether non-error output is printed at all.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Whether detail and debug lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether quiet mode is active.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

fn stdout_supports_color() -> bool {
    use std::io::IsTerminal;
    io::stdout().is_terminal() && std::env::var("TERM").is_ok()
}
