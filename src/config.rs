//! Runtime configuration for a merge run.
//!
//! A [`Config`] is produced from parsed CLI arguments (see
//! [`Cli::to_config`](crate::cli::Cli::to_config)) and validated before
//! any file is touched.

use std::path::PathBuf;

use crate::delivery::DEFAULT_FILE_NAME;
use crate::error::{PdfBindError, Result};
use crate::intake::Validator;

/// Validated settings for one merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files, in merge order.
    pub inputs: Vec<PathBuf>,
    /// Directory the merged document is written into.
    pub output_dir: PathBuf,
    /// File name for the merged document.
    pub file_name: String,
    /// Per-file size ceiling in bytes.
    pub max_file_size: u64,
    /// Suppress all non-error output.
    pub quiet: bool,
    /// Show per-file details and the full merge report.
    pub verbose: bool,
    /// Emit a machine-readable JSON summary instead of styled output.
    pub json: bool,
}

impl Config {
    /// Check the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::InvalidConfig`] when no inputs are given,
    /// the output file name is empty or contains path separators, the
    /// size ceiling is zero, or quiet and verbose are both set.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfBindError::invalid_config("No input files specified"));
        }
        if self.file_name.is_empty() {
            return Err(PdfBindError::invalid_config(
                "Output file name cannot be empty",
            ));
        }
        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(PdfBindError::invalid_config(format!(
                "Output file name cannot contain path separators: {}",
                self.file_name
            )));
        }
        if self.max_file_size == 0 {
            return Err(PdfBindError::invalid_config(
                "Maximum file size must be at least 1 byte",
            ));
        }
        if self.quiet && self.verbose {
            return Err(PdfBindError::invalid_config(
                "quiet and verbose cannot be combined",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_file_size: Validator::DEFAULT_MAX_FILE_SIZE,
            quiet: false,
            verbose: false,
            json: false,
        }
    }
}

/// Parse a human-readable size such as `10M`, `512K`, `1G`, `10MB`, or a
/// plain byte count.
///
/// Suffixes are case-insensitive and use binary multiples; `B` and `iB`
/// endings are accepted and ignored.
///
/// # Errors
///
/// Returns [`PdfBindError::InvalidConfig`] when the input is not a number
/// with an optional `K`/`M`/`G` suffix, or the result overflows.
pub fn parse_size(input: &str) -> Result<u64> {
    let mut text = input.trim().to_ascii_uppercase();
    if let Some(stripped) = text.strip_suffix("IB") {
        text = stripped.to_string();
    } else if let Some(stripped) = text.strip_suffix('B') {
        text = stripped.to_string();
    }

    let (digits, shift) = match text.chars().last() {
        Some('K') => (&text[..text.len() - 1], 10u32),
        Some('M') => (&text[..text.len() - 1], 20),
        Some('G') => (&text[..text.len() - 1], 30),
        _ => (text.as_str(), 0),
    };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| PdfBindError::invalid_config(format!("Invalid size: {input}")))?;
    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| PdfBindError::invalid_config(format!("Size too large: {input}")))
}
