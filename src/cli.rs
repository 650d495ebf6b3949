//! CLI argument parsing for pdfbind.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Merging {} inputs", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::delivery::DEFAULT_FILE_NAME;
use crate::error::Result;
use crate::utils;

/// Merge batches of PDF files into a single document.
///
/// pdfbind validates each input against a size ceiling and duplicate
/// check, merges the accepted files in order, and writes one combined
/// document. Files that fail to decode are skipped with a warning; the
/// remaining files still merge.
#[derive(Parser, Debug)]
#[command(name = "pdfbind")]
#[command(version)]
#[command(about = "Merge batches of PDF files into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Pages appear in the output in the order given here.
    ///
    /// Examples:
    ///   pdfbind file1.pdf file2.pdf
    ///   pdfbind chapter*.pdf -d out/
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Directory to write the merged document into
    ///
    /// Created if it does not exist. An existing file under the
    /// same name is replaced.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// File name for the merged document
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Per-file size ceiling
    ///
    /// Files larger than this are rejected at intake and never read.
    /// Accepts plain byte counts or K/M/G suffixes (binary multiples).
    #[arg(long, value_name = "SIZE", default_value = "10M")]
    pub max_file_size: String,

    /// Print a JSON summary instead of styled output
    ///
    /// Progress rendering is suppressed; the summary covers the output
    /// path, final status, and the merge report.
    #[arg(long, conflicts_with = "verbose")]
    pub json: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show per-file details and the merge report
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Glob patterns in the inputs are expanded here; the size ceiling is
    /// parsed from its human-readable form.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is malformed, the size ceiling
    /// does not parse, or the resulting configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pdfbind::cli::Cli;
    /// use clap::Parser;
    ///
    /// let cli = Cli::parse();
    /// let config = cli.to_config().expect("Invalid configuration");
    /// ```
    pub fn to_config(&self) -> Result<Config> {
        let inputs = utils::expand_patterns(&self.inputs)?;
        let max_file_size = config::parse_size(&self.max_file_size)?;

        let config = Config {
            inputs,
            output_dir: self.output_dir.clone(),
            file_name: self.file_name.clone(),
            max_file_size,
            quiet: self.quiet,
            verbose: self.verbose,
            json: self.json,
        };

        config.validate()?;
        Ok(config)
    }
}
