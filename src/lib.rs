//! pdfbind merges batches of PDF files into a single document.
//!
//! Offered files pass through an intake validator (type, size ceiling,
//! duplicate check) into an ordered batch. The merger then decodes each
//! accepted file sequentially and accumulates every page into one output
//! document, skipping files that fail to decode, and delivery writes the
//! result atomically into the target directory.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::delivery::Deliverer;
//! use pdfbind::intake::{Batch, Validator};
//! use pdfbind::merge;
//! use pdfbind::session::SessionState;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut batch = Batch::new();
//! let mut state = SessionState::new();
//! Validator::new()
//!     .offer_paths(&mut batch, &mut state, &["a.pdf".into(), "b.pdf".into()])
//!     .await;
//!
//! let result = merge::merge_batch(&batch, &mut state).await?;
//! let path = Deliverer::new().deliver(&result.bytes, ".".as_ref()).await?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod intake;
pub mod merge;
pub mod output;
pub mod session;
pub(crate) mod utils;

pub use config::Config;
pub use delivery::Deliverer;
pub use error::{PdfBindError, Result};
pub use intake::{Batch, FileHandle, Validator};
pub use merge::{MergeReport, MergeResult, Merger};
pub use session::{MergeProgress, MergeStatus, SessionState, StatusKind};

use serde::Serialize;

use crate::output::OutputFormatter;

/// Crate version from the manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from the manifest.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Machine-readable summary printed in JSON mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary<'a> {
    output: String,
    status: &'a MergeStatus,
    report: &'a MergeReport,
    rejected: Vec<String>,
}

/// Drive a full merge run from parsed CLI arguments.
///
/// Expands the configuration, offers every input to the batch, merges
/// the accepted files with live progress rendering, and delivers the
/// result. In JSON mode the styled stream is suppressed and a summary
/// object is printed on stdout instead.
///
/// # Errors
///
/// Returns the first fatal error: invalid configuration, an empty or
/// fully skipped batch, serialization failure, or a delivery failure.
pub async fn run(cli: cli::Cli) -> Result<()> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    let json = config.json;

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    let validator = Validator::new().with_max_file_size(config.max_file_size);

    let outcome = validator
        .offer_paths(&mut batch, &mut state, &config.inputs)
        .await;
    if !json {
        for err in &outcome.rejected {
            formatter.warning(&err.to_string());
        }
    }
    if outcome.added > 0 {
        formatter.success(&state.status().message);
    }
    if formatter.is_verbose() {
        for handle in batch.iter() {
            formatter.detail(handle.name(), &output::format_file_size(handle.size_bytes()));
        }
    }

    let result = Merger::new()
        .merge_with_progress(&batch, &mut state, |s| match s.status().kind {
            StatusKind::Error => {
                formatter.clear_line();
                if !json {
                    formatter.warning(&s.status().message);
                }
            }
            StatusKind::Info | StatusKind::Success => {
                formatter.progress(s.progress().percent(), Some(&s.status().message));
            }
        })
        .await?;

    let output_path = Deliverer::new()
        .with_file_name(config.file_name.clone())
        .deliver(&result.bytes, &config.output_dir)
        .await?;

    formatter.success(&format!(
        "Created {} ({})",
        output_path.display(),
        output::format_file_size(result.bytes.len() as u64)
    ));
    if formatter.is_verbose() {
        output::display_merge_report(&formatter, &result.report);
    }

    if json {
        let summary = RunSummary {
            output: output_path.display().to_string(),
            status: state.status(),
            report: &result.report,
            rejected: outcome.rejected.iter().map(|e| e.to_string()).collect(),
        };
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|err| PdfBindError::serialization(err.to_string()))?;
        println!("{rendered}");
    }

    Ok(())
}
