//! Sequential PDF merging.
//!
//! [`Merger`] walks a [`Batch`](crate::intake::Batch) in order, decodes
//! each file through the [`codec`] layer, and accumulates every page into
//! one output document. Per-file failures are reported and skipped; the
//! run only aborts when there is nothing to merge or the result cannot be
//! serialized.
//!
//! # Examples
//!
//! ```no_run
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
//! println!("merged {} pages", result.report.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod merger;

pub use merger::{MergeReport, MergeResult, Merger, SkippedFile};

use crate::error::Result;
use crate::intake::Batch;
use crate::session::SessionState;

/// Merge a batch with the default [`Merger`].
pub async fn merge_batch(batch: &Batch, state: &mut SessionState) -> Result<MergeResult> {
    Merger::new().merge(batch, state).await
}
