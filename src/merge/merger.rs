use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{PdfBindError, Result};
use crate::intake::{Batch, FileHandle};
use crate::merge::codec;
use crate::session::SessionState;

/// A file that was offered to a merge run but contributed no pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    /// Display name of the file.
    pub name: String,
    /// Why the file was skipped.
    pub reason: String,
}

/// Statistics for one completed merge run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Number of files in the batch when the run started.
    pub total_files: usize,
    /// Number of files whose pages made it into the output.
    pub merged_files: usize,
    /// Number of pages in the output document.
    pub total_pages: usize,
    /// Combined input size of the merged files, in bytes.
    pub total_size_bytes: u64,
    /// Wall-clock duration of the run.
    pub merge_time: Duration,
    /// Files that were skipped, in batch order.
    pub skipped: Vec<SkippedFile>,
}

impl MergeReport {
    /// Names of the skipped files, in batch order.
    pub fn skipped_files(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.name.as_str()).collect()
    }
}

/// The serialized output of a merge run together with its statistics.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The merged document, ready for delivery.
    pub bytes: Vec<u8>,
    /// What happened during the run.
    pub report: MergeReport,
}

/// Drives the sequential decode, page-copy, accumulate loop over a batch.
///
/// Files are processed strictly one at a time in batch order so that pages
/// land in batch order, with each file's pages in their original order. A
/// file that cannot be read or decoded is skipped with an error status and
/// the run continues; only an empty batch, a batch where every file is
/// skipped, or a failure to serialize the result abort the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger;

impl Merger {
    /// A merger with default behavior.
    pub fn new() -> Self {
        Self
    }

    /// Merge the batch, updating `state` as the run advances.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::EmptyBatch`] for an empty batch,
    /// [`PdfBindError::AllFilesSkipped`] when no file could be decoded,
    /// and [`PdfBindError::Serialization`] when the accumulated document
    /// cannot be written out.
    pub async fn merge(&self, batch: &Batch, state: &mut SessionState) -> Result<MergeResult> {
        self.merge_with_progress(batch, state, |_| {}).await
    }

    /// Merge the batch, invoking `on_update` after every status or
    /// progress change.
    ///
    /// The callback lets a driver render intermediate state (a progress
    /// bar, per-file skip warnings) while the run is in flight.
    pub async fn merge_with_progress<F>(
        &self,
        batch: &Batch,
        state: &mut SessionState,
        mut on_update: F,
    ) -> Result<MergeResult>
    where
        F: FnMut(&SessionState),
    {
        if batch.is_empty() {
            let err = PdfBindError::EmptyBatch;
            state.set_error(err.to_string());
            on_update(state);
            return Err(err);
        }

        state.begin_processing();
        let result = self.run(batch, state, &mut on_update).await;
        state.end_processing();
        result
    }

    async fn run<F>(
        &self,
        batch: &Batch,
        state: &mut SessionState,
        on_update: &mut F,
    ) -> Result<MergeResult>
    where
        F: FnMut(&SessionState),
    {
        let started = Instant::now();
        let total = batch.len();
        let mut merged = codec::new_document();
        let mut merged_files = 0;
        let mut total_pages = 0;
        let mut total_size_bytes = 0;
        let mut skipped = Vec::new();

        for (index, handle) in batch.iter().enumerate() {
            state.advance_progress_to((index * 100 / total) as u8);
            state.set_info(format!(
                "Processing {} of {}: {}",
                index + 1,
                total,
                handle.name()
            ));
            on_update(state);

            match Self::merge_one(&mut merged, handle).await {
                Ok(pages) => {
                    merged_files += 1;
                    total_pages += pages;
                    total_size_bytes += handle.size_bytes();
                }
                Err(err) => {
                    state.set_error(err.to_string());
                    on_update(state);
                    skipped.push(SkippedFile {
                        name: handle.name().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if merged_files == 0 {
            let err = PdfBindError::AllFilesSkipped { offered: total };
            state.set_error(err.to_string());
            on_update(state);
            return Err(err);
        }

        let bytes = match codec::encode(&mut merged) {
            Ok(bytes) => bytes,
            Err(err) => {
                state.set_error("Failed to merge the documents");
                on_update(state);
                return Err(err);
            }
        };

        state.complete_progress();
        state.set_success("PDFs merged successfully");
        on_update(state);

        Ok(MergeResult {
            bytes,
            report: MergeReport {
                total_files: total,
                merged_files,
                total_pages,
                total_size_bytes,
                merge_time: started.elapsed(),
                skipped,
            },
        })
    }

    /// Decode one file and move its pages into the accumulated document.
    ///
    /// Returns the number of pages added. Any failure here is a per-file
    /// fault; the caller skips the file and keeps going.
    async fn merge_one(merged: &mut lopdf::Document, handle: &FileHandle) -> Result<usize> {
        let bytes = handle.read_bytes().await?;
        let document = codec::decode(handle.name(), &bytes)?;
        let pages = codec::copy_pages(merged, document);
        codec::append_pages(merged, &pages)?;
        Ok(pages.len())
    }
}
