//! Session-scoped merge state.
//!
//! Status and progress are not globals: they live in a [`SessionState`]
//! owned by the driver and passed by mutable reference to the intake and
//! merge phases. The status is a single slot replaced wholesale on every
//! transition (last-write-wins); progress only moves forward during a run
//! and returns to zero when the session settles.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay before [`SessionState::settle`] is typically invoked after a
/// merge completes, mirroring the brief window in which a final progress
/// bar stays visible.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

const INITIAL_MESSAGE: &str = "Add PDF files to begin";

/// Classification of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Neutral progress or guidance.
    Info,
    /// A completed action.
    Success,
    /// A rejection or failure.
    Error,
}

/// The single visible status message for a session.
///
/// Only one status exists at a time; every transition replaces the whole
/// value and no history is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatus {
    /// Message classification.
    pub kind: StatusKind,
    /// Human-readable message text.
    pub message: String,
}

impl MergeStatus {
    /// An informational status.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    /// A success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    /// An error status.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Merge completion percentage in `[0, 100]`.
///
/// Monotonically non-decreasing while a merge runs; reaches 100 only once
/// the per-file loop has completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergeProgress(u8);

impl MergeProgress {
    /// Current percentage.
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Whether the run has reached 100%.
    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }
}

/// State for one merge session: the current status, the progress
/// percentage, and whether a merge is in flight.
#[derive(Debug, Clone)]
pub struct SessionState {
    status: MergeStatus,
    progress: MergeProgress,
    processing: bool,
}

impl SessionState {
    /// A fresh session with the initial prompt status and zero progress.
    pub fn new() -> Self {
        Self {
            status: MergeStatus::info(INITIAL_MESSAGE),
            progress: MergeProgress::default(),
            processing: false,
        }
    }

    /// The current status message.
    pub fn status(&self) -> &MergeStatus {
        &self.status
    }

    /// The current progress percentage.
    pub fn progress(&self) -> MergeProgress {
        self.progress
    }

    /// Whether a merge run is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Replace the status with an informational message.
    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = MergeStatus::info(message);
    }

    /// Replace the status with a success message.
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.status = MergeStatus::success(message);
    }

    /// Replace the status with an error message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = MergeStatus::error(message);
    }

    /// Return the session to its initial state: prompt status, zero
    /// progress, not processing.
    pub fn reset(&mut self) {
        self.status = MergeStatus::info(INITIAL_MESSAGE);
        self.progress = MergeProgress::default();
        self.processing = false;
    }

    /// Sleep for `delay`, then return progress to zero.
    ///
    /// Cosmetic step run by drivers after a merge outcome has been
    /// handled; the merge call itself never waits on it.
    pub async fn settle(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
        self.progress = MergeProgress::default();
    }

    pub(crate) fn begin_processing(&mut self) {
        self.processing = true;
    }

    pub(crate) fn end_processing(&mut self) {
        self.processing = false;
    }

    /// Raise progress to `percent` (clamped to 100). Values at or below
    /// the current percentage are ignored so progress never moves backward
    /// during a run.
    pub(crate) fn advance_progress_to(&mut self, percent: u8) {
        let clamped = percent.min(100);
        if clamped > self.progress.0 {
            self.progress.0 = clamped;
        }
    }

    pub(crate) fn complete_progress(&mut self) {
        self.progress.0 = 100;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
