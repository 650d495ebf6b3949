//! Error types for pdfbind.
//!
//! All fallible operations in the crate return [`Result`], which wraps
//! [`PdfBindError`]. Intake rejections and per-file merge faults are
//! *recoverable*: they are collected and surfaced through the session
//! status rather than aborting the run. Serialization and delivery
//! failures are fatal to the merge attempt.

use std::io;
use std::path::PathBuf;

/// Convenient result alias used throughout pdfbind.
pub type Result<T> = std::result::Result<T, PdfBindError>;

/// All errors that can occur while validating, merging, or delivering
/// a batch of PDF files.
#[derive(Debug, thiserror::Error)]
pub enum PdfBindError {
    /// The offered file's declared media type is not `application/pdf`.
    #[error("{name} is not a PDF file ({declared_type})")]
    UnsupportedType {
        /// Display name of the rejected file.
        name: String,
        /// The media type the file declared.
        declared_type: String,
    },

    /// The offered file exceeds the per-file size ceiling.
    #[error("{name} is too large ({}, max {})", human_size(.size_bytes), human_size(.limit))]
    FileTooLarge {
        /// Display name of the rejected file.
        name: String,
        /// Size of the offered file in bytes.
        size_bytes: u64,
        /// The configured ceiling in bytes.
        limit: u64,
    },

    /// A file with the same name and size is already in the batch.
    #[error("{name} is already added")]
    DuplicateFile {
        /// Display name of the rejected file.
        name: String,
        /// Size of the offered file in bytes.
        size_bytes: u64,
    },

    /// The offered path does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The offered path exists but is not a regular file.
    #[error("not a file: {}", .path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// The offered path could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    FileNotAccessible {
        /// The unreadable path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A file's bytes could not be decoded as a PDF document.
    #[error("could not decode {name}: {details}")]
    DecodeFailure {
        /// Display name of the file that failed to decode.
        name: String,
        /// What the codec reported.
        details: String,
    },

    /// A file decoded as an encrypted PDF, which cannot be merged.
    #[error("{name} is encrypted and cannot be merged")]
    EncryptedDocument {
        /// Display name of the encrypted file.
        name: String,
    },

    /// A merge was requested on an empty batch.
    #[error("no PDF files to merge")]
    EmptyBatch,

    /// Every file in the batch failed to decode, so nothing was merged.
    #[error("none of the {offered} file(s) could be merged")]
    AllFilesSkipped {
        /// How many files the batch held.
        offered: usize,
    },

    /// The accumulated document could not be serialized to bytes.
    #[error("failed to assemble the merged document: {details}")]
    Serialization {
        /// What the codec reported.
        details: String,
    },

    /// The accumulated document's page tree could not be updated.
    #[error("merge failed: {reason}")]
    MergeFailed {
        /// Description of the structural fault.
        reason: String,
    },

    /// A removal was requested for an index outside the batch.
    #[error("no file at index {index} (batch holds {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The batch length at the time of the request.
        len: usize,
    },

    /// The output file could not be created.
    #[error("failed to create output file {}: {source}", .path.display())]
    FailedToCreateOutput {
        /// The delivery path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write output file {}: {source}", .path.display())]
    FailedToWrite {
        /// The delivery path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The supplied configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        message: String,
    },

    /// An I/O error outside the more specific classes above.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Any other error.
    #[error("{message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

impl PdfBindError {
    /// Create a [`PdfBindError::FileNotFound`] error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a [`PdfBindError::NotAFile`] error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a [`PdfBindError::DecodeFailure`] error.
    pub fn decode_failure(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::DecodeFailure {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create a [`PdfBindError::Serialization`] error.
    pub fn serialization(details: impl Into<String>) -> Self {
        Self::Serialization {
            details: details.into(),
        }
    }

    /// Create a [`PdfBindError::MergeFailed`] error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a [`PdfBindError::InvalidConfig`] error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a [`PdfBindError::Other`] error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether this error affects a single file and lets the run continue.
    ///
    /// Intake rejections and per-file decode faults are recoverable: the
    /// offending file is reported and skipped while the rest of the batch
    /// proceeds.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. }
                | Self::FileTooLarge { .. }
                | Self::DuplicateFile { .. }
                | Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FileNotAccessible { .. }
                | Self::DecodeFailure { .. }
                | Self::EncryptedDocument { .. }
        )
    }

    /// Whether this error terminates the merge attempt outright.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch
                | Self::AllFilesSkipped { .. }
                | Self::Serialization { .. }
                | Self::MergeFailed { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
        )
    }

    /// Process exit code for this error.
    ///
    /// 1 = generic/config, 2 = input rejected, 3 = decode failure,
    /// 5 = output write failure, 6 = merge/serialization failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedType { .. }
            | Self::FileTooLarge { .. }
            | Self::DuplicateFile { .. }
            | Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FileNotAccessible { .. } => 2,
            Self::DecodeFailure { .. }
            | Self::EncryptedDocument { .. }
            | Self::AllFilesSkipped { .. } => 3,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } | Self::Io { .. } => 5,
            Self::Serialization { .. } | Self::MergeFailed { .. } => 6,
            Self::EmptyBatch
            | Self::IndexOutOfRange { .. }
            | Self::InvalidConfig { .. }
            | Self::Other { .. } => 1,
        }
    }
}

impl From<anyhow::Error> for PdfBindError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            message: err.to_string(),
        }
    }
}

fn human_size(bytes: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let bytes = *bytes;
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
