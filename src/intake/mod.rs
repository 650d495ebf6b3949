//! File intake: candidate validation and batch management.
//!
//! Files offered to a session pass through a [`Validator`] that checks the
//! declared media type, the size ceiling, and duplicates before anything
//! is read or decoded. Accepted files accumulate in a [`Batch`] in offer
//! order; rejected files produce an error status and are dropped.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::intake::{Batch, Validator};
//! use pdfbind::session::SessionState;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut batch = Batch::new();
//! let mut state = SessionState::new();
//! let validator = Validator::new();
//!
//! let outcome = validator
//!     .offer_paths(&mut batch, &mut state, &["a.pdf".into(), "b.pdf".into()])
//!     .await;
//! println!("added {} of {}", outcome.added, outcome.offered());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{PdfBindError, Result};
use crate::session::SessionState;

/// Media type accepted by the validator.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Declared media type for a path, judged by its extension alone.
///
/// Only `.pdf` (case-insensitive) maps to `application/pdf`; everything
/// else is `application/octet-stream`. The file contents are not
/// inspected here; decode failures surface later, during the merge.
pub fn media_type_for_path(path: &Path) -> &'static str {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

#[derive(Debug, Clone)]
enum ByteSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A candidate file: its display name, declared size and media type, and
/// where its bytes come from.
///
/// Bytes are fetched lazily via [`FileHandle::read_bytes`] so validation
/// and batch bookkeeping never touch file contents.
#[derive(Debug, Clone)]
pub struct FileHandle {
    name: String,
    size_bytes: u64,
    media_type: &'static str,
    source: ByteSource,
}

impl FileHandle {
    /// Build a handle for a file on disk, reading its metadata.
    pub async fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                PdfBindError::file_not_found(&path)
            } else {
                PdfBindError::FileNotAccessible {
                    path: path.clone(),
                    source: err,
                }
            }
        })?;
        if !metadata.is_file() {
            return Err(PdfBindError::not_a_file(&path));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size_bytes: metadata.len(),
            media_type: media_type_for_path(&path),
            source: ByteSource::Path(path),
        })
    }

    /// Build a handle over in-memory bytes.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: &'static str,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            media_type,
            source: ByteSource::Memory(bytes),
        }
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Declared media type.
    pub fn media_type(&self) -> &str {
        self.media_type
    }

    /// Fetch the file's bytes.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            ByteSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|err| PdfBindError::FileNotAccessible {
                        path: path.clone(),
                        source: err,
                    })
            }
            ByteSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// The ordered collection of accepted files for one session.
///
/// Merge order is exactly the order in which files were accepted.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    entries: Vec<FileHandle>,
}

impl Batch {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch holds no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the accepted files in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &FileHandle> {
        self.entries.iter()
    }

    /// The file at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&FileHandle> {
        self.entries.get(index)
    }

    /// Drop all accepted files.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a file with this name and size is already in the batch.
    pub fn contains(&self, name: &str, size_bytes: u64) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name == name && entry.size_bytes == size_bytes)
    }

    /// Remove and return the file at `index`. Later files shift down one
    /// position; relative order is preserved.
    pub fn remove(&mut self, index: usize) -> Result<FileHandle> {
        if index >= self.entries.len() {
            return Err(PdfBindError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    fn push(&mut self, handle: FileHandle) {
        self.entries.push(handle);
    }
}

/// What happened to one round of offered files.
#[derive(Debug)]
pub struct IntakeOutcome {
    /// How many candidates were accepted into the batch.
    pub added: usize,
    /// The rejection for each refused candidate, in offer order.
    pub rejected: Vec<PdfBindError>,
}

impl IntakeOutcome {
    /// Total number of candidates considered.
    pub fn offered(&self) -> usize {
        self.added + self.rejected.len()
    }
}

/// Admission rules for offered files.
///
/// Checks run in a fixed order per candidate: media type, then size, then
/// duplicate. The first failed check decides the rejection reason; later
/// checks are not consulted.
#[derive(Debug, Clone)]
pub struct Validator {
    max_file_size: u64,
    expected_type: &'static str,
}

impl Validator {
    /// Default per-file size ceiling: 10 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// A validator with the default ceiling and PDF media type.
    pub fn new() -> Self {
        Self {
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            expected_type: PDF_MEDIA_TYPE,
        }
    }

    /// Override the per-file size ceiling.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Override the accepted media type.
    pub fn with_expected_type(mut self, expected_type: &'static str) -> Self {
        self.expected_type = expected_type;
        self
    }

    /// Offer a set of candidates to the batch.
    ///
    /// Every candidate is considered even when earlier ones are rejected.
    /// Each rejection replaces the session status with its message as it
    /// happens; if at least one candidate was accepted, a final success
    /// status reports the count. With rejections and acceptances in the
    /// same round, the success status is what remains visible.
    pub fn offer(
        &self,
        batch: &mut Batch,
        state: &mut SessionState,
        candidates: impl IntoIterator<Item = FileHandle>,
    ) -> IntakeOutcome {
        let mut added = 0;
        let mut rejected = Vec::new();
        for handle in candidates {
            match self.consider(batch, handle) {
                None => added += 1,
                Some(err) => {
                    state.set_error(err.to_string());
                    rejected.push(err);
                }
            }
        }
        if added > 0 {
            state.set_success(format!("Added {added} PDF file(s)"));
        }
        IntakeOutcome { added, rejected }
    }

    /// Offer files on disk to the batch.
    ///
    /// Paths that cannot be stat'ed are rejected with the same
    /// status-per-rejection behavior as [`Validator::offer`].
    pub async fn offer_paths(
        &self,
        batch: &mut Batch,
        state: &mut SessionState,
        paths: &[PathBuf],
    ) -> IntakeOutcome {
        let mut added = 0;
        let mut rejected = Vec::new();
        for path in paths {
            let handle = match FileHandle::from_path(path).await {
                Ok(handle) => handle,
                Err(err) => {
                    state.set_error(err.to_string());
                    rejected.push(err);
                    continue;
                }
            };
            match self.consider(batch, handle) {
                None => added += 1,
                Some(err) => {
                    state.set_error(err.to_string());
                    rejected.push(err);
                }
            }
        }
        if added > 0 {
            state.set_success(format!("Added {added} PDF file(s)"));
        }
        IntakeOutcome { added, rejected }
    }

    /// Remove the file at `index` from the batch.
    ///
    /// On success the status reports the removal. An out-of-range index
    /// returns the error and leaves both the batch and the status exactly
    /// as they were.
    pub fn remove(
        &self,
        batch: &mut Batch,
        state: &mut SessionState,
        index: usize,
    ) -> Result<FileHandle> {
        let handle = batch.remove(index)?;
        state.set_success(format!("Removed: {}", handle.name()));
        Ok(handle)
    }

    /// Admit `handle` into the batch, or explain why not.
    fn consider(&self, batch: &mut Batch, handle: FileHandle) -> Option<PdfBindError> {
        if handle.media_type != self.expected_type {
            return Some(PdfBindError::UnsupportedType {
                name: handle.name,
                declared_type: handle.media_type.to_string(),
            });
        }
        if handle.size_bytes > self.max_file_size {
            return Some(PdfBindError::FileTooLarge {
                name: handle.name,
                size_bytes: handle.size_bytes,
                limit: self.max_file_size,
            });
        }
        if batch.contains(&handle.name, handle.size_bytes) {
            return Some(PdfBindError::DuplicateFile {
                name: handle.name,
                size_bytes: handle.size_bytes,
            });
        }
        batch.push(handle);
        None
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
