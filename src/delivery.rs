//! Output delivery.
//!
//! Hands a merged byte buffer over to the filesystem. The write goes
//! through a sibling temporary file followed by a rename, so the final
//! path either holds the complete document or does not exist; the
//! temporary file is removed on every failure path.

use std::path::{Path, PathBuf};

use crate::error::{PdfBindError, Result};

/// Default name for the delivered document.
pub const DEFAULT_FILE_NAME: &str = "merged-document.pdf";

/// Removes the temporary file unless the delivery released it.
struct TempGuard {
    path: PathBuf,
    released: bool,
}

impl TempGuard {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Writes a merged document into a target directory.
#[derive(Debug, Clone)]
pub struct Deliverer {
    file_name: String,
}

impl Deliverer {
    /// A deliverer using [`DEFAULT_FILE_NAME`].
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Override the delivered file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// The file name this deliverer writes.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Write `bytes` into `dir`, creating the directory if needed, and
    /// return the path of the delivered file.
    ///
    /// An existing file under the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::FailedToCreateOutput`] when the directory
    /// or the temporary file cannot be created, and
    /// [`PdfBindError::FailedToWrite`] when the final rename fails.
    pub async fn deliver(&self, bytes: &[u8], dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| PdfBindError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source: err,
            })?;

        let final_path = dir.join(&self.file_name);
        let tmp_path = dir.join(format!("{}.tmp", self.file_name));
        let mut guard = TempGuard::new(tmp_path.clone());

        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|err| PdfBindError::FailedToCreateOutput {
                path: final_path.clone(),
                source: err,
            })?;
        tokio::fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|err| PdfBindError::FailedToWrite {
                path: final_path.clone(),
                source: err,
            })?;

        guard.release();
        Ok(final_path)
    }
}

impl Default for Deliverer {
    fn default() -> Self {
        Self::new()
    }
}
