use std::path::PathBuf;

use crate::error::{PdfBindError, Result};

/// Expand a mix of literal paths and glob patterns into concrete paths.
///
/// Arguments without glob metacharacters pass through untouched, whether
/// or not they exist; intake reports missing files individually. Glob
/// patterns expand to their matches in lexicographic order, and a pattern
/// with no matches contributes nothing.
pub(crate) fn expand_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            expand_one(pattern, &mut resolved)?;
        } else {
            resolved.push(PathBuf::from(pattern));
        }
    }
    Ok(resolved)
}

fn expand_one(pattern: &str, resolved: &mut Vec<PathBuf>) -> Result<()> {
    let entries = glob::glob(pattern)
        .map_err(|err| PdfBindError::invalid_config(format!("Invalid pattern {pattern}: {err}")))?;
    for entry in entries {
        let path = entry.map_err(|err| PdfBindError::FileNotAccessible {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        })?;
        resolved.push(path);
    }
    Ok(())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
