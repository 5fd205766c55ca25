use crate::core::{BlobRef, UploadTarget};
use crate::domain::model::{EMPTY_SUFFIX, ERROR_MARKER, SEPARATOR_MARKER};
use crate::utils::error::{BlobMonError, Result};

fn invalid(entry: &str, reason: &str) -> BlobMonError {
    BlobMonError::InvalidTarget {
        entry: entry.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolves a selected listing entry into an upload destination.
///
/// - `===== container: mydata =====` → container `mydata`, no prefix
/// - `mydata` → container `mydata`, no prefix
/// - `mydata/sub/file.txt` → container `mydata`, prefix `sub`
pub fn resolve_target(entry: &str) -> Result<UploadTarget> {
    let text = entry.trim();

    if text.is_empty() {
        return Err(invalid(entry, "nothing selected"));
    }
    if text.starts_with(ERROR_MARKER) {
        return Err(invalid(entry, "error rows cannot be used as a target"));
    }

    if let Some(rest) = text.strip_prefix(SEPARATOR_MARKER) {
        let (_, name) = rest
            .split_once(':')
            .ok_or_else(|| invalid(entry, "separator has no container name"))?;
        let container = name.trim().trim_end_matches(SEPARATOR_MARKER).trim();
        if container.is_empty() {
            return Err(invalid(entry, "separator has no container name"));
        }
        return Ok(UploadTarget {
            container: container.to_string(),
            prefix: String::new(),
        });
    }

    if !text.contains('/') {
        let container = text.strip_suffix(EMPTY_SUFFIX).unwrap_or(text).trim();
        return Ok(UploadTarget {
            container: container.to_string(),
            prefix: String::new(),
        });
    }

    let (container, blob_path) = text
        .split_once('/')
        .ok_or_else(|| invalid(entry, "expected container/path"))?;
    if container.is_empty() {
        return Err(invalid(entry, "container part is empty"));
    }

    let prefix = blob_path
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("");

    Ok(UploadTarget {
        container: container.to_string(),
        prefix: prefix.to_string(),
    })
}

impl BlobRef {
    /// Picks out entries that name an actual blob. Separators, placeholders
    /// and error rows yield `None`.
    pub fn parse(entry: &str) -> Option<BlobRef> {
        let text = entry.trim();
        if text.starts_with(SEPARATOR_MARKER) || text.starts_with(ERROR_MARKER) {
            return None;
        }

        let (container, path) = text.split_once('/')?;
        if container.is_empty() || path.is_empty() {
            return None;
        }

        Some(BlobRef {
            container: container.to_string(),
            path: path.to_string(),
        })
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
