use crate::core::{Account, BlobRef, UploadTarget};
use crate::utils::error::{BlobMonError, TransferOp};
use crate::utils::validation::{sanitize_blob_name, validate_blob_name};
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Outcome of a bulk operation. Every item is attempted; failures are
/// collected here instead of stopping the run.
#[derive(Debug)]
pub struct TransferReport {
    pub operation: TransferOp,
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, BlobMonError)>,
    pub skipped: Vec<String>,
}

impl TransferReport {
    fn new(operation: TransferOp) -> Self {
        Self {
            operation,
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, item: String, result: Result<(), BlobMonError>) {
        match result {
            Ok(()) => {
                tracing::info!("✅ {} succeeded: {}", self.operation, item);
                self.succeeded.push(item);
            }
            Err(e) => {
                tracing::error!("❌ {}", e);
                self.failed.push((item, e));
            }
        }
    }
}

fn transfer_error(operation: TransferOp, item: &str, err: impl std::fmt::Display) -> BlobMonError {
    let message = err.to_string();
    BlobMonError::Transfer {
        operation,
        item: item.to_string(),
        message,
    }
}

/// Uploads local files under `target`, overwriting existing blobs.
///
/// Blob names are `prefix/file_name`, sanitized and validated before any
/// network call.
pub async fn upload_files(account: &Account, target: &UploadTarget, files: &[PathBuf]) -> TransferReport {
    let mut report = TransferReport::new(TransferOp::Upload);
    tracing::debug!(account = %account.name, container = %target.container, "Uploading {} file(s)", files.len());

    for file in files {
        let Some(file_name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            let item = file.display().to_string();
            let err = transfer_error(TransferOp::Upload, &item, "path has no file name");
            report.record(item, Err(err));
            continue;
        };

        let blob_name = sanitize_blob_name(&target.blob_name_for(&file_name));
        let item = format!("{}/{}", target.container, blob_name);

        if let Err(e) = validate_blob_name(&blob_name) {
            tracing::warn!("Upload rejected for invalid blob name: {}", blob_name);
            report.record(item, Err(e));
            continue;
        }

        let result = upload_one(account, &target.container, &blob_name, file).await;
        report.record(item, result);
    }

    report
}

async fn upload_one(account: &Account, container: &str, blob_name: &str, file: &Path) -> Result<(), BlobMonError> {
    let item = format!("{}/{}", container, blob_name);
    let data = tokio::fs::read(file)
        .await
        .map_err(|e| transfer_error(TransferOp::Upload, &item, e))?;

    account
        .client
        .upload_blob(container, blob_name, Bytes::from(data), true)
        .await
        .map_err(|e| transfer_error(TransferOp::Upload, &item, e.into_message()))
}

/// Downloads selected blobs into `dest_dir`, one file per blob named after
/// the last path segment.
///
/// A blob whose file name was already written by this run is recorded as a
/// failure rather than overwriting the earlier file.
pub async fn download_blobs(account: &Account, entries: &[String], dest_dir: &Path) -> TransferReport {
    let mut report = TransferReport::new(TransferOp::Download);
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();

    for entry in entries {
        let Some(blob) = BlobRef::parse(entry) else {
            tracing::debug!("Skipping non-blob entry: {}", entry);
            report.skipped.push(entry.clone());
            continue;
        };

        let item = blob.to_string();
        let save_path = dest_dir.join(blob.file_name());
        if let Some(first) = claimed.get(&save_path) {
            tracing::warn!("{} would overwrite {} at {}", item, first, save_path.display());
            let reason = format!("{} already saved from {}", save_path.display(), first);
            report.record(item.clone(), Err(transfer_error(TransferOp::Download, &item, reason)));
            continue;
        }

        let result = download_one(account, &blob, &save_path).await;
        if result.is_ok() {
            tracing::debug!("{} -> {}", blob, save_path.display());
            claimed.insert(save_path, item.clone());
        }
        report.record(item, result);
    }

    report
}

async fn download_one(account: &Account, blob: &BlobRef, save_path: &Path) -> Result<(), BlobMonError> {
    let item = blob.to_string();
    let data = account
        .client
        .download_blob(&blob.container, &blob.path)
        .await
        .map_err(|e| transfer_error(TransferOp::Download, &item, e.into_message()))?;

    tokio::fs::write(save_path, data)
        .await
        .map_err(|e| transfer_error(TransferOp::Download, &item, e))
}

/// Deletes selected blobs.
pub async fn delete_blobs(account: &Account, entries: &[String]) -> TransferReport {
    let mut report = TransferReport::new(TransferOp::Delete);

    for entry in entries {
        let Some(blob) = BlobRef::parse(entry) else {
            tracing::debug!("Skipping non-blob entry: {}", entry);
            report.skipped.push(entry.clone());
            continue;
        };

        let item = blob.to_string();
        let result = account
            .client
            .delete_blob(&blob.container, &blob.path)
            .await
            .map_err(|e| transfer_error(TransferOp::Delete, &item, e.into_message()));
        report.record(item, result);
    }

    report
}
