mod common;

use blobmon::core::target::resolve_target;
use blobmon::core::transfer::{delete_blobs, download_blobs, upload_files};
use blobmon::utils::error::TransferOp;
use blobmon::BlobMonError;
use common::{account, MemoryProvider};
use std::fs;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

fn entries(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_upload_uses_target_prefix_and_sanitizes() {
    let provider = Arc::new(MemoryProvider::new("acct").with_container("mydata", &["sub/old.txt"]));
    let acct = account(1, Arc::clone(&provider), &["mydata"]);

    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("report.csv");
    let odd = dir.path().join("q1 (draft).csv");
    fs::write(&plain, b"a,b").unwrap();
    fs::write(&odd, b"c,d").unwrap();

    let target = resolve_target("mydata/sub/old.txt").unwrap();
    let report = upload_files(&acct, &target, &[plain, odd]).await;

    assert!(report.is_success());
    assert_eq!(report.succeeded, vec!["mydata/sub/report.csv", "mydata/sub/q1 _draft_.csv"]);
    assert_eq!(provider.blob("mydata", "sub/report.csv"), Some(b"a,b".to_vec()));
    assert_eq!(provider.blob("mydata", "sub/q1 _draft_.csv"), Some(b"c,d".to_vec()));
}

#[tokio::test]
async fn test_upload_to_separator_target_lands_at_root() {
    let provider = Arc::new(MemoryProvider::new("acct").with_container("mydata", &[]));
    let acct = account(1, Arc::clone(&provider), &["mydata"]);

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("top.txt");
    fs::write(&file, b"top").unwrap();

    let target = resolve_target("===== container: mydata =====").unwrap();
    let report = upload_files(&acct, &target, &[file]).await;

    assert!(report.is_success());
    assert_eq!(provider.blob_names("mydata"), vec!["top.txt"]);
}

#[tokio::test]
async fn test_invalid_name_is_rejected_before_upload_and_others_continue() {
    let provider = Arc::new(MemoryProvider::new("acct").with_container("mydata", &[]));
    let acct = account(1, Arc::clone(&provider), &["mydata"]);

    let dir = TempDir::new().unwrap();
    let hidden = dir.path().join(".env");
    let good = dir.path().join("ok.txt");
    fs::write(&hidden, b"secret").unwrap();
    fs::write(&good, b"fine").unwrap();

    let target = resolve_target("mydata").unwrap();
    let report = upload_files(&acct, &target, &[hidden, good]).await;

    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].1, BlobMonError::InvalidName { .. }));
    assert_eq!(report.succeeded, vec!["mydata/ok.txt"]);
    // Only the valid file reached the provider
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upload_reports_missing_local_file() {
    let provider = Arc::new(MemoryProvider::new("acct").with_container("mydata", &[]));
    let acct = account(1, Arc::clone(&provider), &["mydata"]);
    let dir = TempDir::new().unwrap();

    let target = resolve_target("mydata").unwrap();
    let report = upload_files(&acct, &target, &[dir.path().join("missing.bin")]).await;

    assert_eq!(report.failed.len(), 1);
    assert!(matches!(
        report.failed[0].1,
        BlobMonError::Transfer {
            operation: TransferOp::Upload,
            ..
        }
    ));
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_download_continues_past_failures() {
    let provider = Arc::new(
        MemoryProvider::new("acct")
            .with_container("mydata", &["a/one.txt", "two.txt", "three.txt"])
            .fail_op("mydata/two.txt", "403 Forbidden"),
    );
    let acct = account(1, Arc::clone(&provider), &["mydata"]);
    let dest = TempDir::new().unwrap();

    let selected = entries(&[
        "===== container: mydata =====",
        "mydata/a/one.txt",
        "mydata/two.txt",
        "mydata/three.txt",
        "[error] failed to access container: other, message: boom",
    ]);
    let report = download_blobs(&acct, &selected, dest.path()).await;

    assert_eq!(report.succeeded, vec!["mydata/a/one.txt", "mydata/three.txt"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "mydata/two.txt");
    assert!(report.failed[0].1.to_string().contains("403 Forbidden"));
    assert_eq!(report.skipped.len(), 2);

    assert_eq!(fs::read(dest.path().join("one.txt")).unwrap(), b"a/one.txt");
    assert_eq!(fs::read(dest.path().join("three.txt")).unwrap(), b"three.txt");
    assert!(!dest.path().join("two.txt").exists());
}

#[tokio::test]
async fn test_download_does_not_overwrite_same_file_name() {
    let provider = Arc::new(MemoryProvider::new("acct").with_container("c", &["a/x.txt", "b/x.txt", "y.txt"]));
    let acct = account(1, Arc::clone(&provider), &["c"]);
    let dest = TempDir::new().unwrap();

    let report = download_blobs(&acct, &entries(&["c/a/x.txt", "c/b/x.txt", "c/y.txt"]), dest.path()).await;

    assert_eq!(report.succeeded, vec!["c/a/x.txt", "c/y.txt"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "c/b/x.txt");
    assert!(report.failed[0].1.to_string().contains("c/a/x.txt"));
    assert_eq!(fs::read(dest.path().join("x.txt")).unwrap(), b"a/x.txt");
}

#[tokio::test]
async fn test_delete_continues_past_failures() {
    let provider = Arc::new(
        MemoryProvider::new("acct")
            .with_container("mydata", &["keep.txt", "x.txt", "y.txt"])
            .fail_op("mydata/x.txt", "lease present"),
    );
    let acct = account(1, Arc::clone(&provider), &["mydata"]);

    let report = delete_blobs(
        &acct,
        &entries(&["mydata/x.txt", "mydata/y.txt", "mydata/gone.txt", "mydata: no blobs"]),
    )
    .await;

    assert_eq!(report.succeeded, vec!["mydata/y.txt"]);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.skipped, vec!["mydata: no blobs"]);
    assert_eq!(provider.blob_names("mydata"), vec!["keep.txt", "x.txt"]);
}
