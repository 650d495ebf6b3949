//! Integration tests for the full intake, merge, and delivery flow.

use std::time::Duration;

use pdfbind::cli::Cli;
use pdfbind::delivery::Deliverer;
use pdfbind::intake::{Batch, Validator};
use pdfbind::merge::{self, Merger};
use pdfbind::session::{DEFAULT_SETTLE_DELAY, SessionState, StatusKind};

use crate::common::{page_count, page_widths, write_corrupt, write_pdf};

#[tokio::test]
async fn test_full_flow_merges_in_batch_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100.0);
    let b = write_pdf(dir.path(), "b.pdf", 3, 200.0);

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    let outcome = Validator::new()
        .offer_paths(&mut batch, &mut state, &[a, b])
        .await;
    assert_eq!(outcome.added, 2, "Both inputs should be accepted");
    assert_eq!(state.status().message, "Added 2 PDF file(s)");

    let result = merge::merge_batch(&batch, &mut state).await.unwrap();
    assert_eq!(page_count(&result.bytes), 5);
    assert_eq!(
        page_widths(&result.bytes),
        vec![100.0, 101.0, 200.0, 201.0, 202.0],
        "Pages must appear in batch order, then intra-document order"
    );

    let out_dir = tempfile::tempdir().unwrap();
    let delivered = Deliverer::new()
        .deliver(&result.bytes, out_dir.path())
        .await
        .unwrap();
    assert_eq!(delivered, out_dir.path().join("merged-document.pdf"));
    assert_eq!(std::fs::read(&delivered).unwrap(), result.bytes);
}

#[tokio::test]
async fn test_corrupt_middle_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_pdf(dir.path(), "first.pdf", 1, 100.0);
    let broken = write_corrupt(dir.path(), "broken.pdf");
    let third = write_pdf(dir.path(), "third.pdf", 2, 300.0);

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    Validator::new()
        .offer_paths(&mut batch, &mut state, &[first, broken, third])
        .await;
    assert_eq!(batch.len(), 3, "Corruption is not detected at intake");

    let mut error_messages = Vec::new();
    let result = Merger::new()
        .merge_with_progress(&batch, &mut state, |s| {
            if s.status().kind == StatusKind::Error {
                error_messages.push(s.status().message.clone());
            }
        })
        .await
        .unwrap();

    assert_eq!(
        page_widths(&result.bytes),
        vec![100.0, 300.0, 301.0],
        "Only the decodable files contribute pages"
    );
    assert_eq!(result.report.skipped_files(), ["broken.pdf"]);
    assert!(
        error_messages.iter().any(|m| m.contains("broken.pdf")),
        "The skip must be reported while the run continues: {error_messages:?}"
    );
    assert_eq!(state.status().kind, StatusKind::Success);
    assert!(state.progress().is_complete());
}

#[tokio::test]
async fn test_progress_follows_the_file_loop() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = (0..4)
        .map(|i| write_pdf(dir.path(), &format!("doc{i}.pdf"), 1, 100.0 + i as f32 * 10.0))
        .collect();

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    Validator::new()
        .offer_paths(&mut batch, &mut state, &paths)
        .await;

    let mut percents = Vec::new();
    Merger::new()
        .merge_with_progress(&batch, &mut state, |s| percents.push(s.progress().percent()))
        .await
        .unwrap();

    assert_eq!(percents, vec![0, 25, 50, 75, 100]);
}

#[tokio::test]
async fn test_single_file_batch_merges() {
    let dir = tempfile::tempdir().unwrap();
    let only = write_pdf(dir.path(), "only.pdf", 4, 100.0);

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    Validator::new()
        .offer_paths(&mut batch, &mut state, &[only])
        .await;

    let result = merge::merge_batch(&batch, &mut state).await.unwrap();
    assert_eq!(page_count(&result.bytes), 4);
    assert_eq!(result.report.total_files, 1);
    assert_eq!(result.report.merged_files, 1);
}

#[tokio::test]
async fn test_removed_file_contributes_no_pages() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_pdf(dir.path(), "keep-a.pdf", 1, 100.0),
        write_pdf(dir.path(), "drop.pdf", 1, 200.0),
        write_pdf(dir.path(), "keep-b.pdf", 1, 300.0),
    ];

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    let validator = Validator::new();
    validator.offer_paths(&mut batch, &mut state, &paths).await;

    validator.remove(&mut batch, &mut state, 1).unwrap();
    assert_eq!(state.status().message, "Removed: drop.pdf");

    let result = merge::merge_batch(&batch, &mut state).await.unwrap();
    assert_eq!(page_widths(&result.bytes), vec![100.0, 300.0]);
}

#[tokio::test]
async fn test_run_drives_the_whole_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100.0);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200.0);
    let out_dir = tempfile::tempdir().unwrap();

    let cli = Cli {
        inputs: vec![
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ],
        output_dir: out_dir.path().to_path_buf(),
        file_name: "combined.pdf".to_string(),
        max_file_size: "10M".to_string(),
        json: false,
        quiet: true,
        verbose: false,
    };

    pdfbind::run(cli).await.unwrap();

    let delivered = out_dir.path().join("combined.pdf");
    assert!(delivered.exists(), "Output file was not created");
    let bytes = std::fs::read(&delivered).unwrap();
    assert_eq!(page_count(&bytes), 3);
}

#[tokio::test]
async fn test_run_expands_glob_inputs() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "part-1.pdf", 1, 100.0);
    write_pdf(dir.path(), "part-2.pdf", 1, 200.0);
    let out_dir = tempfile::tempdir().unwrap();

    let cli = Cli {
        inputs: vec![dir.path().join("part-*.pdf").to_string_lossy().into_owned()],
        output_dir: out_dir.path().to_path_buf(),
        file_name: "merged-document.pdf".to_string(),
        max_file_size: "10M".to_string(),
        json: false,
        quiet: true,
        verbose: false,
    };

    pdfbind::run(cli).await.unwrap();

    let bytes = std::fs::read(out_dir.path().join("merged-document.pdf")).unwrap();
    assert_eq!(
        page_widths(&bytes),
        vec![100.0, 200.0],
        "Glob matches merge in lexicographic order"
    );
}

#[tokio::test]
async fn test_run_in_json_mode_still_delivers() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100.0);
    let out_dir = tempfile::tempdir().unwrap();

    let cli = Cli {
        inputs: vec![a.to_string_lossy().into_owned()],
        output_dir: out_dir.path().to_path_buf(),
        file_name: "merged-document.pdf".to_string(),
        max_file_size: "10M".to_string(),
        json: true,
        quiet: false,
        verbose: false,
    };

    pdfbind::run(cli).await.unwrap();
    assert!(out_dir.path().join("merged-document.pdf").exists());
}

#[tokio::test]
async fn test_settle_returns_progress_to_zero() {
    assert_eq!(DEFAULT_SETTLE_DELAY, Duration::from_millis(2000));

    let dir = tempfile::tempdir().unwrap();
    let only = write_pdf(dir.path(), "only.pdf", 1, 100.0);

    let mut batch = Batch::new();
    let mut state = SessionState::new();
    Validator::new()
        .offer_paths(&mut batch, &mut state, &[only])
        .await;
    merge::merge_batch(&batch, &mut state).await.unwrap();
    assert!(state.progress().is_complete());

    state.settle(Duration::ZERO).await;
    assert_eq!(state.progress().percent(), 0);
    assert_eq!(
        state.status().kind,
        StatusKind::Success,
        "Settling resets progress but keeps the final status"
    );
}
