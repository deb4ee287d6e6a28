use super::started_handle;
use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::{STATUS_HEADER, write_status};
use assert_fs::TempDir;
use cmbridge::artifacts::status::change_kind::ChangeKind;
use cmbridge::artifacts::status::classifier::ColorKey;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
#[tokio::test]
async fn status_query_reports_pending_changes(engine: FakeEngine, sandbox: TempDir) {
    let root = sandbox.path();
    write_status(
        root,
        &[
            STATUS_HEADER,
            "CH#src/main.rs",
            "AD#docs/new.md",
            "MV,CH#lib/moved.rs#lib/original.rs",
            "not a status line",
            "PR+DE#scratch.txt",
            "CH#issues/#42.md",
        ],
    );
    let handle = started_handle(&engine, root).await;

    let records = handle.run_status_query().await.expect("status failed");

    let summary = records
        .iter()
        .map(|record| {
            (
                record
                    .path()
                    .strip_prefix(root)
                    .expect("path outside workspace")
                    .to_path_buf(),
                record.kind(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (PathBuf::from("src/main.rs"), ChangeKind::CHANGED),
            (PathBuf::from("docs/new.md"), ChangeKind::ADDED),
            (PathBuf::from("lib/moved.rs"), ChangeKind::MOVED | ChangeKind::CHANGED),
            (PathBuf::from("scratch.txt"), ChangeKind::PRIVATE | ChangeKind::DELETED),
            (PathBuf::from("issues/#42.md"), ChangeKind::CHANGED),
        ]
    );
    assert_eq!(records[2].old_path(), Some(root.join("lib/original.rs").as_path()));

    handle.dispose().await;
}

#[rstest]
#[tokio::test]
async fn status_entries_are_classified(engine: FakeEngine, sandbox: TempDir) {
    let root = sandbox.path();
    write_status(root, &[STATUS_HEADER, "PR+DE#scratch.txt", "CO,DE#gone.rs"]);
    let handle = started_handle(&engine, root).await;

    let entries = handle.status_entries().await.expect("status failed");

    let presented = entries
        .iter()
        .map(|entry| {
            (
                entry.status.letters.as_str(),
                entry.status.tooltip.as_str(),
                entry.status.color,
                entry.status.strike_through,
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        presented,
        vec![
            ("PD", "Private", ColorKey::Untracked, true),
            ("CD", "Checked Out", ColorKey::Modified, true),
        ]
    );

    handle.dispose().await;
}

#[rstest]
#[tokio::test]
async fn clean_workspace_reports_nothing(engine: FakeEngine, sandbox: TempDir) {
    let handle = started_handle(&engine, sandbox.path()).await;

    let records = handle.run_status_query().await.expect("status failed");

    assert!(records.is_empty());
    assert!(handle.is_usable());

    handle.dispose().await;
}
