use dupesync::report::{MemoryReporter, SilentReporter};
use dupesync::sync::{Reconciler, SyncError, SyncKind};
use filetime::FileTime;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_with_mtime(path: &Path, contents: &[u8], unix_secs: i64) {
    fs::write(path, contents).unwrap();
    filetime::set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
}

fn mtime(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).unwrap())
}

#[test]
fn test_missing_file_is_added_to_destination_root() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    fs::create_dir(source.path().join("nested")).unwrap();
    write_with_mtime(&source.path().join("nested/report.txt"), b"new file", 1_600_000_000);

    let summary = Reconciler::new()
        .reconcile(dest.path(), source.path(), &SilentReporter)
        .unwrap();

    let target = dest.path().join("report.txt");
    assert_eq!(summary.transferred, 1);
    assert_eq!(summary.added, 1);
    assert_eq!(fs::read(&target).unwrap(), b"new file");
    assert_eq!(mtime(&target), FileTime::from_unix_time(1_600_000_000, 0));
    assert!(!dest.path().join("nested").exists());
}

#[test]
fn test_newer_source_overwrites_in_place() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    fs::create_dir(dest.path().join("deep")).unwrap();
    let existing = dest.path().join("deep/notes.txt");
    write_with_mtime(&existing, b"old", 1_000_000_000);
    write_with_mtime(&source.path().join("notes.txt"), b"newer", 1_700_000_000);

    let reporter = MemoryReporter::new();
    let summary = Reconciler::new()
        .reconcile(dest.path(), source.path(), &reporter)
        .unwrap();

    assert_eq!(summary.overwritten, 1);
    assert_eq!(summary.applied[0].kind, SyncKind::Overwrite);
    assert_eq!(summary.applied[0].target, existing);
    assert_eq!(fs::read(&existing).unwrap(), b"newer");
    assert!(!dest.path().join("notes.txt").exists());
    // Per-file outcomes go to the summary only, never a second time as info
    assert_eq!(reporter.infos().len(), 1);
    assert!(reporter.infos()[0].starts_with("Reconciling "));
}

#[test]
fn test_older_or_equal_source_is_left_alone() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    write_with_mtime(&dest.path().join("same.txt"), b"dest same", 1_500_000_000);
    write_with_mtime(&source.path().join("same.txt"), b"source same", 1_500_000_000);
    write_with_mtime(&dest.path().join("older.txt"), b"dest newer", 1_600_000_000);
    write_with_mtime(&source.path().join("older.txt"), b"source older", 1_400_000_000);

    let summary = Reconciler::new()
        .reconcile(dest.path(), source.path(), &SilentReporter)
        .unwrap();

    assert_eq!(summary.transferred, 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(fs::read(dest.path().join("same.txt")).unwrap(), b"dest same");
    assert_eq!(fs::read(dest.path().join("older.txt")).unwrap(), b"dest newer");
}

#[test]
fn test_source_tree_is_never_modified() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    let src_file = source.path().join("keep.txt");
    write_with_mtime(&src_file, b"source", 1_234_567_890);
    write_with_mtime(&dest.path().join("dest_only.txt"), b"dest", 1_900_000_000);

    Reconciler::new()
        .reconcile(dest.path(), source.path(), &SilentReporter)
        .unwrap();

    assert_eq!(fs::read(&src_file).unwrap(), b"source");
    assert_eq!(mtime(&src_file), FileTime::from_unix_time(1_234_567_890, 0));
    assert!(!source.path().join("dest_only.txt").exists());
}

#[test]
fn test_second_run_transfers_nothing() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    write_with_mtime(&source.path().join("a.txt"), b"a", 1_600_000_000);
    write_with_mtime(&source.path().join("b.txt"), b"b", 1_600_000_000);

    let reconciler = Reconciler::new();
    let first = reconciler.reconcile(dest.path(), source.path(), &SilentReporter).unwrap();
    let second = reconciler.reconcile(dest.path(), source.path(), &SilentReporter).unwrap();

    assert_eq!(first.transferred, 2);
    assert_eq!(second.transferred, 0);
    assert_eq!(second.skipped, 2);
}

#[test]
fn test_same_name_in_two_source_folders_newer_wins() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    fs::create_dir(source.path().join("a")).unwrap();
    fs::create_dir(source.path().join("b")).unwrap();
    write_with_mtime(&source.path().join("a/dup.txt"), b"older", 1_500_000_000);
    write_with_mtime(&source.path().join("b/dup.txt"), b"newer", 1_600_000_000);

    let summary = Reconciler::new()
        .reconcile(dest.path(), source.path(), &SilentReporter)
        .unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(summary.overwritten, 1);
    assert_eq!(fs::read(dest.path().join("dup.txt")).unwrap(), b"newer");
}

#[test]
fn test_dry_run_writes_nothing() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    write_with_mtime(&source.path().join("planned.txt"), b"x", 1_600_000_000);

    let reporter = MemoryReporter::new();
    let summary = Reconciler::new()
        .with_dry_run(true)
        .reconcile(dest.path(), source.path(), &reporter)
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.transferred, 1);
    assert!(!dest.path().join("planned.txt").exists());
    assert_eq!(summary.applied[0].kind, SyncKind::Add);
    assert_eq!(summary.applied[0].target, dest.path().join("planned.txt"));
    assert_eq!(reporter.infos().len(), 1);
}

#[test]
fn test_missing_roots_are_fatal() {
    let existing = TempDir::new().unwrap();
    let missing = existing.path().join("missing");

    let reconciler = Reconciler::new();
    assert!(matches!(
        reconciler.reconcile(&missing, existing.path(), &SilentReporter),
        Err(SyncError::Destination(_))
    ));
    assert!(matches!(
        reconciler.reconcile(existing.path(), &missing, &SilentReporter),
        Err(SyncError::Source(_))
    ));
}
