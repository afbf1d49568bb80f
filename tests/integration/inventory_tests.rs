use dupesync::report::{MemoryReporter, SilentReporter};
use dupesync::scanner::{
    collect_files, FileRecord, Inventory, ScanError, SignatureEngine, SignatureError,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_inventory_walks_nested_tree_in_name_order() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("b_dir/inner")).unwrap();
    fs::write(dir.path().join("c.txt"), b"c").unwrap();
    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    fs::write(dir.path().join("b_dir/inner/deep.txt"), b"deep").unwrap();
    fs::write(dir.path().join("b_dir/shallow.txt"), b"shallow").unwrap();

    let inventory = Inventory::build(dir.path(), &SignatureEngine::new(), &SilentReporter).unwrap();

    let names: Vec<_> = inventory.iter().map(FileRecord::name).collect();
    assert_eq!(names, vec!["a.txt", "deep.txt", "shallow.txt", "c.txt"]);
    assert_eq!(inventory.total_size(), 1 + 4 + 7 + 1);
}

#[test]
fn test_record_matches_direct_signature() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hello.txt");
    fs::write(&path, b"hello world").unwrap();
    let engine = SignatureEngine::new();

    let inventory = Inventory::build(dir.path(), &engine, &SilentReporter).unwrap();
    let direct = FileRecord::from_path(&path, &engine).unwrap();

    assert_eq!(inventory.records()[0].signature(), direct.signature());
    assert_eq!(direct.prefix(), "68656c6c6f");
    assert_eq!(direct.size(), 11);
    assert_eq!(
        direct.content_hash_hex(),
        blake3::hash(b"hello world").to_hex().to_string()
    );
}

#[test]
fn test_empty_file_is_inventoried() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty"), b"").unwrap();

    let inventory = Inventory::build(dir.path(), &SignatureEngine::new(), &SilentReporter).unwrap();

    assert_eq!(inventory.len(), 1);
    let record = &inventory.records()[0];
    assert_eq!(record.size(), 0);
    assert_eq!(record.prefix(), "");
}

#[test]
fn test_parallel_engine_matches_sequential() {
    let dir = TempDir::new().unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("f{i:02}.bin")), vec![i as u8; i * 100]).unwrap();
    }

    let sequential = Inventory::build(dir.path(), &SignatureEngine::new(), &SilentReporter).unwrap();
    let parallel = Inventory::build(
        dir.path(),
        &SignatureEngine::new().with_threads(4).with_chunk_size(64),
        &SilentReporter,
    )
    .unwrap();

    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(a.path(), b.path());
        assert_eq!(a.signature(), b.signature());
    }
}

#[test]
fn test_root_must_be_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"x").unwrap();

    let result = Inventory::build(&file, &SignatureEngine::new(), &SilentReporter);

    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_with_diagnostic() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_ok.txt"), b"fine").unwrap();
    fs::write(dir.path().join("z_ok.txt"), b"also fine").unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to root.
    if fs::File::open(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let reporter = MemoryReporter::new();
    let inventory = Inventory::build(dir.path(), &SignatureEngine::new(), &reporter).unwrap();

    assert_eq!(inventory.len(), 2);
    let names: Vec<_> = inventory.iter().map(FileRecord::name).collect();
    assert_eq!(names, vec!["a_ok.txt", "z_ok.txt"]);
    assert_eq!(inventory.errors().len(), 1);
    assert!(matches!(
        inventory.errors()[0],
        ScanError::Signature(SignatureError::PermissionDenied(_))
    ));
    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("locked.txt"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_file_vanishing_before_signing_is_skipped_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), b"first").unwrap();
    fs::write(dir.path().join("b.txt"), b"doomed").unwrap();
    fs::write(dir.path().join("c.txt"), b"third").unwrap();
    let (files, scan_errors) = collect_files(dir.path(), &SilentReporter).unwrap();
    assert!(scan_errors.is_empty());
    assert_eq!(files.len(), 3);

    // Removed between listing and signing
    fs::remove_file(dir.path().join("b.txt")).unwrap();
    let reporter = MemoryReporter::new();
    let inventory = Inventory::from_files(dir.path(), files, &SignatureEngine::new(), &reporter);

    assert_eq!(inventory.len(), 2);
    let names: Vec<_> = inventory.iter().map(FileRecord::name).collect();
    assert_eq!(names, vec!["a.txt", "c.txt"]);
    assert_eq!(inventory.errors().len(), 1);
    assert!(matches!(
        inventory.errors()[0],
        ScanError::Signature(SignatureError::NotFound(_))
    ));
    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("b.txt"));
}
