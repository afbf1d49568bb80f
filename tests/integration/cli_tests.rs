use clap::Parser;
use dupesync::cli::{Cli, Commands};
use dupesync::config::Config;
use dupesync::error::ExitCode;
use dupesync::execute;
use dupesync::report::MemoryReporter;
use filetime::FileTime;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run(args: &[&str]) -> (ExitCode, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let config = Config {
        color: false,
        ..Config::default()
    }
    .with_overrides(cli.command.options(), cli.no_color)
    .unwrap();
    let mut out = Vec::new();
    let code = execute(&cli.command, &config, &MemoryReporter::new(), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["dupesync", "compare", "/a", "/b", "--output", "json"]).unwrap();
    match cli.command {
        Commands::Compare(args) => {
            assert_eq!(args.first, Path::new("/a"));
            assert_eq!(args.second, Path::new("/b"));
        }
        other => panic!("Expected compare, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["dupesync", "sync", "/dst", "/src", "--dry-run"]).unwrap();
    assert!(matches!(cli.command, Commands::Sync(ref args) if args.dry_run));

    assert!(Cli::try_parse_from(["dupesync", "analyze"]).is_err());
}

#[test]
fn test_inventory_text_report() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hello.txt"), b"hello").unwrap();

    let (code, out) = run(&["dupesync", "inventory", path_str(dir.path())]);

    assert_eq!(code, ExitCode::Success);
    assert!(out.starts_with("hello.txt | 5 octets | 68656c6c6f | "));
    assert!(out.contains("1 file(s), 5 octets"));
}

#[test]
fn test_analyze_reports_duplicates_and_categories() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.jpg"), b"picture").unwrap();
    fs::write(dir.path().join("b.jpg"), b"picture").unwrap();

    let (code, out) = run(&["dupesync", "analyze", path_str(dir.path())]);

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("Duplicate files found:"));
    assert!(out.contains("Duplicate:\n  b.jpg |"));
    assert!(out.contains("Total size by file type:"));
    assert!(out.contains("images: 14 octets"));
    assert!(out.contains("audio: 0 octets"));
}

#[test]
fn test_analyze_without_duplicates_exits_nothing_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("only.txt"), b"alone").unwrap();

    let (code, out) = run(&["dupesync", "analyze", path_str(dir.path())]);

    assert_eq!(code, ExitCode::NothingFound);
    assert!(out.contains("No duplicates found."));
}

#[test]
fn test_compare_json_report() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("orig.bin"), b"payload").unwrap();
    fs::write(second.path().join("copy.bin"), b"payload").unwrap();

    let (code, out) = run(&[
        "dupesync",
        "compare",
        path_str(first.path()),
        path_str(second.path()),
        "--output",
        "json",
    ]);

    assert_eq!(code, ExitCode::Success);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["summary"]["pairs"], 1);
    assert_eq!(json["summary"]["reclaimable_bytes"], 7);
    assert_eq!(json["duplicates"][0]["duplicate"]["name"], "copy.bin");
    assert_eq!(json["duplicates"][0]["original"]["name"], "orig.bin");
}

#[test]
fn test_sync_csv_report() {
    let dest = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    let src_file = source.path().join("doc.txt");
    fs::write(&src_file, b"doc").unwrap();
    filetime::set_file_mtime(&src_file, FileTime::from_unix_time(1_600_000_000, 0)).unwrap();

    let (code, out) = run(&[
        "dupesync",
        "sync",
        path_str(dest.path()),
        path_str(source.path()),
        "-o",
        "csv",
    ]);

    assert_eq!(code, ExitCode::Success);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("kind,source,target"));
    assert!(lines.next().unwrap().starts_with("add,"));
    assert!(dest.path().join("doc.txt").exists());
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let cli = Cli::try_parse_from(["dupesync", "inventory", path_str(&missing)]).unwrap();
    let mut out = Vec::new();

    let err = execute(&cli.command, &Config::default(), &MemoryReporter::new(), &mut out).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to inventory"));
}
