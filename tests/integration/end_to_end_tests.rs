//! Whole runs through [`fiche::run`], checked through the CSV artifacts.

use fiche::config::RunConfig;
use fiche::report::TableName;
use fiche::scanner::ScanConfig;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn file_name(cell: &str) -> String {
    Path::new(cell)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_left_only_right_only() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(left.path().join("a.txt"), "hello").unwrap();
    fs::write(left.path().join("b.txt"), "world").unwrap();
    fs::write(right.path().join("a.txt"), "hello").unwrap();

    let config = RunConfig::new(left.path())
        .with_right(Some(right.path().to_path_buf()))
        .with_output_dir(out.path());
    let outcome = fiche::run(&config);

    assert!(outcome.is_clean());
    let left_only = rows(&out.path().join("left_only.csv"));
    assert_eq!(left_only.len(), 1);
    assert_eq!(file_name(&left_only[0][0]), "b.txt");
    assert!(rows(&out.path().join("right_only.csv")).is_empty());

    let left_rows = rows(&out.path().join("left.csv"));
    assert_eq!(left_rows.len(), 2);
    assert_eq!(left_rows[0][1], "5d41402abc4b2a76b9719d911017c592");
}

#[test]
fn test_duplicates_in_one_directory() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), "dup").unwrap();
    fs::write(dir.path().join("y.txt"), "dup").unwrap();

    let config = RunConfig::new(dir.path())
        .with_duplicates(true)
        .with_output_dir(out.path());
    fiche::run(&config);

    let duplicates = rows(&out.path().join("left_duplicates.csv"));
    assert_eq!(duplicates.len(), 1);
    assert_eq!(file_name(&duplicates[0][0]), "y.txt");
    assert_eq!(file_name(&duplicates[0][2]), "x.txt");
    assert_eq!(duplicates[0][1], duplicates[0][3]);
}

#[test]
fn test_ignored_file_contributes_nothing() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(left.path().join("cache.tmp"), "scratch").unwrap();
    fs::write(left.path().join("keep.txt"), "keep").unwrap();
    fs::write(left.path().join("cache2.tmp"), "scratch").unwrap();
    fs::write(right.path().join("keep.txt"), "keep").unwrap();

    let config = RunConfig::new(left.path())
        .with_right(Some(right.path().to_path_buf()))
        .with_duplicates(true)
        .with_output_dir(out.path())
        .with_scan(ScanConfig::default().with_ignore_patterns(vec!["*.tmp".to_string()]));
    let outcome = fiche::run(&config);

    for name in TableName::ALL {
        let content = fs::read_to_string(out.path().join(format!("{}.csv", name))).unwrap();
        assert!(!content.contains(".tmp"), "{} mentions an ignored file", name);
    }
    assert!(outcome
        .report
        .get(TableName::LeftDuplicates)
        .unwrap()
        .is_empty());
}

#[test]
fn test_missing_left_directory() {
    let base = tempdir().unwrap();
    let right = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(right.path().join("r.txt"), "r").unwrap();

    let missing = base.path().join("missing");
    let config = RunConfig::new(&missing)
        .with_right(Some(right.path().to_path_buf()))
        .with_duplicates(true)
        .with_output_dir(out.path());
    let outcome = fiche::run(&config);

    assert_eq!(outcome.scan_errors.len(), 1);
    assert_eq!(
        outcome.scan_errors[0].to_string(),
        format!("\"{}\" is not a directory!", missing.display())
    );
    assert!(!out.path().join("left.csv").exists());
    assert!(!out.path().join("left_duplicates.csv").exists());
    assert!(!out.path().join("left_only.csv").exists());
    assert!(!out.path().join("right_only.csv").exists());

    // The right side still runs
    assert_eq!(rows(&out.path().join("right.csv")).len(), 1);
    assert!(out.path().join("right_duplicates.csv").is_file());
}

#[test]
fn test_single_tree_produces_only_its_tables() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(dir.path().join("a"), "a").unwrap();

    let config = RunConfig::new(dir.path()).with_output_dir(out.path());
    let outcome = fiche::run(&config);

    let produced: Vec<_> = outcome.report.tables().map(|t| t.name).collect();
    assert_eq!(produced, vec![TableName::Left]);
    assert!(!out.path().join("left_duplicates.csv").exists());
    assert!(!out.path().join("right.csv").exists());
}
