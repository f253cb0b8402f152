use fiche::compare::diff;
use fiche::scanner::TreeScanner;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_left_only_and_right_only() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    write(&left.path().join("a.txt"), b"hello");
    write(&left.path().join("b.txt"), b"world");
    write(&right.path().join("a.txt"), b"hello");

    let scanner = TreeScanner::with_defaults();
    let l = scanner.scan(left.path()).unwrap().records;
    let r = scanner.scan(right.path()).unwrap().records;

    let left_only = diff(&l, &r);
    assert_eq!(left_only.len(), 1);
    assert_eq!(left_only[0].path, left.path().join("b.txt"));
    assert!(diff(&r, &l).is_empty());
}

#[test]
fn test_comparison_ignores_names_and_layout() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    let nested = right.path().join("deep").join("er");
    fs::create_dir_all(&nested).unwrap();
    write(&left.path().join("report.txt"), b"quarterly numbers");
    write(&nested.join("renamed.bak"), b"quarterly numbers");

    let scanner = TreeScanner::with_defaults();
    let l = scanner.scan(left.path()).unwrap().records;
    let r = scanner.scan(right.path()).unwrap().records;

    assert!(diff(&l, &r).is_empty());
    assert!(diff(&r, &l).is_empty());
}

#[test]
fn test_comparison_with_itself_is_empty() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"1");
    write(&dir.path().join("b"), b"2");

    let records = TreeScanner::with_defaults().scan(dir.path()).unwrap().records;

    assert!(diff(&records, &records).is_empty());
}

#[test]
fn test_duplicates_on_one_side_all_reported() {
    let left = tempdir().unwrap();
    let right = tempdir().unwrap();
    write(&left.path().join("x1"), b"only here");
    write(&left.path().join("x2"), b"only here");
    write(&right.path().join("y"), b"something else");

    let scanner = TreeScanner::with_defaults();
    let l = scanner.scan(left.path()).unwrap().records;
    let r = scanner.scan(right.path()).unwrap().records;

    let left_only = diff(&l, &r);
    assert_eq!(left_only, l);
}
