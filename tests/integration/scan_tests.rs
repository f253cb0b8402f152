use fiche::scanner::{
    DigestAlgorithm, ScanConfig, ScanError, TreeScanner, UnreadablePolicy,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";
const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn relative(root: &Path, paths: impl Iterator<Item = PathBuf>) -> Vec<String> {
    paths
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let scan = TreeScanner::with_defaults().scan(dir.path()).unwrap();

    assert!(scan.records.is_empty());
    assert!(scan.errors.is_empty());
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    let deeper = sub.join("deeper");
    fs::create_dir_all(&deeper).unwrap();

    write(&dir.path().join("b.txt"), b"b");
    write(&dir.path().join("a.txt"), b"hello");
    write(&sub.join("c.txt"), b"c");
    write(&deeper.join("d.txt"), b"d");

    let scan = TreeScanner::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(
        relative(dir.path(), scan.records.iter().map(|r| r.path.clone())),
        vec!["a.txt", "b.txt", "sub/c.txt", "sub/deeper/d.txt"]
    );
    assert_eq!(scan.records[0].digest.as_str(), HELLO_MD5);
}

#[test]
fn test_record_paths_are_rooted_at_given_root() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"a");

    let scan = TreeScanner::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(scan.root, dir.path());
    assert_eq!(scan.records[0].path, dir.path().join("a.txt"));
}

#[test]
fn test_count_matches_non_ignored_files() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("logs");
    fs::create_dir(&sub).unwrap();
    for name in ["one.txt", "two.txt", "skip.tmp"] {
        write(&dir.path().join(name), name.as_bytes());
        write(&sub.join(name), name.as_bytes());
    }

    let config = ScanConfig::default().with_ignore_patterns(vec!["*.tmp".to_string()]);
    let scan = TreeScanner::new(config).scan(dir.path()).unwrap();

    assert_eq!(scan.records.len(), 4);
    assert!(scan
        .records
        .iter()
        .all(|r| r.path.extension().unwrap() != "tmp"));
}

#[test]
fn test_ignore_pattern_matches_file_names_only() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("build");
    fs::create_dir(&sub).unwrap();
    write(&sub.join("main.o"), b"obj");

    // The directory name matches, but patterns only apply to files
    let config = ScanConfig::default().with_ignore_patterns(vec!["build".to_string()]);
    let scan = TreeScanner::new(config).scan(dir.path()).unwrap();

    assert_eq!(scan.records.len(), 1);
}

#[test]
fn test_rescan_is_identical() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("z")).unwrap();
    write(&dir.path().join("m.txt"), b"m");
    write(&dir.path().join("z").join("a.txt"), b"a");
    write(&dir.path().join("c.txt"), b"c");

    let scanner = TreeScanner::with_defaults();
    let first = scanner.scan(dir.path()).unwrap();
    let second = scanner.scan(dir.path()).unwrap();

    assert_eq!(first.records, second.records);
}

#[test]
fn test_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");

    match TreeScanner::with_defaults().scan(&missing) {
        Err(ScanError::NotADirectory(path)) => assert_eq!(path, missing),
        other => panic!("Expected NotADirectory, got {:?}", other),
    }
}

#[test]
fn test_file_as_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    write(&file, b"x");

    let result = TreeScanner::with_defaults().scan(&file);

    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
}

#[test]
fn test_blake3_digests() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"hello");

    let config = ScanConfig::default().with_algorithm(DigestAlgorithm::Blake3);
    let scan = TreeScanner::new(config).scan(dir.path()).unwrap();

    assert_eq!(scan.records[0].digest.as_str().len(), 64);
}

#[test]
fn test_parallel_scan_keeps_discovery_order() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        write(
            &dir.path().join(format!("file_{:02}.txt", i)),
            format!("content {}", i).as_bytes(),
        );
    }

    let sequential = TreeScanner::with_defaults().scan(dir.path()).unwrap();
    let parallel = TreeScanner::new(ScanConfig::default().with_jobs(4))
        .scan(dir.path())
        .unwrap();

    assert_eq!(sequential.records, parallel.records);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_policies() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.txt");
    write(&locked, b"secret");
    write(&dir.path().join("open.txt"), b"hello");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Running as root ignores permission bits
    if File::open(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let as_empty = TreeScanner::with_defaults().scan(dir.path()).unwrap();
    let excluded = TreeScanner::new(ScanConfig::default().with_unreadable(UnreadablePolicy::Exclude))
        .scan(dir.path())
        .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(as_empty.records.len(), 2);
    assert_eq!(as_empty.records[0].path, locked);
    assert_eq!(as_empty.records[0].digest.as_str(), EMPTY_MD5);
    assert_eq!(as_empty.unreadable_count(), 1);

    assert_eq!(excluded.records.len(), 1);
    assert_eq!(excluded.records[0].digest.as_str(), HELLO_MD5);
    assert_eq!(excluded.unreadable_count(), 1);
}
