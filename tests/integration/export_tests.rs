use fiche::config::RunConfig;
use fiche::output::{export, CsvSink, TableSink, XlsxSink};
use fiche::report::{Report, TableName, TreeResult};
use fiche::scanner::{Digest, FileRecord};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn side(names: &[(&str, &str)]) -> TreeResult {
    TreeResult {
        records: names
            .iter()
            .map(|(p, d)| FileRecord::new(PathBuf::from(p), Digest::from_hex(*d)))
            .collect(),
        duplicates: Some(Vec::new()),
    }
}

#[test]
fn test_csv_files_for_every_produced_table() {
    let out = tempdir().unwrap();
    let report = Report::assemble(
        Some(side(&[("l/a.txt", "aa"), ("l/b.txt", "bb")])),
        Some(side(&[("r/a.txt", "aa")])),
    );

    let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(CsvSink::new(out.path()))];
    let errors = export(&report, &mut sinks);

    assert!(errors.is_empty());
    for name in TableName::ALL {
        assert!(
            out.path().join(format!("{}.csv", name)).is_file(),
            "missing {}.csv",
            name
        );
    }
    assert_eq!(
        fs::read_to_string(out.path().join("left_only.csv")).unwrap(),
        "l/b.txt,bb\n"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("right_only.csv")).unwrap(),
        ""
    );
}

#[test]
fn test_absent_tables_are_not_written() {
    let out = tempdir().unwrap();
    let report = Report::assemble(
        Some(TreeResult {
            records: Vec::new(),
            duplicates: None,
        }),
        None,
    );

    let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(CsvSink::new(out.path()))];
    export(&report, &mut sinks);

    let mut written: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["left.csv"]);
}

#[test]
fn test_workbook_alongside_csv() {
    let out = tempdir().unwrap();
    let workbook = out.path().join("results.xlsx");
    let report = Report::assemble(Some(side(&[("a", "00")])), None);

    let mut sinks: Vec<Box<dyn TableSink>> = vec![
        Box::new(CsvSink::new(out.path())),
        Box::new(XlsxSink::new(&workbook)),
    ];
    let errors = export(&report, &mut sinks);

    assert!(errors.is_empty());
    assert!(out.path().join("left.csv").is_file());
    assert!(out.path().join("left_duplicates.csv").is_file());
    assert!(fs::read(&workbook).unwrap().starts_with(b"PK"));
}

#[test]
fn test_failed_artifact_does_not_stop_the_others() {
    let out = tempdir().unwrap();
    let report = Report::assemble(Some(side(&[("a", "00")])), None);

    // A directory where the CSV file should go makes that one write fail
    fs::create_dir(out.path().join("left.csv")).unwrap();

    let mut sinks: Vec<Box<dyn TableSink>> = vec![Box::new(CsvSink::new(out.path()))];
    let errors = export(&report, &mut sinks);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path(), out.path().join("left.csv"));
    assert!(out.path().join("left_duplicates.csv").is_file());
}

#[test]
fn test_run_creates_output_directory() {
    let tree = tempdir().unwrap();
    fs::write(tree.path().join("a.txt"), b"hello").unwrap();
    let out = tempdir().unwrap();
    let target = out.path().join("nested").join("reports");

    let config = RunConfig::new(tree.path())
        .with_output_dir(&target)
        .with_xlsx("inventory");
    let outcome = fiche::run(&config);

    assert!(outcome.write_errors.is_empty());
    assert!(target.join("left.csv").is_file());
    assert!(target.join("inventory.xlsx").is_file());
}
