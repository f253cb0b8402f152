use clap::Parser;
use figment::providers::{Env, Serialized};
use figment::Figment;
use fiche::cli::Cli;
use fiche::config::{Config, RunConfig};
use fiche::scanner::{DigestAlgorithm, UnreadablePolicy};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_load_from_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fiche.toml");
    fs::write(
        &path,
        r#"
algorithm = "blake3"
skip_unreadable = true
ignore = ["*.swp"]
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.algorithm, DigestAlgorithm::Blake3);
    assert!(config.skip_unreadable);
    assert_eq!(config.ignore, vec!["*.swp"]);
}

#[test]
fn test_config_env_layer() {
    std::env::set_var("FICHE_ITEST_BLOCK_SIZE", "2048");
    std::env::set_var("FICHE_ITEST_ALGORITHM", "blake3");

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("FICHE_ITEST_"))
        .extract()
        .unwrap();

    std::env::remove_var("FICHE_ITEST_BLOCK_SIZE");
    std::env::remove_var("FICHE_ITEST_ALGORITHM");

    assert_eq!(config.block_size, 2048);
    assert_eq!(config.algorithm, DigestAlgorithm::Blake3);
}

#[test]
fn test_file_settings_feed_the_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fiche.toml");
    fs::write(&path, "duplicates = true\njobs = 3\noutput_dir = \"reports\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "fiche",
        "/left",
        "/right",
        "--config",
        path.to_str().unwrap(),
        "--skip-unreadable",
    ])
    .unwrap();
    let config = Config::load_from_path(&path).unwrap();
    let run = RunConfig::resolve(&cli, config);

    assert!(run.duplicates);
    assert_eq!(run.scan.jobs, 3);
    assert_eq!(run.scan.unreadable, UnreadablePolicy::Exclude);
    assert_eq!(run.output_dir, PathBuf::from("reports"));
    assert_eq!(run.right, Some(PathBuf::from("/right")));
}
