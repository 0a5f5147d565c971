//! Tests for loading game configuration from disk.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use pairs_core::GridSize;
use pairs_duel::{ConfigSource, GameConfig};

#[test]
fn test_load_reads_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pairs_duel.toml");
    fs::write(
        &path,
        r#"rows = 2
cols = 6
match_delay_ms = 250
mismatch_delay_ms = 750
seed = 2022
log_file = "game.log"
"#,
    )
    .expect("Failed to write TOML");

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.grid().unwrap(), GridSize::new(2, 6).unwrap());
    assert_eq!(*config.timing().match_delay(), Duration::from_millis(250));
    assert_eq!(*config.timing().mismatch_delay(), Duration::from_millis(750));
    assert_eq!(*config.seed(), Some(2022));
    assert_eq!(config.log_file(), &PathBuf::from("game.log"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = GameConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "rows = \"four\"").expect("Failed to write TOML");

    let err = GameConfig::load(&path).unwrap_err();
    assert!(err.message.contains("parse"), "{}", err);
}

#[test]
fn test_cli_overrides_win_over_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pairs_duel.toml");
    fs::write(&path, "seed = 1\nrows = 2\ncols = 2\n").expect("Failed to write TOML");

    let config = GameConfig::load(&path)
        .unwrap()
        .with_overrides(None, Some(4), Some(99), None)
        .unwrap();
    assert_eq!(config.grid().unwrap(), GridSize::new(2, 4).unwrap());
    assert_eq!(*config.seed(), Some(99));
}

#[test]
fn test_load_reports_config_source() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pairs_duel.toml");

    let (_, source) = GameConfig::load_with_source(&path).unwrap();
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(source.to_string(), "defaults");

    fs::write(&path, "seed = 5\n").expect("Failed to write TOML");
    let (config, source) = GameConfig::load_with_source(&path).unwrap();
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert!(source.to_string().ends_with("pairs_duel.toml"), "{}", source);
    assert_eq!(*config.seed(), Some(5));
}
