use super::*;
use crate::application::config::AppConfig;
use crate::primitives::TerminalCapsDetectIntent;
use std::fs;

#[test]
fn test_missing_env_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_env_files_from(dir.path()).is_ok());
}

#[test]
fn test_env_file_values_reach_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env"),
        "STALEMATE_LOADER_TEST_VALUE=from-dotenv\n",
    )
    .unwrap();

    load_env_files_from(dir.path()).unwrap();
    assert_eq!(
        std::env::var("STALEMATE_LOADER_TEST_VALUE").as_deref(),
        Ok("from-dotenv")
    );
}

#[test]
fn test_env_local_wins_over_env() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env.local"),
        "STALEMATE_LOADER_TEST_ORDER=local\n",
    )
    .unwrap();
    fs::write(dir.path().join(".env"), "STALEMATE_LOADER_TEST_ORDER=shared\n").unwrap();

    load_env_files_from(dir.path()).unwrap();
    assert_eq!(
        std::env::var("STALEMATE_LOADER_TEST_ORDER").as_deref(),
        Ok("local")
    );
}

#[test]
fn test_malformed_env_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "this line has no equals sign\n").unwrap();

    let err = load_env_files_from(dir.path()).unwrap_err();
    match err {
        ConfigError::EnvFileError { file, .. } => assert!(file.ends_with(".env")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        color: TerminalCapsDetectIntent::Always,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, TerminalCapsDetectIntent::Always);
    assert_eq!(merged.input_dir, Path::new("input"));
}
