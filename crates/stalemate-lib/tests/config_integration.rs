use clap::Parser;
use stalemate_lib::application::cli::{Cli, CliConfig};
use stalemate_lib::application::config::AppConfig;
use stalemate_lib::application::env::EnvironmentConfig;
use stalemate_lib::primitives::{ConfigError, LogLevel, TerminalCapsDetectIntent};
use std::path::PathBuf;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.input_dir, PathBuf::from("input"));
    assert_eq!(config.color, TerminalCapsDetectIntent::Auto);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        color: TerminalCapsDetectIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, TerminalCapsDetectIntent::Never);
    assert_eq!(merged.input_dir, PathBuf::from("input"));
}

#[test]
fn test_logger_config_follows_verbosity() {
    let config = AppConfig {
        log_level: 2,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config(false);
    assert_eq!(logger_config.level, LogLevel::Info);
    assert!(!logger_config.ansi);
}

#[test]
fn test_input_dir_pointing_at_file_is_rejected() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let cli = Cli::try_parse_from([
        "stalemate",
        "--input-dir",
        file.path().to_str().unwrap(),
        "cases",
    ])
    .unwrap();

    let err = CliConfig::resolve(cli, &EnvironmentConfig::default()).unwrap_err();
    match err {
        ConfigError::ValidationFailed { reason } => assert!(reason.contains("is a file")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ci_environment_disables_color() {
    let cli = Cli::try_parse_from(["stalemate", "version"]).unwrap();
    let environment = EnvironmentConfig::from_pairs([("CI", "true")]).unwrap();

    let config = CliConfig::resolve(cli, &environment).unwrap();
    assert_eq!(config.app_config.color, TerminalCapsDetectIntent::Never);
}
