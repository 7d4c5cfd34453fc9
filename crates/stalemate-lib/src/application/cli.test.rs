use super::*;
use crate::primitives::{LogFormat, TerminalCapsDetectIntent};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["stalemate"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_run_command_with_export() {
    let cli = parse(&["run", "scenario.csv", "--export", "out/steps.json", "--stop-on-deadlock"]);

    assert_eq!(
        cli.command,
        Some(Commands::Run {
            file: PathBuf::from("scenario.csv"),
            export: Some(PathBuf::from("out/steps.json")),
            export_format: None,
            stop_on_deadlock: true,
        })
    );
}

#[test]
fn test_export_format_parses_value_enum() {
    let cli = parse(&["run", "a.csv", "-e", "steps.log", "--export-format", "json"]);

    match cli.command {
        Some(Commands::Run { export_format, .. }) => {
            assert_eq!(export_format, Some(ExportFormat::Json));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["check", "a.csv", "--color", "never", "--log-format", "json"]);

    assert_eq!(cli.config.color, TerminalCapsDetectIntent::Never);
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert_eq!(
        cli.command,
        Some(Commands::Check {
            file: PathBuf::from("a.csv")
        })
    );
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = parse(&[]);
    assert!(cli.command.is_none());
}

#[test]
fn test_cases_defaults() {
    let cli = parse(&["cases"]);
    assert_eq!(
        cli.command,
        Some(Commands::Cases {
            dir: None,
            pick: false
        })
    );
}

#[test]
fn test_unknown_subcommand_is_an_error() {
    let err = Cli::try_parse_from(["stalemate", "explode"]).unwrap_err();
    assert!(err.use_stderr());

    let config_err = ConfigError::from(err);
    assert!(matches!(config_err, ConfigError::ArgumentParsing { .. }));
}

#[test]
fn test_help_is_not_an_error_stream() {
    let err = Cli::try_parse_from(["stalemate", "--help"]).unwrap_err();
    assert!(!err.use_stderr());
}

#[test]
fn test_feed_file_accessor() {
    let cli = parse(&["graph", "cycle.csv"]);
    assert_eq!(
        cli.command.as_ref().and_then(Commands::feed_file),
        Some(&PathBuf::from("cycle.csv"))
    );
    assert_eq!(Commands::Version.feed_file(), None);
}

#[test]
fn test_resolve_applies_environment_color() {
    let cli = parse(&["version"]);
    let environment = EnvironmentConfig::from_pairs([("NO_COLOR", "1")]).unwrap();

    let config = CliConfig::resolve(cli, &environment).unwrap();
    assert_eq!(config.app_config.color, TerminalCapsDetectIntent::Never);
    assert_eq!(config.command, Some(Commands::Version));
}

#[test]
fn test_resolve_cli_color_beats_environment() {
    let cli = parse(&["--color", "always", "version"]);
    let environment = EnvironmentConfig::from_pairs([("NO_COLOR", "1")]).unwrap();

    let config = CliConfig::resolve(cli, &environment).unwrap();
    assert_eq!(config.app_config.color, TerminalCapsDetectIntent::Always);
}

#[test]
fn test_resolve_rejects_out_of_range_log_level() {
    let cli = parse(&["--log-level", "9", "version"]);
    let err = CliConfig::resolve(cli, &EnvironmentConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_resolve_keeps_custom_input_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap().to_string();
    let cli = parse(&["-i", &path, "cases"]);

    let config = CliConfig::resolve(cli, &EnvironmentConfig::default()).unwrap();
    assert_eq!(config.app_config.input_dir, dir.path());
}
