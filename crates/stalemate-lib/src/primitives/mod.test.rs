use super::*;

// =============================================================================
// ValueEnum round trips
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let primary_name = possible_value.get_name();
                let parsed: $enum_type = primary_name
                    .parse()
                    .unwrap_or_else(|e| panic!("'{primary_name}' should parse: {e}"));
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.ok(),
                    Some(*expected),
                    "Wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(TerminalCapsDetectIntent, test_color_intent_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("err", LogLevel::Error),
        ("warning", LogLevel::Warning),
        ("INFO", LogLevel::Info),
        (" debug ", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("text", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("JSON", LogFormat::Json),
        ("yml", LogFormat::Yaml),
    ]
);

test_fromstr_aliases!(
    TerminalCapsDetectIntent,
    test_color_intent_aliases,
    [
        ("auto", TerminalCapsDetectIntent::Auto),
        ("detect", TerminalCapsDetectIntent::Auto),
        ("always", TerminalCapsDetectIntent::Always),
        ("on", TerminalCapsDetectIntent::Always),
        ("never", TerminalCapsDetectIntent::Never),
        ("off", TerminalCapsDetectIntent::Never),
    ]
);

// =============================================================================
// Behaviors
// =============================================================================

#[test]
fn test_unknown_value_reports_parse_error() {
    let err = "loud".parse::<LogFormat>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log format");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_log_level_from_verbosity_boundaries() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_filter_names_follow_verbosity() {
    let names: Vec<&str> = LogLevel::value_variants()
        .iter()
        .map(LogLevel::as_filter)
        .collect();

    assert_eq!(names, vec!["error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_filter_directive_targets_both_crates() {
    let config = LoggerConfig {
        level: LogLevel::Debug,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    assert_eq!(
        config.filter_directive(),
        "stalemate=debug,stalemate_lib=debug,warn"
    );
}

#[test]
fn test_explicit_color_intent_ignores_terminal() {
    assert!(TerminalCapsDetectIntent::Always.resolve());
    assert!(!TerminalCapsDetectIntent::Never.resolve());
}

#[test]
fn test_config_error_display() {
    assert_eq!(
        ConfigError::ParseError {
            value: "sometimes".to_string(),
            reason: "invalid color mode".to_string(),
        }
        .to_string(),
        "Failed to parse configuration value 'sometimes': invalid color mode"
    );
    let error = ConfigError::ValidationFailed {
        reason: "input directory is a file".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Configuration validation failed: input directory is a file"
    );
}
