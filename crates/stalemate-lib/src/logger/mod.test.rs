use super::*;

#[test]
fn test_init_is_single_shot() {
    let config = LoggerConfig {
        level: LogLevel::Warning,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    // Another test binary thread may have installed a subscriber first
    match Logger::init(config) {
        Ok(logger) => assert_eq!(logger.config().level, LogLevel::Warning),
        Err(LoggerError::AlreadyInitialized) | Err(LoggerError::InitializationFailed { .. }) => {}
    }

    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized) | Err(LoggerError::InitializationFailed { .. })
    ));
}

#[test]
fn test_global_matches_initialized_flag() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
