use super::*;

fn resolve(pairs: &[(&str, &str)]) -> TerminalCapsDetectIntent {
    EnvironmentConfig::from_pairs(pairs.iter().copied())
        .unwrap()
        .apply_color_config(TerminalCapsDetectIntent::Auto)
}

#[test]
fn test_no_color_disables() {
    assert_eq!(resolve(&[("NO_COLOR", "1")]), TerminalCapsDetectIntent::Never);
}

#[test]
fn test_force_color_enables() {
    assert_eq!(resolve(&[("FORCE_COLOR", "1")]), TerminalCapsDetectIntent::Always);
    assert_eq!(resolve(&[("FORCE_COLOR", "false")]), TerminalCapsDetectIntent::Never);
}

#[test]
fn test_force_color_beats_no_color_and_clicolor() {
    let color = resolve(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    assert_eq!(color, TerminalCapsDetectIntent::Always);
}

#[test]
fn test_ci_wins_over_everything() {
    let color = resolve(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(color, TerminalCapsDetectIntent::Never);
}

#[test]
fn test_clicolor_zero_disables() {
    assert_eq!(resolve(&[("CLICOLOR", "0")]), TerminalCapsDetectIntent::Never);
    assert_eq!(resolve(&[("CLICOLOR", "1")]), TerminalCapsDetectIntent::Auto);
}

#[test]
fn test_empty_no_color_is_ignored() {
    assert_eq!(resolve(&[("NO_COLOR", "")]), TerminalCapsDetectIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    assert_eq!(resolve(&[("FORCE_COLOR", "maybe")]), TerminalCapsDetectIntent::Auto);
}

#[test]
fn test_explicit_intent_survives_empty_environment() {
    let env = EnvironmentConfig::default();
    assert_eq!(
        env.apply_color_config(TerminalCapsDetectIntent::Always),
        TerminalCapsDetectIntent::Always
    );
    assert!(!env.is_ci());
}
