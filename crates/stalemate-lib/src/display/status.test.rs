use super::*;

#[test]
fn test_status_messages_do_not_panic() {
    let styling = StyleManager::plain();
    let status = StatusDisplay::new(&styling);

    status.success("case.csv", "12 steps");
    status.error("case.csv", "");
    status.warning("release rejected");
    status.info("using input/");
    status.message("plain");
    status.emphasis("Processes");
    status.subtle("hint");
    status.list(&["a", "b"]);
    status.section("Final state");
    status.step(1, 3, "P1 request R1");
    status.alert("DEADLOCK DETECTED");
}

#[test]
fn test_join_details() {
    assert_eq!(join_details("item", ""), "item");
    assert_eq!(join_details("item", "ok"), "item: ok");
}

#[test]
fn test_step_prefix() {
    assert_eq!(step_prefix(2, 10), "[2/10]");
}

#[test]
fn test_plain_styling_emits_no_escape_codes() {
    let styling = StyleManager::plain();

    assert_eq!(styling.format_success("done"), "+ done");
    assert_eq!(styling.format_error("failed"), "x failed");
    assert_eq!(styling.style_alert("DEADLOCK"), "DEADLOCK");
}

#[test]
fn test_forced_color_wraps_in_ansi() {
    let styling = StyleManager::new(true, true);

    let styled = styling.style_error("boom");

    assert!(styled.contains("\u{1b}["));
    assert_eq!(console::strip_ansi_codes(&styled), "boom");
    assert!(styling.format_success("ok").contains("✓"));
}
