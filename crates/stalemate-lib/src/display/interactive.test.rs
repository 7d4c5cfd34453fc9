use super::*;

#[test]
fn test_select_prompt_builds_without_terminal() {
    let styling = StyleManager::plain();
    let interactive = InteractiveDisplay::new(&styling);
    let options = vec!["deadlock.csv".to_string(), "chain.csv".to_string()];

    // Interaction itself needs a terminal
    let prompt = interactive.select("Pick a case").options(&options).default(1);

    assert_eq!(prompt.option_count(), 2);
}

#[test]
fn test_theme_follows_color_setting() {
    let colored = StyleManager::new(true, false);
    let interactive = InteractiveDisplay::new(&colored);

    let prompt = interactive.select("Pick a case").options(&[]);

    assert_eq!(prompt.option_count(), 0);
}
