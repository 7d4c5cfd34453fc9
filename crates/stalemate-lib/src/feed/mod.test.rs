use super::*;

#[test]
fn test_action_parsing() {
    assert_eq!("request".parse::<Action>().unwrap(), Action::Request);
    assert_eq!("HOLD".parse::<Action>().unwrap(), Action::Hold);
    assert_eq!(" Release ".parse::<Action>().unwrap(), Action::Release);
    assert!("acquire".parse::<Action>().is_err());
    assert!("".parse::<Action>().is_err());
}

#[test]
fn test_hold_is_an_acquire() {
    assert!(Action::Request.is_acquire());
    assert!(Action::Hold.is_acquire());
    assert!(!Action::Release.is_acquire());
}

#[test]
fn test_action_serializes_lowercase() {
    let json = serde_json::to_string(&Action::Release).unwrap();
    assert_eq!(json, "\"release\"");
}

#[test]
fn test_operation_display() {
    let op = Operation::new("P1", Action::Hold, "R2");
    assert_eq!(op.to_string(), "P1 hold R2");
}
