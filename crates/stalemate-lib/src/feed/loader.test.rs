use super::*;
use tempfile::TempDir;

fn triples(operations: &[Operation]) -> Vec<(&str, Action, &str)> {
    operations
        .iter()
        .map(|op| (op.process.as_str(), op.action, op.resource.as_str()))
        .collect()
}

#[test]
fn test_parse_basic_feed() {
    let text = "process,action,resource\nP1,request,R1\nP2,hold,R2\nP1,release,R1\n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(
        triples(&operations),
        vec![
            ("P1", Action::Request, "R1"),
            ("P2", Action::Hold, "R2"),
            ("P1", Action::Release, "R1"),
        ]
    );
    assert_eq!(operations[0].line, 2);
    assert_eq!(operations[2].line, 4);
}

#[test]
fn test_header_is_case_insensitive_and_reorderable() {
    let text = " Resource , PROCESS,Action,note\nR1,P1,Request,first\n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(triples(&operations), vec![("P1", Action::Request, "R1")]);
}

#[test]
fn test_values_are_trimmed_and_action_lowercased() {
    let text = "process,action,resource\n  P1 ,  RELEASE ,\tR1 \n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(triples(&operations), vec![("P1", Action::Release, "R1")]);
}

#[test]
fn test_comment_and_incomplete_rows_are_skipped() {
    let text = "\
process,action,resource
# setup
#P9,request,R9
P1,request,
,request,R1
P1,,R1
P1,request

P2,request,R2
";

    let operations = parse_operations(text).unwrap();

    assert_eq!(triples(&operations), vec![("P2", Action::Request, "R2")]);
    assert_eq!(operations[0].line, 9);
}

#[test]
fn test_invalid_action_reports_line() {
    let text = "process,action,resource\nP1,request,R1\nP1,grab,R2\n";

    let err = parse_operations(text).unwrap_err();

    match err {
        FeedError::InvalidAction { line, action } => {
            assert_eq!(line, 3);
            assert_eq!(action, "grab");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_columns_are_listed() {
    let err = parse_operations("process,resource\nP1,R1\n").unwrap_err();

    match err {
        FeedError::MissingColumns { missing } => assert_eq!(missing, vec!["action"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_inputs() {
    assert!(matches!(parse_operations(""), Err(FeedError::Empty)));
    assert!(matches!(parse_operations("\n\n"), Err(FeedError::Empty)));
    assert!(matches!(
        parse_operations("process,action,resource\n# nothing\n"),
        Err(FeedError::Empty)
    ));
}

#[test]
fn test_quoted_fields() {
    let text = "process,action,resource\n\"P, one\",request,\"R \"\"A\"\"\"\n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(operations[0].process, "P, one");
    assert_eq!(operations[0].resource, "R \"A\"");
}

#[test]
fn test_unterminated_quote_is_rejected() {
    let err = parse_operations("process,action,resource\n\"P1,request,R1\n").unwrap_err();
    assert!(matches!(err, FeedError::UnterminatedQuote { line: 2 }));
}

#[test]
fn test_byte_order_mark_and_crlf() {
    let text = "\u{feff}process,action,resource\r\nP1,request,R1\r\n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(triples(&operations), vec![("P1", Action::Request, "R1")]);
}

#[test]
fn test_load_operations_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("case.csv");
    std::fs::write(&path, "process,action,resource\nP1,request,R1\n").unwrap();

    let operations = load_operations(&path).unwrap();

    assert_eq!(operations.len(), 1);
}

#[test]
fn test_load_operations_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");

    let err = load_operations(&path).unwrap_err();

    assert!(matches!(err, FeedError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_names_with_step_log_separators_are_rejected() {
    for (row, name) in [
        ("\"db;primary\",request,R1", "db;primary"),
        ("P1,request,\"R|1\"", "R|1"),
        ("host:P1,request,R1", "host:P1"),
        ("P1,release,a->b", "a->b"),
    ] {
        let text = format!("process,action,resource\nP0,request,R0\n{row}\n");

        let err = parse_operations(&text).unwrap_err();

        match err {
            FeedError::ReservedName { line, name: found } => {
                assert_eq!(line, 3);
                assert_eq!(found, name);
            }
            other => panic!("unexpected error for {row}: {other}"),
        }
    }
}

#[test]
fn test_names_with_other_punctuation_are_accepted() {
    let text = "process,action,resource\n\"worker, 1\",request,disk-0\nP.2,hold,R>1\n";

    let operations = parse_operations(text).unwrap();

    assert_eq!(
        triples(&operations),
        vec![
            ("worker, 1", Action::Request, "disk-0"),
            ("P.2", Action::Hold, "R>1"),
        ]
    );
}
