use super::*;

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_table_columns_are_aligned() {
    let styling = StyleManager::plain();
    let structured = StructuredDisplay::new(&styling);

    let lines = structured
        .table()
        .header(&["Process", "Holding"])
        .row(cells(&["P1", "R1, R2"]))
        .row(cells(&["LongName", "-"]))
        .to_lines();

    assert_eq!(
        lines,
        vec![
            "Process  | Holding",
            "---------+--------",
            "P1       | R1, R2",
            "LongName | -",
        ]
    );
}

#[test]
fn test_table_without_header() {
    let styling = StyleManager::plain();
    let structured = StructuredDisplay::new(&styling);

    let lines = structured
        .table()
        .rows(vec![cells(&["a", "bb"]), cells(&["ccc", "d"])])
        .to_lines();

    assert_eq!(lines, vec!["a   | bb", "ccc | d"]);
}

#[test]
fn test_short_rows_are_padded() {
    let styling = StyleManager::plain();
    let structured = StructuredDisplay::new(&styling);

    let lines = structured
        .table()
        .header(&["A", "B", "C"])
        .row(cells(&["1"]))
        .to_lines();

    assert_eq!(lines[2], "1");
}

#[test]
fn test_empty_table_renders_nothing() {
    let styling = StyleManager::plain();
    let structured = StructuredDisplay::new(&styling);

    assert!(structured.table().to_lines().is_empty());
    structured.table().render();
}

#[test]
fn test_pairs_and_lists_do_not_panic() {
    let styling = StyleManager::plain();
    let structured = StructuredDisplay::new(&styling);

    structured.pairs(&[("Steps", "4"), ("Processes", "2")]);
    structured.numbered_list(&["first.csv", "second.csv"]);
}
