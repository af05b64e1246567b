use std::fs;

use tempfile::tempdir;

use table_processing::io::text::{render_table, save_text};
use table_processing::processor::TableProcessor;
use table_processing::types::{Table, Value};
use table_processing::ErrorKind;

fn people() -> Table {
    Table::new(
        vec!["id".to_string(), "name".to_string(), "active".to_string()],
        vec![
            vec![Value::Int64(1), Value::from("Alice"), Value::Bool(true)],
            vec![Value::Int64(2), Value::from("Bob"), Value::Null],
        ],
    )
}

#[test]
fn save_text_writes_rendering_with_trailing_newline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.txt");

    let written = save_text(&people(), &path).unwrap();
    assert_eq!(written, vec![path.clone()]);

    let expected = [
        "id   | name    | active  ",
        "-------------------------",
        "1    | Alice   | true    ",
        "2    | Bob     |         ",
        "",
        "rows: 2, columns: 3",
        "",
    ]
    .join("\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn dash_line_matches_header_width() {
    let out = render_table(&people());
    let mut lines = out.lines();
    let header = lines.next().unwrap();
    let rule = lines.next().unwrap();
    assert_eq!(rule.len(), header.len());
    assert!(rule.chars().all(|c| c == '-'));
}

#[test]
fn display_and_render_agree() {
    let p = TableProcessor::new(people());
    assert_eq!(p.table().to_string(), render_table(p.table()));
}

#[test]
fn header_only_table_renders_zero_rows() {
    let out = render_table(&Table::with_columns(vec!["only".to_string()]));
    assert_eq!(out, "only  \n------\n\nrows: 0, columns: 1");
}

#[test]
fn save_text_rejects_empty_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    let err = save_text(&Table::default(), &path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Save);
    assert!(!path.exists());
}
