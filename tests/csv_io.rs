use std::fs;
use std::path::Path;

use tempfile::tempdir;

use table_processing::io::csv::{load_csv, save_csv};
use table_processing::types::{DataType, Table, Value};
use table_processing::ErrorKind;

fn people_rows() -> Vec<Vec<Value>> {
    vec![
        vec![
            Value::Int64(1),
            Value::from("Ada"),
            Value::Float64(98.5),
            Value::Bool(true),
        ],
        vec![
            Value::Int64(2),
            Value::from("Grace"),
            Value::Float64(87.25),
            Value::Bool(false),
        ],
    ]
}

#[test]
fn load_csv_types_cells_and_infers_columns() {
    let table = load_csv(&["tests/fixtures/people.csv"], b',').unwrap();

    assert_eq!(table.columns(), &["id", "name", "score", "active"]);
    assert_eq!(table.to_rows(), people_rows());
    assert_eq!(table.column_types().get(0), Some(DataType::Int64));
    assert_eq!(table.column_types().get(1), Some(DataType::Utf8));
    assert_eq!(table.column_types().get(2), Some(DataType::Float64));
    assert_eq!(table.column_types().get(3), Some(DataType::Bool));
}

#[test]
fn load_csv_concatenates_files_and_keeps_ragged_rows() {
    let table = load_csv(
        &["tests/fixtures/people.csv", "tests/fixtures/people_more.csv"],
        b',',
    )
    .unwrap();

    assert_eq!(table.row_count(), 4);
    assert_eq!(
        table.row(2).unwrap(),
        vec![Value::Int64(3), Value::from("Linus"), Value::Null, Value::Bool(true)]
    );
    assert_eq!(table.row(3).unwrap().len(), 5);
    assert_eq!(table.cell(3, 4), Some(Value::from("extra")));
}

#[test]
fn load_csv_skips_later_empty_files() {
    let table = load_csv(
        &["tests/fixtures/people.csv", "tests/fixtures/empty.csv", "tests/fixtures/people_more.csv"],
        b',',
    )
    .unwrap();
    assert_eq!(table.columns().len(), 4);
    assert_eq!(table.row_count(), 4);

    let nothing = load_csv(&["tests/fixtures/empty.csv"], b',').unwrap();
    assert_eq!(nothing.column_count(), 0);
    assert_eq!(nothing.row_count(), 0);
}

#[test]
fn load_csv_empty_first_file_supplies_no_columns() {
    let err = load_csv(
        &["tests/fixtures/empty.csv", "tests/fixtures/people.csv"],
        b',',
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.to_string().contains("column mismatch"));
    assert_eq!(err.path(), Some(Path::new("tests/fixtures/people.csv")));

    let both_empty = load_csv(&["tests/fixtures/empty.csv", "tests/fixtures/empty.csv"], b',').unwrap();
    assert_eq!(both_empty.column_count(), 0);
}

#[test]
fn load_csv_rejects_header_mismatch() {
    let err = load_csv(
        &["tests/fixtures/people.csv", "tests/fixtures/people_renamed.csv"],
        b',',
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    let msg = err.to_string();
    assert!(msg.contains("people_renamed.csv"));
    assert!(msg.contains("full_name"));
}

#[test]
fn load_csv_missing_file_names_the_path() {
    let err = load_csv(&["tests/fixtures/does_not_exist.csv"], b',').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.is_io());
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn load_csv_without_paths_fails() {
    let none: [&str; 0] = [];
    assert_eq!(load_csv(&none, b',').unwrap_err().kind(), ErrorKind::Load);
}

#[test]
fn load_csv_honors_delimiter() {
    let table = load_csv(&["tests/fixtures/people.tsv"], b'\t').unwrap();
    assert_eq!(table.columns(), &["id", "name", "score"]);
    assert_eq!(table.cell(1, 2), Some(Value::Float64(87.25)));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let table = Table::new(
        vec![
            "id".to_string(),
            "name".to_string(),
            "score".to_string(),
            "active".to_string(),
        ],
        people_rows(),
    );

    let written = save_csv(&table, &path, None, b',').unwrap();
    assert_eq!(written, vec![path.clone()]);
    assert_eq!(load_csv(&[&path], b',').unwrap(), table);
}

#[test]
fn save_writes_nulls_as_empty_fields_and_floats_with_fraction() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let table = Table::new(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![Value::Float64(2.0), Value::Null], vec![Value::Int64(1)]],
    );
    save_csv(&table, &path, None, b';').unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a;b\n2.0;\n1\n");
}

#[test]
fn save_splits_by_max_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("letters.csv");
    let table = Table::new(
        vec!["id".to_string(), "letter".to_string()],
        vec![
            vec![Value::Int64(1), Value::from("A")],
            vec![Value::Int64(2), Value::from("B")],
        ],
    );

    let written = save_csv(&table, &path, Some(1), b',').unwrap();
    assert_eq!(
        written,
        vec![
            dir.path().join("letters_part1.csv"),
            dir.path().join("letters_part2.csv"),
        ]
    );
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), "id,letter\n1,A\n");
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "id,letter\n2,B\n");
}

#[test]
fn save_rejects_empty_table_and_zero_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");

    let err = save_csv(&Table::default(), &path, None, b',').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Save);

    let table = Table::new(vec!["a".to_string()], vec![vec![Value::Int64(1)]]);
    let err = save_csv(&table, &path, Some(0), b',').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Save);
    assert!(!path.exists());
}

#[test]
fn save_into_missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope").join("t.csv");
    let table = Table::new(vec!["a".to_string()], vec![vec![Value::Int64(1)]]);
    let err = save_csv(&table, &path, None, b',').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Save);
    assert!(err.is_io());
    assert_eq!(err.path(), Some(path.as_path()));
}
