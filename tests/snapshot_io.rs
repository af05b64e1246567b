use tempfile::tempdir;

use table_processing::io::snapshot::{load_snapshot, save_snapshot};
use table_processing::processing::Operand;
use table_processing::processor::TableProcessor;
use table_processing::types::{DataType, Table, Value};
use table_processing::ErrorKind;

fn scores(range: std::ops::Range<i64>) -> Table {
    Table::new(
        vec!["id".to_string(), "score".to_string()],
        range
            .map(|i| vec![Value::Int64(i), Value::Float64(i as f64 / 2.0)])
            .collect(),
    )
}

#[test]
fn split_save_then_multi_file_load_restores_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.bin");
    let table = scores(0..7);

    let written = save_snapshot(&table, &path, Some(3)).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[2], dir.path().join("scores_part3.bin"));

    let back = load_snapshot(&written).unwrap();
    assert_eq!(back, table);
}

#[test]
fn load_adopts_first_files_declared_types() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");

    let mut p = TableProcessor::new(scores(0..2));
    p.set_column_types([("score", DataType::Utf8)]).unwrap();
    save_snapshot(p.table(), &first, None).unwrap();
    save_snapshot(&scores(2..4), &second, None).unwrap();

    let back = load_snapshot(&[&first, &second]).unwrap();
    assert_eq!(back.row_count(), 4);
    assert_eq!(back.column_types().get(1), Some(DataType::Utf8));
}

#[test]
fn load_rejects_header_mismatch() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");
    save_snapshot(&scores(0..1), &first, None).unwrap();
    save_snapshot(
        &Table::new(vec!["other".to_string()], vec![vec![Value::Int64(1)]]),
        &second,
        None,
    )
    .unwrap();

    let err = load_snapshot(&[&first, &second]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert_eq!(err.path(), Some(second.as_path()));
}

#[test]
fn snapshot_keeps_state_after_arithmetic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.snapshot");
    let mut p = TableProcessor::new(scores(1..4));
    p.div("id", Operand::scalar(2)).unwrap();

    save_snapshot(p.table(), &path, None).unwrap();
    let back = TableProcessor::new(load_snapshot(&[&path]).unwrap());
    assert_eq!(back.column_types().get(0), Some(DataType::Float64));
    assert_eq!(back, p);
}

#[test]
fn missing_snapshot_is_critical_io_failure() {
    let err = load_snapshot(&["tests/fixtures/does_not_exist.bin"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.is_io());
}

#[test]
fn header_only_table_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("h.bin");
    let table = Table::with_columns(vec!["a".to_string(), "b".to_string()]);
    save_snapshot(&table, &path, Some(1)).unwrap();
    assert_eq!(load_snapshot(&[&path]).unwrap(), table);
}
