use tempfile::tempdir;

use table_processing::io::{load, save, LoadOptions, SaveOptions};
use table_processing::processing::{EvalError, Operand};
use table_processing::processor::TableProcessor;
use table_processing::types::{DataType, Table, Value};
use table_processing::{ErrorKind, TableError};

fn column(name: &str, values: &[i64]) -> TableProcessor {
    TableProcessor::new(Table::new(
        vec![name.to_string()],
        values.iter().map(|v| vec![Value::Int64(*v)]).collect(),
    ))
}

fn people() -> TableProcessor {
    TableProcessor::new(Table::new(
        vec!["id".to_string(), "name".to_string(), "score".to_string()],
        vec![
            vec![Value::Int64(1), Value::from("Alice"), Value::Float64(91.5)],
            vec![Value::Int64(2), Value::from("Bob"), Value::Float64(78.0)],
            vec![Value::Int64(3), Value::from("Charlie"), Value::Float64(85.25)],
        ],
    ))
}

#[test]
fn filter_on_comparison_mask() {
    let p = column("score", &[10, 20, 30, 40]);
    let mask = p.gr("score", Operand::scalar(25)).unwrap();
    assert_eq!(mask, vec![false, false, true, true]);

    let high = p.filter_rows(&mask).unwrap();
    assert_eq!(
        high.table().to_rows(),
        vec![vec![Value::Int64(30)], vec![Value::Int64(40)]]
    );
}

#[test]
fn mul_keeps_integer_type() {
    let mut p = column("value", &[10, 20, 30]);
    p.mul("value", Operand::scalar(2)).unwrap();
    assert_eq!(
        p.table().to_rows(),
        vec![vec![Value::Int64(20)], vec![Value::Int64(40)], vec![Value::Int64(60)]]
    );
    assert_eq!(p.column_types().get(0), Some(DataType::Int64));
}

#[test]
fn div_by_zero_always_fails_and_changes_nothing() {
    let mut p = people();
    let before = p.clone();
    for zero in [Value::Int64(0), Value::Float64(0.0), Value::Bool(false)] {
        let err = p.div("score", Operand::Scalar(zero)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
        match err {
            TableError::Operation { cause, .. } => assert_eq!(cause, Some(EvalError::DivisionByZero)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(p, before);
}

#[test]
fn name_and_position_resolve_identically() {
    let p = people();
    for (i, name) in p.table().columns().iter().enumerate() {
        assert_eq!(p.column_index(name).unwrap(), i);
        assert_eq!(p.column_index(i).unwrap(), i);
        assert_eq!(p.get_values(name).unwrap(), p.get_values(i).unwrap());
    }
}

#[test]
fn column_to_column_arithmetic_into_target() {
    let mut p = TableProcessor::new(Table::new(
        vec!["a".to_string(), "b".to_string(), "sum".to_string()],
        vec![
            vec![Value::Int64(1), Value::Float64(0.5), Value::Float64(0.0)],
            vec![Value::Int64(2), Value::Float64(1.5), Value::Float64(0.0)],
        ],
    ));
    p.add_into("a", Operand::column("b"), "sum").unwrap();
    assert_eq!(
        p.get_values("sum").unwrap(),
        vec![Value::Float64(1.5), Value::Float64(3.5)]
    );
    // The left column is untouched.
    assert_eq!(p.get_values("a").unwrap(), vec![Value::Int64(1), Value::Int64(2)]);
}

#[test]
fn arithmetic_on_text_column_is_rejected() {
    let mut p = people();
    let err = p.add("name", Operand::scalar(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Operation);
}

#[test]
fn text_compares_lexicographically() {
    let p = people();
    assert_eq!(
        p.ls("name", Operand::scalar("Bz")).unwrap(),
        vec![true, true, false]
    );
    assert_eq!(
        p.ne("name", Operand::scalar(1)).unwrap(),
        vec![true, true, true]
    );
    assert_eq!(
        p.gr("name", Operand::scalar(1)).unwrap_err().kind(),
        ErrorKind::Operation
    );
}

#[test]
fn view_edits_survive_save_of_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let p = people();

    let mask = p.ge("score", Operand::scalar(85)).unwrap();
    let mut top = p.filter_view(&mask).unwrap();
    top.add("score", Operand::scalar(1.0)).unwrap();

    save(p.table(), &path, &SaveOptions::default()).unwrap();
    let back = TableProcessor::new(load(&[&path], &LoadOptions::default()).unwrap());
    assert_eq!(
        back.get_values("score").unwrap(),
        vec![Value::Float64(92.5), Value::Float64(78.0), Value::Float64(86.25)]
    );
}

#[test]
fn csv_round_trip_preserves_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("round.csv");
    let table = Table::new(
        vec![
            "id".to_string(),
            "name".to_string(),
            "score".to_string(),
            "ok".to_string(),
        ],
        vec![
            vec![Value::Int64(1), Value::from("x"), Value::Float64(2.0), Value::Bool(true)],
            vec![Value::Int64(-2), Value::from("y z"), Value::Float64(-0.5), Value::Bool(false)],
        ],
    );
    save(&table, &path, &SaveOptions::default()).unwrap();
    assert_eq!(load(&[&path], &LoadOptions::default()).unwrap(), table);
}

#[test]
fn split_save_writes_header_into_each_part() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("letters.csv");
    let table = Table::new(
        vec!["id".to_string(), "letter".to_string()],
        vec![
            vec![Value::Int64(1), Value::from("A")],
            vec![Value::Int64(2), Value::from("B")],
        ],
    );
    let opts = SaveOptions {
        max_rows: Some(1),
        ..Default::default()
    };
    let written = save(&table, &path, &opts).unwrap();
    assert_eq!(written.len(), 2);
    for part in &written {
        let loaded = load(&[part], &LoadOptions::default()).unwrap();
        assert_eq!(loaded.columns(), &["id", "letter"]);
        assert_eq!(loaded.row_count(), 1);
    }
}
