//! Tests for dataset loading and decision table preparation

#[path = "common/mod.rs"]
mod common;

use std::fs::File;

use polars::prelude::*;
use roughlearn::pipeline::{
    derive_target, drop_incomplete_rows, label_encode, load_dataset, parse_separator,
    require_columns, target_distribution, DecisionTable, DEFAULT_SEPARATOR, STUDENT_FEATURES,
};
use tempfile::TempDir;

fn student_features() -> Vec<String> {
    STUDENT_FEATURES.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_semicolon_csv() {
    let (_dir, path) = common::create_temp_file("student-mat.csv", &common::student_csv());

    let df = load_dataset(&path, DEFAULT_SEPARATOR, 100).unwrap();

    assert_eq!(df.height(), 20);
    assert_eq!(df.width(), 12);
    assert!(df.column("G3").unwrap().dtype().is_primitive_numeric());
    assert_eq!(df.column("famsup").unwrap().dtype(), &DataType::String);
}

#[test]
fn test_load_with_wrong_separator_yields_single_column() {
    let (_dir, path) = common::create_temp_file("student-mat.csv", &common::student_csv());

    let df = load_dataset(&path, b',', 100).unwrap();

    assert_eq!(df.width(), 1, "Semicolon rows are not split on commas");
}

#[test]
fn test_load_full_schema_scan() {
    let (_dir, path) = common::create_temp_file("data.csv", "a;b\n1;x\n2;y\n");

    let df = load_dataset(&path, b';', 0).unwrap();

    assert_eq!(df.shape(), (2, 2));
}

#[test]
fn test_load_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.parquet");
    let mut df = df! {
        "studytime" => [1i64, 2, 3],
        "G3" => [8i64, 12, 15],
    }
    .unwrap();
    ParquetWriter::new(File::create(&path).unwrap())
        .finish(&mut df)
        .unwrap();

    let loaded = load_dataset(&path, DEFAULT_SEPARATOR, 100).unwrap();

    assert!(loaded.equals(&df));
}

#[test]
fn test_load_unsupported_extension() {
    let (_dir, path) = common::create_temp_file("data.xlsx", "irrelevant");

    let err = load_dataset(&path, DEFAULT_SEPARATOR, 100).unwrap_err();

    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_parse_separator() {
    assert_eq!(parse_separator(";"), Ok(b';'));
    assert_eq!(parse_separator("tab"), Ok(b'\t'));
    assert_eq!(parse_separator("\\t"), Ok(b'\t'));
    assert!(parse_separator(";;").is_err());
}

#[test]
fn test_require_columns_reports_missing() {
    let df = df! { "G3" => [10i64] }.unwrap();

    assert!(require_columns(&df, &["G3".to_string()]).is_ok());
    let err = require_columns(&df, &["G3".to_string(), "studytime".to_string()]).unwrap_err();
    assert!(err.to_string().contains("studytime"));
}

#[test]
fn test_csv_to_decision_table() {
    let (_dir, path) = common::create_temp_file("student-mat.csv", &common::student_csv());
    let raw = load_dataset(&path, DEFAULT_SEPARATOR, 100).unwrap();

    let (encoded, encodings) = label_encode(&raw).unwrap();
    let with_target = derive_target(&encoded, "G3", 10.0, "performance").unwrap();
    let (complete, dropped) = drop_incomplete_rows(&with_target).unwrap();

    assert_eq!(dropped, 0);
    assert_eq!(encodings.len(), 2, "famsup and internet are text columns");
    assert_eq!(encodings[0].column, "famsup");
    assert_eq!(encodings[0].classes, vec!["no", "yes"]);

    // Three 6s, a 9 and a 5 fall below the pass mark
    assert_eq!(target_distribution(&complete, "performance").unwrap(), (5, 15));

    let table = DecisionTable::new(complete, student_features(), "performance").unwrap();
    assert_eq!(table.height(), 20);
    assert!(table.is_numeric("famsup").unwrap());
}

#[test]
fn test_csv_with_missing_values() {
    let csv = "studytime;G3\n2;12\n;8\n3;\n1;15\n";
    let (_dir, path) = common::create_temp_file("gaps.csv", csv);
    let raw = load_dataset(&path, b';', 100).unwrap();

    let with_target = derive_target(&raw, "G3", 10.0, "performance").unwrap();
    let (complete, dropped) = drop_incomplete_rows(&with_target).unwrap();

    assert_eq!(dropped, 2);
    assert_eq!(complete.height(), 2);
}
