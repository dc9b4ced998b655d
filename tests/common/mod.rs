//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roughlearn::pipeline::DecisionTable;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Owned attribute names from string literals
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Build a decision table with decision column `d`
pub fn table(frame: DataFrame, conditions: &[&str]) -> DecisionTable {
    DecisionTable::new(frame, names(conditions), "d").unwrap()
}

/// 10 rows where `d = a` and `b` alternates independently of `d`
///
/// - dependency({a}) = 1.0, dependency({a, b}) = 1.0
/// - dependency({b}) = 0.0 (both b-classes mix decisions)
pub fn create_determined_by_a_table() -> DecisionTable {
    table(
        df! {
            "a" => [0i32, 0, 0, 0, 0, 1, 1, 1, 1, 1],
            "b" => [0i32, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            "d" => [0i32, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        }
        .unwrap(),
        &["a", "b"],
    )
}

/// 10 rows with identical conditions and alternating decisions
pub fn create_inconsistent_table() -> DecisionTable {
    table(
        df! {
            "a" => [3i32; 10],
            "b" => [7i32; 10],
            "d" => [0i32, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        }
        .unwrap(),
        &["a", "b"],
    )
}

/// 10 rows where (a=1, b=0, d=1) appears 7 times, (a=0, b=1, d=0) twice
/// and (a=0, b=0, d=0) once
pub fn create_dominant_rule_table() -> DecisionTable {
    table(
        df! {
            "a" => [1i32, 0, 1, 1, 0, 1, 1, 0, 1, 1],
            "b" => [0i32, 1, 0, 0, 1, 0, 0, 0, 0, 0],
            "d" => [1i32, 0, 1, 1, 0, 1, 1, 0, 1, 1],
        }
        .unwrap(),
        &["a", "b"],
    )
}

/// Random integer-valued table with `cols` condition attributes `c0..` and decision `d`
pub fn create_random_table(rows: usize, cols: usize, levels: i32, seed: u64) -> DecisionTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);
    let mut conditions = Vec::with_capacity(cols);

    for i in 0..cols {
        let values: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..levels)).collect();
        let name = format!("c{}", i);
        columns.push(Column::new(name.as_str().into(), values));
        conditions.push(name);
    }

    let decision: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("d".into(), decision));

    DecisionTable::new(DataFrame::new(columns).unwrap(), conditions, "d").unwrap()
}

/// Write `content` to a file named `name` inside a fresh temporary directory
pub fn create_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);

    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();

    (temp_dir, path)
}

/// A small semicolon-separated student dataset in the UCI layout
pub fn student_csv() -> String {
    let mut csv = String::from(
        "studytime;failures;G2;absences;famsup;age;Medu;Fedu;traveltime;health;internet;G3\n",
    );
    let rows = [
        "2;0;6;6;no;18;4;4;2;3;no;6",
        "2;0;5;4;yes;17;1;1;1;3;yes;6",
        "2;3;8;10;no;15;1;1;1;3;yes;10",
        "3;0;14;2;yes;15;4;2;1;5;yes;15",
        "2;0;10;4;yes;16;3;3;1;5;no;10",
        "2;0;15;10;yes;16;4;3;1;5;yes;15",
        "2;0;12;0;no;16;2;2;1;3;yes;11",
        "2;0;5;6;yes;17;4;4;2;1;no;6",
        "2;0;18;0;yes;15;3;2;1;1;yes;19",
        "2;0;15;0;yes;15;3;4;1;5;yes;15",
        "2;0;8;0;yes;15;4;4;1;2;yes;9",
        "3;0;12;4;yes;15;2;1;3;4;yes;12",
        "1;0;14;2;yes;15;4;4;1;5;yes;14",
        "2;0;10;2;yes;15;4;3;2;3;yes;11",
        "3;0;16;0;yes;15;2;2;1;3;yes;16",
        "1;0;14;4;yes;16;4;4;1;2;yes;14",
        "3;0;14;6;yes;16;4;4;1;2;yes;14",
        "2;0;10;4;yes;16;3;3;3;4;no;10",
        "1;3;5;16;yes;17;3;2;1;5;yes;5",
        "1;0;10;4;no;16;4;3;1;5;yes;10",
    ];
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

/// Assert that two floats agree to within `1e-9`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
