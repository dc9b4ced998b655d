//! Decision table - objects as rows, condition attributes plus one binary decision attribute

use std::fmt;
use std::hash::{Hash, Hasher};

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while reading a decision table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Attribute '{0}' not found in decision table")]
    ColumnNotFound(String),

    #[error("Attribute '{0}' is listed more than once")]
    DuplicateAttribute(String),

    #[error("Decision attribute '{0}' cannot also be a condition attribute")]
    DecisionIsCondition(String),

    #[error("Decision attribute '{attribute}' must be binary (0/1), found {found}")]
    NonBinaryDecision { attribute: String, found: String },

    #[error("Attribute '{attribute}' has unsupported type {dtype}")]
    UnsupportedType { attribute: String, dtype: String },

    #[error("Attribute '{attribute}' has {count} missing value(s)")]
    MissingValues { attribute: String, count: usize },

    #[error("Reduct attribute '{0}' is not a condition attribute")]
    NotACondition(String),

    #[error("A reduct needs at least one attribute")]
    EmptyReduct,

    #[error("{rows} row(s) cannot be split into train and test sets with test size {test_size}")]
    TooFewRows { rows: usize, test_size: f64 },

    #[error("Classifier error: {0}")]
    Classifier(#[from] smartcore::error::Failed),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// A single cell of the decision table.
///
/// Numbers compare by bit pattern so they can key equivalence classes;
/// `-0.0` is folded onto `0.0` first.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Label(String),
    Missing,
}

impl Value {
    fn number_bits(n: f64) -> u64 {
        if n == 0.0 {
            0.0f64.to_bits()
        } else {
            n.to_bits()
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Value::Label(a), Value::Label(b)) => a == b,
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(n) => {
                0u8.hash(state);
                Self::number_bits(*n).hash(state);
            }
            Value::Label(s) => {
                1u8.hash(state);
                s.hash(state);
            }
            Value::Missing => 2u8.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{:.1}", n),
            Value::Label(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "N/A"),
        }
    }
}

/// In-memory decision table backed by a polars `DataFrame`.
///
/// The frame is never mutated; stages that transform it build a new table
/// through [`DecisionTable::with_frame`].
#[derive(Debug, Clone)]
pub struct DecisionTable {
    frame: DataFrame,
    condition_attributes: Vec<String>,
    decision_attribute: String,
}

impl DecisionTable {
    /// Build a decision table, validating attribute roles and the binary decision column.
    pub fn new(
        frame: DataFrame,
        condition_attributes: Vec<String>,
        decision_attribute: &str,
    ) -> Result<Self, TableError> {
        let mut seen = std::collections::HashSet::new();
        for attr in &condition_attributes {
            if !seen.insert(attr.as_str()) {
                return Err(TableError::DuplicateAttribute(attr.clone()));
            }
            if attr == decision_attribute {
                return Err(TableError::DecisionIsCondition(attr.clone()));
            }
            ensure_column(&frame, attr)?;
        }
        ensure_column(&frame, decision_attribute)?;

        let table = Self {
            frame,
            condition_attributes,
            decision_attribute: decision_attribute.to_string(),
        };
        // Fails on anything other than 0/1
        table.decision_values()?;
        Ok(table)
    }

    /// Same attribute roles over a different frame (e.g. a discretized copy).
    pub fn with_frame(&self, frame: DataFrame) -> Result<Self, TableError> {
        Self::new(
            frame,
            self.condition_attributes.clone(),
            &self.decision_attribute,
        )
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn condition_attributes(&self) -> &[String] {
        &self.condition_attributes
    }

    pub fn decision_attribute(&self) -> &str {
        &self.decision_attribute
    }

    /// Whether an attribute holds numeric (continuous) values
    pub fn is_numeric(&self, attribute: &str) -> Result<bool, TableError> {
        let column = column(&self.frame, attribute)?;
        Ok(column.dtype().is_primitive_numeric() || column.dtype() == &DataType::Boolean)
    }

    /// Read one column as table values.
    pub fn column_values(&self, attribute: &str) -> Result<Vec<Value>, TableError> {
        column_to_values(column(&self.frame, attribute)?)
    }

    /// Decision values as 0/1, one per row.
    pub fn decision_values(&self) -> Result<Vec<u8>, TableError> {
        let values = self.column_values(&self.decision_attribute)?;
        values
            .iter()
            .map(|v| match v {
                Value::Number(n) if *n == 0.0 => Ok(0),
                Value::Number(n) if *n == 1.0 => Ok(1),
                other => Err(TableError::NonBinaryDecision {
                    attribute: self.decision_attribute.clone(),
                    found: match other {
                        Value::Number(n) => n.to_string(),
                        Value::Label(s) => format!("'{}'", s),
                        Value::Missing => "null".to_string(),
                    },
                }),
            })
            .collect()
    }

    /// Row-major numeric matrix of the given attributes for model fitting.
    ///
    /// Text attributes and missing values are rejected.
    pub fn numeric_matrix(&self, attributes: &[String]) -> Result<Vec<Vec<f64>>, TableError> {
        let mut rows = vec![Vec::with_capacity(attributes.len()); self.height()];
        for attr in attributes {
            let col = column(&self.frame, attr)?;
            if !(col.dtype().is_primitive_numeric() || col.dtype() == &DataType::Boolean) {
                return Err(TableError::UnsupportedType {
                    attribute: attr.clone(),
                    dtype: col.dtype().to_string(),
                });
            }
            let cast = col.cast(&DataType::Float64)?;
            let mut missing = 0;
            for (row, value) in rows.iter_mut().zip(cast.f64()?.into_iter()) {
                match value.filter(|v| !v.is_nan()) {
                    Some(v) => row.push(v),
                    None => missing += 1,
                }
            }
            if missing > 0 {
                return Err(TableError::MissingValues {
                    attribute: attr.clone(),
                    count: missing,
                });
            }
        }
        Ok(rows)
    }
}

fn ensure_column(frame: &DataFrame, name: &str) -> Result<(), TableError> {
    column(frame, name).map(|_| ())
}

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, TableError> {
    frame
        .column(name)
        .map_err(|_| TableError::ColumnNotFound(name.to_string()))
}

/// Convert a polars column into table values.
///
/// Numeric and boolean columns become `Number`, string columns `Label`, nulls `Missing`.
pub fn column_to_values(col: &Column) -> Result<Vec<Value>, TableError> {
    let dtype = col.dtype();
    if dtype == &DataType::String {
        let values = col
            .str()?
            .into_iter()
            .map(|v| match v {
                Some(s) => Value::Label(s.to_string()),
                None => Value::Missing,
            })
            .collect();
        return Ok(values);
    }

    if dtype.is_primitive_numeric() || dtype == &DataType::Boolean {
        let cast = col.cast(&DataType::Float64)?;
        let values = cast
            .f64()?
            .into_iter()
            .map(|v| match v {
                Some(n) if !n.is_nan() => Value::Number(n),
                _ => Value::Missing,
            })
            .collect();
        return Ok(values);
    }

    Err(TableError::UnsupportedType {
        attribute: col.name().to_string(),
        dtype: dtype.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df! {
            "a" => [0i32, 1, 0, 1],
            "b" => ["x", "y", "x", "y"],
            "d" => [0i32, 1, 0, 1],
        }
        .unwrap()
    }

    #[test]
    fn test_value_equality_folds_negative_zero() {
        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::Label("1.0".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(3.0).to_string(), "3.0");
        assert_eq!(Value::Number(2.46).to_string(), "2.5");
        assert_eq!(Value::Label("Low".to_string()).to_string(), "Low");
        assert_eq!(Value::Missing.to_string(), "N/A");
    }

    #[test]
    fn test_new_table_valid() {
        let table =
            DecisionTable::new(sample_frame(), vec!["a".into(), "b".into()], "d").unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.decision_values().unwrap(), vec![0, 1, 0, 1]);
        assert!(table.is_numeric("a").unwrap());
        assert!(!table.is_numeric("b").unwrap());
    }

    #[test]
    fn test_new_table_missing_column() {
        let err = DecisionTable::new(sample_frame(), vec!["zzz".into()], "d").unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound(name) if name == "zzz"));
    }

    #[test]
    fn test_new_table_rejects_duplicate_and_decision_as_condition() {
        let err =
            DecisionTable::new(sample_frame(), vec!["a".into(), "a".into()], "d").unwrap_err();
        assert!(matches!(err, TableError::DuplicateAttribute(_)));

        let err = DecisionTable::new(sample_frame(), vec!["d".into()], "d").unwrap_err();
        assert!(matches!(err, TableError::DecisionIsCondition(_)));
    }

    #[test]
    fn test_new_table_rejects_non_binary_decision() {
        let frame = df! {
            "a" => [1i32, 2, 3],
            "d" => [0i32, 1, 2],
        }
        .unwrap();
        let err = DecisionTable::new(frame, vec!["a".into()], "d").unwrap_err();
        assert!(matches!(err, TableError::NonBinaryDecision { .. }));
    }

    #[test]
    fn test_numeric_matrix_rejects_labels() {
        let table =
            DecisionTable::new(sample_frame(), vec!["a".into(), "b".into()], "d").unwrap();
        let matrix = table.numeric_matrix(&["a".to_string()]).unwrap();
        assert_eq!(matrix, vec![vec![0.0], vec![1.0], vec![0.0], vec![1.0]]);
        assert!(table.numeric_matrix(&["b".to_string()]).is_err());
    }

    #[test]
    fn test_numeric_matrix_rejects_missing_values() {
        let frame = df! {
            "a" => [Some(1.0), None, Some(f64::NAN)],
            "d" => [0i32, 1, 0],
        }
        .unwrap();
        let table = DecisionTable::new(frame, vec!["a".into()], "d").unwrap();
        let err = table.numeric_matrix(&["a".to_string()]).unwrap_err();
        assert!(matches!(err, TableError::MissingValues { count: 2, .. }));
    }
}
