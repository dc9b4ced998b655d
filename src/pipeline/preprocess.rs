//! Decision table preparation - label encoding and target derivation
//!
//! Encodings are returned to the caller rather than kept anywhere global, so
//! every stage receives the table it works on explicitly.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Default column holding the final grade
pub const DEFAULT_GRADE_COLUMN: &str = "G3";

/// Grades at or above this mark count as good performance
pub const DEFAULT_PASS_MARK: f64 = 10.0;

/// Default name of the derived decision column
pub const DEFAULT_TARGET: &str = "performance";

/// Integer codes assigned to the categories of one text column
#[derive(Debug, Clone, Serialize)]
pub struct LabelEncoding {
    pub column: String,
    /// Category for each code; code `i` maps to `classes[i]`
    pub classes: Vec<String>,
}

/// Replace every string column by integer codes assigned in sorted category order.
///
/// Nulls stay null.
pub fn label_encode(df: &DataFrame) -> Result<(DataFrame, Vec<LabelEncoding>)> {
    let mut encoded = df.clone();
    let mut encodings = Vec::new();

    let text_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype() == &DataType::String)
        .map(|col| col.name().to_string())
        .collect();

    for name in text_columns {
        let values = df.column(&name)?.str()?;
        let classes: Vec<String> = values
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let codes: Vec<Option<i32>> = values
            .into_iter()
            .map(|v| {
                v.and_then(|s| classes.iter().position(|c| c == s))
                    .map(|code| code as i32)
            })
            .collect();

        encoded
            .with_column(Column::new(name.as_str().into(), codes))
            .with_context(|| format!("Failed to encode column '{}'", name))?;
        encodings.push(LabelEncoding {
            column: name,
            classes,
        });
    }

    Ok((encoded, encodings))
}

/// Add a binary decision column: 1 when `grade_column >= pass_mark`, else 0.
pub fn derive_target(
    df: &DataFrame,
    grade_column: &str,
    pass_mark: f64,
    target: &str,
) -> Result<DataFrame> {
    let grades = df
        .column(grade_column)
        .with_context(|| format!("Grade column '{}' not found", grade_column))?;

    if !grades.dtype().is_primitive_numeric() {
        anyhow::bail!(
            "Grade column '{}' must be numeric, found {}",
            grade_column,
            grades.dtype()
        );
    }

    let cast = grades.cast(&DataType::Float64)?;
    let outcome: Vec<Option<i32>> = cast
        .f64()?
        .into_iter()
        .map(|g| g.map(|g| i32::from(g >= pass_mark)))
        .collect();

    let mut out = df.clone();
    out.with_column(Column::new(target.into(), outcome))?;
    Ok(out)
}

/// Drop every row that has a null in any column.
pub fn drop_incomplete_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let mut keep = BooleanChunked::full("keep".into(), true, before);
    for col in df.get_columns() {
        keep = &keep & &col.is_not_null();
    }
    let complete = df.filter(&keep)?;
    let dropped = before - complete.height();
    Ok((complete, dropped))
}

/// Count of rows per decision value, as `(poor, good)`.
pub fn target_distribution(df: &DataFrame, target: &str) -> Result<(usize, usize)> {
    let col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .cast(&DataType::Float64)?;
    let values = col.f64()?;
    let good = values.into_iter().flatten().filter(|&v| v == 1.0).count();
    let poor = values.into_iter().flatten().filter(|&v| v == 0.0).count();
    Ok((poor, good))
}
