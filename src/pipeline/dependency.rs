//! Degree of dependency of the decision attribute on a set of condition attributes
//!
//! Rows are partitioned into equivalence classes by their values on the candidate
//! attributes. A class is consistent when all of its rows share one decision value;
//! the dependency is the fraction of rows that fall into consistent classes.

use std::collections::HashMap;

use super::table::{DecisionTable, TableError, Value};

/// One equivalence class of the indiscernibility partition
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    /// Values of the candidate attributes shared by every row in the class
    pub key: Vec<Value>,
    /// Row indices, in table order
    pub rows: Vec<usize>,
}

/// Partition the table by exact match on `attributes`.
///
/// Classes are returned in order of first appearance. With no attributes
/// every row lands in a single class.
pub fn equivalence_classes(
    table: &DecisionTable,
    attributes: &[String],
) -> Result<Vec<EquivalenceClass>, TableError> {
    let columns: Vec<Vec<Value>> = attributes
        .iter()
        .map(|attr| table.column_values(attr))
        .collect::<Result<_, _>>()?;

    let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut classes: Vec<EquivalenceClass> = Vec::new();

    for row in 0..table.height() {
        let key: Vec<Value> = columns.iter().map(|col| col[row].clone()).collect();
        match index.get(&key) {
            Some(&slot) => classes[slot].rows.push(row),
            None => {
                index.insert(key.clone(), classes.len());
                classes.push(EquivalenceClass {
                    key,
                    rows: vec![row],
                });
            }
        }
    }

    Ok(classes)
}

/// Dependency of the decision attribute on `attributes`, in `[0, 1]`.
///
/// An empty table has dependency 0.
pub fn dependency(table: &DecisionTable, attributes: &[String]) -> Result<f64, TableError> {
    let total = table.height();
    if total == 0 {
        return Ok(0.0);
    }

    let decisions = table.decision_values()?;
    let classes = equivalence_classes(table, attributes)?;

    let consistent: usize = classes
        .iter()
        .filter(|class| {
            let first = decisions[class.rows[0]];
            class.rows.iter().all(|&row| decisions[row] == first)
        })
        .map(|class| class.rows.len())
        .sum();

    Ok(consistent as f64 / total as f64)
}
