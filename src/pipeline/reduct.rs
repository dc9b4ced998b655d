//! Greedy attribute reduction preserving decision dependency

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::dependency::dependency;
use super::table::{DecisionTable, TableError};

/// Maximum allowed deviation from the full-set dependency when dropping an attribute
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Outcome of testing one attribute for removal
#[derive(Debug, Clone, Serialize)]
pub struct EliminationStep {
    /// Attribute tested for removal
    pub attribute: String,
    /// Dependency of the reduct without this attribute (None when that would leave nothing)
    pub candidate_dependency: Option<f64>,
    /// Whether the attribute was removed
    pub dropped: bool,
}

/// A reduct: the condition attributes kept after elimination
#[derive(Debug, Clone, Serialize)]
pub struct Reduct {
    /// Kept attributes, in original order
    pub attributes: Vec<String>,
    /// Attributes removed, in removal order
    pub removed: Vec<String>,
    /// Dependency using every condition attribute
    pub full_dependency: f64,
    /// Dependency using the kept attributes
    pub reduct_dependency: f64,
    /// One entry per tested attribute (empty for a manually chosen reduct)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<EliminationStep>,
}

impl Reduct {
    /// Build a reduct from an operator-chosen subset of `full`.
    ///
    /// Every chosen attribute must appear in `full` exactly once; the decision
    /// attribute and unknown names are rejected.
    pub fn manual(
        table: &DecisionTable,
        full: &[String],
        chosen: Vec<String>,
    ) -> Result<Self, TableError> {
        if chosen.is_empty() {
            return Err(TableError::EmptyReduct);
        }
        let mut seen = HashSet::new();
        for attr in &chosen {
            if !full.contains(attr) {
                return Err(TableError::NotACondition(attr.clone()));
            }
            if !seen.insert(attr.as_str()) {
                return Err(TableError::DuplicateAttribute(attr.clone()));
            }
        }

        let full_dependency = dependency(table, full)?;
        let reduct_dependency = dependency(table, &chosen)?;
        let removed = full
            .iter()
            .filter(|attr| !chosen.contains(attr))
            .cloned()
            .collect();

        Ok(Self {
            attributes: chosen,
            removed,
            full_dependency,
            reduct_dependency,
            steps: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Share of the original attributes that were removed, as a percentage
    pub fn reduction_pct(&self) -> f64 {
        let initial = self.attributes.len() + self.removed.len();
        if initial == 0 {
            0.0
        } else {
            self.removed.len() as f64 / initial as f64 * 100.0
        }
    }
}

/// Find a reduct of `attributes` by single-pass greedy elimination.
///
/// Each attribute is tested exactly once, in the given order, against the reduct
/// as it stands at that point. It is dropped when the dependency without it stays
/// strictly within `tolerance` of the full-set dependency. The result is order
/// dependent and not guaranteed minimal.
pub fn find_reduct(
    table: &DecisionTable,
    attributes: &[String],
    tolerance: f64,
) -> Result<Reduct, TableError> {
    let full_dependency = dependency(table, attributes)?;
    debug!(
        attributes = attributes.len(),
        full_dependency, "starting reduct search"
    );

    let mut reduct: Vec<String> = attributes.to_vec();
    let mut removed = Vec::new();
    let mut steps = Vec::with_capacity(attributes.len());

    for attr in attributes {
        let candidate: Vec<String> = reduct.iter().filter(|a| *a != attr).cloned().collect();

        if candidate.is_empty() {
            debug!(attribute = %attr, "kept: removal would leave no attributes");
            steps.push(EliminationStep {
                attribute: attr.clone(),
                candidate_dependency: None,
                dropped: false,
            });
            continue;
        }

        let candidate_dependency = dependency(table, &candidate)?;
        let dropped = (candidate_dependency - full_dependency).abs() < tolerance;
        debug!(
            attribute = %attr,
            candidate_dependency,
            dropped,
            "tested attribute"
        );

        if dropped {
            reduct = candidate;
            removed.push(attr.clone());
        }

        steps.push(EliminationStep {
            attribute: attr.clone(),
            candidate_dependency: Some(candidate_dependency),
            dropped,
        });
    }

    let reduct_dependency = dependency(table, &reduct)?;

    Ok(Reduct {
        attributes: reduct,
        removed,
        full_dependency,
        reduct_dependency,
        steps,
    })
}
