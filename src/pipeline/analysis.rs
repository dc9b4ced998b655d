//! End-to-end rough set analysis over a prepared decision table

use serde::Serialize;

use super::discretize::DEFAULT_BINS;
use super::evaluation::{compare, Comparison, EvaluationConfig, DEFAULT_TEST_SIZE, DEFAULT_TREES};
use super::reduct::{find_reduct, Reduct, DEFAULT_TOLERANCE};
use super::rules::{generate_rules_binned, RuleSet, DEFAULT_MAX_RULES};
use super::synthetic::DEFAULT_SEED;
use super::table::{DecisionTable, TableError};

/// Resolved analysis settings
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    /// Allowed dependency deviation when dropping an attribute
    pub tolerance: f64,
    /// Bins used to discretize numeric attributes for rules
    pub bins: usize,
    /// Maximum number of rules reported
    pub max_rules: usize,
    /// Operator-chosen reduct; computed when None
    pub manual_reduct: Option<Vec<String>>,
    pub evaluation: EvaluationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            bins: DEFAULT_BINS,
            max_rules: DEFAULT_MAX_RULES,
            manual_reduct: None,
            evaluation: EvaluationConfig {
                test_size: DEFAULT_TEST_SIZE,
                seed: DEFAULT_SEED,
                n_trees: DEFAULT_TREES,
            },
        }
    }
}

/// Everything the analysis produces
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub reduct: Reduct,
    pub rules: RuleSet,
    pub comparison: Comparison,
}

/// Compute the reduct of the table's condition attributes.
///
/// A manual reduct is validated against the condition attributes.
pub fn reduce(table: &DecisionTable, config: &AnalysisConfig) -> Result<Reduct, TableError> {
    let full = table.condition_attributes();
    match &config.manual_reduct {
        Some(chosen) => Reduct::manual(table, full, chosen.clone()),
        None => find_reduct(table, full, config.tolerance),
    }
}

/// Decision rules over the reduct attributes.
pub fn reduct_rules(table: &DecisionTable, reduct: &Reduct, config: &AnalysisConfig) -> RuleSet {
    generate_rules_binned(table, &reduct.attributes, config.bins, config.max_rules)
}

/// Classifier comparison between all condition attributes and the reduct.
pub fn evaluate_reduct(
    table: &DecisionTable,
    reduct: &Reduct,
    config: &AnalysisConfig,
) -> Result<Comparison, TableError> {
    compare(
        table,
        table.condition_attributes(),
        &reduct.attributes,
        &config.evaluation,
    )
}

/// Reduct, rules over the reduct, then the classifier comparison.
pub fn run_analysis(table: &DecisionTable, config: &AnalysisConfig) -> Result<Analysis, TableError> {
    let reduct = reduce(table, config)?;
    let rules = reduct_rules(table, &reduct, config);
    let comparison = evaluate_reduct(table, &reduct, config)?;

    Ok(Analysis {
        reduct,
        rules,
        comparison,
    })
}
