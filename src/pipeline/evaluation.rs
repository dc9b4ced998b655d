//! Accuracy comparison between the full attribute set and a reduct
//!
//! Both scenarios fit a smartcore random forest on the same seeded split.

use serde::Serialize;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::accuracy;
use smartcore::model_selection::train_test_split;
use tracing::debug;

use super::metrics::{ClassificationReport, ConfusionMatrix};
use super::rules::decision_label;
use super::table::{DecisionTable, TableError};

/// Default share of rows held out for testing
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Default number of trees per forest
pub const DEFAULT_TREES: u16 = 100;

/// Settings shared by both scenarios
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EvaluationConfig {
    pub test_size: f64,
    pub seed: u64,
    pub n_trees: u16,
}

/// Result of training and testing on one attribute set
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub features: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

/// Both scenarios side by side
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline: ScenarioResult,
    pub reduct: ScenarioResult,
}

impl Comparison {
    /// Reduct accuracy minus baseline accuracy
    pub fn accuracy_delta(&self) -> f64 {
        self.reduct.accuracy - self.baseline.accuracy
    }

    pub fn features_removed(&self) -> usize {
        self.baseline
            .features
            .len()
            .saturating_sub(self.reduct.features.len())
    }

    pub fn reduction_pct(&self) -> f64 {
        let initial = self.baseline.features.len();
        if initial == 0 {
            0.0
        } else {
            self.features_removed() as f64 / initial as f64 * 100.0
        }
    }
}

/// Rows held out by `train_test_split` for `rows` rows (the fraction is truncated).
pub fn test_rows(rows: usize, test_size: f64) -> usize {
    ((rows as f32) * test_size as f32) as usize
}

/// Train a random forest on `features` and score it on the held-out split.
///
/// The split depends only on the row count and seed, so every scenario sees
/// the same train and test rows.
pub fn evaluate_feature_set(
    table: &DecisionTable,
    name: &str,
    features: &[String],
    config: &EvaluationConfig,
) -> Result<ScenarioResult, TableError> {
    let rows = table.height();
    let n_test = test_rows(rows, config.test_size);
    if n_test == 0 || n_test >= rows {
        return Err(TableError::TooFewRows {
            rows,
            test_size: config.test_size,
        });
    }

    let x = DenseMatrix::from_2d_vec(&table.numeric_matrix(features)?)?;
    let y = table.decision_values()?;
    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &y, config.test_size as f32, true, Some(config.seed));

    let params = RandomForestClassifierParameters::default()
        .with_n_trees(config.n_trees.max(1))
        .with_seed(config.seed);
    let model = RandomForestClassifier::fit(&x_train, &y_train, params)?;
    let predicted = model.predict(&x_test)?;

    let accuracy = accuracy(&y_test, &predicted);
    let confusion = ConfusionMatrix::from_predictions(&y_test, &predicted);
    let report = ClassificationReport::new(&confusion, [decision_label(0), decision_label(1)]);
    debug!(scenario = name, features = features.len(), accuracy, "scenario evaluated");

    Ok(ScenarioResult {
        name: name.to_string(),
        features: features.to_vec(),
        train_rows: y_train.len(),
        test_rows: y_test.len(),
        accuracy,
        confusion,
        report,
    })
}

/// Evaluate the full attribute set and the reduct under the same split and seed.
///
/// The two forests are independent and are fit in parallel.
pub fn compare(
    table: &DecisionTable,
    full: &[String],
    reduct: &[String],
    config: &EvaluationConfig,
) -> Result<Comparison, TableError> {
    let (baseline, reduct) = rayon::join(
        || evaluate_feature_set(table, "All attributes", full, config),
        || evaluate_feature_set(table, "Rough set reduct", reduct, config),
    );

    Ok(Comparison {
        baseline: baseline?,
        reduct: reduct?,
    })
}
