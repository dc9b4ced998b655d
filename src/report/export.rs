//! JSON export of an analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    Analysis, AnalysisConfig, Comparison, DecisionRule, LabelEncoding, Reduct, RuleSet,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Rough-learn version
    pub version: String,
    /// Input file, or "synthetic" when generated data was used
    pub input: String,
    /// Decision attribute
    pub target_column: String,
    /// Rows in the decision table
    pub rows: usize,
    pub config: AnalysisConfig,
    /// Integer codes assigned to text attributes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encodings: Vec<LabelEncoding>,
}

/// A rule in both readable and structured form
#[derive(Serialize)]
pub struct RuleEntry<'a> {
    pub text: String,
    #[serde(flatten)]
    pub rule: &'a DecisionRule,
}

/// Complete analysis export
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: AnalysisMetadata,
    pub reduct: &'a Reduct,
    pub rule_generation: &'a RuleSet,
    pub rules: Vec<RuleEntry<'a>>,
    pub comparison: &'a Comparison,
}

impl<'a> AnalysisExport<'a> {
    pub fn new(metadata: AnalysisMetadata, analysis: &'a Analysis) -> Self {
        let rules = analysis
            .rules
            .rules()
            .iter()
            .map(|rule| RuleEntry {
                text: rule.to_string(),
                rule,
            })
            .collect();

        Self {
            metadata,
            reduct: &analysis.reduct,
            rule_generation: &analysis.rules,
            rules,
            comparison: &analysis.comparison,
        }
    }
}

/// Build run metadata stamped with the current time
pub fn analysis_metadata(
    input: &str,
    target_column: &str,
    rows: usize,
    config: &AnalysisConfig,
    encodings: &[LabelEncoding],
) -> AnalysisMetadata {
    AnalysisMetadata {
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.to_string(),
        target_column: target_column.to_string(),
        rows,
        config: config.clone(),
        encodings: encodings.to_vec(),
    }
}

/// Write the analysis to `output_path` as pretty-printed JSON
pub fn export_analysis(
    analysis: &Analysis,
    metadata: AnalysisMetadata,
    output_path: &Path,
) -> Result<()> {
    let export = AnalysisExport::new(metadata, analysis);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize analysis")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write report: {}", output_path.display()))?;

    Ok(())
}
