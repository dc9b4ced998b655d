//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    parse_separator, DEFAULT_GRADE_COLUMN, DEFAULT_MAX_RULES, DEFAULT_PASS_MARK, DEFAULT_SAMPLES,
    DEFAULT_SEED, DEFAULT_TARGET, DEFAULT_TEST_SIZE, DEFAULT_TOLERANCE, DEFAULT_TREES,
    STUDENT_FEATURES,
};

/// Rough-learn - Rough set attribute reduction and decision rules for student performance
#[derive(Parser, Debug)]
#[command(name = "roughlearn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet).
    /// When the file does not exist, synthetic student data can be generated instead.
    #[arg(short, long, default_value = "student-mat.csv")]
    pub input: PathBuf,

    /// CSV field separator (single character, or "tab")
    #[arg(long, default_value = ";", value_parser = parse_separator)]
    pub separator: u8,

    /// Name of the binary decision column derived from the grade column
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Column holding the final grade used to derive the decision
    #[arg(long, default_value = DEFAULT_GRADE_COLUMN)]
    pub grade_column: String,

    /// Grades at or above this mark are "Good Performance"
    #[arg(long, default_value_t = DEFAULT_PASS_MARK)]
    pub pass_mark: f64,

    /// Condition attributes (comma-separated).
    /// Defaults to the eleven student attributes used by the analysis.
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Use this reduct (comma-separated) instead of computing one.
    /// Every attribute must also be a condition attribute.
    #[arg(long, value_delimiter = ',')]
    pub reduct: Vec<String>,

    /// Dependency tolerance - drop an attribute when the dependency without it
    /// stays within this distance of the full-set dependency
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_parser = validate_tolerance)]
    pub tolerance: f64,

    /// Number of equal-width bins for numeric attributes in rules (1-3)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=3))]
    pub bins: u8,

    /// Maximum number of decision rules to report
    #[arg(long, default_value_t = DEFAULT_MAX_RULES)]
    pub max_rules: usize,

    /// Share of rows held out for testing the classifiers (0-1, exclusive)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the train/test split, random forest and synthetic data
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of trees in each random forest
    #[arg(long, default_value_t = DEFAULT_TREES, value_parser = clap::value_parser!(u16).range(1..))]
    pub trees: u16,

    /// Generate synthetic data even if the input file exists
    #[arg(long, default_value = "false")]
    pub synthetic: bool,

    /// Number of synthetic students to generate
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// JSON report path.
    /// Defaults to the input directory with a '_rough_set.json' suffix.
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Do not write the JSON report
    #[arg(long, default_value = "false")]
    pub no_report: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Diagnostic log level (error, warn, info, debug, trace).
    /// RUST_LOG takes precedence when set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Only log errors
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Condition attributes, falling back to the default student attributes
    pub fn condition_attributes(&self) -> Vec<String> {
        if self.features.is_empty() {
            STUDENT_FEATURES.iter().map(|s| s.to_string()).collect()
        } else {
            self.features.clone()
        }
    }

    /// Operator-supplied reduct, if any
    pub fn manual_reduct(&self) -> Option<Vec<String>> {
        if self.reduct.is_empty() {
            None
        } else {
            Some(self.reduct.clone())
        }
    }

    /// Get the report path, deriving it from the input if not explicitly provided.
    /// Returns None when reporting is disabled.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_report {
            return None;
        }
        Some(self.report.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("analysis");
            parent.join(format!("{}_rough_set.json", stem))
        }))
    }

    /// Effective log filter directive
    pub fn log_filter(&self) -> &str {
        if self.quiet {
            "error"
        } else {
            &self.log_level
        }
    }
}

/// Validator for the dependency tolerance
fn validate_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("tolerance must be in (0.0, 1.0], got {}", value))
    }
}

/// Validator for the test split fraction
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("test_size must be between 0.0 and 1.0, got {}", value))
    }
}
