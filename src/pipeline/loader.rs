//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Default CSV field separator (the student performance files use ';')
pub const DEFAULT_SEPARATOR: u8 = b';';

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Input file
/// * `separator` - CSV field separator, ignored for Parquet
/// * `infer_schema_length` - Rows used for CSV schema inference; 0 scans the whole file
pub fn load_dataset(path: &Path, separator: u8, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Parse a separator argument: a single character, or `\t` / `tab` for tabs
pub fn parse_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 {
                Ok(bytes[0])
            } else {
                Err(format!(
                    "separator must be a single ASCII character, got '{}'",
                    s
                ))
            }
        }
    }
}

/// Check that every listed column is present, naming the ones that are not
pub fn require_columns(df: &DataFrame, columns: &[String]) -> Result<()> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<&String> = columns.iter().filter(|c| !available.contains(c)).collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Column(s) {:?} not found in dataset. Available columns: {:?}",
            missing,
            available
        );
    }
    Ok(())
}
