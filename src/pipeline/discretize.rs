//! Equal-width discretization of continuous attributes into ordinal bins

use polars::prelude::*;
use serde::Serialize;

use super::table::{DecisionTable, TableError};

/// Number of bins used for rule generation
pub const DEFAULT_BINS: usize = 3;

/// Ordered bin labels, lowest first
pub const BIN_LABELS: [&str; 3] = ["Low", "Medium", "High"];

/// Fraction of the value range used to widen the outer edges
const EDGE_ADJUSTMENT: f64 = 0.001;

/// Result of binning a single column
#[derive(Debug, Clone, PartialEq)]
pub struct Binning {
    /// Label per row; `None` for missing values or when binning failed
    pub labels: Vec<Option<&'static str>>,
    /// Bin edges actually used (after collapsing duplicates)
    pub edges: Vec<f64>,
    /// Whether the column was discretized
    pub discretized: bool,
}

impl Binning {
    fn failed(len: usize) -> Self {
        Self {
            labels: vec![None; len],
            edges: Vec::new(),
            discretized: false,
        }
    }
}

/// How an attribute was treated by [`discretize`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinningOutcome {
    /// Replaced by bin labels using these edges
    Binned { edges: Vec<f64> },
    /// Already categorical, passed through
    Categorical,
    /// Left in numeric form because binning was not possible
    NotDiscretized,
}

/// A discretized copy of a decision table
#[derive(Debug, Clone)]
pub struct Discretized {
    pub table: DecisionTable,
    pub outcomes: Vec<(String, BinningOutcome)>,
}

impl Discretized {
    pub fn outcome(&self, attribute: &str) -> Option<&BinningOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, outcome)| outcome)
    }
}

/// Equal-width bin edges spanning the observed range of `values`.
///
/// Returns `bins + 1` edges, or `None` when there is no finite value. A constant
/// column is widened by 0.1% of its magnitude on both sides; otherwise the lowest
/// edge is pulled down by 0.1% of the range so the minimum sits inside the first
/// right-closed interval.
pub fn equal_width_edges(values: &[Option<f64>], bins: usize) -> Option<Vec<f64>> {
    if bins == 0 {
        return None;
    }

    let finite = values.iter().flatten().filter(|v| v.is_finite());
    let (mut min, mut max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }

    let constant = min == max;
    if constant {
        let widen = if min != 0.0 {
            EDGE_ADJUSTMENT * min.abs()
        } else {
            EDGE_ADJUSTMENT
        };
        min -= widen;
        max += widen;
    }

    let step = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| min + step * i as f64).collect();
    edges[bins] = max;

    if !constant {
        edges[0] -= (max - min) * EDGE_ADJUSTMENT;
    }

    Some(edges)
}

/// Bin a numeric column into equal-width intervals labelled `Low`/`Medium`/`High`.
///
/// Duplicate edges collapse, which can leave fewer effective bins; the first
/// `edges - 1` labels are used in that case. With fewer than two distinct edges
/// the column cannot be binned and `discretized` is false.
pub fn bin_column(values: &[Option<f64>], bins: usize) -> Binning {
    let bins = bins.min(BIN_LABELS.len());
    let Some(mut edges) = equal_width_edges(values, bins) else {
        return Binning::failed(values.len());
    };

    edges.dedup();
    if edges.len() < 2 {
        return Binning::failed(values.len());
    }

    let labels = values
        .iter()
        .map(|value| {
            let v = (*value).filter(|v| v.is_finite())?;
            if v <= edges[0] {
                return None;
            }
            edges[1..]
                .iter()
                .position(|&upper| v <= upper)
                .map(|bin| BIN_LABELS[bin])
        })
        .collect();

    Binning {
        labels,
        edges,
        discretized: true,
    }
}

/// Produce a copy of `table` with every numeric attribute in `attributes` binned.
///
/// Categorical attributes pass through unchanged. The input table is not modified.
pub fn discretize(
    table: &DecisionTable,
    attributes: &[String],
    bins: usize,
) -> Result<Discretized, TableError> {
    let mut frame = table.frame().clone();
    let mut outcomes = Vec::with_capacity(attributes.len());

    for attr in attributes {
        if !table.is_numeric(attr)? {
            outcomes.push((attr.clone(), BinningOutcome::Categorical));
            continue;
        }

        let values: Vec<Option<f64>> = table
            .column_values(attr)?
            .iter()
            .map(|v| v.as_f64())
            .collect();
        let binning = bin_column(&values, bins);

        if !binning.discretized {
            outcomes.push((attr.clone(), BinningOutcome::NotDiscretized));
            continue;
        }

        let column = Column::new(attr.as_str().into(), binning.labels);
        frame.with_column(column)?;
        outcomes.push((
            attr.clone(),
            BinningOutcome::Binned {
                edges: binning.edges,
            },
        ));
    }

    Ok(Discretized {
        table: table.with_frame(frame)?,
        outcomes,
    })
}
