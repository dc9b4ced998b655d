//! Rough-learn: Rough Set Analysis Library
//!
//! Attribute reduction by decision-table dependency, equal-width discretization,
//! and IF-THEN decision rule extraction, with a random forest comparison between
//! the full attribute set and the reduct.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
