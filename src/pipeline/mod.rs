//! Pipeline module - decision table preparation, rough set reduction and rule extraction

pub mod analysis;
pub mod dependency;
pub mod discretize;
pub mod evaluation;
pub mod loader;
pub mod metrics;
pub mod preprocess;
pub mod reduct;
pub mod rules;
pub mod synthetic;
pub mod table;

pub use analysis::*;
pub use dependency::*;
pub use discretize::*;
pub use evaluation::*;
pub use loader::*;
pub use metrics::*;
pub use preprocess::*;
pub use reduct::*;
pub use rules::*;
pub use synthetic::*;
pub use table::*;
