//! Response analysis: answer extraction and result aggregation

pub mod extract;
pub mod stats;

pub use extract::{extract_answer, ExtractError};
pub use stats::{aggregate_by_model, ModelStats, RunReport};
