//! Puzzle Benchmark Suite
//!
//! Evaluates LLM providers on a catalog of single-word-answer puzzles,
//! scores each answer and reports per-model accuracy.
//!
//! # Features
//!
//! - OpenAI and Anthropic providers, including inline image attachments
//! - `<answer>` tag extraction with case-insensitive scoring
//! - Fault containment: one failed request never aborts the run
//! - JSON results, per-model statistics and PNG bar charts
//!
//! # Example
//!
//! ```no_run
//! use puzzle_bench::{
//!     config::Config,
//!     providers::ProviderRegistry,
//!     puzzles::builtin_puzzles,
//!     runner::{Evaluator, PuzzleSolver},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let solver = PuzzleSolver::new(ProviderRegistry::from_config(&config));
//!     let evaluator = Evaluator::new(solver);
//!
//!     let run = evaluator
//!         .run(&builtin_puzzles()?, &config.selected_models())
//!         .await;
//!     println!("{} attempts", run.report.total_attempts);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod models;
pub mod providers;
pub mod puzzles;
pub mod reporting;
pub mod runner;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{aggregate_by_model, extract_answer, ExtractError, ModelStats, RunReport};
    pub use crate::config::Config;
    pub use crate::models::{ModelConfig, ModelId, ProviderKind, MASTER_SYSTEM_PROMPT};
    pub use crate::providers::{
        AnthropicClient, LLMProvider, OpenAIClient, ProviderError, ProviderRegistry, ProviderResult,
    };
    pub use crate::puzzles::{builtin_puzzles, Puzzle, PuzzleError};
    pub use crate::reporting::{print_console_report, write_run, RunArtifacts};
    pub use crate::runner::{EvaluationRun, Evaluator, OutcomeRecord, PuzzleSolver};
}
