//! Benchmark execution: per-pair solving and the full evaluation loop

pub mod evaluator;
pub mod solver;

pub use evaluator::{ConsoleProgress, EvaluationRun, Evaluator, NoOpProgress, ProgressCallback};
pub use solver::{OutcomeRecord, PuzzleSolver, SolveError};
