//! Sequential evaluation over every puzzle × model pair

use std::sync::Arc;

use super::solver::{OutcomeRecord, PuzzleSolver};
use crate::analysis::RunReport;
use crate::models::ModelConfig;
use crate::puzzles::Puzzle;

/// Outcomes of a run together with their aggregate report
#[derive(Debug, Clone)]
pub struct EvaluationRun {
    pub outcomes: Vec<OutcomeRecord>,
    pub report: RunReport,
}

/// Drives the solver over the full cross-product, one pair at a time
pub struct Evaluator {
    solver: PuzzleSolver,
    progress: Arc<dyn ProgressCallback>,
}

impl Evaluator {
    pub fn new(solver: PuzzleSolver) -> Self {
        Self {
            solver,
            progress: Arc::new(NoOpProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Solve every puzzle with every model, puzzle-major.
    ///
    /// Failed pairs are recorded and the loop moves on; nothing is retried.
    pub async fn run(&self, puzzles: &[Puzzle], models: &[ModelConfig]) -> EvaluationRun {
        let total = puzzles.len() * models.len();
        let mut outcomes = Vec::with_capacity(total);

        tracing::info!(
            "Evaluating {} puzzles against {} models ({} attempts)",
            puzzles.len(),
            models.len(),
            total
        );

        for puzzle in puzzles {
            for model in models {
                self.progress.on_attempt_start(puzzle.id(), model.name());
                let outcome = self.solver.solve(puzzle, model).await;
                self.progress.on_attempt_complete(&outcome);
                outcomes.push(outcome);
                self.progress.on_progress(outcomes.len(), total);
            }
        }

        let report = RunReport::build(puzzles.len(), models, &outcomes);
        EvaluationRun { outcomes, report }
    }
}

/// Progress callback for tracking execution
pub trait ProgressCallback: Send + Sync {
    fn on_attempt_start(&self, puzzle_id: i64, model: &str);
    fn on_attempt_complete(&self, outcome: &OutcomeRecord);
    fn on_progress(&self, completed: usize, total: usize);
}

/// Default no-op progress callback
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_attempt_start(&self, _puzzle_id: i64, _model: &str) {}
    fn on_attempt_complete(&self, _outcome: &OutcomeRecord) {}
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Console progress callback
pub struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_attempt_start(&self, puzzle_id: i64, model: &str) {
        println!("  Puzzle {} on {}...", puzzle_id, model);
    }

    fn on_attempt_complete(&self, outcome: &OutcomeRecord) {
        let status = match (&outcome.error, outcome.is_correct) {
            (Some(_), _) => "ERROR",
            (None, true) => "CORRECT",
            (None, false) => "WRONG",
        };
        println!("  {} puzzle {} on {}", status, outcome.puzzle_id, outcome.model);
    }

    fn on_progress(&self, completed: usize, total: usize) {
        println!("Progress: {}/{} attempts complete", completed, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelId, ProviderKind};
    use crate::providers::{LLMProvider, ProviderError, ProviderRegistry, ProviderResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers every puzzle correctly except ids listed in `fail_ids`
    struct ScriptedProvider {
        fail_ids: Vec<i64>,
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::OpenAI
        }

        async fn generate_response(&self, puzzle: &Puzzle, _: &ModelConfig) -> ProviderResult<String> {
            if self.fail_ids.contains(&puzzle.id()) {
                return Err(ProviderError::Auth("OPENAI_API_KEY not set".to_string()));
            }
            Ok(format!("<answer>{}</answer>", puzzle.answer()))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        seen: Mutex<Vec<(i64, String)>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_attempt_start(&self, puzzle_id: i64, model: &str) {
            self.seen.lock().unwrap().push((puzzle_id, model.to_string()));
        }
        fn on_attempt_complete(&self, _outcome: &OutcomeRecord) {}
        fn on_progress(&self, _completed: usize, _total: usize) {}
    }

    fn puzzles(n: i64) -> Vec<Puzzle> {
        (0..n)
            .map(|i| Puzzle::text_only(i, format!("P{}", i), "riddle", format!("word{}", i)).unwrap())
            .collect()
    }

    fn evaluator(fail_ids: Vec<i64>) -> Evaluator {
        let registry = ProviderRegistry::new().with_provider(Arc::new(ScriptedProvider { fail_ids }));
        Evaluator::new(PuzzleSolver::new(registry))
    }

    #[tokio::test]
    async fn test_order_is_puzzle_major() {
        let progress = Arc::new(RecordingProgress::default());
        let models = vec![ModelId::Gpt4oMini.config(), ModelId::Gpt4o.config()];
        let run = evaluator(vec![])
            .with_progress(progress.clone())
            .run(&puzzles(2), &models)
            .await;

        let order: Vec<(i64, &str)> = run
            .outcomes
            .iter()
            .map(|o| (o.puzzle_id, o.model.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "gpt-4o-mini"), (0, "gpt-4o"), (1, "gpt-4o-mini"), (1, "gpt-4o")]
        );
        assert_eq!(progress.seen.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_run() {
        let models = vec![ModelId::Gpt4o.config()];
        let run = evaluator(vec![1]).run(&puzzles(3), &models).await;

        assert_eq!(run.outcomes.len(), 3);
        let stats = run.report.stats_for("gpt-4o").unwrap();
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.correct_answers, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(run.report.total_puzzles, 3);
    }
}
