//! End-to-end evaluation runs with in-process providers.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use puzzle_bench::prelude::*;

/// Answers correctly for even puzzle ids, wrongly for odd ones
struct ParityProvider {
    kind: ProviderKind,
}

#[async_trait]
impl LLMProvider for ParityProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate_response(&self, puzzle: &Puzzle, _model: &ModelConfig) -> ProviderResult<String> {
        if puzzle.id() % 2 == 0 {
            Ok(format!("Thinking... <answer>{}</answer>", puzzle.answer().to_uppercase()))
        } else {
            Ok("<answer>nope</answer>".to_string())
        }
    }
}

/// Always fails as a transport error would
struct DownProvider;

#[async_trait]
impl LLMProvider for DownProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate_response(&self, _: &Puzzle, _: &ModelConfig) -> ProviderResult<String> {
        Err(ProviderError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

fn registry() -> ProviderRegistry {
    ProviderRegistry::new()
        .with_provider(Arc::new(ParityProvider {
            kind: ProviderKind::OpenAI,
        }))
        .with_provider(Arc::new(DownProvider))
}

#[tokio::test]
async fn cross_product_covers_every_pair_once() {
    let puzzles = builtin_puzzles().unwrap();
    let models: Vec<ModelConfig> = ModelId::all().iter().map(ModelId::config).collect();

    let run = Evaluator::new(PuzzleSolver::new(registry()))
        .run(&puzzles, &models)
        .await;

    assert_eq!(run.outcomes.len(), puzzles.len() * models.len());
    assert_eq!(run.report.total_attempts, run.outcomes.len());
    assert_eq!(run.report.total_puzzles, puzzles.len());

    let pairs: HashSet<(i64, &str)> = run
        .outcomes
        .iter()
        .map(|o| (o.puzzle_id, o.model.as_str()))
        .collect();
    assert_eq!(pairs.len(), run.outcomes.len());
}

#[tokio::test]
async fn per_model_statistics_reflect_outcomes() {
    let puzzles: Vec<Puzzle> = (0..4)
        .map(|i| Puzzle::text_only(i, format!("P{}", i), "riddle", "word").unwrap())
        .collect();
    let models = vec![ModelId::Gpt4o.config(), ModelId::Claude3Opus.config()];

    let run = Evaluator::new(PuzzleSolver::new(registry()))
        .run(&puzzles, &models)
        .await;

    let gpt = run.report.stats_for("gpt-4o").unwrap();
    assert_eq!(gpt.correct_answers, 2);
    assert_eq!(gpt.total_attempts, 4);
    assert_eq!(gpt.accuracy, Some(0.5));
    assert_eq!(gpt.errors, 0);

    let claude = run.report.stats_for("claude-3-opus-20240229").unwrap();
    assert_eq!(claude.correct_answers, 0);
    assert_eq!(claude.errors, 4);
    assert_eq!(claude.accuracy, Some(0.0));

    for outcome in run.outcomes.iter().filter(|o| o.is_error()) {
        assert!(!outcome.is_correct);
        assert!(outcome.raw_response.is_none());
        assert!(outcome.extracted_answer.is_none());
        assert_eq!(outcome.error.as_deref(), Some("API error: 502 - bad gateway"));
    }
}

#[tokio::test]
async fn no_puzzles_reports_undefined_accuracy() {
    let models = vec![ModelId::Gpt4oMini.config()];
    let run = Evaluator::new(PuzzleSolver::new(registry())).run(&[], &models).await;

    assert!(run.outcomes.is_empty());
    let stats = run.report.stats_for("gpt-4o-mini").unwrap();
    assert_eq!(stats.total_attempts, 0);
    assert_eq!(stats.accuracy, None);
}

#[tokio::test]
async fn run_persists_results() {
    let dir = tempfile::tempdir().unwrap();
    let puzzles = builtin_puzzles().unwrap();
    let models = vec![ModelId::Gpt4o.config()];

    let run = Evaluator::new(PuzzleSolver::new(registry()))
        .run(&puzzles, &models)
        .await;
    let artifacts = write_run(dir.path(), &run).unwrap();

    let written = puzzle_bench::reporting::read_outcomes(&artifacts.detailed_results).unwrap();
    assert_eq!(written, run.outcomes);
    assert!(artifacts.stats.exists());
    assert!(artifacts.visualizations.accuracy_plot.exists());
    assert!(artifacts.visualizations.error_plot.exists());
}

#[tokio::test]
async fn bundled_catalog_and_config_drive_a_run() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = Config::from_file(root.join("config/puzzle-bench.toml")).unwrap();
    let puzzles =
        puzzle_bench::puzzles::load_puzzles_from_json_file(root.join("data/riddles.json")).unwrap();
    assert_eq!(puzzles.len(), 3);

    let models = config.selected_models();
    let run = Evaluator::new(PuzzleSolver::new(registry()))
        .run(&puzzles, &models)
        .await;

    assert_eq!(run.outcomes.len(), 9);
    let names: Vec<&str> = run.report.model_performance.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["gpt-4o-mini", "gpt-4o", "gpt-4-turbo"]);
    // Only puzzle 2 has an even id
    for stats in run.report.model_performance.values() {
        assert_eq!(stats.correct_answers, 1);
    }
}
