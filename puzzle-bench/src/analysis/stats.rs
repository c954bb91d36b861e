//! Per-model accuracy statistics

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::ModelConfig;
use crate::runner::OutcomeRecord;

/// Accuracy figures for one model across a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub correct_answers: usize,
    pub total_attempts: usize,
    /// `None` when the model had no attempts
    pub accuracy: Option<f64>,
    pub errors: usize,
}

impl ModelStats {
    pub fn from_counts(correct_answers: usize, total_attempts: usize, errors: usize) -> Self {
        let accuracy = if total_attempts == 0 {
            None
        } else {
            Some(correct_answers as f64 / total_attempts as f64)
        };
        Self {
            correct_answers,
            total_attempts,
            accuracy,
            errors,
        }
    }

    fn empty() -> Self {
        Self::from_counts(0, 0, 0)
    }

    fn record(&mut self, outcome: &OutcomeRecord) {
        *self = Self::from_counts(
            self.correct_answers + usize::from(outcome.is_correct),
            self.total_attempts + 1,
            self.errors + usize::from(outcome.error.is_some()),
        );
    }
}

/// Partition outcomes by model name, keeping first-seen model order
pub fn aggregate_by_model(outcomes: &[OutcomeRecord]) -> IndexMap<String, ModelStats> {
    let mut stats: IndexMap<String, ModelStats> = IndexMap::new();
    for outcome in outcomes {
        stats
            .entry(outcome.model.clone())
            .or_insert_with(ModelStats::empty)
            .record(outcome);
    }
    stats
}

/// Aggregated statistics for one evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub total_puzzles: usize,
    pub total_attempts: usize,
    pub timestamp: DateTime<Utc>,
    pub model_performance: IndexMap<String, ModelStats>,
}

impl RunReport {
    /// Build the report for `models` in their given order.
    ///
    /// Every listed model gets an entry, including ones with no attempts.
    /// Outcomes for models outside the list are appended after them.
    pub fn build(total_puzzles: usize, models: &[ModelConfig], outcomes: &[OutcomeRecord]) -> Self {
        let mut model_performance: IndexMap<String, ModelStats> = models
            .iter()
            .map(|m| (m.name().to_string(), ModelStats::empty()))
            .collect();

        for (model, stats) in aggregate_by_model(outcomes) {
            model_performance.insert(model, stats);
        }

        Self {
            total_puzzles,
            total_attempts: outcomes.len(),
            timestamp: Utc::now(),
            model_performance,
        }
    }

    pub fn stats_for(&self, model: &str) -> Option<&ModelStats> {
        self.model_performance.get(model)
    }
}
