//! Solving one puzzle with one model

use serde::{Deserialize, Serialize};

use crate::analysis::{extract_answer, ExtractError};
use crate::models::{ModelConfig, ProviderKind};
use crate::providers::{ProviderError, ProviderRegistry};
use crate::puzzles::Puzzle;

/// Why a solve attempt failed
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(ProviderKind),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

/// Result of one (puzzle, model) attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub puzzle_id: i64,
    pub model: String,
    pub provider: ProviderKind,
    pub raw_response: Option<String>,
    pub extracted_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub error: Option<String>,
}

impl OutcomeRecord {
    /// A scored attempt; correctness is decided here
    pub fn succeeded(
        puzzle: &Puzzle,
        model: &ModelConfig,
        raw_response: String,
        extracted_answer: String,
    ) -> Self {
        Self {
            puzzle_id: puzzle.id(),
            model: model.name().to_string(),
            provider: model.provider(),
            is_correct: puzzle.is_correct(&extracted_answer),
            raw_response: Some(raw_response),
            extracted_answer: Some(extracted_answer),
            correct_answer: puzzle.answer().to_string(),
            error: None,
        }
    }

    /// A failed attempt; never correct, no response fields
    pub fn failed(puzzle: &Puzzle, model: &ModelConfig, error: String) -> Self {
        Self {
            puzzle_id: puzzle.id(),
            model: model.name().to_string(),
            provider: model.provider(),
            raw_response: None,
            extracted_answer: None,
            correct_answer: puzzle.answer().to_string(),
            is_correct: false,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Dispatches each attempt to the provider registered for the model
pub struct PuzzleSolver {
    providers: ProviderRegistry,
}

impl PuzzleSolver {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    /// Solve `puzzle` with `model`. Every failure ends up in the record.
    pub async fn solve(&self, puzzle: &Puzzle, model: &ModelConfig) -> OutcomeRecord {
        match self.try_solve(puzzle, model).await {
            Ok((raw_response, extracted)) => {
                let record = OutcomeRecord::succeeded(puzzle, model, raw_response, extracted);
                tracing::debug!(
                    "Puzzle {} on {}: extracted {:?}, correct={}",
                    puzzle.id(),
                    model.name(),
                    record.extracted_answer,
                    record.is_correct
                );
                record
            }
            Err(e) => {
                tracing::warn!("Puzzle {} on {} failed: {}", puzzle.id(), model.name(), e);
                OutcomeRecord::failed(puzzle, model, e.to_string())
            }
        }
    }

    async fn try_solve(
        &self,
        puzzle: &Puzzle,
        model: &ModelConfig,
    ) -> Result<(String, String), SolveError> {
        let provider = self
            .providers
            .get(model.provider())
            .ok_or(SolveError::UnknownProvider(model.provider()))?;

        let response = provider.generate_response(puzzle, model).await?;
        tracing::info!("Response for {}: {}", model.name(), response);

        let extracted = extract_answer(&response)?;
        Ok((response, extracted))
    }
}
