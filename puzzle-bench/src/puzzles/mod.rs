//! Puzzle definitions and loading

pub mod catalog;
pub mod loader;

pub use catalog::builtin_puzzles;
pub use loader::{load_puzzles_from_json_file, load_puzzles_from_json_str, LoadError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Validation failures when constructing a [`Puzzle`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("ID must be non-negative, got {0}")]
    NegativeId(i64),

    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("Image file not found: {0}")]
    ImageNotFound(String),
}

/// A single puzzle with a one-word expected answer.
///
/// Fields are private so a `Puzzle` can only exist after passing
/// [`Puzzle::new`]; deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PuzzleFields")]
pub struct Puzzle {
    id: i64,
    title: String,
    text: String,
    image_path: Option<PathBuf>,
    answer: String,
}

#[derive(Deserialize)]
struct PuzzleFields {
    id: i64,
    title: String,
    text: String,
    #[serde(default)]
    image_path: Option<PathBuf>,
    answer: String,
}

impl TryFrom<PuzzleFields> for Puzzle {
    type Error = PuzzleError;

    fn try_from(f: PuzzleFields) -> Result<Self, Self::Error> {
        Puzzle::new(f.id, f.title, f.text, f.image_path, f.answer)
    }
}

impl Puzzle {
    /// Create a validated puzzle
    pub fn new(
        id: i64,
        title: impl Into<String>,
        text: impl Into<String>,
        image_path: Option<PathBuf>,
        answer: impl Into<String>,
    ) -> Result<Self, PuzzleError> {
        let title = title.into();
        let text = text.into();
        let answer = answer.into();

        if id < 0 {
            return Err(PuzzleError::NegativeId(id));
        }
        if title.trim().is_empty() {
            return Err(PuzzleError::Blank("Title"));
        }
        if text.trim().is_empty() {
            return Err(PuzzleError::Blank("Text"));
        }
        if answer.trim().is_empty() {
            return Err(PuzzleError::Blank("Answer"));
        }
        if let Some(path) = &image_path {
            if !path.is_file() {
                return Err(PuzzleError::ImageNotFound(path.display().to_string()));
            }
        }

        Ok(Self {
            id,
            title,
            text,
            image_path,
            answer,
        })
    }

    /// Create a text-only puzzle
    pub fn text_only(
        id: i64,
        title: impl Into<String>,
        text: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, PuzzleError> {
        Self::new(id, title, text, None, answer)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Case-insensitive comparison against the expected answer
    pub fn is_correct(&self, candidate: &str) -> bool {
        candidate.to_lowercase() == self.answer.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_text_puzzle() {
        let p = Puzzle::text_only(0, "Echo", "I speak without a mouth.", "echo").unwrap();
        assert_eq!(p.id(), 0);
        assert_eq!(p.title(), "Echo");
        assert!(p.image_path().is_none());
    }

    #[test]
    fn test_negative_id_rejected() {
        let err = Puzzle::text_only(-1, "t", "x", "a").unwrap_err();
        assert_eq!(err, PuzzleError::NegativeId(-1));
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert_eq!(
            Puzzle::text_only(1, "  ", "x", "a").unwrap_err(),
            PuzzleError::Blank("Title")
        );
        assert_eq!(
            Puzzle::text_only(1, "t", "\n\t", "a").unwrap_err(),
            PuzzleError::Blank("Text")
        );
        assert_eq!(
            Puzzle::text_only(1, "t", "x", " ").unwrap_err(),
            PuzzleError::Blank("Answer")
        );
    }

    #[test]
    fn test_missing_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        let err = Puzzle::new(2, "t", "x", Some(missing), "a").unwrap_err();
        assert!(matches!(err, PuzzleError::ImageNotFound(_)));
    }

    #[test]
    fn test_directory_as_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Puzzle::new(2, "t", "x", Some(dir.path().to_path_buf()), "a").unwrap_err();
        assert!(matches!(err, PuzzleError::ImageNotFound(_)));
    }

    #[test]
    fn test_existing_image_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("clue.jpg");
        std::fs::write(&img, [0xFF, 0xD8, 0xFF]).unwrap();
        let p = Puzzle::new(3, "t", "x", Some(img.clone()), "a").unwrap();
        assert_eq!(p.image_path(), Some(img.as_path()));
    }

    #[test]
    fn test_answer_comparison_ignores_case() {
        let p = Puzzle::text_only(4, "t", "x", "Piano").unwrap();
        assert!(p.is_correct("PIANO"));
        assert!(p.is_correct("piano"));
        assert!(!p.is_correct("pianos"));
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<Puzzle>(
            r#"{"id": 5, "title": "", "text": "x", "answer": "a"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Title cannot be empty"));
    }
}
