//! Puzzle catalog loading from JSON files

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{Puzzle, PuzzleError};

/// Error type for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Puzzle {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: PuzzleError,
    },

    #[error("Duplicate puzzle id {id} at index {index}")]
    DuplicateId { id: i64, index: usize },
}

/// Top-level JSON catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[allow(dead_code)]
    #[serde(default)]
    description: Option<String>,
    puzzles: Vec<PuzzleDefinition>,
}

/// A single puzzle entry, validated only when converted
#[derive(Debug, Deserialize)]
struct PuzzleDefinition {
    id: i64,
    title: String,
    text: String,
    /// Relative to the catalog file's directory
    #[serde(default)]
    image_path: Option<String>,
    answer: String,
}

impl PuzzleDefinition {
    fn into_puzzle(self, base_dir: &Path) -> Result<Puzzle, PuzzleError> {
        let image_path = self.image_path.map(|p| {
            let p = PathBuf::from(p);
            if p.is_absolute() {
                p
            } else {
                base_dir.join(p)
            }
        });
        Puzzle::new(self.id, self.title, self.text, image_path, self.answer)
    }
}

/// Load a puzzle catalog from a JSON file.
///
/// Image paths are resolved relative to the file's parent directory.
pub fn load_puzzles_from_json_file(path: impl AsRef<Path>) -> Result<Vec<Puzzle>, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    load_puzzles_from_json_str(&content, base_dir)
}

/// Load a puzzle catalog from a JSON string
pub fn load_puzzles_from_json_str(content: &str, base_dir: &Path) -> Result<Vec<Puzzle>, LoadError> {
    let file: CatalogFile = serde_json::from_str(content)
        .map_err(|e| LoadError::Parse(format!("JSON parse error: {}", e)))?;

    let puzzles = file
        .puzzles
        .into_iter()
        .enumerate()
        .map(|(index, def)| {
            def.into_puzzle(base_dir)
                .map_err(|source| LoadError::Invalid { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for (index, puzzle) in puzzles.iter().enumerate() {
        if !seen.insert(puzzle.id()) {
            return Err(LoadError::DuplicateId {
                id: puzzle.id(),
                index,
            });
        }
    }

    tracing::debug!("Loaded {} puzzles", puzzles.len());
    Ok(puzzles)
}
