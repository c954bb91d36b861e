//! Built-in puzzle catalog

use super::{Puzzle, PuzzleError};

/// (title, text, answer) for each built-in puzzle, in catalog order
const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "Keys Without Locks",
        "What has keys but can't open locks, and makes music when you press them?",
        "piano",
    ),
    (
        "Trail Behind",
        "The more of these you take, the more you leave behind. What are they?",
        "footsteps",
    ),
    (
        "Broken First",
        "What has to be broken before you can use it?",
        "egg",
    ),
    (
        "Voice of the Hills",
        "I speak without a mouth and hear without ears. I have no body, but I come alive with wind. What am I?",
        "echo",
    ),
    (
        "Hands and Face",
        "I have hands but cannot clap, and a face but no eyes. What am I?",
        "clock",
    ),
    (
        "Rising Never Falling",
        "What goes up every year but never comes down?",
        "age",
    ),
];

/// Build the built-in catalog. Ids are assigned from 1 in catalog order.
pub fn builtin_puzzles() -> Result<Vec<Puzzle>, PuzzleError> {
    BUILTIN
        .iter()
        .zip(1..)
        .map(|(&(title, text, answer), id)| Puzzle::text_only(id, title, text, answer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let puzzles = builtin_puzzles().unwrap();
        assert_eq!(puzzles.len(), BUILTIN.len());

        let ids: HashSet<i64> = puzzles.iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), puzzles.len());

        for p in &puzzles {
            assert!(!p.answer().contains(char::is_whitespace), "{}", p.title());
        }
    }
}
