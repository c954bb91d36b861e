//! Answer extraction from free-form model output

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("No answer found in response")]
    NotFound,
}

fn answer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<answer>(.*?)</answer>").expect("answer pattern is valid"))
}

/// Return the contents of the first `<answer>...</answer>` span, untrimmed.
///
/// The span must sit on a single line.
pub fn extract_answer(response: &str) -> Result<String, ExtractError> {
    answer_pattern()
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ExtractError::NotFound)
}
