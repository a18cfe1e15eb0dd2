use thiserror::Error;

/// Construction-time failures. Player input never produces one of these;
/// malformed actions are rejected through the notifier instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("prompt card pool is empty")]
    EmptyPromptPool,
    #[error("answer card pool is empty")]
    EmptyAnswerPool,
    #[error("invalid deck file: {0}")]
    BadDeckFile(String),
    #[error("option {field} must be at least {minimum}")]
    OptionTooSmall { field: &'static str, minimum: u64 },
}
