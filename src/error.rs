//! Error types for classmark operations.

use thiserror::Error;

/// Errors that can occur while loading course data, exporting results or
/// scoring quizzes.
///
/// Rendering markdown never fails; see [`crate::markdown::render`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Subject must not be empty")]
    EmptySubject,

    #[error("Incomplete quiz: {answered} of {total} questions answered")]
    IncompleteQuiz { answered: usize, total: usize },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;
