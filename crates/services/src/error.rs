//! Shared error types for the services crate.

use thiserror::Error;

use mcq_core::model::SessionSummaryError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode preference: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question index {index} is outside the active set of {len}")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

/// Errors emitted by `QuizPlayer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("no quiz is in progress")]
    NoSession,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("the question bank contains no usable questions")]
    EmptyBank,
}
