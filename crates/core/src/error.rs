use thiserror::Error;

use crate::model::{OptionKeyError, QuestionError, SessionSummaryError, TermError};

/// Any validation failure raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Term(#[from] TermError),
    #[error(transparent)]
    OptionKey(#[from] OptionKeyError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
