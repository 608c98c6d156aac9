mod bookmarks;
mod ids;
mod question;
mod score;
mod session;
mod term;
mod theme;

pub use bookmarks::Bookmarks;
pub use ids::QuestionId;
pub use question::{
    OptionKey, OptionKeyError, Question, QuestionDraft, QuestionError, ValidatedQuestion,
};
pub use score::Score;
pub use session::{SessionSummary, SessionSummaryError};
pub use term::{Term, TermError};
pub use theme::Theme;
