mod progress;
mod scheduler;
mod session;
pub mod shuffle;
mod timer;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{Answer, Direction, QuizSession, SubmitOutcome, Verdict};
pub use shuffle::shuffle;
pub use timer::{QUESTION_TIME_LIMIT, QuestionTimer, QuizTask};
