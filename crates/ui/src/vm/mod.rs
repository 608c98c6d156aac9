mod quiz_vm;
mod subject_vm;
mod summary_vm;
mod time_fmt;

pub use quiz_vm::{FeedbackVm, OptionState, OptionVm, QuizVm, TimerUrgency, TimerVm, map_quiz};
pub use subject_vm::{SubjectCardVm, TermCardVm, map_subject_cards, map_term_cards};
pub use summary_vm::SessionSummaryVm;
pub use time_fmt::{format_datetime, format_elapsed};
