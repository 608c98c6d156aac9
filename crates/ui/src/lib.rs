#![forbid(unsafe_code)]

pub mod vm;

pub use vm::{
    FeedbackVm, OptionState, OptionVm, QuizVm, SessionSummaryVm, SubjectCardVm, TermCardVm,
    TimerUrgency, TimerVm, map_quiz, map_subject_cards, map_term_cards,
};
