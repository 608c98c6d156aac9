use mcq_core::model::{OptionKey, Question, Term};
use services::{Answer, QuizPlayer};

//
// ─── TIMER ─────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerUrgency {
    Calm,
    Warning,
    Critical,
}

impl TimerUrgency {
    /// More than 10 seconds is calm, more than 5 a warning, otherwise critical.
    #[must_use]
    pub fn from_remaining(seconds: u32) -> Self {
        match seconds {
            11.. => Self::Calm,
            6..=10 => Self::Warning,
            _ => Self::Critical,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub seconds: u32,
    pub label: String,
    pub urgency: TimerUrgency,
}

impl TimerVm {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds,
            label: format!("{seconds}s"),
            urgency: TimerUrgency::from_remaining(seconds),
        }
    }
}

//
// ─── OPTIONS & FEEDBACK ────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Not answered yet; selectable.
    Neutral,
    Correct,
    /// The user's pick, and it was wrong.
    Wrong,
    Dimmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub text: String,
    pub state: OptionState,
}

fn option_state(question: &Question, key: OptionKey, answer: Option<Answer>) -> OptionState {
    let Some(answer) = answer else {
        return OptionState::Neutral;
    };
    if question.is_correct(key) {
        OptionState::Correct
    } else if answer.choice() == Some(key) {
        OptionState::Wrong
    } else {
        OptionState::Dimmed
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub title: &'static str,
    pub timed_out: bool,
    pub explanation: String,
}

impl FeedbackVm {
    fn new(question: &Question, answer: Answer) -> Self {
        let timed_out = answer == Answer::TimedOut;
        Self {
            title: if timed_out { "Time's Up!" } else { "Explanation" },
            timed_out,
            explanation: question.explanation().to_string(),
        }
    }
}

//
// ─── QUIZ CARD ─────────────────────────────────────────────────────────────────
//

/// Everything needed to draw the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub subject: String,
    pub term: Term,
    pub position_label: String,
    pub progress_percent: u32,
    pub correct: u32,
    pub wrong: u32,
    pub timer: TimerVm,
    pub question_text: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
    pub bookmarked: bool,
    pub read_aloud: bool,
    pub auto_play_label: &'static str,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Snapshot the player's current question, or `None` if no quiz is running.
#[must_use]
pub fn map_quiz(player: &QuizPlayer) -> Option<QuizVm> {
    let session = player.session()?;
    let question = session.current_question()?;
    let progress = session.progress();
    let index = progress.position;
    let answer = session.answer_at(index);
    let score = session.score();
    let mode = player.mode();

    let options = question
        .options()
        .iter()
        .map(|(key, text)| OptionVm {
            key: *key,
            text: text.clone(),
            state: option_state(question, *key, answer),
        })
        .collect();

    Some(QuizVm {
        subject: session.subject().to_string(),
        term: session.term(),
        position_label: format!("{} / {}", index + 1, progress.total),
        progress_percent: progress.percent(),
        correct: score.correct,
        wrong: score.wrong,
        timer: TimerVm::new(player.time_left().unwrap_or(0)),
        question_text: question.text().to_string(),
        options,
        feedback: answer.map(|answer| FeedbackVm::new(question, answer)),
        bookmarked: player.is_bookmarked(question.id()),
        read_aloud: mode.read_aloud,
        auto_play_label: if mode.auto_play { "Auto: ON" } else { "Auto: OFF" },
        can_prev: index > 0,
        can_next: index + 1 < progress.total,
    })
}
