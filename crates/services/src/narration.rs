//! Spoken narration of questions and answer feedback.
//!
//! The player never waits on speech. Each utterance gets a ticket; the engine
//! reports completion by ticket and the narrator only honours the ticket it is
//! currently waiting for.

use log::debug;

use mcq_core::model::Question;

use crate::sessions::Verdict;

/// Playback rate for every utterance.
pub const SPEECH_RATE: f32 = 1.1;

/// Identifies one utterance so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceTicket(u64);

impl UtteranceTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub ticket: UtteranceTicket,
    pub text: String,
    pub rate: f32,
}

/// What an engine did with an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Playing; completion arrives later through `QuizPlayer::narration_finished`.
    Pending,
    /// Already done (nothing to play).
    Finished,
}

/// Platform speech capability.
pub trait SpeechEngine: Send {
    /// Start speaking. The engine must have stopped any earlier utterance.
    fn speak(&mut self, utterance: Utterance) -> Playback;

    /// Stop whatever is playing. A cancelled utterance must not report completion.
    fn cancel(&mut self);
}

/// Engine that plays nothing and finishes every utterance at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl SpeechEngine for SilentSpeech {
    fn speak(&mut self, _utterance: Utterance) -> Playback {
        Playback::Finished
    }

    fn cancel(&mut self) {}
}

/// Which narration features are switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NarrationMode {
    pub read_aloud: bool,
    pub auto_play: bool,
}

impl NarrationMode {
    /// Narration only happens when at least one feature is on.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.read_aloud || self.auto_play
    }
}

/// Work to do once an utterance finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    AutoAdvance,
}

/// Result of [`Narrator::speak`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spoken {
    /// Narration is off; nothing was said.
    Skipped,
    Playing(UtteranceTicket),
    /// The engine finished synchronously; run the follow-up now.
    Finished(FollowUp),
}

pub struct Narrator {
    engine: Box<dyn SpeechEngine>,
    mode: NarrationMode,
    rate: f32,
    next_ticket: u64,
    pending: Option<(UtteranceTicket, FollowUp)>,
}

impl Narrator {
    #[must_use]
    pub fn new(engine: Box<dyn SpeechEngine>, mode: NarrationMode, rate: f32) -> Self {
        Self {
            engine,
            mode,
            rate,
            next_ticket: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> NarrationMode {
        self.mode
    }

    pub fn set_read_aloud(&mut self, enabled: bool) {
        self.mode.read_aloud = enabled;
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.mode.auto_play = enabled;
    }

    /// True while an utterance is playing and its completion is awaited.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace whatever is playing with `text`.
    pub fn speak(&mut self, text: impl Into<String>, follow_up: FollowUp) -> Spoken {
        if !self.mode.is_active() {
            return Spoken::Skipped;
        }
        self.stop();

        self.next_ticket += 1;
        let ticket = UtteranceTicket(self.next_ticket);
        let utterance = Utterance {
            ticket,
            text: text.into(),
            rate: self.rate,
        };

        match self.engine.speak(utterance) {
            Playback::Finished => Spoken::Finished(follow_up),
            Playback::Pending => {
                self.pending = Some((ticket, follow_up));
                Spoken::Playing(ticket)
            }
        }
    }

    /// Cancel playback and forget the pending follow-up.
    pub fn stop(&mut self) {
        self.pending = None;
        self.engine.cancel();
    }

    /// Completion report from the engine. Returns the follow-up only for the
    /// utterance currently awaited.
    pub fn finished(&mut self, ticket: UtteranceTicket) -> Option<FollowUp> {
        match self.pending {
            Some((awaited, follow_up)) if awaited == ticket => {
                self.pending = None;
                Some(follow_up)
            }
            _ => {
                debug!("[Narration] Ignoring stale completion {}", ticket.value());
                None
            }
        }
    }
}

//
// ─── TEXT ──────────────────────────────────────────────────────────────────────
//

/// `A, Monitor. B, Printer. ...`
#[must_use]
pub fn options_text(question: &Question) -> String {
    question
        .options()
        .iter()
        .map(|(key, text)| format!("{key}, {text}"))
        .collect::<Vec<_>>()
        .join(". ")
}

/// Read when a question becomes current. `position` is zero-based.
#[must_use]
pub fn question_prompt(position: usize, question: &Question) -> String {
    format!(
        "Question {}: {}. {}",
        position + 1,
        question.text(),
        options_text(question)
    )
}

/// Read when read-aloud is switched on mid-question.
#[must_use]
pub fn read_aloud_prompt(question: &Question) -> String {
    format!("{}. Options: {}", question.text(), options_text(question))
}

#[must_use]
pub fn answer_feedback(question: &Question, verdict: Verdict) -> String {
    let lead = match verdict {
        Verdict::Correct => "Correct!".to_string(),
        Verdict::Wrong => format!("Incorrect. The answer is {}.", question.answer()),
        Verdict::TimedOut => format!("Time is up. The correct answer is {}.", question.answer()),
    };
    format!("{lead} {}", question.explanation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use mcq_core::parse_questions;

    #[derive(Clone, Default)]
    struct Recording {
        spoken: Arc<Mutex<Vec<Utterance>>>,
        cancels: Arc<Mutex<usize>>,
    }

    impl SpeechEngine for Recording {
        fn speak(&mut self, utterance: Utterance) -> Playback {
            self.spoken.lock().unwrap().push(utterance);
            Playback::Pending
        }

        fn cancel(&mut self) {
            *self.cancels.lock().unwrap() += 1;
        }
    }

    fn question() -> Question {
        parse_questions(
            "Subject: CS101 | Term: Midterm |
Question: Which memory is volatile? | Options: A) ROM B) HDD C) RAM D) Flash Drive | Correct Answer: C | Explanation: RAM loses data without power. |",
        )
        .remove(0)
    }

    fn narrator(mode: NarrationMode) -> (Narrator, Recording) {
        let engine = Recording::default();
        (
            Narrator::new(Box::new(engine.clone()), mode, SPEECH_RATE),
            engine,
        )
    }

    const READ_ALOUD: NarrationMode = NarrationMode {
        read_aloud: true,
        auto_play: false,
    };

    #[test]
    fn inactive_mode_says_nothing() {
        let (mut narrator, engine) = narrator(NarrationMode::default());

        assert_eq!(narrator.speak("hello", FollowUp::None), Spoken::Skipped);
        assert!(engine.spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn speak_cancels_previous_and_uses_rate() {
        let (mut narrator, engine) = narrator(READ_ALOUD);

        narrator.speak("one", FollowUp::None);
        narrator.speak("two", FollowUp::AutoAdvance);

        let spoken = engine.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "two");
        assert!((spoken[1].rate - SPEECH_RATE).abs() < f32::EPSILON);
        assert_eq!(*engine.cancels.lock().unwrap(), 2);
    }

    #[test]
    fn only_current_ticket_yields_follow_up() {
        let (mut narrator, _engine) = narrator(READ_ALOUD);

        let Spoken::Playing(first) = narrator.speak("one", FollowUp::AutoAdvance) else {
            panic!("expected playback");
        };
        let Spoken::Playing(second) = narrator.speak("two", FollowUp::AutoAdvance) else {
            panic!("expected playback");
        };

        assert_eq!(narrator.finished(first), None);
        assert!(narrator.is_speaking());
        assert_eq!(narrator.finished(second), Some(FollowUp::AutoAdvance));
        assert_eq!(narrator.finished(second), None);
    }

    #[test]
    fn stop_forgets_follow_up() {
        let (mut narrator, _engine) = narrator(READ_ALOUD);
        let Spoken::Playing(ticket) = narrator.speak("one", FollowUp::AutoAdvance) else {
            panic!("expected playback");
        };

        narrator.stop();

        assert!(!narrator.is_speaking());
        assert_eq!(narrator.finished(ticket), None);
    }

    #[test]
    fn silent_engine_finishes_immediately() {
        let mut narrator = Narrator::new(
            Box::new(SilentSpeech),
            NarrationMode {
                read_aloud: false,
                auto_play: true,
            },
            SPEECH_RATE,
        );

        assert_eq!(
            narrator.speak("done", FollowUp::AutoAdvance),
            Spoken::Finished(FollowUp::AutoAdvance)
        );
    }

    #[test]
    fn prompts_list_options_in_order() {
        let question = question();

        assert_eq!(
            question_prompt(2, &question),
            "Question 3: Which memory is volatile?. A, ROM. B, HDD. C, RAM. D, Flash Drive"
        );
        assert_eq!(
            read_aloud_prompt(&question),
            "Which memory is volatile?. Options: A, ROM. B, HDD. C, RAM. D, Flash Drive"
        );
    }

    #[test]
    fn feedback_differs_by_verdict() {
        let question = question();

        assert_eq!(
            answer_feedback(&question, Verdict::Correct),
            "Correct! RAM loses data without power."
        );
        assert_eq!(
            answer_feedback(&question, Verdict::Wrong),
            "Incorrect. The answer is C. RAM loses data without power."
        );
        assert_eq!(
            answer_feedback(&question, Verdict::TimedOut),
            "Time is up. The correct answer is C. RAM loses data without power."
        );
    }
}
