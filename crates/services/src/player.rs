use log::{debug, warn};
use rand::Rng;

use mcq_core::Clock;
use mcq_core::model::{Bookmarks, OptionKey, Question, QuestionId, SessionSummary, Term, Theme};

use crate::catalog::QuestionCatalog;
use crate::error::PlayerError;
use crate::narration::{
    FollowUp, NarrationMode, Narrator, SPEECH_RATE, SpeechEngine, Spoken, UtteranceTicket,
    answer_feedback, question_prompt, read_aloud_prompt,
};
use crate::preferences::PreferencesService;
use crate::sessions::{
    Direction, QUESTION_TIME_LIMIT, QuestionTimer, QuizSession, QuizTask, Scheduler,
    SubmitOutcome, TaskHandle, Verdict,
};

/// Ticks between the end of feedback narration and the automatic move forward.
pub const AUTO_ADVANCE_DELAY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    pub time_limit: u32,
    pub auto_advance_delay: u32,
    pub speech_rate: f32,
    pub mode: NarrationMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            time_limit: QUESTION_TIME_LIMIT,
            auto_advance_delay: AUTO_ADVANCE_DELAY,
            speech_rate: SPEECH_RATE,
            mode: NarrationMode::default(),
        }
    }
}

/// Something that happened during one [`QuizPlayer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Countdown { index: usize, remaining: u32 },
    TimedOut { index: usize },
    Advanced { index: usize },
}

//
// ─── PLAYER ────────────────────────────────────────────────────────────────────
//

/// Drives one quiz at a time: session, countdown, narration and preferences.
///
/// The owner feeds it ticks, commands and narration completions from a single
/// loop. Every transition that ends a question's live period cancels its timer,
/// narration and pending auto-advance before the next question's are created.
pub struct QuizPlayer {
    catalog: QuestionCatalog,
    preferences: PreferencesService,
    config: PlayerConfig,
    clock: Clock,
    session: Option<QuizSession>,
    scheduler: Scheduler<QuizTask>,
    timer: Option<QuestionTimer>,
    auto_advance: Option<TaskHandle>,
    time_left: u32,
    narrator: Narrator,
    bookmarks: Bookmarks,
    theme: Theme,
}

impl QuizPlayer {
    /// Build a player, reading bookmarks and theme once.
    ///
    /// Unreadable preferences fall back to defaults.
    pub async fn load(
        catalog: QuestionCatalog,
        preferences: PreferencesService,
        engine: Box<dyn SpeechEngine>,
        config: PlayerConfig,
        clock: Clock,
    ) -> Self {
        let bookmarks = preferences.load_bookmarks().await.unwrap_or_else(|err| {
            warn!("[Prefs] Could not load bookmarks: {err}");
            Bookmarks::new()
        });
        let theme = preferences.load_theme().await.unwrap_or_else(|err| {
            warn!("[Prefs] Could not load theme: {err}");
            Theme::default()
        });

        Self {
            catalog,
            preferences,
            config,
            clock,
            session: None,
            scheduler: Scheduler::new(),
            timer: None,
            auto_advance: None,
            time_left: config.time_limit,
            narrator: Narrator::new(engine, config.mode, config.speech_rate),
            bookmarks,
            theme,
        }
    }

    // ─── accessors ───

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> PlayerConfig {
        self.config
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.current_question()
    }

    /// Seconds shown on the countdown: live while unanswered, frozen once
    /// answered, zero after a timeout.
    #[must_use]
    pub fn time_left(&self) -> Option<u32> {
        self.session.as_ref().map(|_| self.time_left)
    }

    #[must_use]
    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    #[must_use]
    pub fn is_bookmarked(&self, id: &QuestionId) -> bool {
        self.bookmarks.contains(id)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn mode(&self) -> NarrationMode {
        self.narrator.mode()
    }

    #[must_use]
    pub fn is_auto_advance_pending(&self) -> bool {
        self.auto_advance
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    // ─── quiz lifecycle ───

    /// Start a shuffled quiz for `subject` and `term`. Returns the number of
    /// questions; zero means nothing matched and no quiz is running.
    pub fn start(&mut self, subject: &str, term: Term) -> usize {
        self.start_with_rng(subject, term, &mut rand::rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        subject: &str,
        term: Term,
        rng: &mut R,
    ) -> usize {
        self.halt();
        let session = QuizSession::start(&self.catalog, subject, term, self.clock.now(), rng);
        if session.is_empty() {
            debug!("[Session] No questions for {subject} {term}.");
            self.session = None;
            return 0;
        }

        let len = session.len();
        self.session = Some(session);
        self.enter_question();
        len
    }

    /// Discard the running quiz and return its summary.
    pub fn leave(&mut self) -> Option<SessionSummary> {
        self.halt();
        let session = self.session.take()?;
        match session.summary(self.clock.now()) {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!("[Session] Could not summarize session: {err}");
                None
            }
        }
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NoSession` if no quiz is running.
    pub fn answer(&mut self, key: OptionKey) -> Result<SubmitOutcome, PlayerError> {
        let session = self.session.as_mut().ok_or(PlayerError::NoSession)?;
        let index = session.current_index();
        let outcome = session.submit_answer(index, Some(key))?;

        if let SubmitOutcome::Recorded(verdict) = outcome {
            if let Some(timer) = self.timer.take() {
                if let Some(left) = timer.cancel(&mut self.scheduler) {
                    self.time_left = left;
                }
            }
            self.narrate_feedback(index, verdict);
        }
        Ok(outcome)
    }

    /// Advance time by one second.
    pub fn tick(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.session.is_none() {
            return events;
        }

        for task in self.scheduler.tick() {
            match task {
                QuizTask::Timeout { index } => {
                    if let Some(event) = self.on_timeout(index) {
                        events.push(event);
                    }
                }
                QuizTask::AutoAdvance => {
                    self.auto_advance = None;
                    if self.step(Direction::Forward) {
                        let index = self.current_index();
                        events.push(PlayerEvent::Advanced { index });
                    }
                }
            }
        }

        if let Some(timer) = self.timer {
            if let Some(remaining) = timer.time_left(&self.scheduler) {
                self.time_left = remaining;
                events.push(PlayerEvent::Countdown {
                    index: timer.index(),
                    remaining,
                });
            }
        }
        events
    }

    /// # Errors
    ///
    /// Returns `PlayerError::NoSession` if no quiz is running.
    pub fn next(&mut self) -> Result<bool, PlayerError> {
        self.require_session()?;
        Ok(self.step(Direction::Forward))
    }

    /// # Errors
    ///
    /// Returns `PlayerError::NoSession` if no quiz is running.
    pub fn previous(&mut self) -> Result<bool, PlayerError> {
        self.require_session()?;
        Ok(self.step(Direction::Backward))
    }

    /// Completion report from the speech engine.
    pub fn narration_finished(&mut self, ticket: UtteranceTicket) {
        if let Some(follow_up) = self.narrator.finished(ticket) {
            self.follow_up(follow_up);
        }
    }

    // ─── toggles ───

    /// Flip the bookmark on the current question and persist the set.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NoSession` if no quiz is running.
    pub async fn toggle_bookmark(&mut self) -> Result<bool, PlayerError> {
        let id = self
            .current_question()
            .map(|question| question.id().clone())
            .ok_or(PlayerError::NoSession)?;

        let bookmarked = self.bookmarks.toggle(&id);
        if let Err(err) = self.preferences.save_bookmarks(&self.bookmarks).await {
            warn!("[Prefs] Could not save bookmarks: {err}");
        }
        Ok(bookmarked)
    }

    pub async fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(err) = self.preferences.save_theme(self.theme).await {
            warn!("[Prefs] Could not save theme: {err}");
        }
        self.theme
    }

    /// Switch read-aloud. Turning it on reads the current question; turning it
    /// off silences narration.
    pub fn toggle_read_aloud(&mut self) -> bool {
        let enabled = !self.narrator.mode().read_aloud;
        if enabled {
            self.narrator.set_read_aloud(true);
            if let Some(question) = self.current_question() {
                let text = read_aloud_prompt(question);
                let spoken = self.narrator.speak(text, FollowUp::None);
                self.handle_spoken(spoken);
            }
        } else {
            self.silence();
            self.narrator.set_read_aloud(false);
        }
        enabled
    }

    /// Switch auto-play. Always silences narration first.
    pub fn toggle_auto_play(&mut self) -> bool {
        self.silence();
        let enabled = !self.narrator.mode().auto_play;
        self.narrator.set_auto_play(enabled);
        self.narrate_question();
        enabled
    }

    // ─── internals ───

    fn require_session(&self) -> Result<(), PlayerError> {
        self.session.as_ref().map(|_| ()).ok_or(PlayerError::NoSession)
    }

    fn current_index(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, QuizSession::current_index)
    }

    /// Cancel every pending task and any narration.
    fn halt(&mut self) {
        self.narrator.stop();
        self.scheduler.cancel_all();
        self.timer = None;
        self.auto_advance = None;
    }

    /// Stop narration and drop a scheduled auto-advance.
    fn silence(&mut self) {
        self.narrator.stop();
        if let Some(handle) = self.auto_advance.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn step(&mut self, direction: Direction) -> bool {
        self.silence();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.advance(direction) {
            return false;
        }

        if let Some(timer) = self.timer.take() {
            timer.cancel(&mut self.scheduler);
        }
        self.enter_question();
        true
    }

    /// Set up the countdown and narration for the new current question.
    fn enter_question(&mut self) {
        self.time_left = self.config.time_limit;
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let index = session.current_index();
        if session.is_answered(index) {
            return;
        }

        self.timer = Some(QuestionTimer::start(
            &mut self.scheduler,
            index,
            self.config.time_limit,
        ));
        self.narrate_question();
    }

    fn narrate_question(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let index = session.current_index();
        if session.is_answered(index) {
            return;
        }
        let Some(question) = session.current_question() else {
            return;
        };

        let text = question_prompt(index, question);
        let spoken = self.narrator.speak(text, FollowUp::None);
        self.handle_spoken(spoken);
    }

    fn narrate_feedback(&mut self, index: usize, verdict: Verdict) {
        let Some(question) = self.session.as_ref().and_then(|s| s.question(index)) else {
            return;
        };
        let text = answer_feedback(question, verdict);
        let spoken = self.narrator.speak(text, FollowUp::AutoAdvance);
        self.handle_spoken(spoken);
    }

    fn on_timeout(&mut self, index: usize) -> Option<PlayerEvent> {
        if self.timer.map(|timer| timer.index()) != Some(index) {
            return None;
        }
        self.timer = None;

        let session = self.session.as_mut()?;
        match session.submit_answer(index, None) {
            Ok(SubmitOutcome::Recorded(verdict)) => {
                self.time_left = 0;
                self.narrate_feedback(index, verdict);
                Some(PlayerEvent::TimedOut { index })
            }
            Ok(SubmitOutcome::AlreadyAnswered | SubmitOutcome::NotAnOption) => None,
            Err(err) => {
                warn!("[Session] Timeout for {index} rejected: {err}");
                None
            }
        }
    }

    fn handle_spoken(&mut self, spoken: Spoken) {
        if let Spoken::Finished(follow_up) = spoken {
            self.follow_up(follow_up);
        }
    }

    fn follow_up(&mut self, follow_up: FollowUp) {
        if follow_up != FollowUp::AutoAdvance || !self.narrator.mode().auto_play {
            return;
        }
        if let Some(handle) = self.auto_advance.take() {
            self.scheduler.cancel(handle);
        }
        self.auto_advance = Some(
            self.scheduler
                .schedule(self.config.auto_advance_delay, QuizTask::AutoAdvance),
        );
    }
}
