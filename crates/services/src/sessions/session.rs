use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;
use std::collections::HashMap;

use mcq_core::model::{OptionKey, Question, Score, SessionSummary, Term};

use super::progress::SessionProgress;
use super::shuffle::shuffle;
use crate::catalog::QuestionCatalog;
use crate::error::SessionError;

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// What was recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Choice(OptionKey),
    TimedOut,
}

impl Answer {
    #[must_use]
    pub fn choice(self) -> Option<OptionKey> {
        match self {
            Answer::Choice(key) => Some(key),
            Answer::TimedOut => None,
        }
    }
}

/// How a recorded answer was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(Verdict),
    /// The index already had an answer; nothing changed.
    AlreadyAnswered,
    /// The question has no option under that key; nothing changed.
    NotAnOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a subject/term: the shuffled active set and everything
/// answered so far.
///
/// Answers are append-only: once an index is answered or timed out it never
/// changes, and each index adds to the score at most once.
#[derive(Debug, Clone)]
pub struct QuizSession {
    subject: String,
    term: Term,
    questions: Vec<Question>,
    current: usize,
    score: Score,
    answers: HashMap<usize, Answer>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session over an already ordered active set.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        term: Term,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            term,
            questions,
            current: 0,
            score: Score::new(),
            answers: HashMap::new(),
            started_at,
        }
    }

    /// Filter the catalog to `subject` and `term` and shuffle the result.
    ///
    /// No match is not an error: the session is simply empty and the caller
    /// should send the user back to term selection.
    pub fn start<R: Rng + ?Sized>(
        catalog: &QuestionCatalog,
        subject: &str,
        term: Term,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let pool = catalog.questions_for(subject, term);
        let questions = shuffle(&pool, rng);
        debug!(
            "[Session] Started {subject} {term} with {} questions.",
            questions.len()
        );
        Self::new(subject, term, questions, started_at)
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn term(&self) -> Term {
        self.term
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<Answer> {
        self.answers.get(&index).copied()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    #[must_use]
    pub fn is_timed_out(&self, index: usize) -> bool {
        matches!(self.answers.get(&index), Some(Answer::TimedOut))
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn timed_out_count(&self) -> usize {
        self.answers
            .values()
            .filter(|answer| matches!(answer, Answer::TimedOut))
            .count()
    }

    /// True once every question in a non-empty set has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.answers.len() == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.current,
            total: self.len(),
            answered: self.answered_count(),
            unanswered: self.len().saturating_sub(self.answered_count()),
            is_complete: self.is_complete(),
        }
    }

    /// Record an answer for `index`; `None` means the countdown ran out.
    ///
    /// Answering an index twice is a no-op that reports
    /// `SubmitOutcome::AlreadyAnswered`, so a late timeout cannot override a
    /// manual answer and vice versa. A key the question does not offer is
    /// rejected with `SubmitOutcome::NotAnOption`, which leaves a question
    /// without options open until it times out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` if `index` is not in the active set.
    pub fn submit_answer(
        &mut self,
        index: usize,
        choice: Option<OptionKey>,
    ) -> Result<SubmitOutcome, SessionError> {
        let Some(question) = self.questions.get(index) else {
            return Err(SessionError::OutOfRange {
                index,
                len: self.questions.len(),
            });
        };
        if self.answers.contains_key(&index) {
            return Ok(SubmitOutcome::AlreadyAnswered);
        }

        let verdict = match choice {
            None => {
                self.answers.insert(index, Answer::TimedOut);
                self.score.record_wrong();
                Verdict::TimedOut
            }
            Some(key) if question.option(key).is_none() => {
                return Ok(SubmitOutcome::NotAnOption);
            }
            Some(key) => {
                let correct = question.is_correct(key);
                self.answers.insert(index, Answer::Choice(key));
                if correct {
                    self.score.record_correct();
                    Verdict::Correct
                } else {
                    self.score.record_wrong();
                    Verdict::Wrong
                }
            }
        };

        debug!("[Session] Question {index} -> {verdict:?}");
        Ok(SubmitOutcome::Recorded(verdict))
    }

    /// Move one question forward or back. Returns `false` at either end.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Forward if self.current + 1 < self.questions.len() => self.current + 1,
            Direction::Backward if self.current > 0 => self.current - 1,
            _ => return false,
        };
        self.current = target;
        true
    }

    /// Summarize the attempt as of `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if `completed_at` precedes the start.
    pub fn summary(&self, completed_at: DateTime<Utc>) -> Result<SessionSummary, SessionError> {
        let total = u32::try_from(self.len()).unwrap_or(u32::MAX);
        let timed_out = u32::try_from(self.timed_out_count()).unwrap_or(u32::MAX);
        Ok(SessionSummary::new(
            self.subject.clone(),
            self.term,
            self.started_at,
            completed_at,
            total,
            self.score,
            timed_out,
        )?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BANK: &str = "
Subject: CS101 | Term: Midterm |
Question: Input device? | Options: A) Monitor B) Printer C) Keyboard D) Speaker | Correct Answer: C | Explanation: Keyboards take input. |
Question: CPU? | Options: A) Central Process Unit B) Central Processing Unit C) Computer Processing Unit D) Central Processor Unit | Correct Answer: B | Explanation: Central Processing Unit. |
Question: Volatile memory? | Options: A) ROM B) HDD C) RAM D) Flash Drive | Correct Answer: C | Explanation: RAM. |
Subject: CS101 | Term: Final |
Question: Binary of 5? | Options: A) 100 B) 101 C) 110 D) 111 | Correct Answer: B | Explanation: 101. |
";

    fn session() -> QuizSession {
        let catalog = QuestionCatalog::from_text(BANK);
        let mut rng = StdRng::seed_from_u64(11);
        QuizSession::start(&catalog, "CS101", Term::Midterm, fixed_now(), &mut rng)
    }

    fn wrong_key(question: &Question) -> OptionKey {
        OptionKey::ALL
            .into_iter()
            .find(|key| *key != question.answer())
            .unwrap()
    }

    #[test]
    fn start_filters_by_subject_and_term() {
        let session = session();

        assert_eq!(session.len(), 3);
        assert!(session
            .questions()
            .iter()
            .all(|q| q.subject() == "CS101" && q.term() == Term::Midterm));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn start_without_matches_is_empty() {
        let catalog = QuestionCatalog::from_text(BANK);
        let mut rng = StdRng::seed_from_u64(3);

        let session = QuizSession::start(&catalog, "ENG101", Term::Final, fixed_now(), &mut rng);

        assert!(session.is_empty());
        assert!(session.current_question().is_none());
        assert!(!session.is_complete());
    }

    #[test]
    fn correct_answer_scores_once() {
        let mut session = session();
        let key = session.question(0).unwrap().answer();

        let outcome = session.submit_answer(0, Some(key)).unwrap();

        assert_eq!(outcome, SubmitOutcome::Recorded(Verdict::Correct));
        assert_eq!(session.score(), Score { correct: 1, wrong: 0 });
        assert_eq!(session.answer_at(0), Some(Answer::Choice(key)));
    }

    #[test]
    fn second_answer_is_a_no_op() {
        let mut session = session();
        let question = session.question(1).unwrap().clone();
        let wrong = wrong_key(&question);

        session.submit_answer(1, Some(wrong)).unwrap();
        let outcome = session.submit_answer(1, Some(question.answer())).unwrap();

        assert_eq!(outcome, SubmitOutcome::AlreadyAnswered);
        assert_eq!(session.score(), Score { correct: 0, wrong: 1 });
        assert_eq!(session.answer_at(1), Some(Answer::Choice(wrong)));
    }

    #[test]
    fn timeout_counts_wrong_and_blocks_manual_answer() {
        let mut session = session();
        let key = session.question(2).unwrap().answer();

        let outcome = session.submit_answer(2, None).unwrap();
        assert_eq!(outcome, SubmitOutcome::Recorded(Verdict::TimedOut));
        assert_eq!(session.score().wrong, 1);
        assert!(session.is_timed_out(2));

        let retry = session.submit_answer(2, Some(key)).unwrap();
        assert_eq!(retry, SubmitOutcome::AlreadyAnswered);
        assert_eq!(session.score(), Score { correct: 0, wrong: 1 });
        assert_eq!(session.answer_at(2), Some(Answer::TimedOut));
    }

    #[test]
    fn keys_outside_the_options_are_refused() {
        let catalog = QuestionCatalog::from_text(
            "Subject: MGT211 | Term: Midterm |
Question: Father of management? | Options: Taylor, Fayol | Correct Answer: A | Explanation: Fayol. |
Question: Plan first? | Options: A) Yes B) No | Correct Answer: A | Explanation: Planning comes first. |",
        );
        let mut session = QuizSession::new(
            "MGT211",
            Term::Midterm,
            catalog.questions().to_vec(),
            fixed_now(),
        );

        assert_eq!(
            session.submit_answer(0, Some(OptionKey::A)).unwrap(),
            SubmitOutcome::NotAnOption
        );
        assert_eq!(
            session.submit_answer(1, Some(OptionKey::D)).unwrap(),
            SubmitOutcome::NotAnOption
        );
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.answered_count(), 0);

        let late = session.submit_answer(0, None).unwrap();
        assert_eq!(late, SubmitOutcome::Recorded(Verdict::TimedOut));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut session = session();

        let err = session.submit_answer(9, None).unwrap_err();

        assert!(matches!(err, SessionError::OutOfRange { index: 9, len: 3 }));
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn advance_is_clamped_at_both_ends() {
        let mut session = session();

        assert!(!session.advance(Direction::Backward));
        assert!(session.advance(Direction::Forward));
        assert!(session.advance(Direction::Forward));
        assert!(!session.advance(Direction::Forward));
        assert_eq!(session.current_index(), 2);
        assert!(session.advance(Direction::Backward));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn summary_reflects_answers() {
        let mut session = session();
        let key = session.question(0).unwrap().answer();
        session.submit_answer(0, Some(key)).unwrap();
        session.submit_answer(1, None).unwrap();

        let summary = session
            .summary(fixed_now() + chrono::Duration::seconds(40))
            .unwrap();

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.score(), Score { correct: 1, wrong: 1 });
        assert_eq!(summary.timed_out(), 1);
        assert_eq!(summary.unanswered(), 1);
        assert_eq!(session.progress().answered, 2);
    }
}
