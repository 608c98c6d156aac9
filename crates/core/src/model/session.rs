use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Score, Term};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answered ({answered}) exceeds total questions ({total})")]
    CountMismatch { total: u32, answered: u32 },

    #[error("timed out ({timed_out}) exceeds wrong answers ({wrong})")]
    TimeoutMismatch { wrong: u32, timed_out: u32 },
}

/// Aggregate result of one subject/term attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    subject: String,
    term: Term,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total: u32,
    score: Score,
    timed_out: u32,
}

impl SessionSummary {
    /// Build a summary from the final score of a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionSummaryError::CountMismatch` if more answers than questions were scored.
    /// Returns `SessionSummaryError::TimeoutMismatch` if timeouts exceed wrong answers.
    pub fn new(
        subject: impl Into<String>,
        term: Term,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total: u32,
        score: Score,
        timed_out: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let answered = score.answered();
        if answered > total {
            return Err(SessionSummaryError::CountMismatch { total, answered });
        }
        if timed_out > score.wrong {
            return Err(SessionSummaryError::TimeoutMismatch {
                wrong: score.wrong,
                timed_out,
            });
        }

        Ok(Self {
            subject: subject.into(),
            term,
            started_at,
            completed_at,
            total,
            score,
            timed_out,
        })
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
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn timed_out(&self) -> u32 {
        self.timed_out
    }

    #[must_use]
    pub fn unanswered(&self) -> u32 {
        self.total.saturating_sub(self.score.answered())
    }

    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_counts_unanswered() {
        let now = fixed_now();
        let score = Score {
            correct: 2,
            wrong: 1,
        };

        let summary = SessionSummary::new(
            "CS101",
            Term::Midterm,
            now,
            now + chrono::Duration::seconds(95),
            5,
            score,
            1,
        )
        .unwrap();

        assert_eq!(summary.unanswered(), 2);
        assert_eq!(summary.timed_out(), 1);
        assert_eq!(summary.elapsed().num_seconds(), 95);
    }

    #[test]
    fn summary_rejects_more_answers_than_questions() {
        let now = fixed_now();
        let score = Score {
            correct: 2,
            wrong: 2,
        };

        let err = SessionSummary::new("CS101", Term::Final, now, now, 3, score, 0).unwrap_err();
        assert_eq!(
            err,
            SessionSummaryError::CountMismatch {
                total: 3,
                answered: 4
            }
        );
    }
}
