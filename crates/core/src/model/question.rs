use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{QuestionId, Term};

//
// ─── OPTION KEYS ───────────────────────────────────────────────────────────────
//

/// Letter labelling one answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    /// Maps a letter (either case) to its key.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not an option letter: {raw:?}")]
pub struct OptionKeyError {
    pub raw: String,
}

impl FromStr for OptionKey {
    type Err = OptionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch).ok_or_else(|| OptionKeyError {
                raw: trimmed.to_string(),
            }),
            _ => Err(OptionKeyError {
                raw: trimmed.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Question fields as extracted from the bank, before the answer key is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub subject: String,
    pub term: Term,
    pub text: String,
    pub options: BTreeMap<OptionKey, String>,
    pub answer: OptionKey,
    pub explanation: String,
}

impl QuestionDraft {
    /// Check that the answer key names one of the options.
    ///
    /// A draft with no options at all passes: the bank format allows option text
    /// the extractor cannot split, and such questions are kept as unanswerable.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::AnswerNotInOptions` if options exist but none has the answer key.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if !self.options.is_empty() && !self.options.contains_key(&self.answer) {
            return Err(QuestionError::AnswerNotInOptions { key: self.answer });
        }

        Ok(ValidatedQuestion { draft: self })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    draft: QuestionDraft,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.draft.subject
    }

    #[must_use]
    pub fn term(&self) -> Term {
        self.draft.term
    }

    pub fn assign_id(self, id: QuestionId) -> Question {
        let QuestionDraft {
            subject,
            term,
            text,
            options,
            answer,
            explanation,
        } = self.draft;

        Question {
            id,
            subject,
            term,
            text,
            options,
            answer,
            explanation,
        }
    }
}

/// One multiple-choice question from the bank. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    subject: String,
    term: Term,
    text: String,
    options: BTreeMap<OptionKey, String>,
    answer: OptionKey,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
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
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in A, B, C, D order.
    #[must_use]
    pub fn options(&self) -> &BTreeMap<OptionKey, String> {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        self.options.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn answer(&self) -> OptionKey {
        self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.answer == key
    }

    /// False when the bank text yielded no options for this question.
    #[must_use]
    pub fn is_answerable(&self) -> bool {
        !self.options.is_empty()
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("invalid answer key: {0}")]
    InvalidAnswerKey(#[from] OptionKeyError),

    #[error("answer key {key} is not among the options")]
    AnswerNotInOptions { key: OptionKey },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
