use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Term;

/// Stable identifier for a parsed question.
///
/// Built from subject, term and the parse ordinal, so the same bank text always
/// yields the same ids. Bookmarks are keyed by this value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Wraps an existing identifier string (e.g. one read back from storage).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the `<subject>-<term>-<ordinal>` identifier used by the parser.
    #[must_use]
    pub fn from_parts(subject: &str, term: Term, ordinal: u32) -> Self {
        Self(format!("{subject}-{term}-{ordinal}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_from_parts() {
        let id = QuestionId::from_parts("CS101", Term::Midterm, 3);
        assert_eq!(id.as_str(), "CS101-Midterm-3");
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("ENG101-Final-7");
        assert_eq!(id.to_string(), "ENG101-Final-7");
    }

    #[test]
    fn test_question_id_serializes_as_plain_string() {
        let id = QuestionId::new("MTH001-Final-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"MTH001-Final-1\"");

        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
