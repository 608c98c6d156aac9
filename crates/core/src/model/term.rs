use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Academic exam period a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Midterm,
    Final,
}

impl Term {
    /// Every term, in menu order.
    pub const ALL: [Term; 2] = [Term::Midterm, Term::Final];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Term::Midterm => "Midterm",
            Term::Final => "Final",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown term: {raw}")]
pub struct TermError {
    pub raw: String,
}

impl FromStr for Term {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("midterm") {
            Ok(Term::Midterm)
        } else if trimmed.eq_ignore_ascii_case("final") {
            Ok(Term::Final)
        } else {
            Err(TermError {
                raw: trimmed.to_string(),
            })
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_terms_case_insensitively() {
        assert_eq!("Midterm".parse::<Term>().unwrap(), Term::Midterm);
        assert_eq!(" final ".parse::<Term>().unwrap(), Term::Final);
        assert_eq!("MIDTERM".parse::<Term>().unwrap(), Term::Midterm);
    }

    #[test]
    fn rejects_unknown_term() {
        let err = "Quiz".parse::<Term>().unwrap_err();
        assert_eq!(err.raw, "Quiz");
    }
}
