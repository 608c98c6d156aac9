use std::collections::BTreeSet;
use std::sync::Arc;

use log::{info, warn};

use mcq_core::model::{Question, Term};
use mcq_core::{ParseReport, parse_with_report};

/// The full question list, parsed once at startup and never mutated.
///
/// Clones share the same list.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Arc<[Question]>,
    report: ParseReport,
}

impl QuestionCatalog {
    /// Parse a question bank. Malformed parts are dropped and counted in [`Self::report`].
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let (questions, report) = parse_with_report(text);
        if report.dropped() > 0 {
            warn!(
                "[Setup] Question bank: dropped {} blocks, {} fragments, {} records.",
                report.blocks_skipped, report.fragments_skipped, report.records_rejected
            );
        }
        info!("[Setup] Loaded {} questions.", questions.len());
        Self {
            questions: questions.into(),
            report,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn report(&self) -> ParseReport {
        self.report
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct subjects, sorted.
    #[must_use]
    pub fn subjects(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.subject().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Subjects whose name contains `query`, ignoring case. An empty query matches all.
    #[must_use]
    pub fn search_subjects(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.subjects()
            .into_iter()
            .filter(|subject| subject.to_lowercase().contains(&needle))
            .collect()
    }

    /// Terms that have at least one question for `subject`, in menu order.
    #[must_use]
    pub fn terms_for(&self, subject: &str) -> Vec<Term> {
        Term::ALL
            .into_iter()
            .filter(|term| {
                self.questions
                    .iter()
                    .any(|q| q.subject() == subject && q.term() == *term)
            })
            .collect()
    }

    /// Questions for one subject and term, in bank order.
    #[must_use]
    pub fn questions_for(&self, subject: &str, term: Term) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.subject() == subject && q.term() == term)
            .cloned()
            .collect()
    }
}
