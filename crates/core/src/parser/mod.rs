//! Best-effort parser for the flat-text question bank.
//!
//! Input looks like:
//!
//! ```text
//! Subject: CS101 | Term: Midterm |
//! Question: What does CPU stand for? | Options: A) ... B) ... C) ... D) ... | Correct Answer: B | Explanation: ... |
//! ```
//!
//! Malformed blocks and questions are dropped, never reported as errors.

use log::debug;

use crate::model::{Question, QuestionDraft, QuestionId, Term};

pub mod normalize;
pub mod scan;

/// Counts of input the parser dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Blocks without a valid `<subject> | Term: <term> |` header.
    pub blocks_skipped: usize,
    /// Question fragments missing one of the four labelled fields.
    pub fragments_skipped: usize,
    /// Questions whose answer key was unusable.
    pub records_rejected: usize,
}

impl ParseReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.blocks_skipped + self.fragments_skipped + self.records_rejected
    }
}

/// Parse the bank text into questions, in source order.
#[must_use]
pub fn parse_questions(text: &str) -> Vec<Question> {
    parse_with_report(text).0
}

/// Parse the bank text and report how much of it was dropped.
///
/// Ids are `<subject>-<term>-<n>` where `n` counts emitted questions across the
/// whole text, starting at 1, so parsing the same text twice gives the same ids.
#[must_use]
pub fn parse_with_report(text: &str) -> (Vec<Question>, ParseReport) {
    let scanned = scan::scan(text);
    let mut report = ParseReport {
        blocks_skipped: scanned.skipped_blocks,
        ..ParseReport::default()
    };
    let mut questions = Vec::new();
    let mut ordinal = 0_u32;

    for block in scanned.blocks {
        let term: Term = match block.term.parse() {
            Ok(term) => term,
            Err(err) => {
                debug!("[Parser] Skipping block for {:?}: {err}", block.subject);
                report.blocks_skipped += 1;
                continue;
            }
        };
        report.fragments_skipped += block.skipped_fragments;

        for raw in &block.questions {
            let validated = normalize::normalize(block.subject, term, raw)
                .and_then(QuestionDraft::validate);
            match validated {
                Ok(question) => {
                    ordinal += 1;
                    let id = QuestionId::from_parts(question.subject(), question.term(), ordinal);
                    questions.push(question.assign_id(id));
                }
                Err(err) => {
                    debug!("[Parser] Dropping question {:?}: {err}", raw.question);
                    report.records_rejected += 1;
                }
            }
        }
    }

    debug!(
        "[Parser] Parsed {} questions ({} inputs dropped).",
        questions.len(),
        report.dropped()
    );
    (questions, report)
}
