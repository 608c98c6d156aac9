//! Field pass: turn raw tuples into question drafts.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{OptionKey, QuestionDraft, QuestionError, Term};

use super::scan::RawQuestion;

static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-D])\)").expect("option marker pattern is valid"));

/// Pull `A) text B) text ...` pairs out of an options field.
///
/// Each option runs from its marker to the next marker (or the end), trimmed.
/// A repeated letter keeps the later text. Returns an empty map when no marker
/// is present.
#[must_use]
pub fn extract_options(text: &str) -> BTreeMap<OptionKey, String> {
    let markers: Vec<(OptionKey, usize, usize)> = OPTION_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((OptionKey::from_char(letter)?, whole.start(), whole.end()))
        })
        .collect();

    let mut options = BTreeMap::new();
    for (idx, (key, _, body_start)) in markers.iter().enumerate() {
        let body_end = markers
            .get(idx + 1)
            .map_or(text.len(), |(_, next_start, _)| *next_start);
        options.insert(*key, text[*body_start..body_end].trim().to_string());
    }
    options
}

/// Build a draft from one raw question.
///
/// # Errors
///
/// Returns `QuestionError::InvalidAnswerKey` if the answer field is not a single A-D letter.
pub fn normalize(
    subject: &str,
    term: Term,
    raw: &RawQuestion<'_>,
) -> Result<QuestionDraft, QuestionError> {
    let answer: OptionKey = raw.answer.to_uppercase().parse()?;

    Ok(QuestionDraft {
        subject: subject.to_string(),
        term,
        text: raw.question.to_string(),
        options: extract_options(raw.options),
        answer,
        explanation: raw.explanation.to_string(),
    })
}
