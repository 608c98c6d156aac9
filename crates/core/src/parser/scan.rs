//! Structural pass: split bank text into blocks and per-question field tuples.
//!
//! Nothing here interprets field contents; see `normalize` for that.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Subject:\s*").expect("block marker pattern is valid"));

static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\|\s*Term:\s*(.*?)\s*\|\s*").expect("block header pattern is valid")
});

static QUESTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\|)\s*Question:\s*").expect("question marker pattern is valid")
});

static QUESTION_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(.*?)\s*\|\s*Options:\s*(.*?)\s*\|\s*Correct Answer:\s*(.*?)\s*\|\s*Explanation:\s*(.*?)\s*(?:\||$)",
    )
    .expect("question fields pattern is valid")
});

/// The four labelled fields of one question, untrimmed of meaning but trimmed of whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawQuestion<'a> {
    pub question: &'a str,
    pub options: &'a str,
    pub answer: &'a str,
    pub explanation: &'a str,
}

/// One `Subject: ... | Term: ... |` block and the questions that matched inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub subject: &'a str,
    pub term: &'a str,
    pub questions: Vec<RawQuestion<'a>>,
    /// Question fragments that did not carry all four fields.
    pub skipped_fragments: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan<'a> {
    pub blocks: Vec<RawBlock<'a>>,
    /// Non-empty blocks whose header did not match.
    pub skipped_blocks: usize,
}

#[must_use]
pub fn scan(text: &str) -> Scan<'_> {
    let mut out = Scan::default();

    for block in BLOCK_MARKER.split(text) {
        if block.trim().is_empty() {
            continue;
        }
        match scan_block(block) {
            Some(raw) => out.blocks.push(raw),
            None => out.skipped_blocks += 1,
        }
    }

    out
}

fn scan_block(block: &str) -> Option<RawBlock<'_>> {
    let header = BLOCK_HEADER.captures(block)?;
    let subject = header.get(1).map_or("", |m| m.as_str().trim());
    let term = header.get(2).map_or("", |m| m.as_str().trim());
    let body = &block[header.get(0).map_or(0, |m| m.end())..];

    let mut questions = Vec::new();
    let mut skipped_fragments = 0;
    for fragment in QUESTION_MARKER.split(body) {
        if fragment.trim().is_empty() {
            continue;
        }
        match scan_question(fragment) {
            Some(raw) => questions.push(raw),
            None => skipped_fragments += 1,
        }
    }

    Some(RawBlock {
        subject,
        term,
        questions,
        skipped_fragments,
    })
}

fn scan_question(fragment: &str) -> Option<RawQuestion<'_>> {
    let caps = QUESTION_FIELDS.captures(fragment)?;
    let field = |idx: usize| caps.get(idx).map_or("", |m| m.as_str().trim());

    Some(RawQuestion {
        question: field(1),
        options: field(2),
        answer: field(3),
        explanation: field(4),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_blocks_and_questions() {
        let text = "\nSubject: CS101 | Term: Midterm |\n\
            Question: Q1? | Options: A) a B) b | Correct Answer: A | Explanation: E1. |\n\
            Question: Q2? | Options: A) a B) b | Correct Answer: b | Explanation: E2. |\n\
            Subject: CS101 | Term: Final |\n\
            Question: Q3? | Options: A) a | Correct Answer: A | Explanation: E3. |\n";

        let scan = scan(text);

        assert_eq!(scan.skipped_blocks, 0);
        assert_eq!(scan.blocks.len(), 2);
        assert_eq!(scan.blocks[0].subject, "CS101");
        assert_eq!(scan.blocks[0].term, "Midterm");
        assert_eq!(scan.blocks[0].questions.len(), 2);
        assert_eq!(
            scan.blocks[0].questions[1],
            RawQuestion {
                question: "Q2?",
                options: "A) a B) b",
                answer: "b",
                explanation: "E2.",
            }
        );
        assert_eq!(scan.blocks[1].term, "Final");
    }

    #[test]
    fn block_without_header_is_skipped() {
        let text = "Subject: CS101 Midterm\nQuestion: Q? | Options: A) a | Correct Answer: A | Explanation: E |";

        let scan = scan(text);

        assert!(scan.blocks.is_empty());
        assert_eq!(scan.skipped_blocks, 1);
    }

    #[test]
    fn fragment_missing_a_field_is_counted_not_kept() {
        let text = "Subject: ENG101 | Term: Final |\n\
            Question: Q1? | Options: A) a | Explanation: no answer label |\n\
            Question: Q2? | Options: A) a | Correct Answer: A | Explanation: ok |";

        let scan = scan(text);

        assert_eq!(scan.blocks[0].questions.len(), 1);
        assert_eq!(scan.blocks[0].questions[0].question, "Q2?");
        assert_eq!(scan.blocks[0].skipped_fragments, 1);
    }

    #[test]
    fn explanation_may_span_lines_and_end_without_pipe() {
        let text = "Subject: MTH001 | Term: Final |\n\
            Question: d/dx x^2? | Options: A) x B) 2x | Correct Answer: B | Explanation: Power rule:\nnx^(n-1).";

        let scan = scan(text);

        assert_eq!(
            scan.blocks[0].questions[0].explanation,
            "Power rule:\nnx^(n-1)."
        );
    }
}
