use mcq_core::model::Term;
use services::QuestionCatalog;

/// Caption shown under every subject card.
pub const SUBJECT_CAPTION: &str = "Midterm & Final Term";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub name: String,
    /// First three characters, uppercased.
    pub avatar: String,
    pub caption: &'static str,
}

impl SubjectCardVm {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let avatar = name.chars().take(3).collect::<String>().to_uppercase();
        Self {
            name,
            avatar,
            caption: SUBJECT_CAPTION,
        }
    }
}

/// Subject cards matching `query` (case-insensitive, empty matches all).
#[must_use]
pub fn map_subject_cards(catalog: &QuestionCatalog, query: &str) -> Vec<SubjectCardVm> {
    catalog
        .search_subjects(query)
        .into_iter()
        .map(SubjectCardVm::new)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermCardVm {
    pub term: Term,
    pub label: &'static str,
    pub question_count: usize,
}

/// Both terms are always offered; an empty one leads to the "no questions" state.
#[must_use]
pub fn map_term_cards(catalog: &QuestionCatalog, subject: &str) -> Vec<TermCardVm> {
    Term::ALL
        .into_iter()
        .map(|term| TermCardVm {
            term,
            label: term.as_str(),
            question_count: catalog.questions_for(subject, term).len(),
        })
        .collect()
}
