use mcq_core::model::SessionSummary;

use crate::vm::time_fmt::{format_datetime, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummaryVm {
    pub title: String,
    pub started_at_str: String,
    pub elapsed_str: String,
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub timed_out: u32,
    pub unanswered: u32,
    /// `"-"` until something was answered.
    pub accuracy_label: String,
}

impl From<&SessionSummary> for SessionSummaryVm {
    fn from(summary: &SessionSummary) -> Self {
        let score = summary.score();
        Self {
            title: format!("{} {}", summary.subject(), summary.term()),
            started_at_str: format_datetime(summary.started_at()),
            elapsed_str: format_elapsed(summary.elapsed()),
            total: summary.total(),
            correct: score.correct,
            wrong: score.wrong,
            timed_out: summary.timed_out(),
            unanswered: summary.unanswered(),
            accuracy_label: score
                .accuracy_percent()
                .map_or_else(|| "-".to_string(), |pct| format!("{pct}%")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mcq_core::model::{Score, Term};
    use mcq_core::time::fixed_now;

    #[test]
    fn maps_counts_and_labels() {
        let now = fixed_now();
        let summary = SessionSummary::new(
            "CS101",
            Term::Final,
            now,
            now + Duration::seconds(125),
            4,
            Score {
                correct: 3,
                wrong: 1,
            },
            1,
        )
        .unwrap();

        let vm = SessionSummaryVm::from(&summary);

        assert_eq!(vm.title, "CS101 Final");
        assert_eq!(vm.elapsed_str, "2:05");
        assert_eq!(vm.accuracy_label, "75%");
        assert_eq!(vm.unanswered, 0);
        assert_eq!(vm.timed_out, 1);
    }

    #[test]
    fn nothing_answered_has_no_accuracy() {
        let now = fixed_now();
        let summary =
            SessionSummary::new("ENG101", Term::Midterm, now, now, 3, Score::default(), 0).unwrap();

        assert_eq!(SessionSummaryVm::from(&summary).accuracy_label, "-");
    }
}
