/// Running tally for one quiz session.
///
/// Each question contributes to exactly one counter at most once, so
/// `correct + wrong` never exceeds the session length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
}

impl Score {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_correct(&mut self) {
        self.correct = self.correct.saturating_add(1);
    }

    pub fn record_wrong(&mut self) {
        self.wrong = self.wrong.saturating_add(1);
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct.saturating_add(self.wrong)
    }

    /// Share of answered questions that were correct, in whole percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<u32> {
        let answered = self.answered();
        if answered == 0 {
            return None;
        }
        let percent = u64::from(self.correct) * 100 / u64::from(answered);
        u32::try_from(percent).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_none_before_any_answer() {
        assert_eq!(Score::new().accuracy_percent(), None);
    }

    #[test]
    fn accuracy_rounds_down() {
        let mut score = Score::new();
        score.record_correct();
        score.record_correct();
        score.record_wrong();

        assert_eq!(score.answered(), 3);
        assert_eq!(score.accuracy_percent(), Some(66));
    }
}
