/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the set reached so far (current position inclusive), in percent.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let reached = (self.position + 1).min(self.total);
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: usize, total: usize) -> SessionProgress {
        SessionProgress {
            position,
            total,
            answered: 0,
            unanswered: total,
            is_complete: false,
        }
    }

    #[test]
    fn percent_counts_the_current_question() {
        assert_eq!(at(0, 4).percent(), 25);
        assert_eq!(at(3, 4).percent(), 100);
        assert_eq!(at(0, 0).percent(), 0);
    }
}
