use super::scheduler::{Scheduler, TaskHandle};

/// Seconds allowed per question before it is recorded as timed out.
pub const QUESTION_TIME_LIMIT: u32 = 30;

/// Deferred work owned by the quiz player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTask {
    /// The countdown for this question index ran out.
    Timeout { index: usize },
    /// Move to the next question after feedback narration finished.
    AutoAdvance,
}

/// Countdown bound to exactly one question index.
///
/// Dropping the timer does not cancel it; call [`QuestionTimer::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    index: usize,
    handle: TaskHandle,
}

impl QuestionTimer {
    pub fn start(scheduler: &mut Scheduler<QuizTask>, index: usize, limit: u32) -> Self {
        let handle = scheduler.schedule(limit, QuizTask::Timeout { index });
        Self { index, handle }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Seconds left, or `None` once the timer fired or was cancelled.
    #[must_use]
    pub fn time_left(&self, scheduler: &Scheduler<QuizTask>) -> Option<u32> {
        scheduler.remaining(self.handle)
    }

    /// Stop the countdown, returning the seconds that were left.
    pub fn cancel(self, scheduler: &mut Scheduler<QuizTask>) -> Option<u32> {
        let left = scheduler.remaining(self.handle);
        scheduler.cancel(self.handle);
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_then_fires_timeout_once() {
        let mut scheduler = Scheduler::new();
        let timer = QuestionTimer::start(&mut scheduler, 4, QUESTION_TIME_LIMIT);

        for expected in (1..QUESTION_TIME_LIMIT).rev() {
            assert!(scheduler.tick().is_empty());
            assert_eq!(timer.time_left(&scheduler), Some(expected));
        }

        assert_eq!(scheduler.tick(), vec![QuizTask::Timeout { index: 4 }]);
        assert_eq!(timer.time_left(&scheduler), None);
        assert!(scheduler.tick().is_empty());
    }

    #[test]
    fn cancel_reports_time_left() {
        let mut scheduler = Scheduler::new();
        let timer = QuestionTimer::start(&mut scheduler, 0, 10);
        scheduler.tick();
        scheduler.tick();

        assert_eq!(timer.cancel(&mut scheduler), Some(8));
        assert!(scheduler.is_idle());
    }
}
