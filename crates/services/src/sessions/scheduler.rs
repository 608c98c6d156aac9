/// Identifies one scheduled task so it can be cancelled or inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    remaining: u32,
    task: T,
}

/// Tick-driven queue of deferred tasks.
///
/// Time only moves when the owner calls [`Scheduler::tick`], once per second in
/// the terminal front-end and explicitly in tests. A task scheduled with delay
/// `n` comes back from the `n`-th following tick unless cancelled first.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Queue `task` to fire after `delay` ticks. A zero delay fires on the next tick.
    pub fn schedule(&mut self, delay: u32, task: T) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.tasks.push(Scheduled {
            handle,
            remaining: delay.max(1),
            task,
        });
        handle
    }

    /// Drop a pending task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|scheduled| scheduled.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Ticks left before the task fires, or `None` if it is no longer pending.
    #[must_use]
    pub fn remaining(&self, handle: TaskHandle) -> Option<u32> {
        self.tasks
            .iter()
            .find(|scheduled| scheduled.handle == handle)
            .map(|scheduled| scheduled.remaining)
    }

    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.remaining(handle).is_some()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance time by one tick and return the tasks that came due, oldest first.
    pub fn tick(&mut self) -> Vec<T> {
        for scheduled in &mut self.tasks {
            scheduled.remaining = scheduled.remaining.saturating_sub(1);
        }

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|scheduled| scheduled.remaining == 0);
        self.tasks = pending;

        due.into_iter().map(|scheduled| scheduled.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_after_its_delay() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(3, "timeout");

        assert!(scheduler.tick().is_empty());
        assert_eq!(scheduler.remaining(handle), Some(2));
        assert!(scheduler.tick().is_empty());
        assert_eq!(scheduler.tick(), vec!["timeout"]);
        assert!(!scheduler.is_pending(handle));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(1, 1);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.tick().is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2, 'a');
        scheduler.schedule(1, 'b');
        scheduler.schedule(2, 'c');

        assert_eq!(scheduler.tick(), vec!['b']);
        assert_eq!(scheduler.tick(), vec!['a', 'c']);
    }

    #[test]
    fn zero_delay_waits_for_next_tick() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(0, ());

        assert_eq!(scheduler.remaining(handle), Some(1));
        assert_eq!(scheduler.tick().len(), 1);
    }
}
