//! One-shot deferred tasks tied to a match epoch
//!
//! Tasks are due at an instant on the match clock (simulation seconds). Each
//! task records the epoch it was scheduled under; the store drops any task whose
//! epoch is no longer current when it comes due, so a restart or end can never
//! be undone by a late callback.

use tracing::debug;

/// Work the store performs when a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Loading delay elapsed: enter `playing` and spawn the mode's bots
    BeginPlaying,
    /// Replace an eliminated enemy
    RespawnEnemy { archetype: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_at: f32,
    pub epoch: u64,
    pub action: DeferredAction,
}

/// Pending deferred tasks
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run at `now + delay`
    pub fn schedule(&mut self, now: f32, delay: f32, epoch: u64, action: DeferredAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due_at: now + delay.max(0.0),
            epoch,
            action,
        });
        id
    }

    /// Drop every task scheduled under an epoch other than `current`
    pub fn cancel_stale(&mut self, current: u64) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.epoch == current);
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            debug!(dropped, epoch = current, "Cancelled stale deferred tasks");
        }
        dropped
    }

    /// Remove and return every task due at or before `now`, earliest first.
    /// Ties keep scheduling order.
    pub fn take_due(&mut self, now: f32) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due_at <= now);
        self.tasks = pending;
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at).then(a.id.cmp(&b.id)));
        due
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 1.5, 1, DeferredAction::BeginPlaying);

        assert!(scheduler.take_due(1.0).is_empty());
        let due = scheduler.take_due(1.5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, DeferredAction::BeginPlaying);
        assert!(scheduler.take_due(10.0).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_time_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 5.0, 1, DeferredAction::RespawnEnemy { archetype: "basic" });
        scheduler.schedule(0.0, 1.5, 1, DeferredAction::BeginPlaying);

        let due = scheduler.take_due(6.0);
        assert_eq!(due[0].action, DeferredAction::BeginPlaying);
        assert_eq!(due[1].action, DeferredAction::RespawnEnemy { archetype: "basic" });
    }

    #[test]
    fn cancel_stale_keeps_current_epoch() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 1.0, 1, DeferredAction::BeginPlaying);
        scheduler.schedule(0.0, 1.0, 2, DeferredAction::BeginPlaying);

        assert_eq!(scheduler.cancel_stale(2), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.take_due(1.0)[0].epoch, 2);
    }
}
