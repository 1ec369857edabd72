//! Timed transitions.
//!
//! Deferred actions are queued with the level time they become due, the tick
//! that queued them and the session epoch. An entry fires only on a later
//! tick than the one that queued it, once it is due, and only if no restart
//! happened in between. Entries from an older epoch are discarded unapplied.

use bevy_ecs::prelude::Resource;
use smallvec::SmallVec;

/// Action run when a timed entry fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedAction {
    /// End the death sequence: respawn or game over.
    FinishDeath,
    /// Hide the HUD message shown with this token, if it is still the one shown.
    HideMessage { token: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct TimedEntry {
    pub action: TimedAction,
    pub due: f32,
    pub queued_frame: u64,
    pub epoch: u32,
}

/// Pending timed transitions.
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    entries: Vec<TimedEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run `delay` seconds after `now`.
    pub fn schedule(&mut self, action: TimedAction, now: f32, delay: f32, frame: u64, epoch: u32) {
        self.entries.push(TimedEntry {
            action,
            due: now + delay,
            queued_frame: frame,
            epoch,
        });
    }

    /// Remove and return every entry ready to fire, in queue order.
    ///
    /// Entries from another epoch are dropped here as well.
    pub fn take_due(&mut self, now: f32, frame: u64, epoch: u32) -> SmallVec<[TimedAction; 4]> {
        let mut due = SmallVec::new();
        self.entries.retain(|entry| {
            if entry.epoch != epoch {
                return false;
            }
            if entry.queued_frame < frame && entry.due <= now {
                due.push(entry.action);
                return false;
            }
            true
        });
        due
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending entries carrying `action`.
    pub fn count(&self, action: TimedAction) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_fires_on_the_queuing_tick() {
        let mut s = Scheduler::new();
        s.schedule(TimedAction::FinishDeath, 1.0, 0.0, 10, 0);
        assert!(s.take_due(1.0, 10, 0).is_empty());
        assert_eq!(s.take_due(1.0, 11, 0).as_slice(), &[TimedAction::FinishDeath]);
        assert!(s.is_empty());
    }

    #[test]
    fn waits_until_due() {
        let mut s = Scheduler::new();
        s.schedule(TimedAction::FinishDeath, 0.0, 1.0, 0, 0);
        assert!(s.take_due(0.99, 5, 0).is_empty());
        assert_eq!(s.len(), 1);
        assert_eq!(s.take_due(1.0, 6, 0).len(), 1);
    }

    #[test]
    fn stale_epoch_is_discarded() {
        let mut s = Scheduler::new();
        s.schedule(TimedAction::HideMessage { token: 1 }, 0.0, 1.0, 0, 0);
        assert!(s.take_due(5.0, 100, 1).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn count_matches_actions() {
        let mut s = Scheduler::new();
        s.schedule(TimedAction::FinishDeath, 0.0, 1.0, 0, 0);
        s.schedule(TimedAction::HideMessage { token: 2 }, 0.0, 1.0, 0, 0);
        assert_eq!(s.count(TimedAction::FinishDeath), 1);
        s.clear();
        assert_eq!(s.count(TimedAction::FinishDeath), 0);
    }
}
