//! Timed phase transitions
//!
//! Transitions are stored with a due timestamp and fired by the frame driver
//! when a tick's clock reaches it. Nothing here reads the wall clock, so tests
//! drive time explicitly.

use serde::{Deserialize, Serialize};

/// A deferred state-machine transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Leave the Cleared phase and start the next level
    NextLevel,
    /// Leave the GameOver phase and show the title screen
    ReturnToTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    /// Clock value (seconds) at which the transition fires
    pub due: f64,
    pub transition: Transition,
}

/// Pending transitions ordered by due time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionQueue {
    pending: Vec<ScheduledTransition>,
}

impl TransitionQueue {
    /// Schedule `transition` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, transition: Transition) {
        let due = now + delay.max(0.0);
        // Keep sorted; equal due times fire in scheduling order
        let idx = self.pending.partition_point(|s| s.due <= due);
        self.pending.insert(idx, ScheduledTransition { due, transition });
    }

    /// Drop every pending transition of this kind; returns whether any was removed
    pub fn cancel(&mut self, transition: Transition) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.transition != transition);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every transition due at or before `now`, earliest first
    pub fn pop_due(&mut self, now: f64) -> Vec<Transition> {
        let split = self.pending.partition_point(|s| s.due <= now);
        self.pending.drain(..split).map(|s| s.transition).collect()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|s| s.due)
    }

    pub fn is_pending(&self, transition: Transition) -> bool {
        self.pending.iter().any(|s| s.transition == transition)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut queue = TransitionQueue::default();
        queue.schedule(10.0, 1.5, Transition::NextLevel);

        assert!(queue.pop_due(11.0).is_empty());
        assert_eq!(queue.next_due(), Some(11.5));
        assert_eq!(queue.pop_due(11.5), vec![Transition::NextLevel]);
        assert!(queue.is_empty());
        assert!(queue.pop_due(100.0).is_empty());
    }

    #[test]
    fn test_ordered_by_due_time() {
        let mut queue = TransitionQueue::default();
        queue.schedule(0.0, 3.0, Transition::ReturnToTitle);
        queue.schedule(0.0, 1.0, Transition::NextLevel);
        assert_eq!(
            queue.pop_due(5.0),
            vec![Transition::NextLevel, Transition::ReturnToTitle]
        );
    }

    #[test]
    fn test_cancel() {
        let mut queue = TransitionQueue::default();
        queue.schedule(0.0, 1.0, Transition::NextLevel);
        queue.schedule(0.0, 2.0, Transition::ReturnToTitle);

        assert!(queue.cancel(Transition::NextLevel));
        assert!(!queue.cancel(Transition::NextLevel));
        assert!(!queue.is_pending(Transition::NextLevel));
        assert_eq!(queue.len(), 1);

        queue.cancel_all();
        assert!(queue.pop_due(10.0).is_empty());
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let mut queue = TransitionQueue::default();
        queue.schedule(4.0, -1.0, Transition::NextLevel);
        assert_eq!(queue.pop_due(4.0), vec![Transition::NextLevel]);
    }
}
