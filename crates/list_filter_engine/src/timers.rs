//! Virtual-time timer queue.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use list_filter_core::Timer;

/// A timer instance that reached its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTimer {
    pub timer: Timer,
    pub token: u64,
    pub deadline: Duration,
}

/// Pending timers ordered by deadline, ties broken by scheduling order.
/// Scheduling a timer that is already pending replaces it.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), (Timer, u64)>,
    index: HashMap<Timer, (Duration, u64)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(&mut self, timer: Timer, token: u64, delay: Duration) {
        self.cancel(timer);
        let key = (self.now + delay, self.seq);
        self.seq += 1;
        self.pending.insert(key, (timer, token));
        self.index.insert(timer, key);
    }

    pub fn cancel(&mut self, timer: Timer) -> bool {
        match self.index.remove(&timer) {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Removes the earliest timer if its deadline is at or before `limit`, moving the clock to it.
    pub fn pop_due(&mut self, limit: Duration) -> Option<DueTimer> {
        let (&key, _) = self.pending.iter().next()?;
        if key.0 > limit {
            return None;
        }
        let (timer, token) = self.pending.remove(&key)?;
        self.index.remove(&timer);
        self.now = self.now.max(key.0);
        Some(DueTimer {
            timer,
            token,
            deadline: key.0,
        })
    }

    /// Moves the clock forward without firing anything. Never moves it backwards.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(Timer::NavigationPoll, 1, ms(1000));
        queue.schedule(Timer::ScrollSettle, 2, ms(500));
        queue.schedule(Timer::LocateRetry, 3, ms(500));

        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(2000)))
            .map(|due| due.timer)
            .collect();
        assert_eq!(
            fired,
            vec![Timer::ScrollSettle, Timer::LocateRetry, Timer::NavigationPoll]
        );
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn rescheduling_replaces_pending_instance() {
        let mut queue = TimerQueue::new();
        queue.schedule(Timer::MutationDebounce, 1, ms(1000));
        queue.advance_to(ms(600));
        queue.schedule(Timer::MutationDebounce, 2, ms(1000));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(ms(1500)), None);
        let due = queue.pop_due(ms(1600)).unwrap();
        assert_eq!(due.token, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_removes_timer() {
        let mut queue = TimerQueue::new();
        queue.schedule(Timer::ContainerPoll, 1, ms(10));
        assert!(queue.cancel(Timer::ContainerPoll));
        assert!(!queue.cancel(Timer::ContainerPoll));
        assert_eq!(queue.next_deadline(), None);
    }
}
