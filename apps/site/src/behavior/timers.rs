//! Deterministic timer queue standing in for `setTimeout`.
//!
//! Time only moves when the host calls [`TimerQueue::pop_due`] or
//! [`TimerQueue::advance`]. Tasks due at the same instant come out in the
//! order they were scheduled.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    due_ms: u64,
    task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            task,
        });
        id
    }

    /// Returns false when the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Drops every pending task (used on unmount).
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.due_ms).min()
    }

    /// Removes the earliest task due at or before `until_ms` and moves the
    /// clock to its due time. Tasks scheduled while handling it are relative
    /// to that instant, so chained timers keep exact spacing.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, T)> {
        // ids grow monotonically, so (due, id) is the firing order
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.id.0))
            .map(|(i, _)| i)?;
        let Pending { due_ms, task, .. } = self.pending.remove(index);
        self.now_ms = self.now_ms.max(due_ms);
        Some((due_ms, task))
    }

    /// Moves the clock to `until_ms` without firing anything. Never goes back.
    pub fn advance_clock(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Moves the clock forward and returns every task that came due, in order.
    pub fn advance(&mut self, ms: u64) -> Vec<(u64, T)> {
        let until = self.now_ms.saturating_add(ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(until) {
            fired.push(entry);
        }
        self.advance_clock(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(400, "c");
        timers.schedule(0, "a");
        timers.schedule(200, "b");

        let fired: Vec<_> = timers.advance(1000).into_iter().map(|(_, t)| t).collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert_eq!(timers.now_ms(), 1000);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, 1);
        timers.schedule(100, 2);
        timers.schedule(100, 3);
        let fired: Vec<_> = timers.advance(100).into_iter().map(|(_, t)| t).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_not_yet_due_stays_pending() {
        let mut timers = TimerQueue::new();
        timers.schedule(1000, ());
        assert!(timers.advance(999).is_empty());
        assert_eq!(timers.next_due_ms(), Some(1000));
        assert_eq!(timers.advance(1).len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(10, ());
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(100).is_empty());
    }

    #[test]
    fn test_chained_timer_is_relative_to_due_time() {
        let mut timers = TimerQueue::new();
        timers.schedule(200, "announce");

        let mut log = Vec::new();
        while let Some((at, task)) = timers.pop_due(5000) {
            log.push((at, task));
            if task == "announce" {
                timers.schedule(1200, "clear");
            }
        }
        assert_eq!(log, vec![(200, "announce"), (1400, "clear")]);
    }
}
