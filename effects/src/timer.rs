//! Virtual-time timer queue.
//!
//! All delayed work in the engine is an entry in a [`TimerQueue`]. Entries
//! are ordered by deadline and then by insertion, so tasks due at the same
//! instant fire in the order they were scheduled. The queue never reads a
//! clock: callers pass `now` in, which lets tests step time explicitly and
//! lets the browser crate arm a single real timeout for [`TimerQueue::next_deadline`].

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::collections::BTreeMap;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// Handle to a scheduled entry. Cancelling a fired or cancelled entry is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    deadline: Millis,
    seq: u64,
}

impl TimerHandle {
    #[must_use]
    pub fn deadline(&self) -> Millis {
        self.deadline
    }
}

/// Deadline-ordered queue of pending tasks.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: BTreeMap<(Millis, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new(), next_seq: 0 }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire `delay` ms after `now`.
    pub fn schedule(&mut self, now: Millis, delay: Millis, task: T) -> TimerHandle {
        let handle = TimerHandle { deadline: now.saturating_add(delay), seq: self.next_seq };
        self.next_seq += 1;
        self.entries.insert((handle.deadline, handle.seq), task);
        handle
    }

    /// Remove a pending entry. Returns whether anything was removed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&(handle.deadline, handle.seq)).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&(handle.deadline, handle.seq))
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest entry if it is due at `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerHandle, T)> {
        let first = self.entries.first_entry()?;
        let (deadline, seq) = *first.key();
        if deadline > now {
            return None;
        }
        let task = first.remove();
        Some((TimerHandle { deadline, seq }, task))
    }

    /// Cancel every pending entry whose task matches `pred`.
    pub fn cancel_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|_, task| !pred(task));
        before - self.entries.len()
    }

    /// Drop every pending entry, returning how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending tasks in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}
