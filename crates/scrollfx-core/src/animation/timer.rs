//! One-shot timers for grace windows
//!
//! Timers carry no callback. A due timer is reported by the frame that finds
//! it due and its owner reacts; an owner that no longer holds the handle
//! simply ignores the report.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use super::property::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    view: ViewId,
    deadline: Instant,
}

#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: BTreeMap<TimerHandle, TimerEntry>,
}

impl Timers {
    pub fn schedule(&mut self, view: ViewId, deadline: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.insert(handle, TimerEntry { view, deadline });
        handle
    }

    /// Cancel a timer; unknown or already fired handles return false
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    #[inline]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn deadline(&self, handle: TimerHandle) -> Option<Instant> {
        self.pending.get(&handle).map(|entry| entry.deadline)
    }

    /// Remove and return every timer due at `now`, earliest deadline first
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(Instant, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(handle, entry)| (entry.deadline, *handle))
            .collect();
        due.sort();

        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Cancel every timer owned by `view`
    pub fn cancel_view(&mut self, view: ViewId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, entry| entry.view != view);
        before - self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fire_due_in_deadline_order() {
        let mut timers = Timers::default();
        let view = ViewId::new();
        let t0 = Instant::now();
        let late = timers.schedule(view, t0 + Duration::from_millis(150));
        let early = timers.schedule(view, t0 + Duration::from_millis(100));
        let future = timers.schedule(view, t0 + Duration::from_secs(5));

        assert!(timers.fire_due(t0 + Duration::from_millis(50)).is_empty());
        assert_eq!(timers.fire_due(t0 + Duration::from_millis(200)), vec![early, late]);
        assert!(timers.is_pending(future));
        assert!(!timers.is_pending(early));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = Timers::default();
        let h = timers.schedule(ViewId::new(), Instant::now());
        assert!(timers.cancel(h));
        assert!(!timers.cancel(h));
        assert!(timers.fire_due(Instant::now() + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_cancel_view() {
        let mut timers = Timers::default();
        let gone = ViewId::new();
        let kept = ViewId::new();
        let now = Instant::now();
        timers.schedule(gone, now);
        timers.schedule(gone, now);
        let k = timers.schedule(kept, now);
        assert_eq!(timers.cancel_view(gone), 2);
        assert_eq!(timers.fire_due(now), vec![k]);
    }
}
