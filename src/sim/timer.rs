//! Timers driven by simulation time
//!
//! `IntervalTimer` replaces a repeating engine invoke, `Scheduler` replaces
//! fire-and-forget delayed coroutines. Both advance only when ticked.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Fires every `interval` seconds of accumulated time
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    pub interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning how many times the timer fired
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Seconds until the next fire
    pub fn remaining(&self) -> f32 {
        (self.interval - self.elapsed).max(0.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: f64,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed so BinaryHeap pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of delayed payloads
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current scheduler clock (seconds)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `payload` to come due `delay` seconds from now
    pub fn schedule_after(&mut self, delay: f32, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay.max(0.0) as f64,
            seq,
            payload,
        });
    }

    /// Advance the clock and drain everything that came due, earliest first.
    /// Entries due at the same time come out in scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += dt as f64;
        let mut due = Vec::new();
        while self.queue.peek().is_some_and(|e| e.due <= self.now) {
            if let Some(entry) = self.queue.pop() {
                due.push(entry.payload);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything pending (scene reset)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_on_boundary() {
        let mut timer = IntervalTimer::new(1.0);
        assert_eq!(timer.tick(0.5), 0);
        assert_eq!(timer.tick(0.5), 1);
        assert_eq!(timer.tick(2.25), 2);
        assert!((timer.remaining() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_interval_zero_never_fires() {
        let mut timer = IntervalTimer::new(0.0);
        assert_eq!(timer.tick(10.0), 0);
    }

    #[test]
    fn test_scheduler_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule_after(3.0, "c");
        sched.schedule_after(1.0, "a");
        sched.schedule_after(2.0, "b");

        assert!(sched.advance(0.5).is_empty());
        assert_eq!(sched.advance(2.0), vec!["a", "b"]);
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.advance(1.0), vec!["c"]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_scheduler_ties_are_fifo() {
        let mut sched = Scheduler::new();
        sched.schedule_after(1.0, 1);
        sched.schedule_after(1.0, 2);
        sched.schedule_after(1.0, 3);
        assert_eq!(sched.advance(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_scheduler_delay_relative_to_now() {
        let mut sched = Scheduler::new();
        sched.advance(5.0);
        sched.schedule_after(1.0, ());
        assert!(sched.advance(0.75).is_empty());
        assert_eq!(sched.advance(0.25).len(), 1);
    }

    #[test]
    fn test_scheduler_clear() {
        let mut sched = Scheduler::new();
        sched.schedule_after(1.0, ());
        sched.clear();
        assert!(sched.advance(5.0).is_empty());
    }
}
