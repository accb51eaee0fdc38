use std::time::Duration;

/// Monotonic simulation clock, advanced only by the frame loop.
///
/// Wall-clock delays (wave advance, cooldown expiries) are measured against
/// this clock so they can only ever fire between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonotonicClock {
    elapsed: Duration,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }
}

#[derive(Debug, Clone)]
struct Scheduled<E> {
    due: Duration,
    seq: u64,
    event: E,
}

/// Deferred events keyed to a [`MonotonicClock`].
///
/// Entries with equal due times fire in scheduling order.
#[derive(Debug, Clone)]
pub struct ScheduleQueue<E> {
    entries: Vec<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Default for ScheduleQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<E> ScheduleQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once the clock reaches `due`.
    pub fn schedule_at(&mut self, due: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let pos = self
            .entries
            .partition_point(|e| (e.due, e.seq) <= (due, seq));
        self.entries.insert(pos, Scheduled { due, seq, event });
    }

    /// Queue `event` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: E) {
        self.schedule_at(now.saturating_add(delay), event);
    }

    /// Remove and return every event due at or before `now`, oldest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<E> {
        let split = self.entries.partition_point(|e| e.due <= now);
        self.entries.drain(..split).map(|e| e.event).collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
