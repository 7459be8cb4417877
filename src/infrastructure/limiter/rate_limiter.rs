use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Time source for the limiter, injectable so tests can move the window
/// without real delays.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub retry_after_secs: Option<u64>,
}

impl RateDecision {
    fn allowed() -> Self {
        RateDecision {
            allowed: true,
            retry_after_secs: None,
        }
    }
}

/// Fixed-window admission counter keyed by client identifier.
///
/// Entries are created lazily and never evicted; the store lives for the
/// process lifetime and is not shared across instances or restarts.
pub struct FixedWindowLimiter<C: Clock = SystemClock> {
    entries: DashMap<String, WindowEntry>,
    capacity: u32,
    window: Duration,
    clock: C,
}

impl FixedWindowLimiter<SystemClock> {
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self::with_clock(capacity, window, SystemClock)
    }
}

impl<C: Clock> FixedWindowLimiter<C> {
    pub fn with_clock(capacity: u32, window: Duration, clock: C) -> Self {
        FixedWindowLimiter {
            entries: DashMap::new(),
            capacity,
            window,
            clock,
        }
    }

    /// Admit or reject one request from `key`. The entry is mutated under the
    /// map shard lock, so the read-modify-write is atomic per key.
    pub fn check(&self, key: &str) -> RateDecision {
        let now = self.clock.now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + self.window,
            });

        if now >= entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
            return RateDecision::allowed();
        }

        if entry.count < self.capacity {
            entry.count += 1;
            return RateDecision::allowed();
        }

        let remaining = entry.reset_at.saturating_duration_since(now);
        RateDecision {
            allowed: false,
            retry_after_secs: Some((remaining.as_secs_f64().ceil() as u64).max(1)),
        }
    }

    /// Number of client identifiers currently tracked. The store has no
    /// eviction, so this only ever grows.
    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}
