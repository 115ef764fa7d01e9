//! Periodic callbacks as explicit scheduled events
//!
//! Square spawning, rain spawning and difficulty increases each run on their
//! own interval. Instead of real timers, the session keeps one entry per kind
//! and the driver pops due firings in time order, running each to completion
//! before the next.

/// The periodic callbacks a session schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    SquareSpawn,
    RainSpawn,
    Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    pub kind: TimerKind,
    pub interval_ms: f64,
    pub next_due_ms: f64,
}

/// Interval timers keyed by kind
#[derive(Debug, Clone, Default)]
pub struct Timers {
    entries: Vec<Timer>,
}

impl Timers {
    /// Intervals below this are raised to it so a pump always terminates
    pub const MIN_INTERVAL_MS: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Start (or restart) a timer whose first firing is one interval after `now_ms`
    pub fn schedule(&mut self, kind: TimerKind, interval_ms: f64, now_ms: f64) {
        let interval_ms = interval_ms.max(Self::MIN_INTERVAL_MS);
        let timer = Timer {
            kind,
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        };
        match self.entries.iter_mut().find(|t| t.kind == kind) {
            Some(existing) => *existing = timer,
            None => self.entries.push(timer),
        }
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: TimerKind) -> Option<&Timer> {
        self.entries.iter().find(|t| t.kind == kind)
    }

    /// Pop the earliest firing due at or before `now_ms`.
    ///
    /// Returns the kind and the scheduled firing time, and advances that
    /// timer by one interval. Ties go to the lower `TimerKind`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerKind, f64)> {
        let timer = self
            .entries
            .iter_mut()
            .filter(|t| t.next_due_ms <= now_ms)
            .min_by(|a, b| {
                a.next_due_ms
                    .partial_cmp(&b.next_due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.kind.cmp(&b.kind))
            })?;
        let fired_at = timer.next_due_ms;
        timer.next_due_ms += timer.interval_ms;
        Some((timer.kind, fired_at))
    }
}
