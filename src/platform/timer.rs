//! Re-armable fixed-rate tick timer
//!
//! Holds at most one armed interval. Arming always replaces the previous
//! interval, so two tick streams can never overlap after rapid pause/resume
//! or a speed change.

/// An armed interval
#[derive(Debug, Clone, Copy, PartialEq)]
struct Armed {
    interval_ms: f64,
    next_due_ms: f64,
}

/// Fixed-rate timer driven by host timestamps (ms)
#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    armed: Option<Armed>,
    /// Bumped on every arm/disarm; identifies the live tick stream
    generation: u64,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `interval_ms`, first tick one interval after `now_ms`.
    /// Any previously armed interval is cancelled first.
    pub fn arm(&mut self, interval_ms: f64, now_ms: f64) {
        self.disarm();
        self.generation += 1;
        self.armed = Some(Armed {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        });
        log::debug!("Tick timer armed: {:.1} ms (generation {})", interval_ms, self.generation);
    }

    /// Stop ticking
    pub fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.generation += 1;
            log::debug!("Tick timer disarmed (generation {})", self.generation);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn interval_ms(&self) -> Option<f64> {
        self.armed.map(|a| a.interval_ms)
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.armed.map(|a| a.next_due_ms)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the next due tick at or before `now_ms`, returning its scheduled time
    pub fn poll(&mut self, now_ms: f64) -> Option<f64> {
        let armed = self.armed.as_mut()?;
        if now_ms < armed.next_due_ms {
            return None;
        }
        let due = armed.next_due_ms;
        armed.next_due_ms += armed.interval_ms;
        Some(due)
    }

    /// Drop any backlog so the next tick is one interval after `now_ms`
    pub fn resync(&mut self, now_ms: f64) {
        if let Some(armed) = self.armed.as_mut() {
            armed.next_due_ms = now_ms + armed.interval_ms;
        }
    }
}
