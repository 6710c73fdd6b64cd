//! Count-up animation for numeric counters
//!
//! `Idle -> Animating -> Settled`. The start time is taken from the first
//! frame callback rather than when the animation was scheduled, so the
//! elapsed-time math is unaffected by how late the first frame arrives.

/// Class added to a counter when it starts counting.
pub const START_CLASS: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterPhase {
    Idle,
    Animating { start: f64 },
    Settled,
}

/// What to display after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    /// No further frames are needed.
    pub settled: bool,
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    phase: CounterPhase,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        Self {
            target,
            duration_ms: f64::from(duration_ms),
            phase: CounterPhase::Idle,
        }
    }

    /// Parse a `data-target` attribute. Only non-negative integers count.
    pub fn parse_target(raw: &str) -> Option<u64> {
        raw.trim().parse().ok()
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Advance to the frame at `timestamp` (ms).
    pub fn tick(&mut self, timestamp: f64) -> CounterFrame {
        let start = match self.phase {
            CounterPhase::Settled => {
                return CounterFrame {
                    value: self.target,
                    settled: true,
                };
            }
            CounterPhase::Idle => {
                self.phase = CounterPhase::Animating { start: timestamp };
                timestamp
            }
            CounterPhase::Animating { start } => start,
        };

        let elapsed = (timestamp - start).max(0.0);
        if elapsed >= self.duration_ms {
            self.phase = CounterPhase::Settled;
            return CounterFrame {
                value: self.target,
                settled: true,
            };
        }

        CounterFrame {
            value: self.value_at(elapsed),
            settled: false,
        }
    }

    /// Interpolated value `elapsed` ms into the animation.
    pub fn value_at(&self, elapsed: f64) -> u64 {
        if elapsed >= self.duration_ms {
            return self.target;
        }
        let progress = elapsed.max(0.0) / self.duration_ms;
        let value = (progress * self.target as f64).floor() as u64;
        value.min(self.target)
    }
}
