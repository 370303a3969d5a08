//! Fixed-interval accumulator
//!
//! Turns irregular elapsed time into a count of whole intervals, the same way
//! a fixed-timestep loop turns frame time into substeps.

/// Fires every `period_ms` of accumulated time
#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: f64,
    accumulator: f64,
    /// Cap on intervals reported per call (avoids a burst after a stall)
    max_catchup: u32,
}

impl Ticker {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(f64::EPSILON),
            accumulator: 0.0,
            max_catchup: 8,
        }
    }

    pub fn with_max_catchup(mut self, max_catchup: u32) -> Self {
        self.max_catchup = max_catchup.max(1);
        self
    }

    /// Add elapsed time; returns how many intervals are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator += elapsed_ms.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.period_ms && due < self.max_catchup {
            self.accumulator -= self.period_ms;
            due += 1;
        }
        // Drop the backlog beyond the cap
        if due == self.max_catchup {
            self.accumulator = self.accumulator.min(self.period_ms);
        }
        due
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
