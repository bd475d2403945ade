//! Stand-in classifier used when the hosted one is unconfigured or failing.
//!
//! Picks uniformly from a fixed table of tomato labels after an artificial
//! delay, so the capture flow feels the same as a network round trip.

use parking_lot::Mutex;
use std::time::Duration;

/// Default artificial latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// One canned prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockEntry {
    pub label: &'static str,
    pub score: f64,
    pub healthy: bool,
}

/// The fixed table the mock draws from
pub const MOCK_TABLE: [MockEntry; 5] = [
    MockEntry {
        label: "tomato_early_blight",
        score: 0.92,
        healthy: false,
    },
    MockEntry {
        label: "tomato_healthy",
        score: 0.95,
        healthy: true,
    },
    MockEntry {
        label: "tomato_late_blight",
        score: 0.88,
        healthy: false,
    },
    MockEntry {
        label: "tomato_septoria_leaf_spot",
        score: 0.89,
        healthy: false,
    },
    MockEntry {
        label: "tomato_bacterial_spot",
        score: 0.87,
        healthy: false,
    },
];

pub struct MockPredictor {
    rng: Mutex<fastrand::Rng>,
    delay: Duration,
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl MockPredictor {
    pub fn new(delay: Duration) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
            delay,
        }
    }

    /// Deterministic selection sequence (tests)
    pub fn with_seed(seed: u64, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
            delay,
        }
    }

    /// Sleep for the configured delay, then draw one table entry.
    ///
    /// The mock answers with exactly one prediction, so the entry is
    /// returned directly along with its healthy tag.
    pub fn predict_mock(&self) -> MockEntry {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let index = self.rng.lock().usize(..MOCK_TABLE.len());
        MOCK_TABLE[index]
    }
}
