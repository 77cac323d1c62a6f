//! Shake gesture recognition over a drag's cursor trail.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::constants::{
    SHAKE_CAPACITY, SHAKE_COOLDOWN_MS, SHAKE_MIN_SAMPLES, SHAKE_REVERSALS, SHAKE_WINDOW_MS,
};
use crate::layout::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShakeConfig {
    /// Samples older than this (relative to the newest) are dropped.
    pub window: Duration,
    pub min_samples: usize,
    /// Horizontal direction changes needed to count as a shake.
    pub reversals: usize,
    /// Minimum time between two reported shakes.
    pub cooldown: Duration,
    pub capacity: usize,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(SHAKE_WINDOW_MS),
            min_samples: SHAKE_MIN_SAMPLES,
            reversals: SHAKE_REVERSALS,
            cooldown: Duration::from_millis(SHAKE_COOLDOWN_MS),
            capacity: SHAKE_CAPACITY,
        }
    }
}

/// Detects a rapid left-right oscillation of the cursor.
///
/// One detector lives for one drag session; a new drag starts with an empty
/// buffer and no cooldown.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    config: ShakeConfig,
    samples: VecDeque<(Point, Instant)>,
    last_shake: Option<Instant>,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(ShakeConfig::default())
    }
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            samples: VecDeque::with_capacity(config.capacity.max(1)),
            last_shake: None,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_shake = None;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a cursor sample. Returns true exactly when this sample completes
    /// a shake outside the cooldown period.
    pub fn push(&mut self, point: Point, now: Instant) -> bool {
        while let Some(&(_, at)) = self.samples.front() {
            if now.saturating_duration_since(at) > self.config.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        if self.samples.len() >= self.config.capacity.max(1) {
            self.samples.pop_front();
        }
        self.samples.push_back((point, now));

        if self.samples.len() < self.config.min_samples {
            return false;
        }
        let reversals = self.reversals();
        if reversals < self.config.reversals {
            return false;
        }
        if let Some(last) = self.last_shake
            && now.saturating_duration_since(last) < self.config.cooldown
        {
            return false;
        }
        tracing::debug!(reversals, samples = self.samples.len(), "shake detected");
        self.last_shake = Some(now);
        // A new shake needs a fresh trail.
        self.samples.clear();
        true
    }

    fn reversals(&self) -> usize {
        let mut count = 0;
        let mut previous = 0;
        for (a, b) in self.samples.iter().zip(self.samples.iter().skip(1)) {
            let direction = (b.0.x - a.0.x).signum();
            if direction == 0 {
                continue;
            }
            if previous != 0 && direction != previous {
                count += 1;
            }
            previous = direction;
        }
        count
    }
}
