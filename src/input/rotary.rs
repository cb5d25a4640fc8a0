//! Encoder rotation tracking.
//!
//! The quadrature decoder reports a raw count that moves several units per
//! detent.  [`RotaryTracker`] normalises it to detents and compares it with
//! the last value it saw, yielding at most one navigation step per poll.

use crate::app::commands::Direction;

pub struct RotaryTracker {
    divisor: i32,
    last_detent: i32,
}

impl RotaryTracker {
    /// `divisor` is clamped to at least 1.
    pub fn new(divisor: i32) -> Self {
        Self {
            divisor: divisor.max(1),
            last_detent: 0,
        }
    }

    /// Adopt `raw` as the reference position without emitting a step.
    /// Call once at startup so a non-zero decoder count is not read as motion.
    pub fn sync(&mut self, raw: i32) {
        self.last_detent = raw.div_euclid(self.divisor);
    }

    /// Compare `raw` with the last reading.
    pub fn update(&mut self, raw: i32) -> Option<Direction> {
        let detent = raw.div_euclid(self.divisor);
        let step = match detent.cmp(&self.last_detent) {
            core::cmp::Ordering::Greater => Some(Direction::Clockwise),
            core::cmp::Ordering::Less => Some(Direction::CounterClockwise),
            core::cmp::Ordering::Equal => None,
        };
        self.last_detent = detent;
        step
    }
}
