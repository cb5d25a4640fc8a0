//! Polled quadrature decoder for the rotary encoder.
//!
//! Samples the A/B channels on every [`QuadratureEncoder::sample`] and
//! walks a Gray-code transition table: each valid transition moves the
//! count by one quarter step, invalid (skipped) transitions are dropped.
//! A typical detented encoder produces four counts per click, matching
//! the default `encoder_divisor`.
//!
//! Pin read errors are treated as "no change" so a glitching line can
//! never fabricate motion.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::PositionSource;

/// `[prev_ab << 2 | curr_ab]` → count delta.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

pub struct QuadratureEncoder<A: InputPin, B: InputPin> {
    a: A,
    b: B,
    last_ab: Option<u8>,
    count: i32,
}

impl<A: InputPin, B: InputPin> QuadratureEncoder<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self {
            a,
            b,
            last_ab: None,
            count: 0,
        }
    }

    fn read_ab(&mut self) -> Option<u8> {
        match (self.a.is_high(), self.b.is_high()) {
            (Ok(a), Ok(b)) => Some((u8::from(a) << 1) | u8::from(b)),
            (Err(e), _) => {
                warn!("encoder: channel A read failed: {:?}", e);
                None
            }
            (_, Err(e)) => {
                warn!("encoder: channel B read failed: {:?}", e);
                None
            }
        }
    }

    /// Take one sample of both channels.  Call as often as possible.
    pub fn sample(&mut self) {
        let Some(ab) = self.read_ab() else {
            return;
        };
        if let Some(prev) = self.last_ab {
            self.count = self
                .count
                .wrapping_add(TRANSITIONS[((prev << 2) | ab) as usize] as i32);
        }
        self.last_ab = Some(ab);
    }

    /// Quarter-step count since construction.
    pub fn count(&self) -> i32 {
        self.count
    }
}

impl<A: InputPin, B: InputPin> PositionSource for QuadratureEncoder<A, B> {
    fn read_position(&mut self) -> i32 {
        self.sample();
        self.count
    }
}
