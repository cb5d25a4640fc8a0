//! Controller timing parameters
//!
//! All tunable timing for the input state machine and the polling loop.
//! Values are compile-time defaults; [`ControllerConfig::validate`] guards
//! any override before the service is built.

use serde::{Deserialize, Serialize};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Encoder ---
    /// Hold time that turns an encoder press into a page switch (ms)
    pub long_press_ms: u32,
    /// Time the push switch must read active before a press counts (ms)
    pub switch_debounce_ms: u32,
    /// Raw quadrature counts per detent
    pub encoder_divisor: i32,

    // --- Gear buttons ---
    /// Minimum gap between two accepted presses of one gear button (ms)
    pub debounce_ms: u32,

    // --- Display ---
    /// How long a "Max/Min Gear Reached" advisory stays on screen (ms)
    pub advisory_ms: u32,

    // --- Loop ---
    /// Pause at the end of each polling iteration (ms)
    pub loop_pause_ms: u32,
    /// Task watchdog timeout (ms)
    pub watchdog_timeout_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Encoder
            long_press_ms: 1000,
            switch_debounce_ms: 30,
            encoder_divisor: 4, // quarter-detent quadrature

            // Gear buttons
            debounce_ms: 200,

            // Display
            advisory_ms: 2000,

            // Loop
            loop_pause_ms: 10,
            watchdog_timeout_ms: 5000,
        }
    }
}

/// Configuration rejected by [`ControllerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoder_divisor < 1 {
            return Err(ConfigError::ValidationFailed("encoder_divisor must be >= 1"));
        }
        if !(100..=10_000).contains(&self.long_press_ms) {
            return Err(ConfigError::ValidationFailed(
                "long_press_ms must be 100–10000",
            ));
        }
        if self.switch_debounce_ms == 0 || self.switch_debounce_ms >= self.long_press_ms {
            return Err(ConfigError::ValidationFailed(
                "switch_debounce_ms must be > 0 and < long_press_ms",
            ));
        }
        if self.debounce_ms == 0 || self.debounce_ms >= self.long_press_ms {
            return Err(ConfigError::ValidationFailed(
                "debounce_ms must be > 0 and < long_press_ms",
            ));
        }
        if self.advisory_ms == 0 {
            return Err(ConfigError::ValidationFailed("advisory_ms must be > 0"));
        }
        if !(1..=100).contains(&self.loop_pause_ms) {
            return Err(ConfigError::ValidationFailed("loop_pause_ms must be 1–100"));
        }
        if self.watchdog_timeout_ms <= self.loop_pause_ms * 10 {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed 10 loop periods",
            ));
        }
        Ok(())
    }
}
