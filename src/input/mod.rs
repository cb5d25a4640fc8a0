//! Input state machine — raw button/encoder samples in, [`Intent`]s out.
//!
//! Each poll samples the controls in a fixed order and returns the
//! intents in that order:
//!
//! ```text
//!  1. encoder switch ──▶ EncoderButton ──▶ ToggleCheckbox | SwitchPage
//!  2. encoder count  ──▶ RotaryTracker ──▶ Navigate(dir)
//!  3. gear + / −     ──▶ GearButton×2  ──▶ GearUp | GearDown
//! ```
//!
//! Every last-seen value lives in this struct, so independent instances
//! (one per test, say) never share hidden state.

pub mod encoder_button;
pub mod gear_button;
pub mod rotary;

use heapless::Vec;
use log::debug;

use crate::app::commands::Intent;
use crate::app::ports::{InputLine, InputPort, PositionSource};
use crate::config::ControllerConfig;

use encoder_button::{ButtonGesture, EncoderButton};
use gear_button::GearButton;
use rotary::RotaryTracker;

/// Upper bound on intents from one poll: one per control.
pub const MAX_INTENTS_PER_POLL: usize = 4;

pub struct InputStateMachine {
    encoder_button: EncoderButton,
    rotary: RotaryTracker,
    gear_up: GearButton,
    gear_down: GearButton,
}

impl InputStateMachine {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            encoder_button: EncoderButton::new(config.switch_debounce_ms, config.long_press_ms),
            rotary: RotaryTracker::new(config.encoder_divisor),
            gear_up: GearButton::new(config.debounce_ms),
            gear_down: GearButton::new(config.debounce_ms),
        }
    }

    /// Take the encoder's current count as the rotation reference.
    pub fn sync_position(&mut self, source: &mut impl PositionSource) {
        self.rotary.sync(source.read_position());
    }

    /// Sample every control once and classify.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut (impl InputPort + PositionSource),
    ) -> Vec<Intent, MAX_INTENTS_PER_POLL> {
        let mut intents = Vec::new();

        let pressed = hw.is_active(InputLine::EncoderButton);
        match self.encoder_button.update(pressed, now_ms) {
            Some(ButtonGesture::ShortPress) => {
                let _ = intents.push(Intent::ToggleCheckbox);
            }
            Some(ButtonGesture::LongPress) => {
                let _ = intents.push(Intent::SwitchPage);
            }
            None => {}
        }

        if let Some(dir) = self.rotary.update(hw.read_position()) {
            let _ = intents.push(Intent::Navigate(dir));
        }

        if self.gear_up.update(hw.is_active(InputLine::GearUp), now_ms) {
            let _ = intents.push(Intent::GearUp);
        }
        if self.gear_down.update(hw.is_active(InputLine::GearDown), now_ms) {
            let _ = intents.push(Intent::GearDown);
        }

        if !intents.is_empty() {
            debug!("input @{}ms: {:?}", now_ms, intents);
        }
        intents
    }
}
