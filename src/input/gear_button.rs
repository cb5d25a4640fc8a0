//! Rising-edge gear button with a per-button cooldown.
//!
//! A press is accepted only when all of these hold:
//!
//! - the line reads active,
//! - the button is not latched (it was seen released since the last active read),
//! - at least `debounce_ms` has passed since this button's last accepted press.
//!
//! Any active read latches the button, accepted or not, so contact bounce
//! inside the cooldown cannot turn into a late second acceptance while the
//! operator is still holding the button.  An inactive read clears the latch.

pub struct GearButton {
    debounce_ms: u32,
    latched: bool,
    last_accept_ms: Option<u32>,
}

impl GearButton {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            latched: false,
            last_accept_ms: None,
        }
    }

    /// Feed one sample; returns `true` when a press is accepted.
    pub fn update(&mut self, active: bool, now_ms: u32) -> bool {
        if !active {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;

        let cooled = self
            .last_accept_ms
            .is_none_or(|t| now_ms.wrapping_sub(t) >= self.debounce_ms);
        if cooled {
            self.last_accept_ms = Some(now_ms);
        }
        cooled
    }
}
