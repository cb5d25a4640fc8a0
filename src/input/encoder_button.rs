//! Encoder push-switch gesture detection: short press vs. long press.
//!
//! ## Gesture detection
//!
//! | Gesture     | Condition                                      | Event        |
//! |-------------|------------------------------------------------|--------------|
//! | Press       | Active for `debounce_ms` without a gap         | —            |
//! | Short press | Pressed, then released before `long_press_ms` | `ShortPress` |
//! | Long press  | Held for `long_press_ms` or more               | `LongPress`  |
//!
//! A press only counts once the line has read active on every sample for
//! `debounce_ms`; a single inactive sample during that window drops it.
//! Hold time is measured from the first active sample.  Bounce after a
//! release cannot qualify as a new press, so one physical press yields at
//! most one gesture.
//!
//! A long press fires once, while the switch is still down; the release
//! that follows is swallowed.  Holding the switch never repeats.

/// Classified encoder-switch gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGesture {
    ShortPress,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    DebounceWait { since_ms: u32 },
    Pressed { since_ms: u32 },
    HeldLong,
}

pub struct EncoderButton {
    state: PressState,
    debounce_ms: u32,
    long_press_ms: u32,
}

impl EncoderButton {
    pub fn new(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            state: PressState::Idle,
            debounce_ms,
            long_press_ms,
        }
    }

    /// Feed one sample of the switch line.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonGesture> {
        match self.state {
            PressState::Idle => {
                if pressed {
                    self.state = PressState::DebounceWait { since_ms: now_ms };
                }
                None
            }

            PressState::DebounceWait { since_ms } => {
                if !pressed {
                    self.state = PressState::Idle;
                    return None;
                }
                if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    self.state = PressState::Pressed { since_ms };
                    return self.check_long(since_ms, now_ms);
                }
                None
            }

            PressState::Pressed { since_ms } => {
                if !pressed {
                    self.state = PressState::Idle;
                    return Some(ButtonGesture::ShortPress);
                }
                self.check_long(since_ms, now_ms)
            }

            PressState::HeldLong => {
                if !pressed {
                    self.state = PressState::Idle;
                }
                None
            }
        }
    }

    fn check_long(&mut self, since_ms: u32, now_ms: u32) -> Option<ButtonGesture> {
        if now_ms.wrapping_sub(since_ms) >= self.long_press_ms {
            self.state = PressState::HeldLong;
            return Some(ButtonGesture::LongPress);
        }
        None
    }

    /// True once a press has qualified, until the switch is released.
    pub fn is_down(&self) -> bool {
        matches!(self.state, PressState::Pressed { .. } | PressState::HeldLong)
    }
}
