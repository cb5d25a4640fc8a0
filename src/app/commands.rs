//! Inbound intents to the application service.
//!
//! The [`InputStateMachine`](crate::input::InputStateMachine) turns raw
//! button and encoder activity into these; the
//! [`AppService`](super::service::AppService) interprets them against the
//! configuration model.

/// Direction of one encoder navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// High-level operator intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Short press: toggle the highlighted checkbox (configuration pages only).
    ToggleCheckbox,

    /// Long press: advance to the next page.
    SwitchPage,

    /// Gear "+" accepted.
    GearUp,

    /// Gear "−" accepted.
    GearDown,

    /// Encoder rotation: move the highlighted checkbox.
    Navigate(Direction),
}
