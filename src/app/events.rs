//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, count them in tests, etc.

use super::model::{Checkbox, Gear, Page};
use super::ports::StorageError;

/// Transient operator message shown when a gear button hits a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    MaxGear,
    MinGear,
}

impl Advisory {
    pub const fn text(self) -> &'static str {
        match self {
            Self::MaxGear => "Max Gear Reached",
            Self::MinGear => "Min Gear Reached",
        }
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the loaded state).
    Started { page: Page, gear: Gear },

    /// Long press moved to another page.
    PageChanged { from: Page, to: Page },

    /// A gear button shifted the active gear.
    GearChanged { from: Gear, to: Gear },

    /// A gear button was pressed at a limit; nothing changed.
    GearLimit(Advisory),

    /// A checkbox was toggled.  `live` is true when the gear is active
    /// and the physical lines were updated.
    OutputToggled {
        gear: Gear,
        line: Checkbox,
        armed: bool,
        live: bool,
    },

    /// Rotation moved the highlighted checkbox (not persisted).
    SelectionMoved { gear: Gear, from: Checkbox, to: Checkbox },

    /// The snapshot was flushed; `writes` physical cells changed.
    Persisted { writes: usize },

    /// The snapshot flush failed.
    PersistFailed(StorageError),
}
