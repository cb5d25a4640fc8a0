//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (GPIO, encoder, display, byte storage, clock, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every test can run against in-memory fakes.

use super::events::{Advisory, AppEvent};
use super::model::{Checkbox, ConfigurationModel, Gear, OUTPUT_LINES, Page};

// ───────────────────────────────────────────────────────────────
// Raw GPIO (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Discrete input lines the controller polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLine {
    /// Push switch on the rotary encoder shaft.
    EncoderButton,
    /// Gear "+" button.
    GearUp,
    /// Gear "−" button.
    GearDown,
}

/// Read-side GPIO port.
///
/// Implementations resolve the electrical active level: `true` always
/// means "pressed", whatever the pull-up/pull-down wiring.
pub trait InputPort {
    fn is_active(&mut self, line: InputLine) -> bool;
}

/// Write-side GPIO port over the fixed bank of solenoid lines.
pub trait OutputBank {
    /// Drive line `line` (0–7) to `on`.
    fn write_line(&mut self, line: usize, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Rotary encoder position
// ───────────────────────────────────────────────────────────────

/// Raw quadrature count from the encoder decoder.
///
/// The count moves by several units per mechanical detent; the core
/// normalises it (see [`ControllerConfig::encoder_divisor`]).
///
/// [`ControllerConfig::encoder_divisor`]: crate::config::ControllerConfig::encoder_divisor
pub trait PositionSource {
    fn read_position(&mut self) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Time source
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; consumers use
/// `wrapping_sub` for every elapsed-time calculation.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Byte storage (driven adapter: domain ↔ EEPROM / NVS)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed durable storage.
pub trait ByteStore {
    /// Read the byte at `addr`.
    fn read_byte(&self, addr: u16) -> Result<u8, StorageError>;

    /// Write `value` at `addr` unless the cell already holds it.
    /// Returns `true` when a physical write happened.
    fn write_byte_if_changed(&mut self, addr: u16, value: u8) -> Result<bool, StorageError>;
}

/// Loads and persists the [`ConfigurationModel`].
pub trait ConfigPort {
    /// Load the model.  Never fails: unreadable or out-of-range cells
    /// fall back to their defaults.
    fn load(&self) -> ConfigurationModel;

    /// Persist the full snapshot.  Returns the number of physical writes.
    fn save(&mut self, model: &ConfigurationModel) -> Result<usize, StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Drawing surface (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Everything a presenter needs to paint one full page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    pub page: Page,
    pub gear: Gear,
    /// Highlighted checkbox; `None` on the indicator page.
    pub selection: Option<Checkbox>,
    /// Armed lines for the page's gear (the active gear on the indicator).
    pub checkboxes: [bool; OUTPUT_LINES],
    pub advisory: Option<Advisory>,
}

/// A sub-area of the current page to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The large gear number on the indicator page.
    GearGlyph(Gear),
    /// A single checkbox on a configuration page.
    Checkbox {
        index: Checkbox,
        armed: bool,
        highlighted: bool,
    },
    /// Advisory banner; `None` clears it.
    Advisory(Option<Advisory>),
}

/// Presenter port.  The core only ever asks for redraws; it never reads back.
pub trait DrawSurface {
    fn draw_full_page(&mut self, view: &PageView);
    fn draw_partial(&mut self, region: Region);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ByteStore`] and [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Address outside the backing store.
    OutOfBounds(u16),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds(addr) => write!(f, "address {} out of bounds", addr),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
