//! Configuration model — the single source of truth for page, gear,
//! per-gear checkbox selection, and the gear × line output matrix.
//!
//! Pure state: nothing in here touches hardware or storage.  The
//! [`AppService`](super::service::AppService) owns exactly one
//! [`ConfigurationModel`] and orchestrates persistence and output
//! application around every mutation.
//!
//! Domain values are validated newtypes ([`Gear`], [`Checkbox`], [`Page`]).
//! Raw `u8` setters exist for callers holding unvalidated numbers (storage,
//! tests); they reject out-of-domain input with [`ValidationError`] and
//! leave the model untouched.

use core::fmt;

/// Number of gears (output profiles).
pub const GEAR_COUNT: usize = 5;
/// Number of physical solenoid output lines per gear.
pub const OUTPUT_LINES: usize = 8;

// ───────────────────────────────────────────────────────────────
// Validation error
// ───────────────────────────────────────────────────────────────

/// A raw value fell outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Page must be 1–6.
    Page(u8),
    /// Gear must be 1–5.
    Gear(u8),
    /// Checkbox index must be 0–7.
    Checkbox(u8),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(v) => write!(f, "page {} out of range 1-6", v),
            Self::Gear(v) => write!(f, "gear {} out of range 1-5", v),
            Self::Checkbox(v) => write!(f, "checkbox {} out of range 0-7", v),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Gear
// ───────────────────────────────────────────────────────────────

/// An active-gear number, always within 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gear(u8);

impl Gear {
    pub const MIN: Gear = Gear(1);
    pub const MAX: Gear = Gear(GEAR_COUNT as u8);

    pub const fn new(value: u8) -> Result<Self, ValidationError> {
        if value >= 1 && value <= GEAR_COUNT as u8 {
            Ok(Self(value))
        } else {
            Err(ValidationError::Gear(value))
        }
    }

    /// Gear number as shown to the operator (1–5).
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based row index into per-gear arrays.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Next gear up, or `None` at top gear.
    pub fn up(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    /// Next gear down, or `None` at first gear.
    pub fn down(self) -> Option<Self> {
        Self::new(self.0.wrapping_sub(1)).ok()
    }

    /// All gears in ascending order.
    pub fn all() -> impl Iterator<Item = Gear> {
        (1..=GEAR_COUNT as u8).map(Gear)
    }
}

impl Default for Gear {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Gear {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Checkbox
// ───────────────────────────────────────────────────────────────

/// Index of one output checkbox on a configuration page (0–7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Checkbox(u8);

impl Checkbox {
    pub const fn new(value: u8) -> Result<Self, ValidationError> {
        if (value as usize) < OUTPUT_LINES {
            Ok(Self(value))
        } else {
            Err(ValidationError::Checkbox(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next checkbox, wrapping 7 → 0.
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % OUTPUT_LINES as u8)
    }

    /// Previous checkbox, wrapping 0 → 7.
    pub const fn prev(self) -> Self {
        Self((self.0 + OUTPUT_LINES as u8 - 1) % OUTPUT_LINES as u8)
    }
}

impl TryFrom<u8> for Checkbox {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ───────────────────────────────────────────────────────────────
// Page
// ───────────────────────────────────────────────────────────────

/// Display mode: the gear indicator or one gear's configuration screen.
///
/// Discriminants are the persisted byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Page {
    #[default]
    Indicator = 1,
    ConfigGear1 = 2,
    ConfigGear2 = 3,
    ConfigGear3 = 4,
    ConfigGear4 = 5,
    ConfigGear5 = 6,
}

impl Page {
    pub const COUNT: u8 = 6;

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Configuration page for `gear`.
    pub const fn config_for(gear: Gear) -> Self {
        match gear.get() {
            1 => Self::ConfigGear1,
            2 => Self::ConfigGear2,
            3 => Self::ConfigGear3,
            4 => Self::ConfigGear4,
            _ => Self::ConfigGear5,
        }
    }

    /// The gear this page configures, or `None` on the indicator page.
    pub const fn config_gear(self) -> Option<Gear> {
        match self {
            Self::Indicator => None,
            Self::ConfigGear1 => Some(Gear(1)),
            Self::ConfigGear2 => Some(Gear(2)),
            Self::ConfigGear3 => Some(Gear(3)),
            Self::ConfigGear4 => Some(Gear(4)),
            Self::ConfigGear5 => Some(Gear(5)),
        }
    }

    /// Following page in the cycle Indicator → Config1 … Config5 → Indicator.
    pub const fn next(self) -> Self {
        match self {
            Self::Indicator => Self::ConfigGear1,
            Self::ConfigGear1 => Self::ConfigGear2,
            Self::ConfigGear2 => Self::ConfigGear3,
            Self::ConfigGear3 => Self::ConfigGear4,
            Self::ConfigGear4 => Self::ConfigGear5,
            Self::ConfigGear5 => Self::Indicator,
        }
    }
}

impl TryFrom<u8> for Page {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Indicator),
            2 => Ok(Self::ConfigGear1),
            3 => Ok(Self::ConfigGear2),
            4 => Ok(Self::ConfigGear3),
            5 => Ok(Self::ConfigGear4),
            6 => Ok(Self::ConfigGear5),
            other => Err(ValidationError::Page(other)),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ConfigurationModel
// ───────────────────────────────────────────────────────────────

/// In-memory controller state.
///
/// Invariants hold by construction: every field is a validated domain
/// type, and the output matrix is only reachable through [`toggle`].
///
/// [`toggle`]: ConfigurationModel::toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigurationModel {
    page: Page,
    gear: Gear,
    selection: [Checkbox; GEAR_COUNT],
    matrix: [[bool; OUTPUT_LINES]; GEAR_COUNT],
}

impl ConfigurationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a model from already-validated parts (used by the loader).
    pub fn from_parts(
        page: Page,
        gear: Gear,
        selection: [Checkbox; GEAR_COUNT],
        matrix: [[bool; OUTPUT_LINES]; GEAR_COUNT],
    ) -> Self {
        Self {
            page,
            gear,
            selection,
            matrix,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn page(&self) -> Page {
        self.page
    }

    /// The active gear.
    pub fn gear(&self) -> Gear {
        self.gear
    }

    /// Highlighted checkbox on `gear`'s configuration page.
    pub fn selection(&self, gear: Gear) -> Checkbox {
        self.selection[gear.index()]
    }

    /// Whether `line` is armed for `gear`.
    pub fn is_armed(&self, gear: Gear, line: Checkbox) -> bool {
        self.matrix[gear.index()][line.index()]
    }

    /// The 8-line pattern configured for `gear`.
    pub fn outputs_for(&self, gear: Gear) -> [bool; OUTPUT_LINES] {
        self.matrix[gear.index()]
    }

    // ── Typed mutators ────────────────────────────────────────

    pub fn show_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn shift_to(&mut self, gear: Gear) {
        self.gear = gear;
    }

    pub fn select(&mut self, gear: Gear, checkbox: Checkbox) {
        self.selection[gear.index()] = checkbox;
    }

    /// Flip one matrix bit and return its new value.
    pub fn toggle(&mut self, gear: Gear, line: Checkbox) -> bool {
        let cell = &mut self.matrix[gear.index()][line.index()];
        *cell = !*cell;
        *cell
    }

    // ── Raw-value mutators ────────────────────────────────────

    pub fn set_page(&mut self, raw: u8) -> Result<Page, ValidationError> {
        let page = Page::try_from(raw)?;
        self.show_page(page);
        Ok(page)
    }

    pub fn set_gear(&mut self, raw: u8) -> Result<Gear, ValidationError> {
        let gear = Gear::new(raw)?;
        self.shift_to(gear);
        Ok(gear)
    }

    /// `gear` is the gear number (1–5), `checkbox` the line index (0–7).
    pub fn set_selection(&mut self, gear: u8, checkbox: u8) -> Result<(), ValidationError> {
        let gear = Gear::new(gear)?;
        let checkbox = Checkbox::new(checkbox)?;
        self.select(gear, checkbox);
        Ok(())
    }

    /// `gear` is the gear number (1–5), `line` the line index (0–7).
    pub fn toggle_output(&mut self, gear: u8, line: u8) -> Result<bool, ValidationError> {
        let gear = Gear::new(gear)?;
        let line = Checkbox::new(line)?;
        Ok(self.toggle(gear, line))
    }
}
