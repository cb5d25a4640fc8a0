//! Persistent byte layout for the configuration model.
//!
//! ```text
//!  addr  0      page            1–6
//!  addr  1      active gear     1–5
//!  addr  2..=6  selection g1–g5 0–7
//!  addr  7..=46 output matrix   0/1, row-major (gear × 8 lines)
//! ```
//!
//! [`LayoutStore`] wraps any [`ByteStore`] and implements [`ConfigPort`]:
//!
//! - `load()` never fails.  Each cell is range-checked on its own; an
//!   unreadable or out-of-domain cell takes its default (page 1, gear 1,
//!   selection 0, line off) without disturbing its neighbours.
//! - `save()` writes the whole snapshot through change-suppressing writes,
//!   so an unchanged model costs zero physical writes.

use log::{debug, warn};

use crate::app::model::{Checkbox, ConfigurationModel, GEAR_COUNT, Gear, OUTPUT_LINES, Page};
use crate::app::ports::{ByteStore, ConfigPort, StorageError};

pub const ADDR_PAGE: u16 = 0;
pub const ADDR_GEAR: u16 = 1;
pub const ADDR_SELECTION: u16 = 2;
pub const ADDR_MATRIX: u16 = ADDR_SELECTION + GEAR_COUNT as u16;
/// Total bytes occupied by the layout.
pub const LAYOUT_LEN: u16 = ADDR_MATRIX + (GEAR_COUNT * OUTPUT_LINES) as u16;

/// Address of the matrix cell for `gear`, `line`.
pub const fn matrix_addr(gear: Gear, line: Checkbox) -> u16 {
    ADDR_MATRIX + (gear.index() * OUTPUT_LINES + line.index()) as u16
}

/// Address of the selection cell for `gear`.
pub const fn selection_addr(gear: Gear) -> u16 {
    ADDR_SELECTION + gear.index() as u16
}

/// [`ConfigPort`] over a byte-addressed store.
pub struct LayoutStore<S: ByteStore> {
    bytes: S,
}

impl<S: ByteStore> LayoutStore<S> {
    pub fn new(bytes: S) -> Self {
        Self { bytes }
    }

    pub fn inner(&self) -> &S {
        &self.bytes
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.bytes
    }

    pub fn into_inner(self) -> S {
        self.bytes
    }

    fn read(&self, addr: u16) -> Option<u8> {
        match self.bytes.read_byte(addr) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("LayoutStore: read @{} failed: {}", addr, e);
                None
            }
        }
    }

    fn put(&mut self, addr: u16, value: u8, writes: &mut usize) -> Result<(), StorageError> {
        if self.bytes.write_byte_if_changed(addr, value)? {
            *writes += 1;
        }
        Ok(())
    }
}

impl<S: ByteStore> ConfigPort for LayoutStore<S> {
    fn load(&self) -> ConfigurationModel {
        let page = self
            .read(ADDR_PAGE)
            .and_then(|v| Page::try_from(v).ok())
            .unwrap_or_else(|| {
                debug!("LayoutStore: page invalid, defaulting to indicator");
                Page::default()
            });

        let gear = self
            .read(ADDR_GEAR)
            .and_then(|v| Gear::new(v).ok())
            .unwrap_or_else(|| {
                debug!("LayoutStore: gear invalid, defaulting to 1");
                Gear::default()
            });

        let mut selection = [Checkbox::default(); GEAR_COUNT];
        let mut matrix = [[false; OUTPUT_LINES]; GEAR_COUNT];
        for g in Gear::all() {
            selection[g.index()] = self
                .read(selection_addr(g))
                .and_then(|v| Checkbox::new(v).ok())
                .unwrap_or_default();

            for (i, cell) in matrix[g.index()].iter_mut().enumerate() {
                let line = Checkbox::new(i as u8).unwrap_or_default();
                *cell = self.read(matrix_addr(g, line)) == Some(1);
            }
        }

        ConfigurationModel::from_parts(page, gear, selection, matrix)
    }

    fn save(&mut self, model: &ConfigurationModel) -> Result<usize, StorageError> {
        let mut writes = 0;

        self.put(ADDR_PAGE, model.page().as_u8(), &mut writes)?;
        self.put(ADDR_GEAR, model.gear().get(), &mut writes)?;

        for g in Gear::all() {
            self.put(selection_addr(g), model.selection(g).get(), &mut writes)?;
            for (i, armed) in model.outputs_for(g).into_iter().enumerate() {
                let line = Checkbox::new(i as u8).unwrap_or_default();
                self.put(matrix_addr(g, line), u8::from(armed), &mut writes)?;
            }
        }

        debug!("LayoutStore: saved ({} physical writes)", writes);
        Ok(writes)
    }
}
