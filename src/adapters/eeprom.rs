//! Byte-addressed storage adapter.
//!
//! Implements [`ByteStore`] for the gearbox configuration layout.
//!
//! - **`target_os = "espidf"`** — one NVS `u8` entry per address in the
//!   `gearbox` namespace (keys `b0`..`b46`).  A missing key reads as
//!   `0xFF`, the same as an erased EEPROM cell, so first boot falls back
//!   to defaults through the normal validation path.
//! - **`not(target_os = "espidf")`** — an in-memory cell array for
//!   host-side testing and simulation.
//!
//! Either way a write is skipped when the cell already holds the value,
//! and [`EepromAdapter::physical_writes`] counts the ones that were not.

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::ports::{ByteStore, StorageError};
use crate::persist::LAYOUT_LEN;

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
#[cfg(target_os = "espidf")]
use log::warn;

/// Value of a cell that has never been written.
pub const ERASED: u8 = 0xFF;

const NAMESPACE: &str = "gearbox";

pub struct EepromAdapter {
    #[cfg(target_os = "espidf")]
    nvs: EspNvs<NvsDefault>,
    #[cfg(not(target_os = "espidf"))]
    cells: Vec<u8>,
    writes: usize,
}

impl EepromAdapter {
    /// Open the `gearbox` namespace on the default NVS partition.
    #[cfg(target_os = "espidf")]
    pub fn new(partition: EspDefaultNvsPartition) -> crate::error::Result<Self> {
        let nvs = EspNvs::new(partition, NAMESPACE, true).map_err(|e| {
            warn!("EepromAdapter: NVS open failed: {}", e);
            StorageError::IoError
        })?;
        info!("EepromAdapter: NVS namespace '{}' open", NAMESPACE);
        Ok(Self { nvs, writes: 0 })
    }

    /// Fresh, fully erased simulated EEPROM.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        info!("EepromAdapter: simulation backend ({} cells)", LAYOUT_LEN);
        Self {
            cells: vec![ERASED; LAYOUT_LEN as usize],
            writes: 0,
        }
    }

    /// Simulated EEPROM preloaded with `image` (shorter images are padded
    /// with erased cells, longer ones truncated).
    #[cfg(not(target_os = "espidf"))]
    pub fn with_image(image: &[u8]) -> Self {
        let mut store = Self::new();
        let n = image.len().min(store.cells.len());
        store.cells[..n].copy_from_slice(&image[..n]);
        store
    }

    /// Raw cell contents (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn image(&self) -> &[u8] {
        &self.cells
    }

    /// Physical writes since construction.
    pub fn physical_writes(&self) -> usize {
        self.writes
    }

    fn check(addr: u16) -> Result<(), StorageError> {
        if addr < LAYOUT_LEN {
            Ok(())
        } else {
            Err(StorageError::OutOfBounds(addr))
        }
    }

    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    fn key(addr: u16) -> String<8> {
        let mut key = String::new();
        let _ = write!(key, "b{}", addr);
        key
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for EepromAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl ByteStore for EepromAdapter {
    fn read_byte(&self, addr: u16) -> Result<u8, StorageError> {
        Self::check(addr)?;
        Ok(self.cells[addr as usize])
    }

    fn write_byte_if_changed(&mut self, addr: u16, value: u8) -> Result<bool, StorageError> {
        Self::check(addr)?;
        let cell = &mut self.cells[addr as usize];
        if *cell == value {
            return Ok(false);
        }
        *cell = value;
        self.writes += 1;
        Ok(true)
    }
}

#[cfg(target_os = "espidf")]
impl ByteStore for EepromAdapter {
    fn read_byte(&self, addr: u16) -> Result<u8, StorageError> {
        Self::check(addr)?;
        match self.nvs.get_u8(&Self::key(addr)) {
            Ok(Some(v)) => Ok(v),
            Ok(None) => Ok(ERASED),
            Err(e) => {
                warn!("EepromAdapter: read b{} failed: {}", addr, e);
                Err(StorageError::IoError)
            }
        }
    }

    fn write_byte_if_changed(&mut self, addr: u16, value: u8) -> Result<bool, StorageError> {
        if self.read_byte(addr)? == value {
            return Ok(false);
        }
        self.nvs.set_u8(&Self::key(addr), value).map_err(|e| {
            warn!("EepromAdapter: write b{} failed: {}", addr, e);
            StorageError::IoError
        })?;
        self.writes += 1;
        Ok(true)
    }
}
