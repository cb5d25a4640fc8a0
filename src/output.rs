//! Output applier — pushes the active gear's pattern onto the solenoid lines.
//!
//! The physical state is derived, never stored: after every call to
//! [`OutputApplier::apply`] the eight lines equal
//! `model.outputs_for(model.gear())`.  Rows of inactive gears never reach
//! the hardware.

use log::debug;

use crate::app::model::{ConfigurationModel, OUTPUT_LINES};
use crate::app::ports::OutputBank;

pub struct OutputApplier {
    live: [bool; OUTPUT_LINES],
}

impl Default for OutputApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputApplier {
    pub fn new() -> Self {
        Self {
            live: [false; OUTPUT_LINES],
        }
    }

    /// Drive all eight lines from the active gear's matrix row.
    pub fn apply(&mut self, model: &ConfigurationModel, bank: &mut impl OutputBank) {
        let pattern = model.outputs_for(model.gear());
        for (line, on) in pattern.iter().copied().enumerate() {
            bank.write_line(line, on);
        }
        self.live = pattern;
        debug!(
            "outputs: gear {} -> {:08b}",
            model.gear(),
            pattern
                .iter()
                .rev()
                .fold(0u8, |acc, &on| (acc << 1) | u8::from(on))
        );
    }

    /// The last pattern pushed to the bank.
    pub fn live(&self) -> [bool; OUTPUT_LINES] {
        self.live
    }
}
