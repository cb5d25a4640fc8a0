//! Hardware adapter — bridges GPIO to the domain port traits.
//!
//! Generic over `embedded-hal` 1.0 digital pins so the same code drives
//! `esp-idf-hal` `PinDriver`s on the device and plain fakes on the host.
//! This is the only module in the system that touches pin levels.
//!
//! Buttons are wired active-low against internal pull-ups.  A failed pin
//! read counts as "not pressed"; a failed pin write is logged and the
//! loop carries on.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::model::OUTPUT_LINES;
use crate::app::ports::{InputLine, InputPort, OutputBank, PositionSource};

use super::encoder::QuadratureEncoder;

// ── Output lines ──────────────────────────────────────────────

/// The eight solenoid/output lines, index 0 = line 1.
pub struct GpioOutputBank<P: OutputPin> {
    pins: [P; OUTPUT_LINES],
}

impl<P: OutputPin> GpioOutputBank<P> {
    pub fn new(pins: [P; OUTPUT_LINES]) -> Self {
        Self { pins }
    }
}

impl<P: OutputPin> OutputBank for GpioOutputBank<P> {
    fn write_line(&mut self, line: usize, on: bool) {
        let Some(pin) = self.pins.get_mut(line) else {
            warn!("output: line {} does not exist", line);
            return;
        };
        let res = if on { pin.set_high() } else { pin.set_low() };
        if let Err(e) = res {
            warn!("output: line {} write failed: {:?}", line, e);
        }
    }
}

// ── Buttons ───────────────────────────────────────────────────

/// Encoder push switch and the two gear buttons.
pub struct ButtonInputs<P: InputPin> {
    encoder_sw: P,
    gear_up: P,
    gear_down: P,
}

impl<P: InputPin> ButtonInputs<P> {
    pub fn new(encoder_sw: P, gear_up: P, gear_down: P) -> Self {
        Self {
            encoder_sw,
            gear_up,
            gear_down,
        }
    }
}

impl<P: InputPin> InputPort for ButtonInputs<P> {
    fn is_active(&mut self, line: InputLine) -> bool {
        let pin = match line {
            InputLine::EncoderButton => &mut self.encoder_sw,
            InputLine::GearUp => &mut self.gear_up,
            InputLine::GearDown => &mut self.gear_down,
        };
        match pin.is_low() {
            Ok(active) => active,
            Err(e) => {
                warn!("input: {:?} read failed: {:?}", line, e);
                false
            }
        }
    }
}

// ── Combined adapter ──────────────────────────────────────────

/// Concrete adapter that combines all panel hardware behind port traits.
pub struct HardwareAdapter<O: OutputPin, I: InputPin, A: InputPin, B: InputPin> {
    outputs: GpioOutputBank<O>,
    buttons: ButtonInputs<I>,
    encoder: QuadratureEncoder<A, B>,
}

impl<O: OutputPin, I: InputPin, A: InputPin, B: InputPin> HardwareAdapter<O, I, A, B> {
    pub fn new(
        outputs: GpioOutputBank<O>,
        buttons: ButtonInputs<I>,
        encoder: QuadratureEncoder<A, B>,
    ) -> Self {
        Self {
            outputs,
            buttons,
            encoder,
        }
    }

    /// Sample the encoder channels between polls so fast turns are not
    /// missed while the loop sleeps.
    pub fn sample_encoder(&mut self) {
        self.encoder.sample();
    }
}

impl<O: OutputPin, I: InputPin, A: InputPin, B: InputPin> InputPort
    for HardwareAdapter<O, I, A, B>
{
    fn is_active(&mut self, line: InputLine) -> bool {
        self.buttons.is_active(line)
    }
}

impl<O: OutputPin, I: InputPin, A: InputPin, B: InputPin> PositionSource
    for HardwareAdapter<O, I, A, B>
{
    fn read_position(&mut self) -> i32 {
        self.encoder.read_position()
    }
}

impl<O: OutputPin, I: InputPin, A: InputPin, B: InputPin> OutputBank
    for HardwareAdapter<O, I, A, B>
{
    fn write_line(&mut self, line: usize, on: bool) {
        self.outputs.write_line(line, on);
    }
}
