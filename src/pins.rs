//! GPIO / peripheral pin assignments for the gearbox controller board.
//!
//! `esp-idf-hal` hands out pins as typed `Peripherals` fields, so `main`
//! still names each field, then refuses to boot if a field's GPIO number
//! disagrees with this map.

// ---------------------------------------------------------------------------
// Output lines (solenoid drivers, active HIGH)
// ---------------------------------------------------------------------------

/// Output line 1..8, in checkbox order.
pub const OUTPUT_GPIOS: [i32; 8] = [4, 5, 6, 7, 15, 16, 17, 18];

// ---------------------------------------------------------------------------
// Rotary encoder
// ---------------------------------------------------------------------------

pub const ENCODER_A_GPIO: i32 = 1;
pub const ENCODER_B_GPIO: i32 = 2;
/// Shaft push switch, active LOW with internal pull-up.
pub const ENCODER_SW_GPIO: i32 = 42;

// ---------------------------------------------------------------------------
// Gear buttons (active LOW with internal pull-up)
// ---------------------------------------------------------------------------

pub const GEAR_UP_GPIO: i32 = 40;
pub const GEAR_DOWN_GPIO: i32 = 41;
