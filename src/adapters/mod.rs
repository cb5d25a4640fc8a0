//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                     |
//! |-------------|----------------|---------------------------------|
//! | `hardware`  | InputPort      | Button GPIOs (active-low)       |
//! |             | OutputBank     | Eight output GPIOs              |
//! |             | PositionSource | Quadrature encoder              |
//! | `encoder`   | PositionSource | Encoder A/B channels            |
//! | `eeprom`    | ByteStore      | NVS / in-memory cell array      |
//! | `display`   | DrawSurface    | Serial log                      |
//! | `log_sink`  | EventSink      | Serial log output               |
//! | `time`      | Clock          | ESP32 system timer              |
//!
//! [`ConfigPort`](crate::app::ports::ConfigPort) is implemented once, over
//! any `ByteStore`, in [`crate::persist`].

pub mod display;
pub mod eeprom;
pub mod encoder;
pub mod hardware;
pub mod log_sink;
pub mod time;
