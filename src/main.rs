//! Gearbox Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogEventSink   EepromAdapter  Esp32Clock │
//! │  (Input+Output+Enc)   (EventSink)    (ByteStore)    (Clock)    │
//! │  LogDisplay           LayoutStore                              │
//! │  (DrawSurface)        (ConfigPort)                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Input FSM · Model · Output applier · Advisory         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog                                                      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, ensure};
use log::info;

use esp_idf_hal::gpio::{
    AnyIOPin, AnyOutputPin, IOPin, Input, Output, OutputPin, Pin, PinDriver, Pull,
};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use gearbox::adapters::display::LogDisplay;
use gearbox::adapters::eeprom::EepromAdapter;
use gearbox::adapters::encoder::QuadratureEncoder;
use gearbox::adapters::hardware::{ButtonInputs, GpioOutputBank, HardwareAdapter};
use gearbox::adapters::log_sink::LogEventSink;
use gearbox::adapters::time::Esp32Clock;
use gearbox::app::ports::{Clock, ConfigPort};
use gearbox::app::service::AppService;
use gearbox::config::ControllerConfig;
use gearbox::drivers::watchdog::Watchdog;
use gearbox::persist::LayoutStore;
use gearbox::pins;

/// Refuse to drive a pin that disagrees with the board map in `pins`.
fn wired(pin: &impl Pin, gpio: i32) -> Result<()> {
    let actual = i32::from(pin.pin());
    ensure!(actual == gpio, "GPIO{actual} wired where the board map says GPIO{gpio}");
    Ok(())
}

fn output(pin: AnyOutputPin, gpio: i32) -> Result<PinDriver<'static, AnyOutputPin, Output>> {
    wired(&pin, gpio)?;
    let mut drv = PinDriver::output(pin)?;
    drv.set_low()?;
    Ok(drv)
}

fn pulled_up(pin: AnyIOPin, gpio: i32) -> Result<PinDriver<'static, AnyIOPin, Input>> {
    wired(&pin, gpio)?;
    let mut drv = PinDriver::input(pin)?;
    drv.set_pull(Pull::Up)?;
    Ok(drv)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Gearbox v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = ControllerConfig::default();
    config.validate().map_err(gearbox::error::Error::from)?;

    // ── 2. Peripherals (checked against `gearbox::pins`) ──────
    let p = Peripherals::take()?;
    let io = p.pins;

    let outputs = GpioOutputBank::new([
        output(io.gpio4.downgrade_output(), pins::OUTPUT_GPIOS[0])?,
        output(io.gpio5.downgrade_output(), pins::OUTPUT_GPIOS[1])?,
        output(io.gpio6.downgrade_output(), pins::OUTPUT_GPIOS[2])?,
        output(io.gpio7.downgrade_output(), pins::OUTPUT_GPIOS[3])?,
        output(io.gpio15.downgrade_output(), pins::OUTPUT_GPIOS[4])?,
        output(io.gpio16.downgrade_output(), pins::OUTPUT_GPIOS[5])?,
        output(io.gpio17.downgrade_output(), pins::OUTPUT_GPIOS[6])?,
        output(io.gpio18.downgrade_output(), pins::OUTPUT_GPIOS[7])?,
    ]);
    let buttons = ButtonInputs::new(
        pulled_up(io.gpio42.downgrade(), pins::ENCODER_SW_GPIO)?,
        pulled_up(io.gpio40.downgrade(), pins::GEAR_UP_GPIO)?,
        pulled_up(io.gpio41.downgrade(), pins::GEAR_DOWN_GPIO)?,
    );
    let encoder = QuadratureEncoder::new(
        pulled_up(io.gpio1.downgrade(), pins::ENCODER_A_GPIO)?,
        pulled_up(io.gpio2.downgrade(), pins::ENCODER_B_GPIO)?,
    );
    let mut hw = HardwareAdapter::new(outputs, buttons, encoder);

    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let clock = Esp32Clock::new();

    // ── 3. Load persisted configuration ───────────────────────
    let nvs = EepromAdapter::new(EspDefaultNvsPartition::take()?)?;
    let mut store = LayoutStore::new(nvs);
    let model = store.load();

    // ── 4. Service ────────────────────────────────────────────
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let mut service = AppService::new(&config, model);
    service.start(&mut hw, &mut display, &mut sink);

    info!("System ready. Entering polling loop.");

    // ── 5. Polling loop ───────────────────────────────────────
    loop {
        service.poll(clock.now_ms(), &mut hw, &mut store, &mut display, &mut sink);

        // Feed watchdog on every iteration.
        watchdog.feed();

        hw.sample_encoder();
        std::thread::sleep(std::time::Duration::from_millis(
            u64::from(config.loop_pause_ms),
        ));
    }
}
