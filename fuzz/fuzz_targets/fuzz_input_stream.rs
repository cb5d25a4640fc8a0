//! Fuzz target: `AppService::poll` over arbitrary input sample streams
//!
//! Each 4-byte chunk is one poll: `[buttons, encoder delta, dt_lo, dt_hi]`.
//!
//! Invariants checked:
//! - No panics under any sample stream (including clock wrap)
//! - The live output lines always equal the active gear's matrix row
//!
//! cargo fuzz run fuzz_input_stream

#![no_main]

use gearbox::adapters::eeprom::EepromAdapter;
use gearbox::app::events::AppEvent;
use gearbox::app::model::ConfigurationModel;
use gearbox::app::ports::{
    DrawSurface, EventSink, InputLine, InputPort, OutputBank, PageView, PositionSource, Region,
};
use gearbox::app::service::AppService;
use gearbox::config::ControllerConfig;
use gearbox::persist::LayoutStore;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Panel {
    buttons: u8,
    count: i32,
    lines: [bool; 8],
}

impl InputPort for Panel {
    fn is_active(&mut self, line: InputLine) -> bool {
        let bit = match line {
            InputLine::EncoderButton => 0,
            InputLine::GearUp => 1,
            InputLine::GearDown => 2,
        };
        self.buttons & (1 << bit) != 0
    }
}

impl PositionSource for Panel {
    fn read_position(&mut self) -> i32 {
        self.count
    }
}

impl OutputBank for Panel {
    fn write_line(&mut self, line: usize, on: bool) {
        self.lines[line] = on;
    }
}

struct Quiet;

impl DrawSurface for Quiet {
    fn draw_full_page(&mut self, _view: &PageView) {}
    fn draw_partial(&mut self, _region: Region) {}
}

impl EventSink for Quiet {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut panel = Panel::default();
    let mut store = LayoutStore::new(EepromAdapter::new());
    let mut app = AppService::new(&ControllerConfig::default(), ConfigurationModel::new());
    app.start(&mut panel, &mut Quiet, &mut Quiet);

    let mut now: u32 = u32::MAX - 5_000;
    for chunk in data.chunks_exact(4) {
        panel.buttons = chunk[0];
        panel.count = panel.count.wrapping_add(i32::from(chunk[1] as i8));
        now = now.wrapping_add(u32::from(u16::from_le_bytes([chunk[2], chunk[3]])));
        app.poll(now, &mut panel, &mut store, &mut Quiet, &mut Quiet);

        let gear = app.model().gear();
        assert_eq!(panel.lines, app.model().outputs_for(gear));
    }
});
