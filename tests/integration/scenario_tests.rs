//! End-to-end operator scenarios: raw panel samples in, outputs, redraws,
//! events and EEPROM writes out.

use gearbox::app::events::{Advisory, AppEvent};
use gearbox::app::model::{Checkbox, ConfigurationModel, Gear, Page};
use gearbox::app::ports::{ConfigPort, Region};
use gearbox::app::service::AppService;
use gearbox::config::ControllerConfig;
use gearbox::persist::LayoutStore;

use super::mock_hw::{BrokenBytes, MockPanel, RecordingScreen, RecordingSink, Rig};

fn gear(n: u8) -> Gear {
    Gear::new(n).unwrap()
}

fn cb(n: u8) -> Checkbox {
    Checkbox::new(n).unwrap()
}

/// Active gear 3, showing the gear-2 configuration page, selection 4.
fn third_gear_editing_second() -> ConfigurationModel {
    let mut m = ConfigurationModel::new();
    m.set_gear(3).unwrap();
    m.set_page(Page::config_for(gear(2)).as_u8()).unwrap();
    m.set_selection(2, 4).unwrap();
    m.toggle_output(3, 0).unwrap();
    m.toggle_output(3, 6).unwrap();
    m
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_outputs_and_paints_loaded_page() {
    let rig = Rig::with_model(&third_gear_editing_second());

    let mut expected = [false; 8];
    expected[0] = true;
    expected[6] = true;
    assert_eq!(rig.panel.lines, expected);

    assert_eq!(rig.screen.full.len(), 1);
    let view = rig.screen.full[0];
    assert_eq!(view.page, Page::ConfigGear2);
    assert_eq!(view.selection, Some(cb(4)));
    assert_eq!(view.checkboxes, [false; 8]);
    assert!(matches!(rig.sink.events[0], AppEvent::Started { .. }));
}

#[test]
fn start_ignores_stale_encoder_count() {
    let mut store = LayoutStore::new(gearbox::adapters::eeprom::EepromAdapter::new());
    store.save(&third_gear_editing_second()).unwrap();

    let mut panel = MockPanel {
        count: 37,
        ..MockPanel::default()
    };
    let (mut screen, mut sink) = (RecordingScreen::default(), RecordingSink::default());
    let mut app = AppService::new(&ControllerConfig::default(), store.load());
    app.start(&mut panel, &mut screen, &mut sink);

    assert_eq!(app.poll(10, &mut panel, &mut store, &mut screen, &mut sink), 0);
    assert_eq!(app.model().selection(gear(2)), cb(4));
}

// ── Rotation ──────────────────────────────────────────────────

#[test]
fn clockwise_detent_moves_selection_without_saving() {
    let mut rig = Rig::with_model(&third_gear_editing_second());
    rig.clear_history();
    let writes = rig.eeprom_writes();

    rig.panel.turn(1);
    assert_eq!(rig.poll(10), 1);

    assert_eq!(rig.app.model().selection(gear(2)), cb(5));
    assert_eq!(rig.eeprom_writes(), writes);
    assert_eq!(rig.sink.persisted(), 0);
    assert_eq!(
        rig.screen.partial,
        vec![
            Region::Checkbox {
                index: cb(4),
                armed: false,
                highlighted: false
            },
            Region::Checkbox {
                index: cb(5),
                armed: false,
                highlighted: true
            },
        ]
    );
}

#[test]
fn half_detent_does_nothing() {
    let mut rig = Rig::with_model(&third_gear_editing_second());
    rig.clear_history();

    rig.panel.count += 2;
    assert_eq!(rig.poll(10), 0);
    assert_eq!(rig.app.model().selection(gear(2)), cb(4));
    assert!(rig.screen.partial.is_empty());
}

#[test]
fn rotation_on_indicator_page_is_ignored() {
    let mut rig = Rig::with_model(&ConfigurationModel::new());
    rig.clear_history();

    rig.panel.turn(1);
    rig.poll(10);

    assert_eq!(*rig.app.model(), ConfigurationModel::new());
    assert!(rig.screen.partial.is_empty());
}

// ── Encoder button ────────────────────────────────────────────

#[test]
fn short_press_arms_selected_line_of_edited_gear_only() {
    let mut m = third_gear_editing_second();
    m.set_selection(2, 5).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();
    let writes = rig.eeprom_writes();

    rig.panel.encoder_button = true;
    rig.poll(10);
    rig.poll(60);
    rig.panel.encoder_button = false;
    rig.poll(120);

    assert!(rig.app.model().is_armed(gear(2), cb(5)));
    assert_eq!(rig.eeprom_writes(), writes + 1);
    assert_eq!(rig.sink.persisted(), 1);
    // Gear 2 is not the active gear: the physical lines stay put.
    assert!(rig.panel.writes.is_empty());
    assert!(rig.sink.events.contains(&AppEvent::OutputToggled {
        gear: gear(2),
        line: cb(5),
        armed: true,
        live: false,
    }));
}

#[test]
fn short_press_on_active_gear_page_updates_lines_live() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::config_for(Gear::MIN).as_u8()).unwrap();
    m.set_selection(1, 2).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();

    rig.panel.encoder_button = true;
    rig.poll(0);
    rig.poll(40);
    rig.panel.encoder_button = false;
    rig.poll(50);

    assert!(rig.panel.lines[2]);
    assert_eq!(rig.app.live_outputs(), rig.panel.lines);
}

#[test]
fn bouncing_switch_toggles_once_per_press() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::config_for(Gear::MIN).as_u8()).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();

    let samples = [
        (0, true),
        (10, false),
        (20, true),
        (30, true),
        (150, true),
        (160, false),
        (165, true),
        (170, false),
        (200, false),
    ];
    for (t, level) in samples {
        rig.panel.encoder_button = level;
        rig.poll(t);
    }

    let toggles = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::OutputToggled { .. }))
        .count();
    assert_eq!(toggles, 1);
    assert!(rig.app.model().is_armed(Gear::MIN, cb(0)));
    assert_eq!(rig.sink.persisted(), 1);
}

#[test]
fn switch_blip_shorter_than_debounce_is_ignored() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::config_for(Gear::MIN).as_u8()).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();
    let writes = rig.eeprom_writes();

    rig.panel.encoder_button = true;
    rig.poll(0);
    rig.poll(20);
    rig.panel.encoder_button = false;
    rig.poll(25);

    assert_eq!(*rig.app.model(), m);
    assert_eq!(rig.eeprom_writes(), writes);
    assert_eq!(rig.sink.persisted(), 0);
}

#[test]
fn long_press_on_last_page_wraps_to_indicator() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::ConfigGear5.as_u8()).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();

    rig.panel.encoder_button = true;
    rig.poll(0);
    rig.poll(999);
    assert_eq!(rig.app.model().page(), Page::ConfigGear5);
    rig.poll(1000);
    assert_eq!(rig.app.model().page(), Page::Indicator);

    // Releasing after a long press is not a short press.
    rig.panel.encoder_button = false;
    rig.poll(1100);

    assert_eq!(rig.screen.full.len(), 1);
    assert_eq!(rig.screen.full[0].page, Page::Indicator);
    assert_eq!(rig.sink.persisted(), 1);
    assert_eq!(rig.store.inner().image()[0], 1);
}

// ── Gear buttons ──────────────────────────────────────────────

#[test]
fn double_tap_inside_debounce_shifts_once() {
    let mut rig = Rig::with_model(&ConfigurationModel::new());
    rig.clear_history();

    rig.panel.gear_up = true;
    rig.poll(0);
    rig.panel.gear_up = false;
    rig.poll(50);
    rig.panel.gear_up = true;
    rig.poll(100);
    rig.panel.gear_up = false;
    rig.poll(150);

    assert_eq!(rig.app.model().gear(), gear(2));
    assert_eq!(rig.sink.persisted(), 1);
}

#[test]
fn second_tap_after_debounce_shifts_again() {
    let mut rig = Rig::with_model(&ConfigurationModel::new());

    rig.panel.gear_up = true;
    rig.poll(0);
    rig.panel.gear_up = false;
    rig.poll(100);
    rig.panel.gear_up = true;
    rig.poll(250);

    assert_eq!(rig.app.model().gear(), gear(3));
    assert_eq!(rig.store.inner().image()[1], 3);
}

#[test]
fn shift_drives_new_gear_row_and_redraws_glyph() {
    let mut m = ConfigurationModel::new();
    m.toggle_output(2, 1).unwrap();
    m.toggle_output(1, 7).unwrap();
    let mut rig = Rig::with_model(&m);
    assert!(rig.panel.lines[7]);
    rig.clear_history();

    rig.panel.gear_up = true;
    rig.poll(0);

    let mut expected = [false; 8];
    expected[1] = true;
    assert_eq!(rig.panel.lines, expected);
    assert_eq!(rig.screen.partial, vec![Region::GearGlyph(gear(2))]);
    assert!(rig.sink.events.contains(&AppEvent::GearChanged {
        from: gear(1),
        to: gear(2),
    }));
}

#[test]
fn up_at_top_gear_only_shows_advisory() {
    let mut m = ConfigurationModel::new();
    m.set_gear(5).unwrap();
    m.toggle_output(5, 3).unwrap();
    let mut rig = Rig::with_model(&m);
    let lines = rig.panel.lines;
    rig.clear_history();
    let writes = rig.eeprom_writes();

    rig.panel.gear_up = true;
    rig.poll(500);

    assert_eq!(rig.app.model().gear(), Gear::MAX);
    assert_eq!(rig.app.advisory(), Some(Advisory::MaxGear));
    assert_eq!(rig.eeprom_writes(), writes);
    assert_eq!(rig.sink.persisted(), 0);
    assert!(rig.panel.writes.is_empty());
    assert_eq!(rig.panel.lines, lines);
    assert_eq!(rig.screen.partial, vec![Region::Advisory(Some(Advisory::MaxGear))]);
    assert_eq!(Advisory::MaxGear.text(), "Max Gear Reached");

    rig.panel.gear_up = false;
    rig.poll(2499);
    assert_eq!(rig.app.advisory(), Some(Advisory::MaxGear));
    rig.poll(2500);
    assert_eq!(rig.app.advisory(), None);
    assert_eq!(rig.screen.partial.last(), Some(&Region::Advisory(None)));
}

#[test]
fn down_at_first_gear_shows_min_advisory() {
    let mut rig = Rig::with_model(&ConfigurationModel::new());
    rig.clear_history();

    rig.panel.gear_down = true;
    rig.poll(0);

    assert_eq!(rig.app.model().gear(), Gear::MIN);
    assert_eq!(rig.app.advisory(), Some(Advisory::MinGear));
    assert_eq!(rig.app.page_view().advisory, Some(Advisory::MinGear));
    assert_eq!(rig.sink.events, vec![AppEvent::GearLimit(Advisory::MinGear)]);
}

#[test]
fn advisory_survives_clock_wrap() {
    let mut m = ConfigurationModel::new();
    m.set_gear(5).unwrap();
    let mut rig = Rig::with_model(&m);

    let t0 = u32::MAX - 500;
    rig.panel.gear_up = true;
    rig.poll(t0);
    rig.panel.gear_up = false;
    rig.poll(t0.wrapping_add(1000));
    assert_eq!(rig.app.advisory(), Some(Advisory::MaxGear));
    rig.poll(t0.wrapping_add(2000));
    assert_eq!(rig.app.advisory(), None);
}

// ── Simultaneous controls ─────────────────────────────────────

#[test]
fn one_poll_applies_intents_in_fixed_order() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::config_for(Gear::MIN).as_u8()).unwrap();
    let mut rig = Rig::with_model(&m);
    rig.clear_history();

    rig.panel.encoder_button = true;
    rig.poll(0);
    rig.poll(40);
    rig.panel.encoder_button = false;
    rig.panel.turn(1);
    rig.panel.gear_up = true;
    assert_eq!(rig.poll(60), 3);

    // Toggle hit checkbox 0 before rotation moved the selection to 1.
    assert!(rig.app.model().is_armed(Gear::MIN, cb(0)));
    assert_eq!(rig.app.model().selection(Gear::MIN), cb(1));
    assert_eq!(rig.app.model().gear(), gear(2));
}

// ── Storage failure ───────────────────────────────────────────

#[test]
fn broken_storage_keeps_the_controller_running() {
    let mut store = LayoutStore::new(BrokenBytes);
    let model = store.load();
    assert_eq!(model, ConfigurationModel::default());

    let mut panel = MockPanel::default();
    let (mut screen, mut sink) = (RecordingScreen::default(), RecordingSink::default());
    let mut app = AppService::new(&ControllerConfig::default(), model);
    app.start(&mut panel, &mut screen, &mut sink);

    panel.gear_up = true;
    app.poll(0, &mut panel, &mut store, &mut screen, &mut sink);

    assert_eq!(app.model().gear(), gear(2));
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::PersistFailed(_)))
    );
}
