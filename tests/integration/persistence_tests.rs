//! Restart behaviour: what the EEPROM holds after operator actions and
//! what the controller comes back up with.

use gearbox::adapters::eeprom::{ERASED, EepromAdapter};
use gearbox::app::model::{Checkbox, ConfigurationModel, Gear, Page};
use gearbox::app::ports::ConfigPort;
use gearbox::persist::{ADDR_GEAR, ADDR_PAGE, LAYOUT_LEN, LayoutStore, matrix_addr, selection_addr};

use super::mock_hw::Rig;

#[test]
fn first_boot_on_erased_eeprom_uses_defaults() {
    let rig = Rig::boot(LayoutStore::new(EepromAdapter::new()));

    assert_eq!(*rig.app.model(), ConfigurationModel::default());
    assert_eq!(rig.app.model().page(), Page::Indicator);
    assert_eq!(rig.app.model().gear(), Gear::MIN);
    assert_eq!(rig.panel.lines, [false; 8]);
    // Loading never writes.
    assert_eq!(rig.eeprom_writes(), 0);
}

#[test]
fn state_survives_a_power_cycle() {
    let mut m = ConfigurationModel::new();
    m.set_page(Page::config_for(Gear::MIN).as_u8()).unwrap();
    let mut rig = Rig::with_model(&m);

    // Arm line 1 of gear 1, shift up twice, then move to the next page.
    rig.panel.encoder_button = true;
    rig.poll(0);
    rig.poll(40);
    rig.panel.encoder_button = false;
    rig.poll(50);
    rig.panel.gear_up = true;
    rig.poll(100);
    rig.panel.gear_up = false;
    rig.poll(200);
    rig.panel.gear_up = true;
    rig.poll(400);
    rig.panel.gear_up = false;
    rig.panel.turn(-1);
    rig.poll(450);
    rig.panel.encoder_button = true;
    rig.poll(500);
    rig.poll(1500);

    let before = *rig.app.model();
    assert_eq!(before.gear().get(), 3);
    assert_eq!(before.page(), Page::ConfigGear2);

    let image = rig.store.inner().image().to_vec();
    let rebooted = Rig::boot(LayoutStore::new(EepromAdapter::with_image(&image)));

    // The selection move was never persisted on its own, but the page
    // switch after it flushed the full snapshot.
    assert_eq!(*rebooted.app.model(), before);
    assert_eq!(
        rebooted.app.model().selection(Gear::MIN),
        Checkbox::new(7).unwrap()
    );
}

#[test]
fn layout_bytes_match_the_documented_addresses() {
    let mut m = ConfigurationModel::new();
    m.set_page(4).unwrap();
    m.set_gear(2).unwrap();
    m.set_selection(5, 6).unwrap();
    m.toggle_output(4, 3).unwrap();

    let mut store = LayoutStore::new(EepromAdapter::new());
    store.save(&m).unwrap();
    let image = store.inner().image();

    assert_eq!(image.len(), LAYOUT_LEN as usize);
    assert_eq!(image[ADDR_PAGE as usize], 4);
    assert_eq!(image[ADDR_GEAR as usize], 2);
    assert_eq!(image[selection_addr(Gear::MAX) as usize], 6);
    assert_eq!(image[2..7], [0, 0, 0, 0, 6]);

    let armed = matrix_addr(Gear::new(4).unwrap(), Checkbox::new(3).unwrap());
    assert_eq!(armed, 7 + 3 * 8 + 3);
    for (addr, &byte) in image.iter().enumerate().skip(7) {
        assert_eq!(byte, u8::from(addr == armed as usize), "cell {addr}");
    }
}

#[test]
fn corrupt_cells_fall_back_individually() {
    let mut image = vec![ERASED; LAYOUT_LEN as usize];
    image[ADDR_PAGE as usize] = 9;
    image[ADDR_GEAR as usize] = 4;
    image[selection_addr(Gear::MIN) as usize] = 3;
    image[selection_addr(Gear::MAX) as usize] = 8;
    image[matrix_addr(Gear::MIN, Checkbox::new(0).unwrap()) as usize] = 1;
    image[matrix_addr(Gear::MIN, Checkbox::new(1).unwrap()) as usize] = 2;

    let store = LayoutStore::new(EepromAdapter::with_image(&image));
    let m = store.load();

    assert_eq!(m.page(), Page::Indicator);
    assert_eq!(m.gear().get(), 4);
    assert_eq!(m.selection(Gear::MIN), Checkbox::new(3).unwrap());
    assert_eq!(m.selection(Gear::MAX), Checkbox::default());
    assert!(m.is_armed(Gear::MIN, Checkbox::new(0).unwrap()));
    assert!(!m.is_armed(Gear::MIN, Checkbox::new(1).unwrap()));
}

#[test]
fn unchanged_snapshot_costs_no_writes() {
    let mut store = LayoutStore::new(EepromAdapter::new());
    let m = ConfigurationModel::new();

    assert_eq!(store.save(&m), Ok(LAYOUT_LEN as usize));
    assert_eq!(store.save(&m), Ok(0));

    let mut changed = m;
    changed.set_gear(2).unwrap();
    assert_eq!(store.save(&changed), Ok(1));
    assert_eq!(store.inner().physical_writes(), LAYOUT_LEN as usize + 1);
}
