//! Fuzz target: `LayoutStore::load` over arbitrary EEPROM images
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The loaded model always passes its own range checks
//! - Saving the loaded model and loading again yields the same model
//!
//! cargo fuzz run fuzz_layout_load

#![no_main]

use gearbox::adapters::eeprom::EepromAdapter;
use gearbox::app::ports::ConfigPort;
use gearbox::persist::LayoutStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut store = LayoutStore::new(EepromAdapter::with_image(data));
    let model = store.load();

    assert!((1..=6).contains(&model.page().as_u8()));
    assert!((1..=5).contains(&model.gear().get()));

    store.save(&model).expect("sim store never fails in range");
    assert_eq!(store.load(), model);
    assert_eq!(store.save(&model), Ok(0));
});
