#![allow(dead_code)]

use joystick_nvm::storage::RamStorage;
use joystick_nvm::{Eeprom, EepromConfig};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Size of the RAM medium used by tests, larger than the slots so stray writes are visible
pub const TEST_STORAGE_SIZE: usize = 32;

pub type TestEeprom = Eeprom<RamStorage<TEST_STORAGE_SIZE>>;

/// An eeprom on a freshly erased medium, erased value 0xFF
pub fn erased_eeprom() -> TestEeprom {
    Eeprom::new(
        RamStorage::with_erased_value(0xFF),
        EepromConfig {
            base_offset: 0,
            erased_value: 0xFF,
        },
    )
}

/// Simulate a power cycle: keep the medium, drop everything else
pub fn power_cycle(eeprom: TestEeprom) -> TestEeprom {
    let config = *eeprom.config();
    Eeprom::new(eeprom.release(), config)
}
