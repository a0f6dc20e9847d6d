//! Run time configuration of the store.
//!
//! Build time defaults come from `joystick.toml` (see `build.rs`), these structs let each
//! [`Eeprom`](crate::Eeprom) instance override them.

use crate::ERASED_VALUE;

/// Config for the medium backing the store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EepromConfig {
    /// Offset of the first slot in the medium.
    /// For EEPROM emulated in flash this is usually the start of the last sector.
    pub base_offset: u32,
    /// What a never-written byte reads as.
    /// 0xFF for EEPROM and NOR flash, which is the default unless `joystick.toml` says otherwise.
    pub erased_value: u8,
}

impl Default for EepromConfig {
    fn default() -> Self {
        Self {
            base_offset: 0,
            erased_value: ERASED_VALUE,
        }
    }
}

/// Config for the boot time settings load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsConfig {
    /// Write the default I2C address back when the slot is found erased
    pub persist_default_address: bool,
    /// Record the running firmware's version in the version slots
    pub record_firmware: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            persist_default_address: true,
            record_firmware: true,
        }
    }
}
