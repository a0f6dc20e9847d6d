//! # joystick-nvm
//!
//! Persistent configuration store for analog joystick firmware.
//!
//! A handful of single-byte settings survive power cycles in non-volatile storage. Each one lives
//! in a [`Slot`] with a fixed byte offset; [`Eeprom`] reads and writes those bytes over any medium
//! implementing [`embedded_storage::Storage`], and the [`settings`] policy turns raw bytes into the
//! values firmware actually uses, e.g. the I2C address falling back to [`I2C_ADDRESS_DEFAULT`]
//! while the medium is still erased.
//!
//! ## Storage layout
//!
//! | Offset | Slot | Meaning |
//! |---|---|---|
//! | 0 | [`Slot::I2cAddress`] | I2C bus address, erased means `0x20` |
//! | 1 | [`Slot::FirmwareMajor`] | Firmware major version recorded at flash time |
//! | 2 | [`Slot::FirmwareMinor`] | Firmware minor version recorded at flash time |
//!
//! Offsets are relative to [`EepromConfig::base_offset`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod eeprom;
pub mod shared;
pub mod slot;
pub mod storage;

pub use config::{EepromConfig, SettingsConfig};
pub use eeprom::settings::{self, FirmwareVersion, Settings, SettingsError};
pub use eeprom::{Eeprom, EepromError, RawValue};
pub use shared::SharedEeprom;
pub use slot::{I2C_ADDRESS_DEFAULT, SLOT_COUNT, Slot};

// Include generated constants
include!(concat!(env!("OUT_DIR"), "/constants.rs"));
