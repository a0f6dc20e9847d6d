//! Effective values on top of the raw slots.
//!
//! Raw reads never substitute anything. The policy lives here: an erased I2C address slot means
//! [`I2C_ADDRESS_DEFAULT`], erased version slots mean "no firmware version recorded".

use core::fmt;

use embedded_storage::Storage;

use super::{Eeprom, EepromError, RawValue};
use crate::config::SettingsConfig;
use crate::slot::{I2C_ADDRESS_DEFAULT, Slot};
use crate::{FIRMWARE_VERSION_MAJOR, FIRMWARE_VERSION_MINOR};

/// Lowest usable 7-bit I2C address, 0x00..=0x07 are reserved
pub const I2C_ADDRESS_MIN: u8 = 0x08;
/// Highest usable 7-bit I2C address, 0x78..=0x7F are reserved
pub const I2C_ADDRESS_MAX: u8 = 0x77;

/// Address the device should answer on, given the raw slot byte.
///
/// An erased slot falls back to [`I2C_ADDRESS_DEFAULT`]. Any other byte is used as is.
pub fn effective_i2c_address(raw: u8, erased_value: u8) -> u8 {
    match RawValue::classify(raw, erased_value) {
        RawValue::Erased => I2C_ADDRESS_DEFAULT,
        RawValue::Stored(address) => address,
    }
}

/// Whether `address` can be assigned to the device
pub fn is_valid_i2c_address(address: u8) -> bool {
    (I2C_ADDRESS_MIN..=I2C_ADDRESS_MAX).contains(&address)
}

/// Firmware version as kept in the version slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    /// Version of the running firmware
    pub const CURRENT: FirmwareVersion = FirmwareVersion::new(FIRMWARE_VERSION_MAJOR, FIRMWARE_VERSION_MINOR);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error of settings updates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError<E> {
    Eeprom(EepromError<E>),
    /// The address is outside of `I2C_ADDRESS_MIN..=I2C_ADDRESS_MAX`
    InvalidAddress(u8),
}

impl<E> From<EepromError<E>> for SettingsError<E> {
    fn from(e: EepromError<E>) -> Self {
        SettingsError::Eeprom(e)
    }
}

impl<E: fmt::Debug> fmt::Display for SettingsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Eeprom(e) => write!(f, "{e}"),
            SettingsError::InvalidAddress(address) => write!(f, "invalid I2C address 0x{address:02X}"),
        }
    }
}

impl<S: Storage> Eeprom<S> {
    /// Returns the I2C address the device should use
    pub fn i2c_address(&mut self) -> Result<u8, EepromError<S::Error>> {
        let raw = self.read(Slot::I2cAddress)?;
        Ok(effective_i2c_address(raw, self.config.erased_value))
    }

    /// Save a new I2C address, rejecting reserved addresses before touching the medium.
    ///
    /// The device keeps answering on the old address until it is restarted.
    pub fn set_i2c_address(&mut self, address: u8) -> Result<(), SettingsError<S::Error>> {
        if !is_valid_i2c_address(address) {
            warn!("Reject I2C address 0x{:X}", address);
            return Err(SettingsError::InvalidAddress(address));
        }
        self.write(Slot::I2cAddress, address)?;
        Ok(())
    }

    /// Returns the recorded firmware version, `None` if it was never recorded
    pub fn firmware_version(&mut self) -> Result<Option<FirmwareVersion>, EepromError<S::Error>> {
        let major = self.read_raw(Slot::FirmwareMajor)?;
        let minor = self.read_raw(Slot::FirmwareMinor)?;
        match (major.value(), minor.value()) {
            (Some(major), Some(minor)) => Ok(Some(FirmwareVersion::new(major, minor))),
            _ => Ok(None),
        }
    }

    /// Record `version` in the version slots.
    ///
    /// Slots already holding the right value are not rewritten. Returns whether anything was written.
    ///
    /// The two slots are written one after the other. If the minor slot fails after the major one
    /// succeeded, the error is returned and the slots are left holding the new major with the old
    /// minor, a version that was never flashed. Nothing is rolled back, calling it again repairs it.
    pub fn record_firmware_version(&mut self, version: FirmwareVersion) -> Result<bool, EepromError<S::Error>> {
        let major_written = self.update(Slot::FirmwareMajor, version.major)?;
        let minor_written = self.update(Slot::FirmwareMinor, version.minor)?;
        if major_written || minor_written {
            info!("Recorded firmware version {}.{}", version.major, version.minor);
        }
        Ok(major_written || minor_written)
    }
}

/// Effective settings, as loaded at boot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub i2c_address: u8,
    pub firmware: Option<FirmwareVersion>,
}

impl Settings {
    /// Read all slots and apply the default policy.
    ///
    /// Depending on `config`, an erased address slot gets the default address written back, and the
    /// running firmware's version gets recorded. `firmware` is what the version slots read back as
    /// afterwards, so it is `None` whenever either slot holds the erased value.
    pub fn load<S: Storage>(eeprom: &mut Eeprom<S>, config: &SettingsConfig) -> Result<Self, EepromError<S::Error>> {
        let i2c_address = match eeprom.read_raw(Slot::I2cAddress)? {
            RawValue::Stored(address) => address,
            RawValue::Erased => {
                info!("I2C address is not set, use default 0x{:X}", I2C_ADDRESS_DEFAULT);
                if config.persist_default_address {
                    eeprom.write(Slot::I2cAddress, I2C_ADDRESS_DEFAULT)?;
                }
                I2C_ADDRESS_DEFAULT
            }
        };

        if config.record_firmware {
            eeprom.record_firmware_version(FirmwareVersion::CURRENT)?;
        }
        // A version component equal to the erased value reads back as not recorded
        let firmware = eeprom.firmware_version()?;

        debug!("Settings loaded, I2C address 0x{:X}", i2c_address);
        Ok(Self { i2c_address, firmware })
    }
}
