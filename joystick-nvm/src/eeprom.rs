pub mod settings;

use core::fmt;

use embedded_storage::Storage;

use crate::config::EepromConfig;
use crate::slot::{SLOT_COUNT, Slot};

/// Error of EEPROM operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError<E> {
    /// The underlying medium failed a read or a write
    StorageFault(E),
}

impl<E: fmt::Debug> fmt::Display for EepromError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EepromError::StorageFault(e) => write!(f, "storage fault: {e:?}"),
        }
    }
}

/// A raw slot byte, classified against the medium's erased value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawValue {
    /// The slot reads as erased, it has never been written
    Erased,
    /// The slot holds a written value
    Stored(u8),
}

impl RawValue {
    pub fn classify(byte: u8, erased_value: u8) -> Self {
        if byte == erased_value {
            RawValue::Erased
        } else {
            RawValue::Stored(byte)
        }
    }

    pub fn value(self) -> Option<u8> {
        match self {
            RawValue::Erased => None,
            RawValue::Stored(v) => Some(v),
        }
    }
}

/// Eeprom based on any storage device which implements `embedded-storage::Storage` trait.
///
/// It holds no state besides the medium and its config: every read and write goes straight to the
/// medium. Access is not synchronized, wrap it in [`SharedEeprom`](crate::SharedEeprom) when more
/// than one context touches it.
pub struct Eeprom<S: Storage> {
    storage: S,
    config: EepromConfig,
}

impl<S: Storage> Eeprom<S> {
    pub fn new(storage: S, config: EepromConfig) -> Self {
        let end = config.base_offset as usize + SLOT_COUNT * Slot::WIDTH;
        info!(
            "Storage capacity {} bytes, {} slots starting from 0x{:X}",
            storage.capacity(),
            SLOT_COUNT,
            config.base_offset,
        );
        assert!(
            end <= storage.capacity(),
            "Configuration slots don't fit in the storage, check `base_offset`"
        );

        Self { storage, config }
    }

    pub fn config(&self) -> &EepromConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give back the medium
    pub fn release(self) -> S {
        self.storage
    }

    /// Absolute offset of the slot in the medium
    pub fn offset_of(&self, slot: Slot) -> u32 {
        self.config.base_offset + slot.offset()
    }

    /// Read the byte stored in `slot`.
    ///
    /// The byte is returned as is: an erased slot reads as the erased value, no default is applied.
    pub fn read(&mut self, slot: Slot) -> Result<u8, EepromError<S::Error>> {
        let offset = self.offset_of(slot);
        let mut buf = [self.config.erased_value; Slot::WIDTH];
        self.storage.read(offset, &mut buf).map_err(|e| {
            error!("Failed to read {} at 0x{:X}", slot.name(), offset);
            EepromError::StorageFault(e)
        })?;
        trace!("Read {} = 0x{:X}", slot.name(), buf[0]);
        Ok(buf[0])
    }

    /// Read `slot` and tell whether it has been written
    pub fn read_raw(&mut self, slot: Slot) -> Result<RawValue, EepromError<S::Error>> {
        let byte = self.read(slot)?;
        Ok(RawValue::classify(byte, self.config.erased_value))
    }

    /// Write `value` to `slot`.
    ///
    /// Every call wears the medium, don't call it in a loop.
    pub fn write(&mut self, slot: Slot, value: u8) -> Result<(), EepromError<S::Error>> {
        let offset = self.offset_of(slot);
        debug!("Write {} = 0x{:X} at 0x{:X}", slot.name(), value, offset);
        self.storage.write(offset, &[value]).map_err(|e| {
            error!("Failed to write {} at 0x{:X}", slot.name(), offset);
            EepromError::StorageFault(e)
        })
    }

    /// Write `value` to `slot` only if the stored byte differs.
    ///
    /// Returns whether the medium was written.
    pub fn update(&mut self, slot: Slot, value: u8) -> Result<bool, EepromError<S::Error>> {
        if self.read(slot)? == value {
            trace!("{} already holds 0x{:X}, skip writing", slot.name(), value);
            return Ok(false);
        }
        self.write(slot, value)?;
        Ok(true)
    }
}
