//! Named configuration slots and their fixed offsets in non-volatile storage.

use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// I2C address used while the address slot has never been written
pub const I2C_ADDRESS_DEFAULT: u8 = 0x20;

/// Number of active slots, which is also the number of bytes the store occupies
pub const SLOT_COUNT: usize = <Slot as EnumCount>::COUNT;

/// A configuration value kept between power cycles.
///
/// Discriminants are the byte offsets of the slots, assigned in declaration order. Existing slots
/// must never be renumbered or reordered, otherwise values stored by older firmware are read back
/// as something else. New slots are appended after the last one.
///
/// Offsets 3 and 4 were once planned for the stick's X/Y rest position and are still unused.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, FromRepr, IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// Device's I2C address
    #[strum(serialize = "I2C_ADDRESS")]
    I2cAddress = 0,
    /// Major version of the firmware that last flashed the device
    #[strum(serialize = "FIRMWARE_MAJOR")]
    FirmwareMajor = 1,
    /// Minor version of the firmware that last flashed the device
    #[strum(serialize = "FIRMWARE_MINOR")]
    FirmwareMinor = 2,
}

impl Slot {
    /// All slots, in offset order
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::I2cAddress, Slot::FirmwareMajor, Slot::FirmwareMinor];

    /// Every slot holds exactly one byte
    pub const WIDTH: usize = 1;

    /// Byte offset of the slot, relative to the start of the store
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Decode a raw offset, e.g. one received in a bus command.
    ///
    /// Returns `None` for offsets that don't belong to an active slot.
    pub const fn from_offset(offset: u8) -> Option<Slot> {
        Slot::from_repr(offset)
    }

    /// Name of the slot, as used in logs
    pub fn name(self) -> &'static str {
        self.into()
    }
}

// Slots must stay contiguous from offset 0
const _: () = {
    let mut i = 0;
    while i < SLOT_COUNT {
        assert!(Slot::ALL[i] as usize == i, "Slot offsets must be contiguous and start at 0");
        i += 1;
    }
};
