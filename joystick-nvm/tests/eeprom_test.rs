mod common;

use joystick_nvm::storage::{RamStorage, RamStorageError};
use joystick_nvm::{Eeprom, EepromConfig, EepromError, I2C_ADDRESS_DEFAULT, RawValue, Slot};
use log::debug;

use crate::common::{erased_eeprom, power_cycle};

#[test]
fn test_round_trip_every_value_every_slot() {
    let mut eeprom = erased_eeprom();
    for slot in Slot::ALL {
        for value in 0..=u8::MAX {
            eeprom.write(slot, value).unwrap();
            assert_eq!(eeprom.read(slot), Ok(value), "slot {:?}, value {}", slot, value);
        }
    }
}

#[test]
fn test_erased_storage_uses_default_address() {
    let mut eeprom = erased_eeprom();
    assert_eq!(eeprom.read(Slot::I2cAddress), Ok(0xFF));
    assert_eq!(eeprom.read_raw(Slot::I2cAddress), Ok(RawValue::Erased));
    assert_eq!(eeprom.i2c_address(), Ok(I2C_ADDRESS_DEFAULT));
    assert_eq!(eeprom.i2c_address(), Ok(0x20));
    // Reading applies no default and writes nothing
    assert_eq!(eeprom.storage().total_writes(), 0);
}

#[test]
fn test_written_address_is_used_as_is() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::I2cAddress, 0x35).unwrap();
    assert_eq!(eeprom.read(Slot::I2cAddress), Ok(0x35));
    assert_eq!(eeprom.read_raw(Slot::I2cAddress), Ok(RawValue::Stored(0x35)));
    assert_eq!(eeprom.i2c_address(), Ok(0x35));
}

#[test]
fn test_firmware_slots_are_independent() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::FirmwareMajor, 2).unwrap();
    eeprom.write(Slot::FirmwareMinor, 3).unwrap();
    assert_eq!(eeprom.read(Slot::FirmwareMajor), Ok(2));
    assert_eq!(eeprom.read(Slot::FirmwareMinor), Ok(3));
}

#[test]
fn test_write_is_isolated_to_its_slot() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::I2cAddress, 0x35).unwrap();
    eeprom.write(Slot::FirmwareMinor, 7).unwrap();

    eeprom.write(Slot::FirmwareMajor, 9).unwrap();
    assert_eq!(eeprom.read(Slot::FirmwareMinor), Ok(7));
    assert_eq!(eeprom.read(Slot::I2cAddress), Ok(0x35));

    // Only the three slot bytes were ever touched
    let storage = eeprom.storage();
    for offset in 3..common::TEST_STORAGE_SIZE {
        assert_eq!(storage.write_count(offset), 0);
        assert_eq!(storage.as_bytes()[offset], 0xFF);
    }
}

#[test]
fn test_values_survive_power_cycle() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::I2cAddress, 0x42).unwrap();
    eeprom.write(Slot::FirmwareMajor, 1).unwrap();

    let mut eeprom = power_cycle(eeprom);
    assert_eq!(eeprom.read(Slot::I2cAddress), Ok(0x42));
    assert_eq!(eeprom.read(Slot::FirmwareMajor), Ok(1));
    assert_eq!(eeprom.read_raw(Slot::FirmwareMinor), Ok(RawValue::Erased));
}

#[test]
fn test_full_erase_restores_default_address() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::I2cAddress, 0x42).unwrap();
    eeprom.storage_mut().erase_all();
    assert_eq!(eeprom.i2c_address(), Ok(0x20));
}

#[test]
fn test_base_offset() {
    let config = EepromConfig {
        base_offset: 16,
        erased_value: 0xFF,
    };
    let mut eeprom = Eeprom::new(RamStorage::<32>::with_erased_value(0xFF), config);
    eeprom.write(Slot::I2cAddress, 0x11).unwrap();
    eeprom.write(Slot::FirmwareMajor, 0x22).unwrap();
    eeprom.write(Slot::FirmwareMinor, 0x33).unwrap();

    let bytes = eeprom.storage().as_bytes();
    debug!("storage: {:02X?}", bytes);
    assert_eq!(&bytes[16..19], &[0x11, 0x22, 0x33]);
    assert!(bytes[..16].iter().all(|&b| b == 0xFF));
    assert!(bytes[19..].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_zero_erased_medium() {
    // Some media read as 0x00 when erased
    let config = EepromConfig {
        base_offset: 0,
        erased_value: 0x00,
    };
    let mut eeprom = Eeprom::new(RamStorage::<4>::with_erased_value(0x00), config);
    assert_eq!(eeprom.read_raw(Slot::I2cAddress), Ok(RawValue::Erased));
    assert_eq!(eeprom.i2c_address(), Ok(0x20));

    // 0xFF is an ordinary value on such a medium
    eeprom.write(Slot::I2cAddress, 0xFF).unwrap();
    assert_eq!(eeprom.i2c_address(), Ok(0xFF));
}

#[test]
fn test_read_fault() {
    let mut eeprom = erased_eeprom();
    eeprom.storage_mut().fail_reads(true);
    assert_eq!(
        eeprom.read(Slot::I2cAddress),
        Err(EepromError::StorageFault(RamStorageError::Fault))
    );
    assert_eq!(
        eeprom.i2c_address(),
        Err(EepromError::StorageFault(RamStorageError::Fault))
    );
}

#[test]
fn test_write_fault_leaves_value_untouched() {
    let mut eeprom = erased_eeprom();
    eeprom.write(Slot::FirmwareMajor, 1).unwrap();

    eeprom.storage_mut().fail_writes(true);
    assert_eq!(
        eeprom.write(Slot::FirmwareMajor, 2),
        Err(EepromError::StorageFault(RamStorageError::Fault))
    );

    eeprom.storage_mut().fail_writes(false);
    assert_eq!(eeprom.read(Slot::FirmwareMajor), Ok(1));
}

#[test]
fn test_error_display() {
    let e: EepromError<RamStorageError> = EepromError::StorageFault(RamStorageError::Fault);
    assert_eq!(e.to_string(), "storage fault: Fault");
}
