use embedded_storage::nor_flash::{NorFlash, RmwNorFlashStorage};

/// Use a NOR flash as byte-addressable storage, aka EEPROM emulation.
///
/// Writing a byte reads the whole sector into `merge_buffer`, erases the sector if needed and
/// writes it back, so `merge_buffer` must hold at least one sector. Every slot write may cost a
/// sector erase, keep writes rare.
pub fn nor_flash_storage<F: NorFlash>(flash: F, merge_buffer: &mut [u8]) -> RmwNorFlashStorage<'_, F> {
    assert!(
        merge_buffer.len() >= F::ERASE_SIZE,
        "Merge buffer MUST BE at least one sector large"
    );
    info!(
        "Flash capacity {} KB, sector size {} bytes",
        flash.capacity() / 1024,
        F::ERASE_SIZE
    );
    RmwNorFlashStorage::new(flash, merge_buffer)
}

/// Start of the last sector of `flash`, the usual place to keep configuration
pub fn last_sector_offset<F: NorFlash>(flash: &F) -> u32 {
    (flash.capacity() - F::ERASE_SIZE) as u32
}
