//! Media the store can live on.
//!
//! Anything implementing [`embedded_storage::Storage`] works. This module adds a RAM medium for
//! hosts and tests, and an adapter for EEPROM emulated in NOR flash.

mod nor_flash;
mod ram_storage;

pub use nor_flash::{last_sector_offset, nor_flash_storage};
pub use ram_storage::{RamStorage, RamStorageError};
