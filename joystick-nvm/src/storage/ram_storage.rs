use embedded_storage::{ReadStorage, Storage};

use crate::ERASED_VALUE;

/// Error of [`RamStorage`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RamStorageError {
    /// The access runs past the end of the storage
    OutOfBounds,
    /// A fault injected by `fail_reads`, `fail_writes` or `fail_writes_after`
    Fault,
}

/// Byte storage kept in RAM, which can be used when no EEPROM is available, e.g. on host.
///
/// It starts erased, counts writes per byte and can be told to fail.
pub struct RamStorage<const N: usize> {
    data: [u8; N],
    erased_value: u8,
    write_counts: [u32; N],
    fail_reads: bool,
    /// Writes still allowed before faulting, `None` for no limit
    writes_left: Option<u32>,
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStorage<N> {
    /// Create an erased storage, using the erased value from build config
    pub fn new() -> Self {
        Self::with_erased_value(ERASED_VALUE)
    }

    pub fn with_erased_value(erased_value: u8) -> Self {
        Self {
            data: [erased_value; N],
            erased_value,
            write_counts: [0; N],
            fail_reads: false,
            writes_left: None,
        }
    }

    /// Reset every byte to the erased value, like a full chip erase
    pub fn erase_all(&mut self) {
        self.data = [self.erased_value; N];
    }

    /// Make every following read fail, or succeed again
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every following write fail, or succeed again
    pub fn fail_writes(&mut self, fail: bool) {
        self.writes_left = if fail { Some(0) } else { None };
    }

    /// Let `count` more writes succeed, then fail every following one
    pub fn fail_writes_after(&mut self, count: u32) {
        self.writes_left = Some(count);
    }

    /// Number of times the byte at `offset` was written
    pub fn write_count(&self, offset: usize) -> u32 {
        self.write_counts.get(offset).copied().unwrap_or(0)
    }

    /// Number of byte writes since creation
    pub fn total_writes(&self) -> u32 {
        self.write_counts.iter().sum()
    }

    /// Current content
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn range(offset: u32, len: usize) -> Result<core::ops::Range<usize>, RamStorageError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(RamStorageError::OutOfBounds)?;
        if end > N {
            return Err(RamStorageError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl<const N: usize> ReadStorage for RamStorage<N> {
    type Error = RamStorageError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(RamStorageError::Fault);
        }
        let range = Self::range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.data[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Storage for RamStorage<N> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.writes_left == Some(0) {
            return Err(RamStorageError::Fault);
        }
        let range = Self::range(offset, bytes.len())?;
        if let Some(left) = self.writes_left.as_mut() {
            *left -= 1;
        }
        for count in &mut self.write_counts[range.clone()] {
            *count += 1;
        }
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }
}
