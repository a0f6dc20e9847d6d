//! Access to one [`Eeprom`] from several contexts, e.g. the main loop and an I2C interrupt.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_storage::Storage;

use crate::eeprom::{Eeprom, EepromError};
use crate::slot::Slot;

/// An [`Eeprom`] behind a blocking mutex.
///
/// `M` picks how access is serialized: `CriticalSectionRawMutex` when an interrupt handler
/// touches the store, `ThreadModeRawMutex` or `NoopRawMutex` when only one executor does. With a
/// critical section every access runs with interrupts disabled, keep the closures short since a
/// flash write blocks interrupts for its whole duration.
pub struct SharedEeprom<M: RawMutex, S: Storage> {
    inner: Mutex<M, RefCell<Eeprom<S>>>,
}

impl<M: RawMutex, S: Storage> SharedEeprom<M, S> {
    pub const fn new(eeprom: Eeprom<S>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(eeprom)),
        }
    }

    /// Run `f` with exclusive access to the eeprom.
    ///
    /// # Panics
    ///
    /// Critical sections nest, so calling any method of the same `SharedEeprom` from inside `f`
    /// doesn't block: it panics because the eeprom is already borrowed. Use the `&mut Eeprom`
    /// passed to `f` instead.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Eeprom<S>) -> R) -> R {
        self.inner.lock(|eeprom| f(&mut *eeprom.borrow_mut()))
    }

    pub fn read(&self, slot: Slot) -> Result<u8, EepromError<S::Error>> {
        self.lock(|eeprom| eeprom.read(slot))
    }

    pub fn write(&self, slot: Slot, value: u8) -> Result<(), EepromError<S::Error>> {
        self.lock(|eeprom| eeprom.write(slot, value))
    }

    pub fn i2c_address(&self) -> Result<u8, EepromError<S::Error>> {
        self.lock(|eeprom| eeprom.i2c_address())
    }
}
