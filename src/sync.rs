//! Thread-safe handle to a validated instance.
//!
//! `&mut` access already makes "assign → re-run → read validity" atomic for
//! a single owner. [`Shared`] keeps that guarantee when several threads
//! mutate the same instance by holding one lock across the whole sequence.

use crate::core::{ErrorMap, Validatable};
use crate::lifecycle::ValidyError;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, lock-protected validated instance.
pub struct Shared<H> {
    inner: Arc<Mutex<H>>,
}

impl<H: Validatable> Shared<H> {
    /// Construct `host` and wrap it.
    pub fn construct(host: H) -> Result<Self, ValidyError> {
        Ok(Self::new(host.validated()?))
    }

    /// Wrap an already constructed host.
    pub fn new(host: H) -> Self {
        Self {
            inner: Arc::new(Mutex::new(host)),
        }
    }

    /// Assign and re-validate under a single lock.
    pub fn assign<F: FnOnce(&mut H)>(&self, attribute: &str, apply: F) -> Result<bool, ValidyError> {
        self.lock()?.assign(attribute, apply)
    }

    pub fn valid(&self) -> Result<bool, ValidyError> {
        Ok(self.lock()?.valid())
    }

    pub fn errors(&self) -> Result<ErrorMap, ValidyError> {
        Ok(self.lock()?.errors().clone())
    }

    /// Run the entry point in its resolved mode.
    pub fn run_entry_point(&self) -> Result<bool, ValidyError> {
        self.lock()?.run_entry_point()
    }

    /// Run `f` with exclusive access to the host.
    pub fn with<R>(&self, f: impl FnOnce(&mut H) -> R) -> Result<R, ValidyError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    fn lock(&self) -> Result<MutexGuard<'_, H>, ValidyError> {
        self.inner.lock().map_err(|_| ValidyError::Poisoned)
    }
}

impl<H> Clone for Shared<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
