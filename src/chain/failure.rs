//! What a failing check records and triggers.

use crate::core::{ErrorEntry, ErrorMap};
use std::fmt;

/// Error override and failure callback for a single check.
///
/// Without an override the check records its default message. The callback
/// runs only on failure, after the error has been recorded.
#[derive(Default)]
pub struct Failure<'a> {
    pub(crate) error: Option<ErrorEntry>,
    pub(crate) callback: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> Failure<'a> {
    /// Default message, no callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the recorded error.
    pub fn error(mut self, entry: impl Into<ErrorEntry>) -> Self {
        self.error = Some(entry.into());
        self
    }

    /// Run `callback` when the check fails.
    pub fn then<F: FnOnce() + 'a>(mut self, callback: F) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub(crate) fn into_parts(self) -> (Option<ErrorEntry>, Option<Box<dyn FnOnce() + 'a>>) {
        (self.error, self.callback)
    }
}

impl fmt::Debug for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("error", &self.error)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl From<&str> for Failure<'_> {
    fn from(message: &str) -> Self {
        Failure::new().error(message)
    }
}

impl From<String> for Failure<'_> {
    fn from(message: String) -> Self {
        Failure::new().error(message)
    }
}

impl From<ErrorEntry> for Failure<'_> {
    fn from(entry: ErrorEntry) -> Self {
        Failure::new().error(entry)
    }
}

impl From<ErrorMap> for Failure<'_> {
    fn from(map: ErrorMap) -> Self {
        Failure::new().error(map)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Failure<'_> {
    fn from(pairs: [(K, V); N]) -> Self {
        Failure::new().error(ErrorMap::from(pairs))
    }
}
