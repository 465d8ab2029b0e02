//! Per-instance validation state.

use crate::core::errors::{ErrorEntry, ErrorMap};
use crate::core::value::is_absent;
use crate::lifecycle::{ResolvedBinding, ValidyError};
use serde::Serialize;
use serde_json::Value;

/// Attribute currently under evaluation by the chain.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cursor {
    pub(crate) attribute: String,
    pub(crate) value: Value,
    pub(crate) optional: bool,
}

impl Cursor {
    /// Optional cursors with an absent value skip every following check.
    pub(crate) fn skips_checks(&self) -> bool {
        self.optional && is_absent(&self.value)
    }
}

/// Validation component embedded in a host object.
///
/// Owns the error map and validity flag for the host's whole life, the
/// transient evaluation cursor used by the chain, and the entry point
/// binding once it has been resolved. Nothing here is shared between
/// instances.
///
/// Serializes as `{"valid": bool, "errors": {...}}`.
#[derive(Debug, Serialize)]
pub struct Validator {
    valid: bool,
    errors: ErrorMap,
    #[serde(skip)]
    pub(crate) cursor: Option<Cursor>,
    #[serde(skip)]
    pub(crate) binding: Option<ResolvedBinding>,
    #[serde(skip)]
    pub(crate) fault: Option<ValidyError>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: ErrorMap::new(),
            cursor: None,
            binding: None,
            fault: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_invalid(&self) -> bool {
        !self.valid
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Binding resolved for this instance, if any pass has run yet.
    pub fn binding(&self) -> Option<&ResolvedBinding> {
        self.binding.as_ref()
    }

    /// Merge an error into the map and mark the instance invalid.
    ///
    /// Always returns `false` so it can end a manual check. An empty map
    /// records nothing and leaves validity untouched.
    pub fn add_error(&mut self, entry: impl Into<ErrorEntry>) -> bool {
        let map = entry.into().into_map();
        if !map.is_empty() {
            self.errors.merge(map);
            self.valid = false;
        }
        false
    }

    /// Clear errors, validity and cursor before a new pass.
    pub(crate) fn reset(&mut self) {
        self.valid = true;
        self.errors.clear();
        self.cursor = None;
        self.fault = None;
    }

    /// Record the first setup defect seen during a pass.
    pub(crate) fn record_fault(&mut self, fault: ValidyError) {
        if self.fault.is_none() {
            self.fault = Some(fault);
        }
    }

    pub(crate) fn take_fault(&mut self) -> Option<ValidyError> {
        self.fault.take()
    }

    pub(crate) fn has_fault(&self) -> bool {
        self.fault.is_some()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
