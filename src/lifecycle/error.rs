//! Lifecycle errors.

use crate::core::ErrorMap;
use thiserror::Error;

/// Errors surfaced by construction, dispatch and setter interception.
///
/// Every variant except `ValidationFailed` is a setup defect: the host is
/// wired up wrong and no amount of valid input will fix it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidyError {
    #[error("validation entry point `{method}` must be implemented for {host}")]
    MissingEntryPoint { method: String, host: &'static str },

    #[error("{host} implements both `{soft}` and `{strict}`; declare a binding to pick one")]
    AmbiguousEntryPoint {
        soft: String,
        strict: String,
        host: &'static str,
    },

    #[error("binding method name `{method}` is not a usable entry point name")]
    InvalidBinding { method: String },

    #[error("condition refers to unknown predicate `{name}` on {host}")]
    UnknownPredicate { name: String, host: &'static str },

    #[error("attribute `{name}` of {host} could not be read: {reason}")]
    AttributeUnreadable {
        name: String,
        host: &'static str,
        reason: String,
    },

    /// Strict dispatch found the instance invalid. Displays the error map
    /// as undelimited `key: value` pairs.
    #[error("{errors}")]
    ValidationFailed { errors: ErrorMap },

    #[error("validated instance lock poisoned by a panicking holder")]
    Poisoned,
}

impl ValidyError {
    /// Whether this error is a wiring defect rather than a business failure.
    pub fn is_setup_defect(&self) -> bool {
        !matches!(self, Self::ValidationFailed { .. })
    }

    /// Errors carried by a strict failure.
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::ValidationFailed { errors } => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_displays_concatenated_map() {
        let err = ValidyError::ValidationFailed {
            errors: ErrorMap::from([("error", "'1' is not a type Integer")]),
        };
        assert_eq!(err.to_string(), "error: '1' is not a type Integer");
        assert!(!err.is_setup_defect());
        assert_eq!(err.errors().map(ErrorMap::len), Some(1));
    }

    #[test]
    fn setup_defects_are_flagged() {
        let err = ValidyError::MissingEntryPoint {
            method: "validate".into(),
            host: "Foo",
        };
        assert!(err.is_setup_defect());
        assert!(err.errors().is_none());
        assert_eq!(
            err.to_string(),
            "validation entry point `validate` must be implemented for Foo"
        );
    }
}
