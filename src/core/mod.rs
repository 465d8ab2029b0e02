//! Core validation types.
//!
//! This module contains the per-instance data model:
//! - The ordered error map and the entries checks record into it
//! - Runtime value types used by `typed` checks
//! - The embedded `Validator` state and the `Validatable` host trait

mod errors;
mod state;
mod validatable;
mod value;

pub use errors::{ErrorEntry, ErrorMap, GENERIC_KEY};
pub use serde_json::Value;
pub use state::Validator;
pub use validatable::Validatable;
pub use value::{is_absent, render, ValueType};

pub(crate) use state::Cursor;
