//! Validy: a validation lifecycle for plain Rust objects
//!
//! A host object embeds a [`Validator`] and registers one validation body.
//! Construction resolves which entry point that body belongs to (soft or
//! strict), runs it, and either returns the object with its validity flag or
//! fails with the accumulated errors.
//!
//! # Core Concepts
//!
//! - **Lifecycle**: entry point resolution, dispatch and validating setters
//! - **Chain**: fluent `required` / `optional` / `typed` / `condition` checks
//!   that stop at the first failure
//! - **Errors**: an ordered key → message map with a validity flag that
//!   only degrades during a pass
//!
//! # Example
//!
//! ```rust
//! use serde::Serialize;
//! use validy::{validatable, Validatable, ValueType, Validator};
//!
//! #[derive(Serialize)]
//! struct Foo {
//!     foo: Option<i64>,
//!     fool: i64,
//!     foolish: i64,
//!     #[serde(skip)]
//!     validator: Validator,
//! }
//!
//! impl Foo {
//!     fn new(foo: Option<i64>) -> Result<Self, validy::ValidyError> {
//!         Foo { foo, fool: 10, foolish: 0, validator: Validator::new() }.validated()
//!     }
//!
//!     fn rules(&mut self) {
//!         self.check()
//!             .required("foo")
//!             .typed(ValueType::Integer)
//!             .condition_with(|f: &Foo| f.foo > Some(2), "foo must be bigger than 2");
//!         self.check()
//!             .required("fool")
//!             .typed(ValueType::Integer)
//!             .condition_with(|f: &Foo| f.fool > 3, "fool must be bigger than 3");
//!     }
//! }
//!
//! validatable! {
//!     Foo => validator;
//!     soft: Foo::rules;
//! }
//!
//! let foo = Foo::new(Some(4)).unwrap();
//! assert!(foo.valid());
//!
//! let foo = Foo::new(Some(1)).unwrap();
//! assert_eq!(foo.errors().get("error"), Some("foo must be bigger than 2"));
//! ```

pub mod chain;
pub mod core;
pub mod lifecycle;
mod macros;
pub mod sync;

// Re-export commonly used types
pub use chain::{by_name, Chain, Failure, Named, Predicate};
pub use crate::core::{ErrorEntry, ErrorMap, Validatable, Validator, ValueType, GENERIC_KEY};
pub use lifecycle::{
    construct, Binding, DispatchMode, EntryPoint, EntryPoints, ResolvedBinding, ValidyError,
};
pub use sync::Shared;
