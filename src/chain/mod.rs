//! Fluent validation chain.
//!
//! A chain is started with [`Validatable::check`](crate::Validatable::check)
//! inside a validation body:
//!
//! ```rust
//! use serde::Serialize;
//! use validy::chain::{by_name, Failure};
//! use validy::{EntryPoints, Validatable, ValueType, Validator};
//!
//! #[derive(Serialize)]
//! struct Order {
//!     quantity: Option<i64>,
//!     note: Option<String>,
//!     #[serde(skip)]
//!     validator: Validator,
//! }
//!
//! impl Order {
//!     fn rules(&mut self) {
//!         self.check()
//!             .required("quantity")
//!             .typed(ValueType::Integer)
//!             .condition_with(|o: &Order| o.quantity > Some(0), "quantity must be positive");
//!         self.check()
//!             .optional("note")
//!             .typed_with(ValueType::String, Failure::new().error([("note", "not text")]))
//!             .condition(by_name("short_note"));
//!     }
//! }
//!
//! impl Validatable for Order {
//!     fn validator(&self) -> &Validator { &self.validator }
//!     fn validator_mut(&mut self) -> &mut Validator { &mut self.validator }
//!     fn entry_points() -> EntryPoints<Self> { EntryPoints::new().soft(Self::rules) }
//!
//!     fn predicate(&self, name: &str) -> Option<bool> {
//!         match name {
//!             "short_note" => Some(self.note.as_ref().map_or(true, |n| n.len() < 20)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let order = Order { quantity: Some(0), note: None, validator: Validator::new() }
//!     .validated()
//!     .unwrap();
//! assert_eq!(order.errors().get("error"), Some("quantity must be positive"));
//! ```

mod failure;
mod fluent;
mod predicate;

pub use failure::Failure;
pub use fluent::Chain;
pub use predicate::{by_name, Named, Predicate};
