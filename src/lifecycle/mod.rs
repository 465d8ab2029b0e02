//! Validation lifecycle: which entry point runs, when, and how failure is
//! reported.
//!
//! A host registers a soft body, a strict body, or both together with an
//! explicit [`Binding`]. Resolution happens once per instance and produces
//! an [`EntryPoint`]:
//!
//! | declared binding | soft body | strict body | result                 |
//! |------------------|-----------|-------------|------------------------|
//! | yes              | any       | any         | binding's name and mode |
//! | no               | yes       | no          | `Soft("validate")`     |
//! | no               | no        | yes         | `Strict("validate!")`  |
//! | no               | yes       | yes         | `AmbiguousEntryPoint`  |
//! | no               | no        | no          | `MissingEntryPoint`    |
//!
//! Strict dispatch fails with [`ValidyError::ValidationFailed`] when the pass
//! leaves the instance invalid; soft dispatch returns the validity flag.
//!
//! # Example
//!
//! ```rust
//! use validy::lifecycle::{Binding, DispatchMode, EntryPoint, EntryPoints};
//!
//! struct Host;
//! fn rules(_: &mut Host) {}
//!
//! let resolved = EntryPoints::<Host>::new()
//!     .declare(Binding::on("kraken!").setter("foo"))
//!     .soft(rules)
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(resolved.entry(), &EntryPoint::Strict("kraken!".to_string()));
//! assert_eq!(resolved.mode(), DispatchMode::Strict);
//! assert!(resolved.intercepts("foo"));
//! ```

mod controller;
mod entry;
mod error;

pub use controller::{assign, construct, dispatch, run_entry_point};
pub use entry::{
    Binding, Body, DispatchMode, EntryPoint, EntryPoints, ResolvedBinding, SOFT_NAME, STRICT_NAME,
};
pub use error::ValidyError;
