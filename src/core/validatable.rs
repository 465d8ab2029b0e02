//! Host contract for validated objects.

use crate::chain::Chain;
use crate::core::errors::{ErrorEntry, ErrorMap};
use crate::core::state::Validator;
use crate::lifecycle::{self, DispatchMode, EntryPoints, ValidyError};
use serde::Serialize;
use serde_json::Value;
use stillwater::validation::Validation;

/// An object carrying a validation lifecycle.
///
/// Implementors embed a [`Validator`], expose it through the two accessors,
/// and register their validation bodies in [`Validatable::entry_points`].
/// Everything else is provided.
///
/// Attribute values are read from the host's serialized form, so a field
/// named `foo` is visible to `required("foo")` without extra wiring. Hosts
/// that cannot afford a serialization per lookup override
/// [`Validatable::attribute`].
///
/// Avoid naming a validation body `validate`: an inherent method of that
/// name shadows the soft dispatch provided here.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use validy::{EntryPoints, Validatable, ValueType, Validator};
///
/// #[derive(Serialize)]
/// struct Account {
///     owner: Option<String>,
///     #[serde(skip)]
///     validator: Validator,
/// }
///
/// impl Account {
///     fn rules(&mut self) {
///         self.check().required("owner").typed(ValueType::String);
///     }
/// }
///
/// impl Validatable for Account {
///     fn validator(&self) -> &Validator {
///         &self.validator
///     }
///
///     fn validator_mut(&mut self) -> &mut Validator {
///         &mut self.validator
///     }
///
///     fn entry_points() -> EntryPoints<Self> {
///         EntryPoints::new().soft(Self::rules)
///     }
/// }
///
/// let account = Account { owner: None, validator: Validator::new() }
///     .validated()
///     .unwrap();
/// assert!(account.invalid());
/// assert_eq!(account.errors().get("owner"), Some("owner required!"));
/// ```
pub trait Validatable: Serialize + Sized {
    fn validator(&self) -> &Validator;

    fn validator_mut(&mut self) -> &mut Validator;

    /// Validation bodies and optional binding for this host type.
    fn entry_points() -> EntryPoints<Self>;

    /// Current value of `name`; `Null` when unset or unknown.
    ///
    /// The default reads the host's serialized form. A host that fails to
    /// serialize, or does not serialize as a map, aborts the pass with
    /// `AttributeUnreadable`.
    ///
    /// JSON has no NaN or infinity, so the default reads non-finite floats
    /// as `Null`, i.e. absent. Hosts with such fields override this method
    /// (or use the `attribute:` arm of [`validatable!`](crate::validatable))
    /// and map them to a present value.
    fn attribute(&self, name: &str) -> Result<Value, ValidyError> {
        let unreadable = |reason: String| ValidyError::AttributeUnreadable {
            name: name.to_string(),
            host: std::any::type_name::<Self>(),
            reason,
        };

        match serde_json::to_value(self) {
            Ok(Value::Object(mut fields)) => Ok(fields.remove(name).unwrap_or(Value::Null)),
            Ok(other) => Err(unreadable(format!(
                "host serializes as {other}, not as a map of fields"
            ))),
            Err(err) => Err(unreadable(err.to_string())),
        }
    }

    /// Evaluate a named zero-argument predicate. `None` means the host has
    /// no predicate of that name.
    fn predicate(&self, _name: &str) -> Option<bool> {
        None
    }

    fn valid(&self) -> bool {
        self.validator().is_valid()
    }

    fn invalid(&self) -> bool {
        !self.valid()
    }

    fn errors(&self) -> &ErrorMap {
        self.validator().errors()
    }

    /// Record an error by hand. Always returns `false`.
    fn add_error<E: Into<ErrorEntry>>(&mut self, entry: E) -> bool {
        self.validator_mut().add_error(entry)
    }

    /// Start a fluent check chain.
    fn check(&mut self) -> Chain<'_, Self> {
        Chain::new(self)
    }

    /// Run the entry point, returning the validity flag.
    fn validate(&mut self) -> Result<bool, ValidyError> {
        lifecycle::dispatch(self, DispatchMode::Soft)
    }

    /// Run the entry point, failing with `ValidationFailed` when invalid.
    fn validate_strict(&mut self) -> Result<(), ValidyError> {
        lifecycle::dispatch(self, DispatchMode::Strict).map(|_| ())
    }

    /// Run the entry point in its resolved mode.
    fn run_entry_point(&mut self) -> Result<bool, ValidyError> {
        lifecycle::run_entry_point(self)
    }

    /// Apply a mutation to `attribute`, re-validating when the binding
    /// declares it as a validating setter.
    fn assign<F: FnOnce(&mut Self)>(
        &mut self,
        attribute: &str,
        apply: F,
    ) -> Result<bool, ValidyError> {
        lifecycle::assign(self, attribute, apply)
    }

    /// Finish construction: reset state and run the entry point.
    fn validated(self) -> Result<Self, ValidyError> {
        lifecycle::construct(self)
    }

    /// Current state as a `Validation`.
    fn outcome(&self) -> Validation<(), ErrorMap> {
        if self.valid() {
            Validation::Success(())
        } else {
            Validation::Failure(self.errors().clone())
        }
    }
}
