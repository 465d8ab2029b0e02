//! The `required` / `optional` / `typed` / `condition` chain.

use crate::chain::failure::Failure;
use crate::chain::predicate::Predicate;
use crate::core::{is_absent, render, Cursor, ErrorEntry, ErrorMap, Validatable, ValueType};
use serde_json::Value;
use tracing::trace;

/// Fluent checks over a host's attributes.
///
/// `required` and `optional` point the evaluation cursor at an attribute;
/// `typed` and `condition` check it. Once any check has failed every further
/// call is a no-op, so the first failure in program order is the one
/// reported. The cursor lives on the host's [`Validator`](crate::Validator),
/// so it survives across separate chains inside one validation body.
pub struct Chain<'h, H: Validatable> {
    host: &'h mut H,
}

impl<'h, H: Validatable> Chain<'h, H> {
    pub(crate) fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    /// Fail when `attribute` is absent. `false` counts as present.
    ///
    /// The default error is `"<attribute> required!"` under the attribute's
    /// own key.
    pub fn required(self, attribute: &str) -> Self {
        self.required_with(attribute, Failure::new())
    }

    pub fn required_with<'f>(mut self, attribute: &str, failure: impl Into<Failure<'f>>) -> Self {
        if self.halted("required") {
            return self;
        }

        let Some(value) = self.read(attribute) else {
            return self;
        };
        let present = !is_absent(&value);
        self.host.validator_mut().cursor = Some(Cursor {
            attribute: attribute.to_string(),
            value,
            optional: false,
        });

        self.settle(present, failure.into(), || {
            ErrorMap::from([(attribute, format!("{attribute} required!"))]).into()
        })
    }

    /// Point the cursor at `attribute` without checking it. While the value
    /// is absent, the following `typed` and `condition` calls are skipped.
    pub fn optional(mut self, attribute: &str) -> Self {
        if self.halted("optional") {
            return self;
        }

        let Some(value) = self.read(attribute) else {
            return self;
        };
        self.host.validator_mut().cursor = Some(Cursor {
            attribute: attribute.to_string(),
            value,
            optional: true,
        });
        self
    }

    /// Fail when the cursor's value is not of `expected`.
    ///
    /// The default error is `"'<value>' is not a type <Type>"` under the
    /// generic key.
    pub fn typed(self, expected: ValueType) -> Self {
        self.typed_with(expected, Failure::new())
    }

    pub fn typed_with<'f>(self, expected: ValueType, failure: impl Into<Failure<'f>>) -> Self {
        if self.halted("typed") || self.skipped("typed") {
            return self;
        }

        let value = self.cursor_value();
        let matches = expected.matches(&value);
        self.settle(matches, failure.into(), || {
            format!("'{}' is not a type {expected}", render(&value)).into()
        })
    }

    /// Fail when `predicate` does not hold.
    ///
    /// Accepts closures and functions over `&H` or a [`Named`] host
    /// predicate. An unknown name aborts the pass with `UnknownPredicate`.
    ///
    /// [`Named`]: crate::chain::Named
    pub fn condition<P: Predicate<H>>(self, predicate: P) -> Self {
        self.condition_with(predicate, Failure::new())
    }

    pub fn condition_with<'f, P: Predicate<H>>(
        self,
        predicate: P,
        failure: impl Into<Failure<'f>>,
    ) -> Self {
        if self.halted("condition") || self.skipped("condition") {
            return self;
        }

        match predicate.evaluate(&*self.host) {
            Ok(holds) => {
                let label = predicate.label().map(str::to_string);
                self.settle(holds, failure.into(), move || {
                    let message = match label {
                        Some(name) => format!("{name} is not satisfied"),
                        None => "condition is not satisfied".to_string(),
                    };
                    message.into()
                })
            }
            Err(fault) => {
                self.host.validator_mut().record_fault(fault);
                self
            }
        }
    }

    /// Read an attribute from the host. A failed read is recorded as the
    /// pass's setup fault, which halts the rest of the chain.
    fn read(&mut self, attribute: &str) -> Option<Value> {
        match self.host.attribute(attribute) {
            Ok(value) => Some(value),
            Err(fault) => {
                trace!(attribute, error = %fault, "attribute unreadable");
                self.host.validator_mut().record_fault(fault);
                None
            }
        }
    }

    /// Value under the cursor; absent when no cursor has been set.
    fn cursor_value(&self) -> Value {
        self.host
            .validator()
            .cursor
            .as_ref()
            .map(|cursor| cursor.value.clone())
            .unwrap_or(Value::Null)
    }

    fn halted(&self, check: &'static str) -> bool {
        let validator = self.host.validator();
        let halted = validator.is_invalid() || validator.has_fault();
        if halted {
            trace!(check, "short-circuited");
        }
        halted
    }

    fn skipped(&self, check: &'static str) -> bool {
        let skipped = self
            .host
            .validator()
            .cursor
            .as_ref()
            .is_some_and(Cursor::skips_checks);
        if skipped {
            trace!(check, "optional attribute absent, skipped");
        }
        skipped
    }

    fn settle<F>(self, passed: bool, failure: Failure<'_>, default: F) -> Self
    where
        F: FnOnce() -> ErrorEntry,
    {
        if passed {
            return self;
        }

        let (error, callback) = failure.into_parts();
        let entry = error.unwrap_or_else(default);
        let attribute = self
            .host
            .validator()
            .cursor
            .as_ref()
            .map(|cursor| cursor.attribute.clone());
        trace!(attribute = ?attribute, error = ?entry, "check failed");

        self.host.validator_mut().add_error(entry);
        if let Some(callback) = callback {
            callback();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::by_name;
    use crate::core::Validator;
    use crate::lifecycle::EntryPoints;
    use serde::Serialize;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Serialize, Default)]
    struct Sample {
        a: Option<serde_json::Value>,
        b: Option<i64>,
        #[serde(skip)]
        validator: Validator,
    }

    impl Sample {
        fn with_a(a: serde_json::Value) -> Self {
            Self {
                a: Some(a),
                ..Self::default()
            }
        }

        fn noop(&mut self) {}
    }

    impl Validatable for Sample {
        fn validator(&self) -> &Validator {
            &self.validator
        }

        fn validator_mut(&mut self) -> &mut Validator {
            &mut self.validator
        }

        fn entry_points() -> EntryPoints<Self> {
            EntryPoints::new().soft(Self::noop)
        }

        fn predicate(&self, name: &str) -> Option<bool> {
            match name {
                "has_b" => Some(self.b.is_some()),
                _ => None,
            }
        }
    }

    #[test]
    fn required_fails_on_absent_with_default_message() {
        let mut sample = Sample::default();
        sample.check().required("a");

        assert!(sample.invalid());
        assert_eq!(sample.errors().get("a"), Some("a required!"));
    }

    #[test]
    fn required_accepts_false() {
        let mut sample = Sample::with_a(json!(false));
        sample.check().required("a");
        assert!(sample.valid());
    }

    #[test]
    fn required_custom_message_uses_generic_key() {
        let mut sample = Sample::default();
        sample.check().required_with("a", "a is missing");
        assert_eq!(sample.errors().get("error"), Some("a is missing"));
    }

    #[test]
    fn typed_default_message_names_value_and_type() {
        let mut sample = Sample::with_a(json!("1"));
        sample.check().required("a").typed(ValueType::Integer);

        assert_eq!(
            sample.errors().get("error"),
            Some("'1' is not a type Integer")
        );
    }

    #[test]
    fn typed_structured_override_merges_keys() {
        let mut sample = Sample::with_a(json!("1"));
        sample
            .check()
            .required("a")
            .typed_with(ValueType::Integer, [("type_error", "not an integer")]);

        assert_eq!(sample.errors().get("type_error"), Some("not an integer"));
        assert_eq!(sample.errors().len(), 1);
    }

    #[test]
    fn failed_required_short_circuits_typed() {
        let mut sample = Sample::default();
        sample
            .check()
            .required("a")
            .typed_with(ValueType::Integer, [("type_error", "x")]);

        assert!(!sample.errors().contains_key("type_error"));
        assert_eq!(sample.errors().len(), 1);
    }

    #[test]
    fn short_circuit_skips_condition_evaluation() {
        let evaluated = Cell::new(false);
        let mut sample = Sample::default();
        sample.check().required("a").condition(|_: &Sample| {
            evaluated.set(true);
            true
        });

        assert!(!evaluated.get());
    }

    #[test]
    fn optional_absent_skips_typed_and_condition() {
        let mut sample = Sample::default();
        sample
            .check()
            .optional("a")
            .typed(ValueType::Integer)
            .condition(|_: &Sample| false);

        assert!(sample.valid());
        assert!(sample.errors().is_empty());
    }

    #[test]
    fn optional_present_wrong_type_fails() {
        let mut sample = Sample::with_a(json!("x"));
        sample.check().optional("a").typed(ValueType::Integer);

        assert!(sample.invalid());
        assert_eq!(
            sample.errors().get("error"),
            Some("'x' is not a type Integer")
        );
    }

    #[test]
    fn required_after_optional_still_checks() {
        let mut sample = Sample::default();
        sample.check().optional("b").required_with("a", [("a", "missing")]);
        assert_eq!(sample.errors().get("a"), Some("missing"));
    }

    #[test]
    fn cursor_survives_between_chains() {
        let mut sample = Sample::with_a(json!(3.5));
        sample.check().required("a");
        sample.check().typed(ValueType::Integer);

        assert_eq!(
            sample.errors().get("error"),
            Some("'3.5' is not a type Integer")
        );
    }

    #[test]
    fn typed_without_cursor_fails() {
        let mut sample = Sample::default();
        sample.check().typed(ValueType::Any);
        assert_eq!(sample.errors().get("error"), Some("'' is not a type Any"));
    }

    #[test]
    fn condition_accepts_method_paths() {
        fn has_a(sample: &Sample) -> bool {
            sample.a.is_some()
        }

        let mut sample = Sample::default();
        sample.check().condition_with(has_a, "a must be set");
        assert_eq!(sample.errors().get("error"), Some("a must be set"));
    }

    #[test]
    fn named_condition_uses_host_predicate() {
        let mut sample = Sample::default();
        sample.check().condition(by_name("has_b"));
        assert_eq!(
            sample.errors().get("error"),
            Some("has_b is not satisfied")
        );

        let mut sample = Sample {
            b: Some(1),
            ..Sample::default()
        };
        sample.check().condition(by_name("has_b"));
        assert!(sample.valid());
    }

    #[test]
    fn unknown_named_condition_records_fault_not_error() {
        let mut sample = Sample::default();
        sample
            .check()
            .condition(by_name("nope"))
            .condition_with(|_: &Sample| false, "never reached");

        assert!(sample.valid());
        assert!(sample.errors().is_empty());
        assert!(sample.validator_mut().take_fault().is_some());
    }

    #[test]
    fn callback_runs_only_on_failure() {
        let calls = Cell::new(0);
        let mut sample = Sample::with_a(json!(1));
        sample
            .check()
            .required_with("a", Failure::new().then(|| calls.set(calls.get() + 1)))
            .typed_with(
                ValueType::String,
                Failure::new()
                    .error("a must be a string")
                    .then(|| calls.set(calls.get() + 10)),
            );

        assert_eq!(calls.get(), 10);
        assert_eq!(sample.errors().get("error"), Some("a must be a string"));
    }

    #[test]
    fn callback_may_add_more_errors_later() {
        let mut sample = Sample::default();
        sample.check().required("a");
        sample.add_error([("extra", "manual")]);

        assert_eq!(sample.errors().len(), 2);
        assert!(sample.invalid());
    }
}
