//! Macros for declaring validated hosts.

/// Implement [`Validatable`](crate::Validatable) for a host type.
///
/// Names the field holding the [`Validator`](crate::Validator), an optional
/// explicit binding with its validating setters, the soft and/or strict
/// bodies, and optionally a `fn(&Self, &str) -> Result<Value, ValidyError>`
/// that replaces the serialization-based attribute lookup.
///
/// # Example
///
/// ```
/// use serde::Serialize;
/// use validy::{validatable, Validatable, ValueType, Validator};
///
/// #[derive(Debug, Serialize)]
/// struct Kraken {
///     foo: serde_json::Value,
///     #[serde(skip)]
///     validator: Validator,
/// }
///
/// impl Kraken {
///     fn rules(&mut self) {
///         self.check().required("foo").typed(ValueType::Integer);
///     }
/// }
///
/// validatable! {
///     Kraken => validator;
///     on: "kraken!", setters: ["foo"];
///     strict: Kraken::rules;
/// }
///
/// let err = Kraken { foo: "1".into(), validator: Validator::new() }
///     .validated()
///     .unwrap_err();
/// assert_eq!(err.to_string(), "error: '1' is not a type Integer");
/// ```
#[macro_export]
macro_rules! validatable {
    (
        $host:ty => $field:ident;
        $(on: $method:literal $(, setters: [$($setter:literal),* $(,)?])?;)?
        $(soft: $soft:path;)?
        $(strict: $strict:path;)?
        $(attribute: $attribute:path;)?
    ) => {
        impl $crate::Validatable for $host {
            fn validator(&self) -> &$crate::Validator {
                &self.$field
            }

            fn validator_mut(&mut self) -> &mut $crate::Validator {
                &mut self.$field
            }

            fn entry_points() -> $crate::EntryPoints<Self> {
                let points = $crate::EntryPoints::new();
                $(
                    let points = points.declare(
                        $crate::Binding::on($method)$($(.setter($setter))*)?
                    );
                )?
                $( let points = points.soft($soft); )?
                $( let points = points.strict($strict); )?
                points
            }

            $(
                fn attribute(
                    &self,
                    name: &str,
                ) -> ::core::result::Result<$crate::core::Value, $crate::ValidyError> {
                    $attribute(self, name)
                }
            )?
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Validatable, Validator, Value};
    use crate::lifecycle::{DispatchMode, EntryPoint, ValidyError};
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    struct Plain {
        n: i64,
        #[serde(skip)]
        validator: Validator,
    }

    impl Plain {
        fn rules(&mut self) {
            self.check().condition_with(|p: &Plain| p.n > 0, "n must be positive");
        }
    }

    validatable! {
        Plain => validator;
        soft: Plain::rules;
    }

    #[derive(Debug, Serialize)]
    struct Declared {
        n: i64,
        #[serde(skip)]
        validator: Validator,
    }

    impl Declared {
        fn rules(&mut self) {
            self.check().condition_with(|d: &Declared| d.n > 0, "n must be positive");
        }
    }

    validatable! {
        Declared => validator;
        on: "guard!", setters: ["n"];
        soft: Declared::rules;
    }

    #[derive(Debug, Serialize)]
    struct Both {
        #[serde(skip)]
        validator: Validator,
    }

    impl Both {
        fn rules(&mut self) {}
    }

    validatable! {
        Both => validator;
        soft: Both::rules;
        strict: Both::rules;
    }

    #[derive(Debug, Serialize)]
    struct Sensor {
        level: f64,
        #[serde(skip)]
        validator: Validator,
    }

    impl Sensor {
        fn rules(&mut self) {
            self.check()
                .optional("level")
                .condition_with(|s: &Sensor| s.level.is_finite(), "level must be finite");
        }

        fn read(&self, name: &str) -> Result<Value, ValidyError> {
            match name {
                "level" if self.level.is_finite() => Ok(Value::from(self.level)),
                "level" => Ok(Value::String(self.level.to_string())),
                _ => Ok(Value::Null),
            }
        }
    }

    validatable! {
        Sensor => validator;
        soft: Sensor::rules;
        attribute: Sensor::read;
    }

    #[test]
    fn macro_attribute_override_keeps_non_finite_present() {
        let sensor = Sensor {
            level: f64::NAN,
            validator: Validator::new(),
        }
        .validated()
        .unwrap();

        assert_eq!(sensor.attribute("level"), Ok(Value::String("NaN".into())));
        assert_eq!(sensor.errors().get("error"), Some("level must be finite"));

        let sensor = Sensor {
            level: 0.5,
            validator: Validator::new(),
        }
        .validated()
        .unwrap();
        assert!(sensor.valid());
    }

    #[test]
    fn macro_generates_soft_host() {
        let plain = Plain {
            n: 0,
            validator: Validator::new(),
        }
        .validated()
        .unwrap();

        assert!(plain.invalid());
        assert_eq!(
            plain.validator().binding().map(|b| b.entry().clone()),
            Some(EntryPoint::Soft("validate".into()))
        );
    }

    #[test]
    fn macro_declares_binding_and_setters() {
        let mut declared = Declared {
            n: 1,
            validator: Validator::new(),
        }
        .validated()
        .unwrap();

        let binding = declared.validator().binding().cloned().unwrap();
        assert_eq!(binding.mode(), DispatchMode::Strict);
        assert!(binding.intercepts("n"));

        let err = declared.assign("n", |d| d.n = -1).unwrap_err();
        assert_eq!(err.to_string(), "error: n must be positive");
    }

    #[test]
    fn macro_without_binding_rejects_both_bodies() {
        let result = Both {
            validator: Validator::new(),
        }
        .validated();
        assert!(matches!(
            result,
            Err(ValidyError::AmbiguousEntryPoint { .. })
        ));
    }
}
