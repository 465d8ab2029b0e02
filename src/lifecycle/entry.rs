//! Entry point declarations and resolution.

use crate::lifecycle::error::ValidyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the soft entry point when no binding is declared.
pub const SOFT_NAME: &str = "validate";

/// Name of the strict entry point when no binding is declared.
pub const STRICT_NAME: &str = "validate!";

const STRICT_MARKER: char = '!';

/// Validation body registered by a host.
pub type Body<H> = fn(&mut H);

/// How a pass reports failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchMode {
    /// Record errors and return the validity flag.
    Soft,
    /// Record errors and fail with `ValidationFailed` when invalid.
    Strict,
}

/// The resolved validation entry point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    Soft(String),
    Strict(String),
}

impl EntryPoint {
    /// Parse a method name; a trailing `!` marks the strict variant.
    pub fn parse(method: &str) -> Result<Self, ValidyError> {
        let soft: String = method.chars().filter(|c| *c != STRICT_MARKER).collect();
        if soft.trim().is_empty() {
            return Err(ValidyError::InvalidBinding {
                method: method.to_string(),
            });
        }

        if method.ends_with(STRICT_MARKER) {
            Ok(EntryPoint::Strict(format!("{soft}{STRICT_MARKER}")))
        } else {
            Ok(EntryPoint::Soft(soft))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Soft(name) | Self::Strict(name) => name,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        match self {
            Self::Soft(_) => DispatchMode::Soft,
            Self::Strict(_) => DispatchMode::Strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict(_))
    }

    /// Name without the strict marker.
    pub fn soft_name(&self) -> &str {
        self.name().trim_end_matches(STRICT_MARKER)
    }

    /// Name with the strict marker.
    pub fn strict_name(&self) -> String {
        format!("{}{STRICT_MARKER}", self.soft_name())
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Explicit entry point declaration.
///
/// Deserializes from `{"method": "kraken!", "setters": ["foo"]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub method: String,

    /// Attributes whose assignment re-runs the entry point.
    #[serde(default)]
    pub setters: Vec<String>,
}

impl Binding {
    pub fn on(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            setters: Vec::new(),
        }
    }

    /// Re-run validation whenever `attribute` is assigned.
    pub fn setter(mut self, attribute: impl Into<String>) -> Self {
        self.setters.push(attribute.into());
        self
    }

    pub fn setters<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.setters.extend(attributes.into_iter().map(Into::into));
        self
    }
}

/// Binding as resolved for one instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBinding {
    entry: EntryPoint,
    setters: Vec<String>,
    explicit: bool,
}

impl ResolvedBinding {
    pub fn entry(&self) -> &EntryPoint {
        &self.entry
    }

    pub fn mode(&self) -> DispatchMode {
        self.entry.mode()
    }

    /// Whether the entry point came from a declared binding rather than
    /// from the registered implementations alone.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Whether assigning `attribute` re-runs validation.
    pub fn intercepts(&self, attribute: &str) -> bool {
        self.setters.iter().any(|s| s == attribute)
    }

    pub fn setters(&self) -> &[String] {
        &self.setters
    }
}

/// Validation bodies a host implements, plus its optional binding.
pub struct EntryPoints<H> {
    binding: Option<Binding>,
    soft: Option<Body<H>>,
    strict: Option<Body<H>>,
}

impl<H> EntryPoints<H> {
    pub fn new() -> Self {
        Self {
            binding: None,
            soft: None,
            strict: None,
        }
    }

    /// Declare an explicit binding.
    pub fn declare(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Register the soft implementation.
    pub fn soft(mut self, body: Body<H>) -> Self {
        self.soft = Some(body);
        self
    }

    /// Register the strict implementation.
    pub fn strict(mut self, body: Body<H>) -> Self {
        self.strict = Some(body);
        self
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Body run by both dispatch modes: the soft implementation when
    /// registered, otherwise the strict one.
    pub fn body(&self) -> Option<Body<H>> {
        self.soft.or(self.strict)
    }

    /// Decide which entry point this host uses.
    ///
    /// A declared binding wins. Without one, exactly one of the soft and
    /// strict implementations must be registered.
    pub fn resolve(&self) -> Result<ResolvedBinding, ValidyError> {
        let host = std::any::type_name::<H>();

        if let Some(binding) = &self.binding {
            let entry = EntryPoint::parse(&binding.method)?;
            if self.body().is_none() {
                return Err(ValidyError::MissingEntryPoint {
                    method: entry.name().to_string(),
                    host,
                });
            }
            return Ok(ResolvedBinding {
                entry,
                setters: binding.setters.clone(),
                explicit: true,
            });
        }

        let entry = match (self.soft, self.strict) {
            (Some(_), Some(_)) => {
                return Err(ValidyError::AmbiguousEntryPoint {
                    soft: SOFT_NAME.to_string(),
                    strict: STRICT_NAME.to_string(),
                    host,
                })
            }
            (Some(_), None) => EntryPoint::Soft(SOFT_NAME.to_string()),
            (None, Some(_)) => EntryPoint::Strict(STRICT_NAME.to_string()),
            (None, None) => {
                return Err(ValidyError::MissingEntryPoint {
                    method: format!("{SOFT_NAME}` or `{STRICT_NAME}"),
                    host,
                })
            }
        };

        Ok(ResolvedBinding {
            entry,
            setters: Vec::new(),
            explicit: false,
        })
    }
}

impl<H> Default for EntryPoints<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host;

    fn body(_: &mut Host) {}

    #[test]
    fn parse_normalizes_names() {
        let strict = EntryPoint::parse("kraken!").unwrap();
        assert_eq!(strict, EntryPoint::Strict("kraken!".into()));
        assert_eq!(strict.soft_name(), "kraken");
        assert_eq!(strict.strict_name(), "kraken!");

        let soft = EntryPoint::parse("kraken").unwrap();
        assert_eq!(soft, EntryPoint::Soft("kraken".into()));
        assert_eq!(soft.strict_name(), "kraken!");
        assert_eq!(soft.mode(), DispatchMode::Soft);
    }

    #[test]
    fn parse_rejects_empty_names() {
        assert!(matches!(
            EntryPoint::parse("!"),
            Err(ValidyError::InvalidBinding { .. })
        ));
        assert!(EntryPoint::parse("").is_err());
    }

    #[test]
    fn soft_only_resolves_soft() {
        let resolved = EntryPoints::<Host>::new().soft(body).resolve().unwrap();
        assert_eq!(resolved.entry(), &EntryPoint::Soft("validate".into()));
        assert!(!resolved.is_explicit());
    }

    #[test]
    fn strict_only_resolves_strict() {
        let resolved = EntryPoints::<Host>::new().strict(body).resolve().unwrap();
        assert_eq!(resolved.mode(), DispatchMode::Strict);
        assert_eq!(resolved.entry().name(), "validate!");
    }

    #[test]
    fn nothing_registered_is_missing() {
        let result = EntryPoints::<Host>::new().resolve();
        assert!(matches!(
            result,
            Err(ValidyError::MissingEntryPoint { .. })
        ));
    }

    #[test]
    fn both_registered_without_binding_is_ambiguous() {
        let result = EntryPoints::<Host>::new().soft(body).strict(body).resolve();
        assert!(matches!(
            result,
            Err(ValidyError::AmbiguousEntryPoint { .. })
        ));
    }

    #[test]
    fn binding_disambiguates_both_implementations() {
        let resolved = EntryPoints::<Host>::new()
            .declare(Binding::on("check!").setter("foo"))
            .soft(body)
            .strict(body)
            .resolve()
            .unwrap();

        assert!(resolved.is_explicit());
        assert_eq!(resolved.mode(), DispatchMode::Strict);
        assert!(resolved.intercepts("foo"));
        assert!(!resolved.intercepts("bar"));
    }

    #[test]
    fn binding_without_body_is_missing() {
        let result = EntryPoints::<Host>::new()
            .declare(Binding::on("kraken!"))
            .resolve();
        match result {
            Err(ValidyError::MissingEntryPoint { method, .. }) => assert_eq!(method, "kraken!"),
            other => panic!("expected missing entry point, got {other:?}"),
        }
    }

    #[test]
    fn binding_deserializes_from_json() {
        let binding: Binding =
            serde_json::from_str(r#"{"method": "kraken!", "setters": ["foo"]}"#).unwrap();
        assert_eq!(binding, Binding::on("kraken!").setters(["foo"]));

        let bare: Binding = serde_json::from_str(r#"{"method": "kraken"}"#).unwrap();
        assert!(bare.setters.is_empty());
    }
}
