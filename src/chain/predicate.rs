//! Conditions evaluated by `Chain::condition`.

use crate::core::Validatable;
use crate::lifecycle::ValidyError;

/// A zero-argument check over the host.
///
/// Implemented for closures and functions taking `&H`, which covers both
/// inline callables and `Host::method` paths, and for [`Named`] predicates
/// looked up through [`Validatable::predicate`].
pub trait Predicate<H> {
    fn evaluate(&self, host: &H) -> Result<bool, ValidyError>;

    /// Name used in the default failure message.
    fn label(&self) -> Option<&str> {
        None
    }
}

impl<H, F> Predicate<H> for F
where
    F: Fn(&H) -> bool,
{
    fn evaluate(&self, host: &H) -> Result<bool, ValidyError> {
        Ok(self(host))
    }
}

/// Predicate referenced by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Named(pub String);

/// Reference a host predicate by name.
pub fn by_name(name: impl Into<String>) -> Named {
    Named(name.into())
}

impl<H: Validatable> Predicate<H> for Named {
    fn evaluate(&self, host: &H) -> Result<bool, ValidyError> {
        host.predicate(&self.0)
            .ok_or_else(|| ValidyError::UnknownPredicate {
                name: self.0.clone(),
                host: std::any::type_name::<H>(),
            })
    }

    fn label(&self) -> Option<&str> {
        Some(&self.0)
    }
}
