//! Construction, dispatch and setter interception.

use crate::core::Validatable;
use crate::lifecycle::entry::{DispatchMode, ResolvedBinding};
use crate::lifecycle::error::ValidyError;
use tracing::{debug, trace, warn};

/// Bootstrap validation state on a freshly built host and run its entry
/// point once.
///
/// Setup defects always fail. A business failure fails only when the entry
/// point resolves to strict mode; in soft mode the host is returned and the
/// caller inspects `valid()`.
pub fn construct<H: Validatable>(mut host: H) -> Result<H, ValidyError> {
    host.validator_mut().reset();
    host.validator_mut().binding = None;
    run_entry_point(&mut host)?;
    Ok(host)
}

/// Run the entry point in the mode it resolved to.
pub fn run_entry_point<H: Validatable>(host: &mut H) -> Result<bool, ValidyError> {
    let mode = ensure_binding(host)?.mode();
    dispatch(host, mode)
}

/// Run the host's validation body and apply `mode`'s failure policy.
///
/// Each pass starts from a clean state, so repeated passes over unchanged
/// attributes produce identical errors.
pub fn dispatch<H: Validatable>(host: &mut H, mode: DispatchMode) -> Result<bool, ValidyError> {
    let binding = ensure_binding(host)?;
    let points = H::entry_points();
    let body = points.body().ok_or_else(|| ValidyError::MissingEntryPoint {
        method: binding.entry().name().to_string(),
        host: std::any::type_name::<H>(),
    })?;

    host.validator_mut().reset();
    body(host);

    if let Some(fault) = host.validator_mut().take_fault() {
        warn!(entry_point = %binding.entry(), error = %fault, "validation body hit a setup defect");
        return Err(fault);
    }

    let validator = host.validator();
    let valid = validator.is_valid();
    debug!(
        entry_point = %binding.entry(),
        mode = ?mode,
        valid,
        errors = %validator.errors().joined("; "),
        "validation pass settled"
    );

    match mode {
        DispatchMode::Strict if !valid => Err(ValidyError::ValidationFailed {
            errors: validator.errors().clone(),
        }),
        _ => Ok(valid),
    }
}

/// Apply a mutation to `attribute`, re-running the entry point when the
/// binding declares the attribute as a validating setter.
///
/// The mutation is kept even when strict re-validation fails.
pub fn assign<H, F>(host: &mut H, attribute: &str, apply: F) -> Result<bool, ValidyError>
where
    H: Validatable,
    F: FnOnce(&mut H),
{
    apply(host);

    let binding = ensure_binding(host)?;
    if !binding.intercepts(attribute) {
        trace!(attribute, "assignment not intercepted");
        return Ok(host.validator().is_valid());
    }

    trace!(attribute, entry_point = %binding.entry(), "assignment re-runs validation");
    dispatch(host, binding.mode())
}

/// Resolve the binding on first use and cache it on the instance.
fn ensure_binding<H: Validatable>(host: &mut H) -> Result<ResolvedBinding, ValidyError> {
    if let Some(binding) = host.validator().binding() {
        return Ok(binding.clone());
    }

    let binding = H::entry_points().resolve().map_err(|err| {
        warn!(host = std::any::type_name::<H>(), error = %err, "entry point resolution failed");
        err
    })?;
    debug!(
        host = std::any::type_name::<H>(),
        entry_point = %binding.entry(),
        explicit = binding.is_explicit(),
        setters = ?binding.setters(),
        "resolved validation entry point"
    );
    host.validator_mut().binding = Some(binding.clone());
    Ok(binding)
}
