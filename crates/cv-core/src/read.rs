//! Typed reads: resolution, coercion, and predicate checking for one field.

use crate::failure::{FailureReason, Reason, ValidationFailure};
use crate::path::{self, PathSpec};
use crate::validated::Validated;
use cv_tree::{CoerceError, ConfigTree, FromTree};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Read a path as a type, with no predicate beyond coercion itself.
///
/// Resolution failures, absence (even for optional paths), and coercion
/// failures each map to their own [`FailureReason`]; the returned failure
/// path is the locally resolved path, not yet qualified by any enclosing
/// scope.
pub fn unchecked<T: FromTree>(tree: &ConfigTree, spec: &PathSpec) -> Validated<T> {
    let resolved = match path::resolve(tree, spec) {
        Ok(resolved) => resolved,
        Err(failure) => return Validated::fail(failure),
    };

    // Distinct from required/optional resolution: even an optional path must
    // hold a value to be read.
    if !tree.has_value(resolved) {
        return Validated::fail(ValidationFailure::new(resolved, FailureReason::NullValue));
    }

    match T::from_tree(tree, resolved) {
        Ok(value) => Validated::Valid(value),
        // Unreachable after the presence check on an immutable tree; kept so
        // a broken backend degrades to a report instead of a crash.
        Err(CoerceError::Missing { .. }) => {
            Validated::fail(ValidationFailure::new(resolved, FailureReason::MissingValue))
        }
        Err(cause) => Validated::fail(ValidationFailure::new(
            resolved,
            FailureReason::InvalidValueType(cause.to_string()),
        )),
    }
}

/// Read a path as a type, then check a predicate against the coerced value.
///
/// A predicate returning `false` fails with the caller-supplied `reason`. A
/// predicate that panics is caught and reported as
/// [`FailureReason::InvalidValueType`] carrying the panic message, the same
/// category as a coercion fault rather than a distinct one. Callers observe
/// that reclassification, so a test pins it.
pub fn validate<T, R, P>(
    tree: &ConfigTree,
    spec: &PathSpec,
    reason: R,
    predicate: P,
) -> Validated<T>
where
    T: FromTree,
    R: Reason,
    P: FnOnce(&T) -> bool,
{
    let value = match unchecked::<T>(tree, spec) {
        Validated::Valid(value) => value,
        invalid => return invalid,
    };

    match catch_unwind(AssertUnwindSafe(|| predicate(&value))) {
        Ok(true) => Validated::Valid(value),
        Ok(false) => Validated::fail(ValidationFailure::new(
            spec.path(),
            FailureReason::custom(reason),
        )),
        Err(panic) => Validated::fail(ValidationFailure::new(
            spec.path(),
            // Deref the box first: downcasting a &Box would inspect the box,
            // not the payload.
            FailureReason::InvalidValueType(panic_message(&*panic)),
        )),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "predicate panicked".to_string()
    }
}
