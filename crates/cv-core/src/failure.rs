//! Failure taxonomy for configuration validation.
//!
//! The reason set is closed except for [`FailureReason::Custom`], which
//! carries an opaque caller-supplied reason object. Reasons are plain marker
//! values (`#[derive(Debug)] struct ShouldBePositive;`) recoverable by
//! downcast on the caller's side.

use cv_tree::TreeError;
use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Marker trait for caller-supplied failure reasons.
///
/// Blanket-implemented for any `Debug + Send + Sync + 'static` type; callers
/// never implement it by hand.
pub trait Reason: fmt::Debug + Send + Sync + 'static {
    /// Access as `Any` for downcasting back to the concrete reason type.
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Debug + Send + Sync + 'static> Reason for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Why a single field failed validation.
#[derive(Debug)]
pub enum FailureReason {
    /// Tree access was structurally broken at the path. Defensive: does not
    /// occur for ordinary field reads on a well-formed tree.
    MissingValue,

    /// An optional path had no value.
    NullValue,

    /// A required path was absent, or held its declared sentinel.
    RequiredValueNotSet,

    /// Coercion failed, or the predicate itself faulted while evaluating.
    InvalidValueType(String),

    /// The caller-supplied reason for a predicate that returned false.
    Custom(Box<dyn Reason>),
}

impl FailureReason {
    /// Wrap a caller-supplied reason.
    pub fn custom(reason: impl Reason) -> Self {
        FailureReason::Custom(Box::new(reason))
    }

    /// Recover the concrete type of a custom reason, if it matches.
    pub fn custom_as<R: Reason>(&self) -> Option<&R> {
        match self {
            // Dispatch through the trait object: calling as_any on the Box
            // itself would hand back the Box via the blanket impl.
            FailureReason::Custom(reason) => reason.as_ref().as_any().downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingValue => write!(f, "value could not be read"),
            FailureReason::NullValue => write!(f, "no value set"),
            FailureReason::RequiredValueNotSet => write!(f, "required value is not set"),
            FailureReason::InvalidValueType(cause) => write!(f, "invalid value: {cause}"),
            FailureReason::Custom(reason) => write!(f, "{reason:?}"),
        }
    }
}

// Custom reasons are compared by their Debug rendering; marker reasons
// render distinctly, which is all the accumulated report needs.
impl PartialEq for FailureReason {
    fn eq(&self, other: &Self) -> bool {
        use FailureReason::*;
        match (self, other) {
            (MissingValue, MissingValue)
            | (NullValue, NullValue)
            | (RequiredValueNotSet, RequiredValueNotSet) => true,
            (InvalidValueType(a), InvalidValueType(b)) => a == b,
            (Custom(a), Custom(b)) => format!("{a:?}") == format!("{b:?}"),
            _ => false,
        }
    }
}

/// A single failed field, with its fully-qualified dotted path.
#[derive(Debug, PartialEq)]
pub struct ValidationFailure {
    /// Dot-delimited path as seen from the root.
    pub path: String,
    /// Why the field failed.
    pub reason: FailureReason,
}

impl ValidationFailure {
    /// Build a failure at a path.
    pub fn new(path: impl Into<String>, reason: FailureReason) -> Self {
        ValidationFailure {
            path: path.into(),
            reason,
        }
    }

    /// Requalify the path under an enclosing scope.
    pub(crate) fn qualified(mut self, prefix: &str) -> Self {
        self.path = format!("{prefix}.{}", self.path);
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Terminal error for a validation run. The two variants are mutually
/// exclusive: a load failure is returned alone, never merged with field
/// failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields failed, in field declaration order.
    #[error("configuration validation failed with {} error(s)", .0.len())]
    Failures(Vec<ValidationFailure>),

    /// The configuration source could not be loaded at all.
    #[error("configuration source '{source_id}' could not be loaded: {cause}")]
    SourceNotFound {
        /// Identifier of the source (file path or name).
        source_id: String,
        /// What went wrong while loading.
        cause: TreeError,
    },
}

impl ConfigError {
    /// The accumulated field failures, if this is a validation failure.
    pub fn failures(&self) -> Option<&[ValidationFailure]> {
        match self {
            ConfigError::Failures(failures) => Some(failures),
            ConfigError::SourceNotFound { .. } => None,
        }
    }

    /// Complete human-readable listing, one line per failure, enabling a
    /// single-pass correction of the configuration file.
    pub fn report(&self) -> String {
        match self {
            ConfigError::Failures(failures) => {
                let mut out = String::from("configuration validation failed:");
                for failure in failures {
                    out.push_str("\n  - ");
                    out.push_str(&failure.to_string());
                }
                out
            }
            ConfigError::SourceNotFound { .. } => self.to_string(),
        }
    }
}
