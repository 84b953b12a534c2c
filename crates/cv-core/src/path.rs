//! Path specifications and the resolution step that precedes every read.

use crate::failure::{FailureReason, ValidationFailure};
use cv_tree::ConfigTree;

/// How a path's presence requirement is checked before reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Resolve unconditionally; absence is reported by the reader.
    Optional(String),

    /// The path must be present, and when a sentinel is declared, must not
    /// hold that exact literal. Sentinels let required values be told apart
    /// from library-supplied placeholder defaults.
    Required {
        /// Dot-delimited path.
        path: String,
        /// Literal meaning "effectively unset", if the backend cannot
        /// express true absence.
        sentinel: Option<String>,
    },
}

impl PathSpec {
    /// An optional path; existence is deferred to the reader.
    pub fn optional(path: impl Into<String>) -> Self {
        PathSpec::Optional(path.into())
    }

    /// A required path.
    pub fn required(path: impl Into<String>) -> Self {
        PathSpec::Required {
            path: path.into(),
            sentinel: None,
        }
    }

    /// A required path whose value must differ from a placeholder literal.
    pub fn required_with_sentinel(path: impl Into<String>, sentinel: impl Into<String>) -> Self {
        PathSpec::Required {
            path: path.into(),
            sentinel: Some(sentinel.into()),
        }
    }

    /// The dot-delimited path this spec addresses.
    pub fn path(&self) -> &str {
        match self {
            PathSpec::Optional(path) => path,
            PathSpec::Required { path, .. } => path,
        }
    }
}

/// Resolve a spec against a tree: either the concrete path to read, or the
/// structural failure for this field.
pub(crate) fn resolve<'s>(
    tree: &ConfigTree,
    spec: &'s PathSpec,
) -> Result<&'s str, ValidationFailure> {
    match spec {
        PathSpec::Optional(path) => Ok(path),
        PathSpec::Required { path, sentinel } => {
            if !tree.has_value(path) {
                return Err(ValidationFailure::new(
                    path.clone(),
                    FailureReason::RequiredValueNotSet,
                ));
            }
            if let Some(sentinel) = sentinel {
                // Sentinel comparison is textual, against the unwrapped form.
                if tree.raw_literal(path).as_deref() == Some(sentinel.as_str()) {
                    return Err(ValidationFailure::new(
                        path.clone(),
                        FailureReason::RequiredValueNotSet,
                    ));
                }
            }
            Ok(path)
        }
    }
}
