//! Typed coercion of raw tree values.
//!
//! [`FromTree`] is the pluggable coercion registry: one impl per semantic
//! type, resolved explicitly by the type parameter at each read site. Impls
//! are provided for the common configuration primitives; downstream crates
//! implement the trait for their own types.

use crate::tree::ConfigTree;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from coercing a raw value into a semantic type.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// No value present at the path. Defensive: readers check presence before
    /// coercing, so this indicates a structurally broken tree access.
    #[error("no value at '{path}'")]
    Missing {
        /// Dot-delimited path that was read.
        path: String,
    },

    /// The value has the wrong JSON shape for the target type.
    #[error("expected {expected} at '{path}', found {found}")]
    WrongType {
        /// Dot-delimited path that was read.
        path: String,
        /// What the target type required.
        expected: &'static str,
        /// JSON shape actually found.
        found: &'static str,
    },

    /// The value has the right shape but an unusable content.
    #[error("invalid {expected} at '{path}': {message}")]
    Invalid {
        /// Dot-delimited path that was read.
        path: String,
        /// What the target type required.
        expected: &'static str,
        /// Why the content was rejected.
        message: String,
    },
}

impl CoerceError {
    fn wrong_type(path: &str, expected: &'static str, found: &Value) -> Self {
        CoerceError::WrongType {
            path: path.to_string(),
            expected,
            found: json_shape(found),
        }
    }

    fn invalid(path: &str, expected: &'static str, message: impl Into<String>) -> Self {
        CoerceError::Invalid {
            path: path.to_string(),
            expected,
            message: message.into(),
        }
    }
}

/// Name of a JSON value's shape, for error messages.
fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coercion from a raw tree value into a semantic type.
///
/// `from_value` does the actual conversion; `from_tree` is the path-addressed
/// entry point used by readers.
pub trait FromTree: Sized {
    /// Coerce an already-looked-up value. `path` is carried for diagnostics.
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError>;

    /// Look up `path` in the tree and coerce the value found there.
    fn from_tree(tree: &ConfigTree, path: &str) -> Result<Self, CoerceError> {
        match tree.value(path) {
            Some(value) => Self::from_value(value, path),
            None => Err(CoerceError::Missing {
                path: path.to_string(),
            }),
        }
    }
}

impl FromTree for String {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CoerceError::wrong_type(path, "string", value))
    }
}

impl FromTree for bool {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        value
            .as_bool()
            .ok_or_else(|| CoerceError::wrong_type(path, "boolean", value))
    }
}

impl FromTree for PathBuf {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        value
            .as_str()
            .map(PathBuf::from)
            .ok_or_else(|| CoerceError::wrong_type(path, "path string", value))
    }
}

macro_rules! impl_from_tree_int {
    ($($int:ty),+ $(,)?) => {$(
        impl FromTree for $int {
            fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
                let n = value
                    .as_i64()
                    .ok_or_else(|| CoerceError::wrong_type(path, "integer", value))?;
                <$int>::try_from(n).map_err(|_| {
                    CoerceError::invalid(
                        path,
                        "integer",
                        format!("{n} out of range for {}", stringify!($int)),
                    )
                })
            }
        }
    )+};
}

impl_from_tree_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl FromTree for f64 {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        value
            .as_f64()
            .ok_or_else(|| CoerceError::wrong_type(path, "number", value))
    }
}

impl FromTree for f32 {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        f64::from_value(value, path).map(|n| n as f32)
    }
}

/// Durations accept humantime strings (`"30s"`, `"1h 30m"`, `"250ms"`) or a
/// bare non-negative integer meaning seconds.
impl FromTree for Duration {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => humantime::parse_duration(s)
                .map_err(|e| CoerceError::invalid(path, "duration", e.to_string())),
            Value::Number(_) => {
                let secs = value
                    .as_u64()
                    .ok_or_else(|| CoerceError::invalid(path, "duration", "seconds must be a non-negative integer"))?;
                Ok(Duration::from_secs(secs))
            }
            _ => Err(CoerceError::wrong_type(path, "duration", value)),
        }
    }
}

impl<T: FromTree> FromTree for Vec<T> {
    fn from_value(value: &Value, path: &str) -> Result<Self, CoerceError> {
        let items = value
            .as_array()
            .ok_or_else(|| CoerceError::wrong_type(path, "array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_value(item, &format!("{path}[{i}]")))
            .collect()
    }
}
