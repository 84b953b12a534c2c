//! Dot-path addressed configuration tree over JSON.
//!
//! The tree is an owned, immutable value. JSON `null` is treated as absence
//! everywhere: a path whose leaf is `null` behaves exactly like a path that
//! is not present at all.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or navigating a configuration tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Failed to read the configuration source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root was not a JSON object.
    #[error("configuration root must be an object")]
    RootNotObject,

    /// No subtree exists at the requested path.
    #[error("no subtree at '{path}'")]
    MissingSubtree {
        /// Dot-delimited path that was requested.
        path: String,
    },

    /// A subtree was requested at a path holding a leaf value.
    #[error("value at '{path}' is not an object")]
    NotAnObject {
        /// Dot-delimited path that was requested.
        path: String,
    },
}

/// Immutable hierarchical key-value store addressed by dot-delimited paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    /// Build a tree from an already-parsed JSON value. The root must be an
    /// object.
    pub fn from_value(root: Value) -> Result<Self, TreeError> {
        if root.is_object() {
            Ok(ConfigTree { root })
        } else {
            Err(TreeError::RootNotObject)
        }
    }

    /// Parse a tree from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TreeError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Load a tree from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Look up the value at a dot-delimited path. Returns `None` for absent
    /// paths and for paths holding JSON `null`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Whether a non-null value exists at the path.
    pub fn has_value(&self, path: &str) -> bool {
        self.value(path).is_some()
    }

    /// The unwrapped textual form of the leaf at a path: strings without
    /// quotes, other scalars as rendered by JSON. Used for sentinel
    /// comparison. Returns `None` for absent paths and non-leaf values.
    pub fn raw_literal(&self, path: &str) -> Option<String> {
        match self.value(path)? {
            Value::String(s) => Some(s.clone()),
            v @ (Value::Bool(_) | Value::Number(_)) => Some(v.to_string()),
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// Narrow to the subtree rooted at a path. Fails if the path is absent
    /// or holds a leaf value.
    pub fn subtree(&self, path: &str) -> Result<ConfigTree, TreeError> {
        match self.value(path) {
            None => Err(TreeError::MissingSubtree {
                path: path.to_string(),
            }),
            Some(v) if v.is_object() => Ok(ConfigTree { root: v.clone() }),
            Some(_) => Err(TreeError::NotAnObject {
                path: path.to_string(),
            }),
        }
    }
}
