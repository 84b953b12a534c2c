//! Immutable configuration tree backend and typed value coercion.
//!
//! This crate provides:
//! - [`ConfigTree`]: a read-only hierarchical key-value store over JSON,
//!   addressed by dot-delimited paths (`"http.port"`)
//! - [`FromTree`]: the per-type coercion trait turning a raw tree value into
//!   a semantic Rust type
//! - [`TreeError`] / [`CoerceError`]: structured failures for each layer
//!
//! The validation engine in `cv-core` consumes these; nothing here performs
//! validation beyond what a single typed read requires.

pub mod coerce;
pub mod tree;

pub use coerce::{CoerceError, FromTree};
pub use tree::{ConfigTree, TreeError};
