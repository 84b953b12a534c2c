//! Accumulating validation combinators over a configuration tree.
//!
//! This crate turns a [`ConfigTree`] into strongly-typed records, collecting
//! every failure instead of stopping at the first:
//! - [`unchecked`]: read a path as a type, no predicate
//! - [`validate`]: read a path as a type, then check a predicate, failing
//!   with a caller-supplied reason
//! - [`via`]: run an inner validation against a subtree, with failure paths
//!   rewritten to be fully qualified from the root
//! - [`build`]: combine the independent field results into a record, or
//!   return every failure in field order
//! - [`validate_config`]: load a source and run a validation against it
//!
//! Every public operation returns a structured value; the engine never
//! panics on malformed configuration.

pub mod failure;
pub mod load;
pub mod path;
pub mod read;
pub mod scope;
pub mod validated;

pub use cv_tree::{CoerceError, ConfigTree, FromTree, TreeError};
pub use failure::{ConfigError, FailureReason, Reason, ValidationFailure};
pub use load::{validate_config, validate_config_str};
pub use path::PathSpec;
pub use read::{unchecked, validate};
pub use scope::via;
pub use validated::{build, Fields, Validated};
