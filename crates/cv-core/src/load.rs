//! Load entry points: obtain a tree from a source, then run a validation.

use crate::failure::ConfigError;
use crate::validated::Validated;
use cv_tree::ConfigTree;
use std::path::Path;
use tracing::debug;

/// Load a JSON configuration file and validate it with `check`.
///
/// Two terminal outcomes: the source cannot be loaded at all (I/O, parse, or
/// shape failure), returned alone as [`ConfigError::SourceNotFound`]; or the
/// tree is obtained and `check` runs to completion, its accumulated result
/// converted to the terminal shape. Load failures and field failures never
/// mix.
pub fn validate_config<T, F>(source: impl AsRef<Path>, check: F) -> Result<T, ConfigError>
where
    F: FnOnce(&ConfigTree) -> Validated<T>,
{
    let source = source.as_ref();
    let tree = match ConfigTree::from_file(source) {
        Ok(tree) => tree,
        Err(cause) => {
            return Err(ConfigError::SourceNotFound {
                source_id: source.display().to_string(),
                cause,
            })
        }
    };
    debug!(source = %source.display(), "configuration source loaded");
    finish(check(&tree))
}

/// Validate configuration held in a JSON string. `name` identifies the
/// source in a load failure, the way a file path would.
pub fn validate_config_str<T, F>(name: &str, json: &str, check: F) -> Result<T, ConfigError>
where
    F: FnOnce(&ConfigTree) -> Validated<T>,
{
    let tree = match ConfigTree::from_json_str(json) {
        Ok(tree) => tree,
        Err(cause) => {
            return Err(ConfigError::SourceNotFound {
                source_id: name.to_string(),
                cause,
            })
        }
    };
    finish(check(&tree))
}

fn finish<T>(result: Validated<T>) -> Result<T, ConfigError> {
    if let Validated::Invalid(failures) = &result {
        debug!(count = failures.len(), "configuration validation failed");
    }
    result.into_result()
}
