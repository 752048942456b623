//! Data directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the data directory.
pub const DATA_ENV_VAR: &str = "DDI_DATA_DIR";

/// Name of the optional configuration file inside the data directory.
pub const CONFIG_FILE: &str = "ddi.toml";

/// Get the data root directory.
///
/// Resolution order:
/// 1. `DDI_DATA_DIR` environment variable
/// 2. `fixtures/` directory relative to workspace root
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_ENV_VAR) {
        return PathBuf::from(root);
    }
    bundled_fixtures()
}

/// The fixture set shipped with the workspace.
pub fn bundled_fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}
