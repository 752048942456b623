//! Optional `ddi.toml` configuration for a data directory.
//!
//! ```toml
//! [collections]
//! Concept = "concepts.json"
//! CodeList = "codelists-2024.json"
//!
//! [defaults]
//! references = "children"
//! format = "xml"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use ddi_model::{Kind, ResolutionLevel};
use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::paths::CONFIG_FILE;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    collections: BTreeMap<String, String>,
    #[serde(default)]
    defaults: Defaults,
}

/// Request defaults applied when a caller does not specify them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    #[serde(default)]
    pub references: ResolutionLevel,
    /// Output format name (`json` or `xml`), interpreted by the request layer.
    #[serde(default)]
    pub format: Option<String>,
}

/// Parsed data directory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub collections: BTreeMap<Kind, String>,
    pub defaults: Defaults,
}

impl StoreConfig {
    /// Load `ddi.toml` from `root`; a missing file yields the default config.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        Self::parse(&text, &path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text).map_err(|source| StoreError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let mut collections = BTreeMap::new();
        for (name, file) in raw.collections {
            let kind: Kind = name.parse().map_err(|_| StoreError::InvalidConfig {
                path: path.to_path_buf(),
                message: format!("unknown collection kind '{name}'"),
            })?;
            if kind.is_embedded_only() {
                return Err(StoreError::InvalidConfig {
                    path: path.to_path_buf(),
                    message: format!("{kind} has no collection of its own"),
                });
            }
            collections.insert(kind, file);
        }
        Ok(Self {
            collections,
            defaults: raw.defaults,
        })
    }

    /// File name holding the collection for `kind`; `None` for kinds that
    /// are only embedded.
    pub fn collection_file(&self, kind: Kind) -> Option<String> {
        self.collections
            .get(&kind)
            .cloned()
            .or_else(|| kind.collection_file())
    }
}
