//! DDI resource collections.
//!
//! Collections are flat JSON arrays, one per resource kind, loaded once from a
//! data directory and then shared read-only:
//!
//! ```text
//! fixtures/
//! ├── ddi.toml                 # optional, see [`config`]
//! ├── concepts.json
//! ├── concept-schemes.json
//! ├── variables.json
//! ├── variable-schemes.json
//! ├── code-lists.json
//! ├── code-list-schemes.json
//! ├── categories.json
//! └── category-schemes.json
//! ```
//!
//! [`query::ResourceQuery`] narrows a collection before resolution.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod paths;
pub mod query;
pub mod store;

pub use config::{Defaults, StoreConfig};
pub use error::{Result, StoreError};
pub use paths::{CONFIG_FILE, DATA_ENV_VAR, bundled_fixtures, data_root};
pub use query::ResourceQuery;
pub use store::{DataStore, EntitySource};
