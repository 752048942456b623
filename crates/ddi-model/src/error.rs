use thiserror::Error;

use crate::kind::Kind;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid resolution level '{0}' (expected none, children or all)")]
    InvalidLevel(String),
    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),
    #[error("{0} resources are only embedded in their parent, not served on their own")]
    EmbeddedOnly(Kind),
    #[error("expected a JSON object for an entity, found {found}")]
    NotAnObject { found: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
