//! DDI resource model.
//!
//! This crate holds the vocabulary shared by the store, the reference
//! resolver and the markup mapper:
//!
//! - [`Kind`]: the nine DDI resource kinds and their collection metadata
//! - [`ResolutionLevel`]: how far reference fields are expanded
//! - [`Identifier`], [`Reference`], [`LocalizedText`], [`Representation`]:
//!   typed views over the JSON shapes
//! - [`Entity`]: an immutable JSON object node
//! - [`classify`]: the explicit-tag / structural type classifier and the
//!   field vocabulary used to decide what a JSON field is

#![deny(unsafe_code)]

pub mod classify;
pub mod entity;
pub mod error;
pub mod ids;
pub mod kind;
pub mod reference;
pub mod representation;
pub mod text;

pub use classify::{FieldRole, classify, classify_map, is_member_identifier, resolved_field_name};
pub use entity::{Entity, is_truthy};
pub use error::{ModelError, Result};
pub use ids::{Identifier, canonical_urn, id_from_urn};
pub use kind::{Kind, ResolutionLevel};
pub use reference::Reference;
pub use representation::{
    CodeListLink, CodeRepresentation, DateRepresentation, NumericRepresentation, Representation,
    TextRepresentation,
};
pub use text::{LocalizedText, scalar_text};
