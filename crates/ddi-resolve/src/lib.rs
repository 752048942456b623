//! Reference resolution for DDI resources.
//!
//! Resolution replaces `<x>Reference` fields and bare scheme members with
//! the resources they name, looked up through an [`EntitySource`]:
//!
//! - [`ResolutionLevel::None`] returns the resource unchanged.
//! - [`ResolutionLevel::Children`] expands the top-level references, the
//!   code list under `representation.codeRepresentation`, each code's
//!   category and the members of a scheme. Embedded resources are raw.
//! - [`ResolutionLevel::All`] repeats the same expansion inside every
//!   embedded resource. A resource already being expanded on the current
//!   path is left as a reference.
//!
//! Resolved reference fields lose their `Reference` suffix. A reference
//! whose target cannot be found is kept as-is.

mod context;
mod resolver;

pub use context::{NodeKey, Traversal};
pub use resolver::{ReferenceResolver, resolve};

pub use ddi_model::ResolutionLevel;
pub use ddi_store::EntitySource;
