//! DDI 3.3 XML output.
//!
//! [`map_document`] turns a single resource or an array of resources into an
//! [`ElementTree`] rooted at `g:ResourcePackage`; [`serialize`] writes that
//! tree as indented UTF-8 XML. Mapping never fails: missing optional fields
//! are omitted and unclassifiable objects become minimal `r:Item` elements.

pub mod common;
pub mod error;
pub mod mapper;
pub mod tree;
pub mod writer;

pub use common::{
    DDI_MEDIA_TYPE, DDI_NAMESPACES, DEFAULT_NAMESPACE, KindExt, RESOURCE_PACKAGE, UNKNOWN_ELEMENT,
};
pub use error::{Result, XmlError};
pub use mapper::{map_document, map_entity};
pub use tree::{Element, ElementTree, Node};
pub use writer::serialize;
