//! Shared constants and element naming for DDI XML output.

use ddi_model::Kind;

/// Root element wrapping every document.
pub const RESOURCE_PACKAGE: &str = "g:ResourcePackage";

/// Element for objects whose kind cannot be determined.
pub const UNKNOWN_ELEMENT: &str = "r:Item";

/// Default (unprefixed) namespace.
pub const DEFAULT_NAMESPACE: &str = "ddi:instance:3_3";

/// Versioned media type for DDI XML responses.
pub const DDI_MEDIA_TYPE: &str = "application/vnd.ddi.structure+xml;version=3.3";

/// Namespace prefixes declared on the root, in declaration order.
pub const DDI_NAMESPACES: [(&str, &str); 9] = [
    ("c", "ddi:conceptualcomponent:3_3"),
    ("d", "ddi:datacollection:3_3"),
    ("g", "ddi:group:3_3"),
    ("i", "ddi:instance:3_3"),
    ("l", "ddi:logicalproduct:3_3"),
    ("p", "ddi:physicaldataproduct:3_3"),
    ("pi", "ddi:physicalinstance:3_3"),
    ("r", "ddi:reusable:3_3"),
    ("s", "ddi:studyunit:3_3"),
];

/// Indent width of serialized documents.
pub const INDENT: usize = 3;

/// Extension trait for Kind to get DDI element names.
pub trait KindExt {
    /// Qualified element name for a resource of this kind.
    fn element_name(&self) -> &'static str;

    /// Wrapper element for each `name` entry, for kinds that print names.
    fn name_element(&self) -> Option<&'static str>;
}

impl KindExt for Kind {
    fn element_name(&self) -> &'static str {
        match self {
            Kind::Concept => "c:Concept",
            Kind::ConceptScheme => "c:ConceptScheme",
            Kind::Variable => "l:Variable",
            Kind::VariableScheme => "l:VariableScheme",
            Kind::CodeList => "d:CodeList",
            Kind::CodeListScheme => "d:CodeListScheme",
            Kind::Category => "l:Category",
            Kind::CategoryScheme => "l:CategoryScheme",
            Kind::Code => "d:Code",
        }
    }

    fn name_element(&self) -> Option<&'static str> {
        match self {
            Kind::Concept | Kind::ConceptScheme => Some("c:ConceptName"),
            Kind::Variable | Kind::VariableScheme => Some("l:VariableName"),
            Kind::CodeList | Kind::CodeListScheme => Some("d:CodeListName"),
            Kind::Category | Kind::CategoryScheme | Kind::Code => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_prefixed_element() {
        for kind in Kind::ALL {
            let name = kind.element_name();
            let (prefix, _) = name.split_once(':').unwrap();
            assert!(DDI_NAMESPACES.iter().any(|(p, _)| *p == prefix), "{name}");
        }
    }

    #[test]
    fn name_blocks_follow_kind_family() {
        assert_eq!(Kind::ConceptScheme.name_element(), Some("c:ConceptName"));
        assert_eq!(Kind::Variable.name_element(), Some("l:VariableName"));
        assert_eq!(Kind::CodeListScheme.name_element(), Some("d:CodeListName"));
        assert_eq!(Kind::Category.name_element(), None);
    }
}
