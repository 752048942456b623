//! Resource kinds and resolution levels.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The nine DDI resource kinds served by the harness.
///
/// Schemes are containers whose member arrays hold either bare identifiers
/// or embedded members of the corresponding member kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    Concept,
    ConceptScheme,
    Variable,
    VariableScheme,
    CodeList,
    CodeListScheme,
    Category,
    CategoryScheme,
    Code,
}

impl Kind {
    pub const ALL: [Kind; 9] = [
        Kind::Concept,
        Kind::ConceptScheme,
        Kind::Variable,
        Kind::VariableScheme,
        Kind::CodeList,
        Kind::CodeListScheme,
        Kind::Category,
        Kind::CategoryScheme,
        Kind::Code,
    ];

    /// Kinds stored and served as top-level collections. Codes only exist
    /// inside their code list.
    pub const RESOURCES: [Kind; 8] = [
        Kind::Concept,
        Kind::ConceptScheme,
        Kind::Variable,
        Kind::VariableScheme,
        Kind::CodeList,
        Kind::CodeListScheme,
        Kind::Category,
        Kind::CategoryScheme,
    ];

    /// Returns the `typeOfObject` tag for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Concept => "Concept",
            Kind::ConceptScheme => "ConceptScheme",
            Kind::Variable => "Variable",
            Kind::VariableScheme => "VariableScheme",
            Kind::CodeList => "CodeList",
            Kind::CodeListScheme => "CodeListScheme",
            Kind::Category => "Category",
            Kind::CategoryScheme => "CategoryScheme",
            Kind::Code => "Code",
        }
    }

    /// Matches an explicit `typeOfObject`/`type` tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Maps the stem of a reference field (`concept` in `conceptReference`)
    /// to the kind it points at.
    pub fn from_field_stem(stem: &str) -> Option<Kind> {
        match stem {
            "subclassOf" => Some(Kind::Concept),
            "sourceVariable" => Some(Kind::Variable),
            _ => Kind::ALL
                .into_iter()
                .find(|kind| kind.field_stem() == stem),
        }
    }

    /// Lower camel case form used in field names (`codeListScheme`).
    pub fn field_stem(&self) -> &'static str {
        match self {
            Kind::Concept => "concept",
            Kind::ConceptScheme => "conceptScheme",
            Kind::Variable => "variable",
            Kind::VariableScheme => "variableScheme",
            Kind::CodeList => "codeList",
            Kind::CodeListScheme => "codeListScheme",
            Kind::Category => "category",
            Kind::CategoryScheme => "categoryScheme",
            Kind::Code => "code",
        }
    }

    /// Path segment of the REST resource serving this kind. `None` for
    /// codes, which are embedded in code lists.
    pub const fn resource_path(&self) -> Option<&'static str> {
        match self {
            Kind::Concept => Some("concepts"),
            Kind::ConceptScheme => Some("concept-schemes"),
            Kind::Variable => Some("variables"),
            Kind::VariableScheme => Some("variable-schemes"),
            Kind::CodeList => Some("code-lists"),
            Kind::CodeListScheme => Some("code-list-schemes"),
            Kind::Category => Some("categories"),
            Kind::CategoryScheme => Some("category-schemes"),
            Kind::Code => None,
        }
    }

    pub const fn is_embedded_only(&self) -> bool {
        self.resource_path().is_none()
    }

    /// Default collection file name inside the data directory.
    pub fn collection_file(&self) -> Option<String> {
        self.resource_path().map(|path| format!("{path}.json"))
    }

    pub fn from_resource_path(path: &str) -> Option<Kind> {
        let trimmed = path.trim().trim_matches('/');
        Kind::RESOURCES
            .into_iter()
            .find(|kind| kind.resource_path() == Some(trimmed))
    }

    /// Parse a served resource kind; embedded-only kinds are rejected.
    pub fn parse_resource(s: &str) -> Result<Kind, ModelError> {
        let kind: Kind = s.parse()?;
        if kind.is_embedded_only() {
            return Err(ModelError::EmbeddedOnly(kind));
        }
        Ok(kind)
    }

    /// Kind of the members held by a scheme.
    pub const fn member_kind(&self) -> Option<Kind> {
        match self {
            Kind::ConceptScheme => Some(Kind::Concept),
            Kind::VariableScheme => Some(Kind::Variable),
            Kind::CodeListScheme => Some(Kind::CodeList),
            Kind::CategoryScheme => Some(Kind::Category),
            _ => None,
        }
    }

    /// JSON key of the member array on a scheme.
    pub const fn member_key(&self) -> Option<&'static str> {
        match self {
            Kind::ConceptScheme => Some("concepts"),
            Kind::VariableScheme => Some("variables"),
            Kind::CodeListScheme => Some("codeLists"),
            Kind::CategoryScheme => Some("categories"),
            _ => None,
        }
    }

    /// Member kind for a scheme member array key (`concepts` -> Concept).
    pub fn from_member_key(key: &str) -> Option<Kind> {
        match key {
            "concepts" => Some(Kind::Concept),
            "variables" => Some(Kind::Variable),
            "codeLists" => Some(Kind::CodeList),
            "categories" => Some(Kind::Category),
            _ => None,
        }
    }

    pub const fn is_scheme(&self) -> bool {
        self.member_kind().is_some()
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Kind {
    type Err = ModelError;

    /// Accepts either the tag (`CodeList`) or the resource path (`code-lists`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Kind::from_tag(trimmed)
            .or_else(|| Kind::from_resource_path(trimmed))
            .or_else(|| {
                Kind::ALL
                    .into_iter()
                    .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// How far reference fields are expanded.
///
/// - `None`: references stay as they are
/// - `Children`: references on the root entity and the root's scheme members
/// - `All`: every reference at every depth, guarded against cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionLevel {
    #[default]
    None,
    Children,
    All,
}

impl ResolutionLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolutionLevel::None => "none",
            ResolutionLevel::Children => "children",
            ResolutionLevel::All => "all",
        }
    }

    pub const fn is_recursive(&self) -> bool {
        matches!(self, ResolutionLevel::All)
    }
}

impl std::fmt::Display for ResolutionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResolutionLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" | "none" => Ok(ResolutionLevel::None),
            "children" => Ok(ResolutionLevel::Children),
            "all" => Ok(ResolutionLevel::All),
            _ => Err(ModelError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
        for kind in Kind::RESOURCES {
            let path = kind.resource_path().unwrap();
            assert_eq!(path.parse::<Kind>().unwrap(), kind);
        }
        assert!("Dataset".parse::<Kind>().is_err());
    }

    #[test]
    fn codes_are_embedded_only() {
        assert!(Kind::Code.is_embedded_only());
        assert_eq!(Kind::Code.collection_file(), None);
        assert!(!Kind::RESOURCES.contains(&Kind::Code));
        assert!("codes".parse::<Kind>().is_err());
        assert!(matches!(
            Kind::parse_resource("Code"),
            Err(ModelError::EmbeddedOnly(Kind::Code))
        ));
        assert_eq!(Kind::parse_resource("code-lists").unwrap(), Kind::CodeList);
        assert_eq!(
            Kind::CodeListScheme.collection_file().as_deref(),
            Some("code-list-schemes.json")
        );
    }

    #[test]
    fn field_stems_cover_special_reference_names() {
        assert_eq!(Kind::from_field_stem("subclassOf"), Some(Kind::Concept));
        assert_eq!(Kind::from_field_stem("sourceVariable"), Some(Kind::Variable));
        assert_eq!(
            Kind::from_field_stem("categoryScheme"),
            Some(Kind::CategoryScheme)
        );
        assert_eq!(Kind::from_field_stem("widget"), None);
    }

    #[test]
    fn scheme_members() {
        assert_eq!(Kind::ConceptScheme.member_kind(), Some(Kind::Concept));
        assert_eq!(Kind::CategoryScheme.member_key(), Some("categories"));
        assert_eq!(Kind::from_member_key("codeLists"), Some(Kind::CodeList));
        assert!(!Kind::CodeList.is_scheme());
    }

    #[test]
    fn parses_levels() {
        assert_eq!("ALL".parse::<ResolutionLevel>().unwrap(), ResolutionLevel::All);
        assert_eq!(
            " children ".parse::<ResolutionLevel>().unwrap(),
            ResolutionLevel::Children
        );
        assert_eq!("".parse::<ResolutionLevel>().unwrap(), ResolutionLevel::None);
        assert!("deep".parse::<ResolutionLevel>().is_err());
    }
}
