//! Type classification for loosely-typed DDI JSON.
//!
//! Objects are classified by their explicit `typeOfObject`/`type` tag first.
//! Untagged objects fall back to a structural heuristic evaluated in a fixed
//! order, first match wins:
//!
//! | has                                                   | kind           |
//! |-------------------------------------------------------|----------------|
//! | `concepts`                                            | ConceptScheme  |
//! | `variables`                                           | VariableScheme |
//! | `codeLists`                                           | CodeListScheme |
//! | `categories`                                          | CategoryScheme |
//! | `codes`                                               | CodeList       |
//! | `value` and (`categoryReference` or `category`)       | Code           |
//! | `definition`, `subclassOfReference` or `subclassOf`   | Concept        |
//! | `representation`                                      | Variable       |
//! | `label`, no `name`/`value`/`definition`               | Category       |
//! | `name` and `label`, no `definition`/`value`/`codes`   | Variable       |
//!
//! The last row is ambiguous (a concept with only a name and label matches it
//! too); Variable is kept as the default.

use serde_json::{Map, Value};

use crate::kind::Kind;

/// Fields that identify a resource and are never resolved.
pub const IDENTITY_FIELDS: [&str; 6] = ["urn", "id", "agencyID", "version", "typeOfObject", "type"];

/// Keys a bare member identifier may carry.
const MEMBER_IDENTIFIER_FIELDS: [&str; 5] = ["id", "urn", "agencyID", "version", "isUniversallyUnique"];

const REFERENCE_SUFFIX: &str = "Reference";

/// Classify a JSON value. Non-objects and unrecognised shapes yield `None`.
pub fn classify(value: &Value) -> Option<Kind> {
    value.as_object().and_then(classify_map)
}

pub fn classify_map(map: &Map<String, Value>) -> Option<Kind> {
    if let Some(tag) = explicit_tag(map) {
        return Kind::from_tag(tag);
    }

    let has = |key: &str| map.get(key).is_some_and(|value| !value.is_null());

    if has("concepts") {
        Some(Kind::ConceptScheme)
    } else if has("variables") {
        Some(Kind::VariableScheme)
    } else if has("codeLists") {
        Some(Kind::CodeListScheme)
    } else if has("categories") {
        Some(Kind::CategoryScheme)
    } else if has("codes") {
        Some(Kind::CodeList)
    } else if has("value") && (has("categoryReference") || has("category")) {
        Some(Kind::Code)
    } else if has("definition") || has("subclassOfReference") || has("subclassOf") {
        Some(Kind::Concept)
    } else if has("representation") {
        Some(Kind::Variable)
    } else if has("label") && !has("name") && !has("value") && !has("definition") {
        Some(Kind::Category)
    } else if has("name") && has("label") && !has("definition") && !has("value") && !has("codes")
    {
        Some(Kind::Variable)
    } else {
        None
    }
}

/// The explicit `typeOfObject` tag, or the looser `type` alias.
pub fn explicit_tag(map: &Map<String, Value>) -> Option<&str> {
    ["typeOfObject", "type"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .filter(|tag| !tag.is_empty())
}

/// True for a scheme member that only names its target (`{id, agencyID,
/// version}` or `{urn}`) rather than describing it.
pub fn is_member_identifier(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    let names_target = map.get("id").and_then(Value::as_str).is_some()
        || map.get("urn").and_then(Value::as_str).is_some();
    names_target
        && explicit_tag(map).is_none()
        && map
            .keys()
            .all(|key| MEMBER_IDENTIFIER_FIELDS.contains(&key.as_str()))
}

/// Name of a reference field once resolved: `conceptReference` -> `concept`,
/// `categorySchemeReference` -> `categoryScheme`, `subclassOfReference` ->
/// `subclassOf`. Returns `None` for names that are not reference fields.
pub fn resolved_field_name(key: &str) -> Option<&str> {
    key.strip_suffix(REFERENCE_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

/// What a JSON field means to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// One of [`IDENTITY_FIELDS`]; copied verbatim.
    Identity,
    /// `<x>Reference` object naming another resource.
    Reference,
    /// A variable's `representation` object.
    Representation,
    /// A scheme member array (`concepts`, `variables`, ...).
    Members(Kind),
    /// A code list's `codes` array.
    Codes,
    /// Any other object or array.
    Nested,
    Scalar,
}

impl FieldRole {
    pub fn of(key: &str, value: &Value) -> FieldRole {
        if IDENTITY_FIELDS.contains(&key) {
            return FieldRole::Identity;
        }
        match value {
            Value::Object(_) if resolved_field_name(key).is_some() => FieldRole::Reference,
            Value::Object(_) if key == "representation" => FieldRole::Representation,
            Value::Array(_) if key == "codes" => FieldRole::Codes,
            Value::Array(_) => match Kind::from_member_key(key) {
                Some(kind) => FieldRole::Members(kind),
                None => FieldRole::Nested,
            },
            Value::Object(_) => FieldRole::Nested,
            _ => FieldRole::Scalar,
        }
    }
}
