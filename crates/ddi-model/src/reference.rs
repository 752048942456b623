use serde_json::{Map, Value};

use crate::ids::Identifier;
use crate::kind::Kind;

/// An unresolved pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub identifier: Identifier,
    /// Raw `typeOfObject` (or the looser `type`) tag, if any.
    pub type_of_object: Option<String>,
}

impl Reference {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let type_of_object = ["typeOfObject", "type"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .filter(|tag| !tag.is_empty())
            .map(str::to_string);
        Self {
            identifier: Identifier::from_map(map),
            type_of_object,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_map)
    }

    /// Kind named by the explicit tag. Unknown tags yield `None`.
    pub fn tagged_kind(&self) -> Option<Kind> {
        self.type_of_object.as_deref().and_then(Kind::from_tag)
    }

    /// Kind to look the target up in: the explicit tag when present, otherwise
    /// the kind implied by the field name (`sourceVariableReference` -> Variable).
    pub fn target_kind(&self, field: &str) -> Option<Kind> {
        match self.type_of_object.as_deref() {
            Some(tag) => Kind::from_tag(tag),
            None => field
                .strip_suffix("Reference")
                .and_then(Kind::from_field_stem),
        }
    }

    /// Tag to print as `TypeOfObject`, falling back to the field-implied kind.
    pub fn type_label(&self, field: &str) -> String {
        match &self.type_of_object {
            Some(tag) => tag.clone(),
            None => self
                .target_kind(field)
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn urn(&self) -> String {
        self.identifier.urn()
    }
}
