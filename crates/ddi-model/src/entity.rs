use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::classify_map;
use crate::error::{ModelError, Result};
use crate::ids::Identifier;
use crate::kind::Kind;
use crate::representation::Representation;
use crate::text::LocalizedText;

/// A DDI resource as loaded from a collection or produced by the resolver.
///
/// Entities wrap a JSON object and are never mutated after construction;
/// every transformation builds a new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ModelError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn agency_id(&self) -> Option<&str> {
        self.str_field("agencyID")
    }

    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::from_map(&self.0)
    }

    /// Explicit URN or the canonical `urn:ddi:<agency>:<id>:<version>` form.
    pub fn urn(&self) -> String {
        self.identifier().urn()
    }

    /// Classified kind; `None` when the entity cannot be classified.
    pub fn kind(&self) -> Option<Kind> {
        classify_map(&self.0)
    }

    /// True when `key` names this entity by id, explicit URN or canonical URN.
    pub fn matches(&self, key: &str) -> bool {
        if self.id() == Some(key) {
            return true;
        }
        let identifier = self.identifier();
        identifier.urn.as_deref() == Some(key)
            || (!identifier.id.is_empty() && identifier.urn() == key)
    }

    pub fn localized(&self, field: &str) -> Vec<LocalizedText> {
        LocalizedText::list(self.0.get(field))
    }

    pub fn representation(&self) -> Option<Representation> {
        self.0.get("representation").and_then(Representation::from_value)
    }

    pub fn is_universally_unique(&self) -> bool {
        is_truthy(self.0.get("isUniversallyUnique"))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        entity.into_value()
    }
}

impl TryFrom<Value> for Entity {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self> {
        Entity::from_value(value)
    }
}

/// Loose truthiness for optional flags (`true`, `"true"`, non-zero).
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.eq_ignore_ascii_case("true"),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_objects() {
        let err = Entity::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn matches_id_and_urns() {
        let entity =
            Entity::from_value(json!({"id": "concept-001", "agencyID": "ex", "version": "1.0.0"}))
                .unwrap();
        assert!(entity.matches("concept-001"));
        assert!(entity.matches("urn:ddi:ex:concept-001:1.0.0"));
        assert!(!entity.matches("concept-002"));
    }

    #[test]
    fn uniqueness_flag_is_truthy_only() {
        let unique = Entity::from_value(json!({"isUniversallyUnique": true})).unwrap();
        let not_unique = Entity::from_value(json!({"isUniversallyUnique": false})).unwrap();
        assert!(unique.is_universally_unique());
        assert!(!not_unique.is_universally_unique());
    }
}
