use ddi_model::{
    Entity, FieldRole, Identifier, Kind, Reference, ResolutionLevel, is_member_identifier,
    resolved_field_name,
};
use ddi_store::EntitySource;
use serde_json::{Map, Value};
use tracing::{debug, debug_span, trace};

use crate::context::{NodeKey, Traversal};

const CATEGORY_REFERENCE: &str = "categoryReference";
const CODE_REPRESENTATION: &str = "codeRepresentation";
const CODE_LIST_REFERENCE: &str = "codeListReference";

/// Resolve `entity` against `source` at `level`.
pub fn resolve<S>(source: &S, entity: &Entity, level: ResolutionLevel) -> Entity
where
    S: EntitySource + ?Sized,
{
    ReferenceResolver::new(source).resolve(entity, level)
}

/// Builds resolved copies of resources. The source is only read.
pub struct ReferenceResolver<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> ReferenceResolver<'a, S>
where
    S: EntitySource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve an entity whose kind is taken from its tag or shape.
    pub fn resolve(&self, entity: &Entity, level: ResolutionLevel) -> Entity {
        self.resolve_entity(None, entity, level)
    }

    /// Resolve an entity taken from the `kind` collection.
    pub fn resolve_as(&self, kind: Kind, entity: &Entity, level: ResolutionLevel) -> Entity {
        self.resolve_entity(Some(kind), entity, level)
    }

    /// Resolve each entity of the `kind` collection independently, keeping
    /// input order.
    pub fn resolve_all<'e, I>(
        &self,
        kind: Kind,
        entities: I,
        level: ResolutionLevel,
    ) -> Vec<Entity>
    where
        I: IntoIterator<Item = &'e Entity>,
    {
        entities
            .into_iter()
            .map(|entity| self.resolve_as(kind, entity, level))
            .collect()
    }

    fn resolve_entity(
        &self,
        kind: Option<Kind>,
        entity: &Entity,
        level: ResolutionLevel,
    ) -> Entity {
        if level == ResolutionLevel::None {
            return entity.clone();
        }
        let span = debug_span!("resolve", id = entity.id().unwrap_or_default(), %level);
        let _guard = span.enter();
        let cx = Traversal::root(level, kind, entity.as_map());
        Entity::new(self.resolve_object(entity.as_map(), &cx))
    }

    fn resolve_object(&self, map: &Map<String, Value>, cx: &Traversal) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            match FieldRole::of(key, value) {
                FieldRole::Identity | FieldRole::Scalar => {
                    out.insert(key.clone(), value.clone());
                }
                FieldRole::Reference => self.resolve_reference_field(map, key, value, cx, &mut out),
                FieldRole::Representation => {
                    let resolved = if cx.is_recursive() {
                        self.resolve_value(value, None, cx)
                    } else if cx.expands() {
                        self.resolve_representation(value, cx)
                    } else {
                        value.clone()
                    };
                    out.insert(key.clone(), resolved);
                }
                FieldRole::Members(kind) => {
                    let resolved = if cx.expands() {
                        self.resolve_members(kind, value, cx)
                    } else {
                        value.clone()
                    };
                    out.insert(key.clone(), resolved);
                }
                FieldRole::Codes => {
                    let resolved = if cx.expands() {
                        self.resolve_codes(value, cx)
                    } else {
                        value.clone()
                    };
                    out.insert(key.clone(), resolved);
                }
                FieldRole::Nested => {
                    let resolved = if cx.is_recursive() {
                        self.resolve_value(value, Kind::from_field_stem(key), cx)
                    } else {
                        value.clone()
                    };
                    out.insert(key.clone(), resolved);
                }
            }
        }
        out
    }

    /// Resolve a nested value. `kind` is what the enclosing field implies
    /// for objects found here (`concept` holds a Concept).
    fn resolve_value(&self, value: &Value, kind: Option<Kind>, cx: &Traversal) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.resolve_object(map, &cx.enter(kind, map))),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_value(item, kind, cx))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Write `key` into `out`, either as the embedded target under its
    /// renamed field or unchanged.
    fn resolve_reference_field(
        &self,
        owner: &Map<String, Value>,
        key: &str,
        value: &Value,
        cx: &Traversal,
        out: &mut Map<String, Value>,
    ) {
        // An owner that already carries the renamed field keeps both as given.
        if let Some(name) = resolved_field_name(key)
            && cx.expands()
            && !owner.contains_key(name)
            && let Some(target) = self.expand_reference(key, value, cx)
        {
            out.insert(name.to_string(), target);
            return;
        }
        out.insert(key.to_string(), value.clone());
    }

    fn expand_reference(&self, key: &str, value: &Value, cx: &Traversal) -> Option<Value> {
        let reference = Reference::from_value(value)?;
        let kind = if key == CATEGORY_REFERENCE {
            Some(Kind::Category)
        } else {
            reference.target_kind(key)
        };
        let Some(kind) = kind else {
            debug!(
                field = key,
                tag = reference.type_of_object.as_deref().unwrap_or_default(),
                "unknown reference target kind, left unresolved"
            );
            return None;
        };
        let Some(lookup_key) = reference.identifier.lookup_key() else {
            debug!(field = key, "reference names no id or urn, left unresolved");
            return None;
        };
        let Some(target) = self.source.lookup(kind, lookup_key) else {
            debug!(field = key, %kind, key = lookup_key, "reference target not found");
            return None;
        };
        self.embed(kind, target, cx)
    }

    /// The value that replaces a reference to `target`, found in the `kind`
    /// collection: the raw resource at non-recursive levels, its resolved copy
    /// otherwise. `None` when the target is already being expanded on this
    /// path.
    fn embed(&self, kind: Kind, target: &Entity, cx: &Traversal) -> Option<Value> {
        if !cx.is_recursive() {
            return Some(target.to_value());
        }
        if let Some(node) = NodeKey::of(Some(kind), target.as_map())
            && cx.contains(&node)
        {
            debug!(%kind, id = %node.id, depth = cx.depth(), "reference cycle, left unresolved");
            return None;
        }
        trace!(%kind, id = target.id().unwrap_or_default(), depth = cx.depth(), "expanding");
        let child = cx.enter(Some(kind), target.as_map());
        Some(Value::Object(self.resolve_object(target.as_map(), &child)))
    }

    fn resolve_representation(&self, value: &Value, cx: &Traversal) -> Value {
        let Some(map) = value.as_object() else {
            return value.clone();
        };
        let out = map
            .iter()
            .map(|(key, value)| {
                let resolved = match value.as_object() {
                    Some(code) if key == CODE_REPRESENTATION => {
                        Value::Object(self.resolve_only(code, CODE_LIST_REFERENCE, cx))
                    }
                    _ => value.clone(),
                };
                (key.clone(), resolved)
            })
            .collect();
        Value::Object(out)
    }

    /// Copy `map`, resolving the single reference field `field`.
    fn resolve_only(
        &self,
        map: &Map<String, Value>,
        field: &str,
        cx: &Traversal,
    ) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            if key == field && value.is_object() {
                self.resolve_reference_field(map, key, value, cx, &mut out);
            } else {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }

    fn resolve_members(&self, kind: Kind, value: &Value, cx: &Traversal) -> Value {
        let Some(items) = value.as_array() else {
            return value.clone();
        };
        Value::Array(
            items
                .iter()
                .map(|item| self.resolve_member(kind, item, cx))
                .collect(),
        )
    }

    fn resolve_member(&self, kind: Kind, item: &Value, cx: &Traversal) -> Value {
        if !is_member_identifier(item) {
            return if cx.is_recursive() {
                self.resolve_value(item, Some(kind), cx)
            } else {
                item.clone()
            };
        }
        let identifier = item.as_object().map(Identifier::from_map);
        let member = identifier
            .as_ref()
            .and_then(Identifier::lookup_key)
            .and_then(|key| self.source.lookup(kind, key));
        match member {
            Some(member) => self.embed(kind, member, cx).unwrap_or_else(|| item.clone()),
            None => {
                debug!(%kind, "scheme member not found, kept as identifier");
                item.clone()
            }
        }
    }

    fn resolve_codes(&self, value: &Value, cx: &Traversal) -> Value {
        let Some(items) = value.as_array() else {
            return value.clone();
        };
        Value::Array(
            items
                .iter()
                .map(|item| match item.as_object() {
                    Some(_) if cx.is_recursive() => {
                        self.resolve_value(item, Some(Kind::Code), cx)
                    }
                    Some(code) => Value::Object(self.resolve_only(code, CATEGORY_REFERENCE, cx)),
                    None => item.clone(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use ddi_store::DataStore;
    use serde_json::json;

    use super::*;

    fn entity(value: Value) -> Entity {
        Entity::from_value(value).unwrap()
    }

    fn store() -> DataStore {
        DataStore::new()
            .with_collection(
                Kind::Concept,
                vec![entity(json!({"id": "c1", "typeOfObject": "Concept", "definition": []}))],
            )
            .unwrap()
    }

    #[test]
    fn none_is_a_copy() {
        let variable = entity(json!({"id": "v1", "conceptReference": {"id": "c1"}}));
        assert_eq!(resolve(&store(), &variable, ResolutionLevel::None), variable);
    }

    #[test]
    fn field_stem_selects_collection_without_tag() {
        let variable = entity(json!({"id": "v1", "conceptReference": {"id": "c1"}}));
        let resolved = resolve(&store(), &variable, ResolutionLevel::Children);
        assert_eq!(resolved.get("concept").and_then(|c| c.get("id")), Some(&json!("c1")));
        assert!(resolved.get("conceptReference").is_none());
    }

    #[test]
    fn existing_renamed_field_is_not_overwritten() {
        let variable = entity(json!({
            "id": "v1",
            "conceptReference": {"id": "c1"},
            "concept": {"id": "c0"}
        }));
        let resolved = resolve(&store(), &variable, ResolutionLevel::All);
        assert_eq!(resolved.get("conceptReference"), Some(&json!({"id": "c1"})));
        assert_eq!(resolved.get("concept"), Some(&json!({"id": "c0"})));
    }

    #[test]
    fn same_id_in_another_collection_is_not_a_cycle() {
        // Untagged, with only a name and label: shaped like a variable.
        let store = DataStore::new()
            .with_collection(
                Kind::Concept,
                vec![entity(json!({
                    "id": "x",
                    "name": [{"value": "X", "lang": "en"}],
                    "label": [{"value": "X", "lang": "en"}]
                }))],
            )
            .unwrap();
        let variable = entity(json!({
            "id": "x",
            "typeOfObject": "Variable",
            "conceptReference": {"id": "x", "typeOfObject": "Concept"}
        }));
        let resolved = ReferenceResolver::new(&store).resolve_as(
            Kind::Variable,
            &variable,
            ResolutionLevel::All,
        );
        assert_eq!(resolved.get("concept").and_then(|c| c.get("id")), Some(&json!("x")));
        assert!(resolved.get("conceptReference").is_none());
    }

    #[test]
    fn unknown_tag_is_left_alone() {
        let variable = entity(json!({
            "id": "v1",
            "conceptReference": {"id": "c1", "typeOfObject": "Study"}
        }));
        let resolved = resolve(&store(), &variable, ResolutionLevel::All);
        assert_eq!(resolved, variable);
    }
}
