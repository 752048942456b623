//! JSON resource to DDI element mapping.
//!
//! Children of a resource element are emitted in a fixed order:
//!
//! 1. `isUniversallyUnique` attribute when truthy
//! 2. `r:URN` (canonical `urn:ddi:<agency>:<id>:<version>` when absent)
//! 3. `r:UserID` with `typeOfUserID`
//! 4. name block (`c:ConceptName`, `l:VariableName`, `d:CodeListName`), one per entry
//! 5. `r:Label` with one `r:Content` per entry
//! 6. `r:Description`, one per entry
//! 7. `c:Definition` (concepts), one per entry
//! 8. reference blocks, unresolved (`URN` + `TypeOfObject`) or embedded
//! 9. `l:Representation` (variables)
//! 10. member collections
//! 11. `d:Value` (codes)
//!
//! Resources of unknown kind stop after step 3.

use ddi_model::classify::explicit_tag;
use ddi_model::{
    CodeListLink, Identifier, Kind, LocalizedText, Reference, Representation, classify_map,
    is_member_identifier, is_truthy, scalar_text,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::common::{DDI_NAMESPACES, DEFAULT_NAMESPACE, KindExt, RESOURCE_PACKAGE, UNKNOWN_ELEMENT};
use crate::tree::{Element, ElementTree};

/// Reference fields mapped in step 8: field stem, reference element, kind of
/// an embedded target.
const REFERENCE_BLOCKS: [(&str, &str, Kind); 5] = [
    ("concept", "c:ConceptReference", Kind::Concept),
    ("subclassOf", "c:SubclassOfReference", Kind::Concept),
    ("sourceVariable", "l:SourceVariableReference", Kind::Variable),
    ("categoryScheme", "d:CategorySchemeReference", Kind::CategoryScheme),
    ("category", "d:CategoryReference", Kind::Category),
];

/// Member arrays mapped in step 10.
const COLLECTIONS: [(&str, Kind); 5] = [
    ("concepts", Kind::Concept),
    ("variables", Kind::Variable),
    ("codeLists", Kind::CodeList),
    ("categories", Kind::Category),
    ("codes", Kind::Code),
];

/// Map a resource or an array of resources into a `g:ResourcePackage`
/// document. `kind` names the kind of untagged top-level resources; without
/// it they are classified structurally.
pub fn map_document(payload: &Value, kind: Option<Kind>) -> ElementTree {
    let mut root = Element::new(RESOURCE_PACKAGE);
    for (prefix, uri) in DDI_NAMESPACES {
        root.set_attribute(format!("xmlns:{prefix}"), uri);
    }
    root.set_attribute("xmlns", DEFAULT_NAMESPACE);

    match payload {
        Value::Array(items) => {
            for item in items {
                push_resource(&mut root, item, kind);
            }
        }
        other => push_resource(&mut root, other, kind),
    }
    ElementTree::new(root)
}

fn push_resource(parent: &mut Element, value: &Value, kind: Option<Kind>) {
    match value.as_object() {
        Some(map) => parent.push(map_entity(map, kind)),
        None => debug!(found = ?value, "skipping non-object resource"),
    }
}

/// Map one resource. An explicit `typeOfObject`/`type` tag decides the kind;
/// untagged objects take `hint`, then the structural classification.
pub fn map_entity(map: &Map<String, Value>, hint: Option<Kind>) -> Element {
    let kind = resolve_kind(map, hint);
    let mut element = Element::new(kind.map_or(UNKNOWN_ELEMENT, |kind| kind.element_name()));

    if is_truthy(map.get("isUniversallyUnique")) {
        element.set_attribute("isUniversallyUnique", "true");
    }
    element.push(Element::text("r:URN", Identifier::from_map(map).urn()));
    push_user_ids(&mut element, map.get("userID"));

    let Some(kind) = kind else {
        debug!(tag = explicit_tag(map).unwrap_or_default(), "unknown kind, emitting r:Item");
        return element;
    };

    if let Some(name_element) = kind.name_element() {
        for name in LocalizedText::list(map.get("name")) {
            element.push(Element::new(name_element).with_child(localized("r:String", &name)));
        }
    }

    let labels = LocalizedText::list(map.get("label"));
    if !labels.is_empty() {
        let mut label = Element::new("r:Label");
        for text in &labels {
            label.push(localized("r:Content", text));
        }
        element.push(label);
    }

    for text in LocalizedText::list(map.get("description")) {
        element.push(Element::new("r:Description").with_child(localized("r:Content", &text)));
    }

    if kind == Kind::Concept {
        for text in LocalizedText::list(map.get("definition")) {
            element.push(Element::new("c:Definition").with_child(localized("r:Content", &text)));
        }
    }

    for (stem, reference_element, target_kind) in REFERENCE_BLOCKS {
        let field = format!("{stem}Reference");
        if let Some(reference) = map.get(&field).and_then(Reference::from_value) {
            element.push(reference_block(reference_element, &reference, &field));
        }
        if let Some(embedded) = map.get(stem).and_then(Value::as_object) {
            element.push(map_entity(embedded, Some(target_kind)));
        }
    }

    if kind == Kind::Variable
        && let Some(representation) = map.get("representation").and_then(Representation::from_value)
    {
        element.push(Element::new("l:Representation").with_child(map_representation(&representation)));
    }

    for (key, member_kind) in COLLECTIONS {
        let Some(items) = map.get(key).and_then(Value::as_array) else {
            continue;
        };
        for item in items {
            match item.as_object() {
                Some(member) if is_member_identifier(item) => {
                    element.push(member_reference(member, member_kind));
                }
                Some(member) => element.push(map_entity(member, Some(member_kind))),
                None => debug!(collection = key, "skipping non-object member"),
            }
        }
    }

    if kind == Kind::Code
        && let Some(value) = map.get("value").and_then(scalar_text)
    {
        element.push(Element::text("d:Value", value));
    }

    element
}

fn resolve_kind(map: &Map<String, Value>, hint: Option<Kind>) -> Option<Kind> {
    match explicit_tag(map) {
        Some(tag) => Kind::from_tag(tag),
        None => hint.or_else(|| classify_map(map)),
    }
}

fn localized(name: &str, text: &LocalizedText) -> Element {
    let element = Element::text(name, text.value.as_str());
    match &text.lang {
        Some(lang) => element.with_attribute("xml:lang", lang.as_str()),
        None => element,
    }
}

fn push_user_ids(element: &mut Element, value: Option<&Value>) {
    let entries: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(value @ Value::Object(_)) => vec![value],
        _ => return,
    };
    for entry in entries {
        let Some(text) = entry.get("value").and_then(scalar_text) else {
            continue;
        };
        let mut user_id = Element::text("r:UserID", text);
        if let Some(kind) = entry.get("typeOfUserID").and_then(Value::as_str) {
            user_id.set_attribute("typeOfUserID", kind);
        }
        element.push(user_id);
    }
}

/// `{URN, TypeOfObject}` pair for an unresolved reference.
fn reference_block(name: &str, reference: &Reference, field: &str) -> Element {
    let mut element = Element::new(name).with_child(Element::text("r:URN", reference.urn()));
    let type_label = reference.type_label(field);
    if !type_label.is_empty() {
        element.push(Element::text("r:TypeOfObject", type_label));
    }
    element
}

/// Bare scheme member: kind element carrying only the URN.
fn member_reference(member: &Map<String, Value>, kind: Kind) -> Element {
    let mut element = Element::new(kind.element_name());
    if is_truthy(member.get("isUniversallyUnique")) {
        element.set_attribute("isUniversallyUnique", "true");
    }
    element.with_child(Element::text("r:URN", Identifier::from_map(member).urn()))
}

fn map_representation(representation: &Representation) -> Element {
    let mut element = Element::new(match representation {
        Representation::Code(_) => "l:CodeRepresentation",
        Representation::Numeric(_) => "l:NumericRepresentation",
        Representation::Text(_) => "l:TextRepresentation",
        Representation::Date(_) => "l:DateRepresentation",
    });
    if let Some(data_type) = representation.recommended_data_type() {
        element.push(Element::text("l:RecommendedDataType", data_type));
    }
    match representation {
        Representation::Code(code) => match &code.code_list {
            Some(CodeListLink::Reference(reference)) => {
                element.push(reference_block("l:CodeListReference", reference, "codeListReference"));
            }
            Some(CodeListLink::Embedded(list)) => {
                element.push(map_entity(list.as_map(), Some(Kind::CodeList)));
            }
            None => {}
        },
        Representation::Numeric(numeric) => {
            if let Some(format) = &numeric.format {
                element.push(Element::text("l:Format", format.as_str()));
            }
        }
        Representation::Text(text) => {
            if let Some(max_length) = &text.max_length {
                element.push(Element::text("l:MaxLength", max_length.as_str()));
            }
        }
        Representation::Date(date) => {
            if let Some(format) = &date.format {
                element.push(Element::text("l:Format", format.as_str()));
            }
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Element {
        map_entity(value.as_object().unwrap(), None)
    }

    fn names(element: &Element) -> Vec<&str> {
        element.elements().map(|child| child.name.as_str()).collect()
    }

    #[test]
    fn canonical_urn_when_absent() {
        let element = map(json!({"id": "c1", "agencyID": "ex", "version": "1.0.0",
                                 "typeOfObject": "Concept"}));
        assert_eq!(
            element.child("r:URN").and_then(Element::text_content).as_deref(),
            Some("urn:ddi:ex:c1:1.0.0")
        );
    }

    #[test]
    fn unknown_kind_is_minimal() {
        let element = map(json!({
            "id": "s1", "agencyID": "ex", "version": "1", "typeOfObject": "Study",
            "isUniversallyUnique": true,
            "userID": {"value": "S1", "typeOfUserID": "local"},
            "label": [{"value": "Study", "lang": "en"}]
        }));
        assert_eq!(element.name, "r:Item");
        assert_eq!(element.attribute("isUniversallyUnique"), Some("true"));
        assert_eq!(names(&element), vec!["r:URN", "r:UserID"]);
    }

    #[test]
    fn category_has_no_name_block() {
        let element = map(json!({"id": "k", "typeOfObject": "Category",
                                 "name": [{"value": "n", "lang": "en"}],
                                 "label": [{"value": "Yes", "lang": "en"}]}));
        assert_eq!(names(&element), vec!["r:URN", "r:Label"]);
    }

    #[test]
    fn definition_only_on_concepts() {
        let element = map(json!({"id": "v", "typeOfObject": "Variable",
                                 "definition": [{"value": "d", "lang": "en"}]}));
        assert!(element.child("c:Definition").is_none());
    }

    #[test]
    fn fixed_child_order() {
        let element = map(json!({
            "value": "1",
            "typeOfObject": "Code",
            "category": {"id": "cat", "label": [{"value": "Male", "lang": "en"}]},
            "description": [{"value": "first", "lang": "en"}, {"value": "second", "lang": "en"}],
            "id": "code-1"
        }));
        assert_eq!(
            names(&element),
            vec!["r:URN", "r:Description", "r:Description", "l:Category", "d:Value"]
        );
    }

    #[test]
    fn representation_children() {
        let element = map(json!({
            "id": "v", "typeOfObject": "Variable",
            "representation": {"textRepresentation": {"maxLength": 20}}
        }));
        let text = element
            .child("l:Representation")
            .and_then(|r| r.child("l:TextRepresentation"))
            .unwrap();
        assert_eq!(names(text), vec!["l:MaxLength"]);
    }
}
