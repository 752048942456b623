use ddi_model::{
    CodeListLink, Entity, Kind, LocalizedText, Reference, Representation, ResolutionLevel, classify,
};
use serde_json::json;

fn entity(value: serde_json::Value) -> Entity {
    Entity::from_value(value).expect("entity")
}

#[test]
fn variable_entity_accessors() {
    let variable = entity(json!({
        "id": "var-001",
        "agencyID": "ex",
        "version": "1.0.0",
        "label": [{"value": "Age", "lang": "en"}, {"value": "Âge", "lang": "fr"}],
        "conceptReference": {"id": "concept-001", "agencyID": "ex", "version": "1.0.0", "typeOfObject": "Concept"},
        "representation": {
            "codeRepresentation": {
                "recommendedDataType": "Code",
                "codeList": {"id": "cl-1", "agencyID": "ex", "version": "1.0.0", "codes": []}
            }
        }
    }));

    assert_eq!(variable.kind(), Some(Kind::Variable));
    assert_eq!(variable.urn(), "urn:ddi:ex:var-001:1.0.0");
    assert_eq!(
        variable.localized("label"),
        vec![LocalizedText::new("Age", "en"), LocalizedText::new("Âge", "fr")]
    );

    let reference = Reference::from_value(variable.get("conceptReference").unwrap()).unwrap();
    assert_eq!(reference.tagged_kind(), Some(Kind::Concept));
    assert_eq!(reference.urn(), "urn:ddi:ex:concept-001:1.0.0");

    let Some(Representation::Code(code)) = variable.representation() else {
        panic!("expected code representation");
    };
    let Some(CodeListLink::Embedded(code_list)) = code.code_list else {
        panic!("expected embedded code list");
    };
    assert_eq!(code_list.kind(), Some(Kind::CodeList));
}

#[test]
fn entity_serializes_transparently() {
    let source = json!({"id": "cat-1", "label": [{"value": "Yes", "lang": "en"}]});
    let category = entity(source.clone());
    assert_eq!(serde_json::to_value(&category).unwrap(), source);
    let back: Entity = serde_json::from_value(source).unwrap();
    assert_eq!(back, category);
    assert_eq!(classify(&back.to_value()), Some(Kind::Category));
}

#[test]
fn level_serde_uses_lowercase() {
    let level: ResolutionLevel = serde_json::from_value(json!("children")).unwrap();
    assert_eq!(level, ResolutionLevel::Children);
    assert_eq!(serde_json::to_value(ResolutionLevel::All).unwrap(), json!("all"));
    assert_eq!(ResolutionLevel::default(), ResolutionLevel::None);
}
