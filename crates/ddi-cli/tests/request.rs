use ddi_cli::request::{
    OutputFormat, Request, STATUS_NOT_FOUND, STATUS_OK, display_name, handle,
};
use ddi_model::{Entity, Kind, ResolutionLevel};
use ddi_store::{DataStore, ResourceQuery, bundled_fixtures};
use serde_json::{Value, json};

fn fixtures() -> DataStore {
    DataStore::load(&bundled_fixtures()).expect("load fixtures")
}

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).expect("json body")
}

#[test]
fn lists_collection_as_json_array() {
    let response = handle(&fixtures(), &Request::list(Kind::Variable));
    assert_eq!(response.status, STATUS_OK);
    assert_eq!(response.content_type, "application/json");
    let body = body_json(&response.body);
    assert_eq!(body.as_array().map(Vec::len), Some(5));
    assert!(body[0].get("conceptReference").is_some());
}

#[test]
fn filters_before_resolving() {
    let query = ResourceQuery::from_pairs([("conceptReference", "concept-003")]).unwrap();
    let request = Request::list(Kind::Variable)
        .with_query(query)
        .with_level(ResolutionLevel::Children);
    let body = body_json(&handle(&fixtures(), &request).body);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "var-002");
    assert_eq!(items[0]["concept"]["name"][0]["value"], "Sex");
}

#[test]
fn item_by_id_or_urn() {
    let store = fixtures();
    for key in ["concept-002", "urn:ddi:example.agency:concept-002:1.0.0"] {
        let response = handle(&store, &Request::item(Kind::Concept, key));
        assert_eq!(response.status, STATUS_OK, "{key}");
        assert_eq!(body_json(&response.body)["id"], "concept-002");
    }
}

#[test]
fn missing_item_is_not_found() {
    let response = handle(&fixtures(), &Request::item(Kind::CodeListScheme, "nope"));
    assert_eq!(response.status, STATUS_NOT_FOUND);
    assert!(!response.is_success());
    assert_eq!(
        body_json(&response.body),
        json!({"error": "Code list scheme not found"})
    );
}

#[test]
fn renders_xml_package() {
    let request = Request::item(Kind::Variable, "var-001")
        .with_level(ResolutionLevel::Children)
        .with_format(OutputFormat::negotiate(Some("application/xml")));
    let response = handle(&fixtures(), &request);
    assert_eq!(response.status, STATUS_OK);
    assert!(response.content_type.contains("vnd.ddi.structure+xml"));
    assert!(response.body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(response.body.contains("<g:ResourcePackage"));
    assert!(response.body.contains("<l:Variable isUniversallyUnique=\"true\">"));
    assert!(response.body.contains("<c:Concept isUniversallyUnique=\"true\">"));
    assert!(!response.body.contains("c:ConceptReference"));
}

#[test]
fn empty_list_still_renders_package() {
    let query = ResourceQuery::from_pairs([("agencyID", "nobody")]).unwrap();
    let request = Request::list(Kind::Concept)
        .with_query(query)
        .with_format(OutputFormat::Xml);
    let response = handle(&fixtures(), &request);
    assert!(response.body.contains("<g:ResourcePackage"));
    assert!(!response.body.contains("c:Concept"));
}

#[test]
fn invalid_xml_characters_fall_back_to_json() {
    let store = DataStore::new()
        .with_collection(
            Kind::Category,
            vec![
                Entity::from_value(json!({
                    "id": "bad", "typeOfObject": "Category",
                    "label": [{"value": "bell\u{7}", "lang": "en"}]
                }))
                .unwrap(),
            ],
        )
        .unwrap();
    let request = Request::item(Kind::Category, "bad").with_format(OutputFormat::Xml);
    let response = handle(&store, &request);
    assert_eq!(response.status, STATUS_OK);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(body_json(&response.body)["id"], "bad");
}

#[test]
fn display_names_cover_every_kind() {
    for kind in Kind::ALL {
        assert!(!display_name(kind).is_empty());
    }
}
