use apidesk_core::parse;
use apidesk_core::parse::operation::HttpMethod;
use apidesk_core::view::{
    DetailPane, REQUEST_CONTAINER, RESPONSE_CONTAINER, SchemaResolver, build_detail, resolve_model,
};

const PETSTORE: &str = include_str!("fixtures/petstore-2.0.json");

fn model_names(pane: &DetailPane, dom_id: &str) -> Vec<String> {
    pane.models(dom_id).iter().map(|m| m.name.clone()).collect()
}

fn empty_pane() -> DetailPane {
    DetailPane::new("test", HttpMethod::Get, "/")
}

#[test]
fn resolve_renders_nested_models_depth_first() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let mut pane = empty_pane();
    resolve_model(RESPONSE_CONTAINER, &doc, Some("Pet"), &mut pane);

    // owner -> Person -> Address, then tags -> Tag
    assert_eq!(
        model_names(&pane, RESPONSE_CONTAINER),
        vec!["Pet", "Person", "Address", "Tag"]
    );
}

#[test]
fn resolve_rewrites_display_types() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let mut pane = empty_pane();
    resolve_model(RESPONSE_CONTAINER, &doc, Some("Pet"), &mut pane);

    let pet = &pane.models(RESPONSE_CONTAINER)[0];
    let types: Vec<(&str, &str)> = pet
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.display_type.as_str()))
        .collect();
    assert_eq!(
        types,
        vec![
            ("id", "integer"),
            ("name", "string"),
            ("owner", "Person"),
            ("tags", "Array[Tag]"),
            ("photoUrls", "Array[string]"),
        ]
    );
    assert!(pet.properties[0].required);
    assert!(!pet.properties[2].required);
    assert_eq!(pet.element_id(), "ref-path-body-response-model-Pet");
}

#[test]
fn resolve_twice_renders_once() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let mut pane = empty_pane();
    resolve_model(RESPONSE_CONTAINER, &doc, Some("Pet"), &mut pane);
    resolve_model(RESPONSE_CONTAINER, &doc, Some("Pet"), &mut pane);
    assert_eq!(pane.models(RESPONSE_CONTAINER).len(), 4);
}

#[test]
fn resolve_same_model_in_two_containers() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let mut pane = empty_pane();
    let mut resolver = SchemaResolver::new(&doc);
    resolver.resolve(REQUEST_CONTAINER, Some("Person"), &mut pane);
    resolver.resolve(RESPONSE_CONTAINER, Some("Person"), &mut pane);
    assert_eq!(
        model_names(&pane, REQUEST_CONTAINER),
        vec!["Person", "Address"]
    );
    assert_eq!(
        model_names(&pane, RESPONSE_CONTAINER),
        vec!["Person", "Address"]
    );
}

#[test]
fn resolve_terminates_on_cycles() {
    let json = r##"{
        "swagger": "2.0",
        "info": {"title": "cycles", "version": "1"},
        "definitions": {
            "Node": {
                "properties": {
                    "parent": {"$ref": "#/definitions/Node"},
                    "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                }
            },
            "A": {"properties": {"b": {"$ref": "#/definitions/B"}}},
            "B": {"properties": {"a": {"$ref": "#/definitions/A"}}}
        }
    }"##;
    let doc = parse::from_json(json).unwrap();
    let mut pane = empty_pane();
    resolve_model("c", &doc, Some("Node"), &mut pane);
    resolve_model("c", &doc, Some("A"), &mut pane);
    assert_eq!(model_names(&pane, "c"), vec!["Node", "A", "B"]);

    let node = &pane.models("c")[0];
    assert_eq!(node.properties[1].display_type, "Array[Node]");
}

#[test]
fn resolve_skips_missing_nested_reference() {
    let json = r##"{
        "swagger": "2.0",
        "info": {"title": "dangling", "version": "1"},
        "definitions": {
            "Order": {"properties": {"item": {"$ref": "#/definitions/Missing"}}}
        }
    }"##;
    let doc = parse::from_json(json).unwrap();
    let mut pane = empty_pane();
    resolve_model("c", &doc, Some("Order"), &mut pane);
    assert_eq!(model_names(&pane, "c"), vec!["Order"]);
    assert_eq!(pane.models("c")[0].properties[0].display_type, "Missing");
}

#[test]
fn detail_for_ref_response() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let op = doc.find_operation("getPet").unwrap();
    let pane = build_detail(&doc, &op);

    assert_eq!(pane.operation_id, "getPet");
    assert_eq!(pane.parameters.len(), 2);
    assert_eq!(
        model_names(&pane, RESPONSE_CONTAINER),
        vec!["Pet", "Person", "Address", "Tag"]
    );
    assert!(pane.models(REQUEST_CONTAINER).is_empty());
}

#[test]
fn detail_for_array_response() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let op = doc.find_operation("listPets").unwrap();
    let pane = build_detail(&doc, &op);
    let container = pane.container(RESPONSE_CONTAINER).unwrap();
    assert_eq!(container.type_view.as_deref(), Some("Array[Pet]"));
    assert_eq!(container.models[0].name, "Pet");
}

#[test]
fn detail_for_primitive_response() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let op = doc.find_operation("uploadPhoto").unwrap();
    let pane = build_detail(&doc, &op);
    let container = pane.container(RESPONSE_CONTAINER).unwrap();
    assert_eq!(container.type_view.as_deref(), Some("string"));
    assert!(container.models.is_empty());
    assert_eq!(pane.consumes, "multipart/form-data");
}

#[test]
fn detail_without_response_schema() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let op = doc.find_operation("deletePet").unwrap();
    let pane = build_detail(&doc, &op);
    assert!(pane.container(RESPONSE_CONTAINER).is_none());
}

#[test]
fn detail_resolves_body_model_into_request_container() {
    let doc = parse::from_json(PETSTORE).unwrap();
    let op = doc.find_operation("addOwner").unwrap();
    let pane = build_detail(&doc, &op);
    assert_eq!(
        model_names(&pane, REQUEST_CONTAINER),
        vec!["Person", "Address"]
    );
    assert_eq!(
        model_names(&pane, RESPONSE_CONTAINER),
        vec!["Person", "Address"]
    );
    assert_eq!(pane.parameters[0].display_type, "Person");
}
