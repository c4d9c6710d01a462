//! Integration tests for the Translator API
//!
//! These tests drive the public surface end to end: TOML document in, SCs
//! text out.

use sctext::{
    ScsError, Translator,
    config::{AppConfig, TypeConfig, WriterConfig},
    element::Element,
    graph::GraphBuilder,
    types::TypeTable,
};

const FRUIT_BASKET: &str = r#"
    [[element]]
    id = "apple"
    identifier = "apple"
    type = "node/const/perm/general"
    kind = "node"

    [[element]]
    id = "fruit"
    identifier = "fruit"
    type = "node/const/perm/group"
    kind = "node"

    [[element]]
    id = "basket"
    identifier = "basket"
    type = "contour"
    kind = "contour"

    [[element]]
    id = "e1"
    type = "arc/const/pos/perm"
    kind = "arc"
    source = "fruit"
    target = "apple"
    parent = "basket"

    [[element]]
    id = "pear"
    identifier = "груша"
    type = "node/const/perm/general"
    kind = "node"
    parent = "basket"
"#;

#[test]
fn test_translator_api_exists() {
    let _translator = Translator::default();
}

#[test]
fn test_translate_document() {
    let translator = Translator::default();
    let graph = translator
        .parse(FRUIT_BASKET)
        .expect("Failed to parse graph");
    let scs = translator.translate(&graph).expect("Failed to translate");

    let expected = "\
apple
\t<- sc_node;;
fruit
\t<- sc_node_class;;
el_pear
\t<- sc_node;;
basket = [*
\tfruit -> apple;;
*];;

el_pear
\t=> nrel_main_idtf: [груша];;
";
    assert_eq!(scs, expected);
}

#[test]
fn test_main_identifiers_can_be_disabled() {
    let config = AppConfig::new(WriterConfig::new(false, false, true), TypeConfig::default());
    let translator = Translator::new(config);
    let graph = translator.parse(FRUIT_BASKET).unwrap();
    let scs = translator.translate(&graph).unwrap();

    assert!(!scs.contains("nrel_main_idtf"));
    assert!(scs.ends_with("*];;\n"));
}

#[test]
fn test_custom_type_table() {
    let types = TypeTable::empty()
        .with_node_token("node/const/perm/general", "sc_node_material")
        .with_connector_symbol("arc/const/pos/perm", "-->");
    let translator = Translator::default().with_types(types);
    let graph = translator.parse(FRUIT_BASKET).unwrap();
    let scs = translator.translate(&graph).unwrap();

    assert!(scs.starts_with("apple\n\t<- sc_node_material;;\nfruit\n\t<- node_;;\n"));
    assert!(scs.contains("\tfruit --> apple;;\n"));
}

#[test]
fn test_configured_type_overrides() {
    let config: AppConfig = toml::from_str(
        r#"
        [types.connectors]
        "arc/const/pos/perm" = "->>"
        "#,
    )
    .unwrap();
    let translator = Translator::new(config);
    let graph = translator.parse(FRUIT_BASKET).unwrap();

    assert!(translator.translate(&graph).unwrap().contains("fruit ->> apple;;"));
}

#[test]
fn test_translate_built_graph() {
    let mut builder = GraphBuilder::new();
    builder
        .add(Element::node("7", "концепт", "node/const/perm/general"))
        .unwrap();
    let graph = builder.build().unwrap();

    let scs = Translator::default().translate(&graph).unwrap();

    assert_eq!(
        scs,
        "el_7\n\t<- sc_node;;\n\nel_7\n\t=> nrel_main_idtf: [концепт];;\n"
    );
}

#[test]
fn test_empty_graph_translates_to_nothing() {
    let translator = Translator::default();
    let graph = translator.parse("").unwrap();

    assert_eq!(translator.translate(&graph).unwrap(), "");
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let translator = Translator::default();

    let result = translator.parse("this is not a graph document");
    assert!(matches!(result, Err(ScsError::Document { .. })));

    let result = translator.parse("[[element]]\nid = \"a\"\nkind = \"arc\"\n");
    assert!(matches!(result, Err(ScsError::Input(_))));
}

#[test]
fn test_translator_reusability() {
    let translator = Translator::default();
    let graph = translator.parse(FRUIT_BASKET).unwrap();

    let first = translator.translate(&graph).unwrap();
    let second = translator.translate(&graph).unwrap();

    assert_eq!(first, second);
}
