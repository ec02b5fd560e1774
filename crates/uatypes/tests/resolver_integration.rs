// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::missing_errors_doc)] // Test documentation
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::wildcard_imports)] // Test utility imports
#![allow(clippy::redundant_closure_for_method_calls)] // Test code clarity
#![allow(clippy::similar_names)] // Test variable naming
#![allow(clippy::needless_pass_by_value)] // Test functions

//! Resolution engine against an in-memory address space.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uatypes::codec::{BinaryDecoder, BinaryEncoder};
use uatypes::dictionary::DictionaryDefinition;
use uatypes::types::ids::{browse_names, data_types, reference_types};
use uatypes::types::{ExpandedNodeId, Identifier, NamespaceTable, NodeId, XmlQualifiedName};
use uatypes::*;

const POINT: NodeId = NodeId::numeric(2, 3001);
const POINT_BINARY: NodeId = NodeId::numeric(2, 3002);
const POINT_XML: NodeId = NodeId::numeric(2, 3003);
const LINKED: NodeId = NodeId::numeric(2, 3010);
const PARENT: NodeId = NodeId::numeric(2, 3020);
const CHILD: NodeId = NodeId::numeric(2, 3021);
const MODE: NodeId = NodeId::numeric(2, 3030);
const BROKEN: NodeId = NodeId::numeric(2, 3040);
const HOLDER: NodeId = NodeId::numeric(2, 3050);

fn point_definition() -> DataTypeDefinition {
    DataTypeDefinition::Structure(StructureDefinition::new(
        0,
        vec![
            StructureField::new("X", data_types::DOUBLE),
            StructureField::new("Y", data_types::DOUBLE),
        ],
    ))
}

fn mode_definition() -> DataTypeDefinition {
    DataTypeDefinition::Enum(EnumDefinition::new(vec![
        EnumField::new("Off", 0),
        EnumField::new("On", 1),
    ]))
}

fn add_encoding(source: &MemoryNodeSource, type_id: &NodeId, encoding: NodeId, name: &str) {
    source.add_node(Node::object(encoding.clone(), name));
    source.add_reference(type_id, reference_types::HAS_ENCODING, &encoding);
}

fn point_source() -> MemoryNodeSource {
    let source = MemoryNodeSource::new();
    source.add_node(Node::data_type_node(POINT, "Point").with_definition(point_definition()));
    add_encoding(&source, &POINT, POINT_BINARY, browse_names::DEFAULT_BINARY);
    add_encoding(&source, &POINT, POINT_XML, browse_names::DEFAULT_XML);
    source
}

fn local(id: &NodeId) -> ExpandedNodeId {
    ExpandedNodeId::from(id)
}

fn metadata_only() -> ResolverOptions {
    ResolverOptions {
        disable_legacy_dictionaries: true,
        ..ResolverOptions::default()
    }
}

// ============================================================================
// Single resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let source = Arc::new(point_source());
    let resolver = DataTypeResolver::new(source.clone());
    let ct = CancellationToken::new();

    let first = resolver.resolve(&local(&POINT), &ct).await.unwrap().expect("point");
    let second = resolver.resolve(&local(&POINT), &ct).await.unwrap().expect("point");
    assert_eq!(first, second);
    assert!(first.ptr_eq(&second));
    assert_eq!(source.stats().get_node, 1);

    let structure = first.as_structure().expect("structure");
    assert_eq!(structure.fields().len(), 2);
    assert_eq!(
        structure.encodings(),
        &EncodingTriple::new(POINT_BINARY, POINT_XML, NodeId::NULL)
    );
}

#[tokio::test]
async fn test_encoding_ids_alias_the_same_description() {
    let source = Arc::new(point_source());
    let resolver = DataTypeResolver::new(source);
    let ct = CancellationToken::new();

    let point = resolver.resolve(&local(&POINT), &ct).await.unwrap().expect("point");
    assert_eq!(resolver.len(), 3);
    for alias in [POINT_BINARY, POINT_XML] {
        let cached = resolver.cached(&alias).expect("alias");
        assert!(cached.ptr_eq(&point));
    }
}

#[tokio::test]
async fn test_self_reference_resolves_in_one_pass() {
    let source = Arc::new(MemoryNodeSource::new());
    source.add_node(Node::data_type_node(LINKED, "Linked").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![
                StructureField::new("Value", data_types::INT32),
                StructureField::new("Next", LINKED).with_value_rank(1),
            ],
        )),
    ));
    let resolver = DataTypeResolver::new(source.clone()).with_options(metadata_only());
    let ct = CancellationToken::new();

    let linked = resolver
        .structure_description(&local(&LINKED), &ct)
        .await
        .unwrap()
        .expect("linked");
    assert_eq!(linked.fields()[1].data_type(), &LINKED);
    let stats = source.stats();
    assert_eq!(stats.get_node, 1);
    assert_eq!(stats.get_references, 1);
}

#[tokio::test]
async fn test_mutual_references_terminate() {
    let a = NodeId::numeric(2, 3101);
    let b = NodeId::numeric(2, 3102);
    let source = Arc::new(MemoryNodeSource::new());
    source.add_node(Node::data_type_node(a.clone(), "A").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![StructureField::new("B", b.clone()).with_value_rank(1)],
        )),
    ));
    source.add_node(Node::data_type_node(b.clone(), "B").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![StructureField::new("A", a.clone()).with_value_rank(1)],
        )),
    ));
    let resolver = DataTypeResolver::new(source.clone()).with_options(metadata_only());
    let ct = CancellationToken::new();

    assert!(resolver.resolve(&local(&a), &ct).await.unwrap().is_some());
    assert!(resolver.cached(&b).is_some());
    assert_eq!(source.stats().get_node, 2);
}

#[tokio::test]
async fn test_nested_types_are_resolved_first() {
    let source = Arc::new(point_source());
    source.add_node(Node::data_type_node(MODE, "Mode").with_definition(mode_definition()));
    source.add_node(Node::data_type_node(PARENT, "Shape").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![
                StructureField::new("Origin", POINT),
                StructureField::new("Mode", MODE),
            ],
        )),
    ));
    let resolver = DataTypeResolver::new(source).with_options(metadata_only());
    let ct = CancellationToken::new();

    let shape = resolver
        .structure_description(&local(&PARENT), &ct)
        .await
        .unwrap()
        .expect("shape");
    assert!(resolver.cached(&POINT).is_some());
    assert!(resolver.cached(&MODE).is_some());

    let value = StructureValue::new(PARENT.clone())
        .with(
            "Origin",
            StructureValue::new(POINT.clone())
                .with("X", 1.5f64)
                .with("Y", -2.0f64),
        )
        .with("Mode", EnumValue::new("On", 1));
    let mut encoder = BinaryEncoder::new();
    shape.encode(&mut encoder, &value, &resolver).unwrap();
    let bytes = encoder.into_bytes();
    assert_eq!(bytes.len(), 8 + 8 + 4);

    let mut decoder = BinaryDecoder::new(&bytes);
    let decoded = shape.decode(&mut decoder, &resolver).unwrap();
    let origin = decoded.get("Origin").and_then(|v| v.as_structure()).expect("origin");
    assert_eq!(origin.get("X").and_then(|v| v.as_f64()), Some(1.5));
    assert_eq!(
        decoded.get("Mode").and_then(|v| v.as_enum()).map(|e| e.code),
        Some(1)
    );
}

#[tokio::test]
async fn test_get_definitions_lists_dependencies() {
    let source = Arc::new(point_source());
    source.add_node(Node::data_type_node(MODE, "Mode").with_definition(mode_definition()));
    source.add_node(Node::data_type_node(PARENT, "Shape").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![
                StructureField::new("Origin", POINT),
                StructureField::new("Corners", POINT).with_value_rank(1),
                StructureField::new("Mode", MODE),
            ],
        )),
    ));
    let resolver = DataTypeResolver::new(source).with_options(metadata_only());
    let ct = CancellationToken::new();

    let definitions = resolver.get_definitions(&local(&PARENT), &ct).await.unwrap();
    let ids: Vec<NodeId> = definitions.into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![PARENT, POINT, MODE]);
}

#[tokio::test]
async fn test_redirection_from_encoding_and_variable() {
    let source = Arc::new(point_source());
    let variable = NodeId::numeric(2, 3900);
    source.add_node(Node::variable(variable.clone(), "Position", POINT));
    let resolver = DataTypeResolver::new(source).with_options(metadata_only());
    let ct = CancellationToken::new();

    let by_encoding = resolver
        .resolve(&local(&POINT_BINARY), &ct)
        .await
        .unwrap()
        .expect("via encoding");
    assert_eq!(by_encoding.type_id(), &POINT);

    let fresh = resolver.clone();
    let by_variable = fresh
        .resolve(&local(&variable), &ct)
        .await
        .unwrap()
        .expect("via variable");
    assert_eq!(by_variable.type_id(), &POINT);
    assert!(fresh.cached(&variable).is_none());
}

#[tokio::test]
async fn test_namespace_uri_form_is_normalised() {
    let mut namespaces = NamespaceTable::default();
    let index = namespaces.append("urn:test");
    let type_id = NodeId::numeric(index, 42);
    let source = Arc::new(MemoryNodeSource::new());
    source.add_node(Node::data_type_node(type_id.clone(), "Mode").with_definition(mode_definition()));
    let resolver = DataTypeResolver::new(source)
        .with_namespaces(namespaces)
        .with_options(metadata_only());
    let ct = CancellationToken::new();

    let qualified = ExpandedNodeId::with_uri("urn:test", Identifier::Numeric(42));
    let mode = resolver
        .enum_description(&qualified, &ct)
        .await
        .unwrap()
        .expect("mode");
    assert_eq!(mode.type_id(), &type_id);
    assert_eq!(mode.xml_name(), &XmlQualifiedName::new("urn:test", "Mode"));
    assert!(resolver
        .structure_description(&qualified, &ct)
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_invalid_definition_is_not_cached() {
    let source = Arc::new(MemoryNodeSource::new());
    source.add_node(Node::data_type_node(BROKEN, "Broken").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![StructureField::new("Missing", NodeId::NULL)],
        )),
    ));
    let resolver = DataTypeResolver::new(source.clone()).with_options(metadata_only());
    let ct = CancellationToken::new();

    let outcome = resolver.resolve_with_origin(&local(&BROKEN), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::Rejected));
    assert!(resolver.is_empty());

    // remembered as unresolved: no second query
    assert!(resolver.resolve(&local(&BROKEN), &ct).await.unwrap().is_none());
    assert_eq!(source.stats().get_node, 1);
}

#[tokio::test]
async fn test_unknown_types_return_none() {
    let source = Arc::new(MemoryNodeSource::new());
    let resolver = DataTypeResolver::new(source.clone()).with_options(ResolverOptions {
        remember_unresolved: false,
        ..metadata_only()
    });
    let ct = CancellationToken::new();

    assert!(resolver.resolve(&local(&POINT), &ct).await.unwrap().is_none());
    assert!(resolver.resolve(&local(&POINT), &ct).await.unwrap().is_none());
    assert_eq!(source.stats().get_node, 2);

    // built-ins never reach the source
    assert!(resolver.resolve(&local(&data_types::INT32), &ct).await.unwrap().is_none());
    assert_eq!(source.stats().get_node, 2);
}

#[tokio::test]
async fn test_cancellation_leaves_cache_clean() {
    let source = Arc::new(point_source());
    let resolver = DataTypeResolver::new(source);
    let cancelled = CancellationToken::new();
    cancelled.cancel();

    let result = resolver.resolve(&local(&POINT), &cancelled).await;
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(matches!(
        resolver.preload_all(&cancelled).await,
        Err(Error::Cancelled)
    ));
    assert!(resolver.is_empty());

    let ct = CancellationToken::new();
    assert!(resolver.resolve(&local(&POINT), &ct).await.unwrap().is_some());
}

#[tokio::test]
async fn test_concurrent_resolutions_publish_once() {
    let source = Arc::new(point_source().with_latency(Duration::from_millis(5)));
    let resolver = DataTypeResolver::new(source).with_options(metadata_only());
    let ct = CancellationToken::new();

    let point = local(&POINT);
    let (a, b) = tokio::join!(
        resolver.resolve(&point, &ct),
        resolver.resolve(&point, &ct)
    );
    let a = a.unwrap().expect("a");
    let b = b.unwrap().expect("b");
    assert!(a.ptr_eq(&b));
    assert!(resolver.cached(&POINT_BINARY).expect("alias").ptr_eq(&a));
}

// ============================================================================
// Preloading
// ============================================================================

/// BaseDataType
/// ├── Structure
/// │   ├── Parent ── Child
/// │   └── Broken
/// └── Enumeration
///     └── Mode
fn hierarchy() -> MemoryNodeSource {
    let source = MemoryNodeSource::new();
    source.add_node(Node::data_type_node(data_types::BASE_DATA_TYPE, "BaseDataType"));
    source.add_node(Node::data_type_node(data_types::STRUCTURE, "Structure"));
    source.add_node(Node::data_type_node(data_types::ENUMERATION, "Enumeration"));
    source.add_node(Node::data_type_node(PARENT, "Parent").with_definition(point_definition()));
    source.add_node(
        Node::data_type_node(CHILD, "Child").with_definition(DataTypeDefinition::Structure(
            StructureDefinition::new(
                0,
                vec![
                    StructureField::new("X", data_types::DOUBLE),
                    StructureField::new("Y", data_types::DOUBLE),
                    StructureField::new("Z", data_types::DOUBLE),
                ],
            ),
        )),
    );
    source.add_node(Node::data_type_node(BROKEN, "Broken").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            7,
            vec![StructureField::new("X", data_types::DOUBLE)],
        )),
    ));
    source.add_node(Node::data_type_node(MODE, "Mode").with_definition(mode_definition()));

    let subtype = reference_types::HAS_SUBTYPE;
    source.add_reference(&data_types::BASE_DATA_TYPE, subtype.clone(), &data_types::STRUCTURE);
    source.add_reference(&data_types::BASE_DATA_TYPE, subtype.clone(), &data_types::ENUMERATION);
    source.add_reference(&data_types::STRUCTURE, subtype.clone(), &PARENT);
    source.add_reference(&data_types::STRUCTURE, subtype.clone(), &BROKEN);
    source.add_reference(&PARENT, subtype.clone(), &CHILD);
    source.add_reference(&data_types::ENUMERATION, subtype, &MODE);

    add_encoding(&source, &PARENT, NodeId::numeric(2, 4001), browse_names::DEFAULT_BINARY);
    add_encoding(&source, &CHILD, NodeId::numeric(2, 4002), browse_names::DEFAULT_BINARY);
    source
}

#[tokio::test]
async fn test_preload_all_batches_per_level() {
    let source = Arc::new(hierarchy());
    let resolver = DataTypeResolver::new(source.clone()).with_options(metadata_only());
    let ct = CancellationToken::new();

    let all_valid = resolver.preload_all(&ct).await.unwrap();
    assert!(!all_valid, "Broken has an unknown structure type");

    // four subtype levels including the empty one below the leaves
    assert_eq!(source.browse_count(&reference_types::HAS_SUBTYPE), 4);
    assert_eq!(source.browse_count(&reference_types::HAS_ENCODING), 1);
    // only user types are read
    assert_eq!(source.stats().get_node, 4);

    for id in [&PARENT, &CHILD, &MODE] {
        assert!(resolver.cached(id).is_some(), "{} should be cached", id);
    }
    assert!(resolver.cached(&BROKEN).is_none());
    assert!(resolver.cached(&NodeId::numeric(2, 4002)).is_some());
    assert!(resolver.cached(&data_types::STRUCTURE).is_none());
}

#[tokio::test]
async fn test_preload_all_is_true_for_valid_hierarchies() {
    let source = Arc::new(hierarchy());
    let options = ResolverOptions {
        subtype_root: Some("i=29".into()),
        ..metadata_only()
    };
    let resolver = DataTypeResolver::new(source.clone()).with_options(options);
    let ct = CancellationToken::new();

    assert!(resolver.preload_all(&ct).await.unwrap());
    assert!(resolver.cached(&MODE).is_some());

    source.reset_stats();
    assert!(resolver.preload_all(&ct).await.unwrap());
    assert_eq!(source.stats().get_node, 0, "cached types are skipped");
}

#[tokio::test]
async fn test_preload_all_reports_invalid_field_type_reached_first() {
    // Holder is visited before its sibling Broken and resolves it as a field.
    let source = Arc::new(MemoryNodeSource::new());
    source.add_node(Node::data_type_node(data_types::STRUCTURE, "Structure"));
    source.add_node(Node::data_type_node(HOLDER, "Holder").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![StructureField::new("B", BROKEN)],
        )),
    ));
    source.add_node(Node::data_type_node(BROKEN, "Broken").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            7,
            vec![StructureField::new("X", data_types::DOUBLE)],
        )),
    ));
    source.add_reference(&data_types::STRUCTURE, reference_types::HAS_SUBTYPE, &HOLDER);
    source.add_reference(&data_types::STRUCTURE, reference_types::HAS_SUBTYPE, &BROKEN);

    let options = ResolverOptions {
        subtype_root: Some("i=22".into()),
        ..metadata_only()
    };
    assert!(options.remember_unresolved);
    let resolver = DataTypeResolver::new(source.clone()).with_options(options);
    let ct = CancellationToken::new();

    assert!(!resolver.preload_all(&ct).await.unwrap());
    assert!(resolver.cached(&BROKEN).is_none());
    assert_eq!(source.stats().get_node, 2, "Broken is read once");
}

#[tokio::test]
async fn test_preload_clears_unresolved_marker() {
    let source = Arc::new(MemoryNodeSource::new());
    let resolver = DataTypeResolver::new(source.clone()).with_options(metadata_only());
    let ct = CancellationToken::new();

    assert!(resolver.resolve(&local(&MODE), &ct).await.unwrap().is_none());
    source.add_node(Node::data_type_node(MODE, "Mode").with_definition(mode_definition()));
    assert!(resolver.resolve(&local(&MODE), &ct).await.unwrap().is_none());

    resolver.preload(&local(&MODE), false, &ct).await.unwrap();
    assert!(resolver.cached(&MODE).is_some());
}

#[tokio::test]
async fn test_preload_with_subtypes() {
    let source = Arc::new(hierarchy());
    let resolver = DataTypeResolver::new(source).with_options(metadata_only());
    let ct = CancellationToken::new();

    resolver.preload(&local(&PARENT), true, &ct).await.unwrap();
    assert!(resolver.cached(&PARENT).is_some());
    assert!(resolver.cached(&CHILD).is_some());
    assert!(resolver.cached(&MODE).is_none());
}

// ============================================================================
// Legacy dictionaries
// ============================================================================

#[derive(Default)]
struct FixedDictionaries {
    binary: HashMap<NodeId, DictionaryDefinition>,
    xml: HashMap<NodeId, DictionaryDefinition>,
}

#[async_trait]
impl DictionarySource for FixedDictionaries {
    async fn get_definition(
        &self,
        kind: DictionaryKind,
        type_id: &NodeId,
        _ct: &CancellationToken,
    ) -> Result<Option<DictionaryDefinition>> {
        let table = match kind {
            DictionaryKind::Binary => &self.binary,
            DictionaryKind::Xml => &self.xml,
        };
        Ok(table.get(type_id).cloned())
    }
}

fn dictionary_entry(encoding_id: NodeId, fields: &[&str]) -> DictionaryDefinition {
    DictionaryDefinition {
        xml_name: XmlQualifiedName::new("urn:test", "Point"),
        type_id: POINT,
        encoding_id,
        definition: DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            fields
                .iter()
                .map(|name| StructureField::new(*name, data_types::DOUBLE))
                .collect(),
        )),
    }
}

fn legacy_point_source() -> Arc<MemoryNodeSource> {
    let source = MemoryNodeSource::new();
    source.add_node(Node::data_type_node(POINT, "Point"));
    add_encoding(&source, &POINT, POINT_BINARY, browse_names::DEFAULT_BINARY);
    add_encoding(&source, &POINT, POINT_XML, browse_names::DEFAULT_XML);
    Arc::new(source)
}

fn field_count(description: Option<DataTypeDescription>) -> usize {
    description
        .and_then(|d| d.as_structure().map(|s| s.fields().len()))
        .unwrap_or(0)
}

#[tokio::test]
async fn test_binary_dictionary_wins_for_the_type_id() {
    let mut dictionaries = FixedDictionaries::default();
    dictionaries
        .binary
        .insert(POINT, dictionary_entry(POINT_BINARY, &["X"]));
    dictionaries
        .xml
        .insert(POINT, dictionary_entry(POINT_XML, &["X", "Y"]));
    let resolver =
        DataTypeResolver::new(legacy_point_source()).with_dictionaries(Arc::new(dictionaries));
    let ct = CancellationToken::new();

    let outcome = resolver.resolve_with_origin(&local(&POINT), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::BinaryDictionary(_)));
    assert_eq!(field_count(resolver.cached(&POINT)), 1);
    assert_eq!(field_count(resolver.cached(&POINT_BINARY)), 1);
    assert_eq!(field_count(resolver.cached(&POINT_XML)), 2);
}

#[tokio::test]
async fn test_single_dictionary_aliases_both_encodings() {
    let mut dictionaries = FixedDictionaries::default();
    dictionaries
        .xml
        .insert(POINT, dictionary_entry(POINT_XML, &["X", "Y"]));
    let resolver =
        DataTypeResolver::new(legacy_point_source()).with_dictionaries(Arc::new(dictionaries));
    let ct = CancellationToken::new();

    let outcome = resolver.resolve_with_origin(&local(&POINT), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::XmlDictionary(_)));
    let point = resolver.cached(&POINT).expect("point");
    assert!(resolver.cached(&POINT_BINARY).expect("binary").ptr_eq(&point));
    assert!(resolver.cached(&POINT_XML).expect("xml").ptr_eq(&point));
}

#[tokio::test]
async fn test_disabled_dictionaries_are_not_consulted() {
    let mut dictionaries = FixedDictionaries::default();
    dictionaries
        .binary
        .insert(POINT, dictionary_entry(POINT_BINARY, &["X"]));
    let resolver = DataTypeResolver::new(legacy_point_source())
        .with_dictionaries(Arc::new(dictionaries))
        .with_options(metadata_only());
    let ct = CancellationToken::new();

    let outcome = resolver.resolve_with_origin(&local(&POINT), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::Unresolved));
}

#[tokio::test]
async fn test_invalid_metadata_falls_back_to_dictionaries() {
    let source = MemoryNodeSource::new();
    source.add_node(Node::data_type_node(POINT, "Point").with_definition(
        DataTypeDefinition::Structure(StructureDefinition::new(
            0,
            vec![StructureField::new("", data_types::DOUBLE)],
        )),
    ));
    add_encoding(&source, &POINT, POINT_BINARY, browse_names::DEFAULT_BINARY);
    let mut dictionaries = FixedDictionaries::default();
    dictionaries
        .binary
        .insert(POINT, dictionary_entry(POINT_BINARY, &["X", "Y"]));
    let resolver =
        DataTypeResolver::new(Arc::new(source)).with_dictionaries(Arc::new(dictionaries));
    let ct = CancellationToken::new();

    let outcome = resolver.resolve_with_origin(&local(&POINT), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::BinaryDictionary(_)));
    assert_eq!(field_count(outcome.into_description()), 2);
}

#[tokio::test]
async fn test_dictionary_loaded_from_the_address_space() {
    const DICTIONARY: NodeId = NodeId::numeric(2, 5000);
    const NAMESPACE: NodeId = NodeId::numeric(2, 5001);
    const DESCRIPTION: NodeId = NodeId::numeric(2, 5002);
    const DOCUMENT: &str = r#"<opc:TypeDictionary
        xmlns:opc="http://opcfoundation.org/BinarySchema/"
        xmlns:tns="urn:test"
        TargetNamespace="urn:test">
      <opc:StructuredType Name="Point">
        <opc:Field Name="X" TypeName="opc:Double"/>
        <opc:Field Name="Y" TypeName="opc:Double"/>
      </opc:StructuredType>
    </opc:TypeDictionary>"#;

    let source = legacy_point_source();
    let type_system = uatypes::types::ids::objects::OPC_BINARY_SCHEMA_TYPE_SYSTEM;
    source.add_node(Node::object(type_system.clone(), "OPC Binary"));
    source.add_node(Node::variable(DICTIONARY, "Test", data_types::BYTE_STRING));
    source.add_node(Node::variable(
        NAMESPACE,
        browse_names::NAMESPACE_URI,
        data_types::STRING,
    ));
    source.add_node(Node::variable(DESCRIPTION, "Point", data_types::STRING));
    source.add_reference(&type_system, reference_types::HAS_COMPONENT, &DICTIONARY);
    source.add_reference(&DICTIONARY, reference_types::HAS_PROPERTY, &NAMESPACE);
    source.add_reference(&DICTIONARY, reference_types::HAS_COMPONENT, &DESCRIPTION);
    source.add_reference(&POINT_BINARY, reference_types::HAS_DESCRIPTION, &DESCRIPTION);
    source.set_value(
        &DICTIONARY,
        uatypes::types::DataValue::new(Value::ByteString(DOCUMENT.as_bytes().to_vec())),
    );
    source.set_value(&NAMESPACE, uatypes::types::DataValue::new(Value::from("urn:test")));
    source.set_value(&DESCRIPTION, uatypes::types::DataValue::new(Value::from("Point")));

    let resolver = DataTypeResolver::new(source);
    let ct = CancellationToken::new();
    let outcome = resolver.resolve_with_origin(&local(&POINT), &ct).await.unwrap();
    assert!(matches!(outcome, Resolution::BinaryDictionary(_)));
    let point = outcome.into_description().expect("point");
    assert_eq!(point.xml_name(), &XmlQualifiedName::new("urn:test", "Point"));
    assert_eq!(
        point.encodings(),
        &EncodingTriple::new(POINT_BINARY, POINT_XML, NodeId::NULL)
    );
    assert_eq!(field_count(Some(point)), 2);
}
