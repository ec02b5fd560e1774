// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Legacy dictionaries loaded from a server's type system nodes.
//!
//! ```text
//!   OPCBinarySchema_TypeSystem (i=93)      XmlSchema_TypeSystem (i=92)
//!          │ HasComponent                         │ HasComponent
//!          ▼                                      ▼
//!     dictionary variable ── value: schema document (byte string)
//!          │ HasProperty  ──► NamespaceUri
//!          │ HasComponent ──► description variable ── value: type name
//!                                  ▲ HasDescription
//!                             encoding node ("Default Binary")
//!                                  ▲ HasEncoding
//!                              data type node
//! ```
//!
//! Each type system is loaded once, lazily, on the first lookup of its kind.
//! Every level of the walk is one batched call over all dictionaries, so the
//! load costs a fixed number of round trips. A dictionary that cannot be
//! read or parsed is logged and skipped; the remaining ones stay usable.

use crate::builtin::BuiltInType;
use crate::codec::{BinaryDecoder, Decoder};
use crate::definition::{DataTypeDefinition, EnumDefinition, EnumField};
use crate::dictionary::{
    DictionaryDefinition, DictionaryKind, SchemaDocument, TypeDictionary, TypeEntry,
};
use crate::error::{Error, Result};
use crate::node_source::{CancellationToken, NodeSource, Reference};
use crate::types::ids::{browse_names, reference_types};
use crate::types::{
    DataValue, ExtensionObject, ExtensionObjectBody, LocalizedText, NodeId, XmlQualifiedName,
};
use crate::value::Value;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Source of legacy dictionary definitions, keyed by data type or encoding id.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Definition of `type_id` from the dictionaries of `kind`. `Ok(None)`
    /// when no dictionary of that kind describes the type.
    async fn get_definition(
        &self,
        kind: DictionaryKind,
        type_id: &NodeId,
        ct: &CancellationToken,
    ) -> Result<Option<DictionaryDefinition>>;
}

/// Definitions of one loaded type system.
#[derive(Debug, Default)]
struct LoadedTypeSystem {
    /// Indexed by data type id and by encoding id.
    definitions: HashMap<NodeId, DictionaryDefinition>,
}

/// Lazily loaded binary and XML dictionaries of one server.
pub struct DataTypeSystemCache {
    source: Arc<dyn NodeSource>,
    binary: OnceCell<LoadedTypeSystem>,
    xml: OnceCell<LoadedTypeSystem>,
}

impl DataTypeSystemCache {
    pub fn new(source: Arc<dyn NodeSource>) -> Self {
        Self {
            source,
            binary: OnceCell::new(),
            xml: OnceCell::new(),
        }
    }

    fn cell(&self, kind: DictionaryKind) -> &OnceCell<LoadedTypeSystem> {
        match kind {
            DictionaryKind::Binary => &self.binary,
            DictionaryKind::Xml => &self.xml,
        }
    }

    /// Number of definitions loaded for `kind`, counting aliases; `None`
    /// until the type system has been loaded.
    pub fn loaded_count(&self, kind: DictionaryKind) -> Option<usize> {
        self.cell(kind).get().map(|loaded| loaded.definitions.len())
    }

    /// Load the type system of `kind` if needed. A failed or cancelled load
    /// leaves the cell empty, so the next lookup retries.
    async fn loaded(
        &self,
        kind: DictionaryKind,
        ct: &CancellationToken,
    ) -> Result<&LoadedTypeSystem> {
        self.cell(kind)
            .get_or_try_init(|| load_type_system(self.source.as_ref(), kind, ct))
            .await
    }

    /// Build an enum definition from the type's `EnumValues` or
    /// `EnumStrings` property.
    async fn enum_from_properties(
        &self,
        type_id: &NodeId,
        ct: &CancellationToken,
    ) -> Result<Option<DictionaryDefinition>> {
        let properties = self
            .source
            .get_references(
                std::slice::from_ref(type_id),
                &[reference_types::HAS_PROPERTY],
                true,
                false,
                ct,
            )
            .await?;
        let find = |name: &str| {
            properties
                .iter()
                .find(|r| r.target.browse_name.name == name)
                .map(|r| r.target.node_id.clone())
        };
        let (property, from_strings) = match (
            find(browse_names::ENUM_VALUES),
            find(browse_names::ENUM_STRINGS),
        ) {
            (Some(id), _) => (id, false),
            (None, Some(id)) => (id, true),
            (None, None) => return Ok(None),
        };

        let value = self.source.get_value(&property, ct).await?;
        let Some(items) = good_value(&property, value).and_then(|v| match v {
            Value::Array(items) => Some(items),
            _ => None,
        }) else {
            return Ok(None);
        };
        let fields = if from_strings {
            enum_fields_from_strings(&items)
        } else {
            enum_fields_from_values(&items)?
        };

        let Some(node) = self.source.get_node(type_id, ct).await? else {
            return Ok(None);
        };
        log::debug!(
            "[TypeSystem] {} built from its {} property",
            type_id,
            if from_strings { "EnumStrings" } else { "EnumValues" }
        );
        Ok(Some(DictionaryDefinition {
            xml_name: XmlQualifiedName::new(String::new(), node.browse_name.name),
            type_id: type_id.clone(),
            encoding_id: NodeId::NULL,
            definition: DataTypeDefinition::Enum(EnumDefinition::new(fields)),
        }))
    }
}

#[async_trait]
impl DictionarySource for DataTypeSystemCache {
    async fn get_definition(
        &self,
        kind: DictionaryKind,
        type_id: &NodeId,
        ct: &CancellationToken,
    ) -> Result<Option<DictionaryDefinition>> {
        let loaded = self.loaded(kind, ct).await?;
        if let Some(definition) = loaded.definitions.get(type_id) {
            return Ok(Some(definition.clone()));
        }
        // Both kinds would build the same enum; only ask once.
        if kind == DictionaryKind::Binary {
            return self.enum_from_properties(type_id, ct).await;
        }
        Ok(None)
    }
}

impl std::fmt::Debug for DataTypeSystemCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTypeSystemCache")
            .field("binary", &self.loaded_count(DictionaryKind::Binary))
            .field("xml", &self.loaded_count(DictionaryKind::Xml))
            .finish()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// One dictionary variable and what was read for it.
struct DictionaryNode {
    node_id: NodeId,
    schema: SchemaDocument,
    namespace_uri: String,
}

async fn load_type_system(
    source: &dyn NodeSource,
    kind: DictionaryKind,
    ct: &CancellationToken,
) -> Result<LoadedTypeSystem> {
    let type_system = kind.type_system_id();
    let dictionary_ids: Vec<NodeId> = source
        .get_references(
            std::slice::from_ref(&type_system),
            &[reference_types::HAS_COMPONENT],
            true,
            true,
            ct,
        )
        .await?
        .into_iter()
        .map(|r| r.target.node_id)
        .collect();
    if dictionary_ids.is_empty() {
        log::debug!("[TypeSystem] no {} dictionaries under {}", kind, type_system);
        return Ok(LoadedTypeSystem::default());
    }

    let dictionaries = read_dictionaries(source, kind, &dictionary_ids, ct).await?;
    if dictionaries.is_empty() {
        return Ok(LoadedTypeSystem::default());
    }
    let loaded_ids: Vec<NodeId> = dictionaries.iter().map(|d| d.node_id.clone()).collect();
    let types = read_type_entries(source, &dictionaries, &loaded_ids, ct).await?;

    let mut loaded = LoadedTypeSystem::default();
    for dictionary in &dictionaries {
        let parsed = dictionary.schema.convert(&types);
        for (name, error) in &parsed.errors {
            log::warn!("[TypeSystem] {} in {}: {}", name, dictionary.node_id, error);
        }
        log::debug!(
            "[TypeSystem] {} dictionary {} ({}): {} types",
            kind,
            dictionary.node_id,
            dictionary.namespace_uri,
            parsed.definitions.len()
        );
        for definition in parsed.definitions {
            if !definition.encoding_id.is_null() {
                loaded
                    .definitions
                    .insert(definition.encoding_id.clone(), definition.clone());
            }
            loaded
                .definitions
                .insert(definition.type_id.clone(), definition);
        }
    }
    Ok(loaded)
}

/// Read and parse the dictionary documents and their namespace URIs.
async fn read_dictionaries(
    source: &dyn NodeSource,
    kind: DictionaryKind,
    dictionary_ids: &[NodeId],
    ct: &CancellationToken,
) -> Result<Vec<DictionaryNode>> {
    let values = source.get_values(dictionary_ids, ct).await?;

    let properties = source
        .get_references(
            dictionary_ids,
            &[reference_types::HAS_PROPERTY],
            true,
            false,
            ct,
        )
        .await?;
    let uri_properties: Vec<&Reference> = properties
        .iter()
        .filter(|r| r.target.browse_name.name == browse_names::NAMESPACE_URI)
        .collect();
    let uri_ids: Vec<NodeId> = uri_properties
        .iter()
        .map(|r| r.target.node_id.clone())
        .collect();
    let uri_values = if uri_ids.is_empty() {
        Vec::new()
    } else {
        source.get_values(&uri_ids, ct).await?
    };
    let uris: HashMap<&NodeId, String> = uri_properties
        .iter()
        .zip(uri_values)
        .filter_map(|(r, value)| {
            let value = good_value(&r.target.node_id, value)?;
            value.as_str().map(|uri| (&r.source, uri.to_string()))
        })
        .collect();

    let mut dictionaries = Vec::with_capacity(dictionary_ids.len());
    for (node_id, value) in dictionary_ids.iter().zip(values) {
        let Some(document) = good_value(node_id, value).and_then(document_text) else {
            log::warn!("[TypeSystem] dictionary {} has no readable document", node_id);
            continue;
        };
        let schema = match SchemaDocument::parse(kind, &document) {
            Ok(schema) => schema,
            Err(e) => {
                log::warn!("[TypeSystem] skipping dictionary {}: {}", node_id, e);
                continue;
            }
        };
        let namespace_uri = match uris.get(node_id) {
            Some(uri) => uri.clone(),
            None => schema.target_namespace().to_string(),
        };
        dictionaries.push(DictionaryNode {
            node_id: node_id.clone(),
            schema,
            namespace_uri,
        });
    }
    Ok(dictionaries)
}

/// Map every described type name to its data type and encoding ids.
async fn read_type_entries(
    source: &dyn NodeSource,
    dictionaries: &[DictionaryNode],
    dictionary_ids: &[NodeId],
    ct: &CancellationToken,
) -> Result<TypeDictionary> {
    let descriptions = source
        .get_references(
            dictionary_ids,
            &[reference_types::HAS_COMPONENT],
            true,
            false,
            ct,
        )
        .await?;
    let mut types = TypeDictionary::new();
    if descriptions.is_empty() {
        return Ok(types);
    }

    let description_ids: Vec<NodeId> = descriptions
        .iter()
        .map(|r| r.target.node_id.clone())
        .collect();
    let values = source.get_values(&description_ids, ct).await?;

    let encodings = source
        .get_references(
            &description_ids,
            &[reference_types::HAS_DESCRIPTION],
            false,
            false,
            ct,
        )
        .await?;
    let encoding_of: HashMap<&NodeId, &NodeId> = encodings
        .iter()
        .map(|r| (&r.source, &r.target.node_id))
        .collect();

    let encoding_ids: Vec<NodeId> = encodings.iter().map(|r| r.target.node_id.clone()).collect();
    let data_types = if encoding_ids.is_empty() {
        Vec::new()
    } else {
        source
            .get_references(
                &encoding_ids,
                &[reference_types::HAS_ENCODING],
                false,
                false,
                ct,
            )
            .await?
    };
    let type_of: HashMap<&NodeId, &NodeId> = data_types
        .iter()
        .map(|r| (&r.source, &r.target.node_id))
        .collect();

    let namespace_of: HashMap<&NodeId, &str> = dictionaries
        .iter()
        .map(|d| (&d.node_id, d.namespace_uri.as_str()))
        .collect();

    for (reference, value) in descriptions.iter().zip(values) {
        let description_id = &reference.target.node_id;
        let Some(namespace) = namespace_of.get(&reference.source) else {
            continue;
        };
        let name = good_value(description_id, value)
            .and_then(|v| v.as_str().map(description_type_name))
            .unwrap_or_else(|| reference.target.browse_name.name.clone());
        let Some(encoding_id) = encoding_of.get(description_id) else {
            log::debug!("[TypeSystem] description {} has no encoding", description_id);
            continue;
        };
        let Some(type_id) = type_of.get(encoding_id) else {
            log::debug!("[TypeSystem] encoding {} has no data type", encoding_id);
            continue;
        };
        types.insert(
            XmlQualifiedName::new(*namespace, name),
            TypeEntry {
                type_id: (*type_id).clone(),
                encoding_id: (*encoding_id).clone(),
            },
        );
    }
    Ok(types)
}

/// The value of a good read, logging bad ones.
fn good_value(node_id: &NodeId, value: DataValue) -> Option<Value> {
    let status = value.status();
    if status.is_bad() {
        log::debug!("[TypeSystem] read of {} failed: {}", node_id, status);
        return None;
    }
    value.value
}

/// Dictionary documents are byte strings, sometimes zero padded.
fn document_text(value: Value) -> Option<String> {
    match value {
        Value::ByteString(bytes) => {
            let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
            match String::from_utf8(bytes[..end].to_vec()) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("[TypeSystem] dictionary document is not UTF-8: {}", e);
                    None
                }
            }
        }
        Value::String(text) | Value::XmlElement(text) => Some(text),
        _ => None,
    }
}

/// Type name held by a description variable. XML dictionaries store an
/// XPath such as `//xs:element[@name='Point']`.
fn description_type_name(value: &str) -> String {
    let value = value.trim();
    if let Some(start) = value.find("@name='") {
        let rest = &value[start + "@name='".len()..];
        if let Some(end) = rest.find('\'') {
            return rest[..end].to_string();
        }
    }
    value.to_string()
}

fn enum_fields_from_strings(items: &[Value]) -> Vec<EnumField> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::LocalizedText(text) => Some(EnumField {
                display_name: Some(text.clone()),
                ..EnumField::new(text.text(), index as i64)
            }),
            Value::String(text) => Some(EnumField::new(text.as_str(), index as i64)),
            _ => None,
        })
        .collect()
}

/// `EnumValueType` entries, either already decoded or as binary bodies.
fn enum_fields_from_values(items: &[Value]) -> Result<Vec<EnumField>> {
    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        let (value, display_name, description) = match item {
            Value::Structure(structure) => (
                structure.get("Value").and_then(Value::as_i64),
                localized(structure.get("DisplayName")),
                localized(structure.get("Description")),
            ),
            Value::ExtensionObject(object) => decode_enum_value_type(object)?,
            _ => continue,
        };
        let Some(value) = value else {
            continue;
        };
        let name = display_name
            .as_ref()
            .map(|t| t.text().to_string())
            .unwrap_or_else(|| value.to_string());
        fields.push(EnumField {
            name,
            value,
            display_name,
            description,
        });
    }
    Ok(fields)
}

fn localized(value: Option<&Value>) -> Option<LocalizedText> {
    match value {
        Some(Value::LocalizedText(text)) => Some(text.clone()),
        _ => None,
    }
}

type EnumValueParts = (Option<i64>, Option<LocalizedText>, Option<LocalizedText>);

fn decode_enum_value_type(object: &ExtensionObject) -> Result<EnumValueParts> {
    let ExtensionObjectBody::Binary(body) = &object.body else {
        return Ok((None, None, None));
    };
    let mut decoder = BinaryDecoder::new(body);
    let value = decoder.read_value("Value", BuiltInType::Int64)?;
    let display_name = decoder.read_value("DisplayName", BuiltInType::LocalizedText)?;
    let description = decoder.read_value("Description", BuiltInType::LocalizedText)?;
    if decoder.remaining() != 0 {
        return Err(Error::Decoding(format!(
            "{} trailing bytes in EnumValueType",
            decoder.remaining()
        )));
    }
    Ok((
        value.as_i64(),
        localized(Some(&display_name)),
        localized(Some(&description)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BinaryEncoder, Encoder};
    use crate::node_source::{MemoryNodeSource, Node};
    use crate::types::ids::{data_types, objects};
    use crate::value::StructureValue;

    const DICTIONARY: NodeId = NodeId::numeric(2, 5000);
    const NAMESPACE_URI: NodeId = NodeId::numeric(2, 5001);
    const DESCRIPTION: NodeId = NodeId::numeric(2, 5002);
    const ENCODING: NodeId = NodeId::numeric(2, 5003);
    const POINT: NodeId = NodeId::numeric(2, 5004);

    const DOCUMENT: &str = r#"<opc:TypeDictionary
        xmlns:opc="http://opcfoundation.org/BinarySchema/"
        xmlns:tns="urn:test"
        TargetNamespace="urn:test">
      <opc:StructuredType Name="Point">
        <opc:Field Name="X" TypeName="opc:Double"/>
        <opc:Field Name="Y" TypeName="opc:Double"/>
      </opc:StructuredType>
    </opc:TypeDictionary>"#;

    fn binary_type_system(document: Vec<u8>) -> MemoryNodeSource {
        let source = MemoryNodeSource::new();
        let type_system = objects::OPC_BINARY_SCHEMA_TYPE_SYSTEM;
        source.add_node(Node::object(type_system.clone(), "OPC Binary"));
        source.add_node(Node::variable(DICTIONARY, "Test", data_types::BYTE_STRING));
        source.add_node(Node::variable(
            NAMESPACE_URI,
            browse_names::NAMESPACE_URI,
            data_types::STRING,
        ));
        source.add_node(Node::variable(DESCRIPTION, "Point", data_types::STRING));
        source.add_node(Node::object(ENCODING, browse_names::DEFAULT_BINARY));
        source.add_node(Node::data_type_node(POINT, "Point"));

        source.add_reference(&type_system, reference_types::HAS_COMPONENT, &DICTIONARY);
        source.add_reference(&DICTIONARY, reference_types::HAS_PROPERTY, &NAMESPACE_URI);
        source.add_reference(&DICTIONARY, reference_types::HAS_COMPONENT, &DESCRIPTION);
        source.add_reference(&ENCODING, reference_types::HAS_DESCRIPTION, &DESCRIPTION);
        source.add_reference(&POINT, reference_types::HAS_ENCODING, &ENCODING);

        source.set_value(&DICTIONARY, DataValue::new(Value::ByteString(document)));
        source.set_value(&NAMESPACE_URI, DataValue::new(Value::from("urn:test")));
        source.set_value(&DESCRIPTION, DataValue::new(Value::from("Point")));
        source
    }

    #[tokio::test]
    async fn test_dictionary_definitions_by_type_and_encoding() {
        let mut document = DOCUMENT.as_bytes().to_vec();
        document.extend_from_slice(&[0, 0, 0]);
        let source = Arc::new(binary_type_system(document));
        let cache = DataTypeSystemCache::new(source.clone());
        let ct = CancellationToken::new();

        let by_type = cache
            .get_definition(DictionaryKind::Binary, &POINT, &ct)
            .await
            .unwrap()
            .expect("point by type id");
        assert_eq!(by_type.encoding_id, ENCODING);
        assert_eq!(by_type.xml_name, XmlQualifiedName::new("urn:test", "Point"));
        let DataTypeDefinition::Structure(structure) = &by_type.definition else {
            panic!("expected a structure");
        };
        assert_eq!(structure.fields.len(), 2);

        let calls = source.stats();
        let by_encoding = cache
            .get_definition(DictionaryKind::Binary, &ENCODING, &ct)
            .await
            .unwrap();
        assert_eq!(by_encoding, Some(by_type));
        assert_eq!(source.stats(), calls, "second lookup must not reload");
        assert_eq!(cache.loaded_count(DictionaryKind::Binary), Some(2));
    }

    #[tokio::test]
    async fn test_broken_dictionary_is_skipped() {
        let source = Arc::new(binary_type_system(b"<not-a-dictionary/>".to_vec()));
        let cache = DataTypeSystemCache::new(source);
        let ct = CancellationToken::new();
        let found = cache
            .get_definition(DictionaryKind::Binary, &POINT, &ct)
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(cache.loaded_count(DictionaryKind::Binary), Some(0));
    }

    #[tokio::test]
    async fn test_cancelled_load_is_retried() {
        let source = Arc::new(binary_type_system(DOCUMENT.as_bytes().to_vec()));
        let cache = DataTypeSystemCache::new(source);
        let cancelled = CancellationToken::new();
        cancelled.cancel();
        assert!(matches!(
            cache
                .get_definition(DictionaryKind::Binary, &POINT, &cancelled)
                .await,
            Err(Error::Cancelled)
        ));
        assert_eq!(cache.loaded_count(DictionaryKind::Binary), None);

        let ct = CancellationToken::new();
        assert!(cache
            .get_definition(DictionaryKind::Binary, &POINT, &ct)
            .await
            .unwrap()
            .is_some());
    }

    fn enum_type(source: &MemoryNodeSource, property: &str, value: Value) -> NodeId {
        let mode = NodeId::numeric(2, 6000);
        let property_id = NodeId::numeric(2, 6001);
        source.add_node(Node::data_type_node(mode.clone(), "Mode"));
        source.add_node(Node::variable(property_id.clone(), property, data_types::BASE_DATA_TYPE));
        source.add_reference(&mode, reference_types::HAS_PROPERTY, &property_id);
        source.set_value(&property_id, DataValue::new(value));
        mode
    }

    fn enum_fields(definition: Option<DictionaryDefinition>) -> Vec<(String, i64)> {
        match definition.map(|d| d.definition) {
            Some(DataTypeDefinition::Enum(e)) => {
                e.fields.into_iter().map(|f| (f.name, f.value)).collect()
            }
            other => panic!("expected an enum, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_enum_strings_fallback() {
        let source = Arc::new(MemoryNodeSource::new());
        let strings = Value::Array(vec![
            Value::LocalizedText(LocalizedText::from("Off")),
            Value::LocalizedText(LocalizedText::from("On")),
        ]);
        let mode = enum_type(&source, browse_names::ENUM_STRINGS, strings);
        let cache = DataTypeSystemCache::new(source);
        let ct = CancellationToken::new();

        let definition = cache
            .get_definition(DictionaryKind::Binary, &mode, &ct)
            .await
            .unwrap();
        assert_eq!(
            enum_fields(definition),
            vec![("Off".to_string(), 0), ("On".to_string(), 1)]
        );
        assert!(cache
            .get_definition(DictionaryKind::Xml, &mode, &ct)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_enum_values_fallback() {
        let mut body = BinaryEncoder::new();
        body.write_value("", BuiltInType::Int64, &Value::Int64(10)).unwrap();
        body.write_value(
            "",
            BuiltInType::LocalizedText,
            &Value::LocalizedText(LocalizedText::from("Fast")),
        )
        .unwrap();
        body.write_value(
            "",
            BuiltInType::LocalizedText,
            &Value::LocalizedText(LocalizedText::default()),
        )
        .unwrap();
        let encoded = Value::from(ExtensionObject {
            type_id: NodeId::numeric(0, 8251),
            body: ExtensionObjectBody::Binary(body.into_bytes()),
        });
        let decoded = Value::from(
            StructureValue::new(NodeId::numeric(0, 7594))
                .with("Value", 20i64)
                .with("DisplayName", LocalizedText::from("Slow")),
        );

        let source = Arc::new(MemoryNodeSource::new());
        let mode = enum_type(
            &source,
            browse_names::ENUM_VALUES,
            Value::Array(vec![encoded, decoded]),
        );
        let cache = DataTypeSystemCache::new(source);
        let definition = cache
            .get_definition(DictionaryKind::Binary, &mode, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(
            enum_fields(definition),
            vec![("Fast".to_string(), 10), ("Slow".to_string(), 20)]
        );
    }

    #[test]
    fn test_description_type_name() {
        assert_eq!(description_type_name("Point"), "Point");
        assert_eq!(description_type_name("//xs:element[@name='Point']"), "Point");
    }
}
