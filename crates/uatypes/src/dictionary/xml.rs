// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML schema (`xs:schema`) dictionary parser.
//!
//! Only the subset servers emit for their XML encodings is understood:
//! `complexType` with a `sequence` of `element`s and `simpleType`
//! string restrictions with `Name_Code` enumeration facets.

use super::{builtin_type_id, DictionaryDefinition, ParsedDictionary, TypeDictionary};
use crate::definition::{
    DataTypeDefinition, EnumDefinition, EnumField, StructureDefinition, StructureField,
};
use crate::description::StructureType;
use crate::error::{Error, Result};
use crate::types::ids::{data_types, namespaces};
use crate::types::{NodeId, XmlQualifiedName};
use roxmltree::{Document, Node};

const LIST_PREFIX: &str = "ListOf";

/// One `xs:element` of a complex type sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlElement {
    name: String,
    type_name: XmlQualifiedName,
    min_occurs: u32,
    max_occurs: Option<u32>,
}

impl XmlElement {
    fn is_array(&self) -> bool {
        self.max_occurs.map_or(true, |max| max > 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlType {
    Complex {
        name: XmlQualifiedName,
        sequence: Option<Vec<XmlElement>>,
    },
    Simple {
        name: XmlQualifiedName,
        facets: Vec<String>,
    },
}

impl XmlType {
    fn name(&self) -> &XmlQualifiedName {
        match self {
            Self::Complex { name, .. } | Self::Simple { name, .. } => name,
        }
    }
}

/// A parsed XML schema document.
#[derive(Debug, Clone, Default)]
pub struct XmlSchema {
    pub target_namespace: String,
    types: Vec<XmlType>,
}

/// Parse an XML schema document.
pub fn parse_xml_schema(document: &str) -> Result<XmlSchema> {
    let doc = Document::parse(document)?;
    let root = doc.root_element();
    if root.tag_name().name() != "schema" {
        return Err(Error::XmlParse(format!(
            "expected schema root, found {}",
            root.tag_name().name()
        )));
    }
    let target_namespace = root.attribute("targetNamespace").unwrap_or("").to_string();
    let mut schema = XmlSchema {
        target_namespace: target_namespace.clone(),
        types: Vec::new(),
    };

    for node in root.children().filter(|n| n.is_element()) {
        let Some(local) = node.attribute("name") else {
            continue;
        };
        let name = XmlQualifiedName::new(target_namespace.clone(), local);
        match node.tag_name().name() {
            "complexType" => {
                let sequence = child(&node, "sequence")
                    .map(|seq| {
                        seq.children()
                            .filter(|n| n.is_element() && n.tag_name().name() == "element")
                            .map(|n| parse_element(&n, &target_namespace))
                            .collect::<Result<Vec<_>>>()
                    })
                    .transpose()?;
                schema.types.push(XmlType::Complex { name, sequence });
            }
            "simpleType" => {
                let facets = child(&node, "restriction")
                    .map(|r| {
                        r.children()
                            .filter(|n| n.is_element() && n.tag_name().name() == "enumeration")
                            .filter_map(|n| n.attribute("value").map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                schema.types.push(XmlType::Simple { name, facets });
            }
            _ => {}
        }
    }
    Ok(schema)
}

fn child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn parse_element(node: &Node<'_, '_>, target_namespace: &str) -> Result<XmlElement> {
    let name = node
        .attribute("name")
        .ok_or_else(|| Error::XmlParse("element without name attribute".into()))?;
    let type_name = match node.attribute("type") {
        Some(value) => match value.split_once(':') {
            Some((prefix, local)) => XmlQualifiedName::new(
                node.lookup_namespace_uri(Some(prefix)).unwrap_or(prefix),
                local,
            ),
            None => XmlQualifiedName::new(target_namespace, value),
        },
        // Untyped elements carry anything.
        None => XmlQualifiedName::new(namespaces::OPC_UA, "Variant"),
    };
    let min_occurs = match node.attribute("minOccurs") {
        Some(v) => v
            .parse()
            .map_err(|e| Error::XmlParse(format!("invalid minOccurs '{}': {}", v, e)))?,
        None => 1,
    };
    let max_occurs = match node.attribute("maxOccurs") {
        Some("unbounded") => None,
        Some(v) => Some(
            v.parse()
                .map_err(|e| Error::XmlParse(format!("invalid maxOccurs '{}': {}", v, e)))?,
        ),
        None => Some(1),
    };
    Ok(XmlElement {
        name: name.to_string(),
        type_name,
        min_occurs,
        max_occurs,
    })
}

/// Map an `xs:` primitive to its data type.
fn xs_type_id(name: &str) -> Option<NodeId> {
    Some(match name {
        "boolean" => data_types::BOOLEAN,
        "byte" => data_types::SBYTE,
        "unsignedByte" => data_types::BYTE,
        "short" => data_types::INT16,
        "unsignedShort" => data_types::UINT16,
        "int" => data_types::INT32,
        "unsignedInt" => data_types::UINT32,
        "long" => data_types::INT64,
        "unsignedLong" => data_types::UINT64,
        "float" => data_types::FLOAT,
        "double" => data_types::DOUBLE,
        "string" => data_types::STRING,
        "dateTime" => data_types::DATE_TIME,
        "base64Binary" => data_types::BYTE_STRING,
        _ => return None,
    })
}

/// Resolve a type reference to `(data type, value rank)`.
fn resolve_reference(
    name: &XmlQualifiedName,
    owner: &XmlQualifiedName,
    owner_id: &NodeId,
    types: &TypeDictionary,
) -> (NodeId, i32) {
    if name == owner {
        return (owner_id.clone(), -1);
    }
    if name.namespace == namespaces::XML_SCHEMA {
        return (xs_type_id(&name.name).unwrap_or(NodeId::NULL), -1);
    }
    let is_ua =
        name.namespace == namespaces::OPC_UA || name.namespace == namespaces::OPC_UA_TYPES_XSD;
    if is_ua {
        if let Some(id) = builtin_type_id(&name.name) {
            return (id, -1);
        }
    }
    if let Some(entry) = types.get(name) {
        return (entry.type_id.clone(), -1);
    }
    if let Some(inner) = name.name.strip_prefix(LIST_PREFIX) {
        let inner = XmlQualifiedName::new(name.namespace.clone(), inner);
        let (id, rank) = resolve_reference(&inner, owner, owner_id, types);
        if rank == -1 && !id.is_null() {
            return (id, 1);
        }
    }
    log::debug!("[Dictionary] unresolved type reference {}", name);
    (NodeId::NULL, -1)
}

impl XmlSchema {
    /// Local names of all declared types except `ListOf` wrappers.
    pub fn declared_names(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|t| t.name().name.clone())
            .filter(|n| !n.starts_with(LIST_PREFIX))
            .collect()
    }

    /// Convert every declared type that has an entry in `types`.
    pub fn convert(&self, types: &TypeDictionary) -> ParsedDictionary {
        let mut parsed = ParsedDictionary {
            target_namespace: self.target_namespace.clone(),
            ..ParsedDictionary::default()
        };
        for xml_type in &self.types {
            let name = xml_type.name();
            if name.name.starts_with(LIST_PREFIX) {
                continue;
            }
            let Some(entry) = types.get(name) else {
                log::debug!("[Dictionary] no type entry for {}", name);
                continue;
            };
            let converted = match xml_type {
                XmlType::Complex { sequence, .. } => to_structure_definition(
                    name,
                    sequence.as_deref(),
                    &entry.type_id,
                    &entry.encoding_id,
                    types,
                )
                .map(DataTypeDefinition::Structure),
                XmlType::Simple { facets, .. } => {
                    Ok(DataTypeDefinition::Enum(to_enum_definition(facets)))
                }
            };
            match converted {
                Ok(definition) => parsed.definitions.push(DictionaryDefinition {
                    xml_name: name.clone(),
                    type_id: entry.type_id.clone(),
                    encoding_id: entry.encoding_id.clone(),
                    definition,
                }),
                Err(e) => {
                    log::warn!("[Dictionary] skipping {}: {}", name, e);
                    parsed.errors.push((name.clone(), e));
                }
            }
        }
        parsed
    }
}

fn to_structure_definition(
    name: &XmlQualifiedName,
    sequence: Option<&[XmlElement]>,
    type_id: &NodeId,
    encoding_id: &NodeId,
    types: &TypeDictionary,
) -> Result<StructureDefinition> {
    let sequence = sequence.ok_or_else(|| {
        Error::SchemaIncompatible("Complex type does not contain a sequence".into())
    })?;
    let fields: Vec<StructureField> = sequence
        .iter()
        .map(|element| {
            let (data_type, rank) = resolve_reference(&element.type_name, name, type_id, types);
            let value_rank = if element.is_array() { 1 } else { rank };
            StructureField {
                is_optional: element.min_occurs == 0 && !element.is_array(),
                ..StructureField::new(element.name.clone(), data_type).with_value_rank(value_rank)
            }
        })
        .collect();
    let structure_type = if fields.iter().any(|f| f.is_optional) {
        StructureType::StructureWithOptionalFields
    } else {
        StructureType::Structure
    };
    Ok(StructureDefinition {
        default_encoding_id: encoding_id.clone(),
        base_data_type: NodeId::NULL,
        structure_type: structure_type as i32,
        fields,
    })
}

/// Facets are `Name_Code`; the code is the text after the last underscore.
/// The facet text is kept as the field name.
fn to_enum_definition(facets: &[String]) -> EnumDefinition {
    let fields = facets
        .iter()
        .enumerate()
        .map(|(index, facet)| {
            let value = facet
                .rsplit_once('_')
                .and_then(|(_, code)| code.parse::<i64>().ok())
                .unwrap_or(index as i64);
            EnumField::new(facet.clone(), value)
        })
        .collect();
    EnumDefinition::new(fields)
}
