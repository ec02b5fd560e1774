// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Legacy schema dictionaries.
//!
//! Servers that predate per-type definition attributes describe their
//! structures in dictionaries embedded in the address space: an OPC binary
//! schema document for the binary encoding and an XML schema document for
//! the XML encoding. This module parses both into the raw definition model.
//!
//! Type references inside a dictionary are by qualified name. They are
//! resolved against a [`TypeDictionary`] that maps every declared name to its
//! data type id and encoding id. The caller builds it from the server's
//! description nodes, or from the document itself with
//! [`declared_type_dictionary`], which is what makes forward references
//! within one document work.
//!
//! A type that cannot be converted fails alone: [`ParsedDictionary`] keeps
//! the error next to the types that did convert.

mod binary;
mod xml;

pub use binary::{parse_binary_schema, BinarySchema, EnumeratedType, FieldType, StructuredType};
pub use xml::{parse_xml_schema, XmlSchema};

use crate::definition::DataTypeDefinition;
use crate::error::{Error, Result};
use crate::types::ids::{browse_names, data_types, namespaces};
use crate::types::{Identifier, NodeId, XmlQualifiedName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Schema language of a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DictionaryKind {
    /// OPC binary schema, describes the binary encoding.
    Binary,
    /// XML schema, describes the XML encoding.
    Xml,
}

impl DictionaryKind {
    /// Browse name of the encoding node this dictionary describes.
    pub fn encoding_name(self) -> &'static str {
        match self {
            Self::Binary => browse_names::DEFAULT_BINARY,
            Self::Xml => browse_names::DEFAULT_XML,
        }
    }

    /// Type system node the dictionaries of this kind hang off.
    pub fn type_system_id(self) -> NodeId {
        match self {
            Self::Binary => crate::types::ids::objects::OPC_BINARY_SCHEMA_TYPE_SYSTEM,
            Self::Xml => crate::types::ids::objects::XML_SCHEMA_TYPE_SYSTEM,
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for DictionaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" | "bsd" | "opc" => Ok(Self::Binary),
            "xml" | "xsd" => Ok(Self::Xml),
            _ => Err(format!("Unknown dictionary kind: {} (use binary or xml)", s)),
        }
    }
}

/// Data type and encoding ids registered for a dictionary type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeEntry {
    pub type_id: NodeId,
    pub encoding_id: NodeId,
}

/// Qualified type name to ids.
pub type TypeDictionary = HashMap<XmlQualifiedName, TypeEntry>;

/// One type converted from a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryDefinition {
    pub xml_name: XmlQualifiedName,
    pub type_id: NodeId,
    pub encoding_id: NodeId,
    pub definition: DataTypeDefinition,
}

/// Result of converting a whole dictionary document.
#[derive(Debug, Default)]
pub struct ParsedDictionary {
    pub target_namespace: String,
    pub definitions: Vec<DictionaryDefinition>,
    /// Types that were declared but could not be converted.
    pub errors: Vec<(XmlQualifiedName, Error)>,
}

impl ParsedDictionary {
    pub fn definition(&self, name: &str) -> Option<&DictionaryDefinition> {
        self.definitions.iter().find(|d| d.xml_name.name == name)
    }
}

/// A parsed dictionary document of either kind, not yet converted.
#[derive(Debug, Clone)]
pub enum SchemaDocument {
    Binary(BinarySchema),
    Xml(XmlSchema),
}

impl SchemaDocument {
    pub fn parse(kind: DictionaryKind, document: &str) -> Result<Self> {
        match kind {
            DictionaryKind::Binary => Ok(Self::Binary(parse_binary_schema(document)?)),
            DictionaryKind::Xml => Ok(Self::Xml(parse_xml_schema(document)?)),
        }
    }

    pub fn kind(&self) -> DictionaryKind {
        match self {
            Self::Binary(_) => DictionaryKind::Binary,
            Self::Xml(_) => DictionaryKind::Xml,
        }
    }

    pub fn target_namespace(&self) -> &str {
        match self {
            Self::Binary(schema) => &schema.target_namespace,
            Self::Xml(schema) => &schema.target_namespace,
        }
    }

    pub fn declared_names(&self) -> Vec<String> {
        match self {
            Self::Binary(schema) => schema.declared_names(),
            Self::Xml(schema) => schema.declared_names(),
        }
    }

    pub fn convert(&self, types: &TypeDictionary) -> ParsedDictionary {
        match self {
            Self::Binary(schema) => schema.convert(types),
            Self::Xml(schema) => schema.convert(types),
        }
    }
}

/// Parse a dictionary document of either kind and convert all its types.
pub fn parse_dictionary(
    kind: DictionaryKind,
    document: &str,
    types: &TypeDictionary,
) -> Result<ParsedDictionary> {
    Ok(SchemaDocument::parse(kind, document)?.convert(types))
}

/// Build a type dictionary from the names a document declares.
///
/// Every declared type gets a string id `<name>` and an encoding id
/// `<name>_Encoding_<kind>` in `namespace`. Used when no server is available
/// to provide the real ids.
pub fn declared_type_dictionary(
    kind: DictionaryKind,
    document: &str,
    namespace: u16,
) -> Result<TypeDictionary> {
    let schema = SchemaDocument::parse(kind, document)?;
    let suffix = match kind {
        DictionaryKind::Binary => "DefaultBinary",
        DictionaryKind::Xml => "DefaultXml",
    };
    Ok(schema
        .declared_names()
        .into_iter()
        .map(|name| {
            let entry = TypeEntry {
                type_id: NodeId::new(namespace, Identifier::String(name.clone())),
                encoding_id: NodeId::new(
                    namespace,
                    Identifier::String(format!("{}_Encoding_{}", name, suffix)),
                ),
            };
            (XmlQualifiedName::new(schema.target_namespace(), name), entry)
        })
        .collect())
}

/// Data type of a namespace 0 type referenced by name in a dictionary.
fn builtin_type_id(name: &str) -> Option<NodeId> {
    Some(match name {
        "Boolean" => data_types::BOOLEAN,
        "SByte" => data_types::SBYTE,
        "Byte" => data_types::BYTE,
        "Int16" => data_types::INT16,
        "UInt16" => data_types::UINT16,
        "Int32" => data_types::INT32,
        "UInt32" => data_types::UINT32,
        "Int64" => data_types::INT64,
        "UInt64" => data_types::UINT64,
        "Float" => data_types::FLOAT,
        "Double" => data_types::DOUBLE,
        "String" | "CharArray" => data_types::STRING,
        "DateTime" => data_types::DATE_TIME,
        "Guid" => data_types::GUID,
        "ByteString" => data_types::BYTE_STRING,
        "XmlElement" => data_types::XML_ELEMENT,
        "NodeId" => data_types::NODE_ID,
        "ExpandedNodeId" => data_types::EXPANDED_NODE_ID,
        "StatusCode" => data_types::STATUS_CODE,
        "QualifiedName" => data_types::QUALIFIED_NAME,
        "LocalizedText" => data_types::LOCALIZED_TEXT,
        "ExtensionObject" | "Structure" => data_types::STRUCTURE,
        "DataValue" => data_types::DATA_VALUE,
        "Variant" => data_types::BASE_DATA_TYPE,
        "DiagnosticInfo" => data_types::DIAGNOSTIC_INFO,
        "Duration" => data_types::DURATION,
        "UtcTime" => data_types::UTC_TIME,
        "LocaleId" => data_types::LOCALE_ID,
        _ => return None,
    })
}

/// Resolve a type reference: built-ins of the standard namespaces first,
/// then the dictionary. Unknown names resolve to the null id, which fails
/// validation later.
fn resolve_type_name(name: &XmlQualifiedName, types: &TypeDictionary) -> NodeId {
    if name.namespace == namespaces::OPC_BINARY_SCHEMA || name.namespace == namespaces::OPC_UA {
        if let Some(id) = builtin_type_id(&name.name) {
            return id;
        }
    }
    match types.get(name) {
        Some(entry) => entry.type_id.clone(),
        None => {
            log::debug!("[Dictionary] unresolved type reference {}", name);
            NodeId::NULL
        }
    }
}
