// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC binary schema (`opc:TypeDictionary`) parser.
//!
//! Supported: plain structures, structures with optional fields selected by
//! a leading 32-bit block of `opc:Bit` switches, unions with a leading
//! discriminant, arrays whose length field directly precedes them, nested
//! and self references. Rejected: `Terminator`, `LengthInBytes`, non-bit
//! `Length`, bits mixed into unions and selector blocks that are not
//! exactly 32 bits wide.

use super::{resolve_type_name, DictionaryDefinition, ParsedDictionary, TypeDictionary};
use crate::definition::{
    DataTypeDefinition, EnumDefinition, EnumField, StructureDefinition, StructureField,
};
use crate::description::StructureType;
use crate::error::{Error, Result};
use crate::types::ids::namespaces;
use crate::types::{LocalizedText, NodeId, XmlQualifiedName};
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// Width of the optional-field selector block.
const SELECTOR_BITS: u32 = 32;

/// A `opc:Field` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldType {
    pub name: String,
    pub type_name: XmlQualifiedName,
    pub length: u32,
    pub length_field: Option<String>,
    pub is_length_in_bytes: bool,
    pub switch_field: Option<String>,
    pub switch_value: u32,
    pub terminator: Option<String>,
}

impl FieldType {
    pub fn new(name: impl Into<String>, type_name: XmlQualifiedName) -> Self {
        Self {
            name: name.into(),
            type_name,
            ..Self::default()
        }
    }

    fn is_bit(&self) -> bool {
        self.type_name.name == "Bit"
            && (self.type_name.namespace == namespaces::OPC_BINARY_SCHEMA
                || self.type_name.namespace == namespaces::OPC_UA)
    }
}

/// A `opc:StructuredType` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredType {
    pub name: XmlQualifiedName,
    pub base_type: Option<XmlQualifiedName>,
    pub fields: Vec<FieldType>,
}

/// A `opc:EnumeratedType` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumeratedType {
    pub name: XmlQualifiedName,
    pub is_option_set: bool,
    pub values: Vec<EnumField>,
}

/// A parsed binary schema document.
#[derive(Debug, Clone, Default)]
pub struct BinarySchema {
    pub target_namespace: String,
    pub imports: Vec<String>,
    pub structured_types: Vec<StructuredType>,
    pub enumerated_types: Vec<EnumeratedType>,
}

/// Parse a binary schema document.
pub fn parse_binary_schema(document: &str) -> Result<BinarySchema> {
    let doc = Document::parse(document)?;
    let root = doc.root_element();
    if root.tag_name().name() != "TypeDictionary" {
        return Err(Error::XmlParse(format!(
            "expected TypeDictionary root, found {}",
            root.tag_name().name()
        )));
    }

    let target_namespace = root.attribute("TargetNamespace").unwrap_or("").to_string();
    let mut schema = BinarySchema {
        target_namespace: target_namespace.clone(),
        ..BinarySchema::default()
    };

    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "Import" => {
                if let Some(ns) = node.attribute("Namespace") {
                    schema.imports.push(ns.to_string());
                }
            }
            "StructuredType" => {
                let name = required_attribute(&node, "Name")?;
                let fields = node
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "Field")
                    .map(|n| parse_field(&n, &target_namespace))
                    .collect::<Result<Vec<_>>>()?;
                schema.structured_types.push(StructuredType {
                    name: XmlQualifiedName::new(target_namespace.clone(), name),
                    base_type: node
                        .attribute("BaseType")
                        .map(|b| qualify(&node, b, &target_namespace)),
                    fields,
                });
            }
            "EnumeratedType" => {
                let name = required_attribute(&node, "Name")?;
                let values = node
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "EnumeratedValue")
                    .map(|n| parse_enumerated_value(&n))
                    .collect::<Result<Vec<_>>>()?;
                schema.enumerated_types.push(EnumeratedType {
                    name: XmlQualifiedName::new(target_namespace.clone(), name),
                    is_option_set: node.attribute("IsOptionSet") == Some("true"),
                    values,
                });
            }
            _ => {}
        }
    }
    Ok(schema)
}

fn required_attribute<'a>(node: &Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        Error::XmlParse(format!(
            "{} element without {} attribute",
            node.tag_name().name(),
            name
        ))
    })
}

/// Resolve a `prefix:Name` reference to its namespace.
fn qualify(node: &Node<'_, '_>, value: &str, target_namespace: &str) -> XmlQualifiedName {
    match value.split_once(':') {
        Some((prefix, name)) => {
            let ns = node.lookup_namespace_uri(Some(prefix)).unwrap_or(prefix);
            XmlQualifiedName::new(ns, name)
        }
        None => XmlQualifiedName::new(
            node.lookup_namespace_uri(None).unwrap_or(target_namespace),
            value,
        ),
    }
}

fn parse_u32(node: &Node<'_, '_>, name: &str) -> Result<u32> {
    match node.attribute(name) {
        None => Ok(0),
        Some(v) => v.trim().parse().map_err(|e| {
            Error::XmlParse(format!("invalid {} '{}': {}", name, v, e))
        }),
    }
}

fn parse_field(node: &Node<'_, '_>, target_namespace: &str) -> Result<FieldType> {
    let name = required_attribute(node, "Name")?;
    let type_name = required_attribute(node, "TypeName")?;
    Ok(FieldType {
        name: name.to_string(),
        type_name: qualify(node, type_name, target_namespace),
        length: parse_u32(node, "Length")?,
        length_field: node.attribute("LengthField").map(str::to_string),
        is_length_in_bytes: node.attribute("IsLengthInBytes") == Some("true"),
        switch_field: node.attribute("SwitchField").map(str::to_string),
        switch_value: parse_u32(node, "SwitchValue")?,
        terminator: node.attribute("Terminator").map(str::to_string),
    })
}

fn parse_enumerated_value(node: &Node<'_, '_>) -> Result<EnumField> {
    let name = required_attribute(node, "Name")?;
    let value = match node.attribute("Value") {
        Some(v) => v
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::XmlParse(format!("invalid enum value '{}': {}", v, e)))?,
        None => 0,
    };
    let documentation = node
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "Documentation")
        .and_then(|n| n.text())
        .map(|t| LocalizedText::from(t.trim()));
    Ok(EnumField {
        name: name.to_string(),
        value,
        display_name: Some(LocalizedText::from(name)),
        description: documentation,
    })
}

impl BinarySchema {
    /// Local names of all declared types, in document order.
    pub fn declared_names(&self) -> Vec<String> {
        self.structured_types
            .iter()
            .map(|t| t.name.name.clone())
            .chain(self.enumerated_types.iter().map(|t| t.name.name.clone()))
            .collect()
    }

    /// Convert every declared type that has an entry in `types`.
    pub fn convert(&self, types: &TypeDictionary) -> ParsedDictionary {
        let mut parsed = ParsedDictionary {
            target_namespace: self.target_namespace.clone(),
            ..ParsedDictionary::default()
        };

        for structured in &self.structured_types {
            let Some(entry) = types.get(&structured.name) else {
                log::debug!("[Dictionary] no type entry for {}", structured.name);
                continue;
            };
            match to_structure_definition(structured, &entry.encoding_id, types, &entry.type_id)
            {
                Ok(definition) => parsed.definitions.push(DictionaryDefinition {
                    xml_name: structured.name.clone(),
                    type_id: entry.type_id.clone(),
                    encoding_id: entry.encoding_id.clone(),
                    definition: DataTypeDefinition::Structure(definition),
                }),
                Err(e) => {
                    log::warn!("[Dictionary] skipping {}: {}", structured.name, e);
                    parsed.errors.push((structured.name.clone(), e));
                }
            }
        }

        for enumerated in &self.enumerated_types {
            let Some(entry) = types.get(&enumerated.name) else {
                log::debug!("[Dictionary] no type entry for {}", enumerated.name);
                continue;
            };
            parsed.definitions.push(DictionaryDefinition {
                xml_name: enumerated.name.clone(),
                type_id: entry.type_id.clone(),
                encoding_id: entry.encoding_id.clone(),
                definition: DataTypeDefinition::Enum(to_enum_definition(enumerated)),
            });
        }
        parsed
    }
}

/// Convert an enumerated type; declaration order is kept.
pub fn to_enum_definition(enumerated: &EnumeratedType) -> EnumDefinition {
    EnumDefinition {
        fields: enumerated.values.clone(),
        is_option_set: enumerated.is_option_set,
    }
}

/// Convert a structured type to a structure definition.
pub fn to_structure_definition(
    structured: &StructuredType,
    default_encoding_id: &NodeId,
    types: &TypeDictionary,
    type_id: &NodeId,
) -> Result<StructureDefinition> {
    let mut has_bit_field = false;
    let mut is_union = false;
    for field in &structured.fields {
        if field.is_length_in_bytes || field.terminator.is_some() {
            return Err(Error::SchemaIncompatible(
                "The structure definition uses a Terminator or LengthInBytes, which are not supported."
                    .into(),
            ));
        }
        if field.switch_value != 0 {
            is_union = true;
        }
        if field.is_bit() {
            has_bit_field = true;
            continue;
        }
        if field.length != 0 {
            return Err(Error::SchemaIncompatible(format!(
                "Field {} has a fixed length, which is not supported.",
                field.name
            )));
        }
    }

    if is_union && has_bit_field {
        return Err(Error::SchemaIncompatible(
            "The structure definition combines a Union and a bit field, both of which are not supported in a single structure."
                .into(),
        ));
    }

    let structure_type = if is_union {
        StructureType::Union
    } else if has_bit_field {
        StructureType::StructureWithOptionalFields
    } else {
        StructureType::Structure
    };

    let mut fields: Vec<StructureField> = Vec::with_capacity(structured.fields.len());
    let mut selector_bits = 0u32;
    let mut switch_bits: HashMap<&str, u32> = HashMap::new();
    let mut discriminant: Option<&str> = None;
    let mut union_members = 0u32;

    for field in &structured.fields {
        if field.is_bit() {
            if !fields.is_empty() || selector_bits >= SELECTOR_BITS {
                return Err(Error::SchemaIncompatible(
                    "Options for bit selectors must be 32 bit in size and must be the first element in the structure."
                        .into(),
                ));
            }
            switch_bits.insert(field.name.as_str(), selector_bits);
            selector_bits += field.length.max(1);
            continue;
        }

        if selector_bits != 0 && selector_bits != SELECTOR_BITS {
            return Err(Error::SchemaIncompatible(
                "Bitwise option selectors must have 32 bits.".into(),
            ));
        }

        let data_type = if field.type_name == structured.name {
            type_id.clone()
        } else {
            resolve_type_name(&field.type_name, types)
        };

        if let Some(length_field) = &field.length_field {
            // The length prefix becomes the array field itself.
            let previous = fields
                .last_mut()
                .filter(|f| &f.name == length_field)
                .ok_or_else(|| {
                    Error::SchemaIncompatible(
                        "The length field must precede the type field of an array.".into(),
                    )
                })?;
            previous.name = field.name.clone();
            previous.data_type = data_type;
            previous.value_rank = 1;
            continue;
        }

        let mut canonical = StructureField::new(field.name.clone(), data_type);
        if is_union {
            let Some(switch_field) = &field.switch_field else {
                if discriminant.is_some() || !fields.is_empty() {
                    return Err(Error::SchemaIncompatible(
                        "The switch field of a union must be the first field in the complex type."
                            .into(),
                    ));
                }
                discriminant = Some(field.name.as_str());
                continue;
            };
            let Some(expected) = discriminant else {
                return Err(Error::SchemaIncompatible(
                    "The switch field of a union must be the first field in the complex type."
                        .into(),
                ));
            };
            if expected != switch_field.as_str() {
                return Err(Error::SchemaIncompatible(format!(
                    "The switch field {} of union member {} is not the discriminant of the union.",
                    switch_field, field.name
                )));
            }
            if field.switch_value != union_members + 1 {
                return Err(Error::SchemaIncompatible(format!(
                    "The switch value {} of union member {} does not match its position {}.",
                    field.switch_value,
                    field.name,
                    union_members + 1
                )));
            }
            union_members += 1;
        } else if let Some(switch_field) = &field.switch_field {
            if !switch_bits.contains_key(switch_field.as_str()) {
                return Err(Error::SchemaIncompatible(format!(
                    "The switch field for {} does not exist.",
                    switch_field
                )));
            }
            canonical.is_optional = true;
        }
        fields.push(canonical);
    }

    Ok(StructureDefinition {
        default_encoding_id: default_encoding_id.clone(),
        base_data_type: NodeId::NULL,
        structure_type: structure_type as i32,
        fields,
    })
}
