// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structure descriptions and their construction-time validation.

use super::{EncodingTriple, StructureType, ValueRank};
use crate::definition::{StructureDefinition, StructureField};
use crate::error::{Error, Result};
use crate::types::ids::data_types;
use crate::types::{NodeId, XmlQualifiedName};
use serde::Serialize;
use std::collections::HashSet;

/// Optional field presence is carried in a 32-bit mask.
const MAX_OPTIONAL_FIELDS: usize = 32;

/// A field of a resolved structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureFieldDescription {
    field: StructureField,
    is_optional: bool,
    mask_index: Option<u32>,
}

impl StructureFieldDescription {
    /// Wrap a raw field. No validation happens here; structure construction
    /// validates, the codec rejects what it cannot handle.
    pub fn new(field: StructureField, is_optional: bool, mask_index: Option<u32>) -> Self {
        Self {
            field,
            is_optional,
            mask_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn data_type(&self) -> &NodeId {
        &self.field.data_type
    }

    /// Raw value rank as declared.
    pub fn raw_value_rank(&self) -> i32 {
        self.field.value_rank
    }

    pub fn value_rank(&self) -> Result<ValueRank> {
        ValueRank::try_from(self.field.value_rank)
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Bit of the presence mask (optional-field structures) or zero-based
    /// member position (unions, switch value is this plus one).
    pub fn mask_index(&self) -> Option<u32> {
        self.mask_index
    }

    pub fn max_string_length(&self) -> u32 {
        self.field.max_string_length
    }

    pub fn field(&self) -> &StructureField {
        &self.field
    }
}

/// A resolved structure type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureDescription {
    type_id: NodeId,
    xml_name: XmlQualifiedName,
    encodings: EncodingTriple,
    is_abstract: bool,
    structure_type: StructureType,
    base_data_type: NodeId,
    fields: Vec<StructureFieldDescription>,
}

impl StructureDescription {
    /// Validate a definition and build the description.
    ///
    /// Rejects unknown structure type tags, fields without a name or data
    /// type, value ranks other than scalar or `>= 1`, and optional-field
    /// structures with more than 32 optional fields. Duplicate field names
    /// are kept.
    pub fn new(
        type_id: NodeId,
        xml_name: XmlQualifiedName,
        encodings: EncodingTriple,
        is_abstract: bool,
        definition: &StructureDefinition,
    ) -> Result<Self> {
        let structure_type = StructureType::try_from(definition.structure_type)?;

        let mut names = HashSet::new();
        let mut fields = Vec::with_capacity(definition.fields.len());
        let mut next_bit = 0u32;
        for (position, field) in definition.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(Error::InvalidDefinition(format!(
                    "{}: field {} has no name",
                    type_id, position
                )));
            }
            if field.data_type.is_null() {
                return Err(Error::InvalidDefinition(format!(
                    "{}: field '{}' has no data type",
                    type_id, field.name
                )));
            }
            if field.value_rank != -1 && field.value_rank < 1 {
                return Err(Error::InvalidDefinition(format!(
                    "{}: field '{}' has unsupported value rank {}",
                    type_id, field.name, field.value_rank
                )));
            }
            if !names.insert(field.name.as_str()) {
                log::debug!(
                    "[Description] {} declares field '{}' more than once",
                    type_id,
                    field.name
                );
            }

            let (is_optional, mask_index) = if structure_type.is_union() {
                (false, Some(position as u32))
            } else if structure_type.has_optional_fields() && field.is_optional {
                if next_bit as usize >= MAX_OPTIONAL_FIELDS {
                    return Err(Error::InvalidDefinition(format!(
                        "{}: more than {} optional fields",
                        type_id, MAX_OPTIONAL_FIELDS
                    )));
                }
                next_bit += 1;
                (true, Some(next_bit - 1))
            } else {
                (false, None)
            };
            fields.push(StructureFieldDescription::new(
                field.clone(),
                is_optional,
                mask_index,
            ));
        }

        let base_data_type = if definition.base_data_type.is_null() {
            if structure_type.is_union() {
                data_types::UNION
            } else {
                data_types::STRUCTURE
            }
        } else {
            definition.base_data_type.clone()
        };

        Ok(Self {
            type_id,
            xml_name,
            encodings,
            is_abstract,
            structure_type,
            base_data_type,
            fields,
        })
    }

    pub fn type_id(&self) -> &NodeId {
        &self.type_id
    }

    pub fn xml_name(&self) -> &XmlQualifiedName {
        &self.xml_name
    }

    pub fn encodings(&self) -> &EncodingTriple {
        &self.encodings
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure_type
    }

    pub fn base_data_type(&self) -> &NodeId {
        &self.base_data_type
    }

    pub fn fields(&self) -> &[StructureFieldDescription] {
        &self.fields
    }

    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&StructureFieldDescription> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn fields_can_have_subtyped_values(&self) -> bool {
        self.structure_type.allows_subtyped_values()
    }

    /// The definition this description was built from.
    pub fn to_definition(&self) -> StructureDefinition {
        StructureDefinition {
            default_encoding_id: self.encodings.binary.clone(),
            base_data_type: self.base_data_type.clone(),
            structure_type: self.structure_type as i32,
            fields: self.fields.iter().map(|f| f.field.clone()).collect(),
        }
    }
}
