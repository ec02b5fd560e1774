// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw data type definitions as read from a server or a legacy dictionary.
//!
//! Nothing here is validated. `description` turns these into validated,
//! immutable descriptions.

use crate::types::{LocalizedText, NodeId};
use serde::{Deserialize, Serialize};

/// Value rank of a scalar field.
pub const VALUE_RANK_SCALAR: i32 = -1;
/// Value rank of a one-dimensional array field.
pub const VALUE_RANK_ONE_DIMENSION: i32 = 1;

/// One field of a structure definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureField {
    pub name: String,
    pub description: Option<LocalizedText>,
    pub data_type: NodeId,
    pub value_rank: i32,
    pub array_dimensions: Vec<u32>,
    pub max_string_length: u32,
    pub is_optional: bool,
}

impl StructureField {
    /// A mandatory scalar field.
    pub fn new(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_type,
            value_rank: VALUE_RANK_SCALAR,
            array_dimensions: Vec::new(),
            max_string_length: 0,
            is_optional: false,
        }
    }

    pub fn with_value_rank(mut self, value_rank: i32) -> Self {
        self.value_rank = value_rank;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// Structure definition; `structure_type` is the raw wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDefinition {
    pub default_encoding_id: NodeId,
    pub base_data_type: NodeId,
    pub structure_type: i32,
    pub fields: Vec<StructureField>,
}

impl StructureDefinition {
    pub fn new(structure_type: i32, fields: Vec<StructureField>) -> Self {
        Self {
            default_encoding_id: NodeId::NULL,
            base_data_type: NodeId::NULL,
            structure_type,
            fields,
        }
    }
}

/// One symbol of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumField {
    pub name: String,
    pub value: i64,
    pub display_name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
}

impl EnumField {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            display_name: None,
            description: None,
        }
    }
}

/// Enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub fields: Vec<EnumField>,
    /// Values are bit flags rather than a discrete set.
    pub is_option_set: bool,
}

impl EnumDefinition {
    pub fn new(fields: Vec<EnumField>) -> Self {
        Self {
            fields,
            is_option_set: false,
        }
    }
}

/// Definition body of a data type node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTypeDefinition {
    Structure(StructureDefinition),
    Enum(EnumDefinition),
}
