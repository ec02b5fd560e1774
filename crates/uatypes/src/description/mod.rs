// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validated, immutable type descriptions.
//!
//! A description is built once from a raw definition (server metadata or a
//! legacy dictionary), validated, and then shared through `Arc` by every
//! identifier it is registered under: the type id and each encoding id.

mod enumeration;
mod structure;

pub use enumeration::{EnumDescription, EnumToken};
pub use structure::{StructureDescription, StructureFieldDescription};

use crate::error::{Error, Result};
use crate::types::{NodeId, XmlQualifiedName};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// StructureType
// ============================================================================

/// Layout kind of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum StructureType {
    Structure = 0,
    StructureWithOptionalFields = 1,
    Union = 2,
    StructureWithSubtypedValues = 3,
    UnionWithSubtypedValues = 4,
}

impl StructureType {
    pub fn is_union(self) -> bool {
        matches!(self, Self::Union | Self::UnionWithSubtypedValues)
    }

    pub fn has_optional_fields(self) -> bool {
        matches!(self, Self::StructureWithOptionalFields)
    }

    /// Field values may be instances of a subtype of the declared field type.
    pub fn allows_subtyped_values(self) -> bool {
        matches!(
            self,
            Self::StructureWithSubtypedValues | Self::UnionWithSubtypedValues
        )
    }
}

impl TryFrom<i32> for StructureType {
    type Error = Error;

    fn try_from(tag: i32) -> Result<Self> {
        Ok(match tag {
            0 => Self::Structure,
            1 => Self::StructureWithOptionalFields,
            2 => Self::Union,
            3 => Self::StructureWithSubtypedValues,
            4 => Self::UnionWithSubtypedValues,
            other => {
                return Err(Error::InvalidDefinition(format!(
                    "unknown structure type {}",
                    other
                )))
            }
        })
    }
}

// ============================================================================
// ValueRank
// ============================================================================

/// Shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueRank {
    Scalar,
    OneDimension,
    /// Two or more dimensions.
    Dimensions(u32),
}

impl ValueRank {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Scalar => -1,
            Self::OneDimension => 1,
            Self::Dimensions(n) => n as i32,
        }
    }
}

impl TryFrom<i32> for ValueRank {
    type Error = Error;

    fn try_from(rank: i32) -> Result<Self> {
        match rank {
            -1 => Ok(Self::Scalar),
            1 => Ok(Self::OneDimension),
            n if n > 1 => Ok(Self::Dimensions(n as u32)),
            other => Err(Error::UnsupportedValueRank(other)),
        }
    }
}

// ============================================================================
// EncodingTriple
// ============================================================================

/// Encoding node ids of one type. Null means "not known".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EncodingTriple {
    pub binary: NodeId,
    pub xml: NodeId,
    pub json: NodeId,
}

impl EncodingTriple {
    pub fn new(binary: NodeId, xml: NodeId, json: NodeId) -> Self {
        Self { binary, xml, json }
    }

    pub fn binary_only(binary: NodeId) -> Self {
        Self {
            binary,
            ..Self::default()
        }
    }

    /// The non-null encoding ids.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        [&self.binary, &self.xml, &self.json]
            .into_iter()
            .filter(|id| !id.is_null())
    }
}

// ============================================================================
// DataTypeDescription
// ============================================================================

/// A resolved structure or enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DataTypeDescription {
    Structure(Arc<StructureDescription>),
    Enum(Arc<EnumDescription>),
}

impl DataTypeDescription {
    pub fn type_id(&self) -> &NodeId {
        match self {
            Self::Structure(s) => s.type_id(),
            Self::Enum(e) => e.type_id(),
        }
    }

    pub fn xml_name(&self) -> &XmlQualifiedName {
        match self {
            Self::Structure(s) => s.xml_name(),
            Self::Enum(e) => e.xml_name(),
        }
    }

    pub fn encodings(&self) -> &EncodingTriple {
        match self {
            Self::Structure(s) => s.encodings(),
            Self::Enum(e) => e.encodings(),
        }
    }

    pub fn as_structure(&self) -> Option<&Arc<StructureDescription>> {
        match self {
            Self::Structure(s) => Some(s),
            Self::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Arc<EnumDescription>> {
        match self {
            Self::Enum(e) => Some(e),
            Self::Structure(_) => None,
        }
    }

    /// True when both handles point at the same published instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Structure(a), Self::Structure(b)) => Arc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<StructureDescription> for DataTypeDescription {
    fn from(value: StructureDescription) -> Self {
        Self::Structure(Arc::new(value))
    }
}

impl From<EnumDescription> for DataTypeDescription {
    fn from(value: EnumDescription) -> Self {
        Self::Enum(Arc::new(value))
    }
}

impl fmt::Display for DataTypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(s) => write!(
                f,
                "{} ({}, {:?}, {} fields)",
                s.xml_name(),
                s.type_id(),
                s.structure_type(),
                s.fields().len()
            ),
            Self::Enum(e) => write!(
                f,
                "{} ({}, enum, {} values)",
                e.xml_name(),
                e.type_id(),
                e.fields().len()
            ),
        }
    }
}
