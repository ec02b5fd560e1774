// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The closed set of built-in wire primitive kinds.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in wire kinds, numbered as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BuiltInType {
    Null = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

impl BuiltInType {
    /// Decode the wire tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Null,
            1 => Self::Boolean,
            2 => Self::SByte,
            3 => Self::Byte,
            4 => Self::Int16,
            5 => Self::UInt16,
            6 => Self::Int32,
            7 => Self::UInt32,
            8 => Self::Int64,
            9 => Self::UInt64,
            10 => Self::Float,
            11 => Self::Double,
            12 => Self::String,
            13 => Self::DateTime,
            14 => Self::Guid,
            15 => Self::ByteString,
            16 => Self::XmlElement,
            17 => Self::NodeId,
            18 => Self::ExpandedNodeId,
            19 => Self::StatusCode,
            20 => Self::QualifiedName,
            21 => Self::LocalizedText,
            22 => Self::ExtensionObject,
            23 => Self::DataValue,
            24 => Self::Variant,
            25 => Self::DiagnosticInfo,
            _ => return None,
        })
    }

    /// Built-in kind used to encode values of the given data type.
    ///
    /// Covers the built-in data types themselves, the abstract roots and the
    /// namespace 0 subtypes of built-ins. Any other id is a user type.
    pub fn from_data_type(id: &NodeId) -> Option<Self> {
        let value = id.as_ns0_numeric()?;
        if value <= 25 {
            return match value {
                // Structure (22) is the abstract root of encoded structures.
                24 => Some(Self::Variant),
                v => Self::from_u8(v as u8),
            };
        }
        Some(match value {
            26..=28 => Self::Variant,
            29 => Self::Int32,
            30 | 2000..=2003 | 16307 => Self::ByteString,
            50 => Self::ExtensionObject,
            290 => Self::Double,
            288 | 289 | 20998 => Self::UInt32,
            291 | 292 | 295 | 12877..=12881 => Self::String,
            293 | 294 => Self::DateTime,
            _ => return None,
        })
    }

    /// Whether `from_data_type` maps the id onto a built-in kind.
    pub fn is_builtin_data_type(id: &NodeId) -> bool {
        Self::from_data_type(id).is_some()
    }
}

impl fmt::Display for BuiltInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ids::data_types;

    #[test]
    fn test_builtin_ids_map_to_kinds() {
        assert_eq!(
            BuiltInType::from_data_type(&data_types::UINT32),
            Some(BuiltInType::UInt32)
        );
        assert_eq!(
            BuiltInType::from_data_type(&data_types::STRUCTURE),
            Some(BuiltInType::ExtensionObject)
        );
        assert_eq!(
            BuiltInType::from_data_type(&data_types::BASE_DATA_TYPE),
            Some(BuiltInType::Variant)
        );
        assert_eq!(
            BuiltInType::from_data_type(&NodeId::NULL),
            Some(BuiltInType::Null)
        );
    }

    #[test]
    fn test_ns0_subtypes_use_parent_kind() {
        assert_eq!(
            BuiltInType::from_data_type(&data_types::DURATION),
            Some(BuiltInType::Double)
        );
        assert_eq!(
            BuiltInType::from_data_type(&data_types::UTC_TIME),
            Some(BuiltInType::DateTime)
        );
        assert_eq!(
            BuiltInType::from_data_type(&data_types::LOCALE_ID),
            Some(BuiltInType::String)
        );
    }

    #[test]
    fn test_user_types_are_not_builtin() {
        assert_eq!(BuiltInType::from_data_type(&NodeId::numeric(2, 1)), None);
        assert_eq!(BuiltInType::from_data_type(&NodeId::numeric(0, 884)), None);
    }
}
