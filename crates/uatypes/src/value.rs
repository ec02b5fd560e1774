// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values.

use crate::builtin::BuiltInType;
use crate::types::{
    DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject, Guid, LocalizedText,
    NodeId, QualifiedName, StatusCode,
};

/// A value that can be held by any structure field.
///
/// A field of kind `Variant` holds any of these directly; `Null` inside such
/// a field is the null variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,

    // Primitives
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime),
    Guid(Guid),
    ByteString(Vec<u8>),
    XmlElement(String),

    // Identifiers and status
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),

    // Composites
    ExtensionObject(Box<ExtensionObject>),
    DataValue(Box<DataValue>),
    DiagnosticInfo(Box<DiagnosticInfo>),
    Enumeration(EnumValue),
    Structure(Box<StructureValue>),
    Array(Vec<Value>),
    Matrix(Matrix),
}

/// An enumeration value: the integer code and, when known, its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub symbol: Option<String>,
    pub code: i32,
}

impl EnumValue {
    pub fn new(symbol: impl Into<String>, code: i32) -> Self {
        Self {
            symbol: Some(symbol.into()),
            code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        Self { symbol: None, code }
    }
}

/// A multi-dimensional array in row-major order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    pub dimensions: Vec<i32>,
    pub values: Vec<Value>,
}

impl Matrix {
    pub fn new(dimensions: Vec<i32>, values: Vec<Value>) -> Self {
        Self { dimensions, values }
    }

    /// Element count implied by the dimensions.
    pub fn expected_len(&self) -> usize {
        if self.dimensions.is_empty() {
            return 0;
        }
        self.dimensions
            .iter()
            .map(|d| (*d).max(0) as usize)
            .product()
    }

    pub fn is_consistent(&self) -> bool {
        self.expected_len() == self.values.len()
    }
}

/// Field values of a structure in declaration order.
///
/// Names may repeat; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureValue {
    pub type_id: NodeId,
    pub fields: Vec<(String, Value)>,
}

impl StructureValue {
    pub fn new(type_id: NodeId) -> Self {
        Self {
            type_id,
            fields: Vec::new(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Replace the first field with this name, or append.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Built-in kind this value carries when placed inside a variant.
    pub fn builtin_type(&self) -> Option<BuiltInType> {
        Some(match self {
            Self::Null => BuiltInType::Null,
            Self::Boolean(_) => BuiltInType::Boolean,
            Self::SByte(_) => BuiltInType::SByte,
            Self::Byte(_) => BuiltInType::Byte,
            Self::Int16(_) => BuiltInType::Int16,
            Self::UInt16(_) => BuiltInType::UInt16,
            Self::Int32(_) | Self::Enumeration(_) => BuiltInType::Int32,
            Self::UInt32(_) => BuiltInType::UInt32,
            Self::Int64(_) => BuiltInType::Int64,
            Self::UInt64(_) => BuiltInType::UInt64,
            Self::Float(_) => BuiltInType::Float,
            Self::Double(_) => BuiltInType::Double,
            Self::String(_) => BuiltInType::String,
            Self::DateTime(_) => BuiltInType::DateTime,
            Self::Guid(_) => BuiltInType::Guid,
            Self::ByteString(_) => BuiltInType::ByteString,
            Self::XmlElement(_) => BuiltInType::XmlElement,
            Self::NodeId(_) => BuiltInType::NodeId,
            Self::ExpandedNodeId(_) => BuiltInType::ExpandedNodeId,
            Self::StatusCode(_) => BuiltInType::StatusCode,
            Self::QualifiedName(_) => BuiltInType::QualifiedName,
            Self::LocalizedText(_) => BuiltInType::LocalizedText,
            Self::ExtensionObject(_) => BuiltInType::ExtensionObject,
            Self::DataValue(_) => BuiltInType::DataValue,
            Self::DiagnosticInfo(_) => BuiltInType::DiagnosticInfo,
            Self::Structure(_) | Self::Array(_) | Self::Matrix(_) => return None,
        })
    }

    /// True when the value can be written under the given built-in kind.
    pub fn matches_kind(&self, kind: BuiltInType) -> bool {
        match (self, kind) {
            (_, BuiltInType::Variant) => true,
            // Nullable wire kinds accept an explicit null.
            (
                Self::Null,
                BuiltInType::String | BuiltInType::ByteString | BuiltInType::XmlElement,
            ) => true,
            (Self::Enumeration(_), BuiltInType::Int32) => true,
            (v, k) => v.builtin_type() == Some(k),
        }
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "Structure",
            Self::Array(_) => "Array",
            Self::Matrix(_) => "Matrix",
            Self::Enumeration(_) => "Enumeration",
            other => match other.builtin_type() {
                Some(BuiltInType::Null) | None => "Null",
                Some(BuiltInType::Boolean) => "Boolean",
                Some(BuiltInType::SByte) => "SByte",
                Some(BuiltInType::Byte) => "Byte",
                Some(BuiltInType::Int16) => "Int16",
                Some(BuiltInType::UInt16) => "UInt16",
                Some(BuiltInType::Int32) => "Int32",
                Some(BuiltInType::UInt32) => "UInt32",
                Some(BuiltInType::Int64) => "Int64",
                Some(BuiltInType::UInt64) => "UInt64",
                Some(BuiltInType::Float) => "Float",
                Some(BuiltInType::Double) => "Double",
                Some(BuiltInType::String) => "String",
                Some(BuiltInType::DateTime) => "DateTime",
                Some(BuiltInType::Guid) => "Guid",
                Some(BuiltInType::ByteString) => "ByteString",
                Some(BuiltInType::XmlElement) => "XmlElement",
                Some(BuiltInType::NodeId) => "NodeId",
                Some(BuiltInType::ExpandedNodeId) => "ExpandedNodeId",
                Some(BuiltInType::StatusCode) => "StatusCode",
                Some(BuiltInType::QualifiedName) => "QualifiedName",
                Some(BuiltInType::LocalizedText) => "LocalizedText",
                Some(BuiltInType::ExtensionObject) => "ExtensionObject",
                Some(BuiltInType::DataValue) => "DataValue",
                Some(BuiltInType::Variant) => "Variant",
                Some(BuiltInType::DiagnosticInfo) => "DiagnosticInfo",
            },
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32; enumerations yield their code.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            Self::Enumeration(e) => Some(e.code),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::XmlElement(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureValue> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

// From implementations for convenient construction
macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    DateTime => DateTime,
    Guid => Guid,
    Vec<u8> => ByteString,
    NodeId => NodeId,
    ExpandedNodeId => ExpandedNodeId,
    StatusCode => StatusCode,
    QualifiedName => QualifiedName,
    LocalizedText => LocalizedText,
    EnumValue => Enumeration,
    Vec<Value> => Array,
    Matrix => Matrix,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<StructureValue> for Value {
    fn from(v: StructureValue) -> Self {
        Self::Structure(Box::new(v))
    }
}

impl From<ExtensionObject> for Value {
    fn from(v: ExtensionObject) -> Self {
        Self::ExtensionObject(Box::new(v))
    }
}

impl From<DataValue> for Value {
    fn from(v: DataValue) -> Self {
        Self::DataValue(Box::new(v))
    }
}

impl From<DiagnosticInfo> for Value {
    fn from(v: DiagnosticInfo) -> Self {
        Self::DiagnosticInfo(Box::new(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_primitives() {
        assert_eq!(Value::from(1u32), Value::UInt32(1));
        assert_eq!(Value::from("a"), Value::String("a".into()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::ByteString(vec![1, 2]));
    }

    #[test]
    fn test_matches_kind() {
        assert!(Value::UInt32(1).matches_kind(BuiltInType::UInt32));
        assert!(!Value::Int32(1).matches_kind(BuiltInType::UInt32));
        assert!(Value::Null.matches_kind(BuiltInType::String));
        assert!(!Value::Null.matches_kind(BuiltInType::Int32));
        assert!(Value::Double(1.0).matches_kind(BuiltInType::Variant));
        assert!(Value::Enumeration(EnumValue::from_code(3)).matches_kind(BuiltInType::Int32));
    }

    #[test]
    fn test_structure_value_duplicate_names() {
        let mut s = StructureValue::new(NodeId::numeric(1, 1))
            .with("A", 1i32)
            .with("A", 2i32);
        assert_eq!(s.get("A"), Some(&Value::Int32(1)));
        s.set("A", 5i32);
        assert_eq!(s.fields.len(), 2);
        assert_eq!(s.fields[0].1, Value::Int32(5));
        assert_eq!(s.fields[1].1, Value::Int32(2));
    }

    #[test]
    fn test_matrix_consistency() {
        let m = Matrix::new(vec![2, 2], vec![Value::Int32(0); 4]);
        assert!(m.is_consistent());
        let bad = Matrix::new(vec![2, 3], vec![Value::Int32(0); 4]);
        assert!(!bad.is_consistent());
    }
}
