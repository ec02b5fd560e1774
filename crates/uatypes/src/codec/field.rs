// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-field encode and decode.

use super::{Decoder, DescriptionLookup, Encoder};
use crate::builtin::BuiltInType;
use crate::description::{
    EnumDescription, StructureDescription, StructureFieldDescription, ValueRank,
};
use crate::error::{Error, Result};
use crate::types::{
    DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject, Guid, LocalizedText,
    NodeId, QualifiedName, StatusCode,
};
use crate::value::{Matrix, StructureValue, Value};
use std::borrow::Cow;
use std::sync::Arc;

const MATRIX_DIMENSIONS: &str = "Dimensions";
const MATRIX_ELEMENTS: &str = "Array";

/// What a field's data type encodes as.
#[derive(Debug, Clone)]
pub(crate) enum FieldKind {
    BuiltIn(BuiltInType),
    Structure(Arc<StructureDescription>),
    Enumeration(Arc<EnumDescription>),
}

impl FieldKind {
    pub(crate) fn of(data_type: &NodeId, lookup: &dyn DescriptionLookup) -> Result<Self> {
        match BuiltInType::from_data_type(data_type) {
            Some(BuiltInType::Null) => Err(Error::UnsupportedType(data_type.clone())),
            Some(kind) => Ok(Self::BuiltIn(kind)),
            None => {
                if let Some(description) = lookup.enumeration(data_type) {
                    Ok(Self::Enumeration(description))
                } else if let Some(description) = lookup.structure(data_type) {
                    Ok(Self::Structure(description))
                } else {
                    Err(Error::UnsupportedType(data_type.clone()))
                }
            }
        }
    }
}

/// Value written for a null of the given kind.
///
/// Strings, byte strings and xml keep their null; numerics encode as zero.
fn null_default(kind: BuiltInType) -> Value {
    match kind {
        BuiltInType::Null
        | BuiltInType::Variant
        | BuiltInType::String
        | BuiltInType::ByteString
        | BuiltInType::XmlElement => Value::Null,
        BuiltInType::Boolean => Value::Boolean(false),
        BuiltInType::SByte => Value::SByte(0),
        BuiltInType::Byte => Value::Byte(0),
        BuiltInType::Int16 => Value::Int16(0),
        BuiltInType::UInt16 => Value::UInt16(0),
        BuiltInType::Int32 => Value::Int32(0),
        BuiltInType::UInt32 => Value::UInt32(0),
        BuiltInType::Int64 => Value::Int64(0),
        BuiltInType::UInt64 => Value::UInt64(0),
        BuiltInType::Float => Value::Float(0.0),
        BuiltInType::Double => Value::Double(0.0),
        BuiltInType::DateTime => Value::DateTime(DateTime::MIN),
        BuiltInType::Guid => Value::Guid(Guid::nil()),
        BuiltInType::NodeId => Value::NodeId(NodeId::NULL),
        BuiltInType::ExpandedNodeId => Value::ExpandedNodeId(ExpandedNodeId::null()),
        BuiltInType::StatusCode => Value::StatusCode(StatusCode::GOOD),
        BuiltInType::QualifiedName => Value::QualifiedName(QualifiedName::default()),
        BuiltInType::LocalizedText => Value::LocalizedText(LocalizedText::default()),
        BuiltInType::ExtensionObject => Value::ExtensionObject(Box::new(ExtensionObject::null())),
        BuiltInType::DataValue => Value::DataValue(Box::new(DataValue::default())),
        BuiltInType::DiagnosticInfo => {
            Value::DiagnosticInfo(Box::new(DiagnosticInfo::default()))
        }
    }
}

impl StructureFieldDescription {
    /// Encode `value` as this field.
    ///
    /// `name_override` replaces the field name on the wire for this call.
    pub fn encode(
        &self,
        encoder: &mut dyn Encoder,
        value: &Value,
        name_override: Option<&str>,
        lookup: &dyn DescriptionLookup,
    ) -> Result<()> {
        let name = name_override.unwrap_or(self.name());
        let kind = FieldKind::of(self.data_type(), lookup)?;
        match self.value_rank()? {
            ValueRank::Scalar => encode_scalar(encoder, name, &kind, value, lookup),
            ValueRank::OneDimension => match value {
                Value::Null => {
                    encoder.begin_array(name, None)?;
                    encoder.end_array()
                }
                Value::Array(items) => encode_elements(encoder, name, &kind, items, lookup),
                other => Err(Error::mismatch(name, "Array", other.kind_name())),
            },
            ValueRank::Dimensions(rank) => {
                encoder.begin_object(name)?;
                match value {
                    Value::Null => {
                        encoder.begin_array(MATRIX_DIMENSIONS, None)?;
                        encoder.end_array()?;
                        encoder.begin_array(MATRIX_ELEMENTS, None)?;
                        encoder.end_array()?;
                    }
                    Value::Matrix(matrix) => {
                        if matrix.dimensions.len() != rank as usize || !matrix.is_consistent() {
                            return Err(Error::Encoding(format!(
                                "field '{}': matrix {:?} with {} values does not fit rank {}",
                                name,
                                matrix.dimensions,
                                matrix.values.len(),
                                rank
                            )));
                        }
                        let dimensions: Vec<Value> =
                            matrix.dimensions.iter().map(|d| Value::Int32(*d)).collect();
                        encode_elements(
                            encoder,
                            MATRIX_DIMENSIONS,
                            &FieldKind::BuiltIn(BuiltInType::Int32),
                            &dimensions,
                            lookup,
                        )?;
                        encode_elements(encoder, MATRIX_ELEMENTS, &kind, &matrix.values, lookup)?;
                    }
                    other => return Err(Error::mismatch(name, "Matrix", other.kind_name())),
                }
                encoder.end_object()
            }
        }
    }

    /// Decode this field.
    pub fn decode(
        &self,
        decoder: &mut dyn Decoder,
        name_override: Option<&str>,
        lookup: &dyn DescriptionLookup,
    ) -> Result<Value> {
        let name = name_override.unwrap_or(self.name());
        let kind = FieldKind::of(self.data_type(), lookup)?;
        match self.value_rank()? {
            ValueRank::Scalar => decode_scalar(decoder, name, &kind, lookup),
            ValueRank::OneDimension => Ok(match decode_elements(decoder, name, &kind, lookup)? {
                Some(items) => Value::Array(items),
                None => Value::Null,
            }),
            ValueRank::Dimensions(_) => {
                if !decoder.begin_object(name)? {
                    return Ok(Value::Null);
                }
                let dimensions = decode_elements(
                    decoder,
                    MATRIX_DIMENSIONS,
                    &FieldKind::BuiltIn(BuiltInType::Int32),
                    lookup,
                )?;
                let values = decode_elements(decoder, MATRIX_ELEMENTS, &kind, lookup)?;
                decoder.end_object()?;
                let (Some(dimensions), Some(values)) = (dimensions, values) else {
                    return Ok(Value::Null);
                };
                let dimensions = dimensions
                    .iter()
                    .map(|d| {
                        d.as_i32()
                            .ok_or_else(|| Error::Decoding(format!("bad dimension in '{}'", name)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let matrix = Matrix::new(dimensions, values);
                if !matrix.is_consistent() {
                    return Err(Error::Decoding(format!(
                        "field '{}': matrix dimensions {:?} do not match {} values",
                        name,
                        matrix.dimensions,
                        matrix.values.len()
                    )));
                }
                Ok(Value::Matrix(matrix))
            }
        }
    }
}

fn encode_elements(
    encoder: &mut dyn Encoder,
    name: &str,
    kind: &FieldKind,
    items: &[Value],
    lookup: &dyn DescriptionLookup,
) -> Result<()> {
    encoder.begin_array(name, Some(items.len()))?;
    for item in items {
        encode_scalar(encoder, "", kind, item, lookup)?;
    }
    encoder.end_array()
}

fn decode_elements(
    decoder: &mut dyn Decoder,
    name: &str,
    kind: &FieldKind,
    lookup: &dyn DescriptionLookup,
) -> Result<Option<Vec<Value>>> {
    let Some(len) = decoder.begin_array(name)? else {
        decoder.end_array()?;
        return Ok(None);
    };
    let mut items = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        items.push(decode_scalar(decoder, "", kind, lookup)?);
    }
    decoder.end_array()?;
    Ok(Some(items))
}

fn encode_scalar(
    encoder: &mut dyn Encoder,
    name: &str,
    kind: &FieldKind,
    value: &Value,
    lookup: &dyn DescriptionLookup,
) -> Result<()> {
    match kind {
        FieldKind::BuiltIn(builtin) => {
            let value = match value {
                Value::Null => Cow::Owned(null_default(*builtin)),
                Value::Enumeration(e) if *builtin == BuiltInType::Int32 => {
                    Cow::Owned(Value::Int32(e.code))
                }
                other if other.matches_kind(*builtin) => Cow::Borrowed(other),
                other => return Err(Error::mismatch(name, builtin, other.kind_name())),
            };
            encoder.write_value(name, *builtin, &value)
        }
        FieldKind::Enumeration(_) => match value {
            Value::Enumeration(e) if e.symbol.is_some() => match encoder.enum_extension() {
                Some(extension) => extension.write_enumerated(name, e),
                None => encoder.write_value(name, BuiltInType::Int32, &Value::Int32(e.code)),
            },
            Value::Null => encoder.write_value(name, BuiltInType::Int32, &Value::Int32(0)),
            other => match other.as_i32() {
                Some(code) => encoder.write_value(name, BuiltInType::Int32, &Value::Int32(code)),
                None => Err(Error::mismatch(name, "Enumeration", other.kind_name())),
            },
        },
        FieldKind::Structure(description) => {
            let empty;
            let structure = match value {
                Value::Structure(s) => s.as_ref(),
                Value::Null => {
                    empty = StructureValue::new(description.type_id().clone());
                    &empty
                }
                other => return Err(Error::mismatch(name, "Structure", other.kind_name())),
            };
            encoder.begin_object(name)?;
            description.encode(encoder, structure, lookup)?;
            encoder.end_object()
        }
    }
}

fn decode_scalar(
    decoder: &mut dyn Decoder,
    name: &str,
    kind: &FieldKind,
    lookup: &dyn DescriptionLookup,
) -> Result<Value> {
    match kind {
        FieldKind::BuiltIn(builtin) => decoder.read_value(name, *builtin),
        FieldKind::Enumeration(description) => {
            if let Some(extension) = decoder.enum_extension() {
                return Ok(extension
                    .read_enumerated(name, description)?
                    .map(Value::Enumeration)
                    .unwrap_or(Value::Null));
            }
            let code = decoder.read_value(name, BuiltInType::Int32)?;
            let code = code
                .as_i32()
                .ok_or_else(|| Error::mismatch(name, "Int32", code.kind_name()))?;
            Ok(Value::Enumeration(description.value_of(code)))
        }
        FieldKind::Structure(description) => {
            if !decoder.begin_object(name)? {
                return Ok(Value::Null);
            }
            let structure = description.decode(decoder, lookup)?;
            decoder.end_object()?;
            Ok(Value::Structure(Box::new(structure)))
        }
    }
}
