// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA binary encoding of built-in values.
//!
//! Little-endian throughout. Strings, byte strings and arrays carry an Int32
//! length prefix, `-1` meaning null. Names and object scopes have no wire
//! representation.

use super::{Decoder, Encoder};
use crate::builtin::BuiltInType;
use crate::error::{Error, Result};
use crate::types::{
    DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject, ExtensionObjectBody,
    Guid, Identifier, LocalizedText, NodeId, QualifiedName, StatusCode,
};
use crate::value::{Matrix, Value};

/// Nesting limit for variants, data values and diagnostic infos.
const MAX_DEPTH: usize = 64;

// NodeId encoding bytes
const NODE_ID_TWO_BYTE: u8 = 0x00;
const NODE_ID_FOUR_BYTE: u8 = 0x01;
const NODE_ID_NUMERIC: u8 = 0x02;
const NODE_ID_STRING: u8 = 0x03;
const NODE_ID_GUID: u8 = 0x04;
const NODE_ID_OPAQUE: u8 = 0x05;
const NODE_ID_SERVER_INDEX: u8 = 0x40;
const NODE_ID_NAMESPACE_URI: u8 = 0x80;

// Variant mask bits
const VARIANT_DIMENSIONS: u8 = 0x40;
const VARIANT_ARRAY: u8 = 0x80;
const VARIANT_TYPE_MASK: u8 = 0x3F;

/// Writes built-in values into a byte buffer.
#[derive(Debug, Default)]
pub struct BinaryEncoder {
    buffer: Vec<u8>,
    depth: usize,
}

impl BinaryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn put_length(&mut self, len: Option<usize>) -> Result<()> {
        let len = match len {
            None => -1,
            Some(n) => i32::try_from(n)
                .map_err(|_| Error::Encoding(format!("length {} exceeds Int32", n)))?,
        };
        self.put(&len.to_le_bytes());
        Ok(())
    }

    fn put_string(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            None => self.put_length(None),
            Some(s) => {
                self.put_length(Some(s.len()))?;
                self.put(s.as_bytes());
                Ok(())
            }
        }
    }

    fn put_bytes(&mut self, value: Option<&[u8]>) -> Result<()> {
        match value {
            None => self.put_length(None),
            Some(b) => {
                self.put_length(Some(b.len()))?;
                self.put(b);
                Ok(())
            }
        }
    }

    fn put_guid(&mut self, guid: &Guid) {
        let (d1, d2, d3, d4) = guid.as_fields();
        self.put(&d1.to_le_bytes());
        self.put(&d2.to_le_bytes());
        self.put(&d3.to_le_bytes());
        self.put(d4);
    }

    fn put_node_id(&mut self, id: &NodeId, flags: u8) -> Result<()> {
        match &id.identifier {
            Identifier::Numeric(v) if id.namespace == 0 && *v <= 0xFF && flags == 0 => {
                self.put(&[NODE_ID_TWO_BYTE, *v as u8]);
            }
            Identifier::Numeric(v) if id.namespace <= 0xFF && *v <= 0xFFFF => {
                self.put(&[NODE_ID_FOUR_BYTE | flags, id.namespace as u8]);
                self.put(&(*v as u16).to_le_bytes());
            }
            Identifier::Numeric(v) => {
                self.put(&[NODE_ID_NUMERIC | flags]);
                self.put(&id.namespace.to_le_bytes());
                self.put(&v.to_le_bytes());
            }
            Identifier::String(s) => {
                self.put(&[NODE_ID_STRING | flags]);
                self.put(&id.namespace.to_le_bytes());
                self.put_string(Some(s))?;
            }
            Identifier::Guid(g) => {
                self.put(&[NODE_ID_GUID | flags]);
                self.put(&id.namespace.to_le_bytes());
                self.put_guid(g);
            }
            Identifier::Opaque(b) => {
                self.put(&[NODE_ID_OPAQUE | flags]);
                self.put(&id.namespace.to_le_bytes());
                self.put_bytes(Some(b))?;
            }
        }
        Ok(())
    }

    fn put_expanded_node_id(&mut self, id: &ExpandedNodeId) -> Result<()> {
        let mut flags = 0;
        if id.namespace_uri.is_some() {
            flags |= NODE_ID_NAMESPACE_URI;
        }
        if id.server_index != 0 {
            flags |= NODE_ID_SERVER_INDEX;
        }
        self.put_node_id(&id.node_id, flags)?;
        if let Some(uri) = &id.namespace_uri {
            self.put_string(Some(uri))?;
        }
        if id.server_index != 0 {
            self.put(&id.server_index.to_le_bytes());
        }
        Ok(())
    }

    fn put_localized_text(&mut self, text: &LocalizedText) -> Result<()> {
        let mut mask = 0u8;
        if text.locale.is_some() {
            mask |= 0x01;
        }
        if text.text.is_some() {
            mask |= 0x02;
        }
        self.put(&[mask]);
        if let Some(locale) = &text.locale {
            self.put_string(Some(locale))?;
        }
        if let Some(t) = &text.text {
            self.put_string(Some(t))?;
        }
        Ok(())
    }

    fn put_extension_object(&mut self, object: &ExtensionObject) -> Result<()> {
        self.put_node_id(&object.type_id, 0)?;
        match &object.body {
            ExtensionObjectBody::None => self.put(&[0x00]),
            ExtensionObjectBody::Binary(bytes) => {
                self.put(&[0x01]);
                self.put_bytes(Some(bytes))?;
            }
            ExtensionObjectBody::Xml(xml) => {
                self.put(&[0x02]);
                self.put_string(Some(xml))?;
            }
        }
        Ok(())
    }

    fn put_data_value(&mut self, value: &DataValue) -> Result<()> {
        let mut mask = 0u8;
        if value.value.is_some() {
            mask |= 0x01;
        }
        if value.status.is_some() {
            mask |= 0x02;
        }
        if value.source_timestamp.is_some() {
            mask |= 0x04;
        }
        if value.server_timestamp.is_some() {
            mask |= 0x08;
        }
        if value.source_picoseconds.is_some() {
            mask |= 0x10;
        }
        if value.server_picoseconds.is_some() {
            mask |= 0x20;
        }
        self.put(&[mask]);
        if let Some(v) = &value.value {
            self.put_variant(v)?;
        }
        if let Some(status) = value.status {
            self.put(&status.0.to_le_bytes());
        }
        if let Some(ts) = value.source_timestamp {
            self.put(&ts.ticks().to_le_bytes());
        }
        if let Some(ps) = value.source_picoseconds {
            self.put(&ps.to_le_bytes());
        }
        if let Some(ts) = value.server_timestamp {
            self.put(&ts.ticks().to_le_bytes());
        }
        if let Some(ps) = value.server_picoseconds {
            self.put(&ps.to_le_bytes());
        }
        Ok(())
    }

    fn put_diagnostic_info(&mut self, info: &DiagnosticInfo) -> Result<()> {
        self.enter()?;
        let mut mask = 0u8;
        let flags = [
            (info.symbolic_id.is_some(), 0x01),
            (info.namespace_uri.is_some(), 0x02),
            (info.localized_text.is_some(), 0x04),
            (info.locale.is_some(), 0x08),
            (info.additional_info.is_some(), 0x10),
            (info.inner_status_code.is_some(), 0x20),
            (info.inner_diagnostic_info.is_some(), 0x40),
        ];
        for (set, bit) in flags {
            if set {
                mask |= bit;
            }
        }
        self.put(&[mask]);
        for v in [info.symbolic_id, info.namespace_uri, info.locale, info.localized_text]
            .into_iter()
            .flatten()
        {
            self.put(&v.to_le_bytes());
        }
        if let Some(additional) = &info.additional_info {
            self.put_string(Some(additional))?;
        }
        if let Some(status) = info.inner_status_code {
            self.put(&status.0.to_le_bytes());
        }
        if let Some(inner) = &info.inner_diagnostic_info {
            self.put_diagnostic_info(inner)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn put_variant(&mut self, value: &Value) -> Result<()> {
        self.enter()?;
        match value {
            Value::Null => self.put(&[0x00]),
            Value::Array(items) => {
                let kind = common_kind(items);
                self.put(&[kind as u8 | VARIANT_ARRAY]);
                self.put_variant_elements(kind, items)?;
            }
            Value::Matrix(matrix) => {
                let kind = common_kind(&matrix.values);
                self.put(&[kind as u8 | VARIANT_ARRAY | VARIANT_DIMENSIONS]);
                self.put_variant_elements(kind, &matrix.values)?;
                self.put_length(Some(matrix.dimensions.len()))?;
                for d in &matrix.dimensions {
                    self.put(&d.to_le_bytes());
                }
            }
            scalar => {
                let kind = scalar.builtin_type().ok_or_else(|| {
                    Error::Encoding(format!("{} cannot be held by a variant", scalar.kind_name()))
                })?;
                self.put(&[kind as u8]);
                self.put_builtin(kind, scalar)?;
            }
        }
        self.depth -= 1;
        Ok(())
    }

    fn put_variant_elements(&mut self, kind: BuiltInType, items: &[Value]) -> Result<()> {
        self.put_length(Some(items.len()))?;
        for item in items {
            if kind == BuiltInType::Variant {
                self.put_variant(item)?;
            } else {
                self.put_builtin(kind, item)?;
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::Encoding("nesting too deep".into()));
        }
        Ok(())
    }

    fn put_builtin(&mut self, kind: BuiltInType, value: &Value) -> Result<()> {
        let mismatch = || Error::mismatch("", kind, value.kind_name());
        match (kind, value) {
            (BuiltInType::Variant, v) => self.put_variant(v)?,
            (BuiltInType::Boolean, Value::Boolean(v)) => self.put(&[u8::from(*v)]),
            (BuiltInType::SByte, Value::SByte(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Byte, Value::Byte(v)) => self.put(&[*v]),
            (BuiltInType::Int16, Value::Int16(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::UInt16, Value::UInt16(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Int32, Value::Int32(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Int32, Value::Enumeration(e)) => self.put(&e.code.to_le_bytes()),
            (BuiltInType::UInt32, Value::UInt32(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Int64, Value::Int64(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::UInt64, Value::UInt64(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Float, Value::Float(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::Double, Value::Double(v)) => self.put(&v.to_le_bytes()),
            (BuiltInType::String, Value::String(s)) => self.put_string(Some(s))?,
            (BuiltInType::XmlElement, Value::XmlElement(s)) => self.put_string(Some(s))?,
            (BuiltInType::String | BuiltInType::XmlElement, Value::Null) => {
                self.put_string(None)?
            }
            (BuiltInType::ByteString, Value::ByteString(b)) => self.put_bytes(Some(b))?,
            (BuiltInType::ByteString, Value::Null) => self.put_bytes(None)?,
            (BuiltInType::DateTime, Value::DateTime(t)) => self.put(&t.ticks().to_le_bytes()),
            (BuiltInType::Guid, Value::Guid(g)) => self.put_guid(g),
            (BuiltInType::NodeId, Value::NodeId(id)) => self.put_node_id(id, 0)?,
            (BuiltInType::ExpandedNodeId, Value::ExpandedNodeId(id)) => {
                self.put_expanded_node_id(id)?
            }
            (BuiltInType::StatusCode, Value::StatusCode(s)) => self.put(&s.0.to_le_bytes()),
            (BuiltInType::QualifiedName, Value::QualifiedName(q)) => {
                self.put(&q.namespace.to_le_bytes());
                self.put_string(Some(&q.name))?;
            }
            (BuiltInType::LocalizedText, Value::LocalizedText(t)) => self.put_localized_text(t)?,
            (BuiltInType::ExtensionObject, Value::ExtensionObject(o)) => {
                self.put_extension_object(o)?
            }
            (BuiltInType::DataValue, Value::DataValue(v)) => self.put_data_value(v)?,
            (BuiltInType::DiagnosticInfo, Value::DiagnosticInfo(d)) => {
                self.put_diagnostic_info(d)?
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

/// Element kind of a variant array: the shared kind, or Variant.
fn common_kind(items: &[Value]) -> BuiltInType {
    let mut kinds = items.iter().map(Value::builtin_type);
    match kinds.next() {
        Some(Some(first)) if first != BuiltInType::Null && kinds.all(|k| k == Some(first)) => {
            first
        }
        _ => BuiltInType::Variant,
    }
}

impl Encoder for BinaryEncoder {
    fn write_value(&mut self, _name: &str, kind: BuiltInType, value: &Value) -> Result<()> {
        if kind == BuiltInType::Null {
            return Err(Error::UnsupportedType(NodeId::NULL));
        }
        self.put_builtin(kind, value)
    }

    fn begin_object(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self, _name: &str, len: Option<usize>) -> Result<()> {
        self.put_length(len)
    }

    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Reads built-in values from a byte slice.
#[derive(Debug)]
pub struct BinaryDecoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    depth: usize,
}

impl<'a> BinaryDecoder<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            depth: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::Decoding(format!(
                "buffer too small: need {} bytes, have {}",
                count,
                self.remaining()
            )));
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Length prefix; `None` for null. Lengths beyond the remaining input
    /// are rejected, every element takes at least one byte.
    fn length(&mut self) -> Result<Option<usize>> {
        let len = self.i32()?;
        if len < 0 {
            return Ok(None);
        }
        let len = len as usize;
        if len > self.remaining() {
            return Err(Error::Decoding(format!(
                "length {} exceeds remaining {} bytes",
                len,
                self.remaining()
            )));
        }
        Ok(Some(len))
    }

    fn bytes(&mut self) -> Result<Option<Vec<u8>>> {
        match self.length()? {
            None => Ok(None),
            Some(len) => Ok(Some(self.read_bytes(len)?.to_vec())),
        }
    }

    fn string(&mut self) -> Result<Option<String>> {
        match self.bytes()? {
            None => Ok(None),
            Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
        }
    }

    fn guid(&mut self) -> Result<Guid> {
        let d1 = self.u32()?;
        let d2 = self.u16()?;
        let d3 = self.u16()?;
        let d4 = self.read_array::<8>()?;
        Ok(Guid::from_fields(d1, d2, d3, &d4))
    }

    /// Node id plus the expanded-node-id flag bits of its encoding byte.
    fn node_id(&mut self) -> Result<(NodeId, u8)> {
        let encoding = self.u8()?;
        let flags = encoding & (NODE_ID_NAMESPACE_URI | NODE_ID_SERVER_INDEX);
        let id = match encoding & 0x3F {
            NODE_ID_TWO_BYTE => NodeId::numeric(0, u32::from(self.u8()?)),
            NODE_ID_FOUR_BYTE => {
                let namespace = u16::from(self.u8()?);
                NodeId::numeric(namespace, u32::from(self.u16()?))
            }
            NODE_ID_NUMERIC => {
                let namespace = self.u16()?;
                NodeId::numeric(namespace, self.u32()?)
            }
            NODE_ID_STRING => {
                let namespace = self.u16()?;
                let s = self.string()?.unwrap_or_default();
                NodeId::new(namespace, Identifier::String(s))
            }
            NODE_ID_GUID => {
                let namespace = self.u16()?;
                NodeId::new(namespace, Identifier::Guid(self.guid()?))
            }
            NODE_ID_OPAQUE => {
                let namespace = self.u16()?;
                let b = self.bytes()?.unwrap_or_default();
                NodeId::new(namespace, Identifier::Opaque(b))
            }
            other => {
                return Err(Error::Decoding(format!(
                    "invalid node id encoding 0x{:02x}",
                    other
                )))
            }
        };
        Ok((id, flags))
    }

    fn expanded_node_id(&mut self) -> Result<ExpandedNodeId> {
        let (node_id, flags) = self.node_id()?;
        let namespace_uri = if flags & NODE_ID_NAMESPACE_URI != 0 {
            self.string()?
        } else {
            None
        };
        let server_index = if flags & NODE_ID_SERVER_INDEX != 0 {
            self.u32()?
        } else {
            0
        };
        Ok(ExpandedNodeId {
            node_id,
            namespace_uri,
            server_index,
        })
    }

    fn localized_text(&mut self) -> Result<LocalizedText> {
        let mask = self.u8()?;
        let locale = if mask & 0x01 != 0 { self.string()? } else { None };
        let text = if mask & 0x02 != 0 { self.string()? } else { None };
        Ok(LocalizedText { locale, text })
    }

    fn extension_object(&mut self) -> Result<ExtensionObject> {
        let (type_id, _) = self.node_id()?;
        let body = match self.u8()? {
            0x00 => ExtensionObjectBody::None,
            0x01 => ExtensionObjectBody::Binary(self.bytes()?.unwrap_or_default()),
            0x02 => ExtensionObjectBody::Xml(self.string()?.unwrap_or_default()),
            other => {
                return Err(Error::Decoding(format!(
                    "invalid extension object encoding 0x{:02x}",
                    other
                )))
            }
        };
        Ok(ExtensionObject { type_id, body })
    }

    fn data_value(&mut self) -> Result<DataValue> {
        let mask = self.u8()?;
        let value = if mask & 0x01 != 0 {
            Some(self.variant()?)
        } else {
            None
        };
        let status = if mask & 0x02 != 0 {
            Some(StatusCode(self.u32()?))
        } else {
            None
        };
        let source_timestamp = if mask & 0x04 != 0 {
            Some(DateTime(self.i64()?))
        } else {
            None
        };
        let source_picoseconds = if mask & 0x10 != 0 {
            Some(self.u16()?)
        } else {
            None
        };
        let server_timestamp = if mask & 0x08 != 0 {
            Some(DateTime(self.i64()?))
        } else {
            None
        };
        let server_picoseconds = if mask & 0x20 != 0 {
            Some(self.u16()?)
        } else {
            None
        };
        Ok(DataValue {
            value,
            status,
            source_timestamp,
            source_picoseconds,
            server_timestamp,
            server_picoseconds,
        })
    }

    fn diagnostic_info(&mut self) -> Result<DiagnosticInfo> {
        self.enter()?;
        let mask = self.u8()?;
        let mut optional_i32 = |bit: u8| -> Result<Option<i32>> {
            if mask & bit != 0 {
                Ok(Some(self.i32()?))
            } else {
                Ok(None)
            }
        };
        let symbolic_id = optional_i32(0x01)?;
        let namespace_uri = optional_i32(0x02)?;
        let locale = optional_i32(0x08)?;
        let localized_text = optional_i32(0x04)?;
        let additional_info = if mask & 0x10 != 0 {
            self.string()?
        } else {
            None
        };
        let inner_status_code = if mask & 0x20 != 0 {
            Some(StatusCode(self.u32()?))
        } else {
            None
        };
        let inner_diagnostic_info = if mask & 0x40 != 0 {
            Some(Box::new(self.diagnostic_info()?))
        } else {
            None
        };
        self.depth -= 1;
        Ok(DiagnosticInfo {
            symbolic_id,
            namespace_uri,
            locale,
            localized_text,
            additional_info,
            inner_status_code,
            inner_diagnostic_info,
        })
    }

    fn variant(&mut self) -> Result<Value> {
        self.enter()?;
        let mask = self.u8()?;
        let tag = mask & VARIANT_TYPE_MASK;
        let kind = BuiltInType::from_u8(tag)
            .ok_or_else(|| Error::Decoding(format!("invalid variant type {}", tag)))?;
        let value = if mask & VARIANT_ARRAY == 0 {
            match kind {
                BuiltInType::Null => Value::Null,
                kind => self.builtin(kind)?,
            }
        } else {
            let items = match self.length()? {
                None => Vec::new(),
                Some(len) => {
                    let mut items = Vec::with_capacity(len);
                    for _ in 0..len {
                        items.push(self.builtin(kind)?);
                    }
                    items
                }
            };
            if mask & VARIANT_DIMENSIONS != 0 {
                let mut dimensions = Vec::new();
                if let Some(len) = self.length()? {
                    for _ in 0..len {
                        dimensions.push(self.i32()?);
                    }
                }
                Value::Matrix(Matrix::new(dimensions, items))
            } else {
                Value::Array(items)
            }
        };
        self.depth -= 1;
        Ok(value)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::Decoding("nesting too deep".into()));
        }
        Ok(())
    }

    fn builtin(&mut self, kind: BuiltInType) -> Result<Value> {
        Ok(match kind {
            BuiltInType::Null => return Err(Error::UnsupportedType(NodeId::NULL)),
            BuiltInType::Boolean => Value::Boolean(self.u8()? != 0),
            BuiltInType::SByte => Value::SByte(self.u8()? as i8),
            BuiltInType::Byte => Value::Byte(self.u8()?),
            BuiltInType::Int16 => Value::Int16(i16::from_le_bytes(self.read_array()?)),
            BuiltInType::UInt16 => Value::UInt16(self.u16()?),
            BuiltInType::Int32 => Value::Int32(self.i32()?),
            BuiltInType::UInt32 => Value::UInt32(self.u32()?),
            BuiltInType::Int64 => Value::Int64(self.i64()?),
            BuiltInType::UInt64 => Value::UInt64(u64::from_le_bytes(self.read_array()?)),
            BuiltInType::Float => Value::Float(f32::from_le_bytes(self.read_array()?)),
            BuiltInType::Double => Value::Double(f64::from_le_bytes(self.read_array()?)),
            BuiltInType::String => self.string()?.map_or(Value::Null, Value::String),
            BuiltInType::XmlElement => self.string()?.map_or(Value::Null, Value::XmlElement),
            BuiltInType::ByteString => self.bytes()?.map_or(Value::Null, Value::ByteString),
            BuiltInType::DateTime => Value::DateTime(DateTime(self.i64()?)),
            BuiltInType::Guid => Value::Guid(self.guid()?),
            BuiltInType::NodeId => Value::NodeId(self.node_id()?.0),
            BuiltInType::ExpandedNodeId => Value::ExpandedNodeId(self.expanded_node_id()?),
            BuiltInType::StatusCode => Value::StatusCode(StatusCode(self.u32()?)),
            BuiltInType::QualifiedName => {
                let namespace = self.u16()?;
                let name = self.string()?.unwrap_or_default();
                Value::QualifiedName(QualifiedName { namespace, name })
            }
            BuiltInType::LocalizedText => Value::LocalizedText(self.localized_text()?),
            BuiltInType::ExtensionObject => {
                Value::ExtensionObject(Box::new(self.extension_object()?))
            }
            BuiltInType::DataValue => Value::DataValue(Box::new(self.data_value()?)),
            BuiltInType::Variant => self.variant()?,
            BuiltInType::DiagnosticInfo => {
                Value::DiagnosticInfo(Box::new(self.diagnostic_info()?))
            }
        })
    }
}

impl Decoder for BinaryDecoder<'_> {
    fn read_value(&mut self, _name: &str, kind: BuiltInType) -> Result<Value> {
        self.builtin(kind)
    }

    fn begin_object(&mut self, _name: &str) -> Result<bool> {
        Ok(true)
    }

    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self, _name: &str) -> Result<Option<usize>> {
        self.length()
    }

    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(kind: BuiltInType, value: Value) -> Value {
        let mut encoder = BinaryEncoder::new();
        encoder.write_value("v", kind, &value).unwrap();
        let bytes = encoder.into_bytes();
        let mut decoder = BinaryDecoder::new(&bytes);
        let decoded = decoder.read_value("v", kind).unwrap();
        assert_eq!(decoder.remaining(), 0, "trailing bytes for {:?}", kind);
        decoded
    }

    #[test]
    fn test_primitive_layout() {
        let mut encoder = BinaryEncoder::new();
        encoder
            .write_value("", BuiltInType::UInt32, &Value::UInt32(0x0102_0304))
            .unwrap();
        encoder
            .write_value("", BuiltInType::String, &Value::from("ab"))
            .unwrap();
        encoder.write_value("", BuiltInType::String, &Value::Null).unwrap();
        assert_eq!(
            encoder.as_bytes(),
            &[4, 3, 2, 1, 2, 0, 0, 0, b'a', b'b', 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_node_id_forms() {
        for id in [
            NodeId::numeric(0, 24),
            NodeId::numeric(2, 5000),
            NodeId::numeric(300, 70_000),
            NodeId::string(2, "Pump"),
            NodeId::new(3, Identifier::Guid(Guid::from_u128(0x1234))),
            NodeId::new(4, Identifier::Opaque(vec![1, 2, 3])),
        ] {
            assert_eq!(
                round_trip(BuiltInType::NodeId, Value::NodeId(id.clone())),
                Value::NodeId(id)
            );
        }
        let mut encoder = BinaryEncoder::new();
        encoder
            .write_value("", BuiltInType::NodeId, &Value::NodeId(NodeId::numeric(0, 24)))
            .unwrap();
        assert_eq!(encoder.as_bytes(), &[0x00, 24]);
    }

    #[test]
    fn test_expanded_node_id_flags() {
        let id = ExpandedNodeId {
            node_id: NodeId::numeric(0, 5),
            namespace_uri: Some("urn:x".into()),
            server_index: 2,
        };
        assert_eq!(
            round_trip(BuiltInType::ExpandedNodeId, Value::ExpandedNodeId(id.clone())),
            Value::ExpandedNodeId(id)
        );
    }

    #[test]
    fn test_variant_arrays_and_matrices() {
        let array = Value::Array(vec![Value::Int16(1), Value::Int16(-2)]);
        assert_eq!(round_trip(BuiltInType::Variant, array.clone()), array);

        let mixed = Value::Array(vec![Value::Int16(1), Value::from("x"), Value::Null]);
        assert_eq!(round_trip(BuiltInType::Variant, mixed.clone()), mixed);

        let matrix = Value::Matrix(Matrix::new(
            vec![2, 2],
            vec![Value::Byte(1), Value::Byte(2), Value::Byte(3), Value::Byte(4)],
        ));
        assert_eq!(round_trip(BuiltInType::Variant, matrix.clone()), matrix);
        assert_eq!(round_trip(BuiltInType::Variant, Value::Null), Value::Null);
    }

    #[test]
    fn test_data_value_and_diagnostics() {
        let value = Value::DataValue(Box::new(DataValue {
            value: Some(Value::Double(1.5)),
            status: Some(StatusCode::BAD_DECODING_ERROR),
            source_timestamp: Some(DateTime(1000)),
            source_picoseconds: Some(7),
            server_timestamp: Some(DateTime(2000)),
            server_picoseconds: None,
        }));
        assert_eq!(round_trip(BuiltInType::DataValue, value.clone()), value);

        let info = Value::DiagnosticInfo(Box::new(DiagnosticInfo {
            symbolic_id: Some(1),
            locale: Some(3),
            additional_info: Some("more".into()),
            inner_diagnostic_info: Some(Box::new(DiagnosticInfo {
                inner_status_code: Some(StatusCode::GOOD),
                ..DiagnosticInfo::default()
            })),
            ..DiagnosticInfo::default()
        }));
        assert_eq!(round_trip(BuiltInType::DiagnosticInfo, info.clone()), info);
    }

    #[test]
    fn test_truncated_input_is_an_error() {
        let mut decoder = BinaryDecoder::new(&[1, 2]);
        assert!(matches!(
            decoder.read_value("", BuiltInType::UInt32),
            Err(Error::Decoding(_))
        ));
        let mut decoder = BinaryDecoder::new(&[0x10, 0, 0, 0, b'a']);
        assert!(decoder.read_value("", BuiltInType::String).is_err());
    }

    #[test]
    fn test_wrong_value_kind_is_rejected() {
        let mut encoder = BinaryEncoder::new();
        let result = encoder.write_value("", BuiltInType::Double, &Value::from("x"));
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }
}
