// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON encoding of built-in values over `serde_json`.
//!
//! Follows the OPC UA JSON mapping closely enough to round-trip every
//! built-in kind: 64-bit integers as strings, byte strings as base64,
//! date-times as RFC 3339, variants as `{"Type": n, "Body": ...}`.
//! Enumerations are integers in reversible mode and `Symbol_code` strings
//! otherwise.

use super::{Decoder, EnumDecoder, EnumEncoder, Encoder};
use crate::builtin::BuiltInType;
use crate::description::{EnumDescription, EnumToken};
use crate::error::{Error, Result};
use crate::types::{
    DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject, ExtensionObjectBody,
    Guid, LocalizedText, NodeId, QualifiedName, StatusCode,
};
use crate::value::{EnumValue, Matrix, Value};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::VecDeque;

const MIN_DATE_TIME: &str = "0001-01-01T00:00:00Z";

/// JSON encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonEncoderOptions {
    /// Write enumerations as their integer code. When false, write the
    /// `Symbol_code` form for values that carry a symbol.
    pub reversible: bool,
}

impl Default for JsonEncoderOptions {
    fn default() -> Self {
        Self { reversible: true }
    }
}

enum Frame {
    Object(String, Map<String, JsonValue>),
    Array(String, Vec<JsonValue>),
    /// Scope of a null array; already written as `null`.
    Discard,
}

/// Builds a JSON document from codec calls.
pub struct JsonEncoder {
    options: JsonEncoderOptions,
    stack: Vec<Frame>,
}

impl JsonEncoder {
    /// An encoder whose root is an empty object.
    pub fn new(options: JsonEncoderOptions) -> Self {
        Self {
            options,
            stack: vec![Frame::Object(String::new(), Map::new())],
        }
    }

    /// The finished root object.
    pub fn finish(mut self) -> Result<JsonValue> {
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Frame::Object(_, map)), true) => Ok(JsonValue::Object(map)),
            _ => Err(Error::Encoding("unbalanced object or array scopes".into())),
        }
    }

    fn emit(&mut self, name: &str, value: JsonValue) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object(_, map)) => {
                map.insert(name.to_string(), value);
                Ok(())
            }
            Some(Frame::Array(_, items)) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Discard) => Err(Error::Encoding("write into a null array".into())),
            None => Err(Error::Encoding("write outside of any scope".into())),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(Error::Encoding("closing the root scope".into()));
        }
        let (name, value) = match self.stack.pop() {
            Some(Frame::Object(name, map)) => (name, JsonValue::Object(map)),
            Some(Frame::Array(name, items)) => (name, JsonValue::Array(items)),
            Some(Frame::Discard) | None => return Err(Error::Encoding("no open scope".into())),
        };
        self.emit(&name, value)
    }
}

impl Encoder for JsonEncoder {
    fn write_value(&mut self, name: &str, kind: BuiltInType, value: &Value) -> Result<()> {
        let json = to_json(kind, value)?;
        self.emit(name, json)
    }

    fn begin_object(&mut self, name: &str) -> Result<()> {
        self.stack.push(Frame::Object(name.to_string(), Map::new()));
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Object(..)) => self.close(),
            _ => Err(Error::Encoding("end_object without begin_object".into())),
        }
    }

    fn begin_array(&mut self, name: &str, len: Option<usize>) -> Result<()> {
        match len {
            Some(len) => {
                self.stack
                    .push(Frame::Array(name.to_string(), Vec::with_capacity(len)));
                Ok(())
            }
            None => {
                self.emit(name, JsonValue::Null)?;
                self.stack.push(Frame::Discard);
                Ok(())
            }
        }
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Discard) => {
                self.stack.pop();
                Ok(())
            }
            Some(Frame::Array(..)) => self.close(),
            _ => Err(Error::Encoding("end_array without begin_array".into())),
        }
    }

    fn enum_extension(&mut self) -> Option<&mut dyn EnumEncoder> {
        Some(self)
    }
}

impl EnumEncoder for JsonEncoder {
    fn write_enumerated(&mut self, name: &str, value: &EnumValue) -> Result<()> {
        let json = match (&value.symbol, self.options.reversible) {
            (Some(symbol), false) => JsonValue::String(format!("{}_{}", symbol, value.code)),
            _ => JsonValue::from(value.code),
        };
        self.emit(name, json)
    }
}

// ============================================================================
// Decoder
// ============================================================================

enum ReadFrame {
    Object(Map<String, JsonValue>),
    Array(VecDeque<JsonValue>),
}

/// Reads codec values from a JSON document.
pub struct JsonDecoder {
    stack: Vec<ReadFrame>,
}

impl JsonDecoder {
    /// Decode from a root object.
    pub fn new(root: JsonValue) -> Result<Self> {
        match root {
            JsonValue::Object(map) => Ok(Self {
                stack: vec![ReadFrame::Object(map)],
            }),
            other => Err(Error::Decoding(format!("expected a JSON object, found {}", other))),
        }
    }

    /// Parse `text` and decode from its root object.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(serde_json::from_str(text)?)
    }

    /// Next token: the named member of the current object, or the next
    /// element of the current array. `None` when absent.
    fn take(&mut self, name: &str) -> Result<Option<JsonValue>> {
        match self.stack.last_mut() {
            Some(ReadFrame::Object(map)) => Ok(map.remove(name)),
            Some(ReadFrame::Array(items)) => Ok(items.pop_front()),
            None => Err(Error::Decoding("read outside of any scope".into())),
        }
    }

    fn pop(&mut self) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(Error::Decoding("closing the root scope".into()));
        }
        self.stack.pop();
        Ok(())
    }
}

impl Decoder for JsonDecoder {
    fn read_value(&mut self, name: &str, kind: BuiltInType) -> Result<Value> {
        match self.take(name)? {
            None => from_json(kind, &JsonValue::Null),
            Some(json) => from_json(kind, &json),
        }
    }

    fn begin_object(&mut self, name: &str) -> Result<bool> {
        match self.take(name)? {
            None | Some(JsonValue::Null) => Ok(false),
            Some(JsonValue::Object(map)) => {
                self.stack.push(ReadFrame::Object(map));
                Ok(true)
            }
            Some(other) => Err(Error::Decoding(format!(
                "'{}': expected an object, found {}",
                name, other
            ))),
        }
    }

    fn end_object(&mut self) -> Result<()> {
        self.pop()
    }

    fn begin_array(&mut self, name: &str) -> Result<Option<usize>> {
        match self.take(name)? {
            None | Some(JsonValue::Null) => {
                self.stack.push(ReadFrame::Array(VecDeque::new()));
                Ok(None)
            }
            Some(JsonValue::Array(items)) => {
                let len = items.len();
                self.stack.push(ReadFrame::Array(items.into()));
                Ok(Some(len))
            }
            Some(other) => Err(Error::Decoding(format!(
                "'{}': expected an array, found {}",
                name, other
            ))),
        }
    }

    fn end_array(&mut self) -> Result<()> {
        self.pop()
    }

    fn enum_extension(&mut self) -> Option<&mut dyn EnumDecoder> {
        Some(self)
    }
}

impl EnumDecoder for JsonDecoder {
    fn read_enumerated(
        &mut self,
        name: &str,
        description: &EnumDescription,
    ) -> Result<Option<EnumValue>> {
        let json = self.take(name)?;
        let token = match &json {
            None | Some(JsonValue::Null) => EnumToken::Absent,
            Some(JsonValue::Number(n)) => n.as_i64().map_or(EnumToken::Other, EnumToken::Integer),
            Some(JsonValue::String(s)) => EnumToken::String(s),
            Some(_) => EnumToken::Other,
        };
        Ok(description.resolve_token(token))
    }
}

// ============================================================================
// Built-in mapping
// ============================================================================

fn to_json(kind: BuiltInType, value: &Value) -> Result<JsonValue> {
    let mismatch = || Error::mismatch("", kind, value.kind_name());
    Ok(match (kind, value) {
        (BuiltInType::Variant, v) => variant_to_json(v)?,
        (BuiltInType::String | BuiltInType::XmlElement | BuiltInType::ByteString, Value::Null) => {
            JsonValue::Null
        }
        (BuiltInType::Boolean, Value::Boolean(v)) => JsonValue::Bool(*v),
        (BuiltInType::SByte, Value::SByte(v)) => JsonValue::from(*v),
        (BuiltInType::Byte, Value::Byte(v)) => JsonValue::from(*v),
        (BuiltInType::Int16, Value::Int16(v)) => JsonValue::from(*v),
        (BuiltInType::UInt16, Value::UInt16(v)) => JsonValue::from(*v),
        (BuiltInType::Int32, Value::Int32(v)) => JsonValue::from(*v),
        (BuiltInType::Int32, Value::Enumeration(e)) => JsonValue::from(e.code),
        (BuiltInType::UInt32, Value::UInt32(v)) => JsonValue::from(*v),
        (BuiltInType::Int64, Value::Int64(v)) => JsonValue::String(v.to_string()),
        (BuiltInType::UInt64, Value::UInt64(v)) => JsonValue::String(v.to_string()),
        (BuiltInType::Float, Value::Float(v)) => float_to_json(f64::from(*v)),
        (BuiltInType::Double, Value::Double(v)) => float_to_json(*v),
        (BuiltInType::String, Value::String(s)) | (BuiltInType::XmlElement, Value::XmlElement(s)) => {
            JsonValue::String(s.clone())
        }
        (BuiltInType::ByteString, Value::ByteString(b)) => JsonValue::String(BASE64.encode(b)),
        (BuiltInType::DateTime, Value::DateTime(t)) => date_time_to_json(*t),
        (BuiltInType::Guid, Value::Guid(g)) => JsonValue::String(g.to_string()),
        (BuiltInType::NodeId, Value::NodeId(id)) => JsonValue::String(id.to_string()),
        (BuiltInType::ExpandedNodeId, Value::ExpandedNodeId(id)) => {
            JsonValue::String(id.to_string())
        }
        (BuiltInType::StatusCode, Value::StatusCode(s)) => JsonValue::from(s.0),
        (BuiltInType::QualifiedName, Value::QualifiedName(q)) => {
            let mut map = Map::new();
            map.insert("Name".into(), JsonValue::String(q.name.clone()));
            if q.namespace != 0 {
                map.insert("Uri".into(), JsonValue::from(q.namespace));
            }
            JsonValue::Object(map)
        }
        (BuiltInType::LocalizedText, Value::LocalizedText(t)) => {
            let mut map = Map::new();
            if let Some(locale) = &t.locale {
                map.insert("Locale".into(), JsonValue::String(locale.clone()));
            }
            if let Some(text) = &t.text {
                map.insert("Text".into(), JsonValue::String(text.clone()));
            }
            JsonValue::Object(map)
        }
        (BuiltInType::ExtensionObject, Value::ExtensionObject(o)) => extension_object_to_json(o),
        (BuiltInType::DataValue, Value::DataValue(v)) => data_value_to_json(v)?,
        (BuiltInType::DiagnosticInfo, Value::DiagnosticInfo(d)) => diagnostic_info_to_json(d),
        _ => return Err(mismatch()),
    })
}

fn float_to_json(v: f64) -> JsonValue {
    match Number::from_f64(v) {
        Some(n) => JsonValue::Number(n),
        None if v.is_nan() => JsonValue::String("NaN".into()),
        None if v > 0.0 => JsonValue::String("Infinity".into()),
        None => JsonValue::String("-Infinity".into()),
    }
}

fn date_time_to_json(t: DateTime) -> JsonValue {
    match t.to_chrono() {
        Some(dt) => JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => JsonValue::String(MIN_DATE_TIME.into()),
    }
}

fn extension_object_to_json(object: &ExtensionObject) -> JsonValue {
    if object.is_null() {
        return JsonValue::Null;
    }
    let mut map = Map::new();
    map.insert("TypeId".into(), JsonValue::String(object.type_id.to_string()));
    match &object.body {
        ExtensionObjectBody::None => {}
        ExtensionObjectBody::Binary(bytes) => {
            map.insert("Encoding".into(), JsonValue::from(1));
            map.insert("Body".into(), JsonValue::String(BASE64.encode(bytes)));
        }
        ExtensionObjectBody::Xml(xml) => {
            map.insert("Encoding".into(), JsonValue::from(2));
            map.insert("Body".into(), JsonValue::String(xml.clone()));
        }
    }
    JsonValue::Object(map)
}

fn data_value_to_json(value: &DataValue) -> Result<JsonValue> {
    let mut map = Map::new();
    if let Some(v) = &value.value {
        map.insert("Value".into(), variant_to_json(v)?);
    }
    if let Some(status) = value.status {
        map.insert("StatusCode".into(), JsonValue::from(status.0));
    }
    if let Some(ts) = value.source_timestamp {
        map.insert("SourceTimestamp".into(), date_time_to_json(ts));
    }
    if let Some(ps) = value.source_picoseconds {
        map.insert("SourcePicoseconds".into(), JsonValue::from(ps));
    }
    if let Some(ts) = value.server_timestamp {
        map.insert("ServerTimestamp".into(), date_time_to_json(ts));
    }
    if let Some(ps) = value.server_picoseconds {
        map.insert("ServerPicoseconds".into(), JsonValue::from(ps));
    }
    Ok(JsonValue::Object(map))
}

fn diagnostic_info_to_json(info: &DiagnosticInfo) -> JsonValue {
    let mut map = Map::new();
    let ints = [
        ("SymbolicId", info.symbolic_id),
        ("NamespaceUri", info.namespace_uri),
        ("Locale", info.locale),
        ("LocalizedText", info.localized_text),
    ];
    for (key, v) in ints {
        if let Some(v) = v {
            map.insert(key.into(), JsonValue::from(v));
        }
    }
    if let Some(additional) = &info.additional_info {
        map.insert("AdditionalInfo".into(), JsonValue::String(additional.clone()));
    }
    if let Some(status) = info.inner_status_code {
        map.insert("InnerStatusCode".into(), JsonValue::from(status.0));
    }
    if let Some(inner) = &info.inner_diagnostic_info {
        map.insert("InnerDiagnosticInfo".into(), diagnostic_info_to_json(inner));
    }
    JsonValue::Object(map)
}

fn variant_to_json(value: &Value) -> Result<JsonValue> {
    let (kind, body, dimensions) = match value {
        Value::Null => return Ok(JsonValue::Null),
        Value::Array(items) => (array_kind(items), array_to_json(items)?, None),
        Value::Matrix(m) => (
            array_kind(&m.values),
            array_to_json(&m.values)?,
            Some(JsonValue::from(m.dimensions.clone())),
        ),
        scalar => {
            let kind = scalar.builtin_type().ok_or_else(|| {
                Error::Encoding(format!("{} cannot be held by a variant", scalar.kind_name()))
            })?;
            (kind, to_json(kind, scalar)?, None)
        }
    };
    let mut map = Map::new();
    map.insert("Type".into(), JsonValue::from(kind as u8));
    map.insert("Body".into(), body);
    if let Some(dimensions) = dimensions {
        map.insert("Dimensions".into(), dimensions);
    }
    Ok(JsonValue::Object(map))
}

fn array_kind(items: &[Value]) -> BuiltInType {
    let mut kinds = items.iter().map(Value::builtin_type);
    match kinds.next() {
        Some(Some(first)) if first != BuiltInType::Null && kinds.all(|k| k == Some(first)) => {
            first
        }
        _ => BuiltInType::Variant,
    }
}

fn array_to_json(items: &[Value]) -> Result<JsonValue> {
    let kind = array_kind(items);
    items
        .iter()
        .map(|item| to_json(kind, item))
        .collect::<Result<Vec<_>>>()
        .map(JsonValue::Array)
}

fn from_json(kind: BuiltInType, json: &JsonValue) -> Result<Value> {
    let bad = || Error::Decoding(format!("{:?}: unexpected JSON {}", kind, json));
    if json.is_null() {
        return Ok(match kind {
            BuiltInType::Variant
            | BuiltInType::String
            | BuiltInType::XmlElement
            | BuiltInType::ByteString => Value::Null,
            BuiltInType::ExtensionObject => Value::ExtensionObject(Box::default()),
            _ => return Err(bad()),
        });
    }
    Ok(match kind {
        BuiltInType::Null => return Err(Error::UnsupportedType(NodeId::NULL)),
        BuiltInType::Boolean => Value::Boolean(json.as_bool().ok_or_else(bad)?),
        BuiltInType::SByte => Value::SByte(int_as(json).ok_or_else(bad)?),
        BuiltInType::Byte => Value::Byte(int_as(json).ok_or_else(bad)?),
        BuiltInType::Int16 => Value::Int16(int_as(json).ok_or_else(bad)?),
        BuiltInType::UInt16 => Value::UInt16(int_as(json).ok_or_else(bad)?),
        BuiltInType::Int32 => Value::Int32(int_as(json).ok_or_else(bad)?),
        BuiltInType::UInt32 => Value::UInt32(int_as(json).ok_or_else(bad)?),
        BuiltInType::Int64 => Value::Int64(int(json).ok_or_else(bad)?),
        BuiltInType::UInt64 => Value::UInt64(match json {
            JsonValue::String(s) => s.parse().map_err(|_| bad())?,
            JsonValue::Number(n) => n.as_u64().ok_or_else(bad)?,
            _ => return Err(bad()),
        }),
        BuiltInType::Float => Value::Float(float(json).ok_or_else(bad)? as f32),
        BuiltInType::Double => Value::Double(float(json).ok_or_else(bad)?),
        BuiltInType::String => Value::String(json.as_str().ok_or_else(bad)?.to_string()),
        BuiltInType::XmlElement => Value::XmlElement(json.as_str().ok_or_else(bad)?.to_string()),
        BuiltInType::ByteString => Value::ByteString(
            BASE64
                .decode(json.as_str().ok_or_else(bad)?)
                .map_err(|e| Error::Decoding(e.to_string()))?,
        ),
        BuiltInType::DateTime => Value::DateTime(date_time(json.as_str().ok_or_else(bad)?)?),
        BuiltInType::Guid => Value::Guid(
            Guid::parse_str(json.as_str().ok_or_else(bad)?)
                .map_err(|e| Error::Decoding(e.to_string()))?,
        ),
        BuiltInType::NodeId => Value::NodeId(
            json.as_str()
                .ok_or_else(bad)?
                .parse::<NodeId>()
                .map_err(Error::Decoding)?,
        ),
        BuiltInType::ExpandedNodeId => Value::ExpandedNodeId(
            json.as_str()
                .ok_or_else(bad)?
                .parse::<ExpandedNodeId>()
                .map_err(Error::Decoding)?,
        ),
        BuiltInType::StatusCode => Value::StatusCode(StatusCode(int_as(json).ok_or_else(bad)?)),
        BuiltInType::QualifiedName => {
            let map = json.as_object().ok_or_else(bad)?;
            Value::QualifiedName(QualifiedName {
                namespace: map
                    .get("Uri")
                    .and_then(int_as)
                    .unwrap_or(0),
                name: map
                    .get("Name")
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        }
        BuiltInType::LocalizedText => {
            let map = json.as_object().ok_or_else(bad)?;
            Value::LocalizedText(LocalizedText {
                locale: optional_string(map, "Locale"),
                text: optional_string(map, "Text"),
            })
        }
        BuiltInType::ExtensionObject => {
            Value::ExtensionObject(Box::new(extension_object(json.as_object().ok_or_else(bad)?)?))
        }
        BuiltInType::DataValue => {
            Value::DataValue(Box::new(data_value(json.as_object().ok_or_else(bad)?)?))
        }
        BuiltInType::DiagnosticInfo => {
            Value::DiagnosticInfo(Box::new(diagnostic_info(json.as_object().ok_or_else(bad)?)))
        }
        BuiltInType::Variant => variant(json.as_object().ok_or_else(bad)?)?,
    })
}

fn int_as<T: TryFrom<i64>>(json: &JsonValue) -> Option<T> {
    int(json).and_then(|v| T::try_from(v).ok())
}

/// Integers may arrive as numbers or, for 64-bit values, strings.
fn int(json: &JsonValue) -> Option<i64> {
    match json {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn float(json: &JsonValue) -> Option<f64> {
    match json {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

fn date_time(text: &str) -> Result<DateTime> {
    let parsed = chrono::DateTime::parse_from_rfc3339(text)
        .map_err(|e| Error::Decoding(format!("invalid date-time '{}': {}", text, e)))?;
    Ok(DateTime::from(parsed.with_timezone(&Utc)))
}

fn optional_string(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn optional_i32(map: &Map<String, JsonValue>, key: &str) -> Option<i32> {
    map.get(key).and_then(int_as)
}

fn extension_object(map: &Map<String, JsonValue>) -> Result<ExtensionObject> {
    let type_id = match map.get("TypeId").and_then(JsonValue::as_str) {
        Some(text) => text.parse::<NodeId>().map_err(Error::Decoding)?,
        None => NodeId::NULL,
    };
    let body = match (map.get("Encoding").and_then(int), map.get("Body")) {
        (_, None) => ExtensionObjectBody::None,
        (Some(2), Some(body)) => ExtensionObjectBody::Xml(
            body.as_str()
                .ok_or_else(|| Error::Decoding("xml body is not a string".into()))?
                .to_string(),
        ),
        (_, Some(body)) => ExtensionObjectBody::Binary(
            BASE64
                .decode(
                    body.as_str()
                        .ok_or_else(|| Error::Decoding("binary body is not a string".into()))?,
                )
                .map_err(|e| Error::Decoding(e.to_string()))?,
        ),
    };
    Ok(ExtensionObject { type_id, body })
}

fn data_value(map: &Map<String, JsonValue>) -> Result<DataValue> {
    let timestamp = |key: &str| -> Result<Option<DateTime>> {
        match map.get(key).and_then(JsonValue::as_str) {
            Some(text) => Ok(Some(date_time(text)?)),
            None => Ok(None),
        }
    };
    Ok(DataValue {
        value: match map.get("Value") {
            Some(json) => Some(from_json(BuiltInType::Variant, json)?),
            None => None,
        },
        status: map
            .get("StatusCode")
            .and_then(int_as::<u32>)
            .map(StatusCode),
        source_timestamp: timestamp("SourceTimestamp")?,
        source_picoseconds: map
            .get("SourcePicoseconds")
            .and_then(int_as),
        server_timestamp: timestamp("ServerTimestamp")?,
        server_picoseconds: map
            .get("ServerPicoseconds")
            .and_then(int_as),
    })
}

fn diagnostic_info(map: &Map<String, JsonValue>) -> DiagnosticInfo {
    DiagnosticInfo {
        symbolic_id: optional_i32(map, "SymbolicId"),
        namespace_uri: optional_i32(map, "NamespaceUri"),
        locale: optional_i32(map, "Locale"),
        localized_text: optional_i32(map, "LocalizedText"),
        additional_info: optional_string(map, "AdditionalInfo"),
        inner_status_code: map
            .get("InnerStatusCode")
            .and_then(int_as::<u32>)
            .map(StatusCode),
        inner_diagnostic_info: map
            .get("InnerDiagnosticInfo")
            .and_then(JsonValue::as_object)
            .map(|inner| Box::new(diagnostic_info(inner))),
    }
}

fn variant(map: &Map<String, JsonValue>) -> Result<Value> {
    let tag = map
        .get("Type")
        .and_then(int_as::<u8>)
        .ok_or_else(|| Error::Decoding("variant without a Type".into()))?;
    let kind = BuiltInType::from_u8(tag)
        .ok_or_else(|| Error::Decoding(format!("invalid variant type {}", tag)))?;
    if kind == BuiltInType::Null {
        return Ok(Value::Null);
    }
    let body = map.get("Body").unwrap_or(&JsonValue::Null);
    let JsonValue::Array(items) = body else {
        return from_json(kind, body);
    };
    let items = items
        .iter()
        .map(|item| from_json(kind, item))
        .collect::<Result<Vec<_>>>()?;
    match map.get("Dimensions").and_then(JsonValue::as_array) {
        Some(dimensions) => {
            let dimensions = dimensions
                .iter()
                .map(int_as::<i32>)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| Error::Decoding("invalid matrix dimensions".into()))?;
            Ok(Value::Matrix(Matrix::new(dimensions, items)))
        }
        None => Ok(Value::Array(items)),
    }
}
