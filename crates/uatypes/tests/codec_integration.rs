// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::wildcard_imports)] // Test utility imports

//! Every built-in scalar kind through both reference wire formats.

use chrono::TimeZone;
use uatypes::codec::{BinaryDecoder, BinaryEncoder};
#[cfg(feature = "json-codec")]
use uatypes::codec::{JsonDecoder, JsonEncoder, JsonEncoderOptions};
use uatypes::types::ids::data_types;
use uatypes::types::{
    DateTime, ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName, StatusCode,
    XmlQualifiedName,
};
use uatypes::*;

const SCALARS: NodeId = NodeId::numeric(2, 7000);

fn scalar_fields() -> Vec<(&'static str, NodeId, Value)> {
    let timestamp = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    vec![
        ("Boolean", data_types::BOOLEAN, Value::Boolean(true)),
        ("SByte", data_types::SBYTE, Value::SByte(-5)),
        ("Byte", data_types::BYTE, Value::Byte(200)),
        ("Int16", data_types::INT16, Value::Int16(-1234)),
        ("UInt16", data_types::UINT16, Value::UInt16(54321)),
        ("Int32", data_types::INT32, Value::Int32(-70000)),
        ("UInt32", data_types::UINT32, Value::UInt32(1)),
        ("Int64", data_types::INT64, Value::Int64(-9_000_000_000)),
        ("UInt64", data_types::UINT64, Value::UInt64(18_000_000_000)),
        ("Float", data_types::FLOAT, Value::Float(1.5)),
        ("Double", data_types::DOUBLE, Value::Double(-2.25)),
        ("String", data_types::STRING, Value::from("caf\u{e9}")),
        ("DateTime", data_types::DATE_TIME, Value::DateTime(DateTime::from(timestamp))),
        (
            "Guid",
            data_types::GUID,
            Value::Guid(Guid::from_u128(0x72962b91_fa75_4ae6_8d28_b404dc7daf63)),
        ),
        ("ByteString", data_types::BYTE_STRING, Value::ByteString(vec![0x01, 0x02])),
        ("Xml", data_types::XML_ELEMENT, Value::XmlElement("<a b=\"1\"/>".into())),
        ("NodeId", data_types::NODE_ID, Value::NodeId(NodeId::string(2, "Pump.Speed"))),
        (
            "ExpandedNodeId",
            data_types::EXPANDED_NODE_ID,
            Value::ExpandedNodeId(ExpandedNodeId::from(NodeId::numeric(3, 99))),
        ),
        (
            "StatusCode",
            data_types::STATUS_CODE,
            Value::StatusCode(StatusCode::BAD_DECODING_ERROR),
        ),
        (
            "QualifiedName",
            data_types::QUALIFIED_NAME,
            Value::QualifiedName(QualifiedName::new(2, "Speed")),
        ),
        (
            "LocalizedText",
            data_types::LOCALIZED_TEXT,
            Value::LocalizedText(LocalizedText::new("en", "Speed")),
        ),
        ("Variant", data_types::BASE_DATA_TYPE, Value::Int32(5)),
        ("Duration", data_types::DURATION, Value::Double(250.0)),
    ]
}

fn scalars() -> (StructureDescription, StructureValue) {
    let fields = scalar_fields();
    let definition = StructureDefinition::new(
        0,
        fields
            .iter()
            .map(|(name, data_type, _)| StructureField::new(*name, data_type.clone()))
            .collect(),
    );
    let description = StructureDescription::new(
        SCALARS,
        XmlQualifiedName::new("urn:test", "Scalars"),
        EncodingTriple::default(),
        false,
        &definition,
    )
    .expect("valid structure");
    let value = fields
        .into_iter()
        .fold(StructureValue::new(SCALARS), |v, (name, _, field)| v.with(name, field));
    (description, value)
}

#[test]
fn test_every_scalar_kind_round_trips_in_binary() {
    let (description, value) = scalars();

    let mut encoder = BinaryEncoder::new();
    description.encode(&mut encoder, &value, &NoLookup).unwrap();
    let bytes = encoder.into_bytes();

    let mut decoder = BinaryDecoder::new(&bytes);
    let decoded = description.decode(&mut decoder, &NoLookup).unwrap();
    assert_eq!(decoder.remaining(), 0);
    for (name, expected) in &value.fields {
        assert_eq!(decoded.get(name), Some(expected), "field {}", name);
    }
    assert_eq!(decoded, value);
}

#[cfg(feature = "json-codec")]
#[test]
fn test_every_scalar_kind_round_trips_in_json_text() {
    let (description, value) = scalars();

    let mut encoder = JsonEncoder::new(JsonEncoderOptions::default());
    description.encode(&mut encoder, &value, &NoLookup).unwrap();
    let text = encoder.finish().unwrap().to_string();

    let mut decoder = JsonDecoder::parse(&text).unwrap();
    let decoded = description.decode(&mut decoder, &NoLookup).unwrap();
    for (name, expected) in &value.fields {
        assert_eq!(decoded.get(name), Some(expected), "field {}", name);
    }
}

#[test]
fn test_single_field_with_name_override() {
    let (description, _) = scalars();
    let field = description.field("UInt32").expect("field");

    let mut encoder = BinaryEncoder::new();
    field
        .encode(&mut encoder, &Value::UInt32(1), Some("Renamed"), &NoLookup)
        .unwrap();
    assert_eq!(encoder.as_bytes(), &[1, 0, 0, 0]);

    let bytes = encoder.into_bytes();
    let mut decoder = BinaryDecoder::new(&bytes);
    assert_eq!(
        field.decode(&mut decoder, Some("Renamed"), &NoLookup).unwrap(),
        Value::UInt32(1)
    );
}

#[test]
fn test_random_input_never_panics() {
    let (description, value) = scalars();
    let mut encoder = BinaryEncoder::new();
    description.encode(&mut encoder, &value, &NoLookup).unwrap();
    let valid = encoder.into_bytes();

    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..500 {
        let mut bytes = valid.clone();
        // flip a few bytes, sometimes truncate
        for _ in 0..rng.usize(1..8) {
            let at = rng.usize(..bytes.len());
            bytes[at] = rng.u8(..);
        }
        if rng.bool() {
            bytes.truncate(rng.usize(..bytes.len()));
        }
        let mut decoder = BinaryDecoder::new(&bytes);
        let _ = description.decode(&mut decoder, &NoLookup);
    }
}
