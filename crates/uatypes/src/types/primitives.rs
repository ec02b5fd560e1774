// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in value types without a natural std counterpart.

use super::{ExpandedNodeId, NodeId};
use crate::value::Value;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// StatusCode
// ============================================================================

/// 32-bit status code; the two top bits carry the severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: StatusCode = StatusCode(0);
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    pub const BAD_TYPE_DEFINITION_INVALID: StatusCode = StatusCode(0x80E6_0000);
    pub const BAD_DECODING_ERROR: StatusCode = StatusCode(0x8007_0000);

    pub fn is_good(self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    pub fn is_bad(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

// ============================================================================
// DateTime
// ============================================================================

/// Ticks of 100 ns since 1601-01-01 UTC. Zero is the epoch minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct DateTime(pub i64);

/// Seconds between 1601-01-01 and 1970-01-01.
const UNIX_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;
const TICKS_PER_SECOND: i64 = 10_000_000;

impl DateTime {
    pub const MIN: DateTime = DateTime(0);

    pub fn ticks(self) -> i64 {
        self.0
    }

    pub fn is_min(self) -> bool {
        self.0 <= 0
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// The chrono form. `None` for the epoch minimum.
    pub fn to_chrono(self) -> Option<chrono::DateTime<Utc>> {
        if self.is_min() {
            return None;
        }
        let secs = self.0.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_OFFSET_SECS;
        let nanos = (self.0.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        let secs = value.timestamp() + UNIX_EPOCH_OFFSET_SECS;
        let ticks = secs
            .saturating_mul(TICKS_PER_SECOND)
            .saturating_add(i64::from(value.timestamp_subsec_nanos() / 100));
        Self(ticks.max(0))
    }
}

// ============================================================================
// Names and texts
// ============================================================================

/// Namespace-qualified browse name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: u16, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

/// Text with an optional locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    pub locale: Option<String>,
    pub text: Option<String>,
}

impl LocalizedText {
    pub fn new(locale: &str, text: &str) -> Self {
        Self {
            locale: Some(locale.to_string()),
            text: Some(text.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self {
            locale: None,
            text: Some(text.to_string()),
        }
    }
}

/// XML name of a declared type: target namespace plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct XmlQualifiedName {
    pub namespace: String,
    pub name: String,
}

impl XmlQualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for XmlQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

// ============================================================================
// Composite built-ins
// ============================================================================

/// Vendor diagnostic information attached to a status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub locale: Option<i32>,
    pub localized_text: Option<i32>,
    pub additional_info: Option<String>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

/// A value with status and timestamps (the tagged value of the codec).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataValue {
    pub value: Option<Value>,
    pub status: Option<StatusCode>,
    pub source_timestamp: Option<DateTime>,
    pub source_picoseconds: Option<u16>,
    pub server_timestamp: Option<DateTime>,
    pub server_picoseconds: Option<u16>,
}

impl DataValue {
    pub fn new(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn bad(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Status, absent meaning Good.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::GOOD)
    }
}

/// Body of an encoded structure whose layout is carried by `type_id`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExtensionObjectBody {
    #[default]
    None,
    Binary(Vec<u8>),
    Xml(String),
}

/// An encoded structure tagged with its encoding id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    pub body: ExtensionObjectBody,
}

impl ExtensionObject {
    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        self.type_id.is_null() && self.body == ExtensionObjectBody::None
    }
}

/// Reference from a server to a type in another namespace.
pub type TypeIdentifier = ExpandedNodeId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_severity() {
        assert!(StatusCode::GOOD.is_good());
        assert!(!StatusCode::GOOD.is_bad());
        assert!(StatusCode::BAD_NODE_ID_UNKNOWN.is_bad());
        assert!(!StatusCode(0x4000_0000).is_good());
    }

    #[test]
    fn test_date_time_chrono_conversion() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let dt = DateTime::from(now);
        assert_eq!(dt.to_chrono(), Some(now));
        assert!(DateTime::MIN.to_chrono().is_none());
    }

    #[test]
    fn test_date_time_before_1601_clamps_to_min() {
        let ancient = Utc.with_ymd_and_hms(1500, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(DateTime::from(ancient), DateTime::MIN);
    }
}
