// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for type resolution and structured field coding.

use crate::types::{NodeId, StatusCode};
use std::fmt;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the dictionary parser, the resolver and the field codec.
///
/// Unresolvable types are not errors: lookups return `None` for them.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// A legacy dictionary entry uses a construct the canonical model cannot express.
    SchemaIncompatible(String),
    /// A structure or enum definition failed validation.
    InvalidDefinition(String),
    /// The dictionary document is not well-formed XML.
    XmlParse(String),

    // ========================================================================
    // Codec Errors
    // ========================================================================
    /// Field data type does not map to a built-in kind, enum or structure.
    UnsupportedType(NodeId),
    /// Field value rank is neither scalar, one-dimensional nor multi-dimensional.
    UnsupportedValueRank(i32),
    /// Value handed to the codec does not match the field's kind.
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// Primitive encoder failure.
    Encoding(String),
    /// Primitive decoder failure (truncated input, bad token, ...).
    Decoding(String),

    // ========================================================================
    // Node Source Errors
    // ========================================================================
    /// I/O or service failure reported by the node source.
    NodeSource(String),
    /// The node source returned a bad status for a read.
    BadStatus(StatusCode),
    /// The operation was cancelled through its cancellation token.
    Cancelled,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Options could not be parsed.
    Config(String),
}

impl Error {
    /// Shorthand for a type mismatch on a named field.
    pub fn mismatch(field: &str, expected: impl fmt::Debug, found: impl fmt::Debug) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected: format!("{:?}", expected),
            found: format!("{:?}", found),
        }
    }

    /// True for failures that come from the legacy dictionary parser.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::SchemaIncompatible(_) | Self::XmlParse(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaIncompatible(msg) => write!(f, "Incompatible schema: {}", msg),
            Self::InvalidDefinition(msg) => write!(f, "Invalid type definition: {}", msg),
            Self::XmlParse(msg) => write!(f, "Dictionary parse error: {}", msg),
            Self::UnsupportedType(id) => write!(f, "Unsupported field data type: {}", id),
            Self::UnsupportedValueRank(rank) => write!(f, "Unsupported value rank: {}", rank),
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "Type mismatch for field '{}': expected {}, found {}",
                field, expected, found
            ),
            Self::Encoding(msg) => write!(f, "Encoding error: {}", msg),
            Self::Decoding(msg) => write!(f, "Decoding error: {}", msg),
            Self::NodeSource(msg) => write!(f, "Node source error: {}", msg),
            Self::BadStatus(status) => write!(f, "Bad status: {}", status),
            Self::Cancelled => write!(f, "Operation cancelled"),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Self::XmlParse(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decoding(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Decoding(e.to_string())
    }
}
