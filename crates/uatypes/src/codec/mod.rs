// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structured field codec.
//!
//! ```text
//!   StructureDescription::encode ──► StructureFieldDescription::encode
//!                                          │
//!            ┌─────────────────────────────┼──────────────────────────┐
//!            ▼                             ▼                          ▼
//!     built-in kind               nested structure               enumeration
//!   Encoder::write_value      begin_object / fields / end    EnumEncoder or Int32
//! ```
//!
//! The codec is format agnostic. It dispatches on the field's data type and
//! value rank and drives an [`Encoder`] or [`Decoder`] that knows the wire
//! format. Nested structure and enumeration types are looked up through a
//! [`DescriptionLookup`], normally the resolver's cache.
//!
//! Two reference formats ship with the crate: [`binary`] (OPC UA binary
//! layout) and, with the `json-codec` feature, [`json`].

pub mod binary;
mod field;
#[cfg(feature = "json-codec")]
pub mod json;
mod structure;


pub use binary::{BinaryDecoder, BinaryEncoder};
#[cfg(feature = "json-codec")]
pub use json::{JsonDecoder, JsonEncoder, JsonEncoderOptions};

use crate::builtin::BuiltInType;
use crate::description::{DataTypeDescription, EnumDescription, StructureDescription};
use crate::error::Result;
use crate::types::NodeId;
use crate::value::{EnumValue, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Primitive writer for one wire format.
///
/// Names are field names; formats without names ignore them. Array
/// elements are written with an empty name.
pub trait Encoder {
    /// Write one value of a built-in kind. `value` matches `kind`, except
    /// that nullable kinds (strings, byte strings, xml) may be `Null`.
    fn write_value(&mut self, name: &str, kind: BuiltInType, value: &Value) -> Result<()>;

    /// Open a nested structure.
    fn begin_object(&mut self, name: &str) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;

    /// Open an array of `len` elements; `None` writes a null array.
    fn begin_array(&mut self, name: &str, len: Option<usize>) -> Result<()>;

    fn end_array(&mut self) -> Result<()>;

    /// Symbol-aware enumeration support, if the format has any.
    fn enum_extension(&mut self) -> Option<&mut dyn EnumEncoder> {
        None
    }
}

/// Encoder extension for formats that can carry enumeration symbols.
pub trait EnumEncoder {
    fn write_enumerated(&mut self, name: &str, value: &EnumValue) -> Result<()>;
}

/// Primitive reader for one wire format.
pub trait Decoder {
    fn read_value(&mut self, name: &str, kind: BuiltInType) -> Result<Value>;

    /// Enter a nested structure. `false` when the structure is absent.
    fn begin_object(&mut self, name: &str) -> Result<bool>;

    fn end_object(&mut self) -> Result<()>;

    /// Enter an array and return its length; `None` for a null array.
    fn begin_array(&mut self, name: &str) -> Result<Option<usize>>;

    fn end_array(&mut self) -> Result<()>;

    fn enum_extension(&mut self) -> Option<&mut dyn EnumDecoder> {
        None
    }
}

/// Decoder extension for formats that can carry enumeration symbols.
pub trait EnumDecoder {
    /// Read an enumeration token and resolve it against `description`.
    /// `None` when nothing usable is on the wire.
    fn read_enumerated(
        &mut self,
        name: &str,
        description: &EnumDescription,
    ) -> Result<Option<EnumValue>>;
}

/// Synchronous access to resolved nested types during coding.
pub trait DescriptionLookup {
    fn structure(&self, type_id: &NodeId) -> Option<Arc<StructureDescription>>;

    fn enumeration(&self, type_id: &NodeId) -> Option<Arc<EnumDescription>>;
}

impl DescriptionLookup for HashMap<NodeId, DataTypeDescription> {
    fn structure(&self, type_id: &NodeId) -> Option<Arc<StructureDescription>> {
        self.get(type_id).and_then(|d| d.as_structure().cloned())
    }

    fn enumeration(&self, type_id: &NodeId) -> Option<Arc<EnumDescription>> {
        self.get(type_id).and_then(|d| d.as_enum().cloned())
    }
}

/// Lookup that knows no user types; only built-in fields can be coded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl DescriptionLookup for NoLookup {
    fn structure(&self, _type_id: &NodeId) -> Option<Arc<StructureDescription>> {
        None
    }

    fn enumeration(&self, _type_id: &NodeId) -> Option<Arc<EnumDescription>> {
        None
    }
}
