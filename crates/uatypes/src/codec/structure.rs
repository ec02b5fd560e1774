// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Whole-structure encode and decode.
//!
//! Structures with optional fields are prefixed by a UInt32 `EncodingMask`;
//! unions by a UInt32 `SwitchField` (1-based member, 0 for an empty union)
//! followed by the selected member under the key `Value`.

use super::{Decoder, DescriptionLookup, Encoder};
use crate::builtin::BuiltInType;
use crate::description::{StructureDescription, StructureFieldDescription};
use crate::error::{Error, Result};
use crate::value::{StructureValue, Value};

const ENCODING_MASK: &str = "EncodingMask";
const SWITCH_FIELD: &str = "SwitchField";
const UNION_VALUE: &str = "Value";

/// Value for the field at `position`: positional when names line up, so
/// duplicate names stay distinct, by name otherwise.
fn field_value<'v>(
    value: &'v StructureValue,
    position: usize,
    field: &StructureFieldDescription,
) -> Option<&'v Value> {
    match value.fields.get(position) {
        Some((name, v)) if name == field.name() => Some(v),
        _ => value.get(field.name()),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

impl StructureDescription {
    /// Encode the body of a structure value, without an enclosing scope.
    pub fn encode(
        &self,
        encoder: &mut dyn Encoder,
        value: &StructureValue,
        lookup: &dyn DescriptionLookup,
    ) -> Result<()> {
        let structure_type = self.structure_type();
        if structure_type.is_union() {
            return self.encode_union(encoder, value, lookup);
        }

        if structure_type.has_optional_fields() {
            let mut mask = 0u32;
            for (position, field) in self.fields().iter().enumerate() {
                if let Some(bit) = field.mask_index() {
                    if is_present(field_value(value, position, field)) {
                        mask |= 1 << bit;
                    }
                }
            }
            encoder.write_value(ENCODING_MASK, BuiltInType::UInt32, &Value::UInt32(mask))?;
        }

        for (position, field) in self.fields().iter().enumerate() {
            let field_value = field_value(value, position, field);
            if field.is_optional() && !is_present(field_value) {
                continue;
            }
            field.encode(encoder, field_value.unwrap_or(&Value::Null), None, lookup)?;
        }
        Ok(())
    }

    fn encode_union(
        &self,
        encoder: &mut dyn Encoder,
        value: &StructureValue,
        lookup: &dyn DescriptionLookup,
    ) -> Result<()> {
        let selected = self
            .fields()
            .iter()
            .enumerate()
            .find_map(|(position, field)| {
                let v = field_value(value, position, field);
                is_present(v).then(|| (position, field, v))
            });
        match selected {
            None => encoder.write_value(SWITCH_FIELD, BuiltInType::UInt32, &Value::UInt32(0)),
            Some((position, field, v)) => {
                let switch = position as u32 + 1;
                encoder.write_value(SWITCH_FIELD, BuiltInType::UInt32, &Value::UInt32(switch))?;
                field.encode(encoder, v.unwrap_or(&Value::Null), Some(UNION_VALUE), lookup)
            }
        }
    }

    /// Decode the body of a structure value.
    ///
    /// Absent optional fields and unselected union members are left out of
    /// the result.
    pub fn decode(
        &self,
        decoder: &mut dyn Decoder,
        lookup: &dyn DescriptionLookup,
    ) -> Result<StructureValue> {
        let mut value = StructureValue::new(self.type_id().clone());
        let structure_type = self.structure_type();

        if structure_type.is_union() {
            let switch = read_u32(decoder, SWITCH_FIELD)?;
            if switch == 0 {
                return Ok(value);
            }
            let field = self.fields().get(switch as usize - 1).ok_or_else(|| {
                Error::Decoding(format!(
                    "{}: switch value {} exceeds {} members",
                    self.type_id(),
                    switch,
                    self.fields().len()
                ))
            })?;
            let member = field.decode(decoder, Some(UNION_VALUE), lookup)?;
            value.fields.push((field.name().to_string(), member));
            return Ok(value);
        }

        let mask = if structure_type.has_optional_fields() {
            read_u32(decoder, ENCODING_MASK)?
        } else {
            0
        };
        for field in self.fields() {
            if let Some(bit) = field.mask_index() {
                if field.is_optional() && mask & (1 << bit) == 0 {
                    continue;
                }
            }
            let decoded = field.decode(decoder, None, lookup)?;
            value.fields.push((field.name().to_string(), decoded));
        }
        Ok(value)
    }
}

fn read_u32(decoder: &mut dyn Decoder, name: &str) -> Result<u32> {
    let value = decoder.read_value(name, BuiltInType::UInt32)?;
    value
        .as_u32()
        .ok_or_else(|| Error::mismatch(name, "UInt32", value.kind_name()))
}
