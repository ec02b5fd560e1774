// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumeration descriptions and symbol resolution.

use super::EncodingTriple;
use crate::definition::{EnumDefinition, EnumField};
use crate::types::{NodeId, XmlQualifiedName};
use crate::value::EnumValue;
use serde::Serialize;

/// A raw enumeration token as read from the wire, independent of encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumToken<'a> {
    /// No value on the wire.
    Absent,
    Integer(i64),
    String(&'a str),
    /// Anything else the decoder could read (array, object, boolean, ...).
    Other,
}

/// A resolved enumeration type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDescription {
    type_id: NodeId,
    xml_name: XmlQualifiedName,
    encodings: EncodingTriple,
    is_abstract: bool,
    definition: EnumDefinition,
}

impl EnumDescription {
    /// Enumerations need no validation; zero fields is a valid enumeration.
    pub fn new(
        type_id: NodeId,
        xml_name: XmlQualifiedName,
        encodings: EncodingTriple,
        is_abstract: bool,
        definition: EnumDefinition,
    ) -> Self {
        Self {
            type_id,
            xml_name,
            encodings,
            is_abstract,
            definition,
        }
    }

    pub fn type_id(&self) -> &NodeId {
        &self.type_id
    }

    pub fn xml_name(&self) -> &XmlQualifiedName {
        &self.xml_name
    }

    pub fn encodings(&self) -> &EncodingTriple {
        &self.encodings
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_option_set(&self) -> bool {
        self.definition.is_option_set
    }

    pub fn fields(&self) -> &[EnumField] {
        &self.definition.fields
    }

    pub fn definition(&self) -> &EnumDefinition {
        &self.definition
    }

    pub fn field_by_code(&self, code: i64) -> Option<&EnumField> {
        self.definition.fields.iter().find(|f| f.value == code)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&EnumField> {
        self.definition.fields.iter().find(|f| f.name == name)
    }

    /// Enum value for a code, with its symbol when the code is declared.
    pub fn value_of(&self, code: i32) -> EnumValue {
        match self.field_by_code(i64::from(code)) {
            Some(field) => EnumValue::new(field.name.clone(), code),
            None => EnumValue::from_code(code),
        }
    }

    /// Resolve a wire token to a value.
    ///
    /// Integers match codes exactly; an undeclared integer keeps its code
    /// without a symbol, unless it does not fit an `i32`. Strings match a declared name, then the
    /// `Symbol_code` form, then a bare integer. Any other token falls back
    /// to the first declared field. Absent tokens and enumerations without
    /// fields yield `None`.
    pub fn resolve_token(&self, token: EnumToken<'_>) -> Option<EnumValue> {
        let first = self.definition.fields.first()?;
        match token {
            EnumToken::Absent => None,
            EnumToken::Integer(code) => Some(match self.field_by_code(code) {
                Some(field) => to_value(field),
                None => match i32::try_from(code) {
                    Ok(code) => EnumValue::from_code(code),
                    Err(_) => to_value(first),
                },
            }),
            EnumToken::String(text) => Some(
                self.resolve_symbol(text)
                    .map(to_value)
                    .unwrap_or_else(|| to_value(first)),
            ),
            EnumToken::Other => Some(to_value(first)),
        }
    }

    fn resolve_symbol(&self, text: &str) -> Option<&EnumField> {
        if let Some(field) = self.field_by_name(text) {
            return Some(field);
        }
        if let Some((symbol, code)) = text.rsplit_once('_') {
            if let Ok(code) = code.parse::<i64>() {
                return self
                    .definition
                    .fields
                    .iter()
                    .find(|f| f.value == code && f.name == symbol)
                    .or_else(|| self.field_by_code(code));
            }
        }
        text.trim()
            .parse::<i64>()
            .ok()
            .and_then(|code| self.field_by_code(code))
    }
}

fn to_value(field: &EnumField) -> EnumValue {
    EnumValue::new(field.name.clone(), field.value as i32)
}
