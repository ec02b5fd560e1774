// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Well-known namespace 0 identifiers used by type resolution.

use super::NodeId;

/// Data type node ids.
pub mod data_types {
    use super::NodeId;

    pub const BOOLEAN: NodeId = NodeId::numeric(0, 1);
    pub const SBYTE: NodeId = NodeId::numeric(0, 2);
    pub const BYTE: NodeId = NodeId::numeric(0, 3);
    pub const INT16: NodeId = NodeId::numeric(0, 4);
    pub const UINT16: NodeId = NodeId::numeric(0, 5);
    pub const INT32: NodeId = NodeId::numeric(0, 6);
    pub const UINT32: NodeId = NodeId::numeric(0, 7);
    pub const INT64: NodeId = NodeId::numeric(0, 8);
    pub const UINT64: NodeId = NodeId::numeric(0, 9);
    pub const FLOAT: NodeId = NodeId::numeric(0, 10);
    pub const DOUBLE: NodeId = NodeId::numeric(0, 11);
    pub const STRING: NodeId = NodeId::numeric(0, 12);
    pub const DATE_TIME: NodeId = NodeId::numeric(0, 13);
    pub const GUID: NodeId = NodeId::numeric(0, 14);
    pub const BYTE_STRING: NodeId = NodeId::numeric(0, 15);
    pub const XML_ELEMENT: NodeId = NodeId::numeric(0, 16);
    pub const NODE_ID: NodeId = NodeId::numeric(0, 17);
    pub const EXPANDED_NODE_ID: NodeId = NodeId::numeric(0, 18);
    pub const STATUS_CODE: NodeId = NodeId::numeric(0, 19);
    pub const QUALIFIED_NAME: NodeId = NodeId::numeric(0, 20);
    pub const LOCALIZED_TEXT: NodeId = NodeId::numeric(0, 21);
    pub const STRUCTURE: NodeId = NodeId::numeric(0, 22);
    pub const DATA_VALUE: NodeId = NodeId::numeric(0, 23);
    pub const BASE_DATA_TYPE: NodeId = NodeId::numeric(0, 24);
    pub const DIAGNOSTIC_INFO: NodeId = NodeId::numeric(0, 25);
    pub const NUMBER: NodeId = NodeId::numeric(0, 26);
    pub const INTEGER: NodeId = NodeId::numeric(0, 27);
    pub const UINTEGER: NodeId = NodeId::numeric(0, 28);
    pub const ENUMERATION: NodeId = NodeId::numeric(0, 29);
    pub const IMAGE: NodeId = NodeId::numeric(0, 30);
    pub const INTEGER_ID: NodeId = NodeId::numeric(0, 288);
    pub const COUNTER: NodeId = NodeId::numeric(0, 289);
    pub const DURATION: NodeId = NodeId::numeric(0, 290);
    pub const NUMERIC_RANGE: NodeId = NodeId::numeric(0, 291);
    pub const TIME: NodeId = NodeId::numeric(0, 292);
    pub const DATE: NodeId = NodeId::numeric(0, 293);
    pub const UTC_TIME: NodeId = NodeId::numeric(0, 294);
    pub const LOCALE_ID: NodeId = NodeId::numeric(0, 295);
    pub const UNION: NodeId = NodeId::numeric(0, 12756);
    pub const DECIMAL: NodeId = NodeId::numeric(0, 50);
}

/// Reference type node ids.
pub mod reference_types {
    use super::NodeId;

    pub const HAS_ENCODING: NodeId = NodeId::numeric(0, 38);
    pub const HAS_DESCRIPTION: NodeId = NodeId::numeric(0, 39);
    pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);
    pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);
    pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);
}

/// Object node ids.
pub mod objects {
    use super::NodeId;

    pub const XML_SCHEMA_TYPE_SYSTEM: NodeId = NodeId::numeric(0, 92);
    pub const OPC_BINARY_SCHEMA_TYPE_SYSTEM: NodeId = NodeId::numeric(0, 93);
}

/// Browse names matched during resolution.
pub mod browse_names {
    pub const DEFAULT_BINARY: &str = "Default Binary";
    pub const DEFAULT_XML: &str = "Default XML";
    pub const DEFAULT_JSON: &str = "Default JSON";
    pub const NAMESPACE_URI: &str = "NamespaceUri";
    pub const ENUM_VALUES: &str = "EnumValues";
    pub const ENUM_STRINGS: &str = "EnumStrings";
}

/// Namespace URIs of the legacy schema languages.
pub mod namespaces {
    pub const OPC_UA: &str = "http://opcfoundation.org/UA/";
    pub const OPC_UA_TYPES_XSD: &str = "http://opcfoundation.org/UA/2008/02/Types.xsd";
    pub const OPC_BINARY_SCHEMA: &str = "http://opcfoundation.org/BinarySchema/";
    pub const XML_SCHEMA: &str = "http://www.w3.org/2001/XMLSchema";
}

/// Abstract namespace 0 roots that never need a server round trip.
pub fn is_abstract_root(id: &NodeId) -> bool {
    matches!(
        id.as_ns0_numeric(),
        Some(22 | 24 | 26 | 27 | 28 | 29 | 12756)
    )
}
