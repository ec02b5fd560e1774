// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in OPC UA types consumed by the resolver and the field codec.

pub mod ids;
mod node_id;
mod primitives;

pub use node_id::{ExpandedNodeId, Identifier, NamespaceTable, NodeId, OPC_UA_NAMESPACE_URI};
pub use primitives::{
    DataValue, DateTime, DiagnosticInfo, ExtensionObject, ExtensionObjectBody, LocalizedText,
    QualifiedName, StatusCode, TypeIdentifier, XmlQualifiedName,
};

/// 128-bit GUID.
pub type Guid = uuid::Uuid;
