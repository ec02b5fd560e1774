// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read access to a server's address space.
//!
//! The resolver never talks to the network itself. Everything it needs
//! (type nodes, references between them, dictionary blobs) comes through a
//! [`NodeSource`]. Every call takes a [`CancellationToken`]; timeouts are the
//! source's business and surface as [`Error::NodeSource`](crate::Error).
//!
//! [`MemoryNodeSource`] is an in-process implementation used by tests and
//! by tools that work from a static address space.

mod memory;

pub use memory::{MemoryNodeSource, SourceStats};
pub use tokio_util::sync::CancellationToken;

use crate::definition::DataTypeDefinition;
use crate::error::{Error, Result};
use crate::types::{DataValue, LocalizedText, NodeId, QualifiedName};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    Object,
    Variable,
    Method,
    ObjectType,
    VariableType,
    ReferenceType,
    DataType,
    View,
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Attributes of one node, as far as type resolution needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_id: NodeId,
    pub node_class: NodeClass,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub is_abstract: bool,
    /// DataType attribute of variables and variable types.
    pub data_type: Option<NodeId>,
    /// DataTypeDefinition attribute of data type nodes, when the server has one.
    pub definition: Option<DataTypeDefinition>,
}

impl Node {
    pub fn new(node_id: NodeId, node_class: NodeClass, browse_name: QualifiedName) -> Self {
        let display_name = LocalizedText::from(browse_name.name.as_str());
        Self {
            node_id,
            node_class,
            browse_name,
            display_name,
            is_abstract: false,
            data_type: None,
            definition: None,
        }
    }

    /// A data type node named in the namespace of its id.
    pub fn data_type_node(node_id: NodeId, name: &str) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self::new(node_id, NodeClass::DataType, browse_name)
    }

    pub fn object(node_id: NodeId, name: &str) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self::new(node_id, NodeClass::Object, browse_name)
    }

    pub fn variable(node_id: NodeId, name: &str, data_type: NodeId) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace, name);
        Self {
            data_type: Some(data_type),
            ..Self::new(node_id, NodeClass::Variable, browse_name)
        }
    }

    pub fn with_definition(mut self, definition: DataTypeDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn with_browse_name(mut self, browse_name: QualifiedName) -> Self {
        self.browse_name = browse_name;
        self
    }

    pub fn set_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }
}

/// One reference returned by a browse.
///
/// `source` is the node the query was issued for; `target` is the node at
/// the other end, whichever the direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub source: NodeId,
    pub reference_type: NodeId,
    pub target: Node,
}

/// Asynchronous address space access.
#[async_trait]
pub trait NodeSource: Send + Sync {
    /// Read a node's attributes. `Ok(None)` when the node does not exist.
    async fn get_node(&self, node_id: &NodeId, ct: &CancellationToken) -> Result<Option<Node>>;

    /// Browse the references of several nodes in one round trip.
    async fn get_references(
        &self,
        sources: &[NodeId],
        reference_types: &[NodeId],
        forward: bool,
        include_subtypes: bool,
        ct: &CancellationToken,
    ) -> Result<Vec<Reference>>;

    /// Read the values of several variables in one round trip, in request order.
    async fn get_values(&self, node_ids: &[NodeId], ct: &CancellationToken)
        -> Result<Vec<DataValue>>;

    /// Read a single value.
    async fn get_value(&self, node_id: &NodeId, ct: &CancellationToken) -> Result<DataValue> {
        self.get_values(std::slice::from_ref(node_id), ct)
            .await?
            .pop()
            .ok_or_else(|| Error::NodeSource(format!("no value returned for {}", node_id)))
    }
}

/// Fail fast when `ct` has fired.
pub(crate) fn check_cancelled(ct: &CancellationToken) -> Result<()> {
    if ct.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}
