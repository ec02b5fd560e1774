// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node and type identifiers.
//!
//! `NodeId` is the server-local form (namespace index + identifier).
//! `ExpandedNodeId` may carry a namespace URI instead of an index and is the
//! form used when a type identifier crosses a session boundary. The
//! `NamespaceTable` converts between the two.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace URI of namespace index 0.
pub const OPC_UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// The identifier part of a node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Uuid),
    Opaque(Vec<u8>),
}

impl Identifier {
    fn is_null(&self) -> bool {
        match self {
            Self::Numeric(v) => *v == 0,
            Self::String(s) => s.is_empty(),
            Self::Guid(g) => g.is_nil(),
            Self::Opaque(b) => b.is_empty(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "i={}", v),
            Self::String(s) => write!(f, "s={}", s),
            Self::Guid(g) => write!(f, "g={}", g),
            Self::Opaque(b) => write!(f, "b={}", BASE64.encode(b)),
        }
    }
}

impl FromStr for Identifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, body) = s
            .split_once('=')
            .ok_or_else(|| format!("missing identifier type in '{}'", s))?;
        match tag {
            "i" => body
                .parse::<u32>()
                .map(Self::Numeric)
                .map_err(|e| format!("invalid numeric identifier '{}': {}", body, e)),
            "s" => Ok(Self::String(body.to_string())),
            "g" => Uuid::parse_str(body)
                .map(Self::Guid)
                .map_err(|e| format!("invalid guid identifier '{}': {}", body, e)),
            "b" => BASE64
                .decode(body)
                .map(Self::Opaque)
                .map_err(|e| format!("invalid opaque identifier '{}': {}", body, e)),
            other => Err(format!("unknown identifier type '{}'", other)),
        }
    }
}

// ============================================================================
// NodeId
// ============================================================================

/// A server-local node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// The null node id (`i=0`).
    pub const NULL: NodeId = NodeId {
        namespace: 0,
        identifier: Identifier::Numeric(0),
    };

    pub fn new(namespace: u16, identifier: Identifier) -> Self {
        Self {
            namespace,
            identifier,
        }
    }

    pub const fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    pub fn null() -> Self {
        Self::NULL
    }

    /// True for the null identifier in namespace 0 (numeric 0, empty string,
    /// nil guid or empty opaque).
    pub fn is_null(&self) -> bool {
        self.namespace == 0 && self.identifier.is_null()
    }

    /// The numeric value when this is a namespace 0 numeric id.
    pub fn as_ns0_numeric(&self) -> Option<u32> {
        match (self.namespace, &self.identifier) {
            (0, Identifier::Numeric(v)) => Some(*v),
            _ => None,
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        write!(f, "{}", self.identifier)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("ns=") {
            let (ns, id) = rest
                .split_once(';')
                .ok_or_else(|| format!("missing identifier in '{}'", s))?;
            let namespace = ns
                .parse::<u16>()
                .map_err(|e| format!("invalid namespace index '{}': {}", ns, e))?;
            return Ok(Self::new(namespace, id.parse()?));
        }
        Ok(Self::new(0, s.parse()?))
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self::numeric(0, value)
    }
}

// ============================================================================
// ExpandedNodeId
// ============================================================================

/// A node identifier that may be qualified by namespace URI and server index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    /// When set, takes precedence over `node_id.namespace`.
    pub namespace_uri: Option<String>,
    pub server_index: u32,
}

impl ExpandedNodeId {
    pub fn null() -> Self {
        Self::from(NodeId::NULL)
    }

    /// Qualify an identifier by namespace URI.
    pub fn with_uri(uri: impl Into<String>, identifier: Identifier) -> Self {
        Self {
            node_id: NodeId::new(0, identifier),
            namespace_uri: Some(uri.into()),
            server_index: 0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace_uri.is_none() && self.server_index == 0 && self.node_id.is_null()
    }

    /// True when the id does not depend on a namespace table to be interpreted.
    pub fn is_local(&self) -> bool {
        self.namespace_uri.is_none() && self.server_index == 0
    }
}

impl Default for ExpandedNodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }
}

impl From<&NodeId> for ExpandedNodeId {
    fn from(node_id: &NodeId) -> Self {
        Self::from(node_id.clone())
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace_uri {
            Some(uri) => write!(f, "nsu={};{}", uri, self.node_id.identifier),
            None => write!(f, "{}", self.node_id),
        }
    }
}

impl FromStr for ExpandedNodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        let mut server_index = 0;
        if let Some(tail) = rest.strip_prefix("svr=") {
            let (svr, tail) = tail
                .split_once(';')
                .ok_or_else(|| format!("missing identifier in '{}'", s))?;
            server_index = svr
                .parse::<u32>()
                .map_err(|e| format!("invalid server index '{}': {}", svr, e))?;
            rest = tail;
        }
        if let Some(tail) = rest.strip_prefix("nsu=") {
            // The URI itself may contain ';', the identifier follows the last one.
            let (uri, id) = tail
                .rsplit_once(';')
                .ok_or_else(|| format!("missing identifier in '{}'", s))?;
            return Ok(Self {
                node_id: NodeId::new(0, id.parse()?),
                namespace_uri: Some(uri.to_string()),
                server_index,
            });
        }
        Ok(Self {
            node_id: rest.parse()?,
            namespace_uri: None,
            server_index,
        })
    }
}

// ============================================================================
// NamespaceTable
// ============================================================================

/// Ordered namespace URIs of a session; the index is the namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTable {
    uris: Vec<String>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self {
            uris: vec![OPC_UA_NAMESPACE_URI.to_string()],
        }
    }
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URI, returning its index. Known URIs keep their index.
    pub fn append(&mut self, uri: impl Into<String>) -> u16 {
        let uri = uri.into();
        if let Some(index) = self.index_of(&uri) {
            return index;
        }
        self.uris.push(uri);
        (self.uris.len() - 1) as u16
    }

    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris.iter().position(|u| u == uri).map(|i| i as u16)
    }

    pub fn uri(&self, index: u16) -> Option<&str> {
        self.uris.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// Local form of an expanded id. `None` for remote servers or unknown URIs.
    pub fn to_node_id(&self, id: &ExpandedNodeId) -> Option<NodeId> {
        if id.server_index != 0 {
            return None;
        }
        match &id.namespace_uri {
            None => Some(id.node_id.clone()),
            Some(uri) => self
                .index_of(uri)
                .map(|namespace| NodeId::new(namespace, id.node_id.identifier.clone())),
        }
    }

    /// Fully qualified form of a local id. Namespace 0 stays index based.
    pub fn to_expanded(&self, id: &NodeId) -> ExpandedNodeId {
        match self.uri(id.namespace) {
            Some(uri) if id.namespace != 0 => {
                ExpandedNodeId::with_uri(uri, id.identifier.clone())
            }
            _ => ExpandedNodeId::from(id.clone()),
        }
    }
}
