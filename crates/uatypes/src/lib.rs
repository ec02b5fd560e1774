// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uatypes - runtime data types for OPC UA clients
//!
//! Discovers user-defined structure and enumeration types from a server's
//! address space, validates them, caches them, and encodes or decodes
//! values of those types field by field.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uatypes::node_source::{CancellationToken, MemoryNodeSource};
//! use uatypes::types::{ExpandedNodeId, NodeId};
//! use uatypes::{DataTypeResolver, Result};
//!
//! # async fn run() -> Result<()> {
//! let source = Arc::new(MemoryNodeSource::new());
//! let resolver = DataTypeResolver::new(source);
//! let ct = CancellationToken::new();
//!
//! let id = ExpandedNodeId::from(NodeId::numeric(2, 3001));
//! if let Some(description) = resolver.structure_description(&id, &ct).await? {
//!     println!("{} has {} fields", description.type_id(), description.fields().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        DataTypeResolver                             |
//! |   resolve | preload | preload_all | get_definitions | cache          |
//! +-------------------------------+-------------------------------------+
//! |     DataTypeDefinition        |     DataTypeSystemCache             |
//! |     (node metadata)           |     binary / XML dictionaries       |
//! +-------------------------------+-------------------------------------+
//! |                          NodeSource                                 |
//! |   get_node | get_references | get_values  (async, cancellable)      |
//! +---------------------------------------------------------------------+
//!
//!   StructureDescription ──encode/decode──► Encoder / Decoder
//!                                            (binary, json)
//! ```
//!
//! ## Modules Overview
//!
//! - [`resolver`] - resolution engine and its cache (start here)
//! - [`description`] - validated structure and enumeration descriptions
//! - [`codec`] - structured field codec and reference wire formats
//! - [`dictionary`] - legacy binary and XML schema parsers
//! - [`type_system`] - per-session dictionary loading
//! - [`node_source`] - address space access trait and an in-memory source

/// Built-in type tags and their data type ids.
pub mod builtin;
/// Structured field codec (binary, JSON).
pub mod codec;
/// Resolver options (JSON / YAML).
pub mod config;
/// Raw data type definitions as servers publish them.
pub mod definition;
/// Validated type descriptions.
pub mod description;
/// Legacy dictionary schema parsers.
pub mod dictionary;
/// Error types.
pub mod error;
/// Address space access.
pub mod node_source;
/// Type resolution engine.
pub mod resolver;
/// Legacy dictionary loading per type system.
pub mod type_system;
/// Built-in OPC UA types.
pub mod types;
/// Dynamic values.
pub mod value;

pub use builtin::BuiltInType;
pub use codec::{Decoder, DescriptionLookup, Encoder, NoLookup};
pub use config::ResolverOptions;
pub use definition::{
    DataTypeDefinition, EnumDefinition, EnumField, StructureDefinition, StructureField,
};
pub use description::{
    DataTypeDescription, EncodingTriple, EnumDescription, StructureDescription,
    StructureFieldDescription, StructureType, ValueRank,
};
pub use dictionary::DictionaryKind;
pub use error::{Error, Result};
pub use node_source::{CancellationToken, MemoryNodeSource, Node, NodeClass, NodeSource};
pub use resolver::{DataTypeResolver, Resolution};
pub use type_system::{DataTypeSystemCache, DictionarySource};
pub use value::{EnumValue, Matrix, StructureValue, Value};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
