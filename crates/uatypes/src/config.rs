// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver options.
//!
//! Options are plain serde structs so they can live in the host
//! application's configuration file, in either JSON or YAML:
//!
//! ```yaml
//! disable_legacy_dictionaries: false
//! remember_unresolved: true
//! subtype_root: "i=22"
//! ```

use crate::error::{Error, Result};
use crate::types::ids::data_types;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Behaviour switches of a [`DataTypeResolver`](crate::DataTypeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Never fall back to the legacy binary and XML dictionaries.
    pub disable_legacy_dictionaries: bool,
    /// Remember ids that could not be resolved, so repeated lookups of
    /// foreign types do not reach the node source again. Preloading
    /// ignores and clears the marker.
    pub remember_unresolved: bool,
    /// Root of the hierarchy walked by `preload_all`, in textual node id
    /// form. BaseDataType when unset.
    pub subtype_root: Option<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            disable_legacy_dictionaries: false,
            remember_unresolved: true,
            subtype_root: None,
        }
    }
}

impl ResolverOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid JSON options: {}", e)))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Config(format!("invalid YAML options: {}", e)))
    }

    /// The `preload_all` root.
    pub fn subtype_root(&self) -> Result<NodeId> {
        match &self.subtype_root {
            None => Ok(data_types::BASE_DATA_TYPE),
            Some(text) => text
                .parse()
                .map_err(|e| Error::Config(format!("subtype_root '{}': {}", text, e))),
        }
    }
}
