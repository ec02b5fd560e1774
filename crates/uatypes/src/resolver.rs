// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type resolution engine.
//!
//! Turns type ids into validated descriptions and keeps them for the
//! lifetime of the engine. Resolution of one id follows a fixed chain:
//!
//! ```text
//!   cache ──hit──► done
//!     │ miss
//!     ▼
//!   get_node ──► definition attribute ──valid──► Metadata
//!     │ none / invalid
//!     ▼
//!   binary dictionary ─┐
//!   xml dictionary ────┴─► BinaryDictionary | XmlDictionary | Rejected | Unresolved
//! ```
//!
//! Nested field types are resolved first, depth first, with a per-call
//! in-progress set so self and mutual references terminate. A published
//! description is registered under its type id and every encoding id; all
//! aliases share one `Arc`. The first validated publication of an id wins.

use crate::builtin::BuiltInType;
use crate::codec::DescriptionLookup;
use crate::config::ResolverOptions;
use crate::definition::DataTypeDefinition;
use crate::description::{
    DataTypeDescription, EncodingTriple, EnumDescription, StructureDescription,
};
use crate::dictionary::{DictionaryDefinition, DictionaryKind};
use crate::error::Result;
use crate::node_source::{check_cancelled, CancellationToken, Node, NodeClass, NodeSource, Reference};
use crate::type_system::{DataTypeSystemCache, DictionarySource};
use crate::types::ids::{browse_names, is_abstract_root, reference_types};
use crate::types::{ExpandedNodeId, NamespaceTable, NodeId, XmlQualifiedName};
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How one resolution ended.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Already in the cache.
    Cached(DataTypeDescription),
    /// Built from the node's definition attribute.
    Metadata(DataTypeDescription),
    /// Built from the binary dictionary (the type id caches this one when
    /// both dictionaries describe the type).
    BinaryDictionary(DataTypeDescription),
    /// Built from the XML dictionary alone.
    XmlDictionary(DataTypeDescription),
    /// A definition was found but none passed validation.
    Rejected,
    /// Nothing describes this id.
    Unresolved,
}

impl Resolution {
    pub fn description(&self) -> Option<&DataTypeDescription> {
        match self {
            Self::Cached(d) | Self::Metadata(d) | Self::BinaryDictionary(d) | Self::XmlDictionary(d) => {
                Some(d)
            }
            Self::Rejected | Self::Unresolved => None,
        }
    }

    pub fn into_description(self) -> Option<DataTypeDescription> {
        match self {
            Self::Cached(d) | Self::Metadata(d) | Self::BinaryDictionary(d) | Self::XmlDictionary(d) => {
                Some(d)
            }
            Self::Rejected | Self::Unresolved => None,
        }
    }
}

/// State of one top-level resolution call.
#[derive(Default)]
struct ResolveContext {
    /// Ids being resolved further up the current call chain.
    in_progress: HashSet<NodeId>,
    /// Encodings read ahead by a batched browse.
    encodings: HashMap<NodeId, EncodingTriple>,
    /// Ids whose definitions failed validation during this call, nested
    /// field types included.
    rejected: HashSet<NodeId>,
}

/// Resolves type ids against a node source and caches the results.
///
/// Each engine owns its cache; `clone` gives an independent engine over the
/// same collaborators whose cache starts empty.
pub struct DataTypeResolver {
    source: Arc<dyn NodeSource>,
    dictionaries: Option<Arc<dyn DictionarySource>>,
    namespaces: NamespaceTable,
    options: ResolverOptions,
    cache: DashMap<NodeId, DataTypeDescription>,
    unresolved: DashSet<NodeId>,
    publish: Mutex<()>,
}

impl DataTypeResolver {
    /// An engine whose legacy dictionaries are loaded from `source` itself.
    pub fn new(source: Arc<dyn NodeSource>) -> Self {
        let dictionaries: Arc<dyn DictionarySource> =
            Arc::new(DataTypeSystemCache::new(source.clone()));
        Self {
            source,
            dictionaries: Some(dictionaries),
            namespaces: NamespaceTable::default(),
            options: ResolverOptions::default(),
            cache: DashMap::new(),
            unresolved: DashSet::new(),
            publish: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_dictionaries(mut self, dictionaries: Arc<dyn DictionarySource>) -> Self {
        self.dictionaries = Some(dictionaries);
        self
    }

    #[must_use]
    pub fn with_namespaces(mut self, namespaces: NamespaceTable) -> Self {
        self.namespaces = namespaces;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Number of cache entries, aliases included.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cached description of a local id, without any resolution.
    pub fn cached(&self, type_id: &NodeId) -> Option<DataTypeDescription> {
        self.cache.get(type_id).map(|entry| entry.value().clone())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Description of `type_id`, resolving and caching it on a miss.
    ///
    /// Unknown, foreign and malformed types yield `Ok(None)`. Node source
    /// failures and cancellation are returned as errors.
    pub async fn resolve(
        &self,
        type_id: &ExpandedNodeId,
        ct: &CancellationToken,
    ) -> Result<Option<DataTypeDescription>> {
        Ok(self.resolve_with_origin(type_id, ct).await?.into_description())
    }

    /// Like [`resolve`](Self::resolve), reporting where the description came from.
    pub async fn resolve_with_origin(
        &self,
        type_id: &ExpandedNodeId,
        ct: &CancellationToken,
    ) -> Result<Resolution> {
        let Some(local) = self.local_id(type_id) else {
            return Ok(Resolution::Unresolved);
        };
        let mut ctx = ResolveContext::default();
        self.resolve_in(local, &mut ctx, ct).await
    }

    pub async fn structure_description(
        &self,
        type_id: &ExpandedNodeId,
        ct: &CancellationToken,
    ) -> Result<Option<Arc<StructureDescription>>> {
        Ok(self
            .resolve(type_id, ct)
            .await?
            .and_then(|d| d.as_structure().cloned()))
    }

    pub async fn enum_description(
        &self,
        type_id: &ExpandedNodeId,
        ct: &CancellationToken,
    ) -> Result<Option<Arc<EnumDescription>>> {
        Ok(self
            .resolve(type_id, ct)
            .await?
            .and_then(|d| d.as_enum().cloned()))
    }

    /// The description of `type_id` followed by every cached structure and
    /// enumeration reachable through its fields, in discovery order.
    pub async fn get_definitions(
        &self,
        type_id: &ExpandedNodeId,
        ct: &CancellationToken,
    ) -> Result<Vec<(NodeId, DataTypeDescription)>> {
        let Some(root) = self.resolve(type_id, ct).await? else {
            return Ok(Vec::new());
        };
        let mut seen = HashSet::from([root.type_id().clone()]);
        let mut queue = VecDeque::from([root]);
        let mut definitions = Vec::new();
        while let Some(description) = queue.pop_front() {
            if let Some(structure) = description.as_structure() {
                for field in structure.fields() {
                    let data_type = field.data_type();
                    if seen.contains(data_type) {
                        continue;
                    }
                    if let Some(nested) = self.cached(data_type) {
                        seen.insert(data_type.clone());
                        queue.push_back(nested);
                    }
                }
            }
            definitions.push((description.type_id().clone(), description));
        }
        Ok(definitions)
    }

    // ========================================================================
    // Preloading
    // ========================================================================

    /// Resolve `type_id` now, and with `include_subtypes` its whole subtype
    /// tree. Ids remembered as unresolved are tried again.
    pub async fn preload(
        &self,
        type_id: &ExpandedNodeId,
        include_subtypes: bool,
        ct: &CancellationToken,
    ) -> Result<()> {
        let Some(local) = self.local_id(type_id) else {
            return Ok(());
        };
        if include_subtypes {
            if !self.preload_hierarchy(local.clone(), ct).await? {
                log::debug!("[Resolver] subtypes of {} include invalid definitions", local);
            }
            return Ok(());
        }
        self.unresolved.remove(&local);
        let mut ctx = ResolveContext::default();
        self.resolve_in(local, &mut ctx, ct).await?;
        Ok(())
    }

    /// Resolve the entire hierarchy under the configured root.
    ///
    /// Returns `false` when some discovered type had a definition that
    /// failed validation. Everything that did validate stays cached.
    pub async fn preload_all(&self, ct: &CancellationToken) -> Result<bool> {
        let root = self.options.subtype_root()?;
        self.preload_hierarchy(root, ct).await
    }

    /// Breadth-first subtype walk: one browse per level, then one batched
    /// encoding browse for every type that still needs resolving.
    async fn preload_hierarchy(&self, root: NodeId, ct: &CancellationToken) -> Result<bool> {
        let mut visited = HashSet::from([root.clone()]);
        let mut discovered = vec![root.clone()];
        let mut frontier = vec![root.clone()];
        let mut levels = 0usize;
        while !frontier.is_empty() {
            check_cancelled(ct)?;
            let references = self
                .source
                .get_references(&frontier, &[reference_types::HAS_SUBTYPE], true, false, ct)
                .await?;
            levels += 1;
            frontier = references
                .into_iter()
                .map(|r| r.target.node_id)
                .filter(|id| visited.insert(id.clone()))
                .collect();
            discovered.extend(frontier.iter().cloned());
        }

        let pending: Vec<NodeId> = discovered
            .into_iter()
            .filter(|id| !is_known(id) && !self.cache.contains_key(id))
            .collect();
        log::debug!(
            "[Resolver] {} levels under {}: {} types to resolve",
            levels,
            root,
            pending.len()
        );
        if pending.is_empty() {
            return Ok(true);
        }

        for id in &pending {
            self.unresolved.remove(id);
        }
        let mut ctx = ResolveContext::default();
        let references = self
            .source
            .get_references(&pending, &[reference_types::HAS_ENCODING], true, false, ct)
            .await?;
        ctx.encodings = encodings_by_source(&references);
        for id in &pending {
            ctx.encodings.entry(id.clone()).or_default();
        }

        let mut resolved = 0usize;
        for id in &pending {
            if self.cache.contains_key(id) {
                continue;
            }
            match self.resolve_in(id.clone(), &mut ctx, ct).await? {
                Resolution::Rejected | Resolution::Unresolved => {}
                _ => resolved += 1,
            }
        }
        // A type first reached as a field of another pending type is
        // rejected there and only hits the negative cache here.
        let all_valid = !pending.iter().any(|id| ctx.rejected.contains(id));
        log::debug!(
            "[Resolver] preload under {} resolved {} types (valid: {})",
            root,
            resolved,
            all_valid
        );
        Ok(all_valid)
    }

    // ========================================================================
    // Resolution chain
    // ========================================================================

    fn local_id(&self, type_id: &ExpandedNodeId) -> Option<NodeId> {
        let local = self.namespaces.to_node_id(type_id);
        if local.is_none() {
            log::debug!("[Resolver] {} is not in the local namespace table", type_id);
        }
        local
    }

    fn resolve_in<'a>(
        &'a self,
        type_id: NodeId,
        ctx: &'a mut ResolveContext,
        ct: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Resolution>> {
        Box::pin(async move {
            if is_known(&type_id) {
                return Ok(Resolution::Unresolved);
            }
            if let Some(cached) = self.cached(&type_id) {
                return Ok(Resolution::Cached(cached));
            }
            if ctx.in_progress.contains(&type_id) {
                return Ok(Resolution::Unresolved);
            }
            if self.options.remember_unresolved && self.unresolved.contains(&type_id) {
                return Ok(Resolution::Unresolved);
            }
            check_cancelled(ct)?;

            ctx.in_progress.insert(type_id.clone());
            let outcome = self.resolve_uncached(&type_id, ctx, ct).await;
            ctx.in_progress.remove(&type_id);

            let outcome = outcome?;
            if matches!(outcome, Resolution::Rejected) {
                ctx.rejected.insert(type_id.clone());
            }
            if matches!(outcome, Resolution::Rejected | Resolution::Unresolved)
                && self.options.remember_unresolved
            {
                self.unresolved.insert(type_id);
            }
            Ok(outcome)
        })
    }

    async fn resolve_uncached(
        &self,
        type_id: &NodeId,
        ctx: &mut ResolveContext,
        ct: &CancellationToken,
    ) -> Result<Resolution> {
        let Some(node) = self.source.get_node(type_id, ct).await? else {
            log::debug!("[Resolver] {} does not exist", type_id);
            return Ok(Resolution::Unresolved);
        };
        if node.node_class != NodeClass::DataType {
            return self.redirect(node, ctx, ct).await;
        }

        let mut rejected = false;
        if let Some(definition) = &node.definition {
            self.resolve_fields(type_id, definition, ctx, ct).await?;
            let encodings = self.encodings(type_id, ctx, ct).await?;
            match self.describe(type_id, self.xml_name(&node), encodings, node.is_abstract, definition) {
                Some(description) => {
                    let aliases = description.encodings().ids().cloned().collect::<Vec<_>>();
                    let aliases = aliases
                        .into_iter()
                        .map(|id| (id, description.clone()))
                        .collect();
                    return Ok(Resolution::Metadata(self.publish(type_id, description, aliases)));
                }
                None => rejected = true,
            }
        }

        match self.resolve_from_dictionaries(type_id, &node, ctx, ct).await? {
            Resolution::Unresolved if rejected => Ok(Resolution::Rejected),
            outcome => Ok(outcome),
        }
    }

    /// Variables, variable types and encoding objects stand for a data type.
    async fn redirect(
        &self,
        node: Node,
        ctx: &mut ResolveContext,
        ct: &CancellationToken,
    ) -> Result<Resolution> {
        let target = match node.node_class {
            NodeClass::Variable => {
                let owners = self.inverse_encodings(&node.node_id, ct).await?;
                match owners.as_slice() {
                    [single] => Some(single.target.node_id.clone()),
                    _ => node.data_type.clone(),
                }
            }
            NodeClass::VariableType => node.data_type.clone(),
            NodeClass::Object => self
                .inverse_encodings(&node.node_id, ct)
                .await?
                .into_iter()
                .next()
                .map(|r| r.target.node_id),
            _ => None,
        };
        match target {
            Some(target) if !target.is_null() && target != node.node_id => {
                log::debug!("[Resolver] {} {} stands for {}", node.node_class, node.node_id, target);
                self.resolve_in(target, ctx, ct).await
            }
            _ => Ok(Resolution::Unresolved),
        }
    }

    async fn inverse_encodings(
        &self,
        node_id: &NodeId,
        ct: &CancellationToken,
    ) -> Result<Vec<Reference>> {
        self.source
            .get_references(
                std::slice::from_ref(node_id),
                &[reference_types::HAS_ENCODING],
                false,
                false,
                ct,
            )
            .await
    }

    async fn resolve_from_dictionaries(
        &self,
        type_id: &NodeId,
        node: &Node,
        ctx: &mut ResolveContext,
        ct: &CancellationToken,
    ) -> Result<Resolution> {
        let dictionaries = match &self.dictionaries {
            Some(dictionaries) if !self.options.disable_legacy_dictionaries => dictionaries.clone(),
            _ => return Ok(Resolution::Unresolved),
        };
        let binary = dictionaries
            .get_definition(DictionaryKind::Binary, type_id, ct)
            .await?;
        let xml = dictionaries
            .get_definition(DictionaryKind::Xml, type_id, ct)
            .await?;
        if binary.is_none() && xml.is_none() {
            log::debug!("[Resolver] no metadata or dictionary entry for {}", type_id);
            return Ok(Resolution::Unresolved);
        }

        for definition in binary.iter().chain(xml.iter()) {
            self.resolve_fields(type_id, &definition.definition, ctx, ct)
                .await?;
        }
        let mut encodings = self.encodings(type_id, ctx, ct).await?;
        if encodings.binary.is_null() {
            if let Some(definition) = &binary {
                encodings.binary = definition.encoding_id.clone();
            }
        }
        if encodings.xml.is_null() {
            if let Some(definition) = &xml {
                encodings.xml = definition.encoding_id.clone();
            }
        }

        let build = |definition: &Option<DictionaryDefinition>| {
            definition.as_ref().and_then(|d| {
                let xml_name = if d.xml_name.name.is_empty() {
                    self.xml_name(node)
                } else {
                    d.xml_name.clone()
                };
                self.describe(type_id, xml_name, encodings.clone(), node.is_abstract, &d.definition)
            })
        };
        let from_binary = build(&binary);
        let from_xml = build(&xml);

        let (primary, origin_binary) = match (&from_binary, &from_xml) {
            (Some(b), _) => (b.clone(), true),
            (None, Some(x)) => (x.clone(), false),
            (None, None) => return Ok(Resolution::Rejected),
        };
        let for_binary = from_binary.clone().unwrap_or_else(|| primary.clone());
        let for_xml = from_xml.clone().unwrap_or_else(|| primary.clone());
        let aliases = vec![
            (encodings.binary.clone(), for_binary),
            (encodings.xml.clone(), for_xml),
            (encodings.json.clone(), primary.clone()),
        ];
        let published = self.publish(type_id, primary, aliases);
        Ok(if origin_binary {
            Resolution::BinaryDictionary(published)
        } else {
            Resolution::XmlDictionary(published)
        })
    }

    /// Resolve the field types of a structure definition first, so the
    /// codec finds them in the cache.
    async fn resolve_fields(
        &self,
        type_id: &NodeId,
        definition: &DataTypeDefinition,
        ctx: &mut ResolveContext,
        ct: &CancellationToken,
    ) -> Result<()> {
        let DataTypeDefinition::Structure(structure) = definition else {
            return Ok(());
        };
        for field in &structure.fields {
            let data_type = &field.data_type;
            if data_type == type_id || is_known(data_type) || self.cache.contains_key(data_type) {
                continue;
            }
            if let Resolution::Unresolved | Resolution::Rejected =
                self.resolve_in(data_type.clone(), ctx, ct).await?
            {
                if !ctx.in_progress.contains(data_type) {
                    log::debug!(
                        "[Resolver] field '{}' of {} has unresolved type {}",
                        field.name,
                        type_id,
                        data_type
                    );
                }
            }
        }
        Ok(())
    }

    async fn encodings(
        &self,
        type_id: &NodeId,
        ctx: &ResolveContext,
        ct: &CancellationToken,
    ) -> Result<EncodingTriple> {
        if let Some(encodings) = ctx.encodings.get(type_id) {
            return Ok(encodings.clone());
        }
        let references = self
            .source
            .get_references(
                std::slice::from_ref(type_id),
                &[reference_types::HAS_ENCODING],
                true,
                false,
                ct,
            )
            .await?;
        Ok(encodings_by_source(&references)
            .remove(type_id)
            .unwrap_or_default())
    }

    fn xml_name(&self, node: &Node) -> XmlQualifiedName {
        let namespace = self
            .namespaces
            .uri(node.browse_name.namespace)
            .unwrap_or_default();
        XmlQualifiedName::new(namespace, node.browse_name.name.clone())
    }

    /// Validate a definition. Failures are logged and yield `None`.
    fn describe(
        &self,
        type_id: &NodeId,
        xml_name: XmlQualifiedName,
        encodings: EncodingTriple,
        is_abstract: bool,
        definition: &DataTypeDefinition,
    ) -> Option<DataTypeDescription> {
        match definition {
            DataTypeDefinition::Structure(structure) => {
                match StructureDescription::new(
                    type_id.clone(),
                    xml_name,
                    encodings,
                    is_abstract,
                    structure,
                ) {
                    Ok(description) => Some(description.into()),
                    Err(e) => {
                        log::warn!("[Resolver] rejecting definition of {}: {}", type_id, e);
                        None
                    }
                }
            }
            DataTypeDefinition::Enum(enumeration) => Some(
                EnumDescription::new(
                    type_id.clone(),
                    xml_name,
                    encodings,
                    is_abstract,
                    enumeration.clone(),
                )
                .into(),
            ),
        }
    }

    /// Register `description` under `type_id` and its aliases. When the id
    /// is already published the existing entry is kept and returned.
    fn publish(
        &self,
        type_id: &NodeId,
        description: DataTypeDescription,
        aliases: Vec<(NodeId, DataTypeDescription)>,
    ) -> DataTypeDescription {
        let _guard = self.publish.lock();
        if let Some(existing) = self.cache.get(type_id) {
            return existing.value().clone();
        }
        for (alias, target) in aliases {
            if alias.is_null() || alias == *type_id {
                continue;
            }
            self.cache.entry(alias).or_insert(target);
        }
        self.cache.insert(type_id.clone(), description.clone());
        self.unresolved.remove(type_id);
        log::debug!("[Resolver] published {}", description);
        description
    }
}

impl Clone for DataTypeResolver {
    /// Same collaborators and options, independent empty cache.
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            dictionaries: self.dictionaries.clone(),
            namespaces: self.namespaces.clone(),
            options: self.options.clone(),
            cache: DashMap::new(),
            unresolved: DashSet::new(),
            publish: Mutex::new(()),
        }
    }
}

impl fmt::Debug for DataTypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTypeResolver")
            .field("cached", &self.cache.len())
            .field("unresolved", &self.unresolved.len())
            .field("options", &self.options)
            .finish()
    }
}

impl DescriptionLookup for DataTypeResolver {
    fn structure(&self, type_id: &NodeId) -> Option<Arc<StructureDescription>> {
        self.cache
            .get(type_id)
            .and_then(|entry| entry.value().as_structure().cloned())
    }

    fn enumeration(&self, type_id: &NodeId) -> Option<Arc<EnumDescription>> {
        self.cache
            .get(type_id)
            .and_then(|entry| entry.value().as_enum().cloned())
    }
}

/// Built-in data types and abstract roots are never looked up.
fn is_known(type_id: &NodeId) -> bool {
    type_id.is_null() || is_abstract_root(type_id) || BuiltInType::is_builtin_data_type(type_id)
}

/// Encoding ids per data type, from forward `HasEncoding` references.
fn encodings_by_source(references: &[Reference]) -> HashMap<NodeId, EncodingTriple> {
    let mut encodings: HashMap<NodeId, EncodingTriple> = HashMap::new();
    for reference in references {
        let triple = encodings.entry(reference.source.clone()).or_default();
        let id = reference.target.node_id.clone();
        match reference.target.browse_name.name.as_str() {
            browse_names::DEFAULT_BINARY => triple.binary = id,
            browse_names::DEFAULT_XML => triple.xml = id,
            browse_names::DEFAULT_JSON => triple.json = id,
            other => log::debug!("[Resolver] ignoring encoding '{}' of {}", other, reference.source),
        }
    }
    encodings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_source::MemoryNodeSource;

    fn reference(source: &NodeId, name: &str, target: NodeId) -> Reference {
        Reference {
            source: source.clone(),
            reference_type: reference_types::HAS_ENCODING,
            target: Node::object(target, name),
        }
    }

    #[test]
    fn test_encodings_matched_by_browse_name() {
        let a = NodeId::numeric(2, 1);
        let b = NodeId::numeric(2, 2);
        let references = vec![
            reference(&a, browse_names::DEFAULT_BINARY, NodeId::numeric(2, 10)),
            reference(&a, browse_names::DEFAULT_JSON, NodeId::numeric(2, 11)),
            reference(&b, browse_names::DEFAULT_XML, NodeId::numeric(2, 20)),
            reference(&b, "Vendor Binary", NodeId::numeric(2, 21)),
        ];
        let encodings = encodings_by_source(&references);
        assert_eq!(
            encodings[&a],
            EncodingTriple::new(NodeId::numeric(2, 10), NodeId::NULL, NodeId::numeric(2, 11))
        );
        assert_eq!(
            encodings[&b],
            EncodingTriple::new(NodeId::NULL, NodeId::numeric(2, 20), NodeId::NULL)
        );
    }

    #[test]
    fn test_known_types() {
        assert!(is_known(&NodeId::NULL));
        assert!(is_known(&crate::types::ids::data_types::INT32));
        assert!(is_known(&crate::types::ids::data_types::BASE_DATA_TYPE));
        assert!(is_known(&crate::types::ids::data_types::UNION));
        assert!(!is_known(&NodeId::numeric(2, 1)));
    }

    #[tokio::test]
    async fn test_foreign_namespace_is_unresolved_without_io() {
        let source = Arc::new(MemoryNodeSource::new());
        let resolver = DataTypeResolver::new(source.clone());
        let foreign = ExpandedNodeId {
            node_id: NodeId::numeric(0, 5),
            namespace_uri: Some("urn:elsewhere".into()),
            server_index: 0,
        };
        let ct = CancellationToken::new();
        assert!(resolver.resolve(&foreign, &ct).await.unwrap().is_none());
        assert_eq!(source.stats().get_node, 0);
    }

    #[tokio::test]
    async fn test_clone_starts_empty() {
        let source = Arc::new(MemoryNodeSource::new());
        let id = NodeId::numeric(2, 3000);
        source.add_node(
            Node::data_type_node(id.clone(), "Mode").with_definition(DataTypeDefinition::Enum(
                crate::definition::EnumDefinition::new(vec![crate::definition::EnumField::new(
                    "On", 1,
                )]),
            )),
        );
        let resolver = DataTypeResolver::new(source);
        let ct = CancellationToken::new();
        resolver
            .resolve(&ExpandedNodeId::from(&id), &ct)
            .await
            .unwrap()
            .expect("enum");
        assert_eq!(resolver.len(), 1);

        let clone = resolver.clone();
        assert!(clone.is_empty());
        let again = clone
            .resolve(&ExpandedNodeId::from(&id), &ct)
            .await
            .unwrap()
            .expect("enum");
        assert_eq!(Some(again), resolver.cached(&id));
    }
}
