// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory address space.

use super::{check_cancelled, CancellationToken, Node, NodeSource, Reference};
use crate::error::{Error, Result};
use crate::types::{DataValue, NodeId, StatusCode};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Call counters of a [`MemoryNodeSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub get_node: usize,
    pub get_references: usize,
    pub get_values: usize,
}

#[derive(Debug, Clone)]
struct Link {
    source: NodeId,
    reference_type: NodeId,
    target: NodeId,
}

/// A static address space held in memory.
///
/// References are stored once in their forward direction and answered in
/// both. `include_subtypes` is ignored: reference types match exactly.
#[derive(Debug, Default)]
pub struct MemoryNodeSource {
    nodes: RwLock<HashMap<NodeId, Node>>,
    links: RwLock<Vec<Link>>,
    values: RwLock<HashMap<NodeId, DataValue>>,
    latency: Option<Duration>,
    get_node_calls: AtomicUsize,
    get_references_calls: AtomicUsize,
    get_values_calls: AtomicUsize,
    /// Reference types requested by each `get_references` call.
    browse_log: Mutex<Vec<Vec<NodeId>>>,
}

impl MemoryNodeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`; the delay is cancellable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn add_node(&self, node: Node) {
        self.nodes.write().insert(node.node_id.clone(), node);
    }

    pub fn add_reference(&self, source: &NodeId, reference_type: NodeId, target: &NodeId) {
        self.links.write().push(Link {
            source: source.clone(),
            reference_type,
            target: target.clone(),
        });
    }

    pub fn set_value(&self, node_id: &NodeId, value: DataValue) {
        self.values.write().insert(node_id.clone(), value);
    }

    pub fn node(&self, node_id: &NodeId) -> Option<Node> {
        self.nodes.read().get(node_id).cloned()
    }

    pub fn stats(&self) -> SourceStats {
        SourceStats {
            get_node: self.get_node_calls.load(Ordering::Relaxed),
            get_references: self.get_references_calls.load(Ordering::Relaxed),
            get_values: self.get_values_calls.load(Ordering::Relaxed),
        }
    }

    /// Number of `get_references` calls that asked for `reference_type`.
    pub fn browse_count(&self, reference_type: &NodeId) -> usize {
        self.browse_log
            .lock()
            .iter()
            .filter(|types| types.contains(reference_type))
            .count()
    }

    pub fn reset_stats(&self) {
        self.get_node_calls.store(0, Ordering::Relaxed);
        self.get_references_calls.store(0, Ordering::Relaxed);
        self.get_values_calls.store(0, Ordering::Relaxed);
        self.browse_log.lock().clear();
    }

    async fn round_trip(&self, ct: &CancellationToken) -> Result<()> {
        check_cancelled(ct)?;
        if let Some(latency) = self.latency {
            tokio::select! {
                _ = ct.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(latency) => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl NodeSource for MemoryNodeSource {
    async fn get_node(&self, node_id: &NodeId, ct: &CancellationToken) -> Result<Option<Node>> {
        self.get_node_calls.fetch_add(1, Ordering::Relaxed);
        self.round_trip(ct).await?;
        Ok(self.node(node_id))
    }

    async fn get_references(
        &self,
        sources: &[NodeId],
        reference_types: &[NodeId],
        forward: bool,
        _include_subtypes: bool,
        ct: &CancellationToken,
    ) -> Result<Vec<Reference>> {
        self.get_references_calls.fetch_add(1, Ordering::Relaxed);
        self.browse_log.lock().push(reference_types.to_vec());
        self.round_trip(ct).await?;

        let nodes = self.nodes.read();
        let links = self.links.read();
        let mut references = Vec::new();
        for source in sources {
            for link in links.iter() {
                if !reference_types.is_empty() && !reference_types.contains(&link.reference_type) {
                    continue;
                }
                let (near, far) = if forward {
                    (&link.source, &link.target)
                } else {
                    (&link.target, &link.source)
                };
                if near != source {
                    continue;
                }
                match nodes.get(far) {
                    Some(target) => references.push(Reference {
                        source: source.clone(),
                        reference_type: link.reference_type.clone(),
                        target: target.clone(),
                    }),
                    None => log::debug!("[MemoryNodeSource] dangling reference to {}", far),
                }
            }
        }
        Ok(references)
    }

    async fn get_values(
        &self,
        node_ids: &[NodeId],
        ct: &CancellationToken,
    ) -> Result<Vec<DataValue>> {
        self.get_values_calls.fetch_add(1, Ordering::Relaxed);
        self.round_trip(ct).await?;
        let values = self.values.read();
        Ok(node_ids
            .iter()
            .map(|id| {
                values
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| DataValue::bad(StatusCode::BAD_NODE_ID_UNKNOWN))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ids::reference_types;
    use crate::value::Value;

    fn sample() -> MemoryNodeSource {
        let source = MemoryNodeSource::new();
        let base = NodeId::numeric(0, 22);
        let a = NodeId::numeric(2, 1);
        let b = NodeId::numeric(2, 2);
        source.add_node(Node::data_type_node(base.clone(), "Structure"));
        source.add_node(Node::data_type_node(a.clone(), "A"));
        source.add_node(Node::data_type_node(b.clone(), "B"));
        source.add_reference(&base, reference_types::HAS_SUBTYPE, &a);
        source.add_reference(&base, reference_types::HAS_SUBTYPE, &b);
        source
    }

    #[tokio::test]
    async fn test_references_both_directions() {
        let source = sample();
        let ct = CancellationToken::new();
        let base = NodeId::numeric(0, 22);

        let forward = source
            .get_references(&[base.clone()], &[reference_types::HAS_SUBTYPE], true, false, &ct)
            .await
            .unwrap();
        assert_eq!(forward.len(), 2);
        assert!(forward.iter().all(|r| r.source == base));

        let inverse = source
            .get_references(&[NodeId::numeric(2, 1)], &[reference_types::HAS_SUBTYPE], false, false, &ct)
            .await
            .unwrap();
        assert_eq!(inverse.len(), 1);
        assert_eq!(inverse[0].target.node_id, base);

        let none = source
            .get_references(&[base], &[reference_types::HAS_ENCODING], true, false, &ct)
            .await
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(source.stats().get_references, 3);
        assert_eq!(source.browse_count(&reference_types::HAS_SUBTYPE), 2);
    }

    #[tokio::test]
    async fn test_values_and_missing_nodes() {
        let source = sample();
        let ct = CancellationToken::new();
        let id = NodeId::numeric(2, 50);
        source.set_value(&id, DataValue::new(Value::from("x")));

        let values = source.get_values(&[id.clone(), NodeId::numeric(2, 51)], &ct).await.unwrap();
        assert_eq!(values[0].value, Some(Value::from("x")));
        assert!(values[1].status().is_bad());
        assert!(source.get_value(&id, &ct).await.unwrap().status().is_good());
        assert!(source.get_node(&NodeId::numeric(9, 9), &ct).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_token_fails_calls() {
        let source = sample().with_latency(Duration::from_secs(30));
        let ct = CancellationToken::new();
        ct.cancel();
        let result = source.get_node(&NodeId::numeric(2, 1), &ct).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_latency() {
        let source = std::sync::Arc::new(sample().with_latency(Duration::from_secs(30)));
        let ct = CancellationToken::new();
        let task = {
            let source = source.clone();
            let ct = ct.clone();
            tokio::spawn(async move { source.get_node(&NodeId::numeric(2, 1), &ct).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        ct.cancel();
        let result = task.await.unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
