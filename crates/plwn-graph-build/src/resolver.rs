//! Entity ID → vertex handle mapping.

use plwn_graph_model::{EntityId, RelationCode};
use plwn_graph_store::{EdgeId, Graph, VertexId};
use std::collections::HashMap;

/// Owns a graph under construction together with the index from store IDs to
/// the vertices registered for them.
///
/// The resolver is the only way vertices enter the graph, so every vertex has
/// exactly one entity ID. [`VertexResolver::finish`] hands the graph out and
/// drops the index.
#[derive(Debug)]
pub struct VertexResolver<P> {
    graph: Graph<P>,
    index: HashMap<EntityId, VertexId>,
}

impl<P> VertexResolver<P> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            graph: Graph::with_capacity(vertices, 0),
            index: HashMap::with_capacity(vertices),
        }
    }

    /// Add a vertex carrying `payload` for `entity_id`.
    ///
    /// IDs are write-once: registering an ID again returns the existing
    /// handle and discards `payload`.
    pub fn register(&mut self, entity_id: EntityId, payload: P) -> VertexId {
        if let Some(&vertex) = self.index.get(&entity_id) {
            tracing::debug!(entity_id, "entity already registered");
            return vertex;
        }
        let vertex = self.graph.add_vertex(payload);
        self.index.insert(entity_id, vertex);
        vertex
    }

    pub fn resolve(&self, entity_id: EntityId) -> Option<VertexId> {
        self.index.get(&entity_id).copied()
    }

    /// Connect two resolved vertices.
    pub fn connect(&mut self, parent: VertexId, child: VertexId, relation: RelationCode) -> EdgeId {
        self.graph.add_edge(parent, child, relation)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn finish(self) -> Graph<P> {
        self.graph
    }
}

impl<P> Default for VertexResolver<P> {
    fn default() -> Self {
        Self::new()
    }
}
