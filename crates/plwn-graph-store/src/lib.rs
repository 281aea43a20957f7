//! In-memory PLWN graphs
//!
//! A [`Graph`] is a directed multigraph stored column-wise:
//!
//! - vertex payloads live in one vector indexed by [`VertexId`]
//! - edges live in one vector indexed by [`EdgeId`], each carrying its
//!   relation code
//! - per-vertex outgoing/incoming adjacency lists index into the edge vector
//!
//! Graphs are assembled once and then only read. Persistence goes through the
//! pure [`codec::encode`]/[`codec::decode`] pair (see [`persistence`] for the
//! file wrappers); the adjacency lists are derived data and are rebuilt on
//! decode rather than stored.

pub mod codec;
pub mod persistence;

use plwn_graph_model::{EntityId, LexicalUnit, RelationCode, Synset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use codec::{decode, encode, peek_kind, CodecError, GraphFormat, FORMAT_VERSION};
pub use persistence::{load, save};

// ============================================================================
// Handles
// ============================================================================

/// Vertex handle, valid only within the graph that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VertexId(u32);

impl VertexId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Edge handle, valid only within the graph that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Which entity type a graph's vertices carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GraphKindTag {
    LexicalUnit = 1,
    Synset = 2,
}

impl GraphKindTag {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::LexicalUnit),
            2 => Some(Self::Synset),
            _ => None,
        }
    }

    /// Suffix used in exported file names (`<prefix>_lu.*`, `<prefix>_syn.*`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::LexicalUnit => "lu",
            Self::Synset => "syn",
        }
    }
}

impl fmt::Display for GraphKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LexicalUnit => f.write_str("lexical-unit"),
            Self::Synset => f.write_str("synset"),
        }
    }
}

/// A value that can be attached to a vertex and persisted with the graph.
pub trait GraphPayload: Serialize + DeserializeOwned {
    const KIND: GraphKindTag;

    /// ID of the entity in the relational store.
    fn entity_id(&self) -> EntityId;
}

impl GraphPayload for LexicalUnit {
    const KIND: GraphKindTag = GraphKindTag::LexicalUnit;

    fn entity_id(&self) -> EntityId {
        self.id()
    }
}

impl GraphPayload for Synset {
    const KIND: GraphKindTag = GraphKindTag::Synset;

    fn entity_id(&self) -> EntityId {
        self.id()
    }
}

// ============================================================================
// Graph
// ============================================================================

/// A directed edge carrying one relation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    pub relation: RelationCode,
}

/// Directed multigraph with one payload per vertex and one relation code per
/// edge. Parallel edges between the same pair of vertices are allowed.
#[derive(Debug, Clone)]
pub struct Graph<P> {
    vertices: Vec<P>,
    edges: Vec<Edge>,
    /// vertex -> outgoing edge IDs
    outgoing: Vec<Vec<EdgeId>>,
    /// vertex -> incoming edge IDs
    incoming: Vec<Vec<EdgeId>>,
}

pub type LexicalUnitGraph = Graph<LexicalUnit>;
pub type SynsetGraph = Graph<Synset>;

impl<P> Graph<P> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            outgoing: Vec::with_capacity(vertices),
            incoming: Vec::with_capacity(vertices),
        }
    }

    /// Rebuild a graph from its stored columns.
    ///
    /// Returns the index of the first edge that points outside `vertices`.
    pub(crate) fn from_parts(vertices: Vec<P>, edges: Vec<Edge>) -> Result<Self, usize> {
        let mut graph = Self {
            outgoing: vec![Vec::new(); vertices.len()],
            incoming: vec![Vec::new(); vertices.len()],
            vertices,
            edges: Vec::with_capacity(edges.len()),
        };
        for (i, edge) in edges.into_iter().enumerate() {
            if !graph.contains_vertex(edge.source) || !graph.contains_vertex(edge.target) {
                return Err(i);
            }
            graph.push_edge(edge);
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertices.len()
    }

    /// Add a vertex carrying `payload`.
    pub fn add_vertex(&mut self, payload: P) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(payload);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Add a directed edge `source -> target` carrying `relation`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        relation: RelationCode,
    ) -> EdgeId {
        assert!(
            self.contains_vertex(source) && self.contains_vertex(target),
            "edge {source:?} -> {target:?} references a vertex outside the graph"
        );
        self.push_edge(Edge {
            source,
            target,
            relation,
        })
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.outgoing[edge.source.index()].push(id);
        self.incoming[edge.target.index()].push(id);
        self.edges.push(edge);
        id
    }

    pub fn vertex(&self, vertex: VertexId) -> Option<&P> {
        self.vertices.get(vertex.index())
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge.0 as usize)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &P)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, p)| (VertexId(i as u32), p))
    }

    pub fn payloads(&self) -> &[P] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(vertex.index())
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id.0 as usize))
    }

    pub fn incoming(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(vertex.index())
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id.0 as usize))
    }

    /// Relation codes of every edge `source -> target`, in insertion order.
    pub fn relations_between(&self, source: VertexId, target: VertexId) -> Vec<RelationCode> {
        self.outgoing(source)
            .filter(|e| e.target == target)
            .map(|e| e.relation)
            .collect()
    }

    /// Edge count per relation code.
    pub fn relation_histogram(&self) -> BTreeMap<RelationCode, usize> {
        let mut out = BTreeMap::new();
        for edge in &self.edges {
            *out.entry(edge.relation).or_insert(0) += 1;
        }
        out
    }
}

impl<P: GraphPayload> Graph<P> {
    pub fn kind(&self) -> GraphKindTag {
        P::KIND
    }

    /// Vertex carrying the entity with `entity_id`.
    ///
    /// This is a linear scan; builders keep their own ID map while a graph is
    /// being assembled.
    pub fn find_vertex(&self, entity_id: EntityId) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|p| p.entity_id() == entity_id)
            .map(|i| VertexId(i as u32))
    }

    /// `(parent entity, child entity, relation)` for every edge.
    pub fn entity_edges(&self) -> impl Iterator<Item = (EntityId, EntityId, RelationCode)> + '_ {
        self.edges.iter().map(|e| {
            (
                self.vertices[e.source.index()].entity_id(),
                self.vertices[e.target.index()].entity_id(),
                e.relation,
            )
        })
    }
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}
