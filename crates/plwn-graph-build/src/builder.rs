//! The shared build routine.

use crate::kind::{GraphKind, LexicalUnitKind, SynsetKind};
use crate::resolver::VertexResolver;
use plwn_graph_ingest_sql::EntityRepository;
use plwn_graph_model::{Anomaly, EntityId, LexicalUnit, Side};
use plwn_graph_store::{Graph, GraphKindTag, GraphPayload, LexicalUnitGraph, SynsetGraph};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub kind: GraphKindTag,
    pub vertices: usize,
    pub edges: usize,
    /// Relation rows skipped because an endpoint was not a vertex.
    pub dropped_edges: usize,
}

impl BuildSummary {
    /// Summary of an already built (or loaded) graph.
    pub fn of<P: GraphPayload>(graph: &Graph<P>) -> Self {
        Self {
            kind: P::KIND,
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            dropped_edges: 0,
        }
    }
}

/// Build one graph of kind `K`.
///
/// 1. fetch and register every entity, in ascending ID order
/// 2. fetch the kind's relation rows
/// 3. add an edge per row whose endpoints both resolve; report and skip the
///    rest (the parent is checked first and only the first missing side is
///    reported)
pub fn build_graph<K: GraphKind>(
    kind: &K,
    repo: &EntityRepository<'_>,
) -> (Graph<K::Payload>, BuildSummary) {
    let graph_kind = <K::Payload as GraphPayload>::KIND;
    let table = K::RELATION_TABLE;
    let diagnostics = repo.diagnostics();

    let entities = kind.fetch_entities(repo);
    tracing::info!(kind = %graph_kind, count = entities.len(), "registering vertices");

    let mut resolver = VertexResolver::with_capacity(entities.len());
    for (id, payload) in entities {
        resolver.register(id, payload);
    }

    let relations = kind.fetch_relations(repo);
    tracing::info!(kind = %graph_kind, table = %table, count = relations.len(), "adding edges");

    let mut dropped_edges = 0;
    for edge in relations {
        let endpoints = resolve_endpoint(&resolver, Side::Parent, edge.parent).and_then(|parent| {
            resolve_endpoint(&resolver, Side::Child, edge.child).map(|child| (parent, child))
        });
        match endpoints {
            Ok((parent, child)) => {
                resolver.connect(parent, child, edge.code);
            }
            Err((side, entity_id)) => {
                dropped_edges += 1;
                diagnostics.warn(Anomaly::DanglingRelation {
                    table,
                    side,
                    entity_id,
                });
            }
        }
    }

    let graph = resolver.finish();
    let summary = BuildSummary {
        kind: graph_kind,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        dropped_edges,
    };
    tracing::info!(
        kind = %graph_kind,
        vertices = summary.vertices,
        edges = summary.edges,
        dropped = summary.dropped_edges,
        "graph built"
    );
    (graph, summary)
}

fn resolve_endpoint<P>(
    resolver: &VertexResolver<P>,
    side: Side,
    entity_id: EntityId,
) -> Result<plwn_graph_store::VertexId, (Side, EntityId)> {
    resolver.resolve(entity_id).ok_or((side, entity_id))
}

/// Build the lexical-unit graph, from `lexical_units` when given.
pub fn build_lexical_unit_graph(
    repo: &EntityRepository<'_>,
    lexical_units: Option<&BTreeMap<EntityId, LexicalUnit>>,
) -> (LexicalUnitGraph, BuildSummary) {
    let kind = match lexical_units {
        Some(units) => LexicalUnitKind::with_lexical_units(units),
        None => LexicalUnitKind::new(),
    };
    build_graph(&kind, repo)
}

/// Build the synset graph, reusing `lexical_units` for member resolution when
/// given.
pub fn build_synset_graph(
    repo: &EntityRepository<'_>,
    lexical_units: Option<&BTreeMap<EntityId, LexicalUnit>>,
) -> (SynsetGraph, BuildSummary) {
    let kind = match lexical_units {
        Some(units) => SynsetKind::with_lexical_units(units),
        None => SynsetKind::new(),
    };
    build_graph(&kind, repo)
}
