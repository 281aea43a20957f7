//! The two graph kinds.

use plwn_graph_ingest_sql::EntityRepository;
use plwn_graph_model::{EntityId, LexicalUnit, RelationEdge, RelationTable, Synset};
use plwn_graph_store::GraphPayload;
use std::collections::{BTreeMap, BTreeSet};

/// What differs between the lexical-unit and synset builds: where the
/// vertices come from and which relation table supplies the edges.
pub trait GraphKind {
    type Payload: GraphPayload;

    const RELATION_TABLE: RelationTable;

    /// Every entity of this kind, fully assembled, keyed by store ID.
    fn fetch_entities(&self, repo: &EntityRepository<'_>) -> BTreeMap<EntityId, Self::Payload>;

    fn fetch_relations(&self, repo: &EntityRepository<'_>) -> BTreeSet<RelationEdge> {
        repo.fetch_relations(Self::RELATION_TABLE)
    }
}

/// Vertices are lexical units, edges come from `lexicalrelation`.
///
/// [`LexicalUnitKind::with_lexical_units`] builds from an earlier fetch
/// instead of querying the store again.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalUnitKind<'u> {
    lexical_units: Option<&'u BTreeMap<EntityId, LexicalUnit>>,
}

impl<'u> LexicalUnitKind<'u> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexical_units(lexical_units: &'u BTreeMap<EntityId, LexicalUnit>) -> Self {
        Self {
            lexical_units: Some(lexical_units),
        }
    }
}

impl GraphKind for LexicalUnitKind<'_> {
    type Payload = LexicalUnit;

    const RELATION_TABLE: RelationTable = RelationTable::LexicalRelation;

    fn fetch_entities(&self, repo: &EntityRepository<'_>) -> BTreeMap<EntityId, LexicalUnit> {
        match self.lexical_units {
            Some(units) => units.clone(),
            None => repo.fetch_lexical_units(),
        }
    }
}

/// Vertices are synsets, edges come from `synsetrelation`.
///
/// Synset members are resolved against a lexical-unit collection. Pass one in
/// with [`SynsetKind::with_lexical_units`] to reuse an earlier fetch; otherwise
/// the units are fetched again.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynsetKind<'u> {
    lexical_units: Option<&'u BTreeMap<EntityId, LexicalUnit>>,
}

impl<'u> SynsetKind<'u> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexical_units(lexical_units: &'u BTreeMap<EntityId, LexicalUnit>) -> Self {
        Self {
            lexical_units: Some(lexical_units),
        }
    }
}

impl GraphKind for SynsetKind<'_> {
    type Payload = Synset;

    const RELATION_TABLE: RelationTable = RelationTable::SynsetRelation;

    fn fetch_entities(&self, repo: &EntityRepository<'_>) -> BTreeMap<EntityId, Synset> {
        match self.lexical_units {
            Some(units) => repo.fetch_synsets(units),
            None => repo.fetch_synsets(&repo.fetch_lexical_units()),
        }
    }
}
