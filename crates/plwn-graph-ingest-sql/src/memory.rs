//! In-memory store, for tests and fixtures.

use crate::queries;
use crate::store::{RelationRow, RelationalStore, StoreError};
use plwn_graph_model::{EntityId, LexicalUnit, RelationEdge, RelationTable};
use std::collections::BTreeSet;

/// Rows held in plain vectors and returned exactly as inserted.
///
/// Unlike a real database no `DISTINCT` is applied, which makes the
/// repository's own deduplication observable. Individual queries can be made
/// to fail with [`MemoryStore::failing`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lexical_units: Vec<LexicalUnit>,
    synset_ids: Vec<EntityId>,
    memberships: Vec<(EntityId, EntityId)>,
    synset_relations: Vec<RelationRow>,
    lexical_relations: Vec<RelationRow>,
    failing: BTreeSet<&'static str>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexical_unit(
        mut self,
        id: EntityId,
        lemma: &str,
        pos: i64,
        domain: i64,
        variant: i64,
    ) -> Self {
        self.lexical_units
            .push(LexicalUnit::new(id, lemma, pos, domain, variant));
        self
    }

    pub fn with_synset(mut self, id: EntityId) -> Self {
        self.synset_ids.push(id);
        self
    }

    pub fn with_member(mut self, synset_id: EntityId, lexical_unit_id: EntityId) -> Self {
        self.memberships.push((synset_id, lexical_unit_id));
        self
    }

    pub fn with_relation(
        mut self,
        table: RelationTable,
        parent: EntityId,
        child: EntityId,
        code: i64,
    ) -> Self {
        self.with_relation_row(table, RelationEdge::new(parent, child, code).into())
    }

    /// Add a relation row that may hold NULLs.
    pub fn with_relation_row(mut self, table: RelationTable, row: RelationRow) -> Self {
        match table {
            RelationTable::SynsetRelation => self.synset_relations.push(row),
            RelationTable::LexicalRelation => self.lexical_relations.push(row),
        }
        self
    }

    /// Make every run of `query` (one of the [`crate::queries`] constants)
    /// return an error.
    pub fn failing(mut self, query: &'static str) -> Self {
        self.failing.insert(query);
        self
    }

    fn check(&self, query: &'static str) -> Result<(), StoreError> {
        if self.failing.contains(query) {
            return Err(StoreError::Unavailable(format!(
                "connection lost while running `{query}`"
            )));
        }
        Ok(())
    }
}

impl RelationalStore for MemoryStore {
    fn lexical_units(&self) -> Result<Vec<Option<LexicalUnit>>, StoreError> {
        self.check(queries::LEXICAL_UNITS)?;
        Ok(self.lexical_units.iter().cloned().map(Some).collect())
    }

    fn synset_ids(&self) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.check(queries::SYNSET_IDS)?;
        Ok(self.synset_ids.iter().copied().map(Some).collect())
    }

    fn synset_members(&self, synset_id: EntityId) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.check(queries::SYNSET_MEMBERS)?;
        Ok(self
            .memberships
            .iter()
            .filter(|(syn, _)| *syn == synset_id)
            .map(|&(_, lex)| Some(lex))
            .collect())
    }

    fn relations(&self, table: RelationTable) -> Result<Vec<RelationRow>, StoreError> {
        self.check(queries::relations(table))?;
        Ok(match table {
            RelationTable::SynsetRelation => self.synset_relations.clone(),
            RelationTable::LexicalRelation => self.lexical_relations.clone(),
        })
    }
}
