//! Entity repository: deduplicated, validated views over a [`RelationalStore`].

use crate::queries;
use crate::store::{RelationalStore, StoreError};
use plwn_graph_model::{
    Anomaly, Diagnostics, EntityId, IntegrityError, LexicalUnit, RelationEdge, RelationTable,
    Synset,
};
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

/// Runs the fixed extraction queries and turns raw rows into entity
/// collections.
///
/// Nothing here is fatal. Store errors and data-quality problems are reported
/// to the diagnostics sink and the affected call yields an empty (or filtered)
/// result, so an empty collection means "nothing found", not "nothing exists".
#[derive(Clone, Copy)]
pub struct EntityRepository<'a> {
    store: &'a dyn RelationalStore,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> EntityRepository<'a> {
    pub fn new(store: &'a dyn RelationalStore, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { store, diagnostics }
    }

    pub fn diagnostics(&self) -> &'a dyn Diagnostics {
        self.diagnostics
    }

    fn recover<T: Default>(&self, query: &'static str, result: Result<T, StoreError>) -> T {
        result.unwrap_or_else(|err| {
            self.diagnostics.warn(Anomaly::QueryFailed {
                query,
                error: err.to_string(),
            });
            T::default()
        })
    }

    /// All lexical units keyed by ID.
    ///
    /// Repeated identical rows collapse silently. A row reusing an ID with
    /// different attributes is reported as an [`IntegrityError`] and skipped;
    /// the first row seen for an ID wins.
    pub fn fetch_lexical_units(&self) -> BTreeMap<EntityId, LexicalUnit> {
        let rows = self.recover(queries::LEXICAL_UNITS, self.store.lexical_units());

        let mut units = BTreeMap::new();
        for row in rows {
            let Some(unit) = row else {
                self.diagnostics.warn(Anomaly::NullColumn {
                    table: "lexicalunit",
                    column: "id",
                });
                continue;
            };
            match units.entry(unit.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(unit);
                }
                Entry::Occupied(kept) => {
                    if !kept.get().same_attributes(&unit) {
                        self.diagnostics
                            .warn(Anomaly::DuplicateLexicalUnit(IntegrityError {
                                id: unit.id(),
                                kept: kept.get().clone(),
                                skipped: unit,
                            }));
                    }
                }
            }
        }

        tracing::debug!(count = units.len(), "fetched lexical units");
        units
    }

    /// Non-NULL IDs; each NULL is reported against `table.column`.
    fn present_ids(
        &self,
        ids: Vec<Option<EntityId>>,
        table: &'static str,
        column: &'static str,
    ) -> BTreeSet<EntityId> {
        ids.into_iter()
            .filter_map(|id| {
                if id.is_none() {
                    self.diagnostics.warn(Anomaly::NullColumn { table, column });
                }
                id
            })
            .collect()
    }

    pub fn fetch_synset_ids(&self) -> BTreeSet<EntityId> {
        let rows = self.recover(queries::SYNSET_IDS, self.store.synset_ids());
        let ids = self.present_ids(rows, "synset", "id");
        tracing::debug!(count = ids.len(), "fetched synset ids");
        ids
    }

    pub fn fetch_synset_members(&self, synset_id: EntityId) -> BTreeSet<EntityId> {
        let rows = self.recover(queries::SYNSET_MEMBERS, self.store.synset_members(synset_id));
        self.present_ids(rows, "unitandsynset", "lex_id")
    }

    /// Relation rows of `table`; rows with a NULL column are reported and
    /// skipped.
    pub fn fetch_relations(&self, table: RelationTable) -> BTreeSet<RelationEdge> {
        let edges: BTreeSet<_> = self
            .recover(queries::relations(table), self.store.relations(table))
            .into_iter()
            .filter_map(|row| match row.complete() {
                Ok(edge) => Some(edge),
                Err(column) => {
                    self.diagnostics.warn(Anomaly::NullColumn {
                        table: table.table_name(),
                        column,
                    });
                    None
                }
            })
            .collect();
        tracing::debug!(table = %table, count = edges.len(), "fetched relations");
        edges
    }

    /// Fully assembled synsets keyed by ID.
    ///
    /// Members are looked up per synset and resolved against `lexical_units`;
    /// a member missing from that collection is reported and left out.
    pub fn fetch_synsets(
        &self,
        lexical_units: &BTreeMap<EntityId, LexicalUnit>,
    ) -> BTreeMap<EntityId, Synset> {
        let mut synsets = BTreeMap::new();
        for synset_id in self.fetch_synset_ids() {
            let mut lu_set = BTreeSet::new();
            for lexical_unit_id in self.fetch_synset_members(synset_id) {
                match lexical_units.get(&lexical_unit_id) {
                    Some(unit) => {
                        lu_set.insert(unit.clone());
                    }
                    None => self.diagnostics.warn(Anomaly::DanglingMember {
                        synset_id,
                        lexical_unit_id,
                    }),
                }
            }
            synsets.insert(synset_id, Synset::new(synset_id, lu_set));
        }
        synsets
    }
}
