//! SQLite backend.

use crate::queries;
use crate::store::{RelationRow, RelationalStore, StoreError};
use plwn_graph_model::{EntityId, LexicalUnit, RelationTable};
use rusqlite::{params, Connection, OpenFlags, ToSql};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let target = path.display().to_string();
        if !path.is_file() {
            return Err(StoreError::Connect {
                target,
                reason: "database file does not exist".to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Connect {
            target: target.clone(),
            reason: e.to_string(),
        })?;

        // Forces SQLite to read the header, so non-database files fail here.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StoreError::Connect {
                target,
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "opened sqlite database");
        Ok(Self { conn })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn ids(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Option<EntityId>>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let ids = stmt
            .query_map(params, |row| row.get::<_, Option<EntityId>>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

impl RelationalStore for SqliteStore {
    fn lexical_units(&self) -> Result<Vec<Option<LexicalUnit>>, StoreError> {
        let mut stmt = self.conn.prepare(queries::LEXICAL_UNITS)?;
        let units = stmt
            .query_map([], |row| {
                let Some(id) = row.get::<_, Option<EntityId>>(0)? else {
                    return Ok(None);
                };
                Ok(Some(LexicalUnit::new(
                    id,
                    row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
                    row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
                    row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
                )))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(units)
    }

    fn synset_ids(&self) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.ids(queries::SYNSET_IDS, params![])
    }

    fn synset_members(&self, synset_id: EntityId) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.ids(queries::SYNSET_MEMBERS, params![synset_id])
    }

    fn relations(&self, table: RelationTable) -> Result<Vec<RelationRow>, StoreError> {
        let mut stmt = self.conn.prepare(queries::relations(table))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RelationRow {
                    parent: row.get(0)?,
                    child: row.get(1)?,
                    code: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plwn_graph_model::RelationEdge;
    use tempfile::tempdir;

    fn seeded() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE lexicalunit (id INTEGER, lemma TEXT, pos INTEGER, domain INTEGER, variant INTEGER);
             CREATE TABLE synset (id INTEGER);
             CREATE TABLE unitandsynset (syn_id INTEGER, lex_id INTEGER);
             CREATE TABLE synsetrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
             CREATE TABLE lexicalrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
             INSERT INTO lexicalunit VALUES (1, 'pies', 2, 0, 1), (1, 'pies', 2, 0, 1), (2, NULL, 2, NULL, 1);
             INSERT INTO synset VALUES (10), (10), (11);
             INSERT INTO unitandsynset VALUES (10, 1), (10, 2), (11, 2);
             INSERT INTO lexicalrelation VALUES (1, 2, 5), (1, 2, 5), (1, 2, 7);",
        )
        .unwrap();
        SqliteStore::from_connection(conn)
    }

    #[test]
    fn test_queries_apply_distinct() {
        let store = seeded();
        assert_eq!(store.lexical_units().unwrap().len(), 2);
        let mut ids = store.synset_ids().unwrap();
        ids.sort();
        assert_eq!(ids, vec![Some(10), Some(11)]);
        assert_eq!(store.relations(RelationTable::LexicalRelation).unwrap().len(), 2);
        assert!(store.relations(RelationTable::SynsetRelation).unwrap().is_empty());
    }

    #[test]
    fn test_null_columns_fall_back_to_defaults() {
        let store = seeded();
        let units = store.lexical_units().unwrap();
        let kot = units.iter().flatten().find(|u| u.id() == 2).unwrap();
        assert_eq!(kot.lemma(), "");
        assert_eq!(kot.domain(), 0);
    }

    #[test]
    fn test_members_are_bound_per_synset() {
        let store = seeded();
        let mut members = store.synset_members(10).unwrap();
        members.sort();
        assert_eq!(members, vec![Some(1), Some(2)]);
        assert!(store.synset_members(99).unwrap().is_empty());
    }

    #[test]
    fn test_null_relation_column_fails_only_its_row() {
        let store = seeded();
        store
            .conn
            .execute_batch("INSERT INTO lexicalrelation VALUES (NULL, 2, 6), (1, 2, NULL);")
            .unwrap();

        let rows = store.relations(RelationTable::LexicalRelation).unwrap();
        assert_eq!(rows.len(), 4);
        let mut complete: Vec<_> = rows.iter().filter_map(|r| r.complete().ok()).collect();
        complete.sort();
        assert_eq!(
            complete,
            vec![RelationEdge::new(1, 2, 5), RelationEdge::new(1, 2, 7)]
        );
        assert!(rows.iter().any(|r| r.complete() == Err("parent_id")));
        assert!(rows.iter().any(|r| r.complete() == Err("rel_id")));
    }

    #[test]
    fn test_null_lexical_unit_id_fails_only_its_row() {
        let store = seeded();
        store
            .conn
            .execute_batch("INSERT INTO lexicalunit VALUES (NULL, 'sierota', 2, 0, 1);")
            .unwrap();

        let units = store.lexical_units().unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units.iter().filter(|u| u.is_none()).count(), 1);
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let store = SqliteStore::from_connection(Connection::open_in_memory().unwrap());
        assert!(matches!(
            store.synset_ids(),
            Err(StoreError::Query { driver: crate::Driver::Sqlite, .. })
        ));
    }

    #[test]
    fn test_open_rejects_missing_and_non_database_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SqliteStore::open(&dir.path().join("absent.sqlite")),
            Err(StoreError::Connect { .. })
        ));

        let junk = dir.path().join("junk.sqlite");
        std::fs::write(&junk, vec![0x42u8; 4096]).unwrap();
        assert!(matches!(SqliteStore::open(&junk), Err(StoreError::Connect { .. })));
    }
}
