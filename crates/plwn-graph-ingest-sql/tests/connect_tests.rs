//! Descriptor → connection → repository, over real SQLite files

use plwn_graph_ingest_sql::{
    connect, ConfigError, ConnectionConfig, Driver, EntityRepository, StoreError,
};
use plwn_graph_model::{CollectingDiagnostics, RelationTable};
use tempfile::tempdir;

fn write_database(path: &std::path::Path) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE lexicalunit (id INTEGER, lemma TEXT, pos INTEGER, domain INTEGER, variant INTEGER);
         CREATE TABLE synset (id INTEGER);
         CREATE TABLE unitandsynset (syn_id INTEGER, lex_id INTEGER);
         CREATE TABLE synsetrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
         CREATE TABLE lexicalrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
         INSERT INTO lexicalunit VALUES (1, 'pies', 2, 0, 1), (2, 'kot', 2, 0, 1);
         INSERT INTO synset VALUES (10);
         INSERT INTO unitandsynset VALUES (10, 1), (10, 2);
         INSERT INTO synsetrelation VALUES (10, 10, 30);",
    )
    .unwrap();
}

#[test]
fn test_properties_descriptor_opens_sqlite_file() {
    let dir = tempdir().unwrap();
    write_database(&dir.path().join("plwn.sqlite"));
    let descriptor = dir.path().join("db.properties");
    std::fs::write(&descriptor, "# local copy\nUrl=jdbc:sqlite:plwn.sqlite\n").unwrap();

    let config = ConnectionConfig::from_path(&descriptor).unwrap();
    let store = connect(&config).unwrap();
    let sink = CollectingDiagnostics::silent();
    let repo = EntityRepository::new(store.as_ref(), &sink);

    let units = repo.fetch_lexical_units();
    assert_eq!(units.len(), 2);
    assert_eq!(units[&1].to_string(), "pies:noun:1");

    let synsets = repo.fetch_synsets(&units);
    assert_eq!(synsets[&10].len(), 2);
    assert_eq!(repo.fetch_relations(RelationTable::SynsetRelation).len(), 1);
    assert!(repo.fetch_relations(RelationTable::LexicalRelation).is_empty());
    assert!(sink.is_empty());
}

#[test]
fn test_connect_to_missing_file_fails() {
    let dir = tempdir().unwrap();
    let config = ConnectionConfig::sqlite(dir.path().join("absent.sqlite"));
    assert!(matches!(connect(&config), Err(StoreError::Connect { .. })));
}

#[cfg(not(feature = "mysql"))]
#[test]
fn test_mysql_requires_feature() {
    let config = ConnectionConfig::from_jdbc_url("jdbc:mysql://localhost:3306/wordnet").unwrap();
    assert!(matches!(
        connect(&config),
        Err(StoreError::Config(ConfigError::DriverNotCompiled(Driver::MySql)))
    ));
}
