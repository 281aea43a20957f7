//! End-to-end tests of the `plwn-graph` binary against a SQLite database

use rusqlite::Connection;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn plwn_graph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plwn-graph"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run plwn-graph")
}

fn seed_database(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE lexicalunit (id INTEGER, lemma TEXT, pos INTEGER, domain INTEGER, variant INTEGER);
         CREATE TABLE synset (id INTEGER);
         CREATE TABLE unitandsynset (syn_id INTEGER, lex_id INTEGER);
         CREATE TABLE synsetrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
         CREATE TABLE lexicalrelation (parent_id INTEGER, child_id INTEGER, rel_id INTEGER);
         INSERT INTO lexicalunit VALUES (1, 'pies', 2, 0, 1), (2, 'kot', 2, 0, 1);
         INSERT INTO synset VALUES (10);
         INSERT INTO unitandsynset VALUES (10, 1), (10, 2), (10, 999);
         INSERT INTO lexicalrelation VALUES (1, 2, 5);",
    )
    .unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_export_writes_both_graphs() {
    let dir = tempdir().unwrap();
    seed_database(&dir.path().join("plwn.sqlite"));
    let config = dir.path().join("db.properties");
    std::fs::write(&config, "Url=jdbc:sqlite:plwn.sqlite\n").unwrap();
    let prefix = dir.path().join("out").join("plwn-test");

    let output = plwn_graph(&[
        "export",
        "--db-config",
        config.to_str().unwrap(),
        "--out",
        prefix.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");

    let lu = dir.path().join("out").join("plwn-test_lu.plwg");
    let syn = dir.path().join("out").join("plwn-test_syn.plwg");
    assert!(lu.is_file());
    assert!(syn.is_file());

    let text = stdout(&output);
    assert!(text.contains("2 vertices, 1 edges"), "{text}");
    assert!(text.contains("dangling_member=1"), "{text}");

    let inspected = plwn_graph(&["inspect", "--json", syn.to_str().unwrap()]);
    assert!(inspected.status.success());
    let report: serde_json::Value = serde_json::from_slice(&inspected.stdout).unwrap();
    assert_eq!(report["kind"], "synset");
    assert_eq!(report["vertices"], 1);
    assert_eq!(report["edges"], 0);
}

#[test]
fn test_export_into_directory_as_json() {
    let dir = tempdir().unwrap();
    seed_database(&dir.path().join("plwn.sqlite"));
    let config = dir.path().join("db.yaml");
    std::fs::write(&config, "drivername: sqlite\ndatabase: plwn.sqlite\n").unwrap();

    let output = plwn_graph(&[
        "export",
        "--db-config",
        config.to_str().unwrap(),
        "--out",
        dir.path().to_str().unwrap(),
        "--graph",
        "lexical",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join("plwn_lu.json").is_file());
    assert!(!dir.path().join("plwn_syn.json").exists());

    let inspected = plwn_graph(&["inspect", dir.path().join("plwn_lu.json").to_str().unwrap()]);
    assert!(stdout(&inspected).contains("relation    5: 1"));
}

#[test]
fn test_reuse_skips_the_database() {
    let dir = tempdir().unwrap();
    seed_database(&dir.path().join("plwn.sqlite"));
    let config = dir.path().join("db.properties");
    std::fs::write(&config, "Url=jdbc:sqlite:plwn.sqlite\n").unwrap();
    let first = dir.path().join("first");

    let output = plwn_graph(&[
        "export",
        "--db-config",
        config.to_str().unwrap(),
        "--out",
        first.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");

    // No --db-config: both graphs must come from the saved snapshots.
    let second = dir.path().join("second");
    let output = plwn_graph(&[
        "export",
        "--in-lu-graph",
        dir.path().join("first_lu.plwg").to_str().unwrap(),
        "--in-syn-graph",
        dir.path().join("first_syn.plwg").to_str().unwrap(),
        "--out",
        second.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("loaded from"));
    assert_eq!(
        std::fs::read(dir.path().join("first_lu.plwg")).unwrap(),
        std::fs::read(dir.path().join("second_lu.plwg")).unwrap()
    );
}

#[test]
fn test_unreachable_database_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("db.properties");
    std::fs::write(&config, "Url=jdbc:sqlite:missing.sqlite\n").unwrap();
    let prefix = dir.path().join("plwn");

    let output = plwn_graph(&[
        "export",
        "--db-config",
        config.to_str().unwrap(),
        "--out",
        prefix.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!dir.path().join("plwn_lu.plwg").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot open the plWordNet database"));
}

#[test]
fn test_mysql_without_feature_or_server_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("db.properties");
    std::fs::write(
        &config,
        "User=reader\nPassword=secret\nUrl=jdbc:mysql://127.0.0.1:1/wordnet\n",
    )
    .unwrap();

    let output = plwn_graph(&["export", "--db-config", config.to_str().unwrap()]);
    assert!(!output.status.success());
}
