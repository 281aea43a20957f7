//! plWordNet relational source
//!
//! Reads the five plWordNet tables through a fixed set of queries:
//!
//! - [`config`]: connection descriptors (properties or YAML files)
//! - [`RelationalStore`]: raw row access, implemented for SQLite, MySQL (with
//!   the `mysql` feature) and an in-memory [`MemoryStore`]
//! - [`EntityRepository`]: deduplication and referential checks on top of a
//!   store, reporting problems to a [`plwn_graph_model::Diagnostics`] sink

pub mod config;
pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod queries;
pub mod repository;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod store;

pub use config::{ConfigError, ConnectionConfig, Driver};
pub use memory::MemoryStore;
#[cfg(feature = "mysql")]
pub use mysql::MySqlStore;
pub use repository::EntityRepository;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use store::{connect, RelationRow, RelationalStore, StoreError};
