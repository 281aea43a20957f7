//! The relational-store seam.

use crate::config::{ConfigError, ConnectionConfig, Driver};
use plwn_graph_model::{EntityId, LexicalUnit, RelationCode, RelationEdge, RelationTable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot connect to {target}: {reason}")]
    Connect { target: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error reported by the database driver while running a query.
    #[error("{driver} query failed: {message}")]
    Query { driver: Driver, message: String },

    #[error("{0}")]
    Unavailable(String),
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Query {
            driver: Driver::Sqlite,
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "mysql")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Query {
            driver: Driver::MySql,
            message: err.to_string(),
        }
    }
}

/// A relation row as stored; any column may be NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRow {
    pub parent: Option<EntityId>,
    pub child: Option<EntityId>,
    pub code: Option<RelationCode>,
}

impl RelationRow {
    /// The edge, or the name of the first NULL column.
    pub fn complete(self) -> Result<RelationEdge, &'static str> {
        match self {
            Self {
                parent: Some(parent),
                child: Some(child),
                code: Some(code),
            } => Ok(RelationEdge::new(parent, child, code)),
            Self { parent: None, .. } => Err("parent_id"),
            Self { child: None, .. } => Err("child_id"),
            Self { code: None, .. } => Err("rel_id"),
        }
    }
}

impl From<RelationEdge> for RelationRow {
    fn from(edge: RelationEdge) -> Self {
        Self {
            parent: Some(edge.parent),
            child: Some(edge.child),
            code: Some(edge.code),
        }
    }
}

/// Raw row access to a plWordNet database.
///
/// Implementations run the statements in [`crate::queries`] and return the
/// rows as typed values. They do not deduplicate or validate anything; that is
/// the job of [`crate::EntityRepository`]. ID and code columns come back as
/// `Option` so one NULL cell costs one row, not the whole query.
pub trait RelationalStore {
    /// `None` stands for a row whose `id` is NULL.
    fn lexical_units(&self) -> Result<Vec<Option<LexicalUnit>>, StoreError>;

    fn synset_ids(&self) -> Result<Vec<Option<EntityId>>, StoreError>;

    fn synset_members(&self, synset_id: EntityId) -> Result<Vec<Option<EntityId>>, StoreError>;

    fn relations(&self, table: RelationTable) -> Result<Vec<RelationRow>, StoreError>;
}

/// Open a store for `config`.
///
/// Fails if the driver is not compiled into this build or the database cannot
/// be reached; nothing is built in either case.
pub fn connect(config: &ConnectionConfig) -> Result<Box<dyn RelationalStore>, StoreError> {
    tracing::info!(driver = %config.driver, database = %config.database, "connecting");
    match config.driver {
        #[cfg(feature = "sqlite")]
        Driver::Sqlite => Ok(Box::new(crate::sqlite::SqliteStore::open(
            std::path::Path::new(&config.database),
        )?)),
        #[cfg(feature = "mysql")]
        Driver::MySql => Ok(Box::new(crate::mysql::MySqlStore::connect(config)?)),
        #[allow(unreachable_patterns)]
        driver => Err(ConfigError::DriverNotCompiled(driver).into()),
    }
}
