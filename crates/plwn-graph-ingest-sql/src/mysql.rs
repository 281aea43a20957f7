//! MySQL backend.
//!
//! sqlx is async-only; the store owns a current-thread runtime and blocks on
//! each query, which keeps the [`RelationalStore`] interface synchronous.

use crate::config::ConnectionConfig;
use crate::queries::mysql as queries;
use crate::store::{RelationRow, RelationalStore, StoreError};
use plwn_graph_model::{EntityId, LexicalUnit, RelationTable};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::runtime::Runtime;

type LexicalUnitRow = (Option<i64>, Option<String>, Option<i64>, Option<i64>, Option<i64>);

pub struct MySqlStore {
    // Dropped before the runtime its connections run on.
    pool: MySqlPool,
    runtime: Runtime,
}

impl MySqlStore {
    pub fn connect(config: &ConnectionConfig) -> Result<Self, StoreError> {
        let host = config.host.as_deref().unwrap_or("localhost");
        let port = config.port.unwrap_or(3306);
        let target = format!("mysql://{host}:{port}/{}", config.database);
        let connect_error = |reason: String| StoreError::Connect {
            target: target.clone(),
            reason,
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| connect_error(e.to_string()))?;

        let mut options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .database(&config.database)
            .charset("utf8mb4");
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        let pool = runtime
            .block_on(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .connect_with(options),
            )
            .map_err(|e| connect_error(e.to_string()))?;

        tracing::debug!(url = %target, "connected to mysql");
        Ok(Self { pool, runtime })
    }

    fn ids(
        &self,
        sql: &'static str,
        synset_id: Option<EntityId>,
    ) -> Result<Vec<Option<EntityId>>, StoreError> {
        let mut query = sqlx::query_as::<_, (Option<i64>,)>(sql);
        if let Some(id) = synset_id {
            query = query.bind(id);
        }
        let rows = self.runtime.block_on(query.fetch_all(&self.pool))?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

impl RelationalStore for MySqlStore {
    fn lexical_units(&self) -> Result<Vec<Option<LexicalUnit>>, StoreError> {
        let rows: Vec<LexicalUnitRow> = self
            .runtime
            .block_on(sqlx::query_as(queries::LEXICAL_UNITS).fetch_all(&self.pool))?;
        Ok(rows
            .into_iter()
            .map(|(id, lemma, pos, domain, variant)| {
                Some(LexicalUnit::new(
                    id?,
                    lemma.unwrap_or_default(),
                    pos.unwrap_or_default(),
                    domain.unwrap_or_default(),
                    variant.unwrap_or_default(),
                ))
            })
            .collect())
    }

    fn synset_ids(&self) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.ids(queries::SYNSET_IDS, None)
    }

    fn synset_members(&self, synset_id: EntityId) -> Result<Vec<Option<EntityId>>, StoreError> {
        self.ids(queries::SYNSET_MEMBERS, Some(synset_id))
    }

    fn relations(&self, table: RelationTable) -> Result<Vec<RelationRow>, StoreError> {
        let rows: Vec<(Option<i64>, Option<i64>, Option<i64>)> = self
            .runtime
            .block_on(sqlx::query_as(queries::relations(table)).fetch_all(&self.pool))?;
        Ok(rows
            .into_iter()
            .map(|(parent, child, code)| RelationRow {
                parent,
                child,
                code,
            })
            .collect())
    }
}
