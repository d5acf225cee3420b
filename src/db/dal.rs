//! Shared dependencies for DAL implementations.

use crate::db::keepalive::ShutdownSignal;
use crate::db::registry::StatementRegistry;
use crate::error::DalResult;
use sqlx::Executor;
use sqlx::mysql::{MySqlPool, MySqlStatement};
use tracing::warn;

/// Prepared statement handle stored by the DAL.
///
/// Statements are prepared from `'static` SQL, so the handle carries no
/// borrowed query text.
pub type Statement = MySqlStatement<'static>;

/// Common dependencies for DAL implementations: the live pool, the named
/// prepared statements, and the shutdown signal governing the connection.
///
/// Assembled once at startup. The statement registry is read-only after
/// initialization; the pool itself is safe for concurrent use.
pub struct Dal {
    pub pool: MySqlPool,
    pub statements: StatementRegistry<Statement>,
    pub shutdown: ShutdownSignal,
}

impl Dal {
    /// Assemble a DAL bundle around an open pool.
    pub fn new(pool: MySqlPool, shutdown: ShutdownSignal) -> Self {
        Self {
            pool,
            statements: StatementRegistry::new(),
            shutdown,
        }
    }

    /// Prepare `sql` on the pool and register it under `name`.
    ///
    /// On preparation failure the name is still registered, as an
    /// uninitialized placeholder, so later lookups report "known but not
    /// initialized" rather than "not found".
    pub async fn prepare(&mut self, name: &str, sql: &'static str) -> DalResult<()> {
        match self.pool.prepare(sql).await {
            Ok(statement) => {
                self.statements.insert(name, statement);
                Ok(())
            }
            Err(e) => {
                warn!(statement = name, error = %e, "failed to prepare statement");
                self.statements.reserve(name);
                Err(e.into())
            }
        }
    }

    /// Return the prepared statement registered under `name`.
    pub fn statement(&self, name: &str) -> DalResult<&Statement> {
        self.statements.lookup(name)
    }
}

impl std::fmt::Debug for Dal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dal")
            .field("statements", &self.statements)
            .finish_non_exhaustive()
    }
}
