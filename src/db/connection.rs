//! Connection establishment.
//!
//! Turns a [`ConnectConfig`] into a live pool: URL assembly, TLS trust
//! setup for the custom-trust policy, an abortable dial, and the keep-alive
//! supervisor started against the shutdown signal.

use crate::config::{ConnectConfig, TlsMode};
use crate::db::keepalive::{self, KeepaliveHandle, ShutdownSignal};
use crate::db::tls;
use crate::error::{DalError, DalResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Connections older than this are not reused; the pool redials
/// transparently.
pub const CONNECTION_MAX_LIFETIME: Duration = Duration::from_secs(3 * 60);

/// Open a MySQL connection pool and start its keep-alive supervisor.
///
/// The dial is raced against `shutdown`, so an in-flight connect attempt
/// is abortable (a dropped shutdown sender counts as a triggered signal).
/// On success the supervisor owns the pool's ping/close path; callers must
/// not close the pool directly while it is active. The returned
/// [`KeepaliveHandle`] resolves once the supervisor has observed shutdown
/// and closed the pool.
pub async fn connect(
    config: &ConnectConfig,
    shutdown: ShutdownSignal,
) -> DalResult<(MySqlPool, KeepaliveHandle)> {
    let url = config.connection_url()?;

    let mut options = MySqlConnectOptions::from_str(url.as_str())
        .map_err(|e| DalError::configuration(format!("invalid connection URL: {}", e)))?
        .charset("utf8mb4");

    if config.tls == TlsMode::CustomTrust {
        let anchor = tls::custom_trust_anchor()?;
        options = options.ssl_ca_from_pem(anchor.to_vec());
    }

    info!(
        url = %config.masked_connection_url(),
        tls = %config.tls,
        "Connecting to database"
    );

    let pool_options = MySqlPoolOptions::new().max_lifetime(CONNECTION_MAX_LIFETIME);

    let mut abort = shutdown.clone();
    let pool = tokio::select! {
        biased;

        _ = abort.wait_for(|stop| *stop) => {
            return Err(DalError::connect("connect aborted by shutdown signal"));
        }
        result = pool_options.connect_with(options) => result.map_err(DalError::from)?,
    };

    let supervisor = keepalive::spawn(pool.clone(), shutdown);

    info!(host = %config.host, database = %config.database, "Connected to database");

    Ok((pool, supervisor))
}
