//! Connection keep-alive supervision.
//!
//! Exactly one supervisor task runs per connection pool. It is the sole
//! owner of the pool's ping/close path: callers must not close the pool
//! while the supervisor is active, so shutdown can never race a concurrent
//! ping or double-close.
//!
//! The task is a two-state machine {Running, Terminated} driven by a single
//! `select!` over the ping timer and the shutdown signal. Ping failures are
//! logged and never change state; only the shutdown signal reaches
//! Terminated, after issuing exactly one close.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Interval between liveness pings.
pub const PING_INTERVAL: Duration = Duration::from_secs(3);

/// Upper bound on a single ping attempt.
pub const PING_TIMEOUT: Duration = Duration::from_secs(3);

/// Shutdown signal observed by the connect path and the supervisor.
///
/// A value of `true`, or a dropped sender, counts as a triggered signal.
pub type ShutdownSignal = watch::Receiver<bool>;

/// Create a shutdown channel; `send(true)` triggers the close path.
pub fn shutdown_channel() -> (watch::Sender<bool>, ShutdownSignal) {
    watch::channel(false)
}

/// Connection surface the supervisor drives.
///
/// Implemented for `MySqlPool`; test code supplies mocks to exercise the
/// state machine without a server.
pub trait Keepalive: Send + Sync + 'static {
    /// Issue a liveness probe against the connection.
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Close the connection. Called at most once, on shutdown.
    fn close(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl Keepalive for sqlx::MySqlPool {
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send {
        async move {
            use sqlx::Connection;
            let mut conn = self.acquire().await?;
            conn.ping().await
        }
    }

    fn close(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send {
        async move {
            sqlx::MySqlPool::close(self).await;
            Ok(())
        }
    }
}

/// Await handle for the supervisor task.
///
/// The owner uses this to wait for the supervisor to observe shutdown and
/// finish closing the connection.
#[derive(Debug)]
pub struct KeepaliveHandle {
    task: JoinHandle<()>,
}

impl KeepaliveHandle {
    /// Wait for the supervisor to terminate.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "keep-alive task did not shut down cleanly");
        }
    }

    /// Whether the supervisor has already terminated.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the keep-alive supervisor for `conn`.
pub fn spawn<C: Keepalive>(conn: C, shutdown: ShutdownSignal) -> KeepaliveHandle {
    KeepaliveHandle {
        task: tokio::spawn(run(conn, shutdown)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Terminated,
}

async fn run<C: Keepalive>(conn: C, mut shutdown: ShutdownSignal) {
    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + PING_INTERVAL,
        PING_INTERVAL,
    );
    // A slow ping delays the next tick instead of bursting to catch up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut state = State::Running;

    while state == State::Running {
        tokio::select! {
            // Shutdown wins over a simultaneously ready tick
            biased;

            // The async block drops the watch read guard before the branch
            // completes, so the select output stays `Send`.
            _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                if let Err(e) = conn.close().await {
                    warn!(error = %e, "failed to close database connection");
                }
                state = State::Terminated;
            }
            _ = ticker.tick() => {
                match tokio::time::timeout(PING_TIMEOUT, conn.ping()).await {
                    Ok(Ok(())) => debug!("database ping ok"),
                    Ok(Err(e)) => warn!(error = %e, "failed to ping database"),
                    Err(_) => warn!(
                        timeout_secs = PING_TIMEOUT.as_secs(),
                        "database ping timed out"
                    ),
                }
            }
        }
    }

    debug!("keep-alive supervisor terminated");
}
