//! Keep-alive supervisor behavior, exercised against a mock connection
//! under the paused tokio clock.

use mysql_dal::db::keepalive::{Keepalive, PING_INTERVAL, shutdown_channel, spawn};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone)]
struct MockConnection {
    pings: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    fail_pings: bool,
    fail_close: bool,
}

impl MockConnection {
    fn new() -> Self {
        Self {
            pings: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            fail_pings: false,
            fail_close: false,
        }
    }

    fn with_failing_pings() -> Self {
        Self {
            fail_pings: true,
            ..Self::new()
        }
    }

    fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Keepalive for MockConnection {
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send {
        let pings = Arc::clone(&self.pings);
        let fail = self.fail_pings;
        async move {
            pings.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(sqlx::Error::PoolClosed)
            } else {
                Ok(())
            }
        }
    }

    fn close(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send {
        let closes = Arc::clone(&self.closes);
        let fail = self.fail_close;
        async move {
            closes.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(sqlx::Error::PoolClosed)
            } else {
                Ok(())
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_pings_on_interval_until_shutdown() {
    let (tx, rx) = shutdown_channel();
    let conn = MockConnection::new();
    let handle = spawn(conn.clone(), rx);

    tokio::time::sleep(PING_INTERVAL * 3 + Duration::from_millis(50)).await;
    assert_eq!(conn.ping_count(), 3);
    assert_eq!(conn.close_count(), 0);

    tx.send(true).unwrap();
    handle.wait().await;

    assert_eq!(conn.close_count(), 1);

    // No pings after the shutdown signal fired
    let pings_at_shutdown = conn.ping_count();
    tokio::time::sleep(PING_INTERVAL * 5).await;
    assert_eq!(conn.ping_count(), pings_at_shutdown);
}

#[tokio::test(start_paused = true)]
async fn test_ping_failures_never_terminate_the_loop() {
    let (tx, rx) = shutdown_channel();
    let conn = MockConnection::with_failing_pings();
    let handle = spawn(conn.clone(), rx);

    // Five consecutive failed pings, each logged as a warning
    tokio::time::sleep(PING_INTERVAL * 5 + Duration::from_millis(50)).await;
    assert_eq!(conn.ping_count(), 5);
    assert!(!handle.is_finished());
    assert_eq!(conn.close_count(), 0);

    tx.send(true).unwrap();
    handle.wait().await;

    assert_eq!(conn.ping_count(), 5);
    assert_eq!(conn.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_first_tick_skips_pings() {
    let (tx, rx) = shutdown_channel();
    let conn = MockConnection::new();
    let handle = spawn(conn.clone(), rx);

    tx.send(true).unwrap();
    handle.wait().await;

    assert_eq!(conn.ping_count(), 0);
    assert_eq!(conn.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_sender_counts_as_shutdown() {
    let (tx, rx) = shutdown_channel();
    let conn = MockConnection::new();
    let handle = spawn(conn.clone(), rx);

    drop(tx);
    handle.wait().await;

    assert_eq!(conn.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_failure_still_terminates() {
    let (tx, rx) = shutdown_channel();
    let conn = MockConnection {
        fail_close: true,
        ..MockConnection::new()
    };
    let handle = spawn(conn.clone(), rx);

    tx.send(true).unwrap();
    handle.wait().await;

    assert_eq!(conn.close_count(), 1);
}
