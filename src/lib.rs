//! Shared data-access-layer plumbing for MySQL-backed services.
//!
//! This library bundles the pieces every DAL implementation in a service
//! needs:
//!
//! - [`connect`]: open a pooled MySQL connection with the configured TLS
//!   policy and start a supervised keep-alive task tied to a shutdown
//!   signal.
//! - [`Dal`]: the connection/statement/shutdown bundle downstream query
//!   code builds on, with lookup of named prepared statements.
//! - [`NullableTimestamp`]: a nullable timestamp column type that
//!   serializes to JSON as `null` or a quoted RFC-3339 string.
//!
//! Logging goes through `tracing`; this library never installs a
//! subscriber.

pub mod config;
pub mod db;
pub mod error;

pub use config::{ConnectConfig, TlsMode};
pub use db::{
    Dal, KeepaliveHandle, NullableTimestamp, ShutdownSignal, StatementRegistry, StatementSlot,
    connect, shutdown_channel,
};
pub use error::{DalError, DalResult};
