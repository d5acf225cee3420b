//! Database access layer.
//!
//! This module provides the database-facing pieces:
//! - Connection establishment with TLS policy handling
//! - Keep-alive supervision tied to a shutdown signal
//! - The shared DAL bundle and prepared-statement registry
//! - Nullable value types with JSON semantics

pub mod connection;
pub mod dal;
pub mod keepalive;
pub mod registry;
pub mod tls;
pub mod types;

pub use connection::{CONNECTION_MAX_LIFETIME, connect};
pub use dal::{Dal, Statement};
pub use keepalive::{
    Keepalive, KeepaliveHandle, PING_INTERVAL, PING_TIMEOUT, ShutdownSignal, shutdown_channel,
};
pub use registry::{StatementRegistry, StatementSlot};
pub use tls::custom_trust_anchor;
pub use types::NullableTimestamp;
