//! Error types for the MySQL DAL.
//!
//! This module defines all error types using `thiserror`. Connect-time
//! failures carry the stage that produced them; statement lookup failures
//! distinguish a name that was never registered from a name whose
//! preparation did not succeed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DalError {
    /// Connection settings were malformed before any network activity.
    #[error("Invalid connection settings: {message}")]
    Configuration { message: String },

    /// The embedded root certificate could not be turned into a trust store.
    #[error("Failed to build TLS trust store: {message}")]
    TrustAnchor { message: String },

    /// Dial or handshake failure, including a connect aborted by shutdown.
    #[error("Failed to connect to database: {message}")]
    Connect { message: String },

    /// The statement name was never registered.
    #[error("Statement '{name}' was not found in the statement registry")]
    StatementNotFound { name: String },

    /// The statement name is known, but its preparation did not succeed.
    #[error("Statement '{name}' was not initialized")]
    StatementNotInitialized { name: String },
}

impl DalError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a trust-anchor error.
    pub fn trust_anchor(message: impl Into<String>) -> Self {
        Self::TrustAnchor {
            message: message.into(),
        }
    }

    /// Create a connect error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Create a statement-not-found error.
    pub fn statement_not_found(name: impl Into<String>) -> Self {
        Self::StatementNotFound { name: name.into() }
    }

    /// Create a statement-not-initialized error.
    pub fn statement_not_initialized(name: impl Into<String>) -> Self {
        Self::StatementNotInitialized { name: name.into() }
    }

    /// Whether this error came from a statement lookup.
    ///
    /// `StatementNotFound` indicates a caller referencing a name that was
    /// never registered; `StatementNotInitialized` indicates a startup
    /// failure for a known name. Callers usually treat the two with
    /// different severities, but both are lookup outcomes.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::StatementNotFound { .. } | Self::StatementNotInitialized { .. }
        )
    }
}

/// Convert sqlx errors to DalError.
///
/// Everything sqlx reports during dial, handshake, or prepare surfaces as a
/// connect-stage failure; lookup errors never originate from sqlx.
impl From<sqlx::Error> for DalError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DalError::configuration(msg.to_string()),
            sqlx::Error::Tls(tls_err) => DalError::connect(format!("TLS error: {}", tls_err)),
            sqlx::Error::Io(io_err) => DalError::connect(format!("I/O error: {}", io_err)),
            sqlx::Error::PoolClosed => DalError::connect("connection pool is closed"),
            sqlx::Error::PoolTimedOut => DalError::connect("connection pool acquire timed out"),
            other => DalError::connect(other.to_string()),
        }
    }
}

/// Result type alias for DAL operations.
pub type DalResult<T> = Result<T, DalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DalError::connect("handshake refused");
        assert!(err.to_string().contains("Failed to connect"));
        assert!(err.to_string().contains("handshake refused"));
    }

    #[test]
    fn test_lookup_errors_carry_name() {
        let err = DalError::statement_not_found("get_user");
        assert!(err.to_string().contains("get_user"));

        let err = DalError::statement_not_initialized("get_user");
        assert!(err.to_string().contains("get_user"));
    }

    #[test]
    fn test_is_lookup() {
        assert!(DalError::statement_not_found("x").is_lookup());
        assert!(DalError::statement_not_initialized("x").is_lookup());
        assert!(!DalError::connect("x").is_lookup());
        assert!(!DalError::configuration("x").is_lookup());
        assert!(!DalError::trust_anchor("x").is_lookup());
    }

    #[test]
    fn test_from_sqlx_pool_closed() {
        let err: DalError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DalError::Connect { .. }));
    }

    #[test]
    fn test_from_sqlx_configuration() {
        let err: DalError = sqlx::Error::Configuration("bad url".into()).into();
        assert!(matches!(err, DalError::Configuration { .. }));
    }
}
