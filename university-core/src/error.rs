//! Structured error types for university-core.
//!
//! Every database failure carries what the text report prints: the server
//! message, the SQLSTATE and the vendor error number.

use std::fmt;
use std::io;

use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;

/// SQLSTATE MySQL reports for a broken or unreachable communication link.
pub const SQLSTATE_COMMUNICATION_LINK: &str = "08S01";

/// Diagnostic fields extracted from a driver error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub message: String,
    pub sql_state: Option<String>,
    pub vendor_code: Option<u16>,
}

impl Diagnostics {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sql_state: None,
            vendor_code: None,
        }
    }

    /// Pull message, SQLSTATE and MySQL error number out of an sqlx error.
    pub fn from_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => Self {
                message: db.message().to_string(),
                sql_state: db.code().map(|code| code.into_owned()),
                vendor_code: db
                    .try_downcast_ref::<MySqlDatabaseError>()
                    .map(MySqlDatabaseError::number),
            },
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => Self {
                message: err.to_string(),
                sql_state: Some(SQLSTATE_COMMUNICATION_LINK.to_string()),
                vendor_code: Some(0),
            },
            other => Self::new(other.to_string()),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(state) = &self.sql_state {
            write!(f, " (SQLSTATE {state})")?;
        }
        Ok(())
    }
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Config,
    Io,
}

/// Main error type for university-core operations
#[derive(Error, Debug)]
pub enum UniversityError {
    /// Driver initialization, network or authentication failure
    #[error("Connection error: {diagnostics}")]
    Connection {
        diagnostics: Diagnostics,
        #[source]
        source: sqlx::Error,
    },

    /// Query, prepared execution or procedure call failed
    #[error("Query error: {diagnostics}")]
    Query {
        diagnostics: Diagnostics,
        #[source]
        source: sqlx::Error,
    },

    /// Stored procedure ran but left its OUT parameter unset
    #[error("Count_Courses returned no count for instructor '{instructor}'")]
    MissingCount { instructor: String },

    /// Retrieval attempted after `close`
    #[error("Session is closed")]
    SessionClosed,

    /// Endpoint configuration could not be loaded
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Writing the report failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for university-core operations
pub type Result<T> = std::result::Result<T, UniversityError>;

impl UniversityError {
    /// Create a connection error from a driver error
    pub fn connection(source: sqlx::Error) -> Self {
        Self::Connection {
            diagnostics: Diagnostics::from_sqlx(&source),
            source,
        }
    }

    /// Create a query error from a driver error
    pub fn query(source: sqlx::Error) -> Self {
        Self::Query {
            diagnostics: Diagnostics::from_sqlx(&source),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Query { .. } | Self::MissingCount { .. } | Self::SessionClosed => {
                ErrorKind::Query
            }
            Self::Config { .. } => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Diagnostics for reporting. Errors that never reached the driver get a
    /// message-only set.
    pub fn diagnostics(&self) -> Diagnostics {
        match self {
            Self::Connection { diagnostics, .. } | Self::Query { diagnostics, .. } => {
                diagnostics.clone()
            }
            other => Diagnostics::new(other.to_string()),
        }
    }
}
