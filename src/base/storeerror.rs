use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading a cookie store.
///
/// These never reach callers of
/// [`CookieHeaderSynthesizer::get_cookies`](crate::urlrequest::CookieHeaderSynthesizer::get_cookies);
/// the synthesizer isolates them per source. They do surface from
/// construction-time helpers such as loading a jar file.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("Cookie store unavailable: {store}")]
    Unavailable { store: String },

    #[error("Cookie store file not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error on cookie store {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("Invalid cookie store data: {reason}")]
    InvalidData { reason: String },

    #[error("Cookie database is locked")]
    DatabaseLocked,

    #[error("Cookie database error: {message}")]
    Database { message: String },

    #[error("Cookie store query task failed: {message}")]
    TaskFailed { message: String },

    #[error("Cookie store query timed out after {0:?}")]
    TimedOut(Duration),
}

impl StoreError {
    pub fn unavailable(store: impl Into<String>) -> Self {
        StoreError::Unavailable {
            store: store.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        StoreError::FileNotFound { path: path.into() }
    }

    pub fn invalid_data(reason: impl Into<String>) -> Self {
        StoreError::InvalidData {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// A store whose query panicked.
    pub fn panicked(store: impl Into<String>) -> Self {
        StoreError::TaskFailed {
            message: format!("{} panicked", store.into()),
        }
    }

    /// True for failures a later call might not hit (locks, timeouts).
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::DatabaseLocked | StoreError::TimedOut(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ffi::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ffi::ErrorCode::DatabaseLocked =>
            {
                StoreError::DatabaseLocked
            }
            _ => StoreError::Database {
                message: err.to_string(),
            },
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::invalid_data(err.to_string())
    }
}
