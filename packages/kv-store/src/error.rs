//! Error types for the store layer.
//!
//! Errors at this level are transport-focused. Nothing here knows about
//! menus, selectors or link files - those belong to the compiler.

/// Errors raised by a key-value store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Generic I/O or transport failure.
    ///
    /// Use this for network errors, broken connections, IPC failures, etc.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend answered, but not with what the protocol promised.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// The operation is not supported by this store.
    ///
    /// For example, reading back from a write-only sink.
    #[error("operation not supported")]
    NotSupported,
}

impl StoreError {
    /// Wrap any transport-level error.
    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Transport(Box::new(error))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::transport(e)
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::transport(e)
    }
}
