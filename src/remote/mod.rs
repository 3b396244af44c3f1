//! Remote capability
//!
//! Defines the [`Remote`] trait through which every CRUD translator reaches the
//! contact-center API, and its error type. Implementations:
//! - [`MemoryRemote`](memory::MemoryRemote): in-process tables, for offline use and tests
//!
//! SOAP transports live outside this crate and plug in by implementing [`Remote`].

pub mod memory;

use serde_json::Value;

pub use memory::MemoryRemote;

/// Error type for remote operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Remote rejected {operation}: {message}")]
    Rejected { operation: String, message: String },
}

impl RemoteError {
    pub fn rejected(operation: &str, message: impl Into<String>) -> Self {
        RemoteError::Rejected {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

/// Trait for remote backends
///
/// A call is a single blocking round trip. The result is the provider's raw
/// response, not yet parsed into records.
pub trait Remote: Send + Sync {
    /// Issue the named operation for a model
    fn call(&self, model: &str, operation: &str, payload: Value) -> Result<Value, RemoteError>;
}
