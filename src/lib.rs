//! Five9 SDK - Record/environment layer over the Five9 administration API
//!
//! Provides:
//! - Environments that navigate models and hold record sets
//! - Records with declared fields, private attributes and wire conversion
//! - A process-wide model registry
//! - CRUD translators mapping verbs onto remote operations
//! - Wire-format helpers (criteria, tabular responses, column mappings)
//! - A pluggable remote backend, with an in-process implementation

pub mod client;
pub mod config;
pub mod crud;
pub mod environment;
pub mod error;
pub mod models;
pub mod record;
pub mod registry;
pub mod remote;
pub mod schema;
pub mod wire;

// Re-export commonly used types
pub use client::Five9;
pub use config::{ConfigError, Five9Config, SupervisorSettings};
pub use environment::{BatchOutcome, Environment, RecordCursor};
pub use error::{Five9Error, Precondition, Result};
pub use models::ModelKind;
pub use record::{FieldValue, Record};
pub use registry::ModelEntry;
pub use remote::{MemoryRemote, Remote, RemoteError};
pub use schema::{FieldKind, FieldSpec, ModelSchema};
pub use wire::{Criterion, Data, FieldMapping, FieldMappingEntry};
