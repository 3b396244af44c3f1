//! Model registry
//!
//! Resolves a model name to its schema and CRUD translator. The registry is
//! populated once per process, on first access, from the closed set of
//! [`ModelKind`]s; it is read-only afterwards. Concurrent first access is
//! serialized by `once_cell`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::crud::{self, Crud};
use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::schema::ModelSchema;

/// A registered model
pub struct ModelEntry {
    pub kind: ModelKind,
    pub schema: &'static ModelSchema,
    pub translator: &'static dyn Crud,
}

impl ModelEntry {
    pub fn name(&self) -> &'static str {
        self.schema.name
    }
}

impl std::fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelEntry")
            .field("kind", &self.kind)
            .field("uid_field", &self.schema.uid_field)
            .finish()
    }
}

struct Registry {
    /// Indexed by `ModelKind::index`
    entries: Vec<ModelEntry>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    fn discover() -> Self {
        let entries: Vec<ModelEntry> = ModelKind::ALL
            .into_iter()
            .map(|kind| ModelEntry {
                kind,
                schema: kind.schema(),
                translator: crud::translator(kind),
            })
            .collect();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.name(), idx))
            .collect();

        debug!("Registered {} models", entries.len());
        Self { entries, by_name }
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::discover);

/// Resolve a model by name
///
/// # Example
///
/// ```rust
/// use five9_sdk::registry;
///
/// let entry = registry::resolve("Disposition").unwrap();
/// assert_eq!(entry.schema.uid_field, "name");
/// assert!(registry::resolve("Campaign").is_err());
/// ```
pub fn resolve(name: &str) -> Result<&'static ModelEntry> {
    REGISTRY
        .by_name
        .get(name)
        .map(|&idx| &REGISTRY.entries[idx])
        .ok_or_else(|| Five9Error::ModelNotFound(name.to_string()))
}

/// The entry for a known model kind
pub fn entry(kind: ModelKind) -> &'static ModelEntry {
    &REGISTRY.entries[kind.index()]
}

/// Every registered model, in declaration order
pub fn entries() -> impl Iterator<Item = &'static ModelEntry> {
    REGISTRY.entries.iter()
}
