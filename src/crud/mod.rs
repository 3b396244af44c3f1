//! CRUD translators
//!
//! Each model maps the generic verbs (create/search/read/write/delete) onto
//! its own remote operations and parses the remote responses back into
//! [`Record`]s:
//! - [`NamedCrud`]: models looked up by a name pattern (web connectors, dispositions, contact fields)
//! - [`ContactCrud`]: contact records, queried with structured criteria
//! - [`EmbeddedCrud`]: models that only exist nested inside other records

pub mod contact;
pub mod embedded;
pub mod named;

use serde_json::Value;

use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::record::Record;
use crate::remote::Remote;
use crate::wire::Data;

pub use contact::ContactCrud;
pub use embedded::EmbeddedCrud;
pub use named::{NamedCrud, NamedOperations};

/// Trait for per-model CRUD translation
pub trait Crud: Send + Sync {
    /// Create a record on the remote from validated caller data
    fn create(&self, remote: &dyn Remote, kind: ModelKind, data: &Data) -> Result<Value>;

    /// Search the remote and materialize the matching records
    fn search(&self, remote: &dyn Remote, kind: ModelKind, filters: &Data) -> Result<Vec<Record>>;

    /// Look up the record whose unique-identifier field equals `external_id`
    ///
    /// Returns the first match, or `None` when nothing matched.
    fn read(
        &self,
        remote: &dyn Remote,
        kind: ModelKind,
        external_id: Value,
    ) -> Result<Option<Record>> {
        let mut filters = Data::new();
        filters.insert(kind.schema().uid_field.to_string(), external_id);
        Ok(self.search(remote, kind, &filters)?.into_iter().next())
    }

    /// Push the record's current values to the remote
    fn write(&self, remote: &dyn Remote, record: &Record) -> Result<Value>;

    /// Remove the record from the remote
    fn delete(&self, remote: &dyn Remote, record: &Record) -> Result<Value>;
}

static WEB_CONNECTOR: NamedCrud = NamedCrud::new(&named::WEB_CONNECTOR);
static DISPOSITION: NamedCrud = NamedCrud::new(&named::DISPOSITION);
static CONTACT_FIELD: NamedCrud = NamedCrud::new(&named::CONTACT_FIELD);
static CONTACT: ContactCrud = ContactCrud;
static EMBEDDED: EmbeddedCrud = EmbeddedCrud;

/// The translator responsible for a model
pub fn translator(kind: ModelKind) -> &'static dyn Crud {
    match kind {
        ModelKind::Contact => &CONTACT,
        ModelKind::ContactField => &CONTACT_FIELD,
        ModelKind::Disposition => &DISPOSITION,
        ModelKind::WebConnector => &WEB_CONNECTOR,
        ModelKind::DispositionTypeParams | ModelKind::KeyValuePair | ModelKind::Timer => {
            &EMBEDDED
        }
    }
}

/// The record's unique-identifier value, required by keyed operations
pub(crate) fn uid_value(record: &Record) -> Result<Value> {
    record.uid().map(|uid| uid.to_value()).ok_or_else(|| {
        Five9Error::Validation(format!(
            "{} record has no '{}' value",
            record.kind(),
            record.schema().uid_field
        ))
    })
}
