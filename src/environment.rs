//! Environment proxy
//!
//! An [`Environment`] binds a shared remote handle to an optional model and an
//! optional record set. Navigation and searching always produce a new
//! environment; the original is never mutated.
//!
//! | State               | Model | Records | Valid verbs                                   |
//! |---------------------|-------|---------|-----------------------------------------------|
//! | Root                | no    | no      | navigation                                    |
//! | ModelSelected       | yes   | no      | navigation, create, new_record, read, search  |
//! | RecordSetSelected   | yes   | yes     | all of the above, iter, write, delete         |
//!
//! Any other combination fails with a precondition error before a remote call is
//! made.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Five9Error, Precondition, Result};
use crate::models::ModelKind;
use crate::record::Record;
use crate::registry::{self, ModelEntry};
use crate::remote::Remote;
use crate::wire::Data;

/// Ordered per-record outcomes of a batch verb
///
/// Earlier successes are not rolled back when a later record fails.
pub type BatchOutcome = Vec<Result<Value>>;

/// Navigation and CRUD proxy over a remote
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use five9_sdk::{Environment, MemoryRemote, ModelKind};
/// use serde_json::json;
///
/// let env = Environment::new(Arc::new(MemoryRemote::new()));
/// let dispositions = env.model(ModelKind::Disposition);
///
/// let data = json!({"name": "Sold", "description": "Closed won"});
/// let created = dispositions
///     .create(data.as_object().unwrap(), true)
///     .unwrap();
///
/// for record in created.iter().unwrap() {
///     assert_eq!(record.uid().and_then(|v| v.as_str()), Some("Sold"));
/// }
/// ```
#[derive(Clone)]
pub struct Environment {
    remote: Arc<dyn Remote>,
    model: Option<&'static ModelEntry>,
    records: Option<Vec<Record>>,
}

impl Environment {
    /// Root environment: no model, no records
    pub fn new(remote: Arc<dyn Remote>) -> Self {
        Self {
            remote,
            model: None,
            records: None,
        }
    }

    fn child(&self, model: &'static ModelEntry, records: Option<Vec<Record>>) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            model: Some(model),
            records,
        }
    }

    /// Select a model
    pub fn model(&self, kind: ModelKind) -> Environment {
        self.child(registry::entry(kind), None)
    }

    /// Select a model by name. Unknown names are a `ModelNotFound` error.
    pub fn navigate(&self, name: &str) -> Result<Environment> {
        Ok(self.child(registry::resolve(name)?, None))
    }

    /// Build an environment over caller-held records of the selected model
    pub fn with_records(&self, records: Vec<Record>) -> Result<Environment> {
        let entry = self.entry()?;
        if let Some(other) = records.iter().find(|r| r.kind() != entry.kind) {
            return Err(Five9Error::Validation(format!(
                "Cannot place a {} record in a {} record set",
                other.kind(),
                entry.kind
            )));
        }
        Ok(self.child(entry, Some(records)))
    }

    pub fn remote(&self) -> &Arc<dyn Remote> {
        &self.remote
    }

    pub fn selected_model(&self) -> Option<ModelKind> {
        self.model.map(|entry| entry.kind)
    }

    pub fn records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }

    pub fn into_records(self) -> Option<Vec<Record>> {
        self.records
    }

    /// Start a traversal of the record set
    pub fn iter(&self) -> Result<RecordCursor<'_>> {
        let (_, records) = self.record_set()?;
        Ok(RecordCursor::new(records))
    }

    /// Create a record on the remote.
    ///
    /// With `refresh`, the created record is read back from the remote by its
    /// unique identifier; otherwise it is built locally from `data`. Unset
    /// fields are sent with their declared defaults.
    pub fn create(&self, data: &Data, refresh: bool) -> Result<Environment> {
        let entry = self.entry()?;
        entry.schema.validate(data)?;
        let data = &entry.schema.with_defaults(data);

        let uid = if refresh {
            let uid = data
                .get(entry.schema.uid_field)
                .filter(|v| !v.is_null())
                .cloned()
                .ok_or_else(|| {
                    Five9Error::Validation(format!(
                        "Refreshing a created {} requires the '{}' field",
                        entry.kind, entry.schema.uid_field
                    ))
                })?;
            Some(uid)
        } else {
            None
        };

        entry
            .translator
            .create(self.remote.as_ref(), entry.kind, data)?;
        info!("Created {} record", entry.kind);

        match uid {
            Some(uid) => {
                let record = self.read(uid.clone())?.ok_or_else(|| {
                    Five9Error::DataIntegrity(format!(
                        "Created {} {} could not be read back",
                        entry.kind, uid
                    ))
                })?;
                Ok(self.child(entry, Some(vec![record])))
            }
            None => self.new_record(data),
        }
    }

    /// Build an unsaved record from `data` without touching the remote
    pub fn new_record(&self, data: &Data) -> Result<Environment> {
        let entry = self.entry()?;
        let record = Record::from_data(entry.kind, data)?;
        Ok(self.child(entry, Some(vec![record])))
    }

    /// Look up a single record by its unique identifier
    pub fn read(&self, external_id: impl Into<Value>) -> Result<Option<Record>> {
        let entry = self.entry()?;
        entry
            .translator
            .read(self.remote.as_ref(), entry.kind, external_id.into())
    }

    /// Search the remote.
    ///
    /// `filters` is keyed by field name; a sequence value matches any of its
    /// elements. Zero matches yields an empty record set.
    pub fn search(&self, filters: &Data) -> Result<Environment> {
        let entry = self.entry()?;
        let records = entry
            .translator
            .search(self.remote.as_ref(), entry.kind, filters)?;
        debug!("{} search returned {} records", entry.kind, records.len());
        Ok(self.child(entry, Some(records)))
    }

    /// Write every record in the set to the remote
    pub fn write(&self) -> Result<BatchOutcome> {
        self.iter_call("write", |crud, remote, record| crud.write(remote, record))
    }

    /// Delete every record in the set from the remote
    pub fn delete(&self) -> Result<BatchOutcome> {
        self.iter_call("delete", |crud, remote, record| crud.delete(remote, record))
    }

    fn iter_call<F>(&self, verb: &str, call: F) -> Result<BatchOutcome>
    where
        F: Fn(&dyn crate::crud::Crud, &dyn Remote, &Record) -> Result<Value>,
    {
        let (entry, records) = self.record_set()?;
        let outcomes: BatchOutcome = records
            .iter()
            .map(|record| call(entry.translator, self.remote.as_ref(), record))
            .collect();

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        if failed > 0 {
            warn!(
                "{} of {} {} {} operations failed",
                failed,
                outcomes.len(),
                entry.kind,
                verb
            );
        }
        Ok(outcomes)
    }

    fn entry(&self) -> Result<&'static ModelEntry> {
        self.model
            .ok_or(Five9Error::Precondition(Precondition::ModelSelected))
    }

    fn record_set(&self) -> Result<(&'static ModelEntry, &[Record])> {
        let entry = self.entry()?;
        let records = self
            .records
            .as_deref()
            .ok_or(Five9Error::Precondition(Precondition::RecordSetSelected))?;
        Ok((entry, records))
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("model", &self.selected_model())
            .field("records", &self.records.as_ref().map(Vec::len))
            .finish()
    }
}

/// A single traversal over a record set
///
/// Each call to [`Environment::iter`] returns its own cursor, so independent
/// traversals never interfere.
#[derive(Debug, Clone)]
pub struct RecordCursor<'a> {
    records: &'a [Record],
    position: usize,
}

impl<'a> RecordCursor<'a> {
    fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            position: 0,
        }
    }

    /// The record most recently yielded
    pub fn current(&self) -> Option<&'a Record> {
        self.position
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx))
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.position)?;
        self.position += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RecordCursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use crate::remote::MemoryRemote;
    use serde_json::json;

    fn data(value: Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    fn root() -> Environment {
        Environment::new(Arc::new(MemoryRemote::new()))
    }

    fn webconnectors(env: &Environment) -> Environment {
        let records = vec![
            Record::from_wire(ModelKind::WebConnector, &data(json!({"name": "A"}))).unwrap(),
            Record::from_wire(ModelKind::WebConnector, &data(json!({"name": "B"}))).unwrap(),
        ];
        env.model(ModelKind::WebConnector)
            .with_records(records)
            .unwrap()
    }

    #[test]
    fn test_root_has_no_model() {
        let env = root();
        assert_eq!(env.selected_model(), None);
        assert!(env.records().is_none());
    }

    #[test]
    fn test_navigate_selects_model() {
        let env = root().navigate("WebConnector").unwrap();
        assert_eq!(env.selected_model(), Some(ModelKind::WebConnector));
        assert!(env.records().is_none());
    }

    #[test]
    fn test_navigate_unknown_model() {
        let result = root().navigate("Phantom");
        assert!(matches!(result, Err(Five9Error::ModelNotFound(_))));
    }

    #[test]
    fn test_root_verbs_fail_precondition() {
        let env = root();
        let expected = |r: Result<Environment>| {
            matches!(
                r,
                Err(Five9Error::Precondition(Precondition::ModelSelected))
            )
        };
        assert!(expected(env.search(&Data::new())));
        assert!(expected(env.create(&data(json!({"name": "x"})), false)));
        assert!(expected(env.new_record(&Data::new())));
        assert!(matches!(
            env.read("x"),
            Err(Five9Error::Precondition(Precondition::ModelSelected))
        ));
        assert!(matches!(
            env.write(),
            Err(Five9Error::Precondition(Precondition::ModelSelected))
        ));
    }

    #[test]
    fn test_model_selected_record_verbs_fail_precondition() {
        let env = root().model(ModelKind::WebConnector);
        let no_records = |r: Result<BatchOutcome>| {
            matches!(
                r,
                Err(Five9Error::Precondition(Precondition::RecordSetSelected))
            )
        };
        assert!(no_records(env.write()));
        assert!(no_records(env.delete()));
        assert!(matches!(
            env.iter(),
            Err(Five9Error::Precondition(Precondition::RecordSetSelected))
        ));
    }

    #[test]
    fn test_iter_yields_in_order_with_current() {
        let env = webconnectors(&root());
        let mut cursor = env.iter().unwrap();
        assert!(cursor.current().is_none());

        let names = ["A", "B"];
        for name in names {
            let record = cursor.next().unwrap();
            assert_eq!(record.uid().and_then(|v| v.as_str()), Some(name));
            assert!(std::ptr::eq(cursor.current().unwrap(), record));
        }
        assert!(cursor.next().is_none());

        // The environment stays reusable after exhaustion
        assert_eq!(env.iter().unwrap().count(), 2);
    }

    #[test]
    fn test_independent_cursors() {
        let env = webconnectors(&root());
        let mut first = env.iter().unwrap();
        let mut second = env.iter().unwrap();
        first.next();
        first.next();
        assert_eq!(
            second.next().and_then(|r| r.uid()).and_then(|v| v.as_str()),
            Some("A")
        );
        assert_eq!(first.current().and_then(|r| r.uid()).and_then(|v| v.as_str()), Some("B"));
    }

    #[test]
    fn test_new_record_is_local() {
        let env = root().model(ModelKind::Disposition);
        let created = env.new_record(&data(json!({"name": "Sold"}))).unwrap();
        assert_eq!(created.records().unwrap().len(), 1);
        assert!(env.read("Sold").unwrap().is_none());
    }

    #[test]
    fn test_search_leaves_original_untouched() {
        let env = root().model(ModelKind::Disposition);
        let results = env.search(&Data::new()).unwrap();
        assert!(env.records().is_none());
        assert_eq!(results.records().unwrap().len(), 0);
    }

    #[test]
    fn test_with_records_rejects_other_models() {
        let env = root().model(ModelKind::Disposition);
        let result = env.with_records(vec![Record::new(ModelKind::Contact)]);
        assert!(matches!(result, Err(Five9Error::Validation(_))));
    }

    #[test]
    fn test_create_refresh_requires_uid() {
        // Timers declare no "name" field, so validation passes without one
        let remote = Arc::new(MemoryRemote::new());
        let env = Environment::new(remote.clone()).model(ModelKind::Timer);
        let result = env.create(&data(json!({"days": 1})), true);
        assert!(matches!(
            result,
            Err(Five9Error::Validation(msg)) if msg.contains("Refreshing a created Timer")
        ));
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn test_create_sends_defaults() {
        let remote = Arc::new(MemoryRemote::new());
        let env = Environment::new(remote.clone()).model(ModelKind::WebConnector);
        let created = env
            .create(
                &data(json!({
                    "name": "CRM",
                    "description": "Pop the CRM",
                    "executeInBrowser": true,
                    "trigger": "OnCallAccepted",
                })),
                false,
            )
            .unwrap();

        let calls = remote.calls();
        let payload = &calls[0].payload;
        assert_eq!(payload["agentApplication"], json!("EmbeddedBrowser"));
        assert_eq!(payload["ctiWebServices"], json!("CurrentBrowserWindow"));
        let record = &created.records().unwrap()[0];
        assert_eq!(
            record.get("agentApplication").and_then(FieldValue::as_str),
            Some("EmbeddedBrowser")
        );
    }

    #[test]
    fn test_embedded_model_unsupported() {
        let env = root().model(ModelKind::Timer);
        let result = env.search(&Data::new());
        assert!(matches!(result, Err(Five9Error::Unsupported { .. })));
    }
}
