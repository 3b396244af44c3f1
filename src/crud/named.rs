//! Name-keyed translators
//!
//! These models are searched with a single name pattern and return lists of
//! nested objects, which are flattened before being materialized.

use serde_json::{Value, json};
use tracing::debug;

use super::{Crud, uid_value};
use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::record::{FieldValue, Record};
use crate::remote::Remote;
use crate::wire::{Data, flatten, name_pattern};

/// Remote operation names for a name-keyed model
#[derive(Debug, PartialEq, Eq)]
pub struct NamedOperations {
    pub create: &'static str,
    pub search: &'static str,
    pub modify: &'static str,
    pub delete: &'static str,
    /// Parameter the record payload is wrapped in, if any
    pub record_param: Option<&'static str>,
    /// Parameter carrying the unique identifier on delete
    pub delete_param: &'static str,
}

pub static WEB_CONNECTOR: NamedOperations = NamedOperations {
    create: "createWebConnector",
    search: "getWebConnectors",
    modify: "modifyWebConnector",
    delete: "deleteWebConnector",
    record_param: None,
    delete_param: "name",
};

pub static DISPOSITION: NamedOperations = NamedOperations {
    create: "createDisposition",
    search: "getDispositions",
    modify: "modifyDisposition",
    delete: "removeDisposition",
    record_param: None,
    delete_param: "dispositionName",
};

pub static CONTACT_FIELD: NamedOperations = NamedOperations {
    create: "createContactField",
    search: "getContactFields",
    modify: "modifyContactField",
    delete: "deleteContactField",
    record_param: Some("field"),
    delete_param: "fieldName",
};

/// Operation names for a model, if it is name-keyed
pub fn operations(kind: ModelKind) -> Option<&'static NamedOperations> {
    match kind {
        ModelKind::WebConnector => Some(&WEB_CONNECTOR),
        ModelKind::Disposition => Some(&DISPOSITION),
        ModelKind::ContactField => Some(&CONTACT_FIELD),
        _ => None,
    }
}

/// Translator for name-keyed models
pub struct NamedCrud {
    ops: &'static NamedOperations,
}

impl NamedCrud {
    pub const fn new(ops: &'static NamedOperations) -> Self {
        Self { ops }
    }

    fn fetch(&self, remote: &dyn Remote, kind: ModelKind, pattern: String) -> Result<Vec<Record>> {
        let response = remote.call(
            kind.name(),
            self.ops.search,
            json!({ "namePattern": pattern }),
        )?;

        let items = match response {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            item @ Value::Object(_) => vec![item],
            other => {
                return Err(Five9Error::DataIntegrity(format!(
                    "{} returned {} instead of a list of records",
                    self.ops.search, other
                )));
            }
        };

        items
            .iter()
            .map(|item| match flatten(item) {
                Value::Object(map) => Record::from_wire(kind, &map),
                other => Err(Five9Error::DataIntegrity(format!(
                    "{} returned a non-object record: {}",
                    self.ops.search, other
                ))),
            })
            .collect()
    }

    fn record_payload(&self, data: Data) -> Value {
        match self.ops.record_param {
            Some(param) => single(param, Value::Object(data)),
            None => Value::Object(data),
        }
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Data::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl Crud for NamedCrud {
    fn create(&self, remote: &dyn Remote, kind: ModelKind, data: &Data) -> Result<Value> {
        Ok(remote.call(kind.name(), self.ops.create, self.record_payload(data.clone()))?)
    }

    fn search(&self, remote: &dyn Remote, kind: ModelKind, filters: &Data) -> Result<Vec<Record>> {
        let uid_field = kind.schema().uid_field;
        let ignored: Vec<&str> = filters
            .keys()
            .map(String::as_str)
            .filter(|key| *key != uid_field)
            .collect();
        if !ignored.is_empty() {
            debug!(
                "{} searches only by {}; ignoring filters on {:?}",
                kind, uid_field, ignored
            );
        }

        self.fetch(remote, kind, name_pattern(filters, uid_field))
    }

    /// Exact lookup: the identifier is escaped so it never acts as a pattern
    fn read(
        &self,
        remote: &dyn Remote,
        kind: ModelKind,
        external_id: Value,
    ) -> Result<Option<Record>> {
        let name = match external_id {
            Value::String(name) => name,
            other => other.to_string(),
        };
        let uid_field = kind.schema().uid_field;
        Ok(self
            .fetch(remote, kind, regex::escape(&name))?
            .into_iter()
            .find(|record| {
                record.get(uid_field).and_then(FieldValue::as_str) == Some(name.as_str())
            }))
    }

    fn write(&self, remote: &dyn Remote, record: &Record) -> Result<Value> {
        let payload = self.record_payload(record.to_wire_format());
        Ok(remote.call(record.kind().name(), self.ops.modify, payload)?)
    }

    fn delete(&self, remote: &dyn Remote, record: &Record) -> Result<Value> {
        let uid = uid_value(record)?;
        Ok(remote.call(
            record.kind().name(),
            self.ops.delete,
            single(self.ops.delete_param, uid),
        )?)
    }
}
