//! In-process remote
//!
//! Implements [`Remote`] over in-memory tables, one per model. It understands
//! the operation names used by the CRUD translators, matches name patterns with
//! `regex` and contact lookups with criteria. Every call is recorded so tests
//! can assert on the exact payloads sent.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use super::{Remote, RemoteError};
use crate::client::{SET_SESSION_PARAMETERS, SUPERVISOR_SERVICE};
use crate::crud::contact::{
    ADD_NEW, DELETE_OPERATION, SEARCH_OPERATION, UPDATE_FIRST, UPDATE_OPERATION,
};
use crate::crud::named::{self, NamedOperations};
use crate::models::ModelKind;
use crate::wire::{Data, MATCH_ALL_PATTERN};

/// A call received by a [`MemoryRemote`]
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    pub model: String,
    pub operation: String,
    pub payload: Value,
}

/// Remote backed by in-memory tables
#[derive(Debug, Default)]
pub struct MemoryRemote {
    tables: Mutex<HashMap<ModelKind, Vec<Data>>>,
    calls: Mutex<Vec<RemoteCall>>,
    session: Mutex<Option<Value>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a model's table
    pub fn with_records(self, kind: ModelKind, records: impl IntoIterator<Item = Data>) -> Self {
        lock(&self.tables).entry(kind).or_default().extend(records);
        self
    }

    /// Current contents of a model's table
    pub fn records(&self, kind: ModelKind) -> Vec<Data> {
        lock(&self.tables).get(&kind).cloned().unwrap_or_default()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RemoteCall> {
        lock(&self.calls).clone()
    }

    /// Supervisor session parameters, once set
    pub fn session_parameters(&self) -> Option<Value> {
        lock(&self.session).clone()
    }

    fn call_named(
        &self,
        kind: ModelKind,
        ops: &NamedOperations,
        operation: &str,
        payload: Value,
    ) -> Result<Value, RemoteError> {
        let uid_field = kind.schema().uid_field;
        let mut tables = lock(&self.tables);
        let table = tables.entry(kind).or_default();

        if operation == ops.create || operation == ops.modify {
            let record = unwrap_record(operation, payload, ops.record_param)?;
            let uid = uid_text(&record, uid_field)
                .ok_or_else(|| RemoteError::rejected(operation, format!("{} is required", uid_field)))?;
            let existing = table
                .iter()
                .position(|r| uid_text(r, uid_field).as_deref() == Some(uid.as_str()));

            match (operation == ops.create, existing) {
                (true, None) => table.push(record),
                (true, Some(_)) => {
                    return Err(RemoteError::rejected(
                        operation,
                        format!("{} '{}' already exists", kind, uid),
                    ));
                }
                (false, Some(idx)) => table[idx] = record,
                (false, None) => {
                    return Err(RemoteError::rejected(
                        operation,
                        format!("{} '{}' does not exist", kind, uid),
                    ));
                }
            }
            Ok(Value::Null)
        } else if operation == ops.search {
            let pattern = payload
                .get("namePattern")
                .and_then(Value::as_str)
                .unwrap_or(MATCH_ALL_PATTERN);
            let regex = Regex::new(&format!("^(?:{})$", pattern))
                .map_err(|e| RemoteError::rejected(operation, e.to_string()))?;
            Ok(Value::Array(
                table
                    .iter()
                    .filter(|r| uid_text(r, uid_field).is_some_and(|uid| regex.is_match(&uid)))
                    .cloned()
                    .map(Value::Object)
                    .collect(),
            ))
        } else if operation == ops.delete {
            let uid = payload
                .get(ops.delete_param)
                .map(text)
                .ok_or_else(|| RemoteError::rejected(operation, format!("{} is required", ops.delete_param)))?;
            let before = table.len();
            table.retain(|r| uid_text(r, uid_field).as_deref() != Some(uid.as_str()));
            if table.len() == before {
                return Err(RemoteError::rejected(
                    operation,
                    format!("{} '{}' does not exist", kind, uid),
                ));
            }
            Ok(Value::Null)
        } else {
            Err(unknown_operation(kind, operation))
        }
    }

    fn call_contact(&self, operation: &str, payload: Value) -> Result<Value, RemoteError> {
        let schema = ModelKind::Contact.schema();
        let mut tables = lock(&self.tables);
        let table = tables.entry(ModelKind::Contact).or_default();

        match operation {
            SEARCH_OPERATION => {
                let criteria = payload
                    .pointer("/lookupCriteria/criteria")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let mut wanted: HashMap<String, Vec<Value>> = HashMap::new();
                for criterion in criteria {
                    let field = criterion.get("field").map(text).unwrap_or_default();
                    let value = criterion.get("value").cloned().unwrap_or(Value::Null);
                    wanted.entry(field).or_default().push(value);
                }

                let fields: Vec<&str> = schema.field_names().collect();
                let rows: Vec<Value> = table
                    .iter()
                    .filter(|record| {
                        wanted.iter().all(|(field, values)| {
                            values.contains(record.get(field).unwrap_or(&Value::Null))
                        })
                    })
                    .map(|record| {
                        let data: Vec<Value> = fields
                            .iter()
                            .map(|f| record.get(*f).cloned().unwrap_or(Value::Null))
                            .collect();
                        json!({ "values": { "data": data } })
                    })
                    .collect();

                Ok(json!({ "fields": fields, "records": rows }))
            }
            UPDATE_OPERATION => {
                let (record, keys) = mapped_record(operation, &payload)?;
                let settings = payload.get("settings").cloned().unwrap_or(Value::Null);
                let may_add = settings.get("crmAddMode").and_then(Value::as_str) == Some(ADD_NEW);
                let may_update =
                    settings.get("crmUpdateMode").and_then(Value::as_str) == Some(UPDATE_FIRST);

                let existing = table.iter().position(|r| matches_keys(r, &record, &keys));
                match existing {
                    Some(idx) if may_update => {
                        table[idx].extend(record);
                        Ok(json!({ "updated": 1, "inserted": 0 }))
                    }
                    None if may_add => {
                        table.push(record);
                        Ok(json!({ "updated": 0, "inserted": 1 }))
                    }
                    _ => Err(RemoteError::rejected(operation, "no contact was added or updated")),
                }
            }
            DELETE_OPERATION => {
                let (record, keys) = mapped_record(operation, &payload)?;
                let before = table.len();
                table.retain(|r| !matches_keys(r, &record, &keys));
                match before - table.len() {
                    0 => Err(RemoteError::rejected(operation, "no contact matched")),
                    deleted => Ok(json!({ "deleted": deleted })),
                }
            }
            _ => Err(unknown_operation(ModelKind::Contact, operation)),
        }
    }
}

impl Remote for MemoryRemote {
    fn call(&self, model: &str, operation: &str, payload: Value) -> Result<Value, RemoteError> {
        debug!("MemoryRemote {}.{}", model, operation);
        lock(&self.calls).push(RemoteCall {
            model: model.to_string(),
            operation: operation.to_string(),
            payload: payload.clone(),
        });

        if model == SUPERVISOR_SERVICE && operation == SET_SESSION_PARAMETERS {
            *lock(&self.session) = Some(payload);
            return Ok(Value::Null);
        }

        let kind: ModelKind = model
            .parse()
            .map_err(|_| RemoteError::rejected(operation, format!("unknown model {}", model)))?;

        if kind == ModelKind::Contact {
            return self.call_contact(operation, payload);
        }
        match named::operations(kind) {
            Some(ops) => self.call_named(kind, ops, operation, payload),
            None => Err(unknown_operation(kind, operation)),
        }
    }
}

fn unknown_operation(kind: ModelKind, operation: &str) -> RemoteError {
    RemoteError::rejected(operation, format!("{} has no such operation", kind))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn uid_text(record: &Data, uid_field: &str) -> Option<String> {
    record.get(uid_field).filter(|v| !v.is_null()).map(text)
}

fn unwrap_record(operation: &str, payload: Value, param: Option<&str>) -> Result<Data, RemoteError> {
    let value = match param {
        Some(param) => payload.get(param).cloned().unwrap_or(Value::Null),
        None => payload,
    };
    match value {
        Value::Object(record) => Ok(record),
        other => Err(RemoteError::rejected(
            operation,
            format!("expected a record, got {}", other),
        )),
    }
}

/// Rebuild a record from a column mapping, returning it with its key fields
fn mapped_record(operation: &str, payload: &Value) -> Result<(Data, Vec<String>), RemoteError> {
    let mapping = payload
        .pointer("/settings/fieldsMapping")
        .and_then(Value::as_array)
        .ok_or_else(|| RemoteError::rejected(operation, "fieldsMapping is required"))?;
    let values = payload
        .pointer("/record/fields")
        .and_then(Value::as_array)
        .ok_or_else(|| RemoteError::rejected(operation, "record fields are required"))?;

    let mut record = Data::new();
    let mut keys = Vec::new();
    for column in mapping {
        let name = column.get("fieldName").map(text).unwrap_or_default();
        let position = column
            .get("columnNumber")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| RemoteError::rejected(operation, "invalid columnNumber"))?;
        let value = values
            .get(position - 1)
            .cloned()
            .ok_or_else(|| RemoteError::rejected(operation, "column out of range"))?;
        if column.get("key").and_then(Value::as_bool) == Some(true) {
            keys.push(name.clone());
        }
        record.insert(name, value);
    }

    if keys.is_empty() {
        return Err(RemoteError::rejected(operation, "at least one key field is required"));
    }
    Ok((record, keys))
}

fn matches_keys(existing: &Data, record: &Data, keys: &[String]) -> bool {
    keys.iter().all(|key| existing.get(key) == record.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_named_create_and_search() {
        let remote = MemoryRemote::new();
        remote
            .call("WebConnector", "createWebConnector", json!({"name": "CRM"}))
            .unwrap();
        remote
            .call("WebConnector", "createWebConnector", json!({"name": "Helpdesk"}))
            .unwrap();

        let all = remote
            .call("WebConnector", "getWebConnectors", json!({"namePattern": ".*"}))
            .unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);

        let one = remote
            .call("WebConnector", "getWebConnectors", json!({"namePattern": "(CRM|Nope)"}))
            .unwrap();
        assert_eq!(one, json!([{"name": "CRM"}]));
    }

    #[test]
    fn test_named_duplicate_create_rejected() {
        let remote = MemoryRemote::new()
            .with_records(ModelKind::Disposition, [data(json!({"name": "Sold"}))]);
        let result = remote.call("Disposition", "createDisposition", json!({"name": "Sold"}));
        assert!(matches!(result, Err(RemoteError::Rejected { .. })));
    }

    #[test]
    fn test_named_delete_missing_rejected() {
        let remote = MemoryRemote::new();
        let result = remote.call(
            "Disposition",
            "removeDisposition",
            json!({"dispositionName": "Sold"}),
        );
        assert!(matches!(result, Err(RemoteError::Rejected { .. })));
    }

    #[test]
    fn test_contact_lookup_criteria() {
        let remote = MemoryRemote::new().with_records(
            ModelKind::Contact,
            [
                data(json!({"number1": "1", "first_name": "Ann", "city": "Reno"})),
                data(json!({"number1": "2", "first_name": "Bob", "city": "Elko"})),
                data(json!({"number1": "3", "first_name": "Cy", "city": "Reno"})),
            ],
        );

        let response = remote
            .call(
                "Contact",
                SEARCH_OPERATION,
                json!({"lookupCriteria": {"criteria": [
                    {"field": "first_name", "value": "Ann"},
                    {"field": "first_name", "value": "Bob"},
                    {"field": "city", "value": "Reno"},
                ]}}),
            )
            .unwrap();
        assert_eq!(response["records"].as_array().unwrap().len(), 1);

        let everything = remote
            .call("Contact", SEARCH_OPERATION, json!({"lookupCriteria": null}))
            .unwrap();
        assert_eq!(everything["records"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let remote = MemoryRemote::new();
        let result = remote.call("Campaign", "getCampaigns", Value::Null);
        assert!(matches!(result, Err(RemoteError::Rejected { .. })));
        assert_eq!(remote.calls().len(), 1);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let remote = MemoryRemote::new();
        let result = remote.call("WebConnector", "getWebConnectors", json!({"namePattern": "("}));
        assert!(matches!(result, Err(RemoteError::Rejected { .. })));
    }
}
