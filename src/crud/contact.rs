//! Contact record translator
//!
//! Contacts are queried with structured lookup criteria and come back as a
//! uniform table: one list of field names and positional value rows. Creates,
//! updates and deletes go through list-style operations that carry a column
//! mapping keyed on the contact's unique-identifier field.

use serde_json::{Value, json};
use tracing::debug;

use super::{Crud, uid_value};
use crate::error::Result;
use crate::models::ModelKind;
use crate::record::Record;
use crate::remote::Remote;
use crate::wire::{Data, build_criteria, create_mapping, parse_table_response};

pub const SEARCH_OPERATION: &str = "getContactRecords";
pub const UPDATE_OPERATION: &str = "updateContacts";
pub const DELETE_OPERATION: &str = "deleteFromContacts";

/// Add-mode sent on create: insert, never touch an existing match
pub const ADD_NEW: &str = "ADD_NEW";
/// Add-mode sent on write: never insert
pub const DONT_ADD: &str = "DONT_ADD";
pub const UPDATE_FIRST: &str = "UPDATE_FIRST";
pub const DONT_UPDATE: &str = "DONT_UPDATE";
pub const DELETE_SOLE_MATCHES: &str = "DELETE_SOLE_MATCHES";

/// Translator for contact records
pub struct ContactCrud;

impl ContactCrud {
    fn keyed_payload(kind: ModelKind, pairs: &[(String, Value)], settings: Value) -> Value {
        let mapping = create_mapping(pairs, &[kind.schema().uid_field]);
        let mut settings = settings;
        if let Value::Object(map) = &mut settings {
            map.insert(
                "fieldsMapping".to_string(),
                json!(mapping.fields_mapping),
            );
        }
        json!({
            "settings": settings,
            "record": { "fields": mapping.fields },
        })
    }
}

impl Crud for ContactCrud {
    fn create(&self, remote: &dyn Remote, kind: ModelKind, data: &Data) -> Result<Value> {
        let pairs = kind.schema().ordered(data);
        let payload = Self::keyed_payload(
            kind,
            &pairs,
            json!({ "crmAddMode": ADD_NEW, "crmUpdateMode": DONT_UPDATE }),
        );
        Ok(remote.call(kind.name(), UPDATE_OPERATION, payload)?)
    }

    fn search(&self, remote: &dyn Remote, kind: ModelKind, filters: &Data) -> Result<Vec<Record>> {
        let criteria = build_criteria(filters);
        debug!("Searching {} with {} criteria", kind, criteria.len());

        let lookup = if criteria.is_empty() {
            Value::Null
        } else {
            json!({ "criteria": criteria })
        };
        let response = remote.call(kind.name(), SEARCH_OPERATION, json!({ "lookupCriteria": lookup }))?;

        parse_table_response(&response)?
            .iter()
            .map(|row| Record::from_wire(kind, row))
            .collect()
    }

    fn write(&self, remote: &dyn Remote, record: &Record) -> Result<Value> {
        uid_value(record)?;
        let payload = Self::keyed_payload(
            record.kind(),
            &record.to_wire_pairs(),
            json!({ "crmAddMode": DONT_ADD, "crmUpdateMode": UPDATE_FIRST }),
        );
        Ok(remote.call(record.kind().name(), UPDATE_OPERATION, payload)?)
    }

    fn delete(&self, remote: &dyn Remote, record: &Record) -> Result<Value> {
        uid_value(record)?;
        let payload = Self::keyed_payload(
            record.kind(),
            &record.to_wire_pairs(),
            json!({ "crmDeleteMode": DELETE_SOLE_MATCHES }),
        );
        Ok(remote.call(record.kind().name(), DELETE_OPERATION, payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Five9Error;
    use crate::remote::RemoteError;
    use std::sync::Mutex;

    struct Scripted {
        response: Value,
        payloads: Mutex<Vec<(String, Value)>>,
    }

    impl Remote for Scripted {
        fn call(
            &self,
            _model: &str,
            operation: &str,
            payload: Value,
        ) -> std::result::Result<Value, RemoteError> {
            self.payloads
                .lock()
                .unwrap()
                .push((operation.to_string(), payload));
            Ok(self.response.clone())
        }
    }

    fn scripted(response: Value) -> Scripted {
        Scripted {
            response,
            payloads: Mutex::new(Vec::new()),
        }
    }

    fn data(value: Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_search_sends_criteria() {
        let remote = scripted(Value::Null);
        ContactCrud
            .search(
                &remote,
                ModelKind::Contact,
                &data(json!({"first_name": ["Ann", "Bob"]})),
            )
            .unwrap();

        let payloads = remote.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].0, SEARCH_OPERATION);
        assert_eq!(
            payloads[0].1,
            json!({"lookupCriteria": {"criteria": [
                {"field": "first_name", "value": "Ann"},
                {"field": "first_name", "value": "Bob"},
            ]}})
        );
    }

    #[test]
    fn test_search_without_filters_matches_all() {
        let remote = scripted(Value::Null);
        let records = ContactCrud
            .search(&remote, ModelKind::Contact, &Data::new())
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(
            remote.payloads.lock().unwrap()[0].1,
            json!({"lookupCriteria": null})
        );
    }

    #[test]
    fn test_search_parses_table() {
        let remote = scripted(json!({
            "fields": ["number1", "first_name", "last_name", "company"],
            "records": [
                {"values": {"data": ["8881234567", "Dave", "Lasley", "LasLabs Inc"]}},
                {"values": {"data": ["8887654321", "Ann", null, null]}},
            ],
        }));
        let records = ContactCrud
            .search(&remote, ModelKind::Contact, &Data::new())
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].to_wire_format(),
            data(json!({"number1": "8887654321", "first_name": "Ann"}))
        );
    }

    #[test]
    fn test_search_mismatched_row_fails() {
        let remote = scripted(json!({
            "fields": ["number1", "first_name"],
            "records": [{"values": {"data": ["8881234567"]}}],
        }));
        let result = ContactCrud.search(&remote, ModelKind::Contact, &Data::new());
        assert!(matches!(result, Err(Five9Error::DataIntegrity(_))));
    }

    #[test]
    fn test_create_sends_keyed_mapping() {
        let remote = scripted(Value::Null);
        ContactCrud
            .create(
                &remote,
                ModelKind::Contact,
                &data(json!({"first_name": "Dave", "number1": "8881234567"})),
            )
            .unwrap();

        let payloads = remote.payloads.lock().unwrap();
        assert_eq!(payloads[0].0, UPDATE_OPERATION);
        assert_eq!(
            payloads[0].1,
            json!({
                "settings": {
                    "crmAddMode": "ADD_NEW",
                    "crmUpdateMode": "DONT_UPDATE",
                    "fieldsMapping": [
                        {"columnNumber": 1, "fieldName": "number1", "key": true},
                        {"columnNumber": 2, "fieldName": "first_name", "key": false},
                    ],
                },
                "record": {"fields": ["8881234567", "Dave"]},
            })
        );
    }

    #[test]
    fn test_delete_requires_uid() {
        let remote = scripted(Value::Null);
        let record = Record::new(ModelKind::Contact);
        let result = ContactCrud.delete(&remote, &record);
        assert!(matches!(result, Err(Five9Error::Validation(_))));
        assert!(remote.payloads.lock().unwrap().is_empty());
    }
}
