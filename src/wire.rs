//! Wire-format translation
//!
//! Helpers that convert between the remote's loosely-typed payloads and plain
//! field mappings:
//! - criteria building for structured searches
//! - uniform-table parsing (`fields` + positional `values.data` rows)
//! - nested-object flattening
//! - name-pattern building for pattern-based searches
//! - field-mapping construction for list updates

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Five9Error, Result};

/// A field mapping as exchanged with the remote
pub type Data = Map<String, Value>;

/// Pattern that matches every name
pub const MATCH_ALL_PATTERN: &str = ".*";

/// A single field/value match unit of the remote query language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    pub field: String,
    pub value: Value,
}

/// Build the flat criteria list for a filter mapping.
///
/// A sequence value is exploded into one criterion per element (recursively for
/// nested sequences). The remote treats criteria on the same field as a
/// disjunction and criteria on different fields as a conjunction. An empty
/// mapping produces no criteria, which the remote reads as "match all".
///
/// # Example
///
/// ```rust
/// use five9_sdk::wire::build_criteria;
/// use serde_json::json;
///
/// let filters = json!({"first_name": ["Ann", "Bob"]});
/// let criteria = build_criteria(filters.as_object().unwrap());
/// assert_eq!(criteria.len(), 2);
/// assert_eq!(criteria[1].value, json!("Bob"));
/// ```
pub fn build_criteria(filters: &Data) -> Vec<Criterion> {
    let mut criteria = Vec::new();
    for (field, value) in filters {
        push_criteria(&mut criteria, field, value);
    }
    criteria
}

fn push_criteria(criteria: &mut Vec<Criterion>, field: &str, value: &Value) {
    match value {
        Value::Array(values) => {
            for inner in values {
                push_criteria(criteria, field, inner);
            }
        }
        _ => criteria.push(Criterion {
            field: field.to_string(),
            value: value.clone(),
        }),
    }
}

/// Zip each row's values against the field names.
///
/// Rows are shaped `{"values": {"data": [...]}}`. A row whose value count
/// differs from the field count is a data-integrity error.
pub fn parse_table(fields: &[String], rows: &[Value]) -> Result<Vec<Data>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let values = row
                .get("values")
                .and_then(|v| v.get("data"))
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    Five9Error::DataIntegrity(format!("Row {} has no values.data list", idx))
                })?;

            if values.len() != fields.len() {
                return Err(Five9Error::DataIntegrity(format!(
                    "Row {} has {} values but the response declares {} fields",
                    idx,
                    values.len(),
                    fields.len()
                )));
            }

            Ok(fields
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect())
        })
        .collect()
}

/// Parse a full table response of the form `{"fields": [...], "records": [...]}`.
///
/// A null response, or one without records, yields no rows.
pub fn parse_table_response(response: &Value) -> Result<Vec<Data>> {
    if response.is_null() {
        return Ok(Vec::new());
    }

    let fields = response
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| Five9Error::DataIntegrity("Response has no fields list".to_string()))?
        .iter()
        .map(|f| {
            f.as_str().map(str::to_string).ok_or_else(|| {
                Five9Error::DataIntegrity(format!("Field name {} is not a string", f))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match response.get("records") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rows)) => parse_table(&fields, rows),
        Some(other) => Err(Five9Error::DataIntegrity(format!(
            "Expected a list of records, got {}",
            other
        ))),
    }
}

/// Recursively unwrap nested structures into plain mappings, dropping fields
/// whose value is null. Scalar leaves (including `false` and `0`) are kept.
pub fn flatten(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), flatten(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(flatten).collect()),
        other => other.clone(),
    }
}

/// Build a name pattern from the unique-identifier filter.
///
/// A string is used verbatim, a sequence of strings becomes `(a|b|c)`, and an
/// absent or empty filter matches everything.
pub fn name_pattern(filters: &Data, uid_field: &str) -> String {
    match filters.get(uid_field) {
        None | Some(Value::Null) => MATCH_ALL_PATTERN.to_string(),
        Some(Value::String(name)) if name.is_empty() => MATCH_ALL_PATTERN.to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(Value::Array(names)) if names.is_empty() => MATCH_ALL_PATTERN.to_string(),
        Some(Value::Array(names)) => {
            let alternatives: Vec<String> = names.iter().map(scalar_text).collect();
            format!("({})", alternatives.join("|"))
        }
        Some(other) => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One column of a list update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMappingEntry {
    /// 1-based column position
    pub column_number: usize,
    pub field_name: String,
    /// Whether the column identifies the record
    pub key: bool,
}

/// Column mapping and ordered values for list-style updates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub fields_mapping: Vec<FieldMappingEntry>,
    /// Values in column order
    pub fields: Vec<Value>,
}

/// Create a field mapping for the ordered `(name, value)` pairs of a record.
pub fn create_mapping(record: &[(String, Value)], keys: &[&str]) -> FieldMapping {
    let mut mapping = FieldMapping {
        fields_mapping: Vec::with_capacity(record.len()),
        fields: Vec::with_capacity(record.len()),
    };

    for (idx, (name, value)) in record.iter().enumerate() {
        mapping.fields_mapping.push(FieldMappingEntry {
            column_number: idx + 1,
            field_name: name.clone(),
            key: keys.contains(&name.as_str()),
        });
        mapping.fields.push(value.clone());
    }

    mapping
}
