//! Field-checked records
//!
//! A [`Record`] is one in-memory instance of a model. Declared fields hold typed
//! [`FieldValue`]s; anything else assigned through [`Record::update`] (or any
//! private `_`-prefixed name) lives in a separate attribute map that is never
//! serialized.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::schema::{FieldKind, FieldSpec, ModelSchema, is_private};
use crate::wire::Data;

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Bool(bool),
    Record(Record),
    List(Vec<Record>),
    Dynamic(Value),
}

impl FieldValue {
    /// Convert a wire value into the type declared by `spec`.
    ///
    /// Strings are accepted for integer and boolean fields when they parse, and
    /// numbers are accepted for string fields. Nested objects are materialized
    /// as records of the declared model.
    pub fn from_wire(spec: &FieldSpec, value: &Value) -> std::result::Result<Self, String> {
        let converted = match (spec.kind, value) {
            (FieldKind::Dynamic, v) => FieldValue::Dynamic(v.clone()),
            (FieldKind::String, Value::String(s)) => FieldValue::String(s.clone()),
            (FieldKind::String, Value::Number(n)) => FieldValue::String(n.to_string()),
            (FieldKind::Integer, Value::Number(n)) => n
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| format!("{} is not an integer", n))?,
            (FieldKind::Integer, Value::String(s)) => s
                .trim()
                .parse()
                .map(FieldValue::Integer)
                .map_err(|_| format!("'{}' is not an integer", s))?,
            (FieldKind::Bool, Value::Bool(b)) => FieldValue::Bool(*b),
            (FieldKind::Bool, Value::String(s)) if s.eq_ignore_ascii_case("true") => {
                FieldValue::Bool(true)
            }
            (FieldKind::Bool, Value::String(s)) if s.eq_ignore_ascii_case("false") => {
                FieldValue::Bool(false)
            }
            (FieldKind::Instance(kind), Value::Object(map)) => {
                FieldValue::Record(Record::from_wire(kind, map).map_err(|e| e.to_string())?)
            }
            (FieldKind::List(kind), Value::Array(items)) => FieldValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(map) => {
                            Record::from_wire(kind, map).map_err(|e| e.to_string())
                        }
                        other => Err(format!("expected a {} record, got {}", kind, other)),
                    })
                    .collect::<std::result::Result<_, _>>()?,
            ),
            (kind, other) => return Err(format!("expected {}, got {}", kind.describe(), other)),
        };

        converted.check(spec)?;
        Ok(converted)
    }

    /// Check that this value fits the declaration
    pub fn check(&self, spec: &FieldSpec) -> std::result::Result<(), String> {
        match (spec.kind, self) {
            (FieldKind::Dynamic, _)
            | (FieldKind::Integer, FieldValue::Integer(_))
            | (FieldKind::Bool, FieldValue::Bool(_)) => Ok(()),
            (FieldKind::String, FieldValue::String(s)) => spec.check_choice(s),
            (FieldKind::Instance(kind), FieldValue::Record(record)) if record.kind() == kind => {
                Ok(())
            }
            (FieldKind::List(kind), FieldValue::List(records))
                if records.iter().all(|r| r.kind() == kind) =>
            {
                Ok(())
            }
            (kind, _) => Err(format!("expected {}", kind.describe())),
        }
    }

    /// Wire representation of this value
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Record(record) => Value::Object(record.to_wire_format()),
            FieldValue::List(records) => Value::Array(
                records
                    .iter()
                    .map(|r| Value::Object(r.to_wire_format()))
                    .collect(),
            ),
            FieldValue::Dynamic(v) => v.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            FieldValue::List(records) => Some(records),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        FieldValue::Record(value)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(value: Vec<Record>) -> Self {
        FieldValue::List(value)
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        value.to_value()
    }
}

/// One instance of a model
///
/// # Example
///
/// ```rust
/// use five9_sdk::models::ModelKind;
/// use five9_sdk::record::{FieldValue, Record};
///
/// let mut record = Record::new(ModelKind::Disposition);
/// record.set_field("name", "Sold").unwrap();
///
/// assert_eq!(record.field("name").unwrap(), Some(&FieldValue::from("Sold")));
/// assert!(record.field("nope").is_err());
/// assert_eq!(record.get_or("nope", &FieldValue::from("default")).as_str(), Some("default"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: ModelKind,
    values: BTreeMap<&'static str, FieldValue>,
    attributes: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Build a new, unsaved record from caller data, validating it first.
    ///
    /// Fields left unset in `data` take their declared defaults.
    pub fn from_data(kind: ModelKind, data: &Data) -> Result<Self> {
        kind.schema().validate(data)?;
        let data = kind.schema().with_defaults(data);
        let mut record = Self::new(kind);
        for (name, value) in &data {
            if value.is_null() {
                continue;
            }
            match kind.schema().field(name) {
                Some(spec) => {
                    let converted = FieldValue::from_wire(spec, value).map_err(|reason| {
                        Five9Error::Validation(format!("{}.{}: {}", kind, name, reason))
                    })?;
                    record.values.insert(spec.name, converted);
                }
                None => {
                    record
                        .attributes
                        .insert(name.clone(), FieldValue::Dynamic(value.clone()));
                }
            }
        }
        Ok(record)
    }

    /// Materialize a record from a remote response.
    ///
    /// Null values are skipped and undeclared keys are ignored; a declared value
    /// of the wrong shape is a data-integrity error.
    pub fn from_wire(kind: ModelKind, data: &Data) -> Result<Self> {
        let mut record = Self::new(kind);
        for (name, value) in data {
            if value.is_null() {
                continue;
            }
            match kind.schema().field(name) {
                Some(spec) => {
                    let converted = FieldValue::from_wire(spec, value).map_err(|reason| {
                        Five9Error::DataIntegrity(format!("{}.{}: {}", kind, name, reason))
                    })?;
                    record.values.insert(spec.name, converted);
                }
                None => debug!("Ignoring undeclared field {}.{} from remote", kind, name),
            }
        }
        Ok(record)
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn schema(&self) -> &'static ModelSchema {
        self.kind.schema()
    }

    /// Indexed read. Fails if `name` is not a declared field.
    pub fn field(&self, name: &str) -> Result<Option<&FieldValue>> {
        if is_private(name) {
            return Ok(self.attributes.get(name));
        }
        let spec = self.declared(name)?;
        Ok(self.values.get(spec.name))
    }

    /// Indexed write. Fails if `name` is not a declared field or the value does
    /// not fit its declaration.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        if is_private(name) {
            self.attributes.insert(name.to_string(), value);
            return Ok(());
        }
        let spec = self.declared(name)?;
        value.check(spec).map_err(|reason| {
            Five9Error::Validation(format!("{}.{}: {}", self.kind, name, reason))
        })?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Remove a declared field's value
    pub fn clear_field(&mut self, name: &str) -> Result<Option<FieldValue>> {
        let spec = self.declared(name)?;
        Ok(self.values.remove(spec.name))
    }

    /// Value of a field or attribute, if set. Never fails.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .get(name)
            .or_else(|| self.attributes.get(name))
    }

    /// Value of a field or attribute, or `default` when unset
    pub fn get_or<'a>(&'a self, name: &str, default: &'a FieldValue) -> &'a FieldValue {
        self.get(name).unwrap_or(default)
    }

    /// Bulk assignment without the field-existence check.
    ///
    /// Unlike [`Record::set_field`], undeclared names are accepted and stored
    /// as attributes: they are visible through [`Record::get`] but not through
    /// indexed access, and they are never serialized. Declared names are
    /// assigned without type checks.
    pub fn update<I, K, V>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (name, value) in data {
            let name = name.into();
            match self.kind.schema().field(&name) {
                Some(spec) if !is_private(&name) => {
                    self.values.insert(spec.name, value.into());
                }
                _ => {
                    self.attributes.insert(name, value.into());
                }
            }
        }
    }

    /// Value of the unique-identifier field
    pub fn uid(&self) -> Option<&FieldValue> {
        self.values.get(self.schema().uid_field)
    }

    /// All declared, currently-set fields in declaration order
    pub fn to_wire_pairs(&self) -> Vec<(String, Value)> {
        self.schema()
            .fields
            .iter()
            .filter_map(|spec| {
                self.values
                    .get(spec.name)
                    .map(|value| (spec.name.to_string(), value.to_value()))
            })
            .collect()
    }

    /// The payload handed to remote create and modify operations, keyed in
    /// declaration order
    pub fn to_wire_format(&self) -> Data {
        self.to_wire_pairs().into_iter().collect()
    }

    fn declared(&self, name: &str) -> Result<&'static FieldSpec> {
        self.schema()
            .field(name)
            .ok_or_else(|| Five9Error::field_not_found(self.kind.name(), name))
    }
}
