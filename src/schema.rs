//! Static field schemas
//!
//! Every model variant declares its fields as a static table of [`FieldSpec`]s.
//! Validation is a pure function over that table and a candidate data mapping.

use serde_json::Value;

use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::wire::Data;

/// Names starting with this prefix are internal bookkeeping attributes. They are
/// exempt from field-existence checks and never serialized.
pub const PRIVATE_PREFIX: &str = "_";

/// Returns true for internal attribute names
pub fn is_private(name: &str) -> bool {
    name.starts_with(PRIVATE_PREFIX)
}

/// Type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Bool,
    /// A single nested record of the given model
    Instance(ModelKind),
    /// An ordered sequence of nested records of the given model
    List(ModelKind),
    /// Untyped value, passed through as-is
    Dynamic,
}

impl FieldKind {
    pub fn describe(&self) -> String {
        match self {
            FieldKind::String => "string".to_string(),
            FieldKind::Integer => "integer".to_string(),
            FieldKind::Bool => "boolean".to_string(),
            FieldKind::Instance(kind) => format!("{} record", kind),
            FieldKind::List(kind) => format!("list of {} records", kind),
            FieldKind::Dynamic => "any value".to_string(),
        }
    }
}

/// Declaration of a single model field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    /// Allowed values for string fields; empty means unrestricted
    pub choices: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            choices: &[],
            default: None,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, description)
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Bool, description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Whether a caller must supply this field
    pub fn is_mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }

    /// Check a string value against the choice set
    pub fn check_choice(&self, value: &str) -> std::result::Result<(), String> {
        if self.choices.is_empty() || self.choices.contains(&value) {
            Ok(())
        } else {
            Err(format!(
                "'{}' is not a valid choice for {} (expected one of: {})",
                value,
                self.name,
                self.choices.join(", ")
            ))
        }
    }
}

/// The closed declaration of a model's fields
#[derive(Debug, PartialEq, Eq)]
pub struct ModelSchema {
    pub name: &'static str,
    /// Field that uniquely identifies a record on the remote
    pub uid_field: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }

    pub fn uid_spec(&self) -> Option<&'static FieldSpec> {
        self.field(self.uid_field)
    }

    /// Validate caller-supplied data against this schema.
    ///
    /// Undeclared keys fail with `FieldNotFound`; missing mandatory fields, values
    /// of the wrong type and values outside a choice set fail with `Validation`.
    /// Private names are ignored.
    pub fn validate(&self, data: &Data) -> Result<()> {
        for key in data.keys() {
            if !is_private(key) && !self.has_field(key) {
                return Err(Five9Error::field_not_found(self.name, key));
            }
        }

        for spec in self.fields {
            match data.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.is_mandatory() {
                        return Err(Five9Error::Validation(format!(
                            "{} requires the '{}' field",
                            self.name, spec.name
                        )));
                    }
                }
                Some(value) => {
                    crate::record::FieldValue::from_wire(spec, value).map_err(|reason| {
                        Five9Error::Validation(format!("{}.{}: {}", self.name, spec.name, reason))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// A copy of `data` with declared defaults filled in for unset fields
    pub fn with_defaults(&self, data: &Data) -> Data {
        let mut filled = data.clone();
        for spec in self.fields {
            let Some(default) = spec.default else {
                continue;
            };
            if filled.get(spec.name).is_none_or(Value::is_null) {
                filled.insert(spec.name.to_string(), Value::String(default.to_string()));
            }
        }
        filled
    }

    /// The declared entries of `data`, in declaration order
    pub fn ordered(&self, data: &Data) -> Vec<(String, Value)> {
        self.fields
            .iter()
            .filter_map(|spec| {
                data.get(spec.name)
                    .map(|value| (spec.name.to_string(), value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_validate_accepts_minimal_disposition() {
        let schema = ModelKind::Disposition.schema();
        assert!(schema.validate(&data(json!({"name": "Sold"}))).is_ok());
    }

    #[test]
    fn test_validate_missing_required() {
        let schema = ModelKind::Disposition.schema();
        let result = schema.validate(&data(json!({"description": "No name"})));
        assert!(matches!(result, Err(Five9Error::Validation(msg)) if msg.contains("'name'")));
    }

    #[test]
    fn test_validate_required_with_default_is_optional() {
        // agentApplication and ctiWebServices carry defaults
        let schema = ModelKind::WebConnector.schema();
        let result = schema.validate(&data(json!({
            "name": "CRM",
            "description": "Pop the CRM",
            "executeInBrowser": true,
            "trigger": "OnCallAccepted",
        })));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_choice() {
        let schema = ModelKind::WebConnector.schema();
        let result = schema.validate(&data(json!({
            "name": "CRM",
            "description": "Pop the CRM",
            "executeInBrowser": true,
            "trigger": "Whenever",
        })));
        assert!(matches!(result, Err(Five9Error::Validation(msg)) if msg.contains("Whenever")));
    }

    #[test]
    fn test_validate_rejects_undeclared_field() {
        let schema = ModelKind::Disposition.schema();
        let result = schema.validate(&data(json!({"name": "Sold", "colour": "red"})));
        assert!(matches!(
            result,
            Err(Five9Error::FieldNotFound { field, .. }) if field == "colour"
        ));
    }

    #[test]
    fn test_validate_ignores_private_keys() {
        let schema = ModelKind::Disposition.schema();
        assert!(schema.validate(&data(json!({"name": "Sold", "_seen": 1}))).is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let schema = ModelKind::Timer.schema();
        let result = schema.validate(&data(json!({"days": "soon"})));
        assert!(matches!(result, Err(Five9Error::Validation(_))));
    }

    #[test]
    fn test_ordered_follows_declaration_order() {
        let schema = ModelKind::Timer.schema();
        let ordered = schema.ordered(&data(json!({"seconds": 4, "days": 1})));
        let names: Vec<&str> = ordered.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["days", "seconds"]);
    }

    #[test]
    fn test_with_defaults_fills_unset_fields_only() {
        let schema = ModelKind::WebConnector.schema();
        let filled = schema.with_defaults(&data(json!({
            "name": "CRM",
            "agentApplication": "ExternalBrowser",
            "ctiWebServices": null,
        })));
        assert_eq!(filled["agentApplication"], json!("ExternalBrowser"));
        assert_eq!(filled["ctiWebServices"], json!("CurrentBrowserWindow"));
        assert!(!filled.contains_key("url"));
    }

    #[test]
    fn test_check_choice_unrestricted() {
        let spec = FieldSpec::string("anything", "Free text");
        assert!(spec.check_choice("whatever").is_ok());
    }
}
