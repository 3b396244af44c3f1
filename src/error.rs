//! Error types for record and environment operations
//!
//! Every failure surfaces to the immediate caller of the Environment/Record API.
//! Local failures (preconditions, unknown fields, validation) are raised before
//! any remote call is made; remote failures are propagated unchanged.

use std::fmt;

use crate::remote::RemoteError;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Five9Error>;

/// The environment state a verb requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// A model must be selected before any CRUD verb
    ModelSelected,
    /// A record set must be selected before write, delete or iteration
    RecordSetSelected,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::ModelSelected => f.write_str(
                "You cannot perform CRUD operations without selecting a model first",
            ),
            Precondition::RecordSetSelected => f.write_str("There are no records in the set"),
        }
    }
}

/// Errors raised by the environment, records and translators
#[derive(Debug, thiserror::Error)]
pub enum Five9Error {
    /// A verb was invoked from an environment state that does not support it
    #[error("Precondition failed: {0}")]
    Precondition(Precondition),

    /// Indexed access to a field the model does not declare
    #[error("Field '{field}' is not declared on model {model}")]
    FieldNotFound { model: String, field: String },

    /// The remote reported a failure
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A wire response did not have the expected shape
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Caller-supplied data violates the model schema
    #[error("Validation error: {0}")]
    Validation(String),

    /// No model is registered under the requested name
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The model has no remote counterpart for the operation
    #[error("Model {model} does not support the '{operation}' operation")]
    Unsupported { model: String, operation: String },
}

impl Five9Error {
    pub(crate) fn field_not_found(model: &str, field: &str) -> Self {
        Five9Error::FieldNotFound {
            model: model.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn unsupported(model: &str, operation: &str) -> Self {
        Five9Error::Unsupported {
            model: model.to_string(),
            operation: operation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        let err = Five9Error::Precondition(Precondition::ModelSelected);
        assert!(err.to_string().contains("without selecting a model"));

        let err = Five9Error::Precondition(Precondition::RecordSetSelected);
        assert!(err.to_string().contains("no records in the set"));
    }

    #[test]
    fn test_remote_error_is_transparent() {
        let err: Five9Error = RemoteError::Network("connection reset".to_string()).into();
        assert_eq!(err.to_string(), "Network error: connection reset");
        assert!(matches!(err, Five9Error::Remote(RemoteError::Network(_))));
    }

    #[test]
    fn test_field_not_found_message() {
        let err = Five9Error::field_not_found("Contact", "nope");
        assert_eq!(
            err.to_string(),
            "Field 'nope' is not declared on model Contact"
        );
    }
}
