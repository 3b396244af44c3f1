//! Model definitions
//!
//! The closed set of model types this SDK knows about. Each variant of
//! [`ModelKind`] owns a static [`ModelSchema`] declared in its own module.

pub mod contact;
pub mod contact_field;
pub mod disposition;
pub mod disposition_type_params;
pub mod key_value_pair;
pub mod timer;
pub mod web_connector;

use std::fmt;
use std::str::FromStr;

use crate::error::Five9Error;
use crate::schema::ModelSchema;

/// A registered model type
///
/// # Example
///
/// ```rust
/// use five9_sdk::models::ModelKind;
///
/// let kind: ModelKind = "WebConnector".parse().unwrap();
/// assert_eq!(kind, ModelKind::WebConnector);
/// assert_eq!(kind.schema().uid_field, "name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Contact,
    ContactField,
    Disposition,
    DispositionTypeParams,
    KeyValuePair,
    Timer,
    WebConnector,
}

impl ModelKind {
    /// Every model, in declaration order
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Contact,
        ModelKind::ContactField,
        ModelKind::Disposition,
        ModelKind::DispositionTypeParams,
        ModelKind::KeyValuePair,
        ModelKind::Timer,
        ModelKind::WebConnector,
    ];

    pub fn name(self) -> &'static str {
        self.schema().name
    }

    pub fn schema(self) -> &'static ModelSchema {
        match self {
            ModelKind::Contact => &contact::SCHEMA,
            ModelKind::ContactField => &contact_field::SCHEMA,
            ModelKind::Disposition => &disposition::SCHEMA,
            ModelKind::DispositionTypeParams => &disposition_type_params::SCHEMA,
            ModelKind::KeyValuePair => &key_value_pair::SCHEMA,
            ModelKind::Timer => &timer::SCHEMA,
            ModelKind::WebConnector => &web_connector::SCHEMA,
        }
    }

    /// Embedded models only ever appear nested inside other records and have
    /// no remote operations of their own.
    pub fn is_embedded(self) -> bool {
        matches!(
            self,
            ModelKind::DispositionTypeParams | ModelKind::KeyValuePair | ModelKind::Timer
        )
    }

    /// Position of this kind within [`ModelKind::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = Five9Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Five9Error::ModelNotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (idx, kind) in ModelKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), idx);
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let result = "Campaign".parse::<ModelKind>();
        assert!(matches!(result, Err(Five9Error::ModelNotFound(name)) if name == "Campaign"));
    }

    #[test]
    fn test_uid_fields_are_declared() {
        for kind in ModelKind::ALL.into_iter().filter(|k| !k.is_embedded()) {
            let schema = kind.schema();
            assert!(
                schema.uid_spec().is_some(),
                "{} does not declare its uid field {}",
                schema.name,
                schema.uid_field
            );
        }
    }
}
