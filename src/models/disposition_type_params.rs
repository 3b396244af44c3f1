//! Redial parameters attached to a disposition

use super::ModelKind;
use crate::schema::{FieldKind, FieldSpec, ModelSchema};

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "DispositionTypeParams",
    uid_field: "name",
    fields: &[
        FieldSpec::boolean(
            "allowChangeTimer",
            "Whether the agent can change the redial timer",
        ),
        FieldSpec::integer("attempts", "Number of redial attempts"),
        FieldSpec::new("timer", FieldKind::Instance(ModelKind::Timer), "Redial timer"),
        FieldSpec::boolean("useTimer", "Whether the disposition uses a redial timer"),
    ],
};
