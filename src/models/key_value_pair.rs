//! Named parameters passed by web connectors

use crate::schema::{FieldSpec, ModelSchema};

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "KeyValuePair",
    uid_field: "key",
    fields: &[
        FieldSpec::string("key", "Name used to identify the pair").required(),
        FieldSpec::string("value", "Value that corresponds to the name").required(),
    ],
};
