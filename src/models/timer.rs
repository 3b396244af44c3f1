use crate::schema::{FieldSpec, ModelSchema};

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "Timer",
    uid_field: "name",
    fields: &[
        FieldSpec::integer("days", "Number of days"),
        FieldSpec::integer("hours", "Number of hours"),
        FieldSpec::integer("minutes", "Number of minutes"),
        FieldSpec::integer("seconds", "Number of seconds"),
    ],
};
