//! Contact records held in the Five9 contact database

use crate::schema::{FieldSpec, ModelSchema};

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "Contact",
    uid_field: "number1",
    fields: &[
        FieldSpec::string("number1", "First phone number").required(),
        FieldSpec::string("number2", "Second phone number"),
        FieldSpec::string("number3", "Third phone number"),
        FieldSpec::string("first_name", "First name"),
        FieldSpec::string("last_name", "Last name"),
        FieldSpec::string("company", "Company"),
        FieldSpec::string("street", "Street address"),
        FieldSpec::string("city", "City"),
        FieldSpec::string("state", "State"),
        FieldSpec::string("zip", "Zip"),
    ],
};
