//! Custom fields of the contact database

use crate::schema::{FieldKind, FieldSpec, ModelSchema};

const DISPLAY_AS: &[&str] = &["Short", "Long", "Invisible"];

const MAP_TO: &[&str] = &[
    "None",
    "LastAgent",
    "LastDisposition",
    "LastSystemDisposition",
    "LastAgentDisposition",
    "LastDispositionDateTime",
    "LastSystemDispositionDateTime",
    "LastAgentDispositionDateTime",
    "LastAttemptedNumber",
    "LastAttemptedNumberN1N2N3",
    "LastCampaign",
    "AttemptsForLastCampaign",
    "LastList",
    "CreatedDateTime",
    "LastModifiedDateTime",
];

const FIELD_TYPES: &[&str] = &[
    "STRING",
    "NUMBER",
    "DATE",
    "TIME",
    "DATE_TIME",
    "CURRENCY",
    "BOOLEAN",
    "PERCENT",
    "EMAIL",
    "URL",
    "PHONE",
    "TIME_PERIOD",
];

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "ContactField",
    uid_field: "name",
    fields: &[
        FieldSpec::string("displayAs", "Display options for the data in the agent desktop")
            .choices(DISPLAY_AS),
        FieldSpec::string(
            "mapTo",
            "System information mapped into the field when a disposition is set",
        )
        .choices(MAP_TO),
        FieldSpec::string("name", "Name of the contact field").required(),
        FieldSpec::new(
            "restrictions",
            FieldKind::Dynamic,
            "Restrictions imposed on the data stored in this field",
        ),
        FieldSpec::boolean("system", "Whether the field is set by the system rather than an agent"),
        FieldSpec::string("type", "Type of data stored in this field").choices(FIELD_TYPES),
    ],
};
