//! Call dispositions

use super::ModelKind;
use crate::schema::{FieldKind, FieldSpec, ModelSchema};

/// Disposition types understood by the remote
pub const DISPOSITION_TYPES: &[&str] = &[
    "FinalDisp",
    "FinalApplyToCampaigns",
    "AddActiveNumber",
    "AddAndFinalize",
    "AddAllNumbers",
    "DoNotDial",
    "RedialNumber",
];

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "Disposition",
    uid_field: "name",
    fields: &[
        FieldSpec::boolean(
            "agentMustCompleteWorksheet",
            "Whether the agent completes a worksheet before selecting the disposition",
        ),
        FieldSpec::boolean(
            "agentMustConfirm",
            "Whether the agent is prompted to confirm the disposition",
        ),
        FieldSpec::string("description", "Description of the disposition"),
        FieldSpec::string("name", "Name of the disposition").required(),
        FieldSpec::boolean(
            "resetAttemptsCounter",
            "Whether the disposition resets the dialing attempts counter",
        ),
        FieldSpec::boolean(
            "sendEmailNotification",
            "Whether call details are sent as an email notification",
        ),
        FieldSpec::boolean(
            "sendIMNotification",
            "Whether call details are sent as an instant message",
        ),
        FieldSpec::boolean(
            "trackAsFirstCallResolution",
            "Whether the call counts towards first call resolution statistics",
        ),
        FieldSpec::string("type", "Disposition type").choices(DISPOSITION_TYPES),
        FieldSpec::new(
            "typeParameters",
            FieldKind::Instance(ModelKind::DispositionTypeParams),
            "Parameters that apply to the disposition type",
        ),
    ],
};
