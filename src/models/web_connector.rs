//! Web connectors
//!
//! A web connector sends call or contact data to an external web site when a
//! trigger fires during an interaction.

use super::ModelKind;
use crate::schema::{FieldKind, FieldSpec, ModelSchema};

const AGENT_APPLICATIONS: &[&str] = &["EmbeddedBrowser", "ExternalBrowser"];

const CTI_WEB_SERVICES: &[&str] = &["CurrentBrowserWindow", "NewBrowserWindow"];

/// Moments during an interaction at which a connector can fire
pub const TRIGGERS: &[&str] = &[
    "OnCallAccepted",
    "OnCallDisconnected",
    "ManuallyStarted",
    "ManuallyStartedAllowDuringPreviews",
    "OnPreview",
    "OnContactSelection",
    "OnWarmTransferInitiation",
    "OnCallDispositioned",
    "OnChatArrival",
    "OnChatTransfer",
    "OnChatTermination",
    "OnChatClose",
    "OnEmailArrival",
    "OnEmailTransfer",
    "OnEmailClose",
];

pub static SCHEMA: ModelSchema = ModelSchema {
    name: "WebConnector",
    uid_field: "name",
    fields: &[
        FieldSpec::boolean(
            "addWorksheet",
            "POST only: whether worksheet answers are passed as parameters",
        ),
        FieldSpec::string(
            "agentApplication",
            "Whether the URL opens in an embedded or external browser",
        )
        .required()
        .choices(AGENT_APPLICATIONS)
        .default("EmbeddedBrowser"),
        FieldSpec::boolean(
            "clearTriggerDispositions",
            "When modifying a connector, whether to clear the existing triggers",
        ),
        FieldSpec::new(
            "constants",
            FieldKind::List(ModelKind::KeyValuePair),
            "Parameters passed with constant values",
        ),
        FieldSpec::string(
            "ctiWebServices",
            "Whether the request opens in the current or a new browser window",
        )
        .required()
        .choices(CTI_WEB_SERVICES)
        .default("CurrentBrowserWindow"),
        FieldSpec::string("description", "Purpose of the connector").required(),
        FieldSpec::boolean(
            "executeInBrowser",
            "Whether the URL opens in a browser window for the agent",
        )
        .required(),
        FieldSpec::string("name", "Name of the connector").required(),
        FieldSpec::new(
            "postConstants",
            FieldKind::List(ModelKind::KeyValuePair),
            "POST only: constant parameters passed in the URL",
        ),
        FieldSpec::boolean("postMethod", "Whether the HTTP request type is POST"),
        FieldSpec::new(
            "postVariables",
            FieldKind::List(ModelKind::KeyValuePair),
            "POST only: variable parameters passed in the URL",
        ),
        FieldSpec::string(
            "startPageText",
            "POST only: text displayed while waiting for the connector to complete",
        ),
        FieldSpec::string("trigger", "Trigger during a call when the request is sent")
            .required()
            .choices(TRIGGERS),
        FieldSpec::new(
            "triggerDispositions",
            FieldKind::List(ModelKind::Disposition),
            "Trigger dispositions when the trigger is OnCallDispositioned",
        ),
        FieldSpec::string("url", "URI of the external web site"),
        FieldSpec::new(
            "variables",
            FieldKind::List(ModelKind::KeyValuePair),
            "Worksheet data passed as parameter values, e.g. @Call.ANI@",
        ),
    ],
};
