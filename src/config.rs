//! Client configuration
//!
//! Credentials, service endpoints and supervisor session settings, loadable
//! from a TOML file:
//!
//! ```toml
//! username = "admin@example.com"
//! password = "secret"
//!
//! [supervisor]
//! rolling_period = "Minutes15"
//! time_zone_offset = -5
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Placeholder replaced by the URL-encoded username in endpoint templates
pub const USER_PLACEHOLDER: &str = "{user}";

pub const DEFAULT_CONFIGURATION_WSDL: &str =
    "https://api.five9.com/wsadmin/v9_5/AdminWebService?wsdl&user={user}";
pub const DEFAULT_SUPERVISOR_WSDL: &str =
    "https://api.five9.com/wssupervisor/v9_5/SupervisorWebService?wsdl&user={user}";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Connection settings for the administration and supervisor services
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Five9Config {
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_configuration_wsdl")]
    pub configuration_wsdl: String,
    #[serde(default = "default_supervisor_wsdl")]
    pub supervisor_wsdl: String,
    #[serde(default)]
    pub supervisor: SupervisorSettings,
}

fn default_configuration_wsdl() -> String {
    DEFAULT_CONFIGURATION_WSDL.to_string()
}

fn default_supervisor_wsdl() -> String {
    DEFAULT_SUPERVISOR_WSDL.to_string()
}

impl fmt::Debug for Five9Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Five9Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("configuration_wsdl", &self.configuration_wsdl)
            .field("supervisor_wsdl", &self.supervisor_wsdl)
            .field("supervisor", &self.supervisor)
            .finish()
    }
}

impl Five9Config {
    /// Configuration with default endpoints and session settings
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            configuration_wsdl: default_configuration_wsdl(),
            supervisor_wsdl: default_supervisor_wsdl(),
            supervisor: SupervisorSettings::default(),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username cannot be empty".to_string()));
        }
        for template in [&self.configuration_wsdl, &self.supervisor_wsdl] {
            if !template.contains(USER_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "endpoint {} has no {} placeholder",
                    template, USER_PLACEHOLDER
                )));
            }
        }
        Ok(())
    }

    /// WSDL location of the administration (configuration) service
    pub fn configuration_url(&self) -> String {
        self.endpoint(&self.configuration_wsdl)
    }

    /// WSDL location of the supervisor (statistics) service
    pub fn supervisor_url(&self) -> String {
        self.endpoint(&self.supervisor_wsdl)
    }

    fn endpoint(&self, template: &str) -> String {
        template.replace(USER_PLACEHOLDER, &urlencoding::encode(&self.username))
    }
}

/// Parameters of the supervisor session created before statistics calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SupervisorSettings {
    pub force_logout_session: bool,
    pub rolling_period: String,
    pub statistics_range: String,
    /// Hour of the day the shift starts
    pub shift_start_hour: i64,
    /// Offset from UTC, in hours
    pub time_zone_offset: i64,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            force_logout_session: true,
            rolling_period: "Minutes30".to_string(),
            statistics_range: "CurrentWeek".to_string(),
            shift_start_hour: 8,
            time_zone_offset: -7,
        }
    }
}

impl SupervisorSettings {
    /// Session parameters as sent to the remote; hours become milliseconds
    pub fn session_parameters(&self) -> Value {
        json!({
            "forceLogoutSession": self.force_logout_session,
            "rollingPeriod": self.rolling_period,
            "statisticsRange": self.statistics_range,
            "shiftStart": to_milliseconds(self.shift_start_hour),
            "timeZone": to_milliseconds(self.time_zone_offset),
        })
    }
}

fn to_milliseconds(hours: i64) -> i64 {
    hours * 60 * 60 * 1000
}
