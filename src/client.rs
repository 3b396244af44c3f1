//! Client facade
//!
//! [`Five9`] owns the configuration and the shared remote handle, hands out
//! root environments and opens the supervisor session lazily, at most once.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::info;

use crate::config::Five9Config;
use crate::environment::Environment;
use crate::error::Result;
use crate::remote::Remote;

/// Service name used for supervisor calls
pub const SUPERVISOR_SERVICE: &str = "Supervisor";
/// Operation that opens a supervisor session
pub const SET_SESSION_PARAMETERS: &str = "setSessionParameters";

/// Entry point of the SDK
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use five9_sdk::{Five9, Five9Config, MemoryRemote, ModelKind};
///
/// let client = Five9::new(Five9Config::new("admin", "secret"), Arc::new(MemoryRemote::new()));
/// let contacts = client.env().model(ModelKind::Contact);
/// assert_eq!(contacts.selected_model(), Some(ModelKind::Contact));
/// ```
pub struct Five9 {
    config: Five9Config,
    remote: Arc<dyn Remote>,
    supervisor_session: OnceCell<Value>,
}

impl Five9 {
    pub fn new(config: Five9Config, remote: Arc<dyn Remote>) -> Self {
        Self {
            config,
            remote,
            supervisor_session: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Five9Config {
        &self.config
    }

    pub fn remote(&self) -> &Arc<dyn Remote> {
        &self.remote
    }

    /// Root environment sharing this client's remote
    pub fn env(&self) -> Environment {
        Environment::new(Arc::clone(&self.remote))
    }

    /// Session parameters of the supervisor session, opening it on first use.
    ///
    /// A failed attempt leaves the session unopened so the next call retries.
    pub fn supervisor_session(&self) -> Result<&Value> {
        self.supervisor_session.get_or_try_init(|| {
            let parameters = self.config.supervisor.session_parameters();
            self.remote
                .call(SUPERVISOR_SERVICE, SET_SESSION_PARAMETERS, parameters.clone())?;
            info!("Opened supervisor session for {}", self.config.username);
            Ok(parameters)
        })
    }
}

impl fmt::Debug for Five9 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Five9")
            .field("config", &self.config)
            .field("supervisor_session", &self.supervisor_session.get().is_some())
            .finish()
    }
}
