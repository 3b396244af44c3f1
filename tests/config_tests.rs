//! Configuration loading and client facade tests

use std::io::Write;
use std::sync::Arc;

use five9_sdk::{ConfigError, Five9, Five9Config, MemoryRemote, ModelKind, registry};
use serde_json::json;
use tempfile::NamedTempFile;

mod config_file_tests {
    use super::*;

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"
username = "admin@example.com"
password = "secret"

[supervisor]
rolling_period = "Minutes15"
shift_start_hour = 9
"#
        )?;

        let config = Five9Config::load(file.path())?;
        assert_eq!(config.username, "admin@example.com");
        assert_eq!(config.supervisor.rolling_period, "Minutes15");
        assert_eq!(config.supervisor.time_zone_offset, -7);
        assert!(config.configuration_url().contains("user=admin%40example.com"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Five9Config::load(dir.path().join("five9.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_serialized_config_loads_back() -> anyhow::Result<()> {
        let mut config = Five9Config::new("admin", "secret");
        config.supervisor.statistics_range = "CurrentDay".to_string();

        let mut file = NamedTempFile::new()?;
        file.write_all(toml::to_string(&config)?.as_bytes())?;

        assert_eq!(Five9Config::load(file.path())?, config);
        Ok(())
    }
}

mod client_tests {
    use super::*;

    #[test]
    fn test_supervisor_session_uses_configured_settings() -> anyhow::Result<()> {
        let mut config = Five9Config::new("admin", "secret");
        config.supervisor.time_zone_offset = 1;
        let remote = Arc::new(MemoryRemote::new());
        let client = Five9::new(config, remote.clone());

        client.supervisor_session()?;
        client.supervisor_session()?;

        let params = remote.session_parameters().unwrap();
        assert_eq!(params["timeZone"], json!(3_600_000));
        assert_eq!(remote.calls().len(), 1);
        Ok(())
    }

    #[test]
    fn test_environments_from_client_share_registry() -> anyhow::Result<()> {
        let client = Five9::new(
            Five9Config::new("admin", "secret"),
            Arc::new(MemoryRemote::new()),
        );
        let by_kind = client.env().model(ModelKind::WebConnector);
        let by_name = client.env().navigate("WebConnector")?;
        assert_eq!(by_kind.selected_model(), by_name.selected_model());
        assert!(std::ptr::eq(
            registry::entry(ModelKind::WebConnector),
            registry::resolve("WebConnector")?
        ));
        Ok(())
    }
}
