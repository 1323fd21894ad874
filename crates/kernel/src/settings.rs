use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "INVSYS_ENV";
const CONFIG_DIR_ENV: &str = "INVSYS_CONFIG_DIR";
const ENV_PREFIX: &str = "INVSYS";
const ENV_SEPARATOR: &str = "__";
/// Plain port variable honored on top of every other source.
const PORT_ENV: &str = "PORT";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(name: &str) -> anyhow::Result<Self> {
        match name {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// `INVSYS__*` variables, and finally `PORT`.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to repo root `config` directory.
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        Self::from_sources(&config_dir, &environment, std::env::var(PORT_ENV).ok())
    }

    /// Build settings from an explicit config directory, environment name and
    /// port override. A blank port counts as unset.
    pub fn from_sources(
        config_dir: &Path,
        environment: &str,
        port: Option<String>,
    ) -> anyhow::Result<Self> {
        let parsed_environment = Environment::parse(environment)?;
        let port = port.filter(|p| !p.trim().is_empty());

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .set_override_option("server.port", port)
            .with_context(|| format!("invalid {} value", PORT_ENV))?;

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parsed_environment;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "ServerSettings::default_cors_origin")]
    pub cors_origin: String,
    #[serde(default = "ServerSettings::default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    fn default_cors_origin() -> String {
        "http://localhost:3000".to_string()
    }

    fn default_body_limit_bytes() -> usize {
        1024 * 1024
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            cors_origin: Self::default_cors_origin(),
            body_limit_bytes: Self::default_body_limit_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// `mysql://...`, or `memory://` for the in-process backend.
    #[serde(default = "DatabaseSettings::default_url")]
    pub url: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
    /// Drop, recreate and reseed every table at startup.
    #[serde(default = "DatabaseSettings::default_reset_on_startup")]
    pub reset_on_startup: bool,
}

impl DatabaseSettings {
    fn default_url() -> String {
        "mysql://root@127.0.0.1:3306/invsys".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_reset_on_startup() -> bool {
        true
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
            reset_on_startup: Self::default_reset_on_startup(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_port_is_5000() {
        assert_eq!(Settings::default().server.port, 5000);
    }

    #[test]
    fn unset_port_falls_back_to_5000() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_sources(dir.path(), "local", None).unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.cors_origin, "http://localhost:3000");
        assert!(settings.database.reset_on_startup);
    }

    #[test]
    fn blank_port_falls_back_to_configured_port() {
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::from_sources(dir.path(), "local", Some(String::new())).unwrap();
        assert_eq!(settings.server.port, 5000);

        write(dir.path(), "base.toml", "[server]\nport = 6000\n");
        let settings =
            Settings::from_sources(dir.path(), "local", Some("  ".to_string())).unwrap();
        assert_eq!(settings.server.port, 6000);
    }

    #[test]
    fn port_variable_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "base.toml", "[server]\nport = 6000\n");

        let settings =
            Settings::from_sources(dir.path(), "local", Some("5050".to_string())).unwrap();

        assert_eq!(settings.server.port, 5050);
    }

    #[test]
    fn environment_file_overlays_base() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "base.toml",
            "[server]\nport = 6000\n\n[database]\nurl = \"memory://\"\n",
        );
        write(dir.path(), "staging.toml", "[server]\nport = 7000\n");

        let settings = Settings::from_sources(dir.path(), "staging", None).unwrap();

        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.database.url, "memory://");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::from_sources(dir.path(), "local", Some("not-a-port".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_sources(dir.path(), "qa", None).unwrap_err();
        assert!(err.to_string().contains("unsupported environment 'qa'"));
    }
}
