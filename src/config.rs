// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TOML configuration.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0"
//! port = 8080
//!
//! [gateway]
//! host = "127.0.0.1"
//! port = 80
//! path_prefix = ""
//! timeout_ms = 5000
//!
//! [thermostat]
//! enabled = false
//! endpoint_id = "thermostat"
//! friendly_name = "Thermostat"
//!
//! [logging]
//! level = "info"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use crate::discovery::ThermostatEndpoint;
use crate::error::ConfigError;
use crate::gateway::GatewayConfig;

/// Adapter configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Inbound HTTP listener.
    pub server: ServerConfig,
    /// Device daemon connection.
    pub gateway: GatewaySettings,
    /// Synthesized thermostat endpoint.
    pub thermostat: ThermostatSettings,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Inbound HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on.
    pub listen: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen, self.port)
    }
}

/// Device daemon settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewaySettings {
    /// Daemon host name or address.
    pub host: String,
    /// Daemon port.
    pub port: u16,
    /// Path the daemon's web API is mounted under.
    pub path_prefix: String,
    /// Deadline for every daemon call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: GatewayConfig::DEFAULT_PORT,
            path_prefix: String::new(),
            timeout_ms: 5000,
        }
    }
}

impl GatewaySettings {
    /// Converts the settings into a client configuration.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.host.clone())
            .with_port(self.port)
            .with_path_prefix(self.path_prefix.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

/// Thermostat endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermostatSettings {
    /// Whether the thermostat endpoint is discovered and handled.
    pub enabled: bool,
    /// Endpoint id of the thermostat.
    pub endpoint_id: String,
    /// Display name of the thermostat.
    pub friendly_name: String,
}

impl Default for ThermostatSettings {
    fn default() -> Self {
        let endpoint = ThermostatEndpoint::default();
        Self {
            enabled: false,
            endpoint_id: endpoint.endpoint_id,
            friendly_name: endpoint.friendly_name,
        }
    }
}

impl ThermostatSettings {
    /// Returns the thermostat endpoint if enabled.
    #[must_use]
    pub fn endpoint(&self) -> Option<ThermostatEndpoint> {
        self.enabled.then(|| ThermostatEndpoint {
            endpoint_id: self.endpoint_id.clone(),
            friendly_name: self.friendly_name.clone(),
        })
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Maximum level logged.
    pub level: LogLevel,
}

/// Log verbosity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every span and event, including per-request traces.
    Trace,
    /// Directive handling details.
    Debug,
    /// Startup, discovery and shutdown.
    #[default]
    Info,
    /// Rejected requests and failed directives.
    Warn,
    /// Errors only.
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on syntax errors, unknown keys or wrong
    /// value types.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it is not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reads a configuration file, falling back to defaults when it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) for files that exist.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.timeout_ms, 5000);
        assert!(config.thermostat.endpoint().is_none());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn full_file() {
        let config = Config::from_toml_str(
            r#"
            [server]
            listen = "127.0.0.1"
            port = 9000

            [gateway]
            host = "hippo.local"
            port = 8081
            path_prefix = "/hippoledd"
            timeout_ms = 1500

            [thermostat]
            enabled = true
            endpoint_id = "heating"
            friendly_name = "Heating"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:9000");

        let gateway = config.gateway.gateway_config();
        assert_eq!(gateway.base_url(), "http://hippo.local:8081/hippoledd");
        assert_eq!(gateway.timeout(), Duration::from_millis(1500));

        let thermostat = config.thermostat.endpoint().unwrap();
        assert_eq!(thermostat.endpoint_id, "heating");
        assert_eq!(thermostat.friendly_name, "Heating");

        assert_eq!(LevelFilter::from(config.logging.level), LevelFilter::DEBUG);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::from_toml_str("[gateway]\nport = 8081\n").unwrap();
        assert_eq!(config.gateway.port, 8081);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("[gateway]\nhots = \"x\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn invalid_listen_address() {
        assert!(Config::from_toml_str("[server]\nlisten = \"not an ip\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file_or_default("/nonexistent/hippo-alexa.toml").unwrap();
        assert_eq!(config, Config::default());

        assert!(matches!(
            Config::from_file("/nonexistent/hippo-alexa.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
