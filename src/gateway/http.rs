// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the daemon client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::state::{LampState, StateChangeRequest, ThermostatState};

// ============================================================================
// GatewayConfig
// ============================================================================

/// Connection parameters for the device daemon.
///
/// # Examples
///
/// ```
/// use hippo_alexa::gateway::GatewayConfig;
/// use std::time::Duration;
///
/// let config = GatewayConfig::new("192.168.1.10")
///     .with_port(8080)
///     .with_path_prefix("/hippoledd")
///     .with_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.base_url(), "http://192.168.1.10:8080/hippoledd");
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    host: String,
    port: u16,
    path_prefix: String,
    timeout: Duration,
}

impl GatewayConfig {
    /// Default daemon port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default per-call deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the daemon at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            path_prefix: String::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a path the daemon's `/webapi` is mounted under.
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.path_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Sets the deadline applied to every call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the normalized path prefix (empty or starting with `/`).
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Returns the per-call deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self
            .host
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("http://{host}{port_suffix}{}", self.path_prefix)
    }

    /// Creates a [`GatewayClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<GatewayClient, GatewayError> {
        let base_url = self.base_url();
        GatewayClient::with_base_url(base_url, self.timeout)
    }
}

// ============================================================================
// GatewayClient
// ============================================================================

/// HTTP client for the device daemon.
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Examples
///
/// ```no_run
/// use hippo_alexa::gateway::GatewayConfig;
///
/// # async fn example() -> Result<(), hippo_alexa::GatewayError> {
/// let gateway = GatewayConfig::new("127.0.0.1").into_client()?;
/// let lamp = gateway.read_lamp("desk").await?;
/// println!("desk is at {}", lamp.brightness());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl GatewayClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:8080`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    /// Returns the base URL of the daemon.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-call deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reads the full state of one lamp.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unreachable`] or [`GatewayError::Timeout`] if the
    /// daemon cannot be reached, [`GatewayError::Status`] on a non-200 answer
    /// and [`GatewayError::Decode`] on a malformed body.
    pub async fn read_lamp(&self, endpoint_id: &str) -> Result<LampState, GatewayError> {
        self.get_json(&lamp_path("lamp", endpoint_id)).await
    }

    /// Writes the changed fields of one lamp.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`read_lamp`](Self::read_lamp).
    pub async fn write_lamp(
        &self,
        endpoint_id: &str,
        request: &StateChangeRequest,
    ) -> Result<(), GatewayError> {
        self.post_json(&lamp_path("lampstate", endpoint_id), request)
            .await
    }

    /// Lists every lamp the daemon knows.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`read_lamp`](Self::read_lamp).
    pub async fn list_lamps(&self) -> Result<Vec<LampState>, GatewayError> {
        self.get_json("/webapi/lamps").await
    }

    /// Reads the thermostat state.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`read_lamp`](Self::read_lamp).
    pub async fn read_thermostat(&self) -> Result<ThermostatState, GatewayError> {
        self.get_json("/webapi/state/").await
    }

    /// Sets the absolute target temperature in Celsius.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`read_lamp`](Self::read_lamp).
    pub async fn set_target_temperature(&self, celsius: f64) -> Result<(), GatewayError> {
        self.post_json(
            "/webapi/targettemp",
            &TargetTemperatureBody {
                target_temperature: celsius,
            },
        )
        .await
    }

    /// Moves the target temperature by `delta` Celsius degrees.
    ///
    /// The daemon does the arithmetic.
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`read_lamp`](Self::read_lamp).
    pub async fn adjust_target_temperature(&self, delta: f64) -> Result<(), GatewayError> {
        self.post_json("/webapi/tempdelta", &TemperatureDeltaBody { delta })
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET from daemon");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let body = self.checked_body(response).await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST to daemon");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        self.checked_body(response).await.map(|_| ())
    }

    async fn checked_body(&self, response: reqwest::Response) -> Result<String, GatewayError> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Daemon responded");

        if status != StatusCode::OK {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.send_error(&e))?;
        tracing::trace!(body = %body, "Daemon response body");
        Ok(body)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn send_error(&self, err: &reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout.as_millis() as u64)
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}

fn lamp_path(resource: &str, endpoint_id: &str) -> String {
    format!("/webapi/{resource}/{}", urlencoding::encode(endpoint_id))
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TargetTemperatureBody {
    target_temperature: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TemperatureDeltaBody {
    delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = GatewayConfig::new("127.0.0.1");
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 80);
        assert_eq!(config.path_prefix(), "");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn config_base_url() {
        assert_eq!(GatewayConfig::new("10.0.0.2").base_url(), "http://10.0.0.2");
        assert_eq!(
            GatewayConfig::new("10.0.0.2").with_port(8080).base_url(),
            "http://10.0.0.2:8080"
        );
        assert_eq!(
            GatewayConfig::new("http://10.0.0.2/").base_url(),
            "http://10.0.0.2"
        );
    }

    #[test]
    fn config_path_prefix_is_normalized() {
        let config = GatewayConfig::new("h").with_path_prefix("hippoledd/");
        assert_eq!(config.path_prefix(), "/hippoledd");

        let config = GatewayConfig::new("h").with_path_prefix("/");
        assert_eq!(config.path_prefix(), "");
    }

    #[test]
    fn config_into_client() {
        let client = GatewayConfig::new("127.0.0.1")
            .with_port(9000)
            .with_timeout(Duration::from_millis(250))
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(client.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn lamp_path_encodes_endpoint_id() {
        assert_eq!(lamp_path("lamp", "desk"), "/webapi/lamp/desk");
        assert_eq!(
            lamp_path("lampstate", "living room"),
            "/webapi/lampstate/living%20room"
        );
    }

    #[test]
    fn thermostat_bodies() {
        let body = serde_json::to_value(TargetTemperatureBody {
            target_temperature: 21.5,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"TargetTemperature": 21.5}));

        let body = serde_json::to_value(TemperatureDeltaBody { delta: -1.0 }).unwrap();
        assert_eq!(body, serde_json::json!({"Delta": -1.0}));
    }
}
