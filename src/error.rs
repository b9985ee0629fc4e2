// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the adapter.
//!
//! Every failure that can happen while a directive is processed ends up as an
//! [`Error`]. The directive dispatcher never lets one escape: it converts the
//! error into an assistant-visible `ErrorResponse` using
//! [`Error::error_type`]. Transport-level problems are reported separately as
//! [`ValidationError`] before any directive processing starts.

use thiserror::Error;

use crate::response::ErrorType;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The directive could not be classified or its payload is malformed.
    #[error("{0}")]
    Directive(#[from] DirectiveError),

    /// The device daemon could not be reached or answered with an error.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl Error {
    /// Returns the assistant error type reported for this failure.
    ///
    /// Connection failures and timeouts are reported as
    /// `ENDPOINT_UNREACHABLE`: the directive itself was fine, the device
    /// was not. A non-200 answer or an unreadable body from the daemon stays
    /// `INVALID_DIRECTIVE`.
    #[must_use]
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::Directive(DirectiveError::UnsupportedVersion(_)) => ErrorType::InternalError,
            Self::Directive(
                DirectiveError::ThermostatNotConfigured | DirectiveError::UnknownThermostat(_),
            ) => ErrorType::NoSuchEndpoint,
            Self::Gateway(GatewayError::Unreachable(_) | GatewayError::Timeout(_)) => {
                ErrorType::EndpointUnreachable
            }
            Self::Value(_) | Self::Directive(_) | Self::Gateway(_) => ErrorType::InvalidDirective,
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A hue value is outside the valid range [0, 360).
    #[error("hue value {0} is out of range [0, 360)")]
    InvalidHue(f64),

    /// A saturation value is outside the valid range [0, 100].
    #[error("saturation value {0} is out of range [0, 100]")]
    InvalidSaturation(f64),

    /// A brightness (HSV value) is outside the valid range [0, 100].
    #[error("brightness value {0} is out of range [0, 100]")]
    InvalidBrightness(f64),
}

/// Errors raised while classifying a directive or reading its payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// The request payload does not contain a directive at all.
    #[error("Missing key: directive, Is request a valid Alexa directive?")]
    MissingDirective,

    /// The directive uses a payload version other than "3".
    #[error("unsupported payload version {0:?}, only Smart Home API version 3 is supported")]
    UnsupportedVersion(String),

    /// The namespace is not one this adapter handles.
    #[error("unsupported namespace: {0}")]
    UnknownNamespace(String),

    /// The namespace is known but the operation name is not.
    #[error("unsupported operation {name} in namespace {namespace}")]
    UnknownOperation {
        /// Namespace of the directive.
        namespace: String,
        /// Operation name of the directive.
        name: String,
    },

    /// A directive that targets a device carries no endpoint.
    #[error("directive {0} requires an endpoint")]
    MissingEndpoint(String),

    /// The operation payload is missing a field or has the wrong shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The addressed lamp's node type lacks the interface the directive uses.
    #[error("endpoint {endpoint} does not support {interface}")]
    UnsupportedInterface {
        /// Endpoint id of the lamp.
        endpoint: String,
        /// Namespace of the interface.
        interface: String,
    },

    /// A thermostat directive arrived but no thermostat is configured.
    #[error("no thermostat endpoint is configured")]
    ThermostatNotConfigured,

    /// A thermostat directive addresses an endpoint other than the
    /// configured thermostat.
    #[error("endpoint {0} is not a thermostat")]
    UnknownThermostat(String),
}

/// Errors raised by the device daemon client.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connecting to or talking with the daemon failed.
    #[error("daemon unreachable: {0}")]
    Unreachable(String),

    /// The daemon did not answer before the deadline.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The daemon answered with a non-200 status code.
    #[error("daemon responded with HTTP {0}")]
    Status(u16),

    /// The daemon answered with a body that is not the expected JSON.
    #[error("malformed daemon response: {0}")]
    Decode(String),
}

/// Transport-level rejections of an inbound request.
///
/// These are answered with an HTTP error status and no envelope; no
/// directive processing and no gateway call happens for them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The `Content-Type` header is missing or not JSON.
    #[error("expected Content-Type: application/json")]
    ContentType,

    /// The body is not valid JSON or lacks the request structure.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The request header carries no bearer token.
    #[error("missing token")]
    MissingToken,
}

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for the configuration schema.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidSaturation(150.0);
        assert_eq!(err.to_string(), "saturation value 150 is out of range [0, 100]");
    }

    #[test]
    fn unknown_namespace_carries_namespace() {
        let err: Error = DirectiveError::UnknownNamespace("Alexa.LockController".into()).into();
        assert!(err.to_string().contains("Alexa.LockController"));
        assert_eq!(err.error_type(), ErrorType::InvalidDirective);
    }

    #[test]
    fn unsupported_version_is_internal_error() {
        let err: Error = DirectiveError::UnsupportedVersion("2".into()).into();
        assert_eq!(err.error_type(), ErrorType::InternalError);
        assert!(err.to_string().contains("version 3"));
    }

    #[test]
    fn unreachable_gateway_maps_to_endpoint_unreachable() {
        let err: Error = GatewayError::Unreachable("connection refused".into()).into();
        assert_eq!(err.error_type(), ErrorType::EndpointUnreachable);

        let err: Error = GatewayError::Timeout(5000).into();
        assert_eq!(err.error_type(), ErrorType::EndpointUnreachable);
    }

    #[test]
    fn gateway_status_maps_to_invalid_directive() {
        let err: Error = GatewayError::Status(500).into();
        assert_eq!(err.error_type(), ErrorType::InvalidDirective);
        assert_eq!(err.to_string(), "gateway error: daemon responded with HTTP 500");
    }

    #[test]
    fn missing_thermostat_maps_to_no_such_endpoint() {
        let err: Error = DirectiveError::ThermostatNotConfigured.into();
        assert_eq!(err.error_type(), ErrorType::NoSuchEndpoint);
    }

    #[test]
    fn unknown_thermostat_names_the_endpoint() {
        let err: Error = DirectiveError::UnknownThermostat("desk".into()).into();
        assert_eq!(err.error_type(), ErrorType::NoSuchEndpoint);
        assert_eq!(err.to_string(), "endpoint desk is not a thermostat");
    }
}
