// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound requests and assistant directives.
//!
//! An inbound HTTP body wraps the assistant event together with the bearer
//! token of the caller:
//!
//! ```json
//! {
//!   "header": {"token": "..."},
//!   "payload": {
//!     "directive": {
//!       "header": {"namespace": "Alexa.PowerController", "name": "TurnOn",
//!                  "payloadVersion": "3", "messageId": "...", "correlationToken": "..."},
//!       "endpoint": {"endpointId": "desk", "scope": {"type": "BearerToken", "token": "..."}},
//!       "payload": {}
//!     }
//!   }
//! }
//! ```
//!
//! [`Request::from_http`] performs the transport-level checks, and
//! [`classify`] turns a [`Directive`] into a [`DirectiveKind`].

mod classifier;

pub use classifier::{DirectiveKind, SUPPORTED_PAYLOAD_VERSION, classify};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DirectiveError, ValidationError};

/// A validated inbound request.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Request header with the caller's token.
    #[serde(default)]
    pub header: Option<RequestHeader>,
    /// The assistant event, expected to hold a `directive`.
    #[serde(default)]
    pub payload: Value,
}

/// Header of an inbound request.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestHeader {
    /// Bearer token of the caller.
    #[serde(default)]
    pub token: Option<String>,
}

impl Request {
    /// Validates and parses an inbound HTTP body.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ContentType`] if `content_type` is missing or
    ///   not `application/json`
    /// - [`ValidationError::MalformedBody`] if the body is not a JSON object
    /// - [`ValidationError::MissingToken`] if `header.token` is absent or empty
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_alexa::directive::Request;
    /// use hippo_alexa::ValidationError;
    ///
    /// let body = br#"{"header": {"token": "abc"}, "payload": {}}"#;
    /// assert!(Request::from_http(Some("application/json"), body).is_ok());
    /// assert_eq!(
    ///     Request::from_http(None, body).unwrap_err(),
    ///     ValidationError::ContentType
    /// );
    /// ```
    pub fn from_http(content_type: Option<&str>, body: &[u8]) -> Result<Self, ValidationError> {
        let is_json = content_type.is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        });
        if !is_json {
            return Err(ValidationError::ContentType);
        }

        let request: Self = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

        if request.token().is_none() {
            return Err(ValidationError::MissingToken);
        }

        Ok(request)
    }

    /// Returns the caller's token, if present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.header
            .as_ref()
            .and_then(|header| header.token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// An assistant directive.
#[derive(Debug, Clone, Deserialize)]
pub struct Directive {
    /// Routing header.
    pub header: DirectiveHeader,
    /// Target endpoint, absent for discovery and authorization.
    #[serde(default)]
    pub endpoint: Option<DirectiveEndpoint>,
    /// Operation-specific payload.
    #[serde(default)]
    pub payload: Value,
}

/// Header of a directive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveHeader {
    /// Capability family, e.g. `Alexa.BrightnessController`.
    pub namespace: String,
    /// Operation, e.g. `AdjustBrightness`.
    pub name: String,
    /// Protocol version of the payload.
    #[serde(default)]
    pub payload_version: String,
    /// Message id of the directive.
    #[serde(default)]
    pub message_id: Option<String>,
    /// Opaque id echoed back in the response.
    #[serde(default)]
    pub correlation_token: Option<String>,
}

/// Endpoint addressed by a directive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveEndpoint {
    /// Device identifier.
    pub endpoint_id: String,
    /// Authorization scope.
    #[serde(default)]
    pub scope: Option<Scope>,
}

/// Bearer token scope, shared by directives and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope type, normally `BearerToken`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The token.
    pub token: String,
}

impl Scope {
    /// Creates a bearer token scope.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            kind: "BearerToken".to_string(),
            token: token.into(),
        }
    }
}

impl Directive {
    /// Extracts the directive from an assistant event.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingDirective`] if the event has no
    /// `directive` key and [`DirectiveError::InvalidPayload`] if the directive
    /// lacks its header fields.
    pub fn from_event(event: &Value) -> Result<Self, DirectiveError> {
        let directive = event
            .get("directive")
            .ok_or(DirectiveError::MissingDirective)?;
        Self::deserialize(directive).map_err(|e| DirectiveError::InvalidPayload(e.to_string()))
    }

    /// Returns the addressed endpoint id.
    #[must_use]
    pub fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_ref().map(|e| e.endpoint_id.as_str())
    }

    /// Returns the addressed endpoint id or fails for directives that need one.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingEndpoint`] if no endpoint is present.
    pub fn require_endpoint_id(&self) -> Result<&str, DirectiveError> {
        self.endpoint_id()
            .ok_or_else(|| DirectiveError::MissingEndpoint(self.header.name.clone()))
    }

    /// Returns the endpoint scope token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.endpoint
            .as_ref()
            .and_then(|e| e.scope.as_ref())
            .map(|scope| scope.token.as_str())
    }

    /// Returns the correlation token.
    #[must_use]
    pub fn correlation_token(&self) -> Option<&str> {
        self.header.correlation_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"header": {"token": "secret"}, "payload": {"directive": {}}}"#;

    #[test]
    fn accepts_json_with_charset() {
        let request = Request::from_http(Some("application/json; charset=utf-8"), BODY).unwrap();
        assert_eq!(request.token(), Some("secret"));
    }

    #[test]
    fn rejects_missing_or_wrong_content_type() {
        assert_eq!(
            Request::from_http(None, BODY).unwrap_err(),
            ValidationError::ContentType
        );
        assert_eq!(
            Request::from_http(Some("text/plain"), BODY).unwrap_err(),
            ValidationError::ContentType
        );
    }

    #[test]
    fn rejects_malformed_body() {
        let err = Request::from_http(Some("application/json"), b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedBody(_)));

        let err = Request::from_http(Some("application/json"), b"[1, 2]").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedBody(_)));
    }

    #[test]
    fn rejects_missing_token() {
        for body in [
            br#"{"payload": {}}"#.as_slice(),
            br#"{"header": {}, "payload": {}}"#.as_slice(),
            br#"{"header": {"token": ""}, "payload": {}}"#.as_slice(),
        ] {
            assert_eq!(
                Request::from_http(Some("application/json"), body).unwrap_err(),
                ValidationError::MissingToken
            );
        }
    }

    #[test]
    fn directive_from_event() {
        let event = serde_json::json!({
            "directive": {
                "header": {
                    "namespace": "Alexa.PowerController",
                    "name": "TurnOn",
                    "payloadVersion": "3",
                    "messageId": "m-1",
                    "correlationToken": "c-1"
                },
                "endpoint": {
                    "endpointId": "desk",
                    "scope": {"type": "BearerToken", "token": "t-1"}
                },
                "payload": {}
            }
        });

        let directive = Directive::from_event(&event).unwrap();
        assert_eq!(directive.endpoint_id(), Some("desk"));
        assert_eq!(directive.token(), Some("t-1"));
        assert_eq!(directive.correlation_token(), Some("c-1"));
        assert_eq!(directive.header.payload_version, "3");
    }

    #[test]
    fn event_without_directive() {
        let event = serde_json::json!({"something": {}});
        assert_eq!(
            Directive::from_event(&event).unwrap_err(),
            DirectiveError::MissingDirective
        );
    }

    #[test]
    fn directive_without_header_is_invalid() {
        let event = serde_json::json!({"directive": {"payload": {}}});
        assert!(matches!(
            Directive::from_event(&event),
            Err(DirectiveError::InvalidPayload(_))
        ));
    }

    #[test]
    fn require_endpoint_names_operation() {
        let event = serde_json::json!({
            "directive": {"header": {"namespace": "Alexa", "name": "ReportState"}}
        });
        let directive = Directive::from_event(&event).unwrap();
        assert_eq!(
            directive.require_endpoint_id().unwrap_err(),
            DirectiveError::MissingEndpoint("ReportState".into())
        );
    }
}
