// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event envelope and its builder.

use serde::Serialize;
use uuid::Uuid;

use crate::directive::{Directive, Scope};
use crate::discovery::DiscoveryEndpoint;

use super::ContextProperty;

/// Error categories understood by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// The directive is not supported or malformed, or the device refused it.
    InvalidDirective,
    /// The adapter cannot process the directive at all.
    InternalError,
    /// The device could not be reached.
    EndpointUnreachable,
    /// The addressed endpoint does not exist.
    NoSuchEndpoint,
}

/// A response event.
///
/// Serializes to `{"event": {...}, "context": {"properties": [...]}}`. The
/// `context` is omitted when no properties are reported.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    event: Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Context>,
}

#[derive(Debug, Clone, Serialize)]
struct Event {
    header: EventHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<EventEndpoint>,
    payload: Payload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventHeader {
    namespace: String,
    name: String,
    message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_token: Option<String>,
    payload_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope>,
    endpoint_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Payload {
    Error {
        #[serde(rename = "type")]
        kind: ErrorType,
        message: String,
    },
    Discovery {
        endpoints: Vec<DiscoveryEndpoint>,
    },
    Empty {},
}

#[derive(Debug, Clone, Serialize)]
struct Context {
    properties: Vec<ContextProperty>,
}

impl Envelope {
    /// Starts an envelope with the given header namespace and name.
    pub fn builder(namespace: impl Into<String>, name: impl Into<String>) -> EnvelopeBuilder {
        EnvelopeBuilder::new(namespace, name)
    }

    /// Returns the header namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.event.header.namespace
    }

    /// Returns the header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.event.header.name
    }

    /// Returns the message id.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.event.header.message_id
    }

    /// Returns the echoed correlation token.
    #[must_use]
    pub fn correlation_token(&self) -> Option<&str> {
        self.event.header.correlation_token.as_deref()
    }

    /// Returns the endpoint id the envelope is about.
    #[must_use]
    pub fn endpoint_id(&self) -> Option<&str> {
        self.event.endpoint.as_ref().map(|e| e.endpoint_id.as_str())
    }

    /// Returns the error type of an `ErrorResponse`.
    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        match &self.event.payload {
            Payload::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the reported context properties.
    #[must_use]
    pub fn properties(&self) -> &[ContextProperty] {
        self.context.as_ref().map_or(&[], |c| c.properties.as_slice())
    }

    /// Returns the discovered endpoints of a discovery answer.
    #[must_use]
    pub fn endpoints(&self) -> &[DiscoveryEndpoint] {
        match &self.event.payload {
            Payload::Discovery { endpoints } => endpoints,
            _ => &[],
        }
    }
}

/// Builder for [`Envelope`].
///
/// # Examples
///
/// ```
/// use hippo_alexa::response::{Envelope, ErrorType};
///
/// let envelope = Envelope::builder("Alexa", "ErrorResponse")
///     .correlation_token(Some("abc"))
///     .endpoint("desk", Some("token"))
///     .error(ErrorType::EndpointUnreachable, "daemon unreachable")
///     .build();
///
/// let json = serde_json::to_value(&envelope).unwrap();
/// assert_eq!(json["event"]["header"]["payloadVersion"], "3");
/// assert_eq!(json["event"]["payload"]["type"], "ENDPOINT_UNREACHABLE");
/// assert_eq!(json["event"]["endpoint"]["scope"]["type"], "BearerToken");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct EnvelopeBuilder {
    namespace: String,
    name: String,
    correlation_token: Option<String>,
    endpoint: Option<EventEndpoint>,
    payload: Payload,
    properties: Vec<ContextProperty>,
}

impl EnvelopeBuilder {
    fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            correlation_token: None,
            endpoint: None,
            payload: Payload::Empty {},
            properties: Vec::new(),
        }
    }

    /// Echoes routing metadata of `directive`: correlation token, endpoint
    /// id and scope.
    pub fn for_directive(mut self, directive: &Directive) -> Self {
        self.correlation_token = directive.header.correlation_token.clone();
        if let Some(endpoint) = &directive.endpoint {
            self.endpoint = Some(EventEndpoint {
                scope: endpoint.scope.clone(),
                endpoint_id: endpoint.endpoint_id.clone(),
            });
        }
        self
    }

    /// Sets the correlation token.
    pub fn correlation_token(mut self, token: Option<&str>) -> Self {
        self.correlation_token = token.map(str::to_string);
        self
    }

    /// Sets the endpoint and its bearer token scope.
    pub fn endpoint(mut self, endpoint_id: impl Into<String>, token: Option<&str>) -> Self {
        self.endpoint = Some(EventEndpoint {
            scope: token.map(Scope::bearer),
            endpoint_id: endpoint_id.into(),
        });
        self
    }

    /// Makes the payload an error description.
    pub fn error(mut self, kind: ErrorType, message: impl Into<String>) -> Self {
        self.payload = Payload::Error {
            kind,
            message: message.into(),
        };
        self
    }

    /// Makes the payload a discovery answer.
    pub fn discovered(mut self, endpoints: Vec<DiscoveryEndpoint>) -> Self {
        self.payload = Payload::Discovery { endpoints };
        self
    }

    /// Appends context properties.
    pub fn properties(mut self, properties: impl IntoIterator<Item = ContextProperty>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Builds the envelope with a fresh message id.
    #[must_use]
    pub fn build(self) -> Envelope {
        let context = if self.properties.is_empty() {
            None
        } else {
            Some(Context {
                properties: self.properties,
            })
        };

        Envelope {
            event: Event {
                header: EventHeader {
                    namespace: self.namespace,
                    name: self.name,
                    message_id: Uuid::new_v4().to_string(),
                    correlation_token: self.correlation_token,
                    payload_version: crate::directive::SUPPORTED_PAYLOAD_VERSION,
                },
                endpoint: self.endpoint,
                payload: self.payload,
            },
            context,
        }
    }
}
