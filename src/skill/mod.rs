// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directive dispatcher.
//!
//! [`Skill`] classifies a directive, runs the matching handler against the
//! daemon and always answers with an [`Envelope`]. Failures never escape:
//! they are logged and turned into an `ErrorResponse` whose type comes from
//! [`Error::error_type`](crate::Error::error_type).

mod lamp;
mod thermostat;

use serde_json::Value;

use crate::capabilities::Interface;
use crate::directive::{Directive, DirectiveKind, classify};
use crate::discovery::{self, ThermostatEndpoint};
use crate::error::{DirectiveError, Error, Result};
use crate::gateway::GatewayClient;
use crate::response::{Envelope, lamp_properties, thermostat_properties};
use crate::state::{LampState, Transition, transition};

use thermostat::ThermostatChange;

/// Handles assistant directives against one device daemon.
///
/// # Examples
///
/// ```no_run
/// use hippo_alexa::Skill;
/// use hippo_alexa::gateway::GatewayConfig;
///
/// # async fn example() -> Result<(), hippo_alexa::GatewayError> {
/// let skill = Skill::new(GatewayConfig::new("127.0.0.1").into_client()?);
///
/// let event = serde_json::json!({"directive": {
///     "header": {"namespace": "Alexa.PowerController", "name": "TurnOn", "payloadVersion": "3"},
///     "endpoint": {"endpointId": "desk"},
///     "payload": {}
/// }});
/// let envelope = skill.handle_event(&event).await;
/// println!("{}", serde_json::to_string_pretty(&envelope).unwrap());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Skill {
    gateway: GatewayClient,
    thermostat: Option<ThermostatEndpoint>,
}

impl Skill {
    /// Creates a skill without a thermostat.
    #[must_use]
    pub fn new(gateway: GatewayClient) -> Self {
        Self {
            gateway,
            thermostat: None,
        }
    }

    /// Enables the thermostat endpoint.
    #[must_use]
    pub fn with_thermostat(mut self, thermostat: ThermostatEndpoint) -> Self {
        self.thermostat = Some(thermostat);
        self
    }

    /// Handles an assistant event (the object holding `directive`).
    pub async fn handle_event(&self, event: &Value) -> Envelope {
        match Directive::from_event(event) {
            Ok(directive) => self.handle(&directive).await,
            Err(err) => {
                let err = Error::from(err);
                tracing::warn!(error = %err, "Rejected event");
                Envelope::builder("Alexa", "ErrorResponse")
                    .error(err.error_type(), err.to_string())
                    .build()
            }
        }
    }

    /// Handles one directive.
    #[tracing::instrument(
        skip_all,
        fields(
            namespace = %directive.header.namespace,
            name = %directive.header.name,
            endpoint = directive.endpoint_id().unwrap_or("-"),
        )
    )]
    pub async fn handle(&self, directive: &Directive) -> Envelope {
        match self.dispatch(directive).await {
            Ok(envelope) => {
                tracing::debug!(response = envelope.name(), "Directive handled");
                envelope
            }
            Err(err) => {
                tracing::warn!(error = %err, "Directive failed");
                Envelope::builder("Alexa", "ErrorResponse")
                    .for_directive(directive)
                    .error(err.error_type(), err.to_string())
                    .build()
            }
        }
    }

    async fn dispatch(&self, directive: &Directive) -> Result<Envelope> {
        match classify(directive)? {
            DirectiveKind::AcceptGrant => {
                Ok(Envelope::builder("Alexa.Authorization", "AcceptGrant.Response").build())
            }
            DirectiveKind::Discovery => {
                let endpoints = discovery::discover(&self.gateway, self.thermostat.as_ref()).await?;
                tracing::info!(count = endpoints.len(), "Discovered endpoints");
                Ok(Envelope::builder("Alexa.Discovery", "Discover.Response")
                    .discovered(endpoints)
                    .build())
            }
            DirectiveKind::ReportState => self.report_state(directive).await,
            DirectiveKind::Power(power) => {
                self.change_lamp(directive, Interface::Power, |lamp| {
                    transition::power(lamp, power)
                })
                .await
            }
            DirectiveKind::Brightness(change) => {
                self.change_lamp(directive, Interface::Brightness, |lamp| {
                    transition::brightness(lamp, change)
                })
                .await
            }
            DirectiveKind::Color(color) => {
                self.change_lamp(directive, Interface::Color, |lamp| {
                    transition::color(lamp, color)
                })
                .await
            }
            DirectiveKind::SetTargetTemperature(target) => {
                self.change_thermostat(directive, ThermostatChange::Set(target))
                    .await
            }
            DirectiveKind::AdjustTargetTemperature(delta) => {
                self.change_thermostat(directive, ThermostatChange::Adjust(delta))
                    .await
            }
        }
    }

    async fn report_state(&self, directive: &Directive) -> Result<Envelope> {
        let endpoint_id = directive.require_endpoint_id()?;
        let properties = if self.is_thermostat(endpoint_id) {
            thermostat_properties(&self.gateway.read_thermostat().await?)
        } else {
            lamp_properties(&self.gateway.read_lamp(endpoint_id).await?)
        };

        Ok(Envelope::builder("Alexa", "StateReport")
            .for_directive(directive)
            .properties(properties)
            .build())
    }

    async fn change_lamp<F>(
        &self,
        directive: &Directive,
        interface: Interface,
        compute: F,
    ) -> Result<Envelope>
    where
        F: FnOnce(&LampState) -> Transition,
    {
        let endpoint_id = directive.require_endpoint_id()?;
        let next = lamp::change(&self.gateway, endpoint_id, interface, compute).await?;

        Ok(Envelope::builder("Alexa", "Response")
            .for_directive(directive)
            .properties(lamp_properties(&next))
            .build())
    }

    async fn change_thermostat(
        &self,
        directive: &Directive,
        change: ThermostatChange,
    ) -> Result<Envelope> {
        let endpoint_id = directive.require_endpoint_id()?;
        match &self.thermostat {
            None => return Err(DirectiveError::ThermostatNotConfigured.into()),
            Some(thermostat) if thermostat.endpoint_id != endpoint_id => {
                return Err(DirectiveError::UnknownThermostat(endpoint_id.to_string()).into());
            }
            Some(_) => {}
        }

        let state = thermostat::change(&self.gateway, change).await?;
        Ok(Envelope::builder("Alexa", "Response")
            .for_directive(directive)
            .properties(thermostat_properties(&state))
            .build())
    }

    fn is_thermostat(&self, endpoint_id: &str) -> bool {
        self.thermostat
            .as_ref()
            .is_some_and(|t| t.endpoint_id == endpoint_id)
    }
}
