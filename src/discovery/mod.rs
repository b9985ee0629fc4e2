// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint discovery.
//!
//! Discovery lists every lamp the daemon knows and describes each one as an
//! assistant endpoint. The advertised capabilities follow the node type
//! mapping in [`Capabilities`]. When a thermostat is configured, one extra
//! endpoint describing it is appended.
//!
//! Discovery only reads from the daemon.
//!
//! # Examples
//!
//! ```no_run
//! use hippo_alexa::discovery::{self, ThermostatEndpoint};
//! use hippo_alexa::gateway::GatewayConfig;
//!
//! # async fn example() -> Result<(), hippo_alexa::GatewayError> {
//! let gateway = GatewayConfig::new("127.0.0.1").into_client()?;
//! let thermostat = ThermostatEndpoint::default();
//!
//! let endpoints = discovery::discover(&gateway, Some(&thermostat)).await?;
//! for endpoint in &endpoints {
//!     println!("{}: {:?}", endpoint.endpoint_id(), endpoint.interfaces());
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::{Value, json};

use crate::capabilities::{Capabilities, Interface};
use crate::error::GatewayError;
use crate::gateway::GatewayClient;
use crate::state::LampState;

/// Manufacturer reported for every endpoint.
pub const MANUFACTURER: &str = "HippoTronics";

/// Identity of the synthesized thermostat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermostatEndpoint {
    /// Endpoint id the assistant addresses the thermostat with.
    pub endpoint_id: String,
    /// Name shown to the user.
    pub friendly_name: String,
}

impl Default for ThermostatEndpoint {
    fn default() -> Self {
        Self {
            endpoint_id: "thermostat".to_string(),
            friendly_name: "Thermostat".to_string(),
        }
    }
}

/// One discovered endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryEndpoint {
    endpoint_id: String,
    manufacturer_name: &'static str,
    friendly_name: String,
    description: String,
    display_categories: Vec<&'static str>,
    capabilities: Vec<CapabilityDescriptor>,
}

/// One advertised capability interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityDescriptor {
    #[serde(rename = "type")]
    kind: &'static str,
    interface: &'static str,
    version: &'static str,
    properties: CapabilityProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    configuration: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct CapabilityProperties {
    supported: Vec<SupportedProperty>,
    proactively_reported: bool,
    retrievable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SupportedProperty {
    name: &'static str,
}

impl CapabilityDescriptor {
    fn new(interface: Interface) -> Self {
        let configuration = match interface {
            Interface::Thermostat => Some(json!({
                "supportedModes": ["HEAT", "OFF"],
                "supportsScheduling": false,
            })),
            _ => None,
        };

        Self {
            kind: "AlexaInterface",
            interface: interface.namespace(),
            version: "3",
            properties: CapabilityProperties {
                supported: interface
                    .supported_properties()
                    .iter()
                    .map(|&name| SupportedProperty { name })
                    .collect(),
                proactively_reported: false,
                retrievable: true,
            },
            configuration,
        }
    }

    /// Returns the interface namespace.
    #[must_use]
    pub fn interface(&self) -> &str {
        self.interface
    }
}

impl DiscoveryEndpoint {
    /// Describes a lamp.
    #[must_use]
    pub fn lamp(lamp: &LampState) -> Self {
        let node_type = lamp.node_type();
        Self {
            endpoint_id: lamp.name().to_string(),
            manufacturer_name: MANUFACTURER,
            friendly_name: lamp.name().to_string(),
            description: node_type.description().to_string(),
            display_categories: vec![node_type.display_category()],
            capabilities: Capabilities::for_node_type(node_type)
                .interfaces()
                .into_iter()
                .map(CapabilityDescriptor::new)
                .collect(),
        }
    }

    /// Describes the thermostat.
    #[must_use]
    pub fn thermostat(thermostat: &ThermostatEndpoint) -> Self {
        Self {
            endpoint_id: thermostat.endpoint_id.clone(),
            manufacturer_name: MANUFACTURER,
            friendly_name: thermostat.friendly_name.clone(),
            description: "Thermostat".to_string(),
            display_categories: vec!["THERMOSTAT"],
            capabilities: Capabilities::thermostat_interfaces()
                .into_iter()
                .map(CapabilityDescriptor::new)
                .collect(),
        }
    }

    /// Returns the endpoint id.
    #[must_use]
    pub fn endpoint_id(&self) -> &str {
        &self.endpoint_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    /// Returns the display categories.
    #[must_use]
    pub fn display_categories(&self) -> &[&'static str] {
        &self.display_categories
    }

    /// Returns the advertised interface namespaces, in order.
    #[must_use]
    pub fn interfaces(&self) -> Vec<&str> {
        self.capabilities
            .iter()
            .map(CapabilityDescriptor::interface)
            .collect()
    }
}

/// Lists all endpoints.
///
/// # Errors
///
/// Returns the gateway error if the lamp list cannot be read.
pub async fn discover(
    gateway: &GatewayClient,
    thermostat: Option<&ThermostatEndpoint>,
) -> Result<Vec<DiscoveryEndpoint>, GatewayError> {
    let lamps = gateway.list_lamps().await?;
    tracing::debug!(count = lamps.len(), "Lamps listed by daemon");

    let mut endpoints: Vec<_> = lamps.iter().map(DiscoveryEndpoint::lamp).collect();
    if let Some(thermostat) = thermostat {
        endpoints.push(DiscoveryEndpoint::thermostat(thermostat));
    }

    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NodeType;
    use crate::types::{PowerState, RgbColor};

    fn lamp(name: &str, node_type: NodeType) -> LampState {
        LampState::new(name, PowerState::On, RgbColor::white(), node_type)
    }

    #[test]
    fn dimmable_lamp_endpoint() {
        let endpoint = DiscoveryEndpoint::lamp(&lamp("desk", NodeType::Dimmable));

        assert_eq!(endpoint.endpoint_id(), "desk");
        assert_eq!(endpoint.friendly_name(), "desk");
        assert_eq!(endpoint.display_categories(), ["LIGHT"]);
        assert_eq!(
            endpoint.interfaces(),
            [
                "Alexa.PowerController",
                "Alexa.EndpointHealth",
                "Alexa.BrightnessController"
            ]
        );
    }

    #[test]
    fn legacy_node_types_discover_as_rgb() {
        let rgb = DiscoveryEndpoint::lamp(&lamp("a", NodeType::from_raw(3)));
        for raw in [0, 6] {
            let legacy = DiscoveryEndpoint::lamp(&lamp("a", NodeType::from_raw(raw)));
            assert_eq!(legacy.interfaces(), rgb.interfaces());
        }
    }

    #[test]
    fn switch_endpoint() {
        let endpoint = DiscoveryEndpoint::lamp(&lamp("plug", NodeType::Switch));
        assert_eq!(endpoint.display_categories(), ["SWITCH"]);
        assert_eq!(
            endpoint.interfaces(),
            ["Alexa.PowerController", "Alexa.EndpointHealth"]
        );
    }

    #[test]
    fn thermostat_endpoint() {
        let endpoint = DiscoveryEndpoint::thermostat(&ThermostatEndpoint::default());
        let json = serde_json::to_value(&endpoint).unwrap();

        assert_eq!(json["endpointId"], "thermostat");
        assert_eq!(json["displayCategories"], json!(["THERMOSTAT"]));
        assert_eq!(
            json["capabilities"][0]["properties"]["supported"],
            json!([{"name": "targetSetpoint"}, {"name": "thermostatMode"}])
        );
        assert_eq!(
            json["capabilities"][0]["configuration"]["supportedModes"],
            json!(["HEAT", "OFF"])
        );
    }

    #[test]
    fn descriptor_serialization() {
        let endpoint = DiscoveryEndpoint::lamp(&lamp("desk", NodeType::Rgb));
        let json = serde_json::to_value(&endpoint).unwrap();

        assert_eq!(json["manufacturerName"], MANUFACTURER);
        assert_eq!(json["description"], "Lamp with color and brightness control");
        for capability in json["capabilities"].as_array().unwrap() {
            assert_eq!(capability["type"], "AlexaInterface");
            assert_eq!(capability["version"], "3");
            assert_eq!(capability["properties"]["retrievable"], true);
            assert_eq!(capability["properties"]["proactivelyReported"], false);
            assert!(capability.get("configuration").is_none());
        }
    }
}
