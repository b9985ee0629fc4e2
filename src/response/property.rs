// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Context properties reported with responses and state reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::capabilities::{Capabilities, Interface};
use crate::state::{LampState, ThermostatState};
use crate::types::Temperature;

/// Uncertainty reported with every sampled property.
pub const UNCERTAINTY_MS: u64 = 1000;

/// One reported property of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextProperty {
    namespace: &'static str,
    name: &'static str,
    value: Value,
    time_of_sample: DateTime<Utc>,
    uncertainty_in_milliseconds: u64,
}

impl ContextProperty {
    /// Creates a property sampled now.
    #[must_use]
    pub fn new(interface: Interface, name: &'static str, value: Value) -> Self {
        Self {
            namespace: interface.namespace(),
            name,
            value,
            time_of_sample: Utc::now(),
            uncertainty_in_milliseconds: UNCERTAINTY_MS,
        }
    }

    /// Returns the interface namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.namespace
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the property value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns when the property was sampled.
    #[must_use]
    pub fn time_of_sample(&self) -> DateTime<Utc> {
        self.time_of_sample
    }
}

fn connectivity(online: bool) -> ContextProperty {
    let value = if online { "OK" } else { "UNREACHABLE" };
    ContextProperty::new(Interface::Health, "connectivity", json!({ "value": value }))
}

fn temperature(temperature: Temperature) -> Value {
    json!({ "value": temperature.value(), "scale": temperature.scale().as_str() })
}

/// Builds one property per interface the lamp's node type exposes.
///
/// # Examples
///
/// ```
/// use hippo_alexa::NodeType;
/// use hippo_alexa::response::lamp_properties;
/// use hippo_alexa::state::LampState;
/// use hippo_alexa::types::{PowerState, RgbColor};
///
/// let lamp = LampState::new("desk", PowerState::On, RgbColor::new(128, 0, 0), NodeType::Dimmable);
/// let names: Vec<_> = lamp_properties(&lamp).iter().map(|p| p.name().to_string()).collect();
/// assert_eq!(names, ["powerState", "connectivity", "brightness"]);
/// ```
#[must_use]
pub fn lamp_properties(lamp: &LampState) -> Vec<ContextProperty> {
    let hsv = lamp.hsv();
    lamp.capabilities()
        .interfaces()
        .into_iter()
        .filter_map(|interface| match interface {
            Interface::Power => Some(ContextProperty::new(
                interface,
                "powerState",
                json!(lamp.power().as_str()),
            )),
            Interface::Health => Some(connectivity(lamp.is_online())),
            Interface::Brightness => Some(ContextProperty::new(
                interface,
                "brightness",
                json!(hsv.brightness().value()),
            )),
            Interface::Color => Some(ContextProperty::new(
                interface,
                "color",
                json!({
                    "hue": hsv.hue(),
                    "saturation": hsv.saturation_fraction(),
                    "brightness": hsv.value_fraction(),
                }),
            )),
            Interface::Thermostat | Interface::TemperatureSensor => None,
        })
        .collect()
}

/// Builds the thermostat properties: setpoint, mode, room temperature and
/// connectivity.
#[must_use]
pub fn thermostat_properties(state: &ThermostatState) -> Vec<ContextProperty> {
    let mut properties = Vec::new();
    for interface in Capabilities::thermostat_interfaces() {
        match interface {
            Interface::Thermostat => {
                properties.push(ContextProperty::new(
                    interface,
                    "targetSetpoint",
                    temperature(state.target_temperature()),
                ));
                properties.push(ContextProperty::new(
                    interface,
                    "thermostatMode",
                    json!(state.mode()),
                ));
            }
            Interface::TemperatureSensor => properties.push(ContextProperty::new(
                interface,
                "temperature",
                temperature(state.room_temperature()),
            )),
            Interface::Health => properties.push(connectivity(state.is_online())),
            Interface::Power | Interface::Brightness | Interface::Color => {}
        }
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NodeType;
    use crate::types::{PowerState, RgbColor};

    fn find<'a>(properties: &'a [ContextProperty], name: &str) -> &'a ContextProperty {
        properties
            .iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| panic!("missing property {name}"))
    }

    #[test]
    fn rgb_lamp_reports_every_interface() {
        let lamp = LampState::new("desk", PowerState::On, RgbColor::new(0, 179, 0), NodeType::Rgb);
        let properties = lamp_properties(&lamp);

        let namespaces: Vec<_> = properties.iter().map(ContextProperty::namespace).collect();
        assert_eq!(
            namespaces,
            [
                "Alexa.PowerController",
                "Alexa.EndpointHealth",
                "Alexa.BrightnessController",
                "Alexa.ColorController"
            ]
        );

        assert_eq!(find(&properties, "powerState").value(), &json!("ON"));
        assert_eq!(find(&properties, "brightness").value(), &json!(70));

        let color = find(&properties, "color").value();
        assert!((color["hue"].as_f64().unwrap() - 120.0).abs() < 1e-9);
        assert!((color["saturation"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert!((color["brightness"].as_f64().unwrap() - 0.702).abs() < 1e-3);
    }

    #[test]
    fn switch_reports_power_and_health_only() {
        let lamp = LampState::new("plug", PowerState::Off, RgbColor::white(), NodeType::Switch);
        let properties = lamp_properties(&lamp);
        assert_eq!(properties.len(), 2);
        assert_eq!(find(&properties, "powerState").value(), &json!("OFF"));
    }

    #[test]
    fn offline_lamp_is_unreachable() {
        let lamp = LampState::new("desk", PowerState::On, RgbColor::white(), NodeType::Dimmable)
            .with_online(false);
        let properties = lamp_properties(&lamp);
        assert_eq!(
            find(&properties, "connectivity").value(),
            &json!({"value": "UNREACHABLE"})
        );
    }

    #[test]
    fn thermostat_reports_setpoint_mode_and_temperature() {
        let state = ThermostatState::new(19.5, 21.0, true);
        let properties = thermostat_properties(&state);

        assert_eq!(properties.len(), 4);
        assert_eq!(
            find(&properties, "targetSetpoint").value(),
            &json!({"value": 21.0, "scale": "CELSIUS"})
        );
        assert_eq!(find(&properties, "thermostatMode").value(), &json!("HEAT"));
        assert_eq!(
            find(&properties, "temperature").value(),
            &json!({"value": 19.5, "scale": "CELSIUS"})
        );
        assert_eq!(
            find(&properties, "connectivity").value(),
            &json!({"value": "OK"})
        );
    }

    #[test]
    fn property_serialization() {
        let property = ContextProperty::new(Interface::Power, "powerState", json!("ON"));
        let json = serde_json::to_value(&property).unwrap();

        assert_eq!(json["uncertaintyInMilliseconds"], 1000);
        let sampled = json["timeOfSample"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(sampled).is_ok());
    }
}
