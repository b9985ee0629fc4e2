// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state as reported by the daemon.

use serde::Deserialize;

use crate::capabilities::{Capabilities, NodeType};
use crate::types::{Brightness, HsvColor, PowerState, RgbColor, Temperature};

use super::StateChangeRequest;

/// State of one lamp.
///
/// Values are immutable: applying a change returns a new state.
///
/// The daemon answers `GET /webapi/lamp/{id}` with:
///
/// ```json
/// {"Name": "desk", "On": true, "R": 255, "G": 0, "B": 0, "NodeType": 3, "Online": true}
/// ```
///
/// `Name`, `NodeType` and `Online` are optional; a missing node type is
/// treated as the legacy RGB type and a missing online flag as online.
///
/// # Examples
///
/// ```
/// use hippo_alexa::NodeType;
/// use hippo_alexa::state::LampState;
///
/// let json = r#"{"Name": "desk", "On": true, "R": 255, "G": 0, "B": 0, "NodeType": 0}"#;
/// let lamp: LampState = serde_json::from_str(json).unwrap();
/// assert_eq!(lamp.node_type(), NodeType::Rgb);
/// assert_eq!(lamp.brightness().value(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "LampWire")]
pub struct LampState {
    name: String,
    power: PowerState,
    color: RgbColor,
    node_type: NodeType,
    online: bool,
}

impl LampState {
    /// Creates an online lamp state.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        power: PowerState,
        color: RgbColor,
        node_type: NodeType,
    ) -> Self {
        Self {
            name: name.into(),
            power,
            color,
            node_type,
            online: true,
        }
    }

    /// Returns the same state with another reachability flag.
    #[must_use]
    pub fn with_online(self, online: bool) -> Self {
        Self { online, ..self }
    }

    /// Returns the lamp name, which doubles as its endpoint id.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the stored RGB color.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns whether the daemon can reach the lamp.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Returns the capabilities derived from the node type.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::for_node_type(self.node_type)
    }

    /// Returns the stored color in HSV.
    #[must_use]
    pub fn hsv(&self) -> HsvColor {
        self.color.to_hsv()
    }

    /// Returns the brightness implied by the stored color.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.hsv().brightness()
    }

    /// Returns the state that results from writing `request`.
    #[must_use]
    pub fn apply(&self, request: &StateChangeRequest) -> Self {
        Self {
            power: request.power().unwrap_or(self.power),
            color: request.color().unwrap_or(self.color),
            ..self.clone()
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LampWire {
    #[serde(default)]
    name: String,
    on: bool,
    r: u8,
    g: u8,
    b: u8,
    #[serde(default = "legacy_node_type")]
    node_type: NodeType,
    #[serde(default = "online_by_default")]
    online: bool,
}

fn legacy_node_type() -> NodeType {
    NodeType::from_raw(0)
}

fn online_by_default() -> bool {
    true
}

impl From<LampWire> for LampState {
    fn from(wire: LampWire) -> Self {
        Self {
            name: wire.name,
            power: PowerState::from(wire.on),
            color: RgbColor::new(wire.r, wire.g, wire.b),
            node_type: wire.node_type,
            online: wire.online,
        }
    }
}

/// State of the thermostat.
///
/// The daemon answers `GET /webapi/state/` with:
///
/// ```json
/// {"RoomTemperature": 19.5, "TargetTemperature": 21.0, "HeatingOn": true, "Online": true}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermostatState {
    room_temperature: f64,
    target_temperature: f64,
    heating_on: bool,
    #[serde(default = "online_by_default")]
    online: bool,
}

impl ThermostatState {
    /// Creates an online thermostat state.
    #[must_use]
    pub const fn new(room_temperature: f64, target_temperature: f64, heating_on: bool) -> Self {
        Self {
            room_temperature,
            target_temperature,
            heating_on,
            online: true,
        }
    }

    /// Returns the measured room temperature.
    #[must_use]
    pub const fn room_temperature(&self) -> Temperature {
        Temperature::celsius(self.room_temperature)
    }

    /// Returns the target temperature.
    #[must_use]
    pub const fn target_temperature(&self) -> Temperature {
        Temperature::celsius(self.target_temperature)
    }

    /// Returns `true` while the heating is running.
    #[must_use]
    pub const fn is_heating(&self) -> bool {
        self.heating_on
    }

    /// Returns whether the daemon can reach the thermostat.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Returns the assistant thermostat mode.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        if self.heating_on { "HEAT" } else { "OFF" }
    }
}
