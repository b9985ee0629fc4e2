// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capabilities derived from the daemon's node type.
//!
//! The daemon classifies every lamp with a numeric node type. That number
//! alone decides which assistant interfaces a lamp advertises during
//! discovery and which context properties are reported for it afterwards,
//! so both paths go through [`Capabilities::for_node_type`].
//!
//! # Mapping
//!
//! | Raw node type | Class           | Brightness | Color |
//! |---------------|-----------------|------------|-------|
//! | 1             | Dimmable        | yes        | no    |
//! | 2             | Color dimmable  | yes        | no    |
//! | 3             | RGB             | yes        | yes   |
//! | 4             | Switch          | no         | no    |
//! | 0, > 4, < 0   | RGB (legacy)    | yes        | yes   |

use serde::Deserialize;

/// Device class reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum NodeType {
    /// Lamp with brightness control only.
    Dimmable,
    /// Lamp with color temperature and brightness control.
    ColorDimmable,
    /// Lamp with full RGB color control.
    Rgb,
    /// Plain on/off switch.
    Switch,
}

impl NodeType {
    /// Maps the daemon's raw node type.
    ///
    /// Type 0 and anything outside 1-4 is treated as RGB; older daemons
    /// reported every RGB lamp as type 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_alexa::NodeType;
    ///
    /// assert_eq!(NodeType::from_raw(1), NodeType::Dimmable);
    /// assert_eq!(NodeType::from_raw(0), NodeType::Rgb);
    /// assert_eq!(NodeType::from_raw(6), NodeType::Rgb);
    /// ```
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            1 => Self::Dimmable,
            2 => Self::ColorDimmable,
            4 => Self::Switch,
            _ => Self::Rgb,
        }
    }

    /// Returns the canonical raw value of this node type.
    #[must_use]
    pub const fn as_raw(&self) -> i64 {
        match self {
            Self::Dimmable => 1,
            Self::ColorDimmable => 2,
            Self::Rgb => 3,
            Self::Switch => 4,
        }
    }

    /// Returns a human-readable description for discovery.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Dimmable | Self::ColorDimmable => "Lamp with brightness control",
            Self::Rgb => "Lamp with color and brightness control",
            Self::Switch => "Switch",
        }
    }

    /// Returns the assistant display category.
    #[must_use]
    pub const fn display_category(&self) -> &'static str {
        match self {
            Self::Switch => "SWITCH",
            Self::Dimmable | Self::ColorDimmable | Self::Rgb => "LIGHT",
        }
    }
}

impl From<i64> for NodeType {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

/// An assistant interface an endpoint can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    /// `Alexa.PowerController`.
    Power,
    /// `Alexa.EndpointHealth`.
    Health,
    /// `Alexa.BrightnessController`.
    Brightness,
    /// `Alexa.ColorController`.
    Color,
    /// `Alexa.ThermostatController`.
    Thermostat,
    /// `Alexa.TemperatureSensor`.
    TemperatureSensor,
}

impl Interface {
    /// Returns the interface namespace.
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        match self {
            Self::Power => "Alexa.PowerController",
            Self::Health => "Alexa.EndpointHealth",
            Self::Brightness => "Alexa.BrightnessController",
            Self::Color => "Alexa.ColorController",
            Self::Thermostat => "Alexa.ThermostatController",
            Self::TemperatureSensor => "Alexa.TemperatureSensor",
        }
    }

    /// Returns the property names the interface reports.
    #[must_use]
    pub const fn supported_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Power => &["powerState"],
            Self::Health => &["connectivity"],
            Self::Brightness => &["brightness"],
            Self::Color => &["color"],
            Self::Thermostat => &["targetSetpoint", "thermostatMode"],
            Self::TemperatureSensor => &["temperature"],
        }
    }
}

/// Capabilities of a lamp.
///
/// Power control and health reporting are always present; brightness and
/// color depend on the node type.
///
/// # Examples
///
/// ```
/// use hippo_alexa::{Capabilities, NodeType};
///
/// let caps = Capabilities::for_node_type(NodeType::Rgb);
/// assert!(caps.brightness);
/// assert!(caps.color);
///
/// let caps = Capabilities::for_node_type(NodeType::Switch);
/// assert!(!caps.brightness);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Supports brightness control.
    pub brightness: bool,

    /// Supports full color control.
    pub color: bool,
}

impl Capabilities {
    /// Derives the capabilities of a node type.
    #[must_use]
    pub const fn for_node_type(node_type: NodeType) -> Self {
        // Raw types below 4 dim; only RGB does color.
        Self {
            brightness: node_type.as_raw() < 4,
            color: matches!(node_type, NodeType::Rgb),
        }
    }

    /// Returns the interfaces to advertise, in discovery order.
    #[must_use]
    pub fn interfaces(&self) -> Vec<Interface> {
        let mut interfaces = vec![Interface::Power, Interface::Health];
        if self.brightness {
            interfaces.push(Interface::Brightness);
        }
        if self.color {
            interfaces.push(Interface::Color);
        }
        interfaces
    }

    /// Returns the interfaces of the synthesized thermostat endpoint.
    #[must_use]
    pub fn thermostat_interfaces() -> Vec<Interface> {
        vec![
            Interface::Thermostat,
            Interface::TemperatureSensor,
            Interface::Health,
        ]
    }
}
