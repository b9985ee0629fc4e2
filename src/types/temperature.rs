// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature values for the thermostat.
//!
//! The daemon works in Celsius. The assistant may send setpoints in any of
//! its three scales, so values are normalised here before they reach the
//! gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Temperature scale used by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemperatureScale {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
    /// Kelvin.
    Kelvin,
}

impl TemperatureScale {
    /// Returns the assistant string for the scale.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "CELSIUS",
            Self::Fahrenheit => "FAHRENHEIT",
            Self::Kelvin => "KELVIN",
        }
    }
}

/// A temperature with its scale.
///
/// Deserializes from the assistant's `{ "value": 21.5, "scale": "CELSIUS" }`
/// shape; a missing scale means Celsius.
///
/// # Examples
///
/// ```
/// use hippo_alexa::types::{Temperature, TemperatureScale};
///
/// let setpoint = Temperature::new(68.0, TemperatureScale::Fahrenheit);
/// assert!((setpoint.to_celsius() - 20.0).abs() < 1e-9);
///
/// let delta = Temperature::new(9.0, TemperatureScale::Fahrenheit);
/// assert!((delta.delta_to_celsius() - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    value: f64,
    #[serde(default)]
    scale: TemperatureScale,
}

impl Temperature {
    /// Creates a new temperature.
    #[must_use]
    pub const fn new(value: f64, scale: TemperatureScale) -> Self {
        Self { value, scale }
    }

    /// Creates a Celsius temperature.
    #[must_use]
    pub const fn celsius(value: f64) -> Self {
        Self::new(value, TemperatureScale::Celsius)
    }

    /// Returns the raw value in its own scale.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the scale.
    #[must_use]
    pub const fn scale(&self) -> TemperatureScale {
        self.scale
    }

    /// Converts an absolute temperature to Celsius.
    #[must_use]
    pub fn to_celsius(&self) -> f64 {
        match self.scale {
            TemperatureScale::Celsius => self.value,
            TemperatureScale::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => self.value - 273.15,
        }
    }

    /// Converts a temperature difference to Celsius degrees.
    #[must_use]
    pub fn delta_to_celsius(&self) -> f64 {
        match self.scale {
            TemperatureScale::Celsius | TemperatureScale::Kelvin => self.value,
            TemperatureScale::Fahrenheit => self.value * 5.0 / 9.0,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.scale.as_str())
    }
}
