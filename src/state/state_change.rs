// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write-only lamp state change.
//!
//! A [`StateChangeRequest`] holds only the fields a directive changed plus a
//! flag per field, so writing it never clobbers what the directive did not
//! mean to touch. It serializes to the body of
//! `POST /webapi/lampstate/{id}`:
//!
//! ```json
//! {"On": true, "R": 128, "G": 0, "B": 0, "OnChanged": true, "BrightnessChanged": true, "ColorChanged": false}
//! ```
//!
//! `On` is omitted unless the power changed; `R`, `G` and `B` are omitted
//! unless brightness or color changed.

use serde::Serialize;

use crate::types::{PowerState, RgbColor};

/// Fields changed by one directive.
///
/// # Examples
///
/// ```
/// use hippo_alexa::state::StateChangeRequest;
/// use hippo_alexa::types::PowerState;
///
/// let request = StateChangeRequest::default().with_power(PowerState::On);
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["On"], true);
/// assert_eq!(body["OnChanged"], true);
/// assert!(body.get("R").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "StateChangeWire")]
pub struct StateChangeRequest {
    power: Option<PowerState>,
    color: Option<RgbColor>,
    brightness_changed: bool,
    color_changed: bool,
}

impl StateChangeRequest {
    /// Sets the power state.
    #[must_use]
    pub fn with_power(self, power: PowerState) -> Self {
        Self {
            power: Some(power),
            ..self
        }
    }

    /// Sets a new color that results from a brightness change.
    #[must_use]
    pub fn with_brightness_color(self, color: RgbColor) -> Self {
        Self {
            color: Some(color),
            brightness_changed: true,
            ..self
        }
    }

    /// Sets a new color that results from a color change.
    #[must_use]
    pub fn with_color(self, color: RgbColor) -> Self {
        Self {
            color: Some(color),
            color_changed: true,
            ..self
        }
    }

    /// Returns the new power state, if it changed.
    #[must_use]
    pub const fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns the new RGB color, if brightness or color changed.
    #[must_use]
    pub const fn color(&self) -> Option<RgbColor> {
        self.color
    }

    /// Returns `true` if the power flag is part of the change.
    #[must_use]
    pub const fn power_changed(&self) -> bool {
        self.power.is_some()
    }

    /// Returns `true` if the change came from a brightness directive.
    #[must_use]
    pub const fn brightness_changed(&self) -> bool {
        self.brightness_changed
    }

    /// Returns `true` if the change came from a color directive.
    #[must_use]
    pub const fn color_changed(&self) -> bool {
        self.color_changed
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.power.is_none() && self.color.is_none()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StateChangeWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    r: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    g: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<u8>,
    on_changed: bool,
    brightness_changed: bool,
    color_changed: bool,
}

impl From<StateChangeRequest> for StateChangeWire {
    fn from(request: StateChangeRequest) -> Self {
        Self {
            on: request.power.map(bool::from),
            r: request.color.map(|c| c.red()),
            g: request.color.map(|c| c.green()),
            b: request.color.map(|c| c.blue()),
            on_changed: request.power.is_some(),
            brightness_changed: request.brightness_changed,
            color_changed: request.color_changed,
        }
    }
}
