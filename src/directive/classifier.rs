// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directive classification.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{DirectiveError, Result};
use crate::state::BrightnessChange;
use crate::types::{Brightness, HsvColor, PowerState, Temperature};

use super::Directive;

/// The only payload version this adapter speaks.
pub const SUPPORTED_PAYLOAD_VERSION: &str = "3";

/// What a directive asks the adapter to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectiveKind {
    /// `Alexa.Authorization` / `AcceptGrant`.
    AcceptGrant,
    /// `Alexa.Discovery` / `Discover`.
    Discovery,
    /// `Alexa` / `ReportState`.
    ReportState,
    /// `Alexa.PowerController` / `TurnOn`, `TurnOff`.
    Power(PowerState),
    /// `Alexa.BrightnessController` / `SetBrightness`, `AdjustBrightness`.
    Brightness(BrightnessChange),
    /// `Alexa.ColorController` / `SetColor`.
    Color(HsvColor),
    /// `Alexa.ThermostatController` / `SetTargetTemperature`.
    SetTargetTemperature(Temperature),
    /// `Alexa.ThermostatController` / `AdjustTargetTemperature`.
    AdjustTargetTemperature(Temperature),
}

impl DirectiveKind {
    /// Returns `true` if the directive addresses a single endpoint.
    #[must_use]
    pub const fn needs_endpoint(&self) -> bool {
        !matches!(self, Self::AcceptGrant | Self::Discovery)
    }
}

#[derive(Deserialize)]
struct SetBrightnessPayload {
    brightness: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdjustBrightnessPayload {
    brightness_delta: i64,
}

#[derive(Deserialize)]
struct SetColorPayload {
    color: AssistantColor,
}

#[derive(Deserialize)]
struct AssistantColor {
    hue: f64,
    saturation: f64,
    brightness: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetTargetPayload {
    target_setpoint: Temperature,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdjustTargetPayload {
    target_setpoint_delta: Temperature,
}

/// Classifies a directive by namespace and name.
///
/// The payload version is checked before anything else. Namespaces and
/// names are matched case-insensitively.
///
/// # Errors
///
/// - [`DirectiveError::UnsupportedVersion`] for a payload version other
///   than `"3"`
/// - [`DirectiveError::UnknownNamespace`] or
///   [`DirectiveError::UnknownOperation`] for anything not handled
/// - [`DirectiveError::MissingEndpoint`] if a device directive has no endpoint
/// - [`DirectiveError::InvalidPayload`] or a value error for malformed payloads
///
/// # Examples
///
/// ```
/// use hippo_alexa::directive::{Directive, DirectiveKind, classify};
/// use hippo_alexa::types::PowerState;
///
/// let event = serde_json::json!({"directive": {
///     "header": {"namespace": "Alexa.PowerController", "name": "TurnOff", "payloadVersion": "3"},
///     "endpoint": {"endpointId": "desk"},
///     "payload": {}
/// }});
/// let directive = Directive::from_event(&event).unwrap();
/// assert_eq!(classify(&directive).unwrap(), DirectiveKind::Power(PowerState::Off));
/// ```
pub fn classify(directive: &Directive) -> Result<DirectiveKind> {
    let header = &directive.header;
    if header.payload_version != SUPPORTED_PAYLOAD_VERSION {
        return Err(DirectiveError::UnsupportedVersion(header.payload_version.clone()).into());
    }

    let namespace = header.namespace.to_ascii_lowercase();
    let name = header.name.to_ascii_lowercase();

    let kind = match namespace.as_str() {
        "alexa.authorization" => match name.as_str() {
            "acceptgrant" => DirectiveKind::AcceptGrant,
            _ => return Err(unknown_operation(directive)),
        },
        "alexa.discovery" => match name.as_str() {
            "discover" => DirectiveKind::Discovery,
            _ => return Err(unknown_operation(directive)),
        },
        "alexa" => match name.as_str() {
            "reportstate" => DirectiveKind::ReportState,
            _ => return Err(unknown_operation(directive)),
        },
        "alexa.powercontroller" => match name.as_str() {
            "turnon" => DirectiveKind::Power(PowerState::On),
            "turnoff" => DirectiveKind::Power(PowerState::Off),
            _ => return Err(unknown_operation(directive)),
        },
        "alexa.brightnesscontroller" => match name.as_str() {
            "setbrightness" => {
                let payload: SetBrightnessPayload = payload(directive)?;
                DirectiveKind::Brightness(BrightnessChange::Set(Brightness::clamped(
                    payload.brightness,
                )))
            }
            "adjustbrightness" => {
                let payload: AdjustBrightnessPayload = payload(directive)?;
                DirectiveKind::Brightness(BrightnessChange::Adjust(payload.brightness_delta))
            }
            _ => return Err(unknown_operation(directive)),
        },
        "alexa.colorcontroller" => match name.as_str() {
            "setcolor" => {
                let SetColorPayload { color } = payload(directive)?;
                DirectiveKind::Color(HsvColor::from_assistant(
                    color.hue,
                    color.saturation,
                    color.brightness,
                )?)
            }
            _ => return Err(unknown_operation(directive)),
        },
        "alexa.thermostatcontroller" => match name.as_str() {
            "settargettemperature" => {
                let payload: SetTargetPayload = payload(directive)?;
                DirectiveKind::SetTargetTemperature(payload.target_setpoint)
            }
            "adjusttargettemperature" => {
                let payload: AdjustTargetPayload = payload(directive)?;
                DirectiveKind::AdjustTargetTemperature(payload.target_setpoint_delta)
            }
            _ => return Err(unknown_operation(directive)),
        },
        _ => return Err(DirectiveError::UnknownNamespace(header.namespace.clone()).into()),
    };

    if kind.needs_endpoint() {
        directive.require_endpoint_id()?;
    }

    Ok(kind)
}

fn unknown_operation(directive: &Directive) -> crate::Error {
    DirectiveError::UnknownOperation {
        namespace: directive.header.namespace.clone(),
        name: directive.header.name.clone(),
    }
    .into()
}

fn payload<T: DeserializeOwned>(directive: &Directive) -> std::result::Result<T, DirectiveError> {
    T::deserialize(&directive.payload).map_err(|e| {
        DirectiveError::InvalidPayload(format!("{}: {e}", directive.header.name))
    })
}
