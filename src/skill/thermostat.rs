// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat directives.

use crate::error::Result;
use crate::gateway::GatewayClient;
use crate::state::ThermostatState;
use crate::types::Temperature;

/// Requested setpoint change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum ThermostatChange {
    /// Absolute target temperature.
    Set(Temperature),
    /// Relative change of the target temperature.
    Adjust(Temperature),
}

/// Writes the setpoint change and re-reads the thermostat.
///
/// The daemon stores Celsius; other scales are converted first.
pub(super) async fn change(
    gateway: &GatewayClient,
    change: ThermostatChange,
) -> Result<ThermostatState> {
    match change {
        ThermostatChange::Set(target) => {
            let celsius = target.to_celsius();
            tracing::info!(requested = %target, celsius, "Setting target temperature");
            gateway.set_target_temperature(celsius).await?;
        }
        ThermostatChange::Adjust(delta) => {
            let celsius = delta.delta_to_celsius();
            tracing::info!(requested = %delta, celsius, "Adjusting target temperature");
            gateway.adjust_target_temperature(celsius).await?;
        }
    }

    Ok(gateway.read_thermostat().await?)
}
