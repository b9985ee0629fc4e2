// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read, compute, write for lamp directives.

use crate::capabilities::Interface;
use crate::error::{DirectiveError, Result};
use crate::gateway::GatewayClient;
use crate::state::{LampState, Transition};

/// Runs one lamp state change and returns the state the lamp ends up in.
///
/// The lamp is read first; a failed read aborts before anything is written.
/// An empty change is not written at all.
pub(super) async fn change<F>(
    gateway: &GatewayClient,
    endpoint_id: &str,
    interface: Interface,
    compute: F,
) -> Result<LampState>
where
    F: FnOnce(&LampState) -> Transition,
{
    let current = gateway.read_lamp(endpoint_id).await?;
    if !current.capabilities().interfaces().contains(&interface) {
        return Err(DirectiveError::UnsupportedInterface {
            endpoint: endpoint_id.to_string(),
            interface: interface.namespace().to_string(),
        }
        .into());
    }

    let Transition { request, next } = compute(&current);
    if request.is_empty() {
        tracing::debug!(endpoint_id, "Lamp already in requested state");
    } else {
        gateway.write_lamp(endpoint_id, &request).await?;
        tracing::info!(
            endpoint_id,
            power = %next.power(),
            color = %next.color(),
            "Lamp updated"
        );
    }

    Ok(next)
}
