// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the local device daemon's REST API.
//!
//! # Endpoints
//!
//! | Call                                   | Daemon endpoint                |
//! |----------------------------------------|--------------------------------|
//! | [`GatewayClient::read_lamp`]           | `GET /webapi/lamp/{id}`        |
//! | [`GatewayClient::write_lamp`]          | `POST /webapi/lampstate/{id}`  |
//! | [`GatewayClient::list_lamps`]          | `GET /webapi/lamps`            |
//! | [`GatewayClient::read_thermostat`]     | `GET /webapi/state/`           |
//! | [`GatewayClient::set_target_temperature`]    | `POST /webapi/targettemp` |
//! | [`GatewayClient::adjust_target_temperature`] | `POST /webapi/tempdelta`  |
//!
//! No call is retried. Every call is bounded by the configured timeout.

mod http;

pub use http::{GatewayClient, GatewayConfig};
