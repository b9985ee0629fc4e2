// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hippo_alexa` - An Alexa Smart Home adapter for the hippoledd daemon.
//!
//! The adapter receives Smart Home directives over HTTP, turns them into
//! calls against the daemon's local REST API and answers with the
//! assistant's response envelope.
//!
//! # Supported Directives
//!
//! - **Discovery**: every lamp known to the daemon, plus an optional thermostat
//! - **Power**: `TurnOn`, `TurnOff`
//! - **Brightness**: `SetBrightness`, `AdjustBrightness`
//! - **Color**: `SetColor`, keeping the lamp's current brightness
//! - **Thermostat**: `SetTargetTemperature`, `AdjustTargetTemperature`
//! - **State reports**: `ReportState` for lamps and the thermostat
//! - **Authorization**: `AcceptGrant`
//!
//! # Node Types
//!
//! The daemon reports a numeric node type per lamp. The advertised
//! capabilities follow from it:
//!
//! | Node type        | Power | Brightness | Color |
//! |------------------|-------|------------|-------|
//! | 1 (dimmable)     | yes   | yes        | no    |
//! | 2 (color dimmer) | yes   | yes        | no    |
//! | 3 (RGB)          | yes   | yes        | yes   |
//! | 4 (switch)       | yes   | no         | no    |
//!
//! Any other value, including 0, is treated as 3.
//!
//! # Quick Start
//!
//! ```no_run
//! use hippo_alexa::Skill;
//! use hippo_alexa::gateway::GatewayConfig;
//! use hippo_alexa::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = GatewayConfig::new("127.0.0.1").with_port(8081).into_client()?;
//!     let server = Server::bind("0.0.0.0:8080".parse()?, Skill::new(gateway)).await?;
//!
//!     server
//!         .serve(async {
//!             tokio::signal::ctrl_c().await.ok();
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Handling Directives Directly
//!
//! ```no_run
//! use hippo_alexa::Skill;
//! use hippo_alexa::gateway::GatewayConfig;
//!
//! # async fn example() -> Result<(), hippo_alexa::GatewayError> {
//! let skill = Skill::new(GatewayConfig::new("127.0.0.1").into_client()?);
//!
//! let event = serde_json::json!({"directive": {
//!     "header": {"namespace": "Alexa.BrightnessController", "name": "AdjustBrightness",
//!                "payloadVersion": "3", "correlationToken": "abc"},
//!     "endpoint": {"endpointId": "desk"},
//!     "payload": {"brightnessDelta": -25}
//! }});
//!
//! let envelope = skill.handle_event(&event).await;
//! assert_eq!(envelope.correlation_token(), Some("abc"));
//! # Ok(())
//! # }
//! ```

mod capabilities;
pub mod config;
pub mod directive;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod response;
#[cfg(feature = "server")]
pub mod server;
mod skill;
pub mod state;
pub mod types;

pub use capabilities::{Capabilities, Interface, NodeType};
pub use error::{ConfigError, DirectiveError, Error, GatewayError, Result, ValidationError, ValueError};
pub use skill::Skill;
pub use types::{Brightness, HsvColor, PowerState, RgbColor, Temperature, TemperatureScale};
