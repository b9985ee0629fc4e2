// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! The daemon is the single source of truth: every directive reads a fresh
//! [`LampState`] or [`ThermostatState`], and nothing is cached between
//! requests. Changes are expressed as a [`StateChangeRequest`] that carries
//! only the fields a directive touches, computed by the pure functions in
//! [`transition`].
//!
//! # Examples
//!
//! ```
//! use hippo_alexa::NodeType;
//! use hippo_alexa::state::{LampState, transition};
//! use hippo_alexa::types::{PowerState, RgbColor};
//!
//! let lamp = LampState::new("desk", PowerState::Off, RgbColor::new(255, 0, 0), NodeType::Rgb);
//! let change = transition::power(&lamp, PowerState::On);
//!
//! assert!(change.request.power_changed());
//! assert_eq!(change.next.power(), PowerState::On);
//! // The lamp read earlier is left untouched
//! assert_eq!(lamp.power(), PowerState::Off);
//! ```

mod lamp_state;
mod state_change;
pub mod transition;

pub use lamp_state::{LampState, ThermostatState};
pub use state_change::StateChangeRequest;
pub use transition::{BrightnessChange, Transition};
