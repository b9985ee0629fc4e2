// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response envelopes sent back to the assistant.
//!
//! Every processed directive produces exactly one [`Envelope`]: a
//! `Response`, a `StateReport`, a discovery answer, an authorization answer
//! or an `ErrorResponse`. Envelopes are assembled with [`EnvelopeBuilder`];
//! device state is reported as [`ContextProperty`] lists built by
//! [`lamp_properties`] and [`thermostat_properties`].

mod envelope;
mod property;

pub use envelope::{Envelope, EnvelopeBuilder, ErrorType};
pub use property::{
    ContextProperty, UNCERTAINTY_MS, lamp_properties, thermostat_properties,
};
