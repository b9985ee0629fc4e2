// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the directive handlers.
//!
//! Each type keeps its value inside the valid range at construction time, so
//! the handlers never have to re-check ranges after parsing.
//!
//! # Types
//!
//! - [`RgbColor`] - Device color with 8-bit channels, plus the RGB/HSV converter
//! - [`HsvColor`] - Hue (0-360), saturation and value (0-100) as floats
//! - [`Brightness`] - Assistant brightness percentage (0-100)
//! - [`PowerState`] - On/Off
//! - [`Temperature`] - A temperature reading or setpoint with its scale

mod brightness;
mod color;
mod power;
mod rgb_color;
mod temperature;

pub use brightness::Brightness;
pub use color::HsvColor;
pub use power::PowerState;
pub use rgb_color::{RgbColor, hsv_to_rgb, rgb_to_hsv};
pub use temperature::{Temperature, TemperatureScale};
