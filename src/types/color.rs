// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color type.
//!
//! The assistant reports colors as hue in degrees with saturation and
//! brightness as fractions; the converter works on percentages. [`HsvColor`]
//! keeps the percentage form and offers conversions to and from the assistant
//! scale.

use crate::error::ValueError;

use super::Brightness;

/// HSV color representation (Hue, Saturation, Value).
///
/// Components are kept as floats so that converting a stored RGB color to
/// HSV and back loses nothing beyond channel rounding.
///
/// # Examples
///
/// ```
/// use hippo_alexa::types::HsvColor;
///
/// let red = HsvColor::new(0.0, 100.0, 100.0).unwrap();
/// assert_eq!(red.brightness().value(), 100);
///
/// // Hue must stay below 360 degrees
/// assert!(HsvColor::new(360.0, 100.0, 100.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl HsvColor {
    /// Hue upper bound (exclusive, wraps at 360).
    pub const MAX_HUE: f64 = 360.0;

    /// Maximum saturation value.
    pub const MAX_SATURATION: f64 = 100.0;

    /// Maximum value (brightness).
    pub const MAX_VALUE: f64 = 100.0;

    /// Creates a new HSV color.
    ///
    /// # Arguments
    ///
    /// * `hue` - Color hue in degrees, `[0, 360)`
    /// * `saturation` - Saturation percentage, `[0, 100]`
    /// * `value` - Value (brightness) percentage, `[0, 100]`
    ///
    /// # Errors
    ///
    /// Returns error if any component is outside its range or not a number.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Result<Self, ValueError> {
        if !(0.0..Self::MAX_HUE).contains(&hue) {
            return Err(ValueError::InvalidHue(hue));
        }
        if !(0.0..=Self::MAX_SATURATION).contains(&saturation) {
            return Err(ValueError::InvalidSaturation(saturation));
        }
        if !(0.0..=Self::MAX_VALUE).contains(&value) {
            return Err(ValueError::InvalidBrightness(value));
        }
        Ok(Self {
            hue,
            saturation,
            value,
        })
    }

    /// Creates an HSV color, wrapping the hue and clamping the rest.
    ///
    /// Non-finite components become 0.
    #[must_use]
    pub fn normalized(hue: f64, saturation: f64, value: f64) -> Self {
        let finite = |x: f64| if x.is_finite() { x } else { 0.0 };
        Self {
            hue: finite(hue).rem_euclid(Self::MAX_HUE) % Self::MAX_HUE,
            saturation: finite(saturation).clamp(0.0, Self::MAX_SATURATION),
            value: finite(value).clamp(0.0, Self::MAX_VALUE),
        }
    }

    /// Creates an HSV color from the assistant color scale.
    ///
    /// The assistant sends hue in degrees (`[0, 360]`, where 360 equals 0)
    /// and saturation and brightness as fractions in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns error if any component is outside the assistant range.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_alexa::types::HsvColor;
    ///
    /// let green = HsvColor::from_assistant(120.0, 1.0, 0.5).unwrap();
    /// assert_eq!(green.hue(), 120.0);
    /// assert_eq!(green.saturation(), 100.0);
    /// assert_eq!(green.value(), 50.0);
    /// ```
    pub fn from_assistant(hue: f64, saturation: f64, brightness: f64) -> Result<Self, ValueError> {
        if !(0.0..=Self::MAX_HUE).contains(&hue) {
            return Err(ValueError::InvalidHue(hue));
        }
        if !(0.0..=1.0).contains(&saturation) {
            return Err(ValueError::InvalidSaturation(saturation * 100.0));
        }
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValueError::InvalidBrightness(brightness * 100.0));
        }
        Self::new(hue % Self::MAX_HUE, saturation * 100.0, brightness * 100.0)
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns the saturation percentage.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Returns the value (brightness) percentage.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the value rounded to an assistant brightness.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        Brightness::from_percent(self.value)
    }

    /// Returns the saturation as a fraction in `[0, 1]`.
    #[must_use]
    pub fn saturation_fraction(&self) -> f64 {
        self.saturation / 100.0
    }

    /// Returns the value as a fraction in `[0, 1]`.
    #[must_use]
    pub fn value_fraction(&self) -> f64 {
        self.value / 100.0
    }

    /// Returns the same hue and saturation with another brightness.
    #[must_use]
    pub fn with_brightness(self, brightness: Brightness) -> Self {
        Self {
            value: f64::from(brightness.value()),
            ..self
        }
    }

    /// Returns the same hue and saturation with another raw value.
    #[must_use]
    pub fn with_value(self, value: f64) -> Self {
        Self::normalized(self.hue, self.saturation, value)
    }
}
