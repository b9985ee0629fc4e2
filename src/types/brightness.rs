// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for lamp dimming.
//!
//! This module provides a type-safe representation of the assistant's
//! brightness percentage, ensuring values are always within 0-100%.

use std::fmt;

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// The assistant uses 0-100 for brightness; the lamp stores brightness
/// implicitly as the HSV value of its RGB color.
///
/// # Examples
///
/// ```
/// use hippo_alexa::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// // Deltas are clamped to the valid range
/// assert_eq!(level.offset(50).value(), 100);
/// assert_eq!(level.offset(-80).value(), 0);
///
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (0%).
    pub const MIN: Self = Self(0);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidBrightness` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::InvalidBrightness(f64::from(value)));
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_alexa::types::Brightness;
    ///
    /// assert_eq!(Brightness::clamped(150).value(), 100);
    /// assert_eq!(Brightness::clamped(-20).value(), 0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: i64) -> Self {
        // Safe: clamped to 0..=100
        Self(value.clamp(0, 100) as u8)
    }

    /// Creates a brightness from a floating percentage, rounding and clamping.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::MIN;
        }
        Self::clamped(percent.round() as i64)
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the brightness moved by `delta` points, clamped to [0, 100].
    #[must_use]
    pub fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// Returns `true` if the brightness is above zero.
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_valid_range() {
        assert!(Brightness::new(0).is_ok());
        assert!(Brightness::new(100).is_ok());
        assert!(Brightness::new(101).is_err());
    }

    #[test]
    fn brightness_clamped() {
        assert_eq!(Brightness::clamped(i64::MAX).value(), 100);
        assert_eq!(Brightness::clamped(i64::MIN).value(), 0);
        assert_eq!(Brightness::clamped(42).value(), 42);
    }

    #[test]
    fn brightness_from_percent_rounds() {
        assert_eq!(Brightness::from_percent(49.5).value(), 50);
        assert_eq!(Brightness::from_percent(49.4).value(), 49);
        assert_eq!(Brightness::from_percent(120.0).value(), 100);
        assert_eq!(Brightness::from_percent(f64::NAN).value(), 0);
    }

    #[test]
    fn brightness_offset() {
        let level = Brightness::new(100).unwrap();
        assert_eq!(level.offset(-50).value(), 50);
        assert_eq!(level.offset(i64::MAX).value(), 100);
        assert_eq!(level.offset(i64::MIN).value(), 0);
    }

    #[test]
    fn brightness_is_lit() {
        assert!(!Brightness::MIN.is_lit());
        assert!(Brightness::clamped(1).is_lit());
    }

    #[test]
    fn brightness_display() {
        assert_eq!(Brightness::MAX.to_string(), "100%");
    }
}
