// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type and the RGB/HSV converter.
//!
//! The daemon stores lamp colors as RGB triples while the assistant talks in
//! hue, saturation and brightness. [`rgb_to_hsv`] and [`hsv_to_rgb`] bridge
//! the two; both are total over their input domain and round-trip every RGB
//! triple within one channel unit.

use std::fmt;

use super::HsvColor;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use hippo_alexa::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.green(), 128);
/// assert_eq!(color.blue(), 0);
///
/// let hsv = color.to_hsv();
/// assert_eq!(RgbColor::from_hsv(&hsv), color);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Converts this color to HSV.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_alexa::types::RgbColor;
    ///
    /// let hsv = RgbColor::new(255, 0, 0).to_hsv();
    /// assert_eq!(hsv.hue(), 0.0);
    /// assert_eq!(hsv.saturation(), 100.0);
    /// assert_eq!(hsv.value(), 100.0);
    /// ```
    #[must_use]
    pub fn to_hsv(&self) -> HsvColor {
        let (h, s, v) = rgb_to_hsv(self.red, self.green, self.blue);
        HsvColor::normalized(h, s, v)
    }

    /// Creates an RGB color from an HSV color.
    #[must_use]
    pub fn from_hsv(hsv: &HsvColor) -> Self {
        let (r, g, b) = hsv_to_rgb(hsv.hue(), hsv.saturation(), hsv.value());
        Self::new(r, g, b)
    }

    /// Creates a black color.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Creates a white color.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Converts RGB channels to HSV.
///
/// Returns (hue: `[0, 360)`, saturation: `[0, 100]`, value: `[0, 100]`).
/// Hue is 0 for greys, saturation is 0 for black.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max * 100.0;

    let saturation = if max <= 0.0 {
        0.0
    } else {
        (delta / max) * 100.0
    };

    let hue = if delta < f64::EPSILON {
        0.0
    } else if (max - r).abs() < f64::EPSILON {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    (hue % 360.0, saturation, value)
}

/// Converts HSV to RGB channels.
///
/// Takes (hue: degrees, saturation: 0-100, value: 0-100). Hue wraps around
/// 360 and the other components are clamped, so every input maps to a color.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (v / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let channel = |component: f64| ((component + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rgb_to_hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert_close(h, 0.0);
        assert_close(s, 100.0);
        assert_close(v, 100.0);

        let (h, _, _) = rgb_to_hsv(0, 255, 0);
        assert_close(h, 120.0);

        let (h, _, _) = rgb_to_hsv(0, 0, 255);
        assert_close(h, 240.0);
    }

    #[test]
    fn rgb_to_hsv_magenta_side_wraps_below_360() {
        let (h, _, _) = rgb_to_hsv(255, 0, 1);
        assert!(h > 359.0 && h < 360.0, "hue was {h}");
    }

    #[test]
    fn rgb_to_hsv_grey_and_black() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_close(h, 0.0);
        assert_close(s, 0.0);
        assert!((v - 50.196).abs() < 0.01);

        let (h, s, v) = rgb_to_hsv(0, 0, 0);
        assert_close(h, 0.0);
        assert_close(s, 0.0);
        assert_close(v, 0.0);
    }

    #[test]
    fn hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(0.0, 0.0, 100.0), (255, 255, 255));
    }

    #[test]
    fn hsv_to_rgb_half_value_red() {
        assert_eq!(hsv_to_rgb(0.0, 100.0, 50.0), (128, 0, 0));
    }

    #[test]
    fn hsv_to_rgb_is_total() {
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(-120.0, 100.0, 100.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(0.0, 250.0, 250.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(0.0, -5.0, -5.0), (0, 0, 0));
    }

    #[test]
    fn roundtrip_within_one_unit() {
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(7) {
                    let (h, s, v) = rgb_to_hsv(r, g, b);
                    let (r2, g2, b2) = hsv_to_rgb(h, s, v);
                    assert!(
                        r.abs_diff(r2) <= 1 && g.abs_diff(g2) <= 1 && b.abs_diff(b2) <= 1,
                        "({r},{g},{b}) came back as ({r2},{g2},{b2})"
                    );
                }
            }
        }
    }

    #[test]
    fn roundtrip_channel_extremes() {
        for color in [
            RgbColor::black(),
            RgbColor::white(),
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 255, 0),
            RgbColor::new(0, 0, 255),
            RgbColor::new(1, 254, 1),
            RgbColor::new(255, 255, 254),
        ] {
            assert_eq!(RgbColor::from_hsv(&color.to_hsv()), color);
        }
    }

    #[test]
    fn rgb_display() {
        assert_eq!(RgbColor::new(255, 128, 0).to_string(), "#FF8000");
    }

    #[test]
    fn rgb_from_tuple() {
        let color: RgbColor = (1u8, 2u8, 3u8).into();
        assert_eq!(color, RgbColor::new(1, 2, 3));
    }
}
