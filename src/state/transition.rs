// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure "compute next state" functions for lamp directives.
//!
//! Each function takes the freshly read lamp state and the requested change
//! and returns a [`Transition`]: the change to write and the state the lamp
//! will be in afterwards. Nothing here performs I/O.

use crate::types::{Brightness, HsvColor, PowerState, RgbColor};

use super::{LampState, StateChangeRequest};

/// A computed lamp change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The change to write to the daemon.
    pub request: StateChangeRequest,
    /// The lamp state after the change is written.
    pub next: LampState,
}

impl Transition {
    fn new(current: &LampState, request: StateChangeRequest) -> Self {
        Self {
            next: current.apply(&request),
            request,
        }
    }
}

/// Requested brightness change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessChange {
    /// Absolute brightness (`SetBrightness`).
    Set(Brightness),
    /// Relative change in percentage points (`AdjustBrightness`).
    Adjust(i64),
}

/// Sets the power flag.
///
/// The flag is always marked changed, even when the lamp is already in the
/// requested state.
#[must_use]
pub fn power(current: &LampState, requested: PowerState) -> Transition {
    Transition::new(current, StateChangeRequest::default().with_power(requested))
}

/// Applies a brightness change while keeping hue and saturation.
///
/// The resulting brightness is clamped to [0, 100]. The color is only
/// rewritten when the brightness actually moves. See
/// [`power_on_when_lit`] for the power side effect.
///
/// # Examples
///
/// ```
/// use hippo_alexa::NodeType;
/// use hippo_alexa::state::{BrightnessChange, LampState, transition};
/// use hippo_alexa::types::{PowerState, RgbColor};
///
/// let lamp = LampState::new("desk", PowerState::On, RgbColor::new(255, 0, 0), NodeType::Rgb);
/// let change = transition::brightness(&lamp, BrightnessChange::Adjust(-50));
///
/// assert_eq!(change.next.color(), RgbColor::new(128, 0, 0));
/// assert_eq!(change.next.brightness().value(), 50);
/// ```
#[must_use]
pub fn brightness(current: &LampState, change: BrightnessChange) -> Transition {
    let hsv = current.hsv();
    let existing = hsv.brightness();
    let target = match change {
        BrightnessChange::Set(level) => level,
        BrightnessChange::Adjust(delta) => existing.offset(delta),
    };

    let mut request = StateChangeRequest::default();
    if target != existing {
        request = request.with_brightness_color(RgbColor::from_hsv(&hsv.with_brightness(target)));
    }

    Transition::new(current, power_on_when_lit(current, target, request))
}

/// Post-condition of every brightness computation.
///
/// A lamp that ends up with a brightness above zero while switched off is
/// switched on as well; the assistant does not always send a separate power
/// directive when it raises brightness.
#[must_use]
pub fn power_on_when_lit(
    current: &LampState,
    brightness: Brightness,
    request: StateChangeRequest,
) -> StateChangeRequest {
    let already_on = request.power().unwrap_or(current.power()).is_on();
    if brightness.is_lit() && !already_on {
        request.with_power(PowerState::On)
    } else {
        request
    }
}

/// Applies a color change while keeping the stored brightness.
///
/// Only hue and saturation are taken from `requested`; the value component
/// stays whatever the lamp currently shows, so picking a color never changes
/// perceived brightness.
#[must_use]
pub fn color(current: &LampState, requested: HsvColor) -> Transition {
    let existing = current.hsv();
    let target = requested.with_value(existing.value());
    let request = StateChangeRequest::default().with_color(RgbColor::from_hsv(&target));
    Transition::new(current, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NodeType;

    fn lamp(power: PowerState, r: u8, g: u8, b: u8) -> LampState {
        LampState::new("lamp", power, RgbColor::new(r, g, b), NodeType::Rgb)
    }

    #[test]
    fn power_is_always_marked_changed() {
        let current = lamp(PowerState::On, 255, 0, 0);
        let change = power(&current, PowerState::On);
        assert!(change.request.power_changed());
        assert_eq!(change.next, current);

        let change = power(&current, PowerState::Off);
        assert_eq!(change.next.power(), PowerState::Off);
        assert!(change.request.color().is_none());
    }

    #[test]
    fn adjust_brightness_keeps_hue_and_saturation() {
        let current = lamp(PowerState::On, 255, 0, 0);
        let change = brightness(&current, BrightnessChange::Adjust(-50));

        let hsv = change.next.hsv();
        assert_eq!(hsv.brightness().value(), 50);
        assert!(hsv.hue().abs() < 1e-9);
        assert!((hsv.saturation() - 100.0).abs() < 1e-9);
        assert_eq!(change.next.color(), RgbColor::new(128, 0, 0));
        assert!(change.request.brightness_changed());
        assert!(!change.request.power_changed());
    }

    #[test]
    fn set_brightness_powers_on_dark_lamp() {
        let current = lamp(PowerState::Off, 0, 0, 0);
        let change = brightness(&current, BrightnessChange::Set(Brightness::new(40).unwrap()));

        assert_eq!(change.next.power(), PowerState::On);
        assert!(change.request.power_changed());
        assert_eq!(change.next.brightness().value(), 40);
    }

    #[test]
    fn brightness_clamps_to_range() {
        let current = lamp(PowerState::On, 128, 0, 0);
        let change = brightness(&current, BrightnessChange::Adjust(500));
        assert_eq!(change.next.brightness().value(), 100);

        let change = brightness(&current, BrightnessChange::Adjust(-500));
        assert_eq!(change.next.brightness().value(), 0);
        assert_eq!(change.next.color(), RgbColor::black());
    }

    #[test]
    fn unchanged_brightness_writes_no_color() {
        let current = lamp(PowerState::On, 255, 0, 0);
        let change = brightness(&current, BrightnessChange::Set(Brightness::MAX));
        assert!(change.request.is_empty());
        assert_eq!(change.next, current);
    }

    #[test]
    fn unchanged_brightness_still_powers_on() {
        let current = lamp(PowerState::Off, 255, 0, 0);
        let change = brightness(&current, BrightnessChange::Adjust(0));
        assert!(change.request.color().is_none());
        assert_eq!(change.request.power(), Some(PowerState::On));
    }

    #[test]
    fn zero_brightness_does_not_power_on() {
        let current = lamp(PowerState::Off, 255, 0, 0);
        let change = brightness(&current, BrightnessChange::Set(Brightness::MIN));
        assert!(!change.request.power_changed());
        assert_eq!(change.next.power(), PowerState::Off);
    }

    #[test]
    fn power_on_when_lit_rule() {
        let off = lamp(PowerState::Off, 0, 0, 0);
        let on = lamp(PowerState::On, 0, 0, 0);
        let empty = StateChangeRequest::default();

        assert_eq!(
            power_on_when_lit(&off, Brightness::clamped(1), empty).power(),
            Some(PowerState::On)
        );
        assert!(power_on_when_lit(&on, Brightness::clamped(1), empty).is_empty());
        assert!(power_on_when_lit(&off, Brightness::MIN, empty).is_empty());
    }

    #[test]
    fn color_keeps_existing_brightness() {
        // Stored brightness of 70%
        let current = lamp(PowerState::On, 179, 0, 0);
        assert_eq!(current.brightness().value(), 70);

        let requested = HsvColor::from_assistant(120.0, 1.0, 0.3).unwrap();
        let change = color(&current, requested);

        let hsv = change.next.hsv();
        assert_eq!(hsv.brightness().value(), 70);
        assert!((hsv.hue() - 120.0).abs() < 1e-9);
        assert_eq!(change.next.color(), RgbColor::new(0, 179, 0));
        assert!(change.request.color_changed());
        assert!(!change.request.power_changed());
    }

    #[test]
    fn color_on_black_lamp_stays_black() {
        let current = lamp(PowerState::On, 0, 0, 0);
        let requested = HsvColor::from_assistant(240.0, 1.0, 1.0).unwrap();
        let change = color(&current, requested);
        assert_eq!(change.next.color(), RgbColor::black());
    }
}
