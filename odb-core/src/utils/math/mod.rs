//! Math utilities for the Omni-Directional claw bot.
//!
//! This module provides the joystick frame rotation and the POV drive mixer for
//! a four-wheel X-configuration chassis.

pub mod drive;
pub mod rotation;

/// Linearly map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// This is not a clamp: values outside the source range extrapolate outside
/// the target range.
pub fn scale(
    value: f64,
    from_min: f64,
    from_max: f64,
    to_min: f64,
    to_max: f64,
) -> f64 {
    let ratio = (value - from_min) / (from_max - from_min);
    to_min + ratio * (to_max - to_min)
}

/// Map a unit-range joystick value in `[-1, 1]` onto `[-speed, speed]`.
///
/// The source range is fixed at width 2, so this never divides by zero.
pub fn scale_unit(
    value: f64,
    speed: f64,
) -> f64 {
    scale(value, -1.0, 1.0, -speed, speed)
}

/// Clamp `value` into `[min, max]`.
pub fn clip(
    value: f64,
    min: f64,
    max: f64,
) -> f64 {
    value.max(min).min(max)
}
