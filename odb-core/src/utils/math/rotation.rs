//! Joystick frame rotation.
//!
//! The chassis is mounted at an angle to the driver's point of view, so stick
//! input is rotated into the chassis frame before it reaches the drive mixer.
//!
//! # Example
//! ```rust
//! use odb_core::utils::math::rotation::rotate;
//! let (x, y) = rotate(1.0, 0.0, core::f64::consts::FRAC_PI_2);
//! assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
//! ```

use core::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Angle between the autonomous field frame and the chassis frame (rad).
pub const FIELD_FRAME_ANGLE: f64 = 3.0 * PI / 4.0;

/// Rotate `(x, y)` counter-clockwise by `angle` radians.
///
/// Magnitudes are passed through unclamped.
pub fn rotate(
    x: f64,
    y: f64,
    angle: f64,
) -> (f64, f64) {
    let (sin, cos) = (libm::sin(angle), libm::cos(angle));
    (x * cos - y * sin, x * sin + y * cos)
}

/// Rotate with the default angle of zero, which leaves the input unchanged.
pub fn rotate_default(
    x: f64,
    y: f64,
) -> (f64, f64) {
    rotate(x, y, 0.0)
}

/// Input axis negated before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mirror {
    #[default]
    None,
    X,
    Y,
}

/// A fixed chassis-to-driver frame offset with optional axis mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameRotator {
    /// Rotation applied to every vector (rad).
    pub angle: f64,
    pub mirror: Mirror,
}

impl FrameRotator {
    pub const fn new(
        angle: f64,
        mirror: Mirror,
    ) -> Self {
        Self { angle, mirror }
    }

    /// The autonomous field frame: `3π/4`, no mirroring.
    pub const fn field() -> Self {
        Self::new(FIELD_FRAME_ANGLE, Mirror::None)
    }

    pub fn apply(
        &self,
        x: f64,
        y: f64,
    ) -> (f64, f64) {
        let (x, y) = match self.mirror {
            Mirror::None => (x, y),
            Mirror::X => (-x, y),
            Mirror::Y => (x, -y),
        };
        rotate(x, y, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    const MAX_ERR: f64 = 1e-9;

    fn norm(v: (f64, f64)) -> f64 {
        libm::sqrt(v.0 * v.0 + v.1 * v.1)
    }

    #[test]
    fn zero_angle_is_identity() {
        for &(x, y) in &[(0.0, 0.0), (1.0, -1.0), (0.3, 0.7), (-2.5, 4.0)] {
            assert_eq!(rotate(x, y, 0.0), (x, y));
            assert_eq!(rotate_default(x, y), (x, y));
        }
    }

    #[test]
    fn quarter_turn_maps_x_onto_y() {
        let (x, y) = rotate(1.0, 0.0, FRAC_PI_2);
        assert!(libm::fabs(x) < MAX_ERR);
        assert!(libm::fabs(y - 1.0) < MAX_ERR);
    }

    #[test]
    fn rotation_preserves_norm() {
        let mut angle = -PI;
        while angle <= PI {
            for &(x, y) in &[(1.0, 0.0), (0.5, -0.5), (-0.8, 0.6), (3.0, 4.0)] {
                let out = rotate(x, y, angle);
                assert!(libm::fabs(norm(out) - norm((x, y))) < MAX_ERR, "angle {}", angle);
            }
            angle += 0.1;
        }
    }

    #[test]
    fn out_of_range_input_is_not_clamped() {
        let (x, y) = rotate(3.0, 0.0, 0.0);
        assert_eq!((x, y), (3.0, 0.0));
    }

    #[test]
    fn mirror_negates_axis_before_rotation() {
        let rot = FrameRotator::new(FRAC_PI_2, Mirror::X);
        let (x, y) = rot.apply(1.0, 0.0);
        assert!(libm::fabs(x) < MAX_ERR);
        assert!(libm::fabs(y + 1.0) < MAX_ERR);

        let rot = FrameRotator::new(0.0, Mirror::Y);
        assert_eq!(rot.apply(0.2, 0.4), (0.2, -0.4));
    }

    #[test]
    fn field_frame_uses_three_quarter_pi() {
        let (x, y) = FrameRotator::field().apply(0.0, 1.0);
        let half = libm::sqrt(0.5);
        assert!(libm::fabs(x + half) < MAX_ERR);
        assert!(libm::fabs(y + half) < MAX_ERR);
    }
}
