//! POV drive mixing for a four-wheel X-configuration chassis.
//!
//! A single stick plus two rotation triggers select exactly one motion
//! primitive per cycle: translation along the rotated stick axes, or rotation
//! in place. Rotation takes priority; whenever either trigger is pressed the
//! stick is ignored.
//!
//! # Example
//! ```rust
//! use odb_core::utils::math::drive::mix;
//! let cmd = mix(0.5, 0.5, 0.0, 0.0, 0.5);
//! assert_eq!(cmd.left_rear, 0.25);
//! ```

use serde::{Deserialize, Serialize};

use super::scale_unit;

/// One motion primitive: translation or in-place rotation, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveIntent {
    /// Translation along the chassis-frame axes, nominally in `[-1, 1]`.
    Translate { x: f64, y: f64 },
    /// Signed rotation magnitude, positive is clockwise.
    Rotate(f64),
}

/// Power for each of the four wheels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    pub left_front: f64,
    pub right_front: f64,
    pub left_rear: f64,
    pub right_rear: f64,
}

/// Choose the motion primitive for this cycle.
///
/// `cw` and `acw` are non-negative trigger magnitudes. Any pressure on either
/// trigger selects rotation with net magnitude `cw - acw`.
pub fn select_intent(
    x: f64,
    y: f64,
    cw: f64,
    acw: f64,
) -> DriveIntent {
    if cw + acw > 0.0 {
        DriveIntent::Rotate(cw - acw)
    } else {
        DriveIntent::Translate { x, y }
    }
}

/// Mix rotated stick input and rotation triggers into wheel powers.
pub fn mix(
    x: f64,
    y: f64,
    cw: f64,
    acw: f64,
    speed: f64,
) -> DriveCommand {
    select_intent(x, y, cw, acw).command(speed)
}

impl DriveIntent {
    /// Wheel powers for this intent, rescaled from `[-1, 1]` to `[-speed, speed]`.
    ///
    /// Rotation drives the left side against the right side. Translation
    /// assigns `y` to the left-rear/right-front pair and `x` to the
    /// left-front/right-rear pair.
    pub fn command(
        &self,
        speed: f64,
    ) -> DriveCommand {
        match *self {
            DriveIntent::Rotate(r) => {
                let s = scale_unit(r, speed);
                DriveCommand {
                    left_front: s,
                    right_front: -s,
                    left_rear: s,
                    right_rear: -s,
                }
            }
            DriveIntent::Translate { x, y } => {
                let forward = scale_unit(y, speed);
                let strafe = scale_unit(x, speed);
                DriveCommand {
                    left_front: strafe,
                    right_front: forward,
                    left_rear: forward,
                    right_rear: strafe,
                }
            }
        }
    }
}

impl DriveCommand {
    pub const ZERO: Self = Self {
        left_front: 0.0,
        right_front: 0.0,
        left_rear: 0.0,
        right_rear: 0.0,
    };

    /// `(left_rear, right_front, left_front, right_rear)`, the pair-wise order
    /// the mixer assigns wheels in.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.left_rear,
            self.right_front,
            self.left_front,
            self.right_rear,
        )
    }

    /// Wheel powers in port order: left-rear, right-front, left-front, right-rear.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.left_rear,
            self.right_front,
            self.left_front,
            self.right_rear,
        ]
    }

    /// Largest absolute wheel power.
    pub fn max_abs(&self) -> f64 {
        self.as_array()
            .iter()
            .fold(0.0, |acc, &p| acc.max(libm::fabs(p)))
    }

    /// Keep each wheel's direction but set its magnitude to `speed`.
    ///
    /// Stopped wheels stay stopped.
    pub fn with_speed(
        &self,
        speed: f64,
    ) -> Self {
        fn retain_sign(
            power: f64,
            speed: f64,
        ) -> f64 {
            if power == 0.0 {
                0.0
            } else {
                libm::copysign(speed, power)
            }
        }
        Self {
            left_front: retain_sign(self.left_front, speed),
            right_front: retain_sign(self.right_front, speed),
            left_rear: retain_sign(self.left_rear, speed),
            right_rear: retain_sign(self.right_rear, speed),
        }
    }
}
