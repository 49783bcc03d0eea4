//! Four-servo claw.
//!
//! A single claw position drives all four servos. Each servo is mounted with
//! its own zero offset, and the right-bottom and left-top servos turn the
//! opposite way, so the position is added to or subtracted from each offset.

use serde::{Deserialize, Serialize};

use crate::utils::math::clip;

/// Per-servo zero offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClawOffsets {
    pub left_bottom: f64,
    pub right_bottom: f64,
    pub left_top: f64,
    pub right_top: f64,
}

impl Default for ClawOffsets {
    fn default() -> Self {
        Self {
            left_bottom: 0.0,
            right_bottom: 1.0,
            left_top: 1.0,
            right_top: 0.0,
        }
    }
}

/// Servo set-points for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClawTargets {
    pub left_bottom: f64,
    pub right_bottom: f64,
    pub left_top: f64,
    pub right_top: f64,
}

impl ClawOffsets {
    pub fn targets(
        &self,
        position: f64,
    ) -> ClawTargets {
        ClawTargets {
            left_bottom: self.left_bottom + position,
            right_bottom: self.right_bottom - position,
            left_top: self.left_top - position,
            right_top: self.right_top + position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClawConfig {
    pub min: f64,
    pub max: f64,
    /// Position change per cycle while a button is held.
    pub increment: f64,
    /// Position at start-up, clipped into `[min, max]`.
    pub start: f64,
    pub offsets: ClawOffsets,
}

impl Default for ClawConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            increment: 0.025,
            start: 0.5,
            offsets: ClawOffsets::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClawState {
    config: ClawConfig,
    position: f64,
}

impl ClawState {
    pub fn new(config: ClawConfig) -> Self {
        Self {
            position: clip(config.start, config.min, config.max),
            config,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Slightly past the middle of travel.
    pub fn reset_position(&self) -> f64 {
        self.config.min + (self.config.max - self.config.min) / 2.0 * 1.1
    }

    /// Step the claw for one cycle of held buttons.
    ///
    /// Open and close both apply when held together; `reset` overrides them.
    /// The result is always clipped into `[min, max]`.
    pub fn step(
        &mut self,
        increase: bool,
        decrease: bool,
        reset: bool,
    ) -> f64 {
        let mut position = self.position;
        if increase {
            position += self.config.increment;
        }
        if decrease {
            position -= self.config.increment;
        }
        if reset {
            position = self.reset_position();
        }
        self.position = clip(position, self.config.min, self.config.max);
        self.position
    }

    pub fn targets(&self) -> ClawTargets {
        self.config.offsets.targets(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_ERR: f64 = 1e-12;

    fn close(
        a: f64,
        b: f64,
    ) -> bool {
        libm::fabs(a - b) < MAX_ERR
    }

    #[test]
    fn steps_by_increment() {
        let mut claw = ClawState::new(ClawConfig::default());
        assert!(close(claw.step(true, false, false), 0.525));
        assert!(close(claw.step(false, true, false), 0.5));
        assert!(close(claw.step(true, true, false), 0.5));
    }

    #[test]
    fn clips_to_travel() {
        let mut claw = ClawState::new(ClawConfig {
            start: 0.99,
            ..ClawConfig::default()
        });
        assert_eq!(claw.step(true, false, false), 1.0);

        let mut claw = ClawState::new(ClawConfig {
            start: 0.01,
            ..ClawConfig::default()
        });
        assert_eq!(claw.step(false, true, false), 0.0);
    }

    #[test]
    fn reset_goes_just_past_middle() {
        let mut claw = ClawState::new(ClawConfig {
            start: 0.0,
            ..ClawConfig::default()
        });
        assert!(close(claw.step(true, false, true), 0.55));
    }

    #[test]
    fn start_outside_travel_is_clipped() {
        let claw = ClawState::new(ClawConfig {
            start: 4.0,
            ..ClawConfig::default()
        });
        assert_eq!(claw.position(), 1.0);
    }

    #[test]
    fn offsets_mirror_opposing_servos() {
        let t = ClawOffsets::default().targets(0.25);
        assert_eq!(t.left_bottom, 0.25);
        assert_eq!(t.right_bottom, 0.75);
        assert_eq!(t.left_top, 0.75);
        assert_eq!(t.right_top, 0.25);
    }
}
