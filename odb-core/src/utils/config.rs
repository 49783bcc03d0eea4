//! Robot calibration values.
//!
//! Everything here is robot-specific tuning rather than algorithm: speed
//! levels, frame offsets, claw travel and servo offsets, debounce lengths and
//! motor wiring. `RobotConfig::default()` carries the competition calibration;
//! a JSON document may override any subset of it.

use serde::{Deserialize, Serialize};

use crate::utils::{
    controllers::{claw::ClawConfig, speed::SpeedLevels},
    math::rotation::FrameRotator,
};

/// Errors raised while loading or validating a `RobotConfig`.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    /// Speed levels must satisfy `0 < min < med < max <= 1`.
    SpeedLevels,
    /// Claw travel must satisfy `min < max` with a positive increment.
    ClawRange,
    /// A calibration value was NaN or infinite.
    NonFinite(&'static str),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Debounce lengths, in control cycles, for the speed ladder buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    pub speed_up: u8,
    pub speed_down: u8,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            speed_up: 1,
            speed_down: 1,
        }
    }
}

/// Motor wiring: which wheels spin backwards for positive power.
///
/// Port order is left-rear, right-front, left-front, right-rear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub reversed: [bool; 4],
}

impl Default for WheelConfig {
    fn default() -> Self {
        // Motors face opposite ways on each side; the right side is reversed.
        Self {
            reversed: [false, true, false, true],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub speed: SpeedLevels,
    /// Driver-to-chassis offset applied to teleop stick input.
    pub teleop_frame: FrameRotator,
    /// Field-to-chassis offset applied to autonomous segments, read by
    /// `motion::field_translate_with`.
    pub field_frame: FrameRotator,
    pub claw: ClawConfig,
    pub debounce: DebounceConfig,
    pub wheels: WheelConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            speed: SpeedLevels::default(),
            teleop_frame: FrameRotator::default(),
            field_frame: FrameRotator::field(),
            claw: ClawConfig::default(),
            debounce: DebounceConfig::default(),
            wheels: WheelConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Parse a JSON document; missing fields keep their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SpeedLevels { min, med, max } = self.speed;
        for (name, v) in [
            ("speed.min", min),
            ("speed.med", med),
            ("speed.max", max),
            ("teleop_frame.angle", self.teleop_frame.angle),
            ("field_frame.angle", self.field_frame.angle),
            ("claw.min", self.claw.min),
            ("claw.max", self.claw.max),
            ("claw.increment", self.claw.increment),
            ("claw.start", self.claw.start),
            ("claw.offsets.left_bottom", self.claw.offsets.left_bottom),
            ("claw.offsets.right_bottom", self.claw.offsets.right_bottom),
            ("claw.offsets.left_top", self.claw.offsets.left_top),
            ("claw.offsets.right_top", self.claw.offsets.right_top),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if !(0.0 < min && min < med && med < max && max <= 1.0) {
            return Err(ConfigError::SpeedLevels);
        }
        if self.claw.min >= self.claw.max || self.claw.increment <= 0.0 {
            return Err(ConfigError::ClawRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::rotation::{Mirror, FIELD_FRAME_ANGLE};

    #[test]
    fn defaults_are_valid() {
        let config = RobotConfig::default();
        config.validate().unwrap();
        assert_eq!(config.speed.med, 0.5);
        assert_eq!(config.teleop_frame.angle, 0.0);
        assert_eq!(config.field_frame.angle, FIELD_FRAME_ANGLE);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RobotConfig::from_json(
            r#"{ "speed": { "min": 0.2, "med": 0.4, "max": 0.8 },
                 "teleop_frame": { "mirror": "y" } }"#,
        )
        .unwrap();
        assert_eq!(config.speed.max, 0.8);
        assert_eq!(config.teleop_frame.mirror, Mirror::Y);
        assert_eq!(config.teleop_frame.angle, 0.0);
        assert_eq!(config.claw, ClawConfig::default());
        assert_eq!(config.wheels.reversed, [false, true, false, true]);
    }

    #[test]
    fn rejects_unordered_speed_levels() {
        let err = RobotConfig::from_json(r#"{ "speed": { "min": 0.5, "med": 0.5, "max": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::SpeedLevels));
    }

    #[test]
    fn rejects_speed_above_one() {
        let mut config = RobotConfig::default();
        config.speed.max = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::SpeedLevels)));
    }

    #[test]
    fn rejects_inverted_claw_range() {
        let mut config = RobotConfig::default();
        config.claw.min = 1.0;
        config.claw.max = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::ClawRange)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut config = RobotConfig::default();
        config.field_frame.angle = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("field_frame.angle"))
        ));
    }

    #[test]
    fn rejects_non_finite_claw_offsets() {
        let mut config = RobotConfig::default();
        config.claw.offsets.right_top = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("claw.offsets.right_top"))
        ));

        let mut config = RobotConfig::default();
        config.claw.offsets.left_bottom = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("claw.offsets.left_bottom"))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            RobotConfig::from_json("{ speed: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
