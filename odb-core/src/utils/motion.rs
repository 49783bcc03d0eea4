//! Autonomous motion segments.
//!
//! A segment is one timed drive primitive expressed in the field frame. This
//! module only builds segments; choosing and timing a sequence of them is left
//! to the autonomous routine.

use embassy_time::Duration;

use crate::utils::{
    config::RobotConfig,
    math::{
        drive::{DriveCommand, DriveIntent},
        rotation::FrameRotator,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub intent: DriveIntent,
    pub speed: f64,
    pub duration: Duration,
}

impl Segment {
    pub fn command(&self) -> DriveCommand {
        self.intent.command(self.speed)
    }
}

/// Translate along field axes (`+y` forward, `+x` right) for `millis`.
///
/// `frame` is normally `RobotConfig::field_frame`; see `field_translate_with`.
pub fn field_translate(
    frame: &FrameRotator,
    x: f64,
    y: f64,
    speed: f64,
    millis: u64,
) -> Segment {
    let (x, y) = frame.apply(x, y);
    Segment {
        intent: DriveIntent::Translate { x, y },
        speed,
        duration: Duration::from_millis(millis),
    }
}

/// `field_translate` using the configured field frame.
pub fn field_translate_with(
    config: &RobotConfig,
    x: f64,
    y: f64,
    speed: f64,
    millis: u64,
) -> Segment {
    field_translate(&config.field_frame, x, y, speed, millis)
}

/// Rotate in place at full trigger for `millis`.
///
/// Autonomous rotation is expressed in the field frame, where a clockwise turn
/// is produced by the anticlockwise trigger input: the left side runs
/// backwards and the right side forwards.
pub fn field_rotate(
    clockwise: bool,
    speed: f64,
    millis: u64,
) -> Segment {
    let magnitude = if clockwise { -1.0 } else { 1.0 };
    Segment {
        intent: DriveIntent::Rotate(magnitude),
        speed,
        duration: Duration::from_millis(millis),
    }
}

/// Hold all wheels at zero for `millis`.
pub fn pause(millis: u64) -> Segment {
    Segment {
        intent: DriveIntent::Translate { x: 0.0, y: 0.0 },
        speed: 0.0,
        duration: Duration::from_millis(millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::{drive::mix, rotation::Mirror};

    #[test]
    fn translate_uses_field_frame() {
        let seg = field_translate(&FrameRotator::field(), 0.0, 1.0, 0.25, 1500);
        let half = libm::sqrt(0.5);
        match seg.intent {
            DriveIntent::Translate { x, y } => {
                assert!(libm::fabs(x + half) < 1e-9);
                assert!(libm::fabs(y + half) < 1e-9);
            }
            DriveIntent::Rotate(_) => panic!("expected translation"),
        }
        assert_eq!(seg.duration, Duration::from_millis(1500));
    }

    #[test]
    fn clockwise_field_turn_runs_left_side_backwards() {
        let cw = field_rotate(true, 0.125, 1700).command();
        assert_eq!(cw.left_rear, -0.125);
        assert_eq!(cw.left_front, -0.125);
        assert_eq!(cw.right_front, 0.125);
        assert_eq!(cw.right_rear, 0.125);
        assert_eq!(cw, mix(0.0, 0.0, 0.0, 1.0, 0.125));
    }

    #[test]
    fn anticlockwise_field_turn_runs_left_side_forwards() {
        let acw = field_rotate(false, 0.125, 2000).command();
        assert_eq!(acw.left_rear, 0.125);
        assert_eq!(acw.right_front, -0.125);
        assert_eq!(acw, mix(0.0, 0.0, 1.0, 0.0, 0.125));
    }

    #[test]
    fn configured_field_frame_is_used() {
        let config = RobotConfig {
            field_frame: FrameRotator::new(0.0, Mirror::X),
            ..RobotConfig::default()
        };
        let seg = field_translate_with(&config, 1.0, 0.5, 0.25, 500);
        assert_eq!(seg.intent, DriveIntent::Translate { x: -1.0, y: 0.5 });

        let default = field_translate_with(&RobotConfig::default(), 0.0, 1.0, 0.25, 500);
        assert_eq!(default, field_translate(&FrameRotator::field(), 0.0, 1.0, 0.25, 500));
    }

    #[test]
    fn pause_stops_every_wheel() {
        assert_eq!(pause(300).command().max_abs(), 0.0);
    }
}
