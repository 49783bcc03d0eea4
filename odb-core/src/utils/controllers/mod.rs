//! Module Exports
//!
//! This file exports the controllers that make up the teleop control loop.
//!
//! - `claw`: claw position stepping and per-servo offsets.
//! - `debounce`: button edge detection.
//! - `port`: hardware port trait and the PCA9685 implementation.
//! - `speed`: the three-level drive speed ladder.

pub mod claw;
pub mod debounce;
pub mod port;
pub mod speed;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::{Deserialize, Serialize};

use crate::utils::{
    config::{ConfigError, RobotConfig},
    math::{drive, rotation::FrameRotator},
};
use claw::ClawState;
use debounce::Debouncer;
pub use port::{DrivePort, Pca9685Port, PortError};
use speed::{SpeedLadder, SpeedLevel};

/// Channel used to receive gamepad samples, one per control cycle.
pub static GAMEPAD_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    GamepadSample,
    16,
> = embassy_sync::channel::Channel::new();

/// One sample of the driver's gamepad.
///
/// Sticks are in `[-1, 1]` with positive `left_stick_y` pointing forward;
/// triggers are in `[0, 1]`. Values are used as given, without validation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadSample {
    pub left_stick_x: f64,
    pub left_stick_y: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
    /// Speed up.
    pub a: bool,
    /// Speed down.
    pub b: bool,
    /// Open claw.
    pub left_bumper: bool,
    /// Close claw.
    pub right_bumper: bool,
    /// Reset claw.
    pub left_stick_button: bool,
}

/// Snapshot of one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    pub cycle: u64,
    pub speed_level: SpeedLevel,
    pub speed: f64,
    pub drive: drive::DriveCommand,
    pub claw: f64,
}

/// Driver-controlled loop: gamepad in, wheel powers and claw targets out.
pub struct TeleopController<P> {
    port: P,
    frame: FrameRotator,
    speed: SpeedLadder,
    claw: ClawState,
    speed_up: Debouncer,
    speed_down: Debouncer,
    cycle: u64,
}

impl<P> TeleopController<P>
where
    P: DrivePort,
{
    pub fn new(
        port: P,
        config: RobotConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TeleopController {
            port,
            frame: config.teleop_frame,
            speed: SpeedLadder::new(config.speed),
            claw: ClawState::new(config.claw),
            speed_up: Debouncer::new(config.debounce.speed_up),
            speed_down: Debouncer::new(config.debounce.speed_down),
            cycle: 0,
        })
    }

    /// Run one control cycle for `sample` and write the result to the port.
    ///
    /// The left trigger turns clockwise and the right trigger anticlockwise;
    /// either one overrides the stick. Every call consumes a cycle number, so
    /// a failed port write shows up as a gap in telemetry.
    pub fn step(
        &mut self,
        sample: &GamepadSample,
    ) -> Result<Telemetry, P::Error> {
        let increase = self.speed_up.update(sample.a);
        let decrease = self.speed_down.update(sample.b);
        let speed_level = self.speed.update(increase, decrease);

        let claw = self.claw.step(
            sample.left_bumper,
            sample.right_bumper,
            sample.left_stick_button,
        );

        let (x, y) = self.frame.apply(sample.left_stick_x, sample.left_stick_y);
        let command = drive::mix(
            x,
            y,
            sample.left_trigger,
            sample.right_trigger,
            self.speed.scale(),
        );

        let cycle = self.cycle;
        self.cycle += 1;

        self.port.set_wheel_powers(&command)?;
        self.port.set_claw(&self.claw.targets())?;

        let telemetry = Telemetry {
            cycle,
            speed_level,
            speed: self.speed.scale(),
            drive: command,
            claw,
        };
        tracing::debug!(?telemetry, "teleop cycle");
        Ok(telemetry)
    }

    /// Process samples from `GAMEPAD_CHANNEL` forever.
    pub async fn run(&mut self) -> ! {
        tracing::info!(speed = self.speed.scale(), "teleop started");
        loop {
            let sample = GAMEPAD_CHANNEL.receiver().receive().await;
            self.run_once(&sample);
        }
    }

    /// One `run` iteration: step, and stop the drive if the port failed.
    fn run_once(
        &mut self,
        sample: &GamepadSample,
    ) -> Option<Telemetry> {
        match self.step(sample) {
            Ok(telemetry) => Some(telemetry),
            Err(e) => {
                tracing::error!("teleop cycle failed: {:?}", e);
                if let Err(e) = self.port.stop() {
                    tracing::error!("failed to stop drive: {:?}", e);
                }
                None
            }
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn speed(&self) -> &SpeedLadder {
        &self.speed
    }

    pub fn claw(&self) -> &ClawState {
        &self.claw
    }
}
