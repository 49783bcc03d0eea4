//! Hardware port for the drive motors and claw servos.
//!
//! `DrivePort` is the seam between the pure control code and the robot. The
//! bundled implementation drives a PCA9685 PWM controller over a shared I2C
//! bus: each wheel uses a phase/enable channel pair on a DC motor driver, and
//! each claw servo takes one channel.

use core::cell::RefCell;

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use pwm_pca9685::{Address as PwmAddress, Channel, Error as PwmError, Pca9685};

use crate::utils::{
    config::WheelConfig,
    controllers::claw::ClawTargets,
    math::{clip, drive::DriveCommand},
};

/// Default I2C address of the PCA9685.
pub const PWM_ADDRESS: u8 = 0x40;

/// Prescale for a ~50 Hz PWM period, as servos expect.
pub const PWM_PRESCALE: u8 = 121;

const MAX_DUTY: u16 = 4095;
/// 1.0 ms pulse at 50 Hz.
const SERVO_MIN_COUNT: u16 = 205;
/// 2.0 ms pulse at 50 Hz.
const SERVO_MAX_COUNT: u16 = 410;

/// Output side of the control loop.
pub trait DrivePort {
    type Error: core::fmt::Debug;

    /// Write one cycle's wheel powers. Implementations clamp to their
    /// actuator-safe range.
    fn set_wheel_powers(
        &mut self,
        command: &DriveCommand,
    ) -> Result<(), Self::Error>;

    fn set_claw(
        &mut self,
        targets: &ClawTargets,
    ) -> Result<(), Self::Error>;

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.set_wheel_powers(&DriveCommand::ZERO)
    }
}

/// Errors that can occur when driving the PCA9685.
#[derive(Debug)]
pub enum PortError<E: core::fmt::Debug> {
    Pwm(PwmError<E>),
    PwmNotInitialized,
}

impl<E: core::fmt::Debug> From<PwmError<E>> for PortError<E> {
    fn from(e: PwmError<E>) -> Self {
        PortError::Pwm(e)
    }
}

/// PCA9685-backed drive port on a shared I2C bus.
pub struct Pca9685Port<'a, I2C: 'static> {
    i2c: &'a RefCell<I2C>,
    address: u8,
    pub pwm: Option<Pca9685<RefCellDevice<'a, I2C>>>,
    /// (phase, enable) per wheel, in port order: LR, RF, LF, RR.
    wheel_channels: [(Channel, Channel); 4],
    /// Left-bottom, right-bottom, left-top, right-top.
    claw_channels: [Channel; 4],
    reversed: [bool; 4],
}

impl<'a, I2C, E> Pca9685Port<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    pub fn new(
        i2c_bus: &'a RefCell<I2C>,
        address: u8,
        wheels: WheelConfig,
    ) -> Self {
        Pca9685Port {
            i2c: i2c_bus,
            address,
            pwm: None,
            wheel_channels: [
                (Channel::C0, Channel::C1),
                (Channel::C2, Channel::C3),
                (Channel::C4, Channel::C5),
                (Channel::C6, Channel::C7),
            ],
            claw_channels: [Channel::C8, Channel::C9, Channel::C10, Channel::C11],
            reversed: wheels.reversed,
        }
    }

    /// Attach the PWM controller on the bus.
    pub fn init_devices(&mut self) -> Result<(), PortError<E>> {
        let pwm = Pca9685::new(RefCellDevice::new(self.i2c), PwmAddress::from(self.address))?;
        self.pwm = Some(pwm);
        Ok(())
    }

    /// Enable the PWM controller and set the ~50 Hz prescale.
    pub fn configure_pwm(&mut self) -> Result<(), PortError<E>> {
        let pca = self.pwm.as_mut().ok_or(PortError::PwmNotInitialized)?;
        pca.enable()?;
        pca.set_prescale(PWM_PRESCALE)?;
        tracing::info!(prescale = PWM_PRESCALE, "PWM enabled");
        Ok(())
    }

    /// Apply wheel powers, flipping reversed motors and clamping to full duty.
    ///
    /// A non-finite power stops that wheel.
    pub fn apply_wheel_powers(
        &mut self,
        command: &DriveCommand,
    ) -> Result<(), PortError<E>> {
        let pca = self.pwm.as_mut().ok_or(PortError::PwmNotInitialized)?;
        let powers = command.as_array();

        for (i, &(phase_channel, enable_channel)) in self.wheel_channels.iter().enumerate() {
            let power = if !powers[i].is_finite() {
                tracing::warn!(wheel = i, power = powers[i], "non-finite wheel power, stopping wheel");
                0.0
            } else if self.reversed[i] {
                -powers[i]
            } else {
                powers[i]
            };
            let duty = libm::fabs(power).min(1.0);
            let forward = power >= 0.0;

            pca.set_channel_on_off(phase_channel, 0, if forward { 0 } else { MAX_DUTY })?;
            pca.set_channel_on_off(enable_channel, 0, (duty * MAX_DUTY as f64) as u16)?;
        }
        Ok(())
    }

    /// Apply claw servo positions, clamped to `[0, 1]`.
    pub fn apply_claw(
        &mut self,
        targets: &ClawTargets,
    ) -> Result<(), PortError<E>> {
        let pca = self.pwm.as_mut().ok_or(PortError::PwmNotInitialized)?;
        let positions = [
            targets.left_bottom,
            targets.right_bottom,
            targets.left_top,
            targets.right_top,
        ];

        for (&channel, &position) in self.claw_channels.iter().zip(positions.iter()) {
            pca.set_channel_on_off(channel, 0, servo_count(position))?;
        }
        Ok(())
    }
}

impl<'a, I2C, E> DrivePort for Pca9685Port<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    type Error = PortError<E>;

    fn set_wheel_powers(
        &mut self,
        command: &DriveCommand,
    ) -> Result<(), Self::Error> {
        self.apply_wheel_powers(command)
    }

    fn set_claw(
        &mut self,
        targets: &ClawTargets,
    ) -> Result<(), Self::Error> {
        self.apply_claw(targets)
    }
}

/// 12-bit off count for a servo position in `[0, 1]`.
fn servo_count(position: f64) -> u16 {
    let span = (SERVO_MAX_COUNT - SERVO_MIN_COUNT) as f64;
    SERVO_MIN_COUNT + libm::round(clip(position, 0.0, 1.0) * span) as u16
}
