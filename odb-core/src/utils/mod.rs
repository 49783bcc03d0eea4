//! Utility re-exports and helper macros for the Omni-Directional claw bot.
//!
//! - `config`: robot calibration values and their validation
//! - `controllers`: speed ladder, claw, debounce, hardware port and teleop loop
//! - `math`: coordinate rotation and POV drive mixing
//! - `motion`: autonomous segment builders
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod config;
pub mod controllers;
pub mod math;
pub mod motion;

pub use config::RobotConfig;
pub use controllers::TeleopController;
pub use embassy_time::*;
pub use math::drive::{mix, DriveCommand, DriveIntent};
pub use math::rotation::{rotate, FrameRotator};

#[macro_export]
/// Initialize a static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value. The
/// calling crate must depend on `static_cell`.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
