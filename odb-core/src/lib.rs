//! Drive mixing, claw and teleop control for the Omni-Directional claw bot on
//! no-std embedded platforms.
//!
//! For a runnable host simulation, see the `odb-app/mock-hub` binary.
#![no_std]

pub mod utils;
