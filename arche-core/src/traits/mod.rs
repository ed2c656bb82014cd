//! Hardware abstraction traits
//!
//! These traits are the seams between the homing logic and the machine:
//! chip-specific implementations live in the HAL crates, and the
//! simulated backend in `crate::sim` implements the same traits for
//! host-side testing.

mod machine;
mod port;

pub use machine::{MotionSync, StepperDrive};
pub use port::{DelayUs, HomingPort, LimitPort, StepPort};
