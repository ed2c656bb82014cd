//! RP2040 implementation of the Arche hardware seams
//!
//! Maps the core's bit-addressed step/direction and limit ports onto
//! discrete RP2040 GPIO lines, and provides the busy-wait microsecond
//! delay the pulse loop times itself with.

#![no_std]
#![deny(unsafe_code)]

pub mod enable;
pub mod port;

pub use enable::EnableLine;
pub use port::HomingGpio;
