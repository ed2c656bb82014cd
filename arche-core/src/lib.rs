//! Board-agnostic homing logic for the Arche motion firmware
//!
//! This crate contains all homing logic that does not depend on specific
//! hardware implementations:
//!
//! - Hardware seam traits (step/direction port, limit inputs, delays)
//! - Per-axis debounced limit detection
//! - The homing-cycle pulse generator
//! - The homing sequencer that drives the machine to machine zero
//! - Configuration type definitions
//!
//! Hardware access goes through an exclusively owned port handle, so the
//! whole homing sequence can run against the simulated backend in [`sim`]
//! on a host machine.

#![no_std]
#![deny(unsafe_code)]

pub mod axis;
pub mod config;
pub mod homing;
pub mod position;
pub mod traits;

#[cfg(any(test, feature = "sim"))]
pub mod sim;
