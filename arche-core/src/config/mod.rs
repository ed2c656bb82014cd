//! Configuration type definitions
//!
//! All values are fixed at build/configuration time and read-only during a
//! homing cycle.

mod layout;
mod settings;

pub use layout::PortLayout;
pub use settings::{HomingSettings, InvertMasks};
