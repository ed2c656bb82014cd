//! Machine position vector

use crate::axis::{Axis, AxisSet};

/// The machine's position in length units, one coordinate per axis.
///
/// Owned by process-wide machine state. The homing sequencer is its only
/// writer here: at the end of a full homing run it sets every axis that
/// participated to exactly zero and leaves the rest untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MachinePosition([f32; Axis::COUNT]);

impl MachinePosition {
    /// All coordinates at zero
    pub const fn new() -> Self {
        MachinePosition([0.0; Axis::COUNT])
    }

    /// Coordinate of one axis
    pub const fn get(&self, axis: Axis) -> f32 {
        self.0[axis.index()]
    }

    /// Set the coordinate of one axis
    pub fn set(&mut self, axis: Axis, value: f32) {
        self.0[axis.index()] = value;
    }

    /// Set the given axes to exactly zero, leaving the others untouched
    pub fn zero(&mut self, axes: AxisSet) {
        for axis in axes {
            self.0[axis.index()] = 0.0;
        }
    }

    /// The raw coordinate array in axis-index order
    pub const fn coords(&self) -> &[f32; Axis::COUNT] {
        &self.0
    }
}
