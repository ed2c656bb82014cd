//! Step/direction/limit port bit layout

use crate::axis::{Axis, AxisSet};

/// Bit positions of the step, direction, and limit lines on the machine's
/// ports: one 8-bit output port carries step and direction, one 8-bit
/// input port carries the limit switches.
///
/// Configuration-derived and read-only during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortLayout {
    /// Output-port bit number of each axis's step line
    pub step_bits: [u8; Axis::COUNT],
    /// Output-port bit number of each axis's direction line
    pub dir_bits: [u8; Axis::COUNT],
    /// Input-port bit number of each axis's limit line
    pub limit_bits: [u8; Axis::COUNT],
}

impl Default for PortLayout {
    fn default() -> Self {
        Self {
            step_bits: [0, 1, 2, 3],
            dir_bits: [4, 5, 6, 7],
            limit_bits: [0, 1, 2, 3],
        }
    }
}

impl PortLayout {
    /// Single-bit mask of an axis's step line
    pub const fn step_bit(&self, axis: Axis) -> u8 {
        1 << self.step_bits[axis.index()]
    }

    /// Single-bit mask of an axis's direction line
    pub const fn dir_bit(&self, axis: Axis) -> u8 {
        1 << self.dir_bits[axis.index()]
    }

    /// Single-bit mask of an axis's limit line
    pub const fn limit_bit(&self, axis: Axis) -> u8 {
        1 << self.limit_bits[axis.index()]
    }

    /// Mask of all step lines
    pub fn step_mask(&self) -> u8 {
        Axis::ALL.iter().fold(0, |m, &a| m | self.step_bit(a))
    }

    /// Mask of all direction lines
    pub fn dir_mask(&self) -> u8 {
        Axis::ALL.iter().fold(0, |m, &a| m | self.dir_bit(a))
    }

    /// Mask of all limit lines
    pub fn limit_mask(&self) -> u8 {
        Axis::ALL.iter().fold(0, |m, &a| m | self.limit_bit(a))
    }

    /// Mask of the step lines of the given axes
    pub fn step_bits_for(&self, axes: AxisSet) -> u8 {
        axes.iter().fold(0, |m, a| m | self.step_bit(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_masks() {
        let layout = PortLayout::default();
        assert_eq!(layout.step_mask(), 0x0F);
        assert_eq!(layout.dir_mask(), 0xF0);
        assert_eq!(layout.limit_mask(), 0x0F);
    }

    #[test]
    fn per_axis_bits() {
        let layout = PortLayout::default();
        assert_eq!(layout.step_bit(Axis::X), 0x01);
        assert_eq!(layout.step_bit(Axis::C), 0x08);
        assert_eq!(layout.dir_bit(Axis::X), 0x10);
        assert_eq!(layout.dir_bit(Axis::C), 0x80);
        assert_eq!(layout.limit_bit(Axis::Z), 0x04);
    }

    #[test]
    fn step_bits_for_subset() {
        let layout = PortLayout::default();
        let axes = AxisSet::single(Axis::X).with(Axis::Z);
        assert_eq!(layout.step_bits_for(axes), 0x05);
        assert_eq!(layout.step_bits_for(AxisSet::EMPTY), 0);
    }
}
