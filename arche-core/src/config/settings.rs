//! Homing settings

use crate::axis::{Axis, AxisSet};

/// Wiring-polarity reconciliation masks, applied by XOR.
///
/// Each mask flips the electrical sense of the lines whose bits are set,
/// mapping physical wiring onto the logical meaning the homing code works
/// with. XOR is an involution: applying the same mask twice is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvertMasks {
    /// Applied to the step/direction output word before it is driven
    pub step_dir: u8,
    /// Applied to the sampled limit-input word
    pub limit: u8,
}

impl InvertMasks {
    /// No inversion on any line
    pub const NONE: InvertMasks = InvertMasks {
        step_dir: 0,
        limit: 0,
    };
}

/// Configuration for the homing sequence.
///
/// Fixed at build/config time; the homing code never writes these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomingSettings {
    /// Step resolution per axis, steps per length unit.
    ///
    /// The X entry doubles as the representative resolution for pulse
    /// timing, see [`crate::homing::PulseTiming::from_rate`].
    pub steps_per_mm: [f32; Axis::COUNT],
    /// Step pulse assert time in microseconds
    pub pulse_width_us: u32,
    /// Approach-pass rate toward the switches, length units per minute
    pub seek_rate: f32,
    /// Retreat-pass rate off the switches, length units per minute
    pub feed_rate: f32,
    /// Wiring polarity masks
    pub invert: InvertMasks,
    /// Axes that take part in homing
    pub homed_axes: AxisSet,
    /// Enable internal pull-ups on the limit inputs
    pub limit_pullup: bool,
}

impl Default for HomingSettings {
    fn default() -> Self {
        Self {
            steps_per_mm: [250.0, 250.0, 250.0, 250.0],
            pulse_width_us: 30,
            seek_rate: 480.0,
            feed_rate: 120.0,
            invert: InvertMasks::NONE,
            homed_axes: AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z]),
            limit_pullup: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_mask_is_involution() {
        let masks = InvertMasks {
            step_dir: 0b1010_0110,
            limit: 0b0000_1001,
        };
        let word = 0b0101_1100u8;
        assert_eq!(word ^ masks.step_dir ^ masks.step_dir, word);
        assert_eq!(word ^ masks.limit ^ masks.limit, word);
    }

    #[test]
    fn default_is_sane() {
        let settings = HomingSettings::default();
        assert!(settings.seek_rate > settings.feed_rate);
        assert!(settings.pulse_width_us > 0);
        assert!(settings.homed_axes.contains(Axis::Z));
        assert!(!settings.homed_axes.contains(Axis::C));
        for steps in settings.steps_per_mm {
            assert!(steps > 0.0);
        }
    }
}
