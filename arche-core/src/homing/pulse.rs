//! Homing pulse generator
//!
//! Drives the step and direction lines for a set of axes at a fixed
//! cadence until every axis has been stopped by its debounce filter.

use crate::axis::{Axis, AxisSet};
use crate::config::{InvertMasks, PortLayout};
use crate::traits::HomingPort;

use super::debounce::DebounceFilter;

/// Direction of one homing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PassDirection {
    /// Toward the limit switches
    Approach,
    /// Off the limit switches after triggering
    Retreat,
}

/// Timing of one step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    /// Full step period in microseconds (assert time + rest time)
    pub period_us: u32,
    /// Step pulse assert time in microseconds
    pub pulse_us: u32,
}

impl PulseTiming {
    /// Convert a rate in length units per minute into a per-step period.
    ///
    /// `steps_per_mm_x` is the X axis resolution, used as representative
    /// for the whole machine: usually all axes share a resolution, and
    /// when they don't, X/Y have the least. The least-resolution axis is
    /// the slowest-stepping one, so timing off it never drives any axis
    /// past its mechanical limit.
    pub fn from_rate(rate: f32, steps_per_mm_x: f32, pulse_us: u32) -> Self {
        let period_us = ((60.0 / (rate * steps_per_mm_x)) * 1_000_000.0) as u32;
        Self {
            period_us,
            pulse_us,
        }
    }
}

/// Run one directional pass over `axes` until every one of them has
/// stopped on its switch.
///
/// Per loop iteration, each still-active axis gets its limit line
/// sampled through its [`DebounceFilter`] and, if it stays active,
/// exactly one step pulse. An axis whose filter signals stop is dropped
/// from the set before the pulse, so it receives no further edges.
///
/// Blocks until done. There is deliberately no timeout: a switch that
/// never reports leaves this loop running forever. Homing travel is
/// bounded by the physical axis length, not by the algorithm, and a
/// timeout policy is out of contract here.
pub fn run_pass<P: HomingPort>(
    port: &mut P,
    layout: &PortLayout,
    invert: &InvertMasks,
    mut axes: AxisSet,
    direction: PassDirection,
    timing: PulseTiming,
) {
    let rest_us = timing.period_us.saturating_sub(timing.pulse_us);

    let mut out_bits = layout.dir_mask() | layout.step_bits_for(axes);
    if direction == PassDirection::Retreat {
        out_bits ^= layout.dir_mask();
    }
    out_bits ^= invert.step_dir;

    // Masked write, not OR: direction lines may see 1 -> 0 transitions
    // here, e.g. on a retreat pass.
    port.write_masked(layout.dir_mask(), out_bits);

    let mut filters = [DebounceFilter::new(); Axis::COUNT];

    loop {
        let mut limit_bits = port.read();
        if direction == PassDirection::Retreat {
            // Moving off the switches: the previously triggered sense is
            // now the resting sense. Layered before the global mask.
            limit_bits ^= layout.limit_mask();
        }
        limit_bits ^= invert.limit;

        for axis in Axis::ALL {
            if !axes.contains(axis) {
                continue;
            }
            let line_active = limit_bits & layout.limit_bit(axis) != 0;
            if filters[axis.index()].sample(line_active) {
                axes.remove(axis);
                // Toggle rather than clear: with an inverted step line
                // the idle polarity is high.
                out_bits ^= layout.step_bit(axis);
            }
        }

        if axes.is_empty() {
            return;
        }

        port.write_masked(layout.step_mask(), out_bits);
        port.delay_us(timing.pulse_us);
        // End the pulse by toggling the asserted lines. Writing zero
        // would pick the wrong polarity on inverted step wiring.
        port.toggle(out_bits & layout.step_mask());
        port.delay_us(rest_us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimMachine;

    const TIMING: PulseTiming = PulseTiming {
        period_us: 100,
        pulse_us: 10,
    };

    fn sim(travel: [i32; 4]) -> SimMachine {
        SimMachine::new(PortLayout::default(), InvertMasks::NONE, travel)
    }

    #[test]
    fn period_follows_rate_formula() {
        // 100 units/min at 80 steps/mm -> (60 / 8000) * 1e6 = 7500 us
        let timing = PulseTiming::from_rate(100.0, 80.0, 10);
        assert_eq!(timing.period_us, 7500);
        assert_eq!(timing.pulse_us, 10);
    }

    #[test]
    fn every_subset_stops_its_axes_and_pulses_no_others() {
        let layout = PortLayout::default();
        let travel = [5, 7, 3, 9];

        for bits in 0u8..16 {
            let mut axes = AxisSet::EMPTY;
            for axis in Axis::ALL {
                if bits & (1 << axis.index()) != 0 {
                    axes.insert(axis);
                }
            }

            let mut machine = sim(travel);
            run_pass(
                &mut machine,
                &layout,
                &InvertMasks::NONE,
                axes,
                PassDirection::Approach,
                TIMING,
            );

            for axis in Axis::ALL {
                if axes.contains(axis) {
                    // Sample-then-pulse ordering: distance d plus the 9
                    // pulses emitted while the filter settles.
                    let expected = travel[axis.index()] as u32 + 9;
                    assert_eq!(machine.pulses(axis), expected);
                    assert!(machine.switch_pressed(axis));
                } else {
                    assert_eq!(machine.pulses(axis), 0);
                }
            }
        }
    }

    #[test]
    fn direction_bits_independent_of_active_axes() {
        let layout = PortLayout::default();
        let invert = InvertMasks {
            step_dir: 0b0101_0000, // X and Z direction lines inverted
            limit: 0,
        };

        for axes in [
            AxisSet::single(Axis::X),
            AxisSet::single(Axis::X).with(Axis::Z),
            AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z, Axis::C]),
        ] {
            let mut machine = SimMachine::new(layout, invert, [4, 4, 4, 4]);
            run_pass(
                &mut machine,
                &layout,
                &invert,
                axes,
                PassDirection::Approach,
                TIMING,
            );
            assert_eq!(
                machine.dir_writes()[0],
                (layout.dir_mask() ^ invert.step_dir) & layout.dir_mask()
            );

            let mut machine = SimMachine::new(layout, invert, [-9, -9, -9, -9]);
            run_pass(
                &mut machine,
                &layout,
                &invert,
                axes,
                PassDirection::Retreat,
                TIMING,
            );
            assert_eq!(
                machine.dir_writes()[0],
                invert.step_dir & layout.dir_mask()
            );
        }
    }

    #[test]
    fn pulse_and_rest_delays_match_timing() {
        let timing = PulseTiming::from_rate(100.0, 80.0, 10);
        let mut machine = sim([3, 0, 0, 0]);
        run_pass(
            &mut machine,
            &PortLayout::default(),
            &InvertMasks::NONE,
            AxisSet::single(Axis::X),
            PassDirection::Approach,
            timing,
        );

        // One pulse per iteration: 3 steps of travel + 9 while settling.
        let delays = machine.delays();
        assert_eq!(delays.len(), 2 * 12);
        for pair in delays.chunks(2) {
            assert_eq!(pair, &[10, 7490][..]);
        }
    }

    #[test]
    fn empty_set_emits_no_pulses() {
        let mut machine = sim([5, 5, 5, 5]);
        run_pass(
            &mut machine,
            &PortLayout::default(),
            &InvertMasks::NONE,
            AxisSet::EMPTY,
            PassDirection::Approach,
            TIMING,
        );
        for axis in Axis::ALL {
            assert_eq!(machine.pulses(axis), 0);
        }
        assert!(machine.delays().is_empty());
    }

    #[test]
    fn retreat_moves_off_the_switch() {
        // Approach leaves an axis 9 steps past the trigger point; a
        // retreat pass backs it off until the line has rested quiet for
        // the full filter run.
        let mut machine = sim([-9, 0, 0, 0]);
        run_pass(
            &mut machine,
            &PortLayout::default(),
            &InvertMasks::NONE,
            AxisSet::single(Axis::X),
            PassDirection::Retreat,
            TIMING,
        );
        assert!(!machine.switch_pressed(Axis::X));
        assert_eq!(machine.pulses(Axis::X), 19);
    }

    #[test]
    fn limit_invert_mask_is_transparent_to_behavior() {
        // The sim models wiring consistent with whatever mask it is
        // given, so a pass under an inverted limit port must behave
        // identically to the uninverted one.
        let layout = PortLayout::default();
        let inverted = InvertMasks {
            step_dir: 0,
            limit: layout.limit_mask(),
        };

        let mut plain = SimMachine::new(layout, InvertMasks::NONE, [6, 2, 4, 8]);
        let mut flipped = SimMachine::new(layout, inverted, [6, 2, 4, 8]);
        let axes = AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z, Axis::C]);

        run_pass(
            &mut plain,
            &layout,
            &InvertMasks::NONE,
            axes,
            PassDirection::Approach,
            TIMING,
        );
        run_pass(
            &mut flipped,
            &layout,
            &inverted,
            axes,
            PassDirection::Approach,
            TIMING,
        );

        for axis in Axis::ALL {
            assert_eq!(plain.pulses(axis), flipped.pulses(axis));
        }
    }
}
