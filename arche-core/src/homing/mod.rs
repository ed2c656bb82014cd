//! Homing cycle and sequencer
//!
//! A full homing run is three blocking constant-velocity passes: Z alone
//! toward its switch, then X/Y/C together, then one combined retreat off
//! the switches. It ends with machine zero committed to the position
//! vector. No failure states are modeled; every pass runs to completion
//! by construction of the pulse loop (see [`pulse::run_pass`] for the
//! never-triggering-switch caveat).

pub mod debounce;
pub mod pulse;

pub use debounce::{DebounceFilter, DEBOUNCE_SAMPLES};
pub use pulse::{run_pass, PassDirection, PulseTiming};

use crate::axis::{Axis, AxisSet};
use crate::config::{HomingSettings, PortLayout};
use crate::position::MachinePosition;
use crate::traits::{HomingPort, MotionSync, StepperDrive};

/// One homing cycle over a configured machine.
///
/// Borrows the settings and port layout; the hardware handle is passed
/// per call so that a single exclusively owned port serves all passes.
#[derive(Debug, Clone, Copy)]
pub struct HomingCycle<'a> {
    settings: &'a HomingSettings,
    layout: &'a PortLayout,
}

impl<'a> HomingCycle<'a> {
    pub fn new(settings: &'a HomingSettings, layout: &'a PortLayout) -> Self {
        Self { settings, layout }
    }

    fn timing(&self, rate: f32) -> PulseTiming {
        PulseTiming::from_rate(
            rate,
            self.settings.steps_per_mm[Axis::X.index()],
            self.settings.pulse_width_us,
        )
    }

    /// One fast pass toward the switches; blocks until every axis in
    /// `axes` has stopped on its own switch.
    pub fn approach<P: HomingPort>(&self, port: &mut P, axes: AxisSet) {
        run_pass(
            port,
            self.layout,
            &self.settings.invert,
            axes,
            PassDirection::Approach,
            self.timing(self.settings.seek_rate),
        );
    }

    /// One slow pass off the switches; blocks until every axis in `axes`
    /// has cleared its switch.
    pub fn retreat<P: HomingPort>(&self, port: &mut P, axes: AxisSet) {
        run_pass(
            port,
            self.layout,
            &self.settings.invert,
            axes,
            PassDirection::Retreat,
            self.timing(self.settings.feed_rate),
        );
    }

    /// Run the full homing sequence and commit machine zero.
    ///
    /// Strictly ordered, no branching on outcome:
    /// 1. drain in-flight motion and energize the drives,
    /// 2. approach with Z alone so the gantry clears the work area,
    /// 3. approach with X, Y and C together, each stopping independently,
    /// 4. retreat with every homed axis together,
    /// 5. zero the position of exactly the axes that took part.
    ///
    /// Blocking; no return value. The position write is the only side
    /// effect beyond the port itself.
    pub fn run_sequence<P, M, D>(
        &self,
        port: &mut P,
        planner: &mut M,
        drive: &mut D,
        position: &mut MachinePosition,
    ) where
        P: HomingPort,
        M: MotionSync,
        D: StepperDrive,
    {
        planner.wait_idle();
        drive.enable();

        let homed = self.settings.homed_axes;

        self.approach(port, homed.intersection(AxisSet::single(Axis::Z)));
        self.approach(port, homed.without(Axis::Z));
        self.retreat(port, homed);

        position.zero(homed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvertMasks;
    use crate::sim::{SimDrive, SimMachine, SimPlanner};

    fn settings(homed: AxisSet) -> HomingSettings {
        HomingSettings {
            homed_axes: homed,
            pulse_width_us: 10,
            ..HomingSettings::default()
        }
    }

    #[test]
    fn full_sequence_zeroes_only_participants() {
        let layout = PortLayout::default();
        let homed = AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z]);
        let settings = settings(homed);
        let cycle = HomingCycle::new(&settings, &layout);

        let mut machine = SimMachine::new(layout, InvertMasks::NONE, [20, 18, 5, 7]);
        let mut planner = SimPlanner::default();
        let mut drive = SimDrive::default();

        let mut position = MachinePosition::new();
        position.set(Axis::X, -3.0);
        position.set(Axis::Y, 44.0);
        position.set(Axis::C, 12.5);

        cycle.run_sequence(&mut machine, &mut planner, &mut drive, &mut position);

        assert_eq!(position.get(Axis::X), 0.0);
        assert_eq!(position.get(Axis::Y), 0.0);
        assert_eq!(position.get(Axis::Z), 0.0);
        assert_eq!(position.get(Axis::C), 12.5);

        assert_eq!(planner.wait_calls, 1);
        assert!(drive.enabled);
        assert_eq!(machine.pulses(Axis::C), 0);
    }

    #[test]
    fn sequence_leaves_all_switches_released() {
        let layout = PortLayout::default();
        let homed = AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z]);
        let settings = settings(homed);
        let cycle = HomingCycle::new(&settings, &layout);

        let mut machine = SimMachine::new(layout, InvertMasks::NONE, [20, 18, 5, 7]);
        let mut planner = SimPlanner::default();
        let mut drive = SimDrive::default();
        let mut position = MachinePosition::new();

        cycle.run_sequence(&mut machine, &mut planner, &mut drive, &mut position);

        for axis in homed {
            assert!(!machine.switch_pressed(axis), "{:?} still pressed", axis);
        }
    }

    #[test]
    fn z_finishes_before_horizontal_axes_start() {
        let layout = PortLayout::default();
        let homed = AxisSet::from_axes(&[Axis::X, Axis::Y, Axis::Z]);
        let settings = settings(homed);
        let cycle = HomingCycle::new(&settings, &layout);

        // Z travel 5 -> its approach emits 5 + 9 = 14 pulses before any
        // horizontal axis may move.
        let mut machine = SimMachine::new(layout, InvertMasks::NONE, [20, 18, 5, 7]);
        let mut planner = SimPlanner::default();
        let mut drive = SimDrive::default();
        let mut position = MachinePosition::new();

        cycle.run_sequence(&mut machine, &mut planner, &mut drive, &mut position);

        let z_first = machine.first_pulse_seq(Axis::Z).unwrap();
        let x_first = machine.first_pulse_seq(Axis::X).unwrap();
        let y_first = machine.first_pulse_seq(Axis::Y).unwrap();
        assert_eq!(z_first, 0);
        assert!(x_first >= 14);
        assert!(y_first >= 14);
    }

    #[test]
    fn axes_outside_config_are_never_pulsed() {
        let layout = PortLayout::default();
        let homed = AxisSet::single(Axis::Z);
        let settings = settings(homed);
        let cycle = HomingCycle::new(&settings, &layout);

        let mut machine = SimMachine::new(layout, InvertMasks::NONE, [20, 18, 5, 7]);
        let mut planner = SimPlanner::default();
        let mut drive = SimDrive::default();
        let mut position = MachinePosition::new();
        position.set(Axis::X, 9.0);

        cycle.run_sequence(&mut machine, &mut planner, &mut drive, &mut position);

        assert_eq!(machine.pulses(Axis::X), 0);
        assert_eq!(machine.pulses(Axis::Y), 0);
        assert_eq!(machine.pulses(Axis::C), 0);
        assert!(machine.pulses(Axis::Z) > 0);
        assert_eq!(position.get(Axis::X), 9.0);
        assert_eq!(position.get(Axis::Z), 0.0);
    }
}
