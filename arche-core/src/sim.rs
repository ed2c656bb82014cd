//! Simulated machine backend for host-side tests
//!
//! Implements the hardware seam traits over a small travel model: each
//! axis starts a configured number of steps away from its switch, every
//! completed step pulse moves it one step in the commanded direction,
//! and the switch reads pressed while the axis sits at or past the
//! trigger point. Raw line levels are generated consistent with the
//! configured invert masks (pull-up style wiring, normally-open switch),
//! so the corrected sense seen by the homing code matches a correctly
//! wired machine.
//!
//! Delays are recorded instead of slept, which keeps whole homing
//! sequences fast enough for unit tests.

use heapless::Vec;

use crate::axis::Axis;
use crate::config::{InvertMasks, PortLayout};
use crate::traits::{DelayUs, LimitPort, MotionSync, StepPort, StepperDrive};

/// Capacity of the recorded delay log
const DELAY_LOG_CAP: usize = 512;

/// Capacity of the recorded direction-write log
const DIR_LOG_CAP: usize = 16;

/// Simulated step/direction/limit hardware.
pub struct SimMachine {
    layout: PortLayout,
    invert: InvertMasks,
    /// Output latch of the step/direction port
    port: u8,
    /// Steps to the switch trigger point per axis; <= 0 reads pressed
    travel: [i32; Axis::COUNT],
    /// Completed step pulses per axis
    pulses: [u32; Axis::COUNT],
    /// Global pulse sequence number at each axis's first pulse
    first_seq: [Option<u32>; Axis::COUNT],
    seq: u32,
    delays: Vec<u32, DELAY_LOG_CAP>,
    dir_writes: Vec<u8, DIR_LOG_CAP>,
}

impl SimMachine {
    /// New machine with each axis `travel[i]` steps from its switch.
    ///
    /// Negative travel starts an axis already pressed into its switch,
    /// as an approach pass leaves it.
    pub fn new(layout: PortLayout, invert: InvertMasks, travel: [i32; Axis::COUNT]) -> Self {
        Self {
            layout,
            invert,
            port: 0,
            travel,
            pulses: [0; Axis::COUNT],
            first_seq: [None; Axis::COUNT],
            seq: 0,
            delays: Vec::new(),
            dir_writes: Vec::new(),
        }
    }

    /// Completed step pulses on one axis
    pub fn pulses(&self, axis: Axis) -> u32 {
        self.pulses[axis.index()]
    }

    /// Global pulse sequence number of the axis's first pulse, if any
    pub fn first_pulse_seq(&self, axis: Axis) -> Option<u32> {
        self.first_seq[axis.index()]
    }

    /// Whether the axis currently sits on its switch
    pub fn switch_pressed(&self, axis: Axis) -> bool {
        self.travel[axis.index()] <= 0
    }

    /// Recorded delay durations, in call order
    pub fn delays(&self) -> &[u32] {
        &self.delays
    }

    /// Recorded direction-line states after each masked direction write
    pub fn dir_writes(&self) -> &[u8] {
        &self.dir_writes
    }

    /// Whether the commanded direction on `axis` points toward its switch
    fn moving_toward_switch(&self, axis: Axis) -> bool {
        let line_high = self.port & self.layout.dir_bit(axis) != 0;
        let inverted = self.invert.step_dir & self.layout.dir_bit(axis) != 0;
        line_high ^ inverted
    }
}

impl StepPort for SimMachine {
    fn write_masked(&mut self, mask: u8, bits: u8) {
        self.port = (self.port & !mask) | (bits & mask);
        if mask & self.layout.dir_mask() != 0 {
            let _ = self.dir_writes.push(self.port & self.layout.dir_mask());
        }
    }

    fn toggle(&mut self, bits: u8) {
        self.port ^= bits;
        for axis in Axis::ALL {
            if bits & self.layout.step_bit(axis) == 0 {
                continue;
            }
            // A toggled step line completes one pulse: move the axis.
            self.pulses[axis.index()] += 1;
            if self.first_seq[axis.index()].is_none() {
                self.first_seq[axis.index()] = Some(self.seq);
            }
            self.seq += 1;
            if self.moving_toward_switch(axis) {
                self.travel[axis.index()] -= 1;
            } else {
                self.travel[axis.index()] += 1;
            }
        }
    }
}

impl LimitPort for SimMachine {
    fn read(&self) -> u8 {
        let mut raw = 0;
        for axis in Axis::ALL {
            let inverted = self.invert.limit & self.layout.limit_bit(axis) != 0;
            // Pull-up wiring: the line rests high and a pressed switch
            // pulls it to the level the invert mask maps to logic low.
            let level = if self.switch_pressed(axis) {
                inverted
            } else {
                !inverted
            };
            if level {
                raw |= self.layout.limit_bit(axis);
            }
        }
        raw
    }
}

impl DelayUs for SimMachine {
    fn delay_us(&mut self, us: u32) {
        let _ = self.delays.push(us);
    }
}

/// Motion-planner stand-in that counts drain requests.
#[derive(Debug, Default)]
pub struct SimPlanner {
    pub wait_calls: u32,
}

impl MotionSync for SimPlanner {
    fn wait_idle(&mut self) {
        self.wait_calls += 1;
    }
}

/// Driver-enable stand-in that latches the enabled state.
#[derive(Debug, Default)]
pub struct SimDrive {
    pub enabled: bool,
}

impl StepperDrive for SimDrive {
    fn enable(&mut self) {
        self.enabled = true;
    }
}
