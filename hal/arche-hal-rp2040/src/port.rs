//! GPIO-backed homing port
//!
//! The core addresses one 8-bit output port and one input port by bit
//! number; the RP2040 has no such parallel ports, so this builds them
//! from discrete GPIO lines. Bit *n* of the output word maps to
//! `outputs[n]`, bit *n* of the limit word to `limits[n]`, matching the
//! bit numbers in the machine's `PortLayout`.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use embassy_time::{block_for, Duration};

use arche_core::traits::{DelayUs, LimitPort, StepPort};

/// Exclusively owned step/direction/limit hardware handle.
///
/// `OUT` output lines carry step and direction, `IN` input lines carry
/// the limit switches. The homing loop holds this for all three passes;
/// nothing else touches the lines while homing runs.
pub struct HomingGpio<'d, const OUT: usize, const IN: usize> {
    outputs: [Output<'d>; OUT],
    limits: [Input<'d>; IN],
}

impl<'d, const OUT: usize, const IN: usize> HomingGpio<'d, OUT, IN> {
    /// Claim the GPIO lines and initialize the limit inputs.
    ///
    /// Output lines start low. `pull_up` enables the internal pull-ups on
    /// every limit input, for the usual normally-open switch to ground.
    pub fn new(
        output_pins: [Peri<'d, AnyPin>; OUT],
        limit_pins: [Peri<'d, AnyPin>; IN],
        pull_up: bool,
    ) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self {
            outputs: output_pins.map(|pin| Output::new(pin, Level::Low)),
            limits: limit_pins.map(|pin| Input::new(pin, pull)),
        }
    }
}

impl<const OUT: usize, const IN: usize> StepPort for HomingGpio<'_, OUT, IN> {
    fn write_masked(&mut self, mask: u8, bits: u8) {
        for (n, line) in self.outputs.iter_mut().enumerate() {
            if mask & (1 << n) != 0 {
                line.set_level(Level::from(bits & (1 << n) != 0));
            }
        }
    }

    fn toggle(&mut self, bits: u8) {
        for (n, line) in self.outputs.iter_mut().enumerate() {
            if bits & (1 << n) != 0 {
                line.toggle();
            }
        }
    }
}

impl<const OUT: usize, const IN: usize> LimitPort for HomingGpio<'_, OUT, IN> {
    fn read(&self) -> u8 {
        let mut word = 0;
        for (n, line) in self.limits.iter().enumerate() {
            if line.is_high() {
                word |= 1 << n;
            }
        }
        word
    }
}

impl<const OUT: usize, const IN: usize> DelayUs for HomingGpio<'_, OUT, IN> {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
