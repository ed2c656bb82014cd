//! Stepper driver-enable line

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;

use arche_core::traits::StepperDrive;

/// A single enable line shared by all stepper drivers.
///
/// Most driver boards use an active-low enable, so the polarity is
/// configurable.
pub struct EnableLine<'d> {
    line: Output<'d>,
    active_low: bool,
}

impl<'d> EnableLine<'d> {
    /// Claim the enable pin, starting with the drivers disabled.
    pub fn new(pin: Peri<'d, AnyPin>, active_low: bool) -> Self {
        let idle = if active_low { Level::High } else { Level::Low };
        Self {
            line: Output::new(pin, idle),
            active_low,
        }
    }

    /// De-energize the drivers.
    pub fn disable(&mut self) {
        if self.active_low {
            self.line.set_high();
        } else {
            self.line.set_low();
        }
    }
}

impl StepperDrive for EnableLine<'_> {
    fn enable(&mut self) {
        if self.active_low {
            self.line.set_low();
        } else {
            self.line.set_high();
        }
    }
}
