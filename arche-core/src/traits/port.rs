//! Port-level hardware seam for the pulse generator
//!
//! The pulse generator owns one handle exclusively for the duration of a
//! whole homing sequence; every register access goes through it.

/// Step/direction output port.
///
/// Implementations drive the physical step and direction lines addressed
/// by the bit positions in [`crate::config::PortLayout`].
pub trait StepPort {
    /// Replace exactly the lines selected by `mask` with the matching bits
    /// of `bits`. Lines outside `mask` must be left untouched.
    fn write_masked(&mut self, mask: u8, bits: u8);

    /// Invert every line whose bit is set in `bits`.
    ///
    /// De-asserting a step pulse must go through this rather than a write
    /// of zero: with an inverted step line either polarity can be the
    /// idle one.
    fn toggle(&mut self, bits: u8);
}

/// Limit-switch input port.
pub trait LimitPort {
    /// Sample the raw limit lines, one bit per switch, uncorrected for
    /// wiring polarity.
    fn read(&self) -> u8;
}

/// Blocking microsecond delay.
///
/// Implementations busy-wait or hardware-time the delay; the pulse loop
/// depends on these holds being honored with microsecond-level precision.
pub trait DelayUs {
    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);
}

/// Everything the pulse generator needs from the machine, as one bound.
pub trait HomingPort: StepPort + LimitPort + DelayUs {}

// Blanket implementation for types that implement all three traits
impl<T: StepPort + LimitPort + DelayUs> HomingPort for T {}
