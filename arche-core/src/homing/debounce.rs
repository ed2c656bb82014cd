//! Per-axis limit-input debounce filter

/// Consecutive inactive samples required before an axis stops.
///
/// The filter runs at the pulse cadence, so this threshold is a
/// sampling-rate-dependent low-pass against electrical bounce. It is a
/// fixed calibrated constant on purpose, not derived from the pulse
/// timing: deriving it would silently change the filter's behavior
/// whenever the feed rates change.
pub const DEBOUNCE_SAMPLES: u8 = 10;

/// Debounced stop detection for one axis.
///
/// Counts consecutive samples in which the corrected limit line (after
/// the pass reversal and the global invert mask) read *inactive*; any
/// *active* sample resets the count. The axis stops once the count
/// reaches [`DEBOUNCE_SAMPLES`].
///
/// Note the inverted sense: the invert mask maps the wiring so that the
/// line rests active and falls inactive as the switch engages, making
/// this a plain sustained-level filter rather than a debounce-on-trigger
/// design. The contract is deliberate and must not be "fixed".
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    inactive_count: u8,
}

impl DebounceFilter {
    /// Filter with the count at zero
    pub const fn new() -> Self {
        Self { inactive_count: 0 }
    }

    /// Feed one sample of the corrected limit line.
    ///
    /// Returns true once the axis should stop. Evaluated once per
    /// pulse-loop iteration, never at a separate sampling rate.
    pub fn sample(&mut self, line_active: bool) -> bool {
        if line_active {
            self.inactive_count = 0;
        } else {
            self.inactive_count = self.inactive_count.saturating_add(1);
        }
        self.inactive_count >= DEBOUNCE_SAMPLES
    }

    /// Current run length of inactive samples
    pub const fn count(&self) -> u8 {
        self.inactive_count
    }
}
