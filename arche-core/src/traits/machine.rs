//! External machine collaborators consumed by the homing sequencer

/// Seam to the motion planner.
pub trait MotionSync {
    /// Block until every previously queued move has fully drained.
    ///
    /// Homing must not start while motion is still in flight.
    fn wait_idle(&mut self);
}

/// Seam to the stepper driver-enable hardware.
pub trait StepperDrive {
    /// Energize the step/direction outputs.
    fn enable(&mut self);
}
