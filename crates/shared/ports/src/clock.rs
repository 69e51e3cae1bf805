use hftsim_core::Timestamp;

/// Port for time abstraction
///
/// The simulator runs on a discrete timeline, so implementations range from
/// the scheduler's own event clock to a fixed instant in unit tests.
pub trait Clock {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
