use hftsim_core::Timestamp;
use hftsim_ports::Clock;
use log::warn;

/// Discrete simulation timeline
///
/// Owned by the scheduler. Time is moved forward explicitly as messages are
/// delivered; requests to move backwards are ignored so that every observer
/// sees a monotonic clock.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    current: Timestamp,
}

impl SimulationClock {
    pub fn new(start: Timestamp) -> Self {
        Self { current: start }
    }

    /// Move the clock to `time`
    ///
    /// Returns false (and leaves the clock untouched) if `time` is in the past.
    pub fn advance_to(&mut self, time: Timestamp) -> bool {
        if time < self.current {
            warn!(
                "Refusing to move simulation clock backwards ({} -> {})",
                self.current, time
            );
            return false;
        }
        self.current = time;
        true
    }
}

impl Clock for SimulationClock {
    fn now(&self) -> Timestamp {
        self.current
    }

    fn name(&self) -> &str {
        "SimulationClock"
    }
}
