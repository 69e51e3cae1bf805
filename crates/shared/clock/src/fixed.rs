use hftsim_core::Timestamp;
use hftsim_ports::Clock;

/// Clock frozen at a single instant
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
