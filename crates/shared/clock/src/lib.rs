//! hftsim Clock Infrastructure
//!
//! Time abstractions for the discrete-event simulator:
//!
//! - [`SimulationClock`]: the scheduler's timeline. It only moves when the
//!   scheduler delivers the next message, and never moves backwards.
//! - [`FixedClock`]: a frozen instant for unit tests.
//!
//! ## Usage
//!
//! ```ignore
//! use hftsim_clock::{Clock, SimulationClock};
//!
//! let mut clock = SimulationClock::new(0);
//! clock.advance_to(10);
//! assert_eq!(clock.now(), 10);
//! ```

mod fixed;
mod simulation;

pub use fixed::FixedClock;
pub use simulation::SimulationClock;

// Re-export the Clock trait for convenience
pub use hftsim_ports::Clock;
