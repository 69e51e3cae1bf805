//! hftsim Core Domain
//!
//! Pure value types shared by every participant of the simulator.
//! This crate contains no I/O and no scheduling logic.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{OrderDirection, OrderId};
pub use values::{Money, TimeDelta, Timestamp, Volume};
