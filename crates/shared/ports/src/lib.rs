//! hftsim Ports
//!
//! Port definitions (traits) for the hftsim market simulator.
//! These define the boundaries between participants and the host that
//! schedules them, plus the message contract exchanged across them.

mod clock;
mod error;
pub mod messages;
mod parameters;
mod simulation;

pub use clock::Clock;
pub use error::{ConfigError, ConfigResult};
pub use messages::{
    CancelOrdersCancellation, CancelOrdersPayload, Message, MessagePayload,
    PlaceOrderLimitPayload,
};
pub use parameters::{NoSubstitution, ParameterProcessor};
pub use simulation::Simulation;
