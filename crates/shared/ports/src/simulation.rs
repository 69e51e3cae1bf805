use hftsim_core::{TimeDelta, Timestamp};

use crate::{Clock, messages::MessagePayload};

/// Capability handed to a participant for the duration of one delivery
///
/// Gives access to the current simulation time (through [`Clock`]) and to the
/// scheduler's dispatch primitive. Dispatch is fire-and-forget: there is no
/// return value and no delivery confirmation.
///
/// Implementations must deliver messages that share a destination and an
/// arrival time in the order they were dispatched.
pub trait Simulation: Clock {
    /// Schedule `payload` for delivery to `destination` at `occurrence + delay`
    fn dispatch_message(
        &mut self,
        occurrence: Timestamp,
        delay: TimeDelta,
        source: &str,
        destination: &str,
        payload: MessagePayload,
    );
}
