//! Test doubles for driving agents without a scheduler

use hftsim_clock::FixedClock;
use hftsim_core::{TimeDelta, Timestamp};
use hftsim_ports::{Clock, Message, MessagePayload, Simulation};

/// Simulation capability that records every dispatch instead of delivering it
pub struct RecordingSimulation {
    clock: FixedClock,
    pub dispatched: Vec<Message>,
}

impl RecordingSimulation {
    pub fn at(time: Timestamp) -> Self {
        Self {
            clock: FixedClock(time),
            dispatched: Vec::new(),
        }
    }

    /// Message as delivered by the scheduler at the current time
    pub fn delivery(&self, source: &str, destination: &str, payload: MessagePayload) -> Message {
        let now = self.clock.now();
        Message::new(now, now, source, destination, payload)
    }

    pub fn sent_to<'a>(&'a self, destination: &'a str) -> impl Iterator<Item = &'a Message> {
        self.dispatched
            .iter()
            .filter(move |m| m.destination == destination)
    }

    pub fn clear(&mut self) {
        self.dispatched.clear();
    }
}

impl Clock for RecordingSimulation {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl Simulation for RecordingSimulation {
    fn dispatch_message(
        &mut self,
        occurrence: Timestamp,
        delay: TimeDelta,
        source: &str,
        destination: &str,
        payload: MessagePayload,
    ) {
        self.dispatched.push(Message::new(
            occurrence,
            occurrence + delay,
            source,
            destination,
            payload,
        ));
    }
}
