//! Event Scheduler - timestamp-ordered message delivery
//!
//! Owns the simulation timeline and every registered agent:
//! - Queues messages by (arrival time, dispatch sequence), so messages with
//!   the same arrival are delivered in the order they were dispatched
//! - Advances the clock to each message's arrival before delivering it
//! - Journals every dispatched message
//! - Keeps messages whose destination is not a registered agent

use crate::error::{Result, RunnerError};
use hftsim_agents::Agent;
use hftsim_clock::SimulationClock;
use hftsim_core::{TimeDelta, Timestamp};
use hftsim_ports::{Clock, Message, MessagePayload, Simulation};
use log::{debug, info, trace, warn};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Source name used for lifecycle broadcasts
pub const SIMULATION_NAME: &str = "SIMULATION";

/// Queue ordering key: earliest arrival first, then dispatch order
type QueueKey = Reverse<(Timestamp, u64)>;

/// Timeline and message queue, handed to agents as their [`Simulation`]
struct Timeline {
    clock: SimulationClock,
    queue: PriorityQueue<u64, QueueKey>,
    messages: HashMap<u64, Message>,
    next_sequence: u64,
    journal: Vec<Message>,
}

impl Timeline {
    fn new(start: Timestamp) -> Self {
        Self {
            clock: SimulationClock::new(start),
            queue: PriorityQueue::new(),
            messages: HashMap::new(),
            next_sequence: 0,
            journal: Vec::new(),
        }
    }

    fn next_arrival(&self) -> Option<Timestamp> {
        self.queue.peek().map(|(_, Reverse((arrival, _)))| *arrival)
    }

    fn pop(&mut self) -> Option<Message> {
        let (sequence, _) = self.queue.pop()?;
        self.messages.remove(&sequence)
    }
}

impl Clock for Timeline {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn name(&self) -> &str {
        self.clock.name()
    }
}

impl Simulation for Timeline {
    fn dispatch_message(
        &mut self,
        occurrence: Timestamp,
        delay: TimeDelta,
        source: &str,
        destination: &str,
        payload: MessagePayload,
    ) {
        // Never schedule into the past
        let arrival = occurrence.saturating_add(delay).max(self.clock.now());
        let message = Message::new(occurrence, arrival, source, destination, payload);
        trace!(
            "dispatch t={} -> t={} {} -> {}: {}",
            occurrence,
            arrival,
            source,
            destination,
            message.kind()
        );

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.journal.push(message.clone());
        self.messages.insert(sequence, message);
        self.queue.push(sequence, Reverse((arrival, sequence)));
    }
}

/// Summary of a finished (or paused) run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    /// Simulation time when the run returned
    pub end_time: Timestamp,
    /// Messages delivered to agents
    pub delivered: u64,
    /// Messages addressed to names without a registered agent
    pub undelivered: u64,
    /// Messages still queued
    pub pending: usize,
    /// Dispatched messages per kind
    pub messages_by_kind: BTreeMap<String, u64>,
}

/// Discrete-event scheduler driving a set of agents
pub struct EventScheduler {
    timeline: Timeline,
    agents: Vec<Box<dyn Agent>>,
    agent_index: HashMap<String, usize>,
    delivered: u64,
    undelivered: Vec<Message>,
    event_limit: Option<u64>,
}

impl EventScheduler {
    /// Create an empty scheduler whose clock starts at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            timeline: Timeline::new(start),
            agents: Vec::new(),
            agent_index: HashMap::new(),
            delivered: 0,
            undelivered: Vec::new(),
            event_limit: None,
        }
    }

    /// Cap the messages handled (delivered or undelivered) over the whole run
    ///
    /// A zero re-arm interval keeps an agent waking at the same instant, so
    /// the clock never reaches the horizon on its own.
    pub fn with_event_limit(mut self, limit: u64) -> Self {
        self.event_limit = Some(limit);
        self
    }

    /// Register an agent under its own name
    pub fn register_agent(&mut self, agent: Box<dyn Agent>) -> Result<()> {
        let name = agent.name().to_string();
        if self.agent_index.contains_key(&name) {
            return Err(RunnerError::DuplicateAgent(name));
        }
        debug!("Registered {} '{}'", agent.agent_type(), name);
        self.agent_index.insert(name, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    pub fn agent(&self, name: &str) -> Option<&dyn Agent> {
        self.agent_index
            .get(name)
            .map(|&i| self.agents[i].as_ref())
    }

    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(|a| a.name())
    }

    pub fn now(&self) -> Timestamp {
        self.timeline.now()
    }

    /// Number of queued messages
    pub fn pending(&self) -> usize {
        self.timeline.queue.len()
    }

    /// Every message dispatched so far, in dispatch order
    pub fn journal(&self) -> &[Message] {
        &self.timeline.journal
    }

    /// Messages taken off the queue so far, delivered or not
    pub fn handled(&self) -> u64 {
        self.delivered + self.undelivered.len() as u64
    }

    /// Delivered messages whose destination had no registered agent
    pub fn undelivered(&self) -> &[Message] {
        &self.undelivered
    }

    /// Queue a message from outside the simulation (e.g. a venue stub)
    pub fn dispatch(
        &mut self,
        delay: TimeDelta,
        source: &str,
        destination: &str,
        payload: MessagePayload,
    ) {
        let now = self.timeline.now();
        self.timeline
            .dispatch_message(now, delay, source, destination, payload);
    }

    /// Queue `EVENT_SIMULATION_START` for every registered agent
    pub fn start(&mut self) {
        info!(
            "Starting simulation at t={} with {} agent(s)",
            self.now(),
            self.agents.len()
        );
        let names: Vec<String> = self.agent_names().map(str::to_string).collect();
        for name in names {
            self.dispatch(0, SIMULATION_NAME, &name, MessagePayload::SimulationStart);
        }
    }

    /// Deliver `EVENT_SIMULATION_STOP` to every agent immediately
    pub fn stop(&mut self) {
        let now = self.now();
        info!("Stopping simulation at t={}", now);
        for agent in self.agents.iter_mut() {
            let message = Message::new(
                now,
                now,
                SIMULATION_NAME,
                agent.name(),
                MessagePayload::SimulationStop,
            );
            agent.receive_message(&mut self.timeline, &message);
        }
    }

    /// Deliver the next queued message; returns it, or None if the queue is empty
    pub fn step(&mut self) -> Option<Message> {
        let message = self.timeline.pop()?;
        self.timeline.clock.advance_to(message.arrival);

        match self.agent_index.get(&message.destination) {
            Some(&index) => {
                trace!(
                    "deliver t={} {} -> {}: {}",
                    message.arrival,
                    message.source,
                    message.destination,
                    message.kind()
                );
                self.agents[index].receive_message(&mut self.timeline, &message);
                self.delivered += 1;
            }
            None => {
                debug!(
                    "No agent named '{}' for {} from {}",
                    message.destination,
                    message.kind(),
                    message.source
                );
                self.undelivered.push(message.clone());
            }
        }
        Some(message)
    }

    /// Deliver every message arriving at or before `end`
    ///
    /// Returns the number of messages handled. The clock ends at `end` even
    /// if the queue ran dry earlier, unless the event limit cut the run short.
    pub fn run_until(&mut self, end: Timestamp) -> u64 {
        let mut handled = 0;
        while let Some(arrival) = self.timeline.next_arrival() {
            if arrival > end {
                break;
            }
            if let Some(limit) = self.event_limit.filter(|&limit| self.handled() >= limit) {
                warn!(
                    "Event limit of {} reached at t={}, {} message(s) still queued",
                    limit,
                    self.now(),
                    self.pending()
                );
                return handled;
            }
            self.step();
            handled += 1;
        }
        self.timeline.clock.advance_to(end);
        handled
    }

    pub fn summary(&self) -> SimulationSummary {
        let mut messages_by_kind = BTreeMap::new();
        for message in &self.timeline.journal {
            *messages_by_kind
                .entry(message.kind().to_string())
                .or_insert(0) += 1;
        }
        SimulationSummary {
            end_time: self.now(),
            delivered: self.delivered,
            undelivered: self.undelivered.len() as u64,
            pending: self.pending(),
            messages_by_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hftsim_agents::AgentAttributes;
    use hftsim_ports::{ConfigResult, ParameterProcessor};

    /// Answers a start with two pings to itself and one to a venue
    struct Echo {
        name: String,
    }

    impl Echo {
        fn boxed(name: &str) -> Box<dyn Agent> {
            Box::new(Echo {
                name: name.to_string(),
            })
        }
    }

    impl Agent for Echo {
        fn name(&self) -> &str {
            &self.name
        }

        fn configure(
            &mut self,
            _attributes: &AgentAttributes,
            _parameters: &dyn ParameterProcessor,
        ) -> ConfigResult<()> {
            Ok(())
        }

        fn receive_message(&mut self, simulation: &mut dyn Simulation, message: &Message) {
            if message.payload == MessagePayload::SimulationStart {
                let now = simulation.now();
                let name = self.name.as_str();
                simulation.dispatch_message(now, 5, name, name, MessagePayload::other("B"));
                simulation.dispatch_message(now, 5, name, name, MessagePayload::other("A"));
                simulation.dispatch_message(now, 1, name, "VENUE", MessagePayload::other("C"));
            }
        }

        fn agent_type(&self) -> &'static str {
            "Echo"
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut scheduler = EventScheduler::new(0);
        scheduler.register_agent(Echo::boxed("E")).unwrap();
        let err = scheduler.register_agent(Echo::boxed("E")).unwrap_err();
        assert!(matches!(err, RunnerError::DuplicateAgent(name) if name == "E"));
    }

    #[test]
    fn test_delivery_order_and_clock() {
        let mut scheduler = EventScheduler::new(100);
        scheduler.register_agent(Echo::boxed("E")).unwrap();
        scheduler.start();

        let first = scheduler.step().unwrap();
        assert_eq!(first.kind(), "EVENT_SIMULATION_START");
        assert_eq!(scheduler.now(), 100);

        let second = scheduler.step().unwrap();
        assert_eq!(second.kind(), "C");
        assert_eq!(scheduler.now(), 101);

        // Same arrival: dispatch order wins
        assert_eq!(scheduler.step().unwrap().kind(), "B");
        assert_eq!(scheduler.step().unwrap().kind(), "A");
        assert_eq!(scheduler.now(), 105);
        assert!(scheduler.step().is_none());
    }

    #[test]
    fn test_unknown_destination_is_kept() {
        let mut scheduler = EventScheduler::new(0);
        scheduler.register_agent(Echo::boxed("E")).unwrap();
        scheduler.start();
        scheduler.run_until(10);

        assert_eq!(scheduler.undelivered().len(), 1);
        assert_eq!(scheduler.undelivered()[0].destination, "VENUE");

        let summary = scheduler.summary();
        assert_eq!(summary.delivered, 3);
        assert_eq!(summary.undelivered, 1);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.end_time, 10);
        assert_eq!(summary.messages_by_kind.get("EVENT_SIMULATION_START"), Some(&1));
    }

    #[test]
    fn test_run_until_stops_at_horizon() {
        let mut scheduler = EventScheduler::new(0);
        scheduler.register_agent(Echo::boxed("E")).unwrap();
        scheduler.start();

        let handled = scheduler.run_until(3);
        assert_eq!(handled, 2); // start + C
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.now(), 3);
    }

    #[test]
    fn test_event_limit_stops_run() {
        let mut scheduler = EventScheduler::new(0).with_event_limit(2);
        scheduler.register_agent(Echo::boxed("E")).unwrap();
        scheduler.start();

        assert_eq!(scheduler.run_until(100), 2);
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.now(), 1);

        // The budget spans calls, and undelivered messages count against it
        assert_eq!(scheduler.run_until(200), 0);
        assert_eq!(scheduler.handled(), 2);
        assert_eq!(scheduler.undelivered().len(), 1);
    }

    #[test]
    fn test_dispatch_never_schedules_in_the_past() {
        let mut scheduler = EventScheduler::new(50);
        scheduler.timeline.dispatch_message(10, 0, "X", "Y", MessagePayload::other("LATE"));
        let message = scheduler.step().unwrap();
        assert_eq!(message.arrival, 50);
        assert_eq!(message.occurrence, 10);
    }
}
