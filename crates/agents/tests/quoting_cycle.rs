//! Integration test: market maker quoting cycle
//!
//! Drives a market maker through many cycles by feeding its own wake-ups
//! back to it, the way a scheduler would:
//! 1. Simulation start bootstraps an immediate wake-up
//! 2. Every wake-up quotes a sell/buy pair and re-arms one interval later
//! 3. A rolling mean without signal stops the chain

use hftsim_agents::{Agent, AgentAttributes, AgentStatus, MarketMakerAgent};
use hftsim_clock::SimulationClock;
use hftsim_core::{OrderDirection, TimeDelta, Timestamp};
use hftsim_ports::{Clock, Message, MessagePayload, NoSubstitution, Simulation};
use rust_decimal_macros::dec;
use std::collections::VecDeque;

/// Minimal FIFO host: messages are delivered in dispatch order
struct LoopbackHost {
    clock: SimulationClock,
    pending: VecDeque<Message>,
    outbox: Vec<Message>,
}

impl LoopbackHost {
    fn new(start: Timestamp) -> Self {
        Self {
            clock: SimulationClock::new(start),
            pending: VecDeque::new(),
            outbox: Vec::new(),
        }
    }
}

impl Clock for LoopbackHost {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl Simulation for LoopbackHost {
    fn dispatch_message(
        &mut self,
        occurrence: Timestamp,
        delay: TimeDelta,
        source: &str,
        destination: &str,
        payload: MessagePayload,
    ) {
        let message = Message::new(occurrence, occurrence + delay, source, destination, payload);
        self.outbox.push(message.clone());
        if source == destination {
            self.pending.push_back(message);
        }
    }
}

fn configured_agent(rolling_mean: &str) -> MarketMakerAgent {
    let mut mm = MarketMakerAgent::with_seed("MM", 2024);
    let attrs = AgentAttributes::from_pairs([
        ("exchange", "EXCHANGE"),
        ("timeStep", "25"),
        ("rollingMean", rolling_mean),
        ("halfSpread", "0.5"),
        ("vMin", "10"),
        ("vMax", "20"),
        ("vMinus", "1"),
    ]);
    mm.configure(&attrs, &NoSubstitution).expect("valid configuration");
    mm
}

/// Deliver self-addressed messages until `cycles` wake-ups have been handled
fn run_cycles(
    mm: &mut MarketMakerAgent,
    host: &mut LoopbackHost,
    cycles: usize,
) -> Vec<Timestamp> {
    let start = Message::new(
        host.now(),
        host.now(),
        "SIMULATION",
        "MM",
        MessagePayload::SimulationStart,
    );
    mm.receive_message(host, &start);

    let mut wake_times = Vec::new();
    while wake_times.len() < cycles {
        let Some(message) = host.pending.pop_front() else {
            break;
        };
        assert!(host.clock.advance_to(message.arrival));
        if message.payload == MessagePayload::WakeupForQuoting {
            wake_times.push(message.arrival);
        }
        mm.receive_message(host, &message);
    }
    wake_times
}

#[test]
fn test_wakeups_form_periodic_chain() {
    let _ = env_logger::try_init();

    let mut mm = configured_agent("110");
    mm.set_current_mid_price(dec!(100));
    let mut host = LoopbackHost::new(1_000);

    let wake_times = run_cycles(&mut mm, &mut host, 1_000);

    assert_eq!(wake_times.len(), 1_000);
    assert_eq!(wake_times[0], 1_000, "first quote is immediate");
    for pair in wake_times.windows(2) {
        assert_eq!(pair[1] - pair[0], 25);
    }
    // The chain is still alive: one wake-up is pending
    assert_eq!(host.pending.len(), 1);
    assert_eq!(mm.status(), AgentStatus::Idle);
}

#[test]
fn test_every_cycle_quotes_sell_then_buy() {
    let mut mm = configured_agent("90");
    mm.set_current_mid_price(dec!(100));
    let mut host = LoopbackHost::new(0);

    run_cycles(&mut mm, &mut host, 200);

    let placements: Vec<_> = host
        .outbox
        .iter()
        .filter_map(|m| match &m.payload {
            MessagePayload::PlaceOrderLimit(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(placements.len(), 400);

    for pair in placements.chunks(2) {
        assert_eq!(pair[0].direction, OrderDirection::Sell);
        assert_eq!(pair[0].price, dec!(100.5));
        assert_eq!(pair[0].volume, 1.0);

        assert_eq!(pair[1].direction, OrderDirection::Buy);
        assert_eq!(pair[1].price, dec!(99.5));
        assert!((10.0..=20.0).contains(&pair[1].volume));
    }
}

#[test]
fn test_no_signal_stops_chain() {
    let mut mm = configured_agent("100");
    mm.set_current_mid_price(dec!(100));
    let mut host = LoopbackHost::new(0);

    let wake_times = run_cycles(&mut mm, &mut host, 10);

    assert_eq!(wake_times, vec![0]);
    assert!(host.pending.is_empty());
    assert!(mm.is_halted());
    assert!(host.outbox.iter().all(|m| m.kind() != "PLACE_ORDER_LIMIT"));
}
