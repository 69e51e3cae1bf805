//! hftsim Agents
//!
//! Participants of the discrete-event market simulator:
//! - `Agent` trait through which the scheduler configures participants and
//!   delivers messages to them
//! - Attribute parsing with host-side parameter substitution
//! - `MarketMakerAgent`: an HFT market maker that periodically cancels its
//!   resting quotes and requotes a buy/sell pair sized by a directional
//!   prediction
//!
//! ## Message flow
//!
//! ```text
//!   EVENT_SIMULATION_START ──► MarketMakerAgent ──► WAKEUP_FOR_QUOTING (self, +0)
//!
//!   WAKEUP_FOR_QUOTING ──► MarketMakerAgent ──┬──► CANCEL_ORDERS      (venue, +0)
//!                                             ├──► PLACE_ORDER_LIMIT  (venue, +0, sell)
//!                                             ├──► PLACE_ORDER_LIMIT  (venue, +0, buy)
//!                                             └──► WAKEUP_FOR_QUOTING (self, +wake interval)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hftsim_agents::{Agent, AgentAttributes, MarketMakerAgent};
//! use hftsim_ports::NoSubstitution;
//!
//! let mut mm = MarketMakerAgent::with_seed("MM1", 42);
//! let attributes =
//!     AgentAttributes::from_pairs([("exchange", "EXCHANGE"), ("rollingMean", "101")]);
//! mm.configure(&attributes, &NoSubstitution)?;
//! ```

pub mod agent;
pub mod attributes;
pub mod market_maker;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use agent::Agent;
pub use attributes::AgentAttributes;
pub use market_maker::{AgentStatus, MarketMakerAgent, MarketMakerConfig, Prediction};
