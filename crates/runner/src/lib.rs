//! hftsim Runner - Discrete-Event Host
//!
//! A reference host for hftsim participants:
//!
//! - **Simulation**: timestamp-ordered scheduler that delivers messages to
//!   registered agents and journals everything it dispatches
//! - **Parameters**: `{name}` substitution for parameterised runs
//! - **Bootstrap**: scenario files (JSON) describing agents and their
//!   attributes
//! - **Agent factory**: maps scenario agent types to implementations
//!
//! ## Architecture
//!
//! ```text
//!   scenario.json ──► ScenarioConfig ──► AgentFactory ──► Box<dyn Agent>
//!                                                              │ register
//!                                                              ▼
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                        EventScheduler                          │
//!   │  SimulationClock   queue (arrival, seq)   journal   undelivered │
//!   └────────────────────────────────────────────────────────────────┘
//!          │ deliver                          ▲ dispatch_message
//!          ▼                                  │
//!       agent.receive_message(&mut dyn Simulation, &Message)
//! ```
//!
//! Messages for destinations without a registered agent (e.g. a venue that is
//! not part of the run) are kept in the undelivered list.

pub mod agent;
pub mod bootstrap;
pub mod error;
pub mod parameters;
pub mod simulation;

// Re-export main types
pub use agent::{AgentFactory, AgentKind};
pub use bootstrap::{AgentSpec, ScenarioConfig};
pub use error::{Result, RunnerError};
pub use parameters::Parameters;
pub use simulation::{EventScheduler, SimulationSummary, SIMULATION_NAME};
