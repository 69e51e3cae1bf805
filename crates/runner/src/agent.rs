//! Agent Factory - maps scenario agent types to implementations
//!
//! Agents created by one factory draw their random streams from a single run
//! seed, so a seeded scenario replays exactly.

use crate::error::{Result, RunnerError};
use hftsim_agents::{Agent, MarketMakerAgent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

/// Agent implementations known to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Periodic two-sided quoter
    MarketMaker,
}

impl AgentKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            AgentKind::MarketMaker => "MarketMakerAgent",
        }
    }
}

impl FromStr for AgentKind {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "MarketMakerAgent" | "MMHFTAgent" | "market_maker" => Ok(AgentKind::MarketMaker),
            other => Err(RunnerError::UnknownAgentType(other.to_string())),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Creates agents with deterministic per-agent seeds
#[derive(Debug, Clone)]
pub struct AgentFactory {
    seed: Option<u64>,
    created: u64,
}

impl AgentFactory {
    /// Seeded factory: the n-th agent gets seed `seed + n`
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            created: 0,
        }
    }

    /// Factory whose agents seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            created: 0,
        }
    }

    /// Number of agents created so far
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Create an unconfigured agent of the given type
    pub fn create(&mut self, agent_type: &str, name: &str) -> Result<Box<dyn Agent>> {
        let kind: AgentKind = agent_type.parse()?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.created)),
            None => StdRng::from_entropy(),
        };
        self.created += 1;

        let agent: Box<dyn Agent> = match kind {
            AgentKind::MarketMaker => Box::new(MarketMakerAgent::new(name, rng)),
        };
        log::debug!("Created {} '{}'", kind, name);
        Ok(agent)
    }
}
