//! Bootstrap - scenario files and simulation setup
//!
//! A scenario names the run window, an optional seed, run parameters and the
//! agents to create:
//!
//! ```json
//! {
//!   "start": 0,
//!   "duration": 1000,
//!   "seed": 42,
//!   "parameters": { "step": "25" },
//!   "agents": [
//!     { "type": "MMHFTAgent", "name": "MM1",
//!       "attributes": { "exchange": "EXCHANGE", "timeStep": "{step}" } }
//!   ],
//!   "max_events": 100000
//! }
//! ```

use crate::agent::AgentFactory;
use crate::error::{Result, RunnerError};
use crate::parameters::Parameters;
use crate::simulation::{EventScheduler, SimulationSummary};
use hftsim_agents::AgentAttributes;
use hftsim_core::{TimeDelta, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One agent entry in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    #[serde(rename = "type")]
    pub agent_type: String,
    pub name: String,
    #[serde(default)]
    pub attributes: AgentAttributes,
}

impl AgentSpec {
    pub fn new(agent_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            name: name.into(),
            attributes: AgentAttributes::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }
}

/// Scenario file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub start: Timestamp,
    pub duration: TimeDelta,
    /// Run seed; agents seed from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    /// Upper bound on handled messages (delivered or undelivered) for the whole run
    #[serde(default)]
    pub max_events: Option<u64>,
}

impl ScenarioConfig {
    pub fn new(start: Timestamp, duration: TimeDelta) -> Self {
        Self {
            start,
            duration,
            seed: None,
            parameters: Parameters::new(),
            agents: Vec::new(),
            max_events: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.set(name, value);
        self
    }

    pub fn with_max_events(mut self, limit: u64) -> Self {
        self.max_events = Some(limit);
        self
    }

    pub fn with_agent(mut self, agent: AgentSpec) -> Self {
        self.agents.push(agent);
        self
    }

    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a scenario from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Last simulated timestamp
    pub fn end(&self) -> Result<Timestamp> {
        self.start.checked_add(self.duration).ok_or_else(|| {
            RunnerError::InvalidScenario(format!(
                "start {} + duration {} overflows",
                self.start, self.duration
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.end()?;
        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(RunnerError::InvalidScenario(format!(
                    "agent of type '{}' has an empty name",
                    agent.agent_type
                )));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(RunnerError::DuplicateAgent(agent.name.clone()));
            }
        }
        Ok(())
    }

    /// Create, configure and register every agent
    pub fn build_scheduler(&self) -> Result<EventScheduler> {
        self.validate()?;
        let mut factory = match self.seed {
            Some(seed) => AgentFactory::seeded(seed),
            None => AgentFactory::from_entropy(),
        };

        let mut scheduler = EventScheduler::new(self.start);
        if let Some(limit) = self.max_events {
            scheduler = scheduler.with_event_limit(limit);
        }
        for spec in &self.agents {
            let mut agent = factory.create(&spec.agent_type, &spec.name)?;
            agent
                .configure(&spec.attributes, &self.parameters)
                .map_err(|source| RunnerError::AgentConfig {
                    agent: spec.name.clone(),
                    source,
                })?;
            scheduler.register_agent(agent)?;
        }

        log::info!(
            "Scenario ready: {} agent(s), t=[{}, {}], seed={:?}",
            self.agents.len(),
            self.start,
            self.end()?,
            self.seed
        );
        Ok(scheduler)
    }

    /// Run the whole window and return the scheduler for inspection
    pub fn run_scheduler(&self) -> Result<EventScheduler> {
        let end = self.end()?;
        let mut scheduler = self.build_scheduler()?;
        scheduler.start();
        scheduler.run_until(end);
        scheduler.stop();
        Ok(scheduler)
    }

    pub fn run(&self) -> Result<SimulationSummary> {
        Ok(self.run_scheduler()?.summary())
    }
}
