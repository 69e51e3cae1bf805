use hftsim_ports::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration of agent '{agent}' failed: {source}")]
    AgentConfig {
        agent: String,
        #[source]
        source: ConfigError,
    },

    #[error("Unknown agent type: {0}")]
    UnknownAgentType(String),

    #[error("Duplicate agent name: {0}")]
    DuplicateAgent(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
