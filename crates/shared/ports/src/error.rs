use thiserror::Error;

/// Errors raised while configuring a participant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cannot parse attribute '{attribute}' from '{value}': {reason}")]
    Parse {
        attribute: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn parse(
        attribute: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        ConfigError::Parse {
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
