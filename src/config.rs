use std::time::Duration;

use thiserror::Error;

const DEFAULT_CHATGPT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Settings read from the environment (and `.env`) at start-up.
/// `TELOXIDE_TOKEN` is picked up by `Bot::from_env` directly.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Without a key `/explain_question` just says explanations are unavailable.
    pub chatgpt_api_key: Option<String>,
    pub chatgpt_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chatgpt_api_key = lookup("CHATGPT_API_KEY").filter(|key| !key.trim().is_empty());

        let chatgpt_timeout = match lookup("CHATGPT_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_CHATGPT_TIMEOUT_SECS),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "CHATGPT_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            chatgpt_api_key,
            chatgpt_timeout,
        })
    }
}
