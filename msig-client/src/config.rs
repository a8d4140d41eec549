use crate::limits::ClientLimits;
use config::{Config as ConfigCrate, ConfigError, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Connection settings for the indexing service.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the service (default: http://localhost:8080)
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connect timeout in seconds (default: 2)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Ceiling for proposal listings; discovered from the service when unset
    #[serde(default)]
    pub max_proposal_limit: Option<u32>,

    /// Ceiling for approval timelines; discovered from the service when unset
    #[serde(default)]
    pub max_approval_limit: Option<u32>,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_proposal_limit: None,
            max_approval_limit: None,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from `MSIG_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Loads the configuration from an explicit set of `MSIG_*` variables
    /// instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment().source(Some(vars)))
    }

    fn environment() -> Environment {
        Environment::with_prefix("MSIG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        ConfigCrate::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn limits(&self) -> ClientLimits {
        ClientLimits {
            max_proposal_limit: self.max_proposal_limit,
            max_approval_limit: self.max_approval_limit,
        }
    }
}
