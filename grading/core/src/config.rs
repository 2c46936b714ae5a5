// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ShutdownPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_students: u32,
    pub num_assistants: usize,
    pub max_think_time_ms: u64,
    pub shutdown_policy: ShutdownPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_students: 100,
            num_assistants: 4,
            max_think_time_ms: 500,
            shutdown_policy: ShutdownPolicy::Drain,
        }
    }
}

impl SimulationConfig {
    /// Reads the file as-is; call `validate` once overrides are merged
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_assistants == 0 {
            return Err(ConfigError::Invalid(
                "num_assistants must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_think_time(&self) -> Duration {
        Duration::from_millis(self.max_think_time_ms)
    }
}
