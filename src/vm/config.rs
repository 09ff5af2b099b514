// src/vm/config.rs

use crate::core::{QlogicError, Result};
use crate::simulation::DEFAULT_MAX_QUBITS;
use std::env;

/// Environment variable holding a `u64` sampling seed.
pub const SEED_ENV: &str = "QLOGIC_QVM_SEED";
/// Environment variable holding the maximum register width.
pub const MAX_QUBITS_ENV: &str = "QLOGIC_QVM_MAX_QUBITS";

/// Settings for a [`QvmConnection`](super::QvmConnection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QvmConfig {
    /// Seed for measurement sampling. `None` draws fresh entropy per run.
    pub seed: Option<u64>,
    /// Largest number of distinct qubits a program may touch.
    pub max_qubits: usize,
}

impl Default for QvmConfig {
    fn default() -> Self {
        Self { seed: None, max_qubits: DEFAULT_MAX_QUBITS }
    }
}

impl QvmConfig {
    /// Sets the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the qubit limit.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Reads overrides from `QLOGIC_QVM_SEED` and `QLOGIC_QVM_MAX_QUBITS`,
    /// falling back to the defaults for unset variables.
    ///
    /// # Errors
    /// Returns `QlogicError::Config` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(SEED_ENV) {
            config.seed = Some(parse(SEED_ENV, &raw)?);
        }
        if let Some(raw) = lookup(MAX_QUBITS_ENV) {
            config.max_qubits = parse(MAX_QUBITS_ENV, &raw)?;
        }
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| QlogicError::Config {
        message: format!("{} must be a non-negative integer, got '{}'", key, raw),
    })
}
