use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::generator::DEFAULT_MAX_RETRIES;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const STORE_PATH_VAR: &str = "SEIGAE_STORE_PATH";
pub const MAX_RETRIES_VAR: &str = "SEIGAE_MAX_RETRIES";
pub const REVEAL_TICK_VAR: &str = "SEIGAE_REVEAL_TICK_MS";
pub const SEED_VAR: &str = "SEIGAE_SEED";

pub const DEFAULT_STORE_PATH: &str = "./seigae-store.json";
pub const DEFAULT_REVEAL_TICK_MS: u64 = 850;

/// Runtime settings. Environment first, command-line flags applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_path: PathBuf,
    pub max_retries: u32,
    pub reveal_tick: Duration,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            max_retries: DEFAULT_MAX_RETRIES,
            reveal_tick: Duration::from_millis(DEFAULT_REVEAL_TICK_MS),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            store_path: var(STORE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            max_retries: parse_var(MAX_RETRIES_VAR, var(MAX_RETRIES_VAR))?
                .unwrap_or(defaults.max_retries),
            reveal_tick: parse_var(REVEAL_TICK_VAR, var(REVEAL_TICK_VAR))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.reveal_tick),
            seed: parse_var(SEED_VAR, var(SEED_VAR))?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, DomainError> {
    value
        .map(|raw| {
            raw.trim().parse().map_err(|_| {
                DomainError::infra(
                    InfraErrorKind::Config,
                    format!("environment variable '{name}' has invalid value '{raw}'"),
                )
            })
        })
        .transpose()
}
