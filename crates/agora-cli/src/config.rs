use anyhow::{Context, Result};
use std::str::FromStr;

use agora_store::StoreConfig;
use agora_store::config::{DEFAULT_BIO, DEFAULT_ID_ATTEMPTS, DEFAULT_ID_SPACE};

/// Build the store configuration from `AGORA_*` environment variables.
pub fn from_env() -> Result<StoreConfig> {
    let defaults = StoreConfig::default();

    Ok(StoreConfig {
        default_bio: std::env::var("AGORA_DEFAULT_BIO").unwrap_or_else(|_| DEFAULT_BIO.into()),
        id_space: parse_var("AGORA_ID_SPACE", DEFAULT_ID_SPACE)?,
        id_attempts: parse_var("AGORA_ID_ATTEMPTS", DEFAULT_ID_ATTEMPTS)?,
        hash_memory_kib: parse_var("AGORA_HASH_MEMORY_KIB", defaults.hash_memory_kib)?,
        hash_iterations: parse_var("AGORA_HASH_ITERATIONS", defaults.hash_iterations)?,
        rng_seed: match std::env::var("AGORA_RNG_SEED") {
            Ok(raw) => Some(raw.parse::<u64>().with_context(|| format!("AGORA_RNG_SEED={}", raw))?),
            Err(_) => None,
        },
    })
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().with_context(|| format!("{}={}", key, raw)),
        Err(_) => Ok(default),
    }
}
