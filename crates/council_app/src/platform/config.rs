use anyhow::{anyhow, Context};
use council_engine::IngestSettings;

use super::logging::LogDestination;

pub const LOG_ENV: &str = "COUNCIL_LOG";
pub const MAX_FILE_BYTES_ENV: &str = "COUNCIL_MAX_FILE_BYTES";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub log_destination: LogDestination,
    pub ingest: IngestSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(LOG_ENV) {
            config.log_destination = value
                .parse()
                .map_err(|err| anyhow!("invalid {LOG_ENV}: {err}"))?;
        }
        if let Some(value) = lookup(MAX_FILE_BYTES_ENV) {
            let max_bytes: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid {MAX_FILE_BYTES_ENV} '{value}'"))?;
            if max_bytes == 0 {
                return Err(anyhow!("{MAX_FILE_BYTES_ENV} must be positive"));
            }
            config.ingest.max_bytes = max_bytes;
        }

        Ok(config)
    }
}
