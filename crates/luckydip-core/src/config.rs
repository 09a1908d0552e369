use std::{env, fs, path::Path};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::batch::BatchOptions;
use crate::rules::GameRules;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "LUCKYDIP_CONFIG";

/// Everything a run needs: the game being played and how tickets are bought.
///
/// ```toml
/// [game]
/// main_count = 5
/// main_max = 50
/// lucky_count = 2
/// lucky_max = 12
/// ticket_cost = 2.5
///
/// [batch]
/// number_of_tickets = 10
/// duplicate_tickets = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckyDipConfig {
    pub game: GameRules,
    pub batch: BatchOptions,
}

impl LuckyDipConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse luckydip config")?;
        config.game.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `LUCKYDIP_CONFIG` (a `.env` file is honoured),
    /// falling back to the defaults when the variable is unset.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }

        match env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path),
            Err(env::VarError::NotPresent) => {
                log::warn!("{CONFIG_ENV} not set, using default EuroMillions rules");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {CONFIG_ENV}")),
        }
    }
}
