use std::{env, fs};

use super::RulesConfig;
use crate::error::{CoreError, Result};

pub const RULES_CONFIG_PATH_ENV: &str = "BB_RULES_CONFIG_PATH";

/// Loads a rules config from the file named by `BB_RULES_CONFIG_PATH`.
///
/// Returns `Ok(None)` when the variable is unset or blank.
pub fn load_rules_config_from_env() -> Result<Option<RulesConfig>> {
    let Ok(path) = env::var(RULES_CONFIG_PATH_ENV) else {
        return Ok(None);
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let config = RulesConfig::from_json(&content).map_err(|e| {
        CoreError::InvalidConfig(format!("{RULES_CONFIG_PATH_ENV}='{path}': {e}"))
    })?;

    log::info!("Loaded rules config from {}", path);
    Ok(Some(config))
}

/// Env-provided config, or the standard rules when none is set.
pub fn rules_config_from_env_or_default() -> Result<RulesConfig> {
    Ok(load_rules_config_from_env()?.unwrap_or_default())
}
