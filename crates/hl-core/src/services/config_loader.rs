use std::path::Path;

use crate::error::{LookupError, Result};
use crate::models::LookupConfig;

const CONFIG_FILENAME: &str = "hostlens.yaml";

/// Load `hostlens.yaml` from the given directory. The file is optional at
/// the call sites; missing fields fall back to their defaults.
pub fn load(dir: &Path) -> Result<LookupConfig> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Err(LookupError::ConfigNotFound(config_path));
    }
    let contents = std::fs::read_to_string(&config_path)?;
    let config: LookupConfig =
        serde_yaml::from_str(&contents).map_err(|e| LookupError::InvalidConfig(e.to_string()))?;
    if config.services.is_empty() {
        return Err(LookupError::InvalidConfig(
            "services must name at least one service".into(),
        ));
    }
    if config.wait_timeout_secs == 0 {
        return Err(LookupError::InvalidConfig(
            "wait_timeout_secs must be positive".into(),
        ));
    }
    Ok(config)
}
