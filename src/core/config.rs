use std::path::PathBuf;
use tracing::info;

use crate::error::IssueBatchError;
use crate::models::{Config, ConfigOverrides};

/// Load configuration from the working directory with CLI overrides
pub fn load_config(
    project_root: &PathBuf,
    overrides: ConfigOverrides,
) -> Result<Config, IssueBatchError> {
    let config = Config::load_from_dir(project_root)?;
    let config = config.with_overrides(overrides);

    info!(
        "Configuration loaded: api_url={}, repository={}, pace={}ms",
        config.github.api_url,
        config.github.repository.as_deref().unwrap_or("<unset>"),
        config.behavior.pace_millis
    );

    Ok(config)
}
