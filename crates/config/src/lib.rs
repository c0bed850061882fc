use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "eduflow.toml",
    "config/eduflow.toml",
    "crates/config/eduflow.toml",
    "../eduflow.toml",
    "../config/eduflow.toml",
    "../crates/config/eduflow.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://eduflow.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use eduflow_config::load;
///
/// std::env::remove_var("EDUFLOW_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.storage.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("storage.url", defaults.storage.url.clone())
        .unwrap()
        .set_default(
            "storage.max_connections",
            i64::from(defaults.storage.max_connections),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("EDUFLOW").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("EDUFLOW_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via EDUFLOW_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded configuration");
    Ok(config)
}
