use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SouperbConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let substituted = substitution::substitute_env_vars(&content)?;
    debug!("Environment variable substitution completed");

    let config: SouperbConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Load `path` if it exists, otherwise build the configuration from the
/// environment
pub fn load_config_or_env<P: AsRef<Path>>(path: P) -> Result<SouperbConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!(
            "Config file {:?} not found, reading configuration from environment",
            path
        );
        Ok(SouperbConfig::from_env())
    }
}

/// Template configuration; secrets are left as `${VAR}` placeholders
#[instrument]
pub fn generate_default_config() -> SouperbConfig {
    SouperbConfig {
        server: HttpServerConfig::default(),
        store: StoreConfig {
            url: format!("${{{}}}", env_vars::STORE_URL),
            anon_key: format!("${{{}}}", env_vars::STORE_ANON_KEY),
            timeout_seconds: None,
        },
        site: SiteConfig {
            url: format!("${{{}}}", env_vars::SITE_URL),
        },
        model: ModelConfig {
            api_key: format!("${{{}}}", env_vars::MODEL_API_KEY),
            ..ModelConfig::default()
        },
        gateway: GatewayConfig::default(),
        logging: LoggingConfig::default(),
        metrics: MetricsConfig::default(),
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &SouperbConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
