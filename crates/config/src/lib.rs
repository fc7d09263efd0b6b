use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Top-level Souperb configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SouperbConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    pub store: StoreConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Hosted store (PostgREST + GoTrue behind one project URL)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
    /// Per-request timeout; unset means wait indefinitely
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Public origin the password reset email links back to
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f64,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// Replaces the built-in persona when set
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            api_key: String::new(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            repetition_penalty: default_repetition_penalty(),
            timeout_seconds: None,
            system_prompt: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Whether update/delete without a filter may touch every row
    #[serde(default = "default_enabled")]
    pub allow_unscoped_writes: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allow_unscoped_writes: default_enabled(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// pretty, json, or compact
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

/// Environment variables read by [`SouperbConfig::from_env`]
pub mod env_vars {
    pub const STORE_URL: &str = "PUBLIC_SUPABASE_URL";
    pub const STORE_ANON_KEY: &str = "PUBLIC_SUPABASE_ANON_KEY";
    pub const SITE_URL: &str = "SITE_URL";
    pub const MODEL_API_KEY: &str = "HUGGING_FACE_API_KEY";
    pub const HOST: &str = "SOUPERB_HOST";
    pub const PORT: &str = "SOUPERB_PORT";
}

impl SouperbConfig {
    /// Build a configuration from environment variables alone
    ///
    /// Used when no config file exists. Missing variables become empty
    /// strings and are reported by [`validate_config`].
    pub fn from_env() -> Self {
        let mut config = generate_default_config();

        config.store.url = get_env_or_default(env_vars::STORE_URL, "");
        config.store.anon_key = get_env_or_default(env_vars::STORE_ANON_KEY, "");
        config.site.url = get_env_or_default(env_vars::SITE_URL, "");
        config.model.api_key = get_env_or_default(env_vars::MODEL_API_KEY, "");
        config.server.host = get_env_or_default(env_vars::HOST, &default_host());

        let port = get_env_or_default(env_vars::PORT, &default_port().to_string());
        match port.parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!(%port, "Ignoring invalid {}", env_vars::PORT),
        }

        config
    }
}
