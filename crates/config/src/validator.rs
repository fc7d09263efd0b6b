use crate::*;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },

    #[error("{field} is not a valid URL: {message}")]
    InvalidUrl { field: String, message: String },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("{field} must be a positive float")]
    InvalidPositiveFloat { field: String },

    #[error("{field} must be greater than 0 and at most 1, got: {value}")]
    InvalidProbability { field: String, value: f64 },

    #[error("Metrics port {0} collides with the HTTP server port")]
    MetricsPortCollision(u16),
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &SouperbConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_server(&config.server, &mut report);
    validate_store(&config.store, &mut report);
    validate_required_url("site.url", env_vars::SITE_URL, &config.site.url, &mut report);
    validate_model(&config.model, &mut report);
    validate_gateway(&config.gateway, &mut report);
    validate_logging(&config.logging, &mut report);

    if config.metrics.enabled && config.metrics.port == config.server.port {
        report.add_error(ValidationError::MetricsPortCollision(config.metrics.port));
    }

    report
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || has_unresolved_env_vars(value)
}

fn validate_server(server: &HttpServerConfig, report: &mut ValidationReport) {
    if server.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.port".to_string(),
        });
    }
}

fn validate_required_url(field: &str, var: &str, value: &str, report: &mut ValidationReport) {
    if is_unset(value) {
        report.add_error(ValidationError::InvalidEnvVar {
            var: var.to_string(),
            message: format!("{field} is missing or invalid"),
        });
        return;
    }

    if let Err(e) = Url::parse(value) {
        report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            message: e.to_string(),
        });
    }
}

fn validate_timeout(field: &str, timeout: Option<u64>, report: &mut ValidationReport) {
    match timeout {
        Some(0) => report.add_error(ValidationError::InvalidPositiveInteger {
            field: field.to_string(),
        }),
        Some(_) => {}
        None => report.add_default(field, "none (wait indefinitely)"),
    }
}

fn validate_store(store: &StoreConfig, report: &mut ValidationReport) {
    validate_required_url("store.url", env_vars::STORE_URL, &store.url, report);

    if is_unset(&store.anon_key) {
        report.add_error(ValidationError::InvalidEnvVar {
            var: env_vars::STORE_ANON_KEY.to_string(),
            message: "store anon key is missing or invalid".to_string(),
        });
    }

    validate_timeout("store.timeout_seconds", store.timeout_seconds, report);
}

fn validate_model(model: &ModelConfig, report: &mut ValidationReport) {
    if let Err(e) = Url::parse(&model.endpoint) {
        report.add_error(ValidationError::InvalidUrl {
            field: "model.endpoint".to_string(),
            message: e.to_string(),
        });
    }

    if is_unset(&model.api_key) {
        report.add_warning(
            "model.api_key",
            &format!(
                "{} is not set; chat requests will be rejected upstream",
                env_vars::MODEL_API_KEY
            ),
        );
    }

    if model.max_new_tokens == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "model.max_new_tokens".to_string(),
        });
    }

    for (field, value) in [
        ("model.temperature", model.temperature),
        ("model.repetition_penalty", model.repetition_penalty),
    ] {
        if value <= 0.0 {
            report.add_error(ValidationError::InvalidPositiveFloat {
                field: field.to_string(),
            });
        }
    }

    if model.top_p <= 0.0 || model.top_p > 1.0 {
        report.add_error(ValidationError::InvalidProbability {
            field: "model.top_p".to_string(),
            value: model.top_p,
        });
    }

    validate_timeout("model.timeout_seconds", model.timeout_seconds, report);

    if model.system_prompt.is_none() {
        report.add_default("model.system_prompt", "CarroQueen persona");
    }
}

fn validate_gateway(gateway: &GatewayConfig, report: &mut ValidationReport) {
    if gateway.allow_unscoped_writes {
        report.add_warning(
            "gateway.allow_unscoped_writes",
            "Update and delete requests without a filter affect every row of the table",
        );
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let valid_formats = ["pretty", "json", "compact"];
    if !valid_formats.contains(&logging.format.as_str()) {
        report.add_warning(
            "logging.format",
            &format!("Invalid log format '{}'. Using 'pretty'.", logging.format),
        );
    }
}
