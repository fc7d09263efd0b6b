pub fn default_enabled() -> bool {
    true
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    4321
}

pub fn default_model_endpoint() -> String {
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

pub fn default_max_new_tokens() -> u32 {
    250
}

pub fn default_temperature() -> f64 {
    0.7
}

pub fn default_top_p() -> f64 {
    0.95
}

pub fn default_repetition_penalty() -> f64 {
    1.1
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
