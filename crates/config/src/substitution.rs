use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use tracing::{debug, warn};

const ENV_VAR_PATTERN: &str = r"\$\{(\w+)\}|\$(\w+)";

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(ENV_VAR_PATTERN)?;
    let mut missing_vars = Vec::new();

    // Single pass: substituted values are never rescanned
    let result = re.replace_all(content, |caps: &Captures| {
        let placeholder = &caps[0];
        let Some(var) = caps.get(1).or(caps.get(2)) else {
            return placeholder.to_string();
        };
        let var_name = var.as_str();

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {}", var_name);
                value
            }
            Err(_) => {
                warn!("Environment variable '{}' not set", var_name);
                // Placeholder stays; the validator reports it
                missing_vars.push(var_name.to_string());
                placeholder.to_string()
            }
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (may fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Get environment variable with a default value
pub fn get_env_or_default(var_name: &str, default: &str) -> String {
    match env::var(var_name) {
        Ok(value) => {
            debug!("Using environment variable: {}", var_name);
            value
        }
        Err(_) => {
            warn!(
                "Environment variable '{}' not set, using default: \"{}\"",
                var_name, default
            );
            default.to_string()
        }
    }
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    Regex::new(ENV_VAR_PATTERN)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_both_forms() {
        env::set_var("SOUPERB_TEST_BRACED", "https://a.example");
        env::set_var("SOUPERB_TEST_BARE", "key123");

        let out = substitute_env_vars("url: ${SOUPERB_TEST_BRACED}\nkey: $SOUPERB_TEST_BARE").unwrap();

        assert_eq!(out, "url: https://a.example\nkey: key123");
    }

    #[test]
    fn test_missing_vars_are_left_in_place() {
        let out = substitute_env_vars("key: ${SOUPERB_TEST_SURELY_UNSET}").unwrap();

        assert_eq!(out, "key: ${SOUPERB_TEST_SURELY_UNSET}");
        assert!(has_unresolved_env_vars(&out));
        assert!(!has_unresolved_env_vars("key: plain"));
    }

    #[test]
    fn test_prefix_named_variable_stays_unresolved() {
        env::set_var("SOUPERB_TEST_HOST", "h");
        env::remove_var("SOUPERB_TEST_HOSTNAME");

        let out =
            substitute_env_vars("a: $SOUPERB_TEST_HOST\nb: $SOUPERB_TEST_HOSTNAME\n").unwrap();

        assert_eq!(out, "a: h\nb: $SOUPERB_TEST_HOSTNAME\n");
        assert!(has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        env::set_var("SOUPERB_TEST_OUTER", "$SOUPERB_TEST_INNER");
        env::set_var("SOUPERB_TEST_INNER", "expanded");

        let out = substitute_env_vars("key: ${SOUPERB_TEST_OUTER}").unwrap();

        assert_eq!(out, "key: $SOUPERB_TEST_INNER");
    }
}
