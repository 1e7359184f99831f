use anyhow::Result;
use regex::Regex;
use std::env;
use tracing::{debug, warn};

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("valid substitution pattern");
    let mut result = content.to_string();
    let mut missing_vars = Vec::new();

    for caps in re.captures_iter(content) {
        let var_name = match caps.get(1).or(caps.get(2)) {
            Some(m) => m.as_str(),
            None => continue,
        };
        let placeholder = &caps[0];

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {}", var_name);
                result = result.replace(placeholder, &value);
            }
            Err(_) => {
                // Keep the placeholder; the validator catches it later
                warn!("Environment variable '{}' not set", var_name);
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables left unresolved (validation may fail): {:?}",
            missing_vars
        );
    }

    Ok(result)
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    let re = Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("valid substitution pattern");
    re.is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_braced_and_bare() {
        env::set_var("FIGGATE_TEST_MONOLITH", "http://mono:9000");
        let out =
            substitute_env_vars("url: ${FIGGATE_TEST_MONOLITH}\nalt: $FIGGATE_TEST_MONOLITH\n")
                .unwrap();
        assert_eq!(out, "url: http://mono:9000\nalt: http://mono:9000\n");
        env::remove_var("FIGGATE_TEST_MONOLITH");
    }

    #[test]
    fn test_missing_var_keeps_placeholder() {
        let out = substitute_env_vars("url: ${FIGGATE_TEST_NOT_SET_ANYWHERE}").unwrap();
        assert_eq!(out, "url: ${FIGGATE_TEST_NOT_SET_ANYWHERE}");
        assert!(has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_no_placeholders_passthrough() {
        let out = substitute_env_vars("port: 8080").unwrap();
        assert_eq!(out, "port: 8080");
        assert!(!has_unresolved_env_vars(&out));
    }
}
