use super::schema::Config;
use crate::scoring::MAX_TOP_N;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(top_n) = config.top_n {
        if top_n == 0 || top_n > MAX_TOP_N {
            errors.push(format!("top_n: must be between 1 and {}, got {}", MAX_TOP_N, top_n));
        }
    }

    if let Some(ref patterns) = config.goalkeeper_roles {
        for (i, pattern) in patterns.iter().enumerate() {
            if let Err(e) = glob::Pattern::new(pattern) {
                errors.push(format!(
                    "goalkeeper_roles[{}]: invalid pattern '{}' - {}",
                    i, pattern, e
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            top_n: Some(20),
            goalkeeper_roles: Some(vec!["gkd".to_string(), "sk?".to_string()]),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_top_n() {
        let config = Config {
            top_n: Some(0),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("top_n"));
    }

    #[test]
    fn test_oversized_top_n() {
        let config = Config {
            top_n: Some(MAX_TOP_N + 1),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = Config {
            goalkeeper_roles: Some(vec!["gkd".to_string(), "[sk".to_string()]),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("goalkeeper_roles[1]"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            top_n: Some(0),                                 // Error 1
            goalkeeper_roles: Some(vec!["[".to_string()]), // Error 2
            ..Default::default()
        };
        assert_eq!(validate_config(&config).unwrap_err().len(), 2);
    }
}
