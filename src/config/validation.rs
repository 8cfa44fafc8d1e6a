use crate::config::types::{AdmissionConfig, Config, DedupConfig, EngineConfig, StatsConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_engine_config(&config.engine)?;
    validate_admission_config(&config.admission)?;
    validate_dedup_config(&config.dedup)?;
    validate_stats_config(&config.stats)?;
    Ok(())
}

fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.max_body_bytes < 1 {
        return Err(ConfigError::Validation(
            "max_body_bytes must be >= 1".to_string(),
        ));
    }

    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and 100, got {}",
            config.max_concurrent_pages
        )));
    }

    Ok(())
}

fn validate_admission_config(config: &AdmissionConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains must list at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    for (name, value) in [
        ("max_query_params", config.max_query_params),
        ("max_path_segments", config.max_path_segments),
        ("max_path_slashes", config.max_path_slashes),
        ("max_path_equals", config.max_path_equals),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1, got {}",
                name, value
            )));
        }
    }

    Ok(())
}

fn validate_dedup_config(config: &DedupConfig) -> Result<(), ConfigError> {
    let bits = config.fingerprint_bits.bits();
    if config.hamming_threshold >= bits {
        return Err(ConfigError::Validation(format!(
            "hamming_threshold must be below fingerprint_bits ({}), got {}",
            bits, config.hamming_threshold
        )));
    }

    Ok(())
}

fn validate_stats_config(config: &StatsConfig) -> Result<(), ConfigError> {
    validate_domain_string(&config.tracked_domain)?;

    if config.top_words < 1 {
        return Err(ConfigError::Validation(
            "top_words must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates a bare domain string such as "ics.uci.edu"
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must be lowercase",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
