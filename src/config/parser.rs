use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the exact settings they used.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DomainMatch, IndexKind};
    use crate::fingerprint::FingerprintWidth;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[engine]
max-body-bytes = 1048576
max-concurrent-pages = 4

[admission]
allowed-domains = ["example.com"]
domain-match = "suffix"
max-query-params = 3

[dedup]
fingerprint-bits = 32
hamming-threshold = 6
index = "linear"

[stats]
tracked-domain = "example.com"
top-words = 10
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.engine.max_body_bytes, 1_048_576);
        assert_eq!(config.engine.max_concurrent_pages, 4);
        assert_eq!(config.admission.allowed_domains, vec!["example.com"]);
        assert_eq!(config.admission.domain_match, DomainMatch::Suffix);
        assert_eq!(config.admission.max_query_params, 3);
        // Unspecified keys fall back to defaults
        assert_eq!(config.admission.max_path_segments, 5);
        assert_eq!(config.dedup.fingerprint_bits, FingerprintWidth::W32);
        assert_eq!(config.dedup.hamming_threshold, 6);
        assert_eq!(config.dedup.index, IndexKind::Linear);
        assert_eq!(config.stats.top_words, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.engine.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.admission.allowed_domains.len(), 4);
        assert_eq!(config.admission.domain_match, DomainMatch::Substring);
        assert_eq!(config.dedup.fingerprint_bits, FingerprintWidth::W64);
        assert_eq!(config.dedup.hamming_threshold, 8);
        assert_eq!(config.dedup.index, IndexKind::Banded);
        assert_eq!(config.stats.tracked_domain, "ics.uci.edu");
        assert_eq!(config.stats.top_words, 50);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/sieve.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_fingerprint_width() {
        let result = parse_config("[dedup]\nfingerprint-bits = 48\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[dedup]
fingerprint-bits = 16
hamming-threshold = 16
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
