//! Configuration loading.
//!
//! Module configurations are serde structs whose fields all carry
//! documented defaults; an empty TOML document therefore yields a fully
//! valid configuration, and hosts override only the keys they care about.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Errors raised while loading a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Deserialize a configuration from a TOML string.
pub fn load_toml<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(s)?)
}

/// Deserialize a configuration from a TOML file.
pub fn load_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    load_toml(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default = "default_name")]
        name: String,
        #[serde(default)]
        threshold: f64,
    }

    fn default_name() -> String {
        "momentum".to_string()
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let cfg: Sample = load_toml("").unwrap();
        assert_eq!(cfg.name, "momentum");
        assert_eq!(cfg.threshold, 0.0);
    }

    #[test]
    fn test_overrides_take_effect() {
        let cfg: Sample = load_toml("name = \"recoil\"\nthreshold = 30.0\n").unwrap();
        assert_eq!(cfg.name, "recoil");
        assert_eq!(cfg.threshold, 30.0);
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let err = load_toml::<Sample>("name = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
