//! Emit-time configuration.
//!
//! The API-freeze predicate and the platform-version history used during
//! resolution are injected inputs: they come from a TOML file, never from
//! code. An absent file means an empty history and nothing frozen.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::fs::read_to_string;

/// One historical entry: the platform API level at which packages of a root
/// with the given first-appearance version became available.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformEntry {
    /// Package root name.
    pub root: String,
    /// First-appearance interface version, `major.minor`.
    pub version: String,
    /// Platform API level, kept as the string the secondary representation
    /// expects verbatim.
    pub api_level: String,
}

/// Parsed emit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitConfig {
    /// Names of interface packages whose API surface is frozen.
    #[serde(default)]
    pub frozen: Vec<String>,

    /// Historical first-appearance table.
    #[serde(default)]
    pub platform: Vec<PlatformEntry>,
}

impl EmitConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: EmitConfig = toml::from_str(
            r#"
frozen = ["android.hardware.nfc@1.0"]

[[platform]]
root = "android.hardware"
version = "1.0"
api_level = "29"
"#,
        )
        .unwrap();

        assert_eq!(config.frozen, vec!["android.hardware.nfc@1.0"]);
        assert_eq!(config.platform.len(), 1);
        assert_eq!(config.platform[0].api_level, "29");
    }

    #[test]
    fn test_empty_config() {
        let config: EmitConfig = toml::from_str("").unwrap();
        assert!(config.frozen.is_empty());
        assert!(config.platform.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<EmitConfig, _> = toml::from_str("frozne = []");
        assert!(result.is_err());
    }
}
