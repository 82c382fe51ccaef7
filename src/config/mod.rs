use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detector::{LanguageSignature, SignatureSet};
use crate::error::Result;

/// Top-level configuration from `.malprobe.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorConfig,
}

/// Detector customization. Applied once, when the signature set is built;
/// the set never changes after that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Built-in language names to drop from the signature set.
    #[serde(default)]
    pub ignore_languages: HashSet<String>,
    /// Additional signatures, language name to regex pattern. Ordered map so
    /// the resulting set is identical across runs.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# malprobe configuration

[detector]
# Built-in signature languages to disable.
# ignore_languages = ["dart"]

# Extra language signatures (regex, unanchored; any substring match fires).
# [detector.extra]
# go = '(func main\(\)|fmt\.Println|package main)'
"#
    }
}

impl DetectorConfig {
    /// Build the signature set this config describes: the built-in table,
    /// minus ignored languages, plus extras. Fails on an extra with an
    /// invalid pattern.
    pub fn signature_set(&self) -> Result<SignatureSet> {
        let builtin = SignatureSet::builtin();

        for name in &self.ignore_languages {
            if !builtin.contains(name) && !self.extra.contains_key(name) {
                tracing::warn!(language = %name, "ignore_languages names an unknown language");
            }
        }

        let mut signatures: Vec<LanguageSignature> = builtin
            .into_signatures()
            .into_iter()
            .filter(|s| !self.ignore_languages.contains(s.name()))
            .collect();

        for (name, pattern) in &self.extra {
            if self.ignore_languages.contains(name) {
                continue;
            }
            signatures.push(LanguageSignature::new(name, pattern)?);
        }

        Ok(SignatureSet::new(signatures))
    }
}
