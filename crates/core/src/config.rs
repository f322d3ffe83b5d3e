use cpscan_api::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of a [`Scanner`](crate::service::Scanner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Namespace prefixes the directory enumerator never descends into.
    pub ignored_prefixes: Vec<String>,
    /// Packages whose types resolve without a class file on the class path.
    pub bootstrap_packages: Vec<String>,
    /// Forces percent-decoding of located URLs regardless of the host flavor.
    pub decode_urls: Option<bool>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ignored_prefixes: vec!["cpscan".to_string()],
            bootstrap_packages: ["java.", "javax.", "jdk.", "sun."]
                .into_iter()
                .map(String::from)
                .collect(),
            decode_urls: None,
        }
    }
}

impl ScannerConfig {
    /// Loads a JSON configuration file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> ScanResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScanError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ScanResult<Self> {
        serde_json::from_str(content).map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Whether `resource_path` lies under one of the ignored prefixes.
    pub fn is_ignored(&self, resource_path: &str) -> bool {
        self.ignored_prefixes.iter().any(|prefix| {
            resource_path == prefix
                || resource_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
