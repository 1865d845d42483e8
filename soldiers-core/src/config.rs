//! SearchConfig - AI strength settings, stored as JSON

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::ai::SEARCH_DEPTH;
use crate::eval::Heuristics;

/// Deepest search accepted from a config file
pub const MAX_DEPTH: u32 = 8;

/// Search depth and evaluation weights for the computer player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub name: String,
    /// Plies searched before falling back to the static evaluation
    pub depth: u32,
    pub heuristics: Heuristics,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            depth: SEARCH_DEPTH,
            heuristics: Heuristics::default(),
        }
    }
}

impl SearchConfig {
    /// Config at the given depth with default weights
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Reject settings the search cannot use
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            bail!("search depth must be between 1 and {}, got {}", MAX_DEPTH, self.depth);
        }
        let h = &self.heuristics;
        if !h.material_weight.is_finite() || !h.mobility_weight.is_finite() {
            bail!("heuristic weights must be finite numbers");
        }
        Ok(())
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        let config: SearchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid search config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("soldiers-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let config = SearchConfig {
            name: "aggressive".to_string(),
            depth: 4,
            heuristics: Heuristics {
                material_weight: 12.0,
                mobility_weight: 0.25,
            },
        };
        config.save(&path).unwrap();
        let loaded = SearchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{ "depth": 2 }"#).unwrap();
        let loaded = SearchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.depth, 2);
        assert_eq!(loaded.heuristics, Heuristics::default());
        assert_eq!(loaded.name, "default");
    }

    #[test]
    fn test_invalid_depth_rejected() {
        assert!(SearchConfig::with_depth(0).validate().is_err());
        assert!(SearchConfig::with_depth(MAX_DEPTH + 1).validate().is_err());

        let path = temp_path("zero-depth");
        std::fs::write(&path, r#"{ "depth": 0 }"#).unwrap();
        let result = SearchConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SearchConfig::load(Path::new("/nonexistent/search.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read search config"));
    }
}
