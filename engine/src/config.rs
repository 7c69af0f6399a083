//! Engine configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use realscore_analysis::DEFAULT_WEIGHTS;
use serde::Deserialize;
use thiserror::Error;

/// Runtime tunables for the orchestrator.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Quiet period after the last change before a pass may start.
    pub debounce: Duration,
    /// Minimum plain-text word count for a pass to be attempted.
    pub min_words: usize,
    /// Aggregation weights for grammar, coherence, vocabulary, relevance.
    pub weights: [f64; 4],
    /// Whether analyzers add bounded random jitter to their scores.
    pub jitter: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_words: 20,
            weights: DEFAULT_WEIGHTS,
            jitter: false,
        }
    }
}

/// On-disk configuration, loaded from `~/.realscore/config.toml`.
///
/// ```toml
/// [analysis]
/// debounce_ms = 500
/// min_words = 20
/// jitter = true
/// weights = [0.3, 0.3, 0.2, 0.2]
///
/// [storage]
/// data_dir = "/var/lib/realscore"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RealscoreConfig {
    pub analysis: Option<AnalysisConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    pub debounce_ms: Option<u64>,
    pub min_words: Option<usize>,
    #[serde(default)]
    pub jitter: bool,
    pub weights: Option<[f64; 4]>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl RealscoreConfig {
    /// Load the config file if present. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Resolve runtime settings, falling back to defaults field by field.
    #[must_use]
    pub fn settings(&self) -> EngineSettings {
        let defaults = EngineSettings::default();
        let Some(analysis) = self.analysis.as_ref() else {
            return defaults;
        };

        EngineSettings {
            debounce: analysis
                .debounce_ms
                .map_or(defaults.debounce, Duration::from_millis),
            min_words: analysis.min_words.unwrap_or(defaults.min_words),
            weights: analysis.weights.unwrap_or(defaults.weights),
            jitter: analysis.jitter,
        }
    }

    /// Storage directory override, if configured.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.storage.as_ref().and_then(|s| s.data_dir.as_deref())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".realscore").join("config.toml"))
}

/// Default data directory, with a working-directory fallback for
/// constrained environments.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(".").join("realscore"),
        |dir| dir.join("realscore"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let config: RealscoreConfig = toml::from_str("").unwrap();
        let settings = config.settings();
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert_eq!(settings.min_words, 20);
        assert_eq!(settings.weights, DEFAULT_WEIGHTS);
        assert!(!settings.jitter);
        assert!(config.data_dir().is_none());
    }

    #[test]
    fn parse_full_analysis_section() {
        let toml_str = r"
[analysis]
debounce_ms = 250
min_words = 12
jitter = true
weights = [0.4, 0.3, 0.2, 0.1]
";
        let config: RealscoreConfig = toml::from_str(toml_str).unwrap();
        let settings = config.settings();
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.min_words, 12);
        assert!(settings.jitter);
        assert_eq!(settings.weights, [0.4, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn partial_analysis_section_keeps_other_defaults() {
        let toml_str = r"
[analysis]
min_words = 30
";
        let config: RealscoreConfig = toml::from_str(toml_str).unwrap();
        let settings = config.settings();
        assert_eq!(settings.min_words, 30);
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert!(!settings.jitter);
    }

    #[test]
    fn parse_storage_section() {
        let toml_str = r#"
[storage]
data_dir = "/var/lib/realscore"
"#;
        let config: RealscoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_dir(), Some(Path::new("/var/lib/realscore")));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(toml::from_str::<RealscoreConfig>("[analysis").is_err());
    }
}
