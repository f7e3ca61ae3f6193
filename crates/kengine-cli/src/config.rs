//! # Configuration
//!
//! Layered settings for the asset toolkit, later layers winning:
//!
//! 1. Built-in defaults (`static/uploads`, `current` analyzer).
//! 2. Optional YAML file passed with `--config`.
//! 3. Environment: `KENGINE_UPLOAD_DIR`, `KENGINE_ANALYZER`.
//! 4. Command-line flags (`--upload-dir`, `--analyzer`).
//!
//! ```yaml
//! upload_dir: /var/lib/kengine/uploads
//! analyzer: legacy
//! ```

use std::path::{Path, PathBuf};

use kengine_media::AnalyzerKind;
use kengine_store::DEFAULT_UPLOAD_DIR;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the upload directory.
pub const ENV_UPLOAD_DIR: &str = "KENGINE_UPLOAD_DIR";

/// Environment variable selecting the media analyzer.
pub const ENV_ANALYZER: &str = "KENGINE_ANALYZER";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KengineConfig {
    /// Directory the asset store owns.
    pub upload_dir: PathBuf,
    /// Media analyzer implementation.
    pub analyzer: AnalyzerKind,
}

impl Default for KengineConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            analyzer: AnalyzerKind::default(),
        }
    }
}

impl KengineConfig {
    /// Defaults, then `config_path` if given, then the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.apply_env_from(|var| std::env::var(var).ok())
    }

    /// Parse a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not an empty mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Overlay values found through `lookup` (normally `std::env::var`).
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup(ENV_UPLOAD_DIR).filter(|v| !v.trim().is_empty()) {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_ANALYZER).filter(|v| !v.trim().is_empty()) {
            self.analyzer = raw.parse().map_err(|e: kengine_media::MediaError| {
                ConfigError::InvalidEnv {
                    var: ENV_ANALYZER,
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(self)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        upload_dir: Option<PathBuf>,
        analyzer: Option<AnalyzerKind>,
    ) -> Self {
        if let Some(dir) = upload_dir {
            self.upload_dir = dir;
        }
        if let Some(kind) = analyzer {
            self.analyzer = kind;
        }
        self
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}
