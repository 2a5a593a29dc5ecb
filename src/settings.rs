//! Settings file for syntax-zaz.
//!
//! Settings are read from YAML and never written back by the scanner;
//! `syntax-zaz init` creates a starter file on request.

use directories::ProjectDirs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::scan::ScanConfig;
use crate::select::ChancePercent;

/// File names searched for in the working directory.
pub const DEFAULT_SETTINGS_NAMES: &[&str] = &["syntax-zaz.yaml", ".syntax-zaz.yaml"];

/// Default debounce delay between a change and the rescan.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Errors from loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("debounce_ms must be greater than zero")]
    ZeroDebounce,
    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Whether annotations are produced at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Chance, 1-100, that an eligible line gets a message (default: 5)
    #[serde(default)]
    pub chance_percent: ChancePercent,
    /// Quiet period before a rescan in watch mode (default: 500)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// File extensions scanned when walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g., "**/generated/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_extensions() -> Vec<String> {
    [
        "rs", "go", "py", "js", "ts", "jsx", "tsx", "java", "kt", "c", "cpp", "h", "hpp", "cs",
        "rb", "php", "swift", "scala", "html", "css",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            chance_percent: ChancePercent::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            extensions: default_extensions(),
            excluded_paths: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_yaml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings)
    }

    /// Load from an explicit path, the first discovered file, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover_settings(),
        };
        let settings = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading settings");
                Self::parse_file(p)?
            }
            None => Self::default(),
        };
        validate(&settings)?;
        Ok(settings)
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(self.enabled, self.chance_percent)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Build a matcher for `excluded_paths`.
    pub fn excluded_matcher(&self) -> Result<GlobSet, SettingsError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|source| SettingsError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| SettingsError::Glob {
            pattern: self.excluded_paths.join(", "),
            source,
        })
    }
}

/// Per-user settings location, e.g. `~/.config/syntax-zaz/settings.yaml`.
pub fn user_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "syntax-zaz").map(|dirs| dirs.config_dir().join("settings.yaml"))
}

/// Find a settings file in the working directory, then the user config dir.
pub fn discover_settings() -> Option<PathBuf> {
    DEFAULT_SETTINGS_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| user_settings_path().filter(|p| p.exists()))
}

/// Validate settings for correctness.
pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.debounce_ms == 0 {
        return Err(SettingsError::ZeroDebounce);
    }
    settings.excluded_matcher()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let yaml = r#"
enabled: false
chance_percent: 40
debounce_ms: 250
excluded_paths:
  - "**/generated/**"
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.chance_percent.get(), 40);
        assert_eq!(settings.debounce(), Duration::from_millis(250));
        assert!(settings.extensions.contains(&"rs".to_string()));
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.chance_percent.get(), 5);
        assert_eq!(settings.debounce_ms, DEFAULT_DEBOUNCE_MS);
        let config = settings.scan_config();
        assert!(config.enabled);
    }

    #[test]
    fn test_invalid_chance_rejected() {
        assert!(serde_yaml::from_str::<Settings>("chance_percent: 0").is_err());
        assert!(serde_yaml::from_str::<Settings>("chance_percent: 101").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = Settings {
            debounce_ms: 0,
            ..Default::default()
        };
        assert!(matches!(validate(&zero), Err(SettingsError::ZeroDebounce)));

        let bad_glob = Settings {
            excluded_paths: vec!["a{b".to_string()],
            ..Default::default()
        };
        assert!(matches!(validate(&bad_glob), Err(SettingsError::Glob { .. })));
    }

    #[test]
    fn test_parse_file_errors_name_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("syntax-zaz.yaml");
        std::fs::write(&path, "chance_percent: [1, 2]").unwrap();
        let err = Settings::parse_file(&path).unwrap_err();
        assert!(err.to_string().contains("syntax-zaz.yaml"));

        let missing = temp.path().join("nope.yaml");
        assert!(matches!(
            Settings::parse_file(&missing),
            Err(SettingsError::Read { .. })
        ));
    }
}
