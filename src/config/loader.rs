use crate::config::schema::{ToolConfig, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "mdtopics.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML{}: {source}", describe(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid config{}: {source}", describe(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn describe(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" ({})", path.display()))
        .unwrap_or_default()
}

impl ConfigError {
    fn at(self, file: &Path) -> Self {
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

pub fn load_from_str(input: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<ToolConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.at(path))
}

/// Load an explicitly named file, or `mdtopics.toml` from `dir` when it
/// exists, or fall back to defaults.
pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<ToolConfig, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return load_from_path(path);
    }

    let discovered = dir.join(DEFAULT_CONFIG_FILE);
    if discovered.is_file() {
        debug!(path = %discovered.display(), "loading discovered config");
        return load_from_path(&discovered);
    }

    Ok(ToolConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Retention;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let config = load_from_str(
            r#"
[topic]
prefix = "docs/handbook"

[collect]
retention = "last-value"
"#,
        )
        .unwrap();
        assert_eq!(config.topic.prefix, "docs/handbook");
        assert_eq!(config.collect.retention, Retention::LastValue);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load_from_str("").unwrap();
        assert_eq!(config.topic.prefix, "markdown");
        assert_eq!(config.collect.retention, Retention::All);
    }

    #[test]
    fn test_unknown_retention_is_toml_error() {
        let err = load_from_str("[collect]\nretention = \"newest\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { path: None, .. }));
    }

    #[test]
    fn test_invalid_prefix_is_validation_error() {
        let err = load_from_str("[topic]\nprefix = \"md/#\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("wildcards"));
    }

    #[test]
    fn test_load_from_path_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[topic]\nprefix = \"\"\n").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        match &err {
            ConfigError::Validation { path, .. } => {
                assert_eq!(path.as_deref(), Some(file.path()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_path("/nonexistent/mdtopics.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_resolve_discovers_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve(None, dir.path()).unwrap().topic.prefix,
            "markdown"
        );

        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[topic]\nprefix = \"found\"\n",
        )
        .unwrap();
        assert_eq!(resolve(None, dir.path()).unwrap().topic.prefix, "found");
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[topic]\nprefix = \"found\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "[topic]\nprefix = \"explicit\"\n").unwrap();
        assert_eq!(
            resolve(Some(&explicit), dir.path()).unwrap().topic.prefix,
            "explicit"
        );
    }
}
