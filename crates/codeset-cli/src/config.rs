//! TOML configuration file.
//!
//! ```toml
//! [transformer]
//! include_fields = true
//! free_text = ["CS_COMMENTS"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use codeset_report::TransformerOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodesetConfig {
    pub transformer: TransformerOptions,
}

impl CodesetConfig {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }
}

/// Transformer options from an optional config file, extended by CLI flags.
///
/// `--free-text` adds to the file's list; `--no-fields` turns the registry off.
pub fn transformer_options(
    config: Option<&Path>,
    free_text: &[String],
    no_fields: bool,
) -> Result<TransformerOptions, ConfigError> {
    let mut options = match config {
        Some(path) => CodesetConfig::load(path)?.transformer,
        None => TransformerOptions::default(),
    };
    options
        .free_text
        .extend(free_text.iter().map(|key| key.trim().to_string()));
    if no_fields {
        options.include_fields = false;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = CodesetConfig::from_toml(Path::new("codeset.toml"), "").unwrap();
        assert!(config.transformer.include_fields);
        assert!(config.transformer.free_text.is_empty());
    }

    #[test]
    fn reads_transformer_table() {
        let config = CodesetConfig::from_toml(
            Path::new("codeset.toml"),
            "[transformer]\ninclude_fields = false\nfree_text = [\"CS_COMMENTS\"]\n",
        )
        .unwrap();
        assert!(!config.transformer.include_fields);
        assert!(config.transformer.is_free_text("CS_COMMENTS"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CodesetConfig::from_toml(Path::new("codeset.toml"), "[output]\ndir = \"x\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config codeset.toml"));
    }

    #[test]
    fn flags_extend_defaults() {
        let options = transformer_options(None, &["CS_COMMENTS".to_string()], true).unwrap();
        assert!(!options.include_fields);
        assert!(options.is_free_text("CS_COMMENTS"));
    }
}
