use std::path::Path;

use anyhow::Context;
use jot_annotate::AnnotatorConfig;
use jot_diff::DiffStrategy;
use serde::{Deserialize, Serialize};

/// Settings read from the `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JotConfig {
    pub diff: DiffConfig,
    pub annotate: AnnotatorConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Strategy used when `--strategy` is not given.
    pub strategy: DiffStrategy,
    /// Print unchanged lines as well as changes.
    pub show_unchanged: bool,
}

impl JotConfig {
    /// Load from `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = JotConfig::default();
        assert_eq!(c.diff.strategy, DiffStrategy::Greedy);
        assert!(!c.diff.show_unchanged);
        assert!(c.annotate.highlight && c.annotate.superscript && c.annotate.subscript);
        assert!(c.annotate.skip_tags.is_empty());
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(JotConfig::load(None).unwrap(), JotConfig::default());
    }

    #[test]
    fn partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[diff]\nstrategy = \"myers\"\n\n[annotate]\nsubscript = false\nskip_tags = [\"code\", \"pre\"]"
        )
        .unwrap();
        let c = JotConfig::load(Some(file.path())).unwrap();
        assert_eq!(c.diff.strategy, DiffStrategy::Myers);
        assert!(!c.diff.show_unchanged);
        assert!(c.annotate.highlight);
        assert!(!c.annotate.subscript);
        assert_eq!(c.annotate.skip_tags.len(), 2);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JotConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn bad_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diff]\nstrategy = 3").unwrap();
        assert!(JotConfig::load(Some(file.path())).is_err());
    }
}
