//! Configuration file loading.
//!
//! Discovers and loads `declfix.toml` from the repository root and merges it
//! with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "declfix.toml";

/// Top-level configuration from declfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeclfixConfig {
    /// Default patch script path, relative to the repo root.
    pub script: Option<Utf8PathBuf>,

    /// Verify step settings.
    pub verify: VerifyConfig,
}

/// Verify section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Whether to run the script's verify command after the loop.
    pub enabled: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load `declfix.toml` from the repo root, if present.
pub fn load_config(repo_root: &Utf8Path) -> anyhow::Result<DeclfixConfig> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("no config file found at {}", path);
        return Ok(DeclfixConfig::default());
    }

    debug!("loading config file {}", path);
    let contents = fs::read_to_string(&path).with_context(|| format!("read config {}", path))?;
    toml::from_str(&contents).with_context(|| format!("parse config {}", path))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use camino::Utf8PathBuf;

    #[test]
    fn absent_config_yields_defaults() {
        let td = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        let config = load_config(&root).expect("load");
        assert!(config.script.is_none());
        assert!(config.verify.enabled);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let td = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        std::fs::write(
            root.join("declfix.toml"),
            "script = \"fixes/batch-10.json\"\n\n[verify]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config(&root).expect("load");
        assert_eq!(
            config.script,
            Some(Utf8PathBuf::from("fixes/batch-10.json"))
        );
        assert!(!config.verify.enabled);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        std::fs::write(root.join("declfix.toml"), "script = [not toml").unwrap();
        assert!(load_config(&root).is_err());
    }
}
