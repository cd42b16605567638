use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".findcomprc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the project snapshot file.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
    /// Roots the corpus is restricted to.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
    /// Document kinds included in the scan.
    #[serde(default = "default_kinds")]
    pub kinds: Vec<String>,
    /// Extension a dependency must carry to count as a source script.
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
}

fn default_snapshot() -> String {
    "findcomp.snapshot.json".to_string()
}

fn default_roots() -> Vec<String> {
    vec!["Assets".to_string()]
}

fn default_kinds() -> Vec<String> {
    vec!["prefab".to_string(), "scene".to_string()]
}

fn default_script_extension() -> String {
    ".cs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            roots: default_roots(),
            kinds: default_kinds(),
            script_extension: default_script_extension(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            anyhow::bail!("'roots' must not be empty");
        }
        if self.kinds.is_empty() {
            anyhow::bail!("'kinds' must not be empty");
        }
        if !self.script_extension.starts_with('.') {
            anyhow::bail!(
                "'scriptExtension' must start with '.', got \"{}\"",
                self.script_extension
            );
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
