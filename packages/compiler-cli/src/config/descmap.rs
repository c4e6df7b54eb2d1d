use anyhow::Context;
use descmap_compiler::logging::LogLevel;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "descmap.json";

/// Optional settings from `descmap.json`. Command line flags override them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DescmapConfig {
    /// Directory to write `<stem>.map` files into.
    pub out_dir: Option<PathBuf>,
    /// Emit pretty-printed JSON (default `true`).
    pub pretty: Option<bool>,
    pub log_level: Option<LogLevel>,
    /// Input files or glob patterns used when none are passed on the command line.
    pub inputs: Option<Vec<String>>,
}

impl DescmapConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: DescmapConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` if given, else `descmap.json` in `cwd` when it exists.
    pub fn resolve(path: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = cwd.join(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or(LogLevel::Warn)
    }
}
