use crate::core::Error;
use crate::function::CollapsePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analyzer configuration, loaded from `bigomap.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Constant-bound handling: `effective` collapses literal-bounded code
    /// to O(1), `intrinsic` reports the nominal algorithmic shape.
    #[serde(default)]
    pub collapse: CollapsePolicy,

    /// Emit improvement suggestions alongside the complexity report.
    #[serde(default = "default_suggestions")]
    pub suggestions: bool,
}

fn default_suggestions() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collapse: CollapsePolicy::default(),
            suggestions: default_suggestions(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or fall back to `bigomap.toml` in the
    /// working directory, or defaults when neither exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default = Path::new("bigomap.toml");
                default.exists().then(|| default.to_path_buf())
            }
        };
        match candidate {
            Some(p) => {
                let raw =
                    fs::read_to_string(&p).map_err(|e| Error::file(p.as_path(), e))?;
                let config =
                    toml::from_str(&raw).map_err(|e| Error::Config(e.to_string()))?;
                log::debug!("loaded config from {}", p.display());
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}
