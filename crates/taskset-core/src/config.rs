//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{DocumentOptions, FontSizes, Margin};

/// Top-level taskset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksetConfig {
    /// Copies generated per run.
    #[serde(default = "default_copies")]
    pub copies: usize,
    /// Shuffle task pages in every copy.
    #[serde(default)]
    pub shuffle: bool,
    /// Fixed seed for reproducible batches (None = OS entropy).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Page margins as `[x, y]`.
    #[serde(default = "default_margin")]
    pub margin: [f64; 2],
    #[serde(default)]
    pub fonts: FontSizes,
    /// Output directory for generated copies.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Export format: html, json, all.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_copies() -> usize {
    1
}
fn default_margin() -> [f64; 2] {
    let m = Margin::default();
    [m.x, m.y]
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./taskset-output")
}
fn default_format() -> String {
    "html".to_string()
}

impl Default for TasksetConfig {
    fn default() -> Self {
        Self {
            copies: default_copies(),
            shuffle: false,
            seed: None,
            margin: default_margin(),
            fonts: FontSizes::default(),
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

impl TasksetConfig {
    /// Document options described by this config.
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            shuffle: self.shuffle,
            margin: Margin {
                x: self.margin[0],
                y: self.margin[1],
            },
            fonts: self.fonts,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Single pass: substituted values are never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `taskset.toml` in the current directory
/// 2. `~/.config/taskset/config.toml`
///
/// Environment variable overrides: `TASKSET_SEED`, `TASKSET_OUTPUT_DIR`.
pub fn load_config() -> Result<TasksetConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TasksetConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("taskset.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TasksetConfig::default(),
    };

    // Apply env var overrides
    if let Ok(seed) = std::env::var("TASKSET_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("TASKSET_SEED is not a number: '{seed}'"))?;
        config.seed = Some(seed);
    }

    if let Ok(dir) = std::env::var("TASKSET_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

/// Parse a config file's contents and check its values.
pub fn parse_config_str(content: &str) -> Result<TasksetConfig> {
    let config: TasksetConfig = toml::from_str(content)?;
    anyhow::ensure!(config.copies >= 1, "copies must be at least 1");
    anyhow::ensure!(
        config.margin.iter().all(|m| m.is_finite() && *m >= 0.0),
        "margins must be non-negative numbers"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("taskset"))
}
