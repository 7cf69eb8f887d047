//! `mgraph.toml` settings.
//!
//! Every field has a serde default, so a missing file, an empty file or a
//! missing section all mean "use the defaults".

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use moralgraph_core::TriangulateOptions;
use moralgraph_core::bench::{Averager, Median, SizeRange, TrimmedMean};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "mgraph.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub triangulate: TriangulateConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Record a change log on every graph built.
    #[serde(default = "default_true")]
    pub history: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            history: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangulateConfig {
    #[serde(default)]
    pub max_passes: Option<usize>,
}

impl TriangulateConfig {
    pub const fn options(&self) -> TriangulateOptions {
        TriangulateOptions {
            max_passes: self.max_passes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    #[default]
    Average,
    Median,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_start")]
    pub start: usize,
    #[serde(default = "default_end")]
    pub end: usize,
    #[serde(default = "default_step")]
    pub step: usize,
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default)]
    pub estimator: EstimatorKind,
    #[serde(default = "default_keep_fraction")]
    pub keep_fraction: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            step: default_step(),
            repetitions: default_repetitions(),
            estimator: EstimatorKind::default(),
            keep_fraction: default_keep_fraction(),
        }
    }
}

impl BenchConfig {
    pub const fn sizes(&self) -> SizeRange {
        SizeRange::new(self.start, self.end, self.step)
    }

    pub fn averager(&self) -> Box<dyn Averager> {
        match self.estimator {
            EstimatorKind::Average => Box::new(TrimmedMean::new(self.keep_fraction)),
            EstimatorKind::Median => Box::new(Median),
        }
    }
}

/// Load `explicit` if given, else `mgraph.toml` in `cwd` when it exists,
/// else defaults.
///
/// An explicit path that does not exist is an error; a missing default
/// file is not.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

const fn default_start() -> usize {
    1
}

const fn default_end() -> usize {
    10
}

const fn default_step() -> usize {
    1
}

const fn default_repetitions() -> usize {
    5
}

const fn default_keep_fraction() -> f64 {
    TrimmedMean::DEFAULT_KEEP_FRACTION
}
