//! Scene files: chase tuning, the corridor graph, and the target's walk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pursuit_core::ChaseConfig;
use pursuit_nav::GraphLayout;
use serde::Deserialize;

const BUILTIN: &str = include_str!("../scene.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub config: ChaseConfig,

    pub graph: GraphLayout,

    /// Name of the node the hand starts from and returns to.
    pub home: String,

    pub target: TargetSpec,

    #[serde(default = "default_duration")]
    pub duration_secs: f64,

    #[serde(default)]
    pub step_secs: Option<f64>,

    #[serde(default)]
    pub stall_timeout_secs: Option<f64>,

    /// Write a CSV row per planner event here.
    #[serde(default)]
    pub hop_log: Option<PathBuf>,
}

/// A target wandering the graph at constant speed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    pub start: String,
    pub speed: f32,
    #[serde(default)]
    pub seed: u64,
}

fn default_duration() -> f64 {
    60.0
}

impl Scene {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// The corridor scene shipped with the demo.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN).context("parsing built-in scene")
    }
}
