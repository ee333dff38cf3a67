//! Scenario files: a starting location and a list of host-side steps.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use transit_api::TouchTarget;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub start: String,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    pub steps: Vec<Step>,
}

fn default_viewport_width() -> f32 {
    transit_nav::controller::DEFAULT_VIEWPORT_WIDTH
}

/// One host action. Each step is followed by an animation frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    TouchStart {
        x: f32,
        y: f32,
        #[serde(default)]
        target: TouchTarget,
    },
    TouchMove {
        x: f32,
        y: f32,
    },
    TouchEnd {
        x: f32,
        y: f32,
    },
    TouchCancel,
    /// Let frames run for `ms` milliseconds.
    Wait {
        ms: u64,
    },
    Navigate {
        path: String,
    },
    Back,
    Forward,
    TapTab {
        path: String,
    },
    TapPivot {
        index: usize,
    },
    SetSwipe {
        enabled: bool,
    },
}

impl Scenario {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {:?}", path))?;
        Self::parse(&content)
    }
}
