//! Navigation tuning: main views, gesture thresholds and animation timings.
//!
//! Stored as JSON at `<config_dir>/transit/navigation.json`. Every field is
//! optional in the file; missing ones take the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use transit_api::{Easing, Transition};

use crate::error::{NavError, Result};
use crate::main_views::{MainView, MainViewSet};

const APP_DIR: &str = "transit";
const CONFIG_FILE: &str = "navigation.json";

/// Movement radius (px) inside which no axis decision is made.
pub const DEFAULT_DEAD_ZONE_PX: f32 = 10.0;
/// Horizontal wins only if `|dx| >= ratio * |dy|`.
pub const DEFAULT_AXIS_LOCK_RATIO: f32 = 1.2;
/// Fraction of the viewport width a drag must cover to change page.
pub const DEFAULT_COMMIT_FRACTION: f32 = 0.28;
pub const DEFAULT_STRIP_DURATION_MS: u64 = 220;
pub const DEFAULT_OVERLAY_DURATION_MS: u64 = 220;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub main_views: Vec<MainView>,
    pub dead_zone_px: f32,
    pub axis_lock_ratio: f32,
    pub commit_fraction: f32,
    pub strip_duration_ms: u64,
    pub overlay_duration_ms: u64,
    pub swipe_enabled: bool,
    pub easing: Easing,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            main_views: vec![
                MainView::new("/search", "ara"),
                MainView::new("/", "ana"),
                MainView::new("/nearby", "yakın"),
            ],
            dead_zone_px: DEFAULT_DEAD_ZONE_PX,
            axis_lock_ratio: DEFAULT_AXIS_LOCK_RATIO,
            commit_fraction: DEFAULT_COMMIT_FRACTION,
            strip_duration_ms: DEFAULT_STRIP_DURATION_MS,
            overlay_duration_ms: DEFAULT_OVERLAY_DURATION_MS,
            swipe_enabled: true,
            easing: Easing::default(),
        }
    }
}

impl NavConfig {
    /// Check value ranges and build the main view set once to catch empty or
    /// duplicate entries.
    pub fn validate(&self) -> Result<()> {
        self.main_view_set()?;
        if !(self.commit_fraction > 0.0 && self.commit_fraction < 1.0) {
            return Err(NavError::Config(format!(
                "commit_fraction must be in (0, 1), got {}",
                self.commit_fraction
            )));
        }
        if self.axis_lock_ratio < 1.0 {
            return Err(NavError::Config(format!(
                "axis_lock_ratio must be >= 1, got {}",
                self.axis_lock_ratio
            )));
        }
        if self.dead_zone_px < 0.0 {
            return Err(NavError::Config(format!(
                "dead_zone_px must not be negative, got {}",
                self.dead_zone_px
            )));
        }
        if self.strip_duration_ms == 0 || self.overlay_duration_ms == 0 {
            return Err(NavError::Config(
                "animation durations must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn main_view_set(&self) -> Result<MainViewSet> {
        MainViewSet::new(self.main_views.clone())
    }

    pub fn strip_transition(&self) -> Transition {
        Transition {
            duration_ms: self.strip_duration_ms,
            easing: self.easing,
        }
    }

    pub fn overlay_transition(&self) -> Transition {
        Transition {
            duration_ms: self.overlay_duration_ms,
            easing: self.easing,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load from the default location, falling back to defaults when no file exists.
pub fn load() -> Result<NavConfig> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(NavConfig::default())
}

pub fn load_from_path(path: &Path) -> Result<NavConfig> {
    let content = fs::read_to_string(path)?;
    let config: NavConfig = serde_json::from_str(&content)?;
    if let Err(err) = config.validate() {
        tracing::warn!(path = %path.display(), "rejecting navigation config: {}", err);
        return Err(err);
    }
    Ok(config)
}

pub fn save_to_path(config: &NavConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
