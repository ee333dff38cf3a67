//! The fixed, ordered set of views that live in the swipeable strip.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use transit_api::ViewPath;

use crate::error::{NavError, Result};

/// One entry of the main view set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainView {
    pub path: ViewPath,
    /// Short label shown in the pivot header and tab bar.
    pub label: String,
}

impl MainView {
    pub fn new(path: impl Into<ViewPath>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Ordered main views. Never empty, no duplicate paths, read-only after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainViewSet {
    views: Vec<MainView>,
}

impl MainViewSet {
    pub fn new(views: Vec<MainView>) -> Result<Self> {
        if views.is_empty() {
            return Err(NavError::EmptyMainViews);
        }
        let mut seen = HashSet::new();
        for view in &views {
            if !seen.insert(view.path.as_str()) {
                return Err(NavError::DuplicateMainView(view.path.to_string()));
            }
        }
        Ok(Self { views })
    }

    /// Build a set whose labels are the paths themselves.
    pub fn from_paths(paths: &[&str]) -> Result<Self> {
        Self::new(paths.iter().map(|p| MainView::new(*p, *p)).collect())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.views.iter().position(|v| v.path == path)
    }

    pub fn path(&self, index: usize) -> Option<&ViewPath> {
        self.views.get(index).map(|v| &v.path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MainView> {
        self.views.iter()
    }
}
