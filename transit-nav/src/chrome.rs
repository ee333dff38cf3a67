//! View models for the navigation chrome that tracks the main views: the
//! pivot header above the strip and the bottom tab bar.

use transit_api::ViewPath;

use crate::main_views::MainViewSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotItem {
    pub path: ViewPath,
    pub label: String,
    pub active: bool,
}

/// Row of main-view labels. Only exists while a main view is showing; the
/// labels past the right edge are left to bleed off-screen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotHeader {
    pub items: Vec<PivotItem>,
    pub active_index: usize,
}

impl PivotHeader {
    pub fn build(main_views: &MainViewSet, current: &ViewPath) -> Option<Self> {
        let active_index = main_views.index_of(current.as_str())?;
        let items = main_views
            .iter()
            .enumerate()
            .map(|(i, view)| PivotItem {
                path: view.path.clone(),
                label: view.label.clone(),
                active: i == active_index,
            })
            .collect();
        Some(Self {
            items,
            active_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub path: ViewPath,
    pub label: String,
    pub active: bool,
}

/// Bottom tab bar: one tab per main view. A tab is highlighted only while its
/// own main view is showing; on any other page none are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar {
    pub tabs: Vec<TabItem>,
}

impl TabBar {
    pub fn build(main_views: &MainViewSet, current: &ViewPath) -> Self {
        let tabs = main_views
            .iter()
            .map(|view| TabItem {
                path: view.path.clone(),
                label: view.label.clone(),
                active: &view.path == current,
            })
            .collect();
        Self { tabs }
    }

    pub fn active(&self) -> Option<&TabItem> {
        self.tabs.iter().find(|t| t.active)
    }
}
