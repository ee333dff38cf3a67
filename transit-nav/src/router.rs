//! Contract with the routing/location layer, plus an in-memory history router.
//!
//! The core only needs the current path, a way to navigate, and whether the
//! last change was a history traversal. Everything else about routing (route
//! patterns, parameters, page loading) stays outside.

use transit_api::{ChangeKind, ViewPath};

pub trait Router {
    fn current_path(&self) -> &ViewPath;

    /// Push `path` as a new location. Navigating to the current path is a no-op.
    fn navigate(&mut self, path: &ViewPath);

    /// How the router reached its current location.
    fn last_change(&self) -> ChangeKind;
}

/// Routers that can traverse their own history.
pub trait HistoryRouter: Router {
    /// Returns `false` when there is nothing to go back to.
    fn back(&mut self) -> bool;

    /// Returns `false` when there is nothing to go forward to.
    fn forward(&mut self) -> bool;
}

/// Browser-style history stack held in memory.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    entries: Vec<ViewPath>,
    cursor: usize,
    last_change: ChangeKind,
}

impl MemoryRouter {
    pub fn new(initial: impl Into<ViewPath>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            last_change: ChangeKind::Push,
        }
    }

    pub fn entries(&self) -> &[ViewPath] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> &ViewPath {
        &self.entries[self.cursor]
    }

    fn navigate(&mut self, path: &ViewPath) {
        if self.current_path() == path {
            return;
        }
        // A push drops the forward stack, like a browser.
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.clone());
        self.cursor += 1;
        self.last_change = ChangeKind::Push;
    }

    fn last_change(&self) -> ChangeKind {
        self.last_change
    }
}

impl HistoryRouter for MemoryRouter {
    fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        self.last_change = ChangeKind::Pop;
        true
    }

    fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        self.last_change = ChangeKind::Pop;
        true
    }
}
