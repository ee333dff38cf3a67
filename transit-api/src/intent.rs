//! Navigation requests and the path changes the routing layer reports back.

use crate::{Direction, ViewPath};
use serde::{Deserialize, Serialize};

/// Where a navigation came from. Determines how its slide direction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum NavOrigin {
    /// A committed swipe; the direction was decided by the finger.
    Gesture(Direction),
    /// Back/forward through browser history.
    History,
    /// Link, tab tap, or any other explicit navigate call.
    Push,
}

/// A navigation request carrying its own intent, so the renderer that reacts
/// to the resulting path change does not need any side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub to: ViewPath,
    pub origin: NavOrigin,
}

impl NavigationIntent {
    pub fn gesture(to: ViewPath, direction: Direction) -> Self {
        Self {
            to,
            origin: NavOrigin::Gesture(direction),
        }
    }

    pub fn push(to: ViewPath) -> Self {
        Self {
            to,
            origin: NavOrigin::Push,
        }
    }
}

/// How the routing layer arrived at its current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// An explicit navigate call.
    #[default]
    Push,
    /// A history traversal (back or forward).
    Pop,
}

/// A change of the active path as observed from the routing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathChange {
    pub from: ViewPath,
    pub to: ViewPath,
    pub kind: ChangeKind,
}
