//! View identifiers and slide directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a routable view: the location path (`/`, `/nearby`, `/stops/1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewPath(String);

impl ViewPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ViewPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for ViewPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl PartialEq<str> for ViewPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ViewPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which way a page change slides.
///
/// `Left` means content moves towards the left edge: the outgoing view leaves
/// to the left and the incoming one enters from the right (a "next page"
/// motion). `Right` is the mirror image (a "previous page" / back motion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign of the horizontal offset an outgoing layer travels to.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Direction of a horizontal drag delta (negative = finger moved left).
    pub fn from_delta(dx: f32) -> Self {
        if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}
