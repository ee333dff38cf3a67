//! Raw touch input as delivered by the platform.

use serde::{Deserialize, Serialize};

/// A position in logical pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What kind of element a touch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchTarget {
    /// Plain page content; eligible for page swipes.
    #[default]
    Content,
    /// Text input, textarea, contenteditable. Swiping would hijack selection
    /// and caret placement.
    Editable,
    /// Sliders, maps and other controls that own horizontal drags.
    Interactive,
}

impl TouchTarget {
    /// Touches on these targets never start a swipe session.
    pub fn blocks_swipe(self) -> bool {
        !matches!(self, TouchTarget::Content)
    }
}

/// A single-finger touch event. `time_ms` is on the same clock the host uses
/// for animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TouchEvent {
    Start {
        position: Point,
        #[serde(default)]
        target: TouchTarget,
        time_ms: u64,
    },
    Move {
        position: Point,
        time_ms: u64,
    },
    End {
        position: Point,
        time_ms: u64,
    },
    /// The platform took the touch away (incoming call, system gesture).
    Cancel {
        time_ms: u64,
    },
}

impl TouchEvent {
    pub fn time_ms(&self) -> u64 {
        match self {
            TouchEvent::Start { time_ms, .. }
            | TouchEvent::Move { time_ms, .. }
            | TouchEvent::End { time_ms, .. }
            | TouchEvent::Cancel { time_ms } => *time_ms,
        }
    }
}
