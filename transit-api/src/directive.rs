//! Positioning directives emitted to the rendering layer.
//!
//! The navigation core never touches layout. It only says which logical layer
//! sits at which horizontal offset, and whether the move is animated.

use crate::{Direction, ViewPath};
use serde::{Deserialize, Serialize};

/// Logical layers the renderer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layer", content = "slot", rename_all = "snake_case")]
pub enum LayerId {
    /// The container holding every main view side by side.
    Strip,
    /// One main view inside the strip.
    StripSlot(usize),
    /// Outgoing view of an overlay transition.
    Exit,
    /// Incoming view of an overlay transition.
    Enter,
}

/// Horizontal offset: a percentage of the layer's own width plus a raw pixel
/// delta, i.e. `translateX(calc(<percent>% + <pixels>px))`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub percent: f32,
    pub pixels: f32,
}

impl Offset {
    pub const fn percent(percent: f32) -> Self {
        Self {
            percent,
            pixels: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// CSS timing-function name.
    pub fn css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Place `layer` at `offset`. `transition: None` means jump without animating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionDirective {
    pub layer: LayerId,
    pub offset: Offset,
    pub transition: Option<Transition>,
}

impl PositionDirective {
    pub fn is_animated(&self) -> bool {
        self.transition.is_some()
    }
}

/// What the view area shows right now. Computed once per navigation and
/// rendered by a single match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewMode {
    /// All main views in the strip, `index` in the viewport.
    Strip { index: usize },
    /// Two stacked layers sliding between an old and a new view.
    Overlay {
        exit: ViewPath,
        enter: ViewPath,
        direction: Direction,
        active: bool,
    },
    /// A single view outside the main set, at rest.
    Page { path: ViewPath },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_slot_serializes_with_slot_index() {
        let json = serde_json::to_string(&LayerId::StripSlot(2)).unwrap();
        assert_eq!(json, r#"{"layer":"strip_slot","slot":2}"#);
    }

    #[test]
    fn easing_css_names() {
        assert_eq!(Easing::EaseOut.css(), "ease-out");
        assert_eq!(Easing::default(), Easing::EaseOut);
    }

    #[test]
    fn view_mode_is_tagged_by_kind() {
        let mode = ViewMode::Page {
            path: ViewPath::from("/map"),
        };
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, r#"{"kind":"page","path":"/map"}"#);
    }
}
