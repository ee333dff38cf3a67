//! Strip positioner: every main view side by side in one wide container,
//! moved purely by horizontal offset.
//!
//! The strip is `N * 100%` wide and each slot `100 / N` percent of it, so the
//! rest offset of index `i` is `-i * (100 / N)` percent of the strip's width.
//! During a drag the raw finger delta is added in pixels without a
//! transition. Eased moves mark the strip as settling until their duration
//! has elapsed.

use std::time::Duration;
use transit_api::{LayerId, Offset, PositionDirective, Transition};

/// Static geometry of one slot, emitted once when the strip is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub layer: LayerId,
    pub left_percent: f32,
    pub width_percent: f32,
}

/// Rest offset (percent of strip width) for `index` in a strip of `count`.
pub fn rest_percent(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    -(index as f32) * (100.0 / count as f32)
}

#[derive(Debug, Clone)]
pub struct StripPositioner {
    count: usize,
    index: usize,
    transition: Transition,
    settle_until: Option<Duration>,
    /// Last directive left the strip off its rest position.
    displaced: bool,
}

impl StripPositioner {
    pub fn new(count: usize, index: usize, transition: Transition) -> Self {
        let count = count.max(1);
        Self {
            count,
            index: index.min(count - 1),
            transition,
            settle_until: None,
            displaced: false,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the view the strip rests on. Follows the active path, not the
    /// in-flight commit animation.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slots(&self) -> Vec<SlotLayout> {
        let width = 100.0 / self.count as f32;
        (0..self.count)
            .map(|i| SlotLayout {
                layer: LayerId::StripSlot(i),
                left_percent: i as f32 * width,
                width_percent: width,
            })
            .collect()
    }

    pub fn is_settling(&self, now: Duration) -> bool {
        self.settle_until.is_some_and(|until| now < until)
    }

    pub fn is_displaced(&self) -> bool {
        self.displaced
    }

    /// The positioning primitive: strip at `index` plus `dx` pixels,
    /// optionally eased. Out-of-range indices are clamped. Pure.
    pub fn position(&self, index: usize, dx: f32, animate: bool) -> PositionDirective {
        let index = index.min(self.count - 1);
        PositionDirective {
            layer: LayerId::Strip,
            offset: Offset {
                percent: rest_percent(index, self.count),
                pixels: dx,
            },
            transition: animate.then_some(self.transition),
        }
    }

    /// Live 1:1 finger tracking around the current index.
    pub fn drag(&mut self, dx: f32) -> PositionDirective {
        self.displaced = dx != 0.0;
        self.position(self.index, dx, false)
    }

    /// Ease the rest of the way to `target`. The current index stays put until
    /// the navigation lands and [`StripPositioner::settle_on`] is called.
    pub fn commit(&mut self, target: usize, now: Duration) -> PositionDirective {
        self.begin_settling(now);
        self.displaced = target != self.index;
        self.position(target, 0.0, true)
    }

    /// Ease back to the current rest position.
    pub fn snap_back(&mut self, now: Duration) -> PositionDirective {
        self.begin_settling(now);
        self.displaced = false;
        self.position(self.index, 0.0, true)
    }

    /// Adopt `index` as the current view (the active path changed) and move
    /// there, eased or instantly.
    pub fn settle_on(&mut self, index: usize, animate: bool, now: Duration) -> PositionDirective {
        self.index = index.min(self.count - 1);
        self.displaced = false;
        if animate {
            self.begin_settling(now);
        } else {
            self.settle_until = None;
        }
        self.position(self.index, 0.0, animate)
    }

    fn begin_settling(&mut self, now: Duration) {
        self.settle_until = Some(now + Duration::from_millis(self.transition.duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_api::Easing;

    fn strip(index: usize) -> StripPositioner {
        StripPositioner::new(
            3,
            index,
            Transition {
                duration_ms: 220,
                easing: Easing::EaseOut,
            },
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn rest_offsets_step_by_slot_width() {
        assert!(approx(rest_percent(0, 3), 0.0));
        assert!(approx(rest_percent(1, 3), -100.0 / 3.0));
        assert!(approx(rest_percent(2, 3), -200.0 / 3.0));
    }

    #[test]
    fn slots_split_strip_evenly() {
        let slots = strip(0).slots();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].layer, LayerId::StripSlot(2));
        assert!(approx(slots[1].left_percent, 100.0 / 3.0));
        assert!(approx(slots[0].width_percent, 100.0 / 3.0));
    }

    #[test]
    fn repeated_positioning_is_idempotent() {
        let s = strip(1);
        let first = s.position(1, 0.0, false);
        for _ in 0..5 {
            assert_eq!(s.position(1, 0.0, false), first);
        }
    }

    #[test]
    fn drag_adds_raw_pixels_without_transition() {
        let mut s = strip(1);
        let d = s.drag(-57.0);
        assert!(approx(d.offset.percent, rest_percent(1, 3)));
        assert_eq!(d.offset.pixels, -57.0);
        assert!(d.transition.is_none());
    }

    #[test]
    fn position_never_leaves_bounds() {
        let s = strip(1);
        let d = s.position(9, 0.0, false);
        assert!(approx(d.offset.percent, rest_percent(2, 3)));
    }

    #[test]
    fn commit_animates_to_target_but_keeps_index() {
        let mut s = strip(1);
        let now = Duration::from_millis(1000);
        let d = s.commit(2, now);
        assert!(approx(d.offset.percent, rest_percent(2, 3)));
        assert_eq!(d.transition.unwrap().duration_ms, 220);
        assert_eq!(s.index(), 1);
        assert!(s.is_settling(now + Duration::from_millis(100)));
        assert!(!s.is_settling(now + Duration::from_millis(220)));
    }

    #[test]
    fn snap_back_returns_to_same_rest_offset() {
        let mut s = strip(1);
        let rest = s.position(1, 0.0, false).offset;
        let d = s.snap_back(Duration::ZERO);
        assert_eq!(d.offset, rest);
        assert!(d.is_animated());
    }

    #[test]
    fn settle_on_adopts_new_index() {
        let mut s = strip(1);
        let d = s.settle_on(0, false, Duration::ZERO);
        assert_eq!(s.index(), 0);
        assert!(approx(d.offset.percent, 0.0));
        assert!(!s.is_settling(Duration::ZERO));
    }

    #[test]
    fn displacement_tracks_moves_off_rest() {
        let mut s = strip(1);
        assert!(!s.is_displaced());
        s.drag(-40.0);
        assert!(s.is_displaced());
        s.snap_back(Duration::ZERO);
        assert!(!s.is_displaced());
        s.commit(2, Duration::ZERO);
        assert!(s.is_displaced());
        s.settle_on(1, false, Duration::ZERO);
        assert!(!s.is_displaced());
    }
}
