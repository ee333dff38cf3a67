//! Swipe session state machine: dead zone, axis lock, commit threshold.
//!
//! A session opens on touch-start and closes on touch-end or cancel. Until the
//! finger leaves the dead zone nothing is decided. Then the session either
//! locks to the horizontal axis (and starts reporting live deltas) or gives
//! the touch to vertical scrolling for good. Every delta is measured from the
//! touch-start origin, never from the previous move, so replaying a move is
//! idempotent.

use transit_api::{Direction, Point, TouchTarget};

use crate::config::NavConfig;

/// Thresholds the tracker works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub dead_zone_px: f32,
    pub axis_lock_ratio: f32,
    pub commit_fraction: f32,
}

impl From<&NavConfig> for GestureConfig {
    fn from(config: &NavConfig) -> Self {
        Self {
            dead_zone_px: config.dead_zone_px,
            axis_lock_ratio: config.axis_lock_ratio,
            commit_fraction: config.commit_fraction,
        }
    }
}

/// Strip geometry captured when a session opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeContext {
    pub current_index: usize,
    pub count: usize,
    pub viewport_width: f32,
}

impl SwipeContext {
    fn at_first(&self) -> bool {
        self.current_index == 0
    }

    fn at_last(&self) -> bool {
        self.current_index + 1 >= self.count
    }

    /// Neighbour in `direction`, if it exists. A leftward swipe reveals the
    /// next view.
    fn neighbour(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Left if !self.at_last() => Some(self.current_index + 1),
            Direction::Right if !self.at_first() => Some(self.current_index - 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Movement left the dead zone mostly vertically; scrolling wins.
    VerticalIntent,
    /// Drag points past the first or last main view.
    PastBoundary,
    /// The platform canceled the touch, or swiping was switched off.
    Interrupted,
}

/// One touch, from start to end. Owned by the tracker, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub origin: Point,
    pub axis_locked: bool,
    pub canceled: bool,
    pub committed: bool,
    context: SwipeContext,
}

impl GestureSession {
    fn new(origin: Point, context: SwipeContext) -> Self {
        Self {
            origin,
            axis_locked: false,
            canceled: false,
            committed: false,
            context,
        }
    }
}

/// What a touch event meant for the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    /// Nothing to do: no session, still inside the dead zone, or session dead.
    None,
    /// Finger-following offset from the origin, in pixels.
    Drag { dx: f32 },
    /// The session just died. Terminal until the next touch-start.
    Canceled(CancelReason),
    /// Drag crossed the commit threshold: page change toward `target_index`.
    Commit {
        direction: Direction,
        target_index: usize,
        dx: f32,
    },
    /// A locked drag ended short of the threshold.
    SnapBack { dx: f32 },
}

impl GestureOutput {
    /// Whether the platform's default scroll handling must be suppressed.
    pub fn consumes_touch(&self) -> bool {
        matches!(
            self,
            GestureOutput::Drag { .. } | GestureOutput::Commit { .. } | GestureOutput::SnapBack { .. }
        )
    }
}

/// Turns a touch stream into drag / commit / snap-back decisions.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    session: Option<GestureSession>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// A commit was decided and its navigation has not landed yet.
    pub fn is_committed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.committed)
    }

    /// Whether a live, locked drag is moving the strip.
    pub fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.axis_locked && !s.canceled && !s.committed)
    }

    /// Pixels a drag must cover to commit, for the given viewport width.
    pub fn commit_threshold(&self, viewport_width: f32) -> f32 {
        viewport_width * self.config.commit_fraction
    }

    /// Open a session. Any uncommitted session still held (its touch-end was
    /// lost) is dropped first. Returns `false` if the touch is not eligible:
    /// a committed swipe is still in flight, or the touch landed on an
    /// editable or interactive element.
    pub fn start(&mut self, origin: Point, target: TouchTarget, context: SwipeContext) -> bool {
        if self.is_committed() {
            tracing::debug!("touch-start ignored: committed swipe in flight");
            return false;
        }
        if let Some(stale) = self.session.take() {
            tracing::debug!(origin = ?stale.origin, locked = stale.axis_locked, "dropping stale swipe session");
        }
        if target.blocks_swipe() {
            tracing::debug!(?target, "touch-start on control, no swipe session");
            return false;
        }
        self.session = Some(GestureSession::new(origin, context));
        true
    }

    pub fn on_move(&mut self, position: Point) -> GestureOutput {
        let config = self.config;
        let Some(session) = self.session.as_mut() else {
            return GestureOutput::None;
        };
        if session.canceled || session.committed {
            return GestureOutput::None;
        }

        let dx = position.x - session.origin.x;
        let dy = position.y - session.origin.y;

        if !session.axis_locked {
            let still = dx == 0.0 && dy == 0.0;
            if still || (dx.abs() < config.dead_zone_px && dy.abs() < config.dead_zone_px) {
                return GestureOutput::None;
            }
            if dx.abs() < config.axis_lock_ratio * dy.abs() {
                session.canceled = true;
                tracing::debug!(dx, dy, "swipe canceled: vertical intent");
                return GestureOutput::Canceled(CancelReason::VerticalIntent);
            }
            let toward = Direction::from_delta(dx);
            if session.context.neighbour(toward).is_none() {
                session.canceled = true;
                tracing::debug!(%toward, index = session.context.current_index, "swipe canceled: past boundary");
                return GestureOutput::Canceled(CancelReason::PastBoundary);
            }
            session.axis_locked = true;
            tracing::debug!(dx, dy, "swipe axis locked");
        }

        GestureOutput::Drag { dx }
    }

    /// Close the session. A locked drag past the threshold commits; any other
    /// locked drag snaps back. A committed session stays held, refusing new
    /// touch-starts, until [`GestureTracker::release`].
    pub fn end(&mut self, position: Point) -> GestureOutput {
        let threshold_fraction = self.config.commit_fraction;
        let Some(session) = self.session.as_mut() else {
            return GestureOutput::None;
        };
        if session.committed {
            return GestureOutput::None;
        }
        if session.canceled || !session.axis_locked {
            self.session = None;
            return GestureOutput::None;
        }

        let dx = position.x - session.origin.x;
        let threshold = session.context.viewport_width * threshold_fraction;
        if dx.abs() <= threshold {
            tracing::debug!(dx, threshold, "swipe below threshold, snapping back");
            self.session = None;
            return GestureOutput::SnapBack { dx };
        }

        let direction = Direction::from_delta(dx);
        // The finger may have reversed after locking; never aim past an edge.
        let Some(target_index) = session.context.neighbour(direction) else {
            tracing::debug!(dx, %direction, "swipe reversed past boundary, snapping back");
            self.session = None;
            return GestureOutput::SnapBack { dx };
        };

        session.committed = true;
        tracing::debug!(dx, %direction, target_index, "swipe committed");
        GestureOutput::Commit {
            direction,
            target_index,
            dx,
        }
    }

    /// Drop a committed session once its navigation has landed or been
    /// dropped. Uncommitted sessions are left alone.
    pub fn release(&mut self) {
        if self.is_committed() {
            self.session = None;
        }
    }

    /// Drop the session without a decision. Returns `SnapBack` if the strip
    /// had already moved.
    pub fn cancel(&mut self) -> GestureOutput {
        match self.session.take() {
            Some(session) if session.axis_locked && !session.canceled && !session.committed => {
                tracing::debug!("swipe interrupted mid-drag");
                GestureOutput::SnapBack { dx: 0.0 }
            }
            Some(_) => GestureOutput::Canceled(CancelReason::Interrupted),
            None => GestureOutput::None,
        }
    }
}
