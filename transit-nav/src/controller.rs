//! Transition controller - reconciles touch input, explicit navigation and
//! history traversal into one consistent stream of render effects.
//!
//! Flow for a swipe:
//! touch events -> [`GestureTracker`] -> strip commit animation -> intent armed
//! in [`NavigationState`] -> navigation released on the next animation frame
//! -> router path change -> intent consumed -> strip settles on the new index.
//!
//! Every other navigation goes straight to the router and is picked up by
//! [`TransitionController::sync`], which classifies its direction and either
//! moves the strip (main view to main view) or stages an overlay transition.

use serde::Serialize;
use std::time::Duration;
use transit_api::{
    ChangeKind, NavOrigin, NavigationIntent, PathChange, PositionDirective, TouchEvent, ViewMode,
    ViewPath,
};

use crate::chrome::{PivotHeader, TabBar};
use crate::config::NavConfig;
use crate::direction::classify;
use crate::error::Result;
use crate::gesture::{GestureConfig, GestureOutput, GestureTracker, SwipeContext};
use crate::main_views::MainViewSet;
use crate::nav_state::NavigationState;
use crate::overlay::{OverlayPhase, TransitionOrchestrator, TransitionTicket};
use crate::router::{HistoryRouter, Router};
use crate::strip::{SlotLayout, StripPositioner};
use crate::timers::TimerQueue;

/// Viewport width assumed until the host reports the real one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;

/// Something the host must do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "data", rename_all = "snake_case")]
pub enum Effect {
    /// Move a layer.
    Position(PositionDirective),
    /// The controller issued a navigation to the router.
    Navigate(NavigationIntent),
    /// The view area switched rendering strategy.
    Mode(ViewMode),
}

/// Outcome of one touch event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchResponse {
    /// Suppress the platform's default handling (scrolling).
    pub prevent_default: bool,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    OverlayCleanup(TransitionTicket),
}

pub struct TransitionController<R: Router> {
    config: NavConfig,
    main_views: MainViewSet,
    router: R,
    state: NavigationState,
    tracker: GestureTracker,
    strip: StripPositioner,
    overlay: TransitionOrchestrator,
    timers: TimerQueue<TimerEvent>,
    /// Committed gesture navigation waiting for the next animation frame.
    deferred: Option<NavigationIntent>,
    viewport_width: f32,
    swipe_enabled: bool,
    mode: ViewMode,
}

impl<R: Router> TransitionController<R> {
    pub fn new(config: NavConfig, router: R) -> Result<Self> {
        config.validate()?;
        let main_views = config.main_view_set()?;
        let current = router.current_path().clone();
        let index = main_views.index_of(current.as_str()).unwrap_or(0);
        let mode = resting_mode(&main_views, &current);

        Ok(Self {
            tracker: GestureTracker::new(GestureConfig::from(&config)),
            strip: StripPositioner::new(main_views.len(), index, config.strip_transition()),
            overlay: TransitionOrchestrator::new(config.overlay_transition()),
            timers: TimerQueue::new(),
            deferred: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            swipe_enabled: config.swipe_enabled,
            state: NavigationState::new(current),
            mode,
            main_views,
            router,
            config,
        })
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn main_views(&self) -> &MainViewSet {
        &self.main_views
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Direct router access for hosts that change location themselves; call
    /// [`TransitionController::sync`] afterwards.
    pub fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn view_mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn overlay_phase(&self) -> OverlayPhase {
        self.overlay.phase()
    }

    pub fn strip_index(&self) -> usize {
        self.strip.index()
    }

    pub fn strip_slots(&self) -> Vec<SlotLayout> {
        self.strip.slots()
    }

    pub fn pivot_header(&self) -> Option<PivotHeader> {
        PivotHeader::build(&self.main_views, self.state.current_path())
    }

    pub fn tab_bar(&self) -> TabBar {
        TabBar::build(&self.main_views, self.state.current_path())
    }

    /// Earliest pending timer, so hosts can keep frames coming until then.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// No gesture, no pending navigation, no transition in flight.
    pub fn is_idle(&self, now: Duration) -> bool {
        !self.tracker.is_tracking()
            && self.deferred.is_none()
            && !self.overlay.is_busy()
            && !self.strip.is_settling(now)
    }

    pub fn swipe_enabled(&self) -> bool {
        self.swipe_enabled
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(1.0);
    }

    /// Effects that bring a fresh renderer in line with the current state.
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![
            Effect::Position(self.strip.position(self.strip.index(), 0.0, false)),
            Effect::Mode(self.mode.clone()),
        ]
    }

    // =====================================================================
    // Touch input
    // =====================================================================

    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchResponse {
        let now = Duration::from_millis(event.time_ms());
        match event {
            TouchEvent::Start {
                position, target, ..
            } => {
                if let Some(reason) = self.swipe_blocker(now) {
                    tracing::debug!(reason, "touch-start ignored");
                    return TouchResponse::default();
                }
                let context = SwipeContext {
                    current_index: self.strip.index(),
                    count: self.main_views.len(),
                    viewport_width: self.viewport_width,
                };
                let mut effects = Vec::new();
                if self.tracker.is_dragging() {
                    // The previous touch-end never arrived.
                    effects.push(Effect::Position(self.strip.settle_on(
                        self.strip.index(),
                        false,
                        now,
                    )));
                }
                self.tracker.start(position, target, context);
                TouchResponse {
                    prevent_default: false,
                    effects,
                }
            }
            TouchEvent::Move { position, .. } => {
                let output = self.tracker.on_move(position);
                self.apply_gesture(output, now)
            }
            TouchEvent::End { position, .. } => {
                let output = self.tracker.end(position);
                self.apply_gesture(output, now)
            }
            TouchEvent::Cancel { .. } => {
                let output = self.tracker.cancel();
                self.apply_gesture(output, now)
            }
        }
    }

    /// Turn swiping on or off. Switching off mid-drag snaps the strip back.
    pub fn set_swipe_enabled(&mut self, enabled: bool, now: Duration) -> Vec<Effect> {
        self.swipe_enabled = enabled;
        if enabled || !self.tracker.is_tracking() {
            return Vec::new();
        }
        let output = self.tracker.cancel();
        self.apply_gesture(output, now).effects
    }

    fn swipe_blocker(&self, now: Duration) -> Option<&'static str> {
        if !self.swipe_enabled {
            return Some("swiping disabled");
        }
        if !matches!(self.mode, ViewMode::Strip { .. }) {
            return Some("not on a main view");
        }
        if self.state.transition_active() {
            return Some("transition running");
        }
        if self.deferred.is_some() || self.state.has_pending_intent() {
            return Some("gesture navigation pending");
        }
        if self.strip.is_settling(now) {
            return Some("strip settling");
        }
        None
    }

    fn apply_gesture(&mut self, output: GestureOutput, now: Duration) -> TouchResponse {
        let prevent_default = output.consumes_touch();
        let mut effects = Vec::new();

        match output {
            GestureOutput::None | GestureOutput::Canceled(_) => {}
            GestureOutput::Drag { dx } => {
                effects.push(Effect::Position(self.strip.drag(dx)));
            }
            GestureOutput::SnapBack { .. } => {
                effects.push(Effect::Position(self.strip.snap_back(now)));
            }
            GestureOutput::Commit {
                direction,
                target_index,
                ..
            } => {
                let target = self.main_views.path(target_index).cloned();
                let armed = target.map(|to| {
                    let intent = NavigationIntent::gesture(to, direction);
                    self.state.arm(intent.clone()).map(|()| intent)
                });
                match armed {
                    Some(Ok(intent)) => {
                        // Motion first; the route change follows on the next frame.
                        effects.push(Effect::Position(self.strip.commit(target_index, now)));
                        self.deferred = Some(intent);
                    }
                    Some(Err(err)) => {
                        tracing::warn!("swipe commit refused: {}", err);
                        self.tracker.release();
                        effects.push(Effect::Position(self.strip.snap_back(now)));
                    }
                    None => {
                        self.tracker.release();
                        effects.push(Effect::Position(self.strip.snap_back(now)));
                    }
                }
            }
        }

        TouchResponse {
            prevent_default,
            effects,
        }
    }

    // =====================================================================
    // Frames and timers
    // =====================================================================

    /// One animation frame. Activates staged overlays, fires due timers and
    /// releases a committed swipe's navigation, in that order.
    pub fn on_frame(&mut self, now: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some(activation) = self.overlay.on_frame(now) {
            self.timers
                .schedule(activation.cleanup_at, TimerEvent::OverlayCleanup(activation.ticket));
            effects.extend(activation.directives.into_iter().map(Effect::Position));
            self.refresh_mode(&mut effects);
        }

        for event in self.timers.drain_due(now) {
            match event {
                TimerEvent::OverlayCleanup(ticket) => {
                    if self.overlay.finish(ticket) {
                        self.refresh_mode(&mut effects);
                    }
                }
            }
        }

        if let Some(intent) = self.take_deferred() {
            tracing::info!(to = %intent.to, origin = ?intent.origin, "navigating");
            self.router.navigate(&intent.to);
            effects.push(Effect::Navigate(intent));
            effects.extend(self.sync(now));
        }

        effects
    }

    // =====================================================================
    // Navigation
    // =====================================================================

    /// Explicit navigation (link, tab, pivot label).
    pub fn navigate(&mut self, path: impl Into<ViewPath>, now: Duration) -> Vec<Effect> {
        let path = path.into();
        if &path == self.state.current_path() {
            return Vec::new();
        }
        if let Some(dropped) = self.take_deferred() {
            tracing::debug!(dropped = %dropped.to, to = %path, "push supersedes pending swipe navigation");
            self.state.clear_intent();
        }

        tracing::info!(to = %path, "navigating");
        self.router.navigate(&path);
        let mut effects = vec![Effect::Navigate(NavigationIntent::push(path))];
        effects.extend(self.sync(now));
        effects
    }

    pub fn tap_pivot(&mut self, index: usize, now: Duration) -> Vec<Effect> {
        match self.main_views.path(index).cloned() {
            Some(path) => self.navigate(path, now),
            None => Vec::new(),
        }
    }

    pub fn tap_tab(&mut self, path: impl Into<ViewPath>, now: Duration) -> Vec<Effect> {
        self.navigate(path, now)
    }

    /// Pick up a location change made by the router (or anyone else).
    pub fn sync(&mut self, now: Duration) -> Vec<Effect> {
        let to = self.router.current_path().clone();
        if &to == self.state.current_path() {
            return Vec::new();
        }
        let change = PathChange {
            from: self.state.current_path().clone(),
            to,
            kind: self.router.last_change(),
        };
        self.handle_path_change(change, now)
    }

    fn handle_path_change(&mut self, change: PathChange, now: Duration) -> Vec<Effect> {
        if let Some(deferred) = self.take_deferred() {
            if deferred.to != change.to {
                tracing::debug!(dropped = %deferred.to, arrived = %change.to, "swipe navigation superseded");
            }
        }

        let origin = match self.state.take_intent_for(&change.to) {
            Some(intent) => intent.origin,
            None => match change.kind {
                ChangeKind::Pop => NavOrigin::History,
                ChangeKind::Push => NavOrigin::Push,
            },
        };
        let direction = classify(origin, change.from.as_str(), change.to.as_str(), &self.main_views);
        tracing::debug!(from = %change.from, to = %change.to, ?origin, %direction, "path changed");
        self.state.set_current_path(change.to.clone());

        let mut effects = Vec::new();
        if self.tracker.is_tracking() {
            self.tracker.cancel();
        }

        let old_index = self.main_views.index_of(change.from.as_str());
        let new_index = self.main_views.index_of(change.to.as_str());
        match (old_index, new_index) {
            (Some(_), Some(new)) => {
                self.overlay.abandon();
                effects.push(Effect::Position(self.strip.settle_on(new, true, now)));
            }
            (old, new) => {
                if let Some(new) = new {
                    effects.push(Effect::Position(self.strip.settle_on(new, false, now)));
                } else if let (Some(old), true) = (old, self.strip.is_displaced()) {
                    // Left mid-drag or mid-commit: the exit layer shows the strip at rest.
                    tracing::debug!(index = old, "strip returned to rest under overlay");
                    effects.push(Effect::Position(self.strip.settle_on(old, false, now)));
                }
                let staged = self.overlay.begin(change.from, change.to, direction);
                effects.extend(staged.into_iter().map(Effect::Position));
            }
        }

        self.refresh_mode(&mut effects);
        effects
    }

    /// The committed swipe's navigation leaves the queue; its session goes with it.
    fn take_deferred(&mut self) -> Option<NavigationIntent> {
        self.tracker.release();
        self.deferred.take()
    }

    /// Recompute the view mode and transition flag; emit the mode if it changed.
    fn refresh_mode(&mut self, effects: &mut Vec<Effect>) {
        self.state.set_transition_active(self.overlay.is_busy());
        let mode = match self.overlay.frame() {
            Some(frame) => ViewMode::Overlay {
                exit: frame.exit.clone(),
                enter: frame.enter.clone(),
                direction: frame.direction,
                active: frame.active,
            },
            None => resting_mode(&self.main_views, self.state.current_path()),
        };
        if mode != self.mode {
            self.mode = mode.clone();
            effects.push(Effect::Mode(mode));
        }
    }
}

impl<R: HistoryRouter> TransitionController<R> {
    pub fn back(&mut self, now: Duration) -> Vec<Effect> {
        if !self.router.back() {
            return Vec::new();
        }
        self.sync(now)
    }

    pub fn forward(&mut self, now: Duration) -> Vec<Effect> {
        if !self.router.forward() {
            return Vec::new();
        }
        self.sync(now)
    }
}

fn resting_mode(main_views: &MainViewSet, path: &ViewPath) -> ViewMode {
    match main_views.index_of(path.as_str()) {
        Some(index) => ViewMode::Strip { index },
        None => ViewMode::Page { path: path.clone() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::MemoryRouter;
    use transit_api::{Direction, LayerId, Point, TouchTarget};

    fn controller(start: &str) -> TransitionController<MemoryRouter> {
        let mut c = TransitionController::new(NavConfig::default(), MemoryRouter::new(start)).unwrap();
        c.set_viewport_width(800.0);
        c
    }

    fn touch_start(x: f32, t: u64) -> TouchEvent {
        TouchEvent::Start {
            position: Point::new(x, 300.0),
            target: TouchTarget::Content,
            time_ms: t,
        }
    }

    fn touch_move(x: f32, t: u64) -> TouchEvent {
        TouchEvent::Move {
            position: Point::new(x, 300.0),
            time_ms: t,
        }
    }

    fn touch_end(x: f32, t: u64) -> TouchEvent {
        TouchEvent::End {
            position: Point::new(x, 300.0),
            time_ms: t,
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_in_strip_mode_on_main_view() {
        let c = controller("/");
        assert_eq!(c.view_mode(), &ViewMode::Strip { index: 1 });
        assert_eq!(c.strip_index(), 1);
        assert_eq!(c.initial_effects().len(), 2);
    }

    #[test]
    fn starts_in_page_mode_elsewhere() {
        let c = controller("/stops/5");
        assert_eq!(
            c.view_mode(),
            &ViewMode::Page {
                path: ViewPath::from("/stops/5")
            }
        );
        assert!(c.pivot_header().is_none());
    }

    #[test]
    fn live_drag_moves_strip_and_prevents_scroll() {
        let mut c = controller("/");
        c.handle_touch(touch_start(400.0, 0));
        let response = c.handle_touch(touch_move(350.0, 16));
        assert!(response.prevent_default);
        match &response.effects[..] {
            [Effect::Position(d)] => {
                assert_eq!(d.layer, LayerId::Strip);
                assert_eq!(d.offset.pixels, -50.0);
                assert!(d.transition.is_none());
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn commit_navigates_only_on_next_frame() {
        let mut c = controller("/");
        c.handle_touch(touch_start(700.0, 0));
        c.handle_touch(touch_move(600.0, 16));
        let response = c.handle_touch(touch_end(300.0, 32));
        assert!(matches!(&response.effects[..], [Effect::Position(d)] if d.is_animated()));
        // Armed but not yet navigated.
        assert_eq!(c.router().current_path(), &ViewPath::from("/"));
        assert!(c.state().has_pending_intent());

        let effects = c.on_frame(ms(48));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Navigate(NavigationIntent { origin: NavOrigin::Gesture(Direction::Left), .. })
        )));
        assert_eq!(c.router().current_path(), &ViewPath::from("/nearby"));
        assert_eq!(c.strip_index(), 2);
        assert!(!c.state().has_pending_intent());
        assert_eq!(c.view_mode(), &ViewMode::Strip { index: 2 });
    }

    #[test]
    fn touch_start_while_settling_is_ignored() {
        let mut c = controller("/");
        c.handle_touch(touch_start(400.0, 0));
        c.handle_touch(touch_move(380.0, 10));
        c.handle_touch(touch_end(370.0, 20)); // snap back, settles until 240ms
        c.handle_touch(touch_start(400.0, 100));
        let response = c.handle_touch(touch_move(300.0, 116));
        assert!(response.effects.is_empty());
        assert!(!response.prevent_default);
    }

    #[test]
    fn disabled_swipe_never_tracks() {
        let mut c = controller("/");
        c.set_swipe_enabled(false, ms(0));
        c.handle_touch(touch_start(400.0, 0));
        assert!(c.handle_touch(touch_move(200.0, 16)).effects.is_empty());
    }

    #[test]
    fn disabling_mid_drag_snaps_back() {
        let mut c = controller("/");
        c.handle_touch(touch_start(400.0, 0));
        c.handle_touch(touch_move(300.0, 16));
        let effects = c.set_swipe_enabled(false, ms(20));
        assert!(matches!(&effects[..], [Effect::Position(d)] if d.is_animated() && d.offset.pixels == 0.0));
        assert!(c.is_idle(ms(1000)));
    }

    #[test]
    fn tab_tap_between_main_views_animates_strip() {
        let mut c = controller("/");
        let effects = c.tap_tab("/search", ms(0));
        assert!(matches!(effects[0], Effect::Navigate(_)));
        assert!(matches!(&effects[1], Effect::Position(d) if d.is_animated() && d.layer == LayerId::Strip));
        assert_eq!(c.view_mode(), &ViewMode::Strip { index: 0 });
        assert_eq!(c.tab_bar().active().unwrap().path, "/search");
    }

    #[test]
    fn tap_pivot_out_of_range_does_nothing() {
        let mut c = controller("/");
        assert!(c.tap_pivot(7, ms(0)).is_empty());
        assert_eq!(c.tap_pivot(2, ms(0)).len(), 3);
    }

    #[test]
    fn navigating_to_current_path_is_a_no_op() {
        let mut c = controller("/");
        assert!(c.navigate("/", ms(0)).is_empty());
    }

    #[test]
    fn touch_on_page_view_does_not_swipe() {
        let mut c = controller("/stops/1");
        c.handle_touch(touch_start(400.0, 0));
        assert!(c.handle_touch(touch_move(100.0, 16)).effects.is_empty());
    }
}
