//! Overlay transitions for navigations that leave or enter the main strip.
//!
//! `Idle -> Staged -> Active -> Idle`. Staging places the exit layer at rest
//! and the enter layer fully off-screen. Activation waits two animation
//! frames: one so both layers paint in place, one so the renderer treats the
//! following change as a transition rather than a jump. Teardown is driven by
//! a timer, not an animation-end event, so dropped frames cannot strand a
//! transition.
//!
//! Every frame owns a [`TransitionTicket`]. Beginning a new transition
//! supersedes the current one; the superseded ticket's timer still fires and
//! is ignored.

use std::time::Duration;
use transit_api::{Direction, LayerId, Offset, PositionDirective, Transition, ViewPath};

/// Animation frames between staging and activation.
pub const ACTIVATION_FRAMES: u8 = 2;

/// Handle for one transition's cleanup timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionFrame {
    pub exit: ViewPath,
    pub enter: ViewPath,
    pub direction: Direction,
    pub active: bool,
    ticket: TransitionTicket,
}

impl TransitionFrame {
    pub fn ticket(&self) -> TransitionTicket {
        self.ticket
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Idle,
    Staged,
    Active,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Staged { frame: TransitionFrame, frames_seen: u8 },
    Active { frame: TransitionFrame },
}

/// Result of the `Staged -> Active` edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub directives: Vec<PositionDirective>,
    /// When to call [`TransitionOrchestrator::finish`] with `ticket`.
    pub cleanup_at: Duration,
    pub ticket: TransitionTicket,
}

#[derive(Debug, Clone)]
pub struct TransitionOrchestrator {
    phase: Phase,
    transition: Transition,
    next_ticket: u64,
}

impl TransitionOrchestrator {
    pub fn new(transition: Transition) -> Self {
        Self {
            phase: Phase::Idle,
            transition,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        match self.phase {
            Phase::Idle => OverlayPhase::Idle,
            Phase::Staged { .. } => OverlayPhase::Staged,
            Phase::Active { .. } => OverlayPhase::Active,
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn frame(&self) -> Option<&TransitionFrame> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Staged { frame, .. } | Phase::Active { frame } => Some(frame),
        }
    }

    /// Stage a new transition, abandoning any in-flight one. Returns the
    /// at-rest placement of both layers.
    pub fn begin(&mut self, exit: ViewPath, enter: ViewPath, direction: Direction) -> Vec<PositionDirective> {
        if let Some(old) = self.frame() {
            tracing::debug!(exit = %old.exit, enter = %old.enter, "overlay transition superseded");
        }
        let ticket = TransitionTicket(self.next_ticket);
        self.next_ticket += 1;

        tracing::debug!(%exit, %enter, %direction, "overlay transition staged");
        self.phase = Phase::Staged {
            frame: TransitionFrame {
                exit,
                enter,
                direction,
                active: false,
                ticket,
            },
            frames_seen: 0,
        };
        vec![
            place(LayerId::Exit, 0.0, None),
            // Enters from the edge opposite to where the exit layer goes.
            place(LayerId::Enter, -direction.sign() * 100.0, None),
        ]
    }

    /// Advance one animation frame. Returns the activation on the frame that
    /// flips the transition live.
    pub fn on_frame(&mut self, now: Duration) -> Option<Activation> {
        let Phase::Staged { frame, frames_seen } = &mut self.phase else {
            return None;
        };
        *frames_seen += 1;
        if *frames_seen < ACTIVATION_FRAMES {
            return None;
        }

        let mut frame = frame.clone();
        frame.active = true;
        let ticket = frame.ticket;
        let directives = vec![
            place(LayerId::Exit, frame.direction.sign() * 100.0, Some(self.transition)),
            place(LayerId::Enter, 0.0, Some(self.transition)),
        ];
        tracing::debug!(exit = %frame.exit, enter = %frame.enter, "overlay transition active");
        self.phase = Phase::Active { frame };

        Some(Activation {
            directives,
            cleanup_at: now + Duration::from_millis(self.transition.duration_ms),
            ticket,
        })
    }

    /// Cleanup timer fired. Tears the frame down if `ticket` is still the
    /// current one; a superseded ticket is a no-op. Returns whether anything
    /// was torn down.
    pub fn finish(&mut self, ticket: TransitionTicket) -> bool {
        match &self.phase {
            Phase::Active { frame } if frame.ticket == ticket => {
                tracing::debug!(enter = %frame.enter, "overlay transition finished");
                self.phase = Phase::Idle;
                true
            }
            _ => {
                tracing::debug!(?ticket, "stale overlay cleanup ignored");
                false
            }
        }
    }

    /// Drop the in-flight frame without waiting for its timer.
    pub fn abandon(&mut self) {
        if let Some(frame) = self.frame() {
            tracing::debug!(enter = %frame.enter, "overlay transition abandoned");
        }
        self.phase = Phase::Idle;
    }
}

fn place(layer: LayerId, percent: f32, transition: Option<Transition>) -> PositionDirective {
    PositionDirective {
        layer,
        offset: Offset::percent(percent),
        transition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_api::Easing;

    fn orchestrator() -> TransitionOrchestrator {
        TransitionOrchestrator::new(Transition {
            duration_ms: 220,
            easing: Easing::EaseOut,
        })
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn path(p: &str) -> ViewPath {
        ViewPath::from(p)
    }

    #[test]
    fn staging_places_enter_layer_off_screen() {
        let mut o = orchestrator();
        let staged = o.begin(path("/"), path("/stops/7"), Direction::Left);
        assert_eq!(o.phase(), OverlayPhase::Staged);
        assert_eq!(staged[0].layer, LayerId::Exit);
        assert_eq!(staged[0].offset.percent, 0.0);
        assert_eq!(staged[1].layer, LayerId::Enter);
        assert_eq!(staged[1].offset.percent, 100.0);
        assert!(staged.iter().all(|d| d.transition.is_none()));
        assert!(!o.frame().unwrap().active);
    }

    #[test]
    fn right_slide_mirrors_offsets() {
        let mut o = orchestrator();
        let staged = o.begin(path("/stops/7"), path("/"), Direction::Right);
        assert_eq!(staged[1].offset.percent, -100.0);
        o.on_frame(ms(0));
        let activation = o.on_frame(ms(16)).unwrap();
        assert_eq!(activation.directives[0].offset.percent, 100.0);
        assert_eq!(activation.directives[1].offset.percent, 0.0);
    }

    #[test]
    fn activation_waits_two_frames() {
        let mut o = orchestrator();
        o.begin(path("/"), path("/map"), Direction::Left);
        assert!(o.on_frame(ms(16)).is_none());
        assert_eq!(o.phase(), OverlayPhase::Staged);

        let activation = o.on_frame(ms(32)).expect("second frame activates");
        assert_eq!(o.phase(), OverlayPhase::Active);
        assert!(o.frame().unwrap().active);
        assert_eq!(activation.cleanup_at, ms(252));
        assert_eq!(activation.directives[0].offset.percent, -100.0);
        assert!(activation.directives.iter().all(|d| d.is_animated()));
    }

    #[test]
    fn idle_frames_do_nothing() {
        let mut o = orchestrator();
        assert!(o.on_frame(ms(16)).is_none());
        assert_eq!(o.phase(), OverlayPhase::Idle);
    }

    #[test]
    fn finish_with_current_ticket_returns_to_idle() {
        let mut o = orchestrator();
        o.begin(path("/"), path("/map"), Direction::Left);
        o.on_frame(ms(16));
        let activation = o.on_frame(ms(32)).unwrap();
        assert!(o.finish(activation.ticket));
        assert_eq!(o.phase(), OverlayPhase::Idle);
        assert!(o.frame().is_none());
    }

    #[test]
    fn superseded_ticket_is_harmless() {
        let mut o = orchestrator();
        o.begin(path("/"), path("/map"), Direction::Left);
        o.on_frame(ms(16));
        let first = o.on_frame(ms(32)).unwrap();

        o.begin(path("/map"), path("/settings"), Direction::Left);
        o.on_frame(ms(48));
        let second = o.on_frame(ms(64)).unwrap();
        assert_ne!(first.ticket, second.ticket);

        assert!(!o.finish(first.ticket));
        assert_eq!(o.phase(), OverlayPhase::Active);
        assert_eq!(o.frame().unwrap().enter, "/settings");

        assert!(o.finish(second.ticket));
        assert_eq!(o.phase(), OverlayPhase::Idle);
    }

    #[test]
    fn finish_before_activation_is_ignored() {
        let mut o = orchestrator();
        o.begin(path("/"), path("/map"), Direction::Left);
        let ticket = o.frame().unwrap().ticket();
        assert!(!o.finish(ticket));
        assert_eq!(o.phase(), OverlayPhase::Staged);
    }
}
