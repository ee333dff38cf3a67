//! Replays a [`Scenario`] against a [`TransitionController`] on a frame clock.
//!
//! Frames come from a tokio interval, so under a paused runtime the whole
//! replay is deterministic.

use anyhow::{Result, bail};
use serde::Serialize;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval};
use transit_api::{Point, TouchEvent, ViewMode, ViewPath};
use transit_nav::router::Router;
use transit_nav::{Effect, MemoryRouter, NavConfig, TransitionController};

use crate::scenario::{Scenario, Step};

/// One display refresh at 60Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Upper bound on frames spent waiting for the controller to go idle.
const MAX_SETTLE_FRAMES: u32 = 600;

/// An effect stamped with the scenario time it was emitted at.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub at_ms: u64,
    pub effect: Effect,
}

#[derive(Debug)]
pub struct Report {
    pub records: Vec<Record>,
    pub final_path: ViewPath,
    pub final_mode: ViewMode,
    pub frames: u64,
}

pub struct Runner {
    nav: TransitionController<MemoryRouter>,
    started: Instant,
    ticker: Interval,
    records: Vec<Record>,
    frames: u64,
}

impl Runner {
    pub fn new(config: NavConfig, scenario: &Scenario) -> Result<Self> {
        let router = MemoryRouter::new(scenario.start.as_str());
        let mut nav = TransitionController::new(config, router)?;
        nav.set_viewport_width(scenario.viewport_width);

        let mut ticker = interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut runner = Self {
            nav,
            started: Instant::now(),
            ticker,
            records: Vec::new(),
            frames: 0,
        };
        let initial = runner.nav.initial_effects();
        runner.record(Duration::ZERO, initial);
        Ok(runner)
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn record(&mut self, at: Duration, effects: Vec<Effect>) {
        let at_ms = at.as_millis() as u64;
        self.records
            .extend(effects.into_iter().map(|effect| Record { at_ms, effect }));
    }

    async fn frame(&mut self) {
        self.ticker.tick().await;
        self.frames += 1;
        let now = self.now();
        let effects = self.nav.on_frame(now);
        self.record(now, effects);
    }

    pub async fn step(&mut self, step: &Step) -> Result<()> {
        let now = self.now();
        let time_ms = now.as_millis() as u64;
        let effects = match step {
            Step::TouchStart { x, y, target } => {
                self.touch(TouchEvent::Start {
                    position: Point::new(*x, *y),
                    target: *target,
                    time_ms,
                })
            }
            Step::TouchMove { x, y } => self.touch(TouchEvent::Move {
                position: Point::new(*x, *y),
                time_ms,
            }),
            Step::TouchEnd { x, y } => self.touch(TouchEvent::End {
                position: Point::new(*x, *y),
                time_ms,
            }),
            Step::TouchCancel => self.touch(TouchEvent::Cancel { time_ms }),
            Step::Wait { ms } => {
                let until = now + Duration::from_millis(*ms);
                while self.now() < until {
                    self.frame().await;
                }
                return Ok(());
            }
            Step::Navigate { path } => self.nav.navigate(path.as_str(), now),
            Step::Back => {
                if !self.nav.router().can_go_back() {
                    tracing::warn!("back step with empty history");
                }
                self.nav.back(now)
            }
            Step::Forward => self.nav.forward(now),
            Step::TapTab { path } => self.nav.tap_tab(path.as_str(), now),
            Step::TapPivot { index } => {
                if *index >= self.nav.main_views().len() {
                    bail!("pivot index {index} out of range");
                }
                self.nav.tap_pivot(*index, now)
            }
            Step::SetSwipe { enabled } => self.nav.set_swipe_enabled(*enabled, now),
        };
        self.record(now, effects);
        self.frame().await;
        Ok(())
    }

    fn touch(&mut self, event: TouchEvent) -> Vec<Effect> {
        let response = self.nav.handle_touch(event);
        tracing::trace!(?event, prevent_default = response.prevent_default, "touch");
        response.effects
    }

    /// Keep producing frames until nothing is in flight.
    pub async fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if self.nav.is_idle(self.now()) && self.nav.next_deadline().is_none() {
                return;
            }
            self.frame().await;
        }
        tracing::warn!(frames = MAX_SETTLE_FRAMES, "controller did not settle");
    }

    pub async fn run(mut self, steps: &[Step]) -> Result<Report> {
        for (i, step) in steps.iter().enumerate() {
            tracing::debug!(step = i, ?step, "replaying");
            self.step(step).await?;
        }
        self.settle().await;

        Ok(Report {
            final_path: self.nav.router().current_path().clone(),
            final_mode: self.nav.view_mode().clone(),
            frames: self.frames,
            records: self.records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_api::{Direction, NavOrigin};

    fn scenario(json: &str) -> Scenario {
        Scenario::parse(json).unwrap()
    }

    fn navigations(report: &Report) -> Vec<(String, NavOrigin)> {
        report
            .records
            .iter()
            .filter_map(|r| match &r.effect {
                Effect::Navigate(intent) => Some((intent.to.to_string(), intent.origin)),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn bundled_scenario_ends_on_search() {
        let scenario = scenario(include_str!("../scenarios/swipe_then_detail.json"));
        let runner = Runner::new(NavConfig::default(), &scenario).unwrap();
        let report = runner.run(&scenario.steps).await.unwrap();

        assert_eq!(report.final_path, "/search");
        assert_eq!(report.final_mode, ViewMode::Strip { index: 0 });
        assert_eq!(
            navigations(&report),
            [
                ("/nearby".to_string(), NavOrigin::Gesture(Direction::Left)),
                ("/stops/1234".to_string(), NavOrigin::Push),
                ("/search".to_string(), NavOrigin::Push),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn swipe_navigation_lands_one_frame_after_release() {
        let scenario = scenario(
            r#"{ "start": "/", "steps": [
                { "op": "touch_start", "x": 300, "y": 100 },
                { "op": "touch_move", "x": 250, "y": 100 },
                { "op": "touch_end", "x": 100, "y": 100 }
            ] }"#,
        );
        let runner = Runner::new(NavConfig::default(), &scenario).unwrap();
        let report = runner.run(&scenario.steps).await.unwrap();

        let commit_at = report
            .records
            .iter()
            .filter(|r| matches!(&r.effect, Effect::Position(d) if d.is_animated()))
            .map(|r| r.at_ms)
            .next()
            .unwrap();
        let navigate_at = report
            .records
            .iter()
            .find(|r| matches!(r.effect, Effect::Navigate(_)))
            .map(|r| r.at_ms)
            .unwrap();
        assert!(navigate_at > commit_at);
        assert_eq!(report.final_path, "/nearby");
    }

    #[tokio::test(start_paused = true)]
    async fn detail_page_runs_overlay_to_completion() {
        let scenario = scenario(
            r#"{ "start": "/", "steps": [ { "op": "navigate", "path": "/stops/7" } ] }"#,
        );
        let runner = Runner::new(NavConfig::default(), &scenario).unwrap();
        let report = runner.run(&scenario.steps).await.unwrap();

        assert_eq!(
            report.final_mode,
            ViewMode::Page {
                path: ViewPath::from("/stops/7")
            }
        );
        let modes: Vec<_> = report
            .records
            .iter()
            .filter_map(|r| match &r.effect {
                Effect::Mode(mode) => Some(mode.clone()),
                _ => None,
            })
            .collect();
        assert!(modes.iter().any(|m| matches!(m, ViewMode::Overlay { active: false, .. })));
        assert!(modes.iter().any(|m| matches!(m, ViewMode::Overlay { active: true, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_swipe_ignores_drags() {
        let scenario = scenario(
            r#"{ "start": "/", "steps": [
                { "op": "set_swipe", "enabled": false },
                { "op": "touch_start", "x": 300, "y": 100 },
                { "op": "touch_move", "x": 100, "y": 100 },
                { "op": "touch_end", "x": 50, "y": 100 }
            ] }"#,
        );
        let runner = Runner::new(NavConfig::default(), &scenario).unwrap();
        let report = runner.run(&scenario.steps).await.unwrap();

        assert!(navigations(&report).is_empty());
        assert_eq!(report.final_path, "/");
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_pivot_is_an_error() {
        let scenario = scenario(r#"{ "start": "/", "steps": [ { "op": "tap_pivot", "index": 9 } ] }"#);
        let runner = Runner::new(NavConfig::default(), &scenario).unwrap();
        assert!(runner.run(&scenario.steps).await.is_err());
    }
}
