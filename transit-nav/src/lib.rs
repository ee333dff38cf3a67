//! Transit navigation core - swipe tracking, slide direction, strip
//! positioning and overlay transitions for the transit client's views.
//!
//! The controller is single-threaded and host-driven: the host feeds touch
//! events, animation frames and routing changes, and renders the returned
//! [`Effect`]s. Time is always supplied by the host.

pub mod chrome;
pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod gesture;
pub mod main_views;
pub mod nav_state;
pub mod overlay;
pub mod router;
pub mod strip;
pub mod timers;

pub use config::NavConfig;
pub use controller::{Effect, TouchResponse, TransitionController};
pub use error::{NavError, Result};
pub use main_views::MainViewSet;
pub use router::{HistoryRouter, MemoryRouter, Router};
