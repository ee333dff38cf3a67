//! Navigation core error types.
//!
//! Degenerate touch input is never an error; it cancels the gesture instead.
//! Errors only come from configuration and from misuse of the intent slot.

use thiserror::Error;
use transit_api::ViewPath;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("config error: {0}")]
    Config(String),

    #[error("main view set is empty")]
    EmptyMainViews,

    #[error("duplicate main view: {0}")]
    DuplicateMainView(String),

    #[error("gesture navigation to {pending} has not been consumed yet")]
    IntentPending { pending: ViewPath },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
