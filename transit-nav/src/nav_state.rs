//! Shared navigation state: the active path, the single pending gesture
//! intent, and whether an overlay transition is running.
//!
//! The gesture side produces an intent with [`NavigationState::arm`]; the side
//! that reacts to path changes consumes it with
//! [`NavigationState::take_intent_for`]. An armed slot refuses a second intent.

use transit_api::{NavigationIntent, ViewPath};

use crate::error::{NavError, Result};

/// Single-slot mailbox for a gesture intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentSlot {
    armed: Option<NavigationIntent>,
}

impl IntentSlot {
    pub fn arm(&mut self, intent: NavigationIntent) -> Result<()> {
        if let Some(pending) = &self.armed {
            return Err(NavError::IntentPending {
                pending: pending.to.clone(),
            });
        }
        self.armed = Some(intent);
        Ok(())
    }

    /// Consume the armed intent if it targets `path`. An intent for any other
    /// path is stale and is discarded.
    pub fn take_for(&mut self, path: &ViewPath) -> Option<NavigationIntent> {
        let intent = self.armed.take()?;
        if &intent.to == path {
            Some(intent)
        } else {
            tracing::debug!(armed = %intent.to, arrived = %path, "discarding stale gesture intent");
            None
        }
    }

    pub fn clear(&mut self) -> Option<NavigationIntent> {
        self.armed.take()
    }

    pub fn peek(&self) -> Option<&NavigationIntent> {
        self.armed.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current_path: ViewPath,
    intent: IntentSlot,
    transition_active: bool,
}

impl NavigationState {
    pub fn new(current_path: ViewPath) -> Self {
        Self {
            current_path,
            intent: IntentSlot::default(),
            transition_active: false,
        }
    }

    pub fn current_path(&self) -> &ViewPath {
        &self.current_path
    }

    pub fn set_current_path(&mut self, path: ViewPath) {
        self.current_path = path;
    }

    pub fn arm(&mut self, intent: NavigationIntent) -> Result<()> {
        self.intent.arm(intent)
    }

    pub fn take_intent_for(&mut self, path: &ViewPath) -> Option<NavigationIntent> {
        self.intent.take_for(path)
    }

    pub fn clear_intent(&mut self) -> Option<NavigationIntent> {
        self.intent.clear()
    }

    pub fn pending_intent(&self) -> Option<&NavigationIntent> {
        self.intent.peek()
    }

    pub fn has_pending_intent(&self) -> bool {
        self.intent.is_armed()
    }

    pub fn transition_active(&self) -> bool {
        self.transition_active
    }

    pub fn set_transition_active(&mut self, active: bool) {
        self.transition_active = active;
    }
}
