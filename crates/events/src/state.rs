//! Events state and the reducer that folds [`RAEvents`] into it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actions::RAEvents;
use crate::models::{EventTrigger, ScheduledTrigger, Triggers};

/// Application state owned by the events screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsState {
    pub triggers: Triggers,
    /// A fetch is in flight.
    pub loading: bool,
    /// Name of the trigger shown on the detail pages.
    pub current_trigger: Option<String>,
}

impl EventsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action.
    pub fn apply(&mut self, action: &RAEvents) {
        debug!(action = %action.action_type(), "applying events action");

        match action {
            RAEvents::LoadingTriggers => {
                self.loading = true;
            }
            RAEvents::SetAllTriggers { data } => {
                self.triggers = data.clone();
                self.loading = false;
            }
            RAEvents::SetScheduledTriggers { data } => {
                self.triggers.scheduled = data.clone();
                self.loading = false;
            }
            RAEvents::SetEventTriggers { data } => {
                self.triggers.event = data.clone();
                self.loading = false;
            }
            RAEvents::SetCurrentTrigger { name } => {
                self.current_trigger = Some(name.clone());
            }
        }
    }

    /// Fold a sequence of actions into a fresh state.
    pub fn replay<'a, I>(actions: I) -> Self
    where
        I: IntoIterator<Item = &'a RAEvents>,
    {
        actions.into_iter().fold(Self::new(), |mut state, action| {
            state.apply(action);
            state
        })
    }

    pub fn current_event_trigger(&self) -> Option<&EventTrigger> {
        self.current_trigger
            .as_deref()
            .and_then(|name| self.triggers.find_event(name))
    }

    pub fn current_scheduled_trigger(&self) -> Option<&ScheduledTrigger> {
        self.current_trigger
            .as_deref()
            .and_then(|name| self.triggers.find_scheduled(name))
    }
}
