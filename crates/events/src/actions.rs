//! Action-type identifiers and the closed set of actions the events reducer
//! accepts.
//!
//! Actions are tagged by their `type` field on the wire, so a dispatched
//! `{"type": "Events/SET_CURRENT_TRIGGER", "name": "nightly"}` decodes
//! directly into [`RAEvents::SetCurrentTrigger`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{EventTrigger, ScheduledTrigger, Triggers};
use crate::EventsError;

pub const LOADING_TRIGGERS: &str = "Events/LOADING_TRIGGERS";
pub const LOADED_TRIGGERS: &str = "Events/LOADED_TRIGGERS";
pub const LOADED_SCHEDULED_TRIGGERS: &str = "Events/LOADED_SCHEDULED_TRIGGERS";
pub const LOADED_EVENT_TRIGGERS: &str = "Events/LOADED_EVENT_TRIGGERS";
pub const SET_CURRENT_TRIGGER: &str = "Events/SET_CURRENT_TRIGGER";
pub const LOAD_PENDING_DATA_EVENTS: &str = "Events/LOAD_PENDING_DATA_EVENTS";

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Every declared action-type identifier.
///
/// `LoadPendingDataEvents` is reserved: no [`RAEvents`] variant carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "Events/LOADING_TRIGGERS")]
    LoadingTriggers,
    #[serde(rename = "Events/LOADED_TRIGGERS")]
    LoadedTriggers,
    #[serde(rename = "Events/LOADED_SCHEDULED_TRIGGERS")]
    LoadedScheduledTriggers,
    #[serde(rename = "Events/LOADED_EVENT_TRIGGERS")]
    LoadedEventTriggers,
    #[serde(rename = "Events/SET_CURRENT_TRIGGER")]
    SetCurrentTrigger,
    #[serde(rename = "Events/LOAD_PENDING_DATA_EVENTS")]
    LoadPendingDataEvents,
}

impl ActionType {
    pub const ALL: &'static [ActionType] = &[
        Self::LoadingTriggers,
        Self::LoadedTriggers,
        Self::LoadedScheduledTriggers,
        Self::LoadedEventTriggers,
        Self::SetCurrentTrigger,
        Self::LoadPendingDataEvents,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadingTriggers => LOADING_TRIGGERS,
            Self::LoadedTriggers => LOADED_TRIGGERS,
            Self::LoadedScheduledTriggers => LOADED_SCHEDULED_TRIGGERS,
            Self::LoadedEventTriggers => LOADED_EVENT_TRIGGERS,
            Self::SetCurrentTrigger => SET_CURRENT_TRIGGER,
            Self::LoadPendingDataEvents => LOAD_PENDING_DATA_EVENTS,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = EventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LOADING_TRIGGERS => Ok(Self::LoadingTriggers),
            LOADED_TRIGGERS => Ok(Self::LoadedTriggers),
            LOADED_SCHEDULED_TRIGGERS => Ok(Self::LoadedScheduledTriggers),
            LOADED_EVENT_TRIGGERS => Ok(Self::LoadedEventTriggers),
            SET_CURRENT_TRIGGER => Ok(Self::SetCurrentTrigger),
            LOAD_PENDING_DATA_EVENTS => Ok(Self::LoadPendingDataEvents),
            other => Err(EventsError::UnknownActionType(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// RAEvents
// ---------------------------------------------------------------------------

/// Actions handled by the events reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RAEvents {
    /// A trigger fetch has started.
    #[serde(rename = "Events/LOADING_TRIGGERS")]
    LoadingTriggers,

    /// Both trigger lists were fetched together.
    #[serde(rename = "Events/LOADED_TRIGGERS")]
    SetAllTriggers { data: Triggers },

    #[serde(rename = "Events/LOADED_SCHEDULED_TRIGGERS")]
    SetScheduledTriggers { data: Vec<ScheduledTrigger> },

    #[serde(rename = "Events/LOADED_EVENT_TRIGGERS")]
    SetEventTriggers { data: Vec<EventTrigger> },

    /// Select the trigger shown on the detail pages.
    #[serde(rename = "Events/SET_CURRENT_TRIGGER")]
    SetCurrentTrigger { name: String },
}

impl RAEvents {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::LoadingTriggers => ActionType::LoadingTriggers,
            Self::SetAllTriggers { .. } => ActionType::LoadedTriggers,
            Self::SetScheduledTriggers { .. } => ActionType::LoadedScheduledTriggers,
            Self::SetEventTriggers { .. } => ActionType::LoadedEventTriggers,
            Self::SetCurrentTrigger { .. } => ActionType::SetCurrentTrigger,
        }
    }
}
