//! `events` crate — the shared vocabulary of the trigger console: action-type
//! identifiers, the action union, trigger data shapes, structural validation,
//! and the reducer that folds actions into state.

#[macro_use]
mod macros;

pub mod models;
pub mod actions;
pub mod error;
pub mod validate;
pub mod state;

pub use models::{
    Event, EventKind, EventTrigger, EventTriggerOperation, InvocationLog, RetryConf,
    ScheduledRetryConf, ScheduledTrigger, ServerHeader, ServerWebhookConf, TriggerKind,
    Triggers, UrlConf, UrlType,
};
pub use actions::{ActionType, RAEvents};
pub use error::EventsError;
pub use validate::validate_triggers;
pub use state::EventsState;
