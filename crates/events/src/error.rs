//! Error types for the events contract crate.

use thiserror::Error;

/// Errors produced while decoding or validating trigger data.
#[derive(Debug, Error)]
pub enum EventsError {
    // ------ Decoding errors ------

    /// An action-type string that is not one of the declared identifiers.
    #[error("unknown action type: '{0}'")]
    UnknownActionType(String),

    /// A closed string enum received a value outside its set.
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant {
        kind: &'static str,
        value: String,
    },

    /// An invocation timestamp that chrono could not parse.
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Malformed JSON input.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // ------ Validation errors ------

    /// A required string field is empty.
    #[error("trigger '{trigger}': field '{field}' must not be empty")]
    EmptyField {
        trigger: String,
        field: &'static str,
    },

    /// Neither `webhook` nor `webhook_from_env` is set.
    #[error("trigger '{0}' has no webhook configured")]
    MissingWebhook(String),

    /// Both `webhook` and `webhook_from_env` are set.
    #[error("trigger '{0}' sets both webhook and webhook_from_env")]
    AmbiguousWebhook(String),

    /// A header must carry exactly one of `value` / `value_from_env`.
    #[error("trigger '{trigger}': header '{header}' must set exactly one of value or value_from_env")]
    InvalidHeader {
        trigger: String,
        header: String,
    },

    /// A retry policy field is out of range.
    #[error("trigger '{trigger}': retry field '{field}' {reason}")]
    InvalidRetryConf {
        trigger: String,
        field: &'static str,
        reason: &'static str,
    },

    /// The same column is listed twice for one operation.
    #[error("trigger '{trigger}': column '{column}' listed twice for {operation}")]
    DuplicateColumn {
        trigger: String,
        operation: &'static str,
        column: String,
    },

    /// Two triggers of the same kind share a name.
    #[error("duplicate {kind} trigger name: '{name}'")]
    DuplicateTriggerName {
        kind: &'static str,
        name: String,
    },
}
