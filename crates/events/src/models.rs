//! Data shapes shared by the metadata-API parsers, the reducer, and the
//! trigger screens.
//!
//! Field names follow the server's JSON exactly so values can be decoded
//! straight from a metadata response.  Nullable fields (`Option<T>` that the
//! server always sends) serialize as `null`; optional fields are skipped when
//! absent.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::EventsError;

// ---------------------------------------------------------------------------
// Closed string vocabularies
// ---------------------------------------------------------------------------

string_enum! {
    /// Which list a trigger lives in.
    pub enum TriggerKind as "trigger kind" {
        Event => "event",
        Cron => "cron",
    }
}

string_enum! {
    /// Source of a fired event.
    pub enum EventKind as "event kind" {
        Data => "data",
        Cron => "cron",
        Scheduled => "scheduled",
    }
}

string_enum! {
    /// Whether a URL is given literally or read from an environment variable.
    pub enum UrlType as "url type" {
        Static => "static",
        Env => "env",
    }
}

string_enum! {
    /// Row-level operations an event trigger can fire on.
    pub enum EventTriggerOperation as "event trigger operation" {
        Insert => "insert",
        Update => "update",
        Delete => "delete",
        /// Invocation from the console's "invoke manually" button.
        EnableManual => "enable_manual",
    }
}

// ---------------------------------------------------------------------------
// Events and invocation logs
// ---------------------------------------------------------------------------

/// A single fired event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Serialized event payload.
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_conf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One webhook delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationLog {
    pub event_id: String,
    pub id: String,
    /// HTTP status returned by the webhook.
    pub status: u16,
    pub created_at: String,
    pub request: String,
    pub response: String,
}

impl InvocationLog {
    /// `true` for a 2xx response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse `created_at` as a UTC instant.
    ///
    /// Accepts RFC 3339 as well as the zone-less `timestamp` form Postgres
    /// emits (`2024-01-31T10:15:00.123456`), which is read as UTC.
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>, EventsError> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|source| EventsError::InvalidTimestamp {
                value: self.created_at.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Headers and webhook URLs
// ---------------------------------------------------------------------------

/// A request header attached to webhook calls.
///
/// Exactly one of `value` / `value_from_env` is expected; see
/// [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from_env: Option<String>,
}

impl ServerHeader {
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from_env: None,
        }
    }

    pub fn from_env(name: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from_env: Some(env_var.into()),
        }
    }
}

/// Webhook as the server encodes it: a bare URL or an env-var reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerWebhookConf {
    Url(String),
    FromEnv { from_env: String },
}

/// Webhook as the trigger forms edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlConf {
    #[serde(rename = "type")]
    pub url_type: UrlType,
    pub value: String,
}

impl From<ServerWebhookConf> for UrlConf {
    fn from(conf: ServerWebhookConf) -> Self {
        match conf {
            ServerWebhookConf::Url(value) => Self { url_type: UrlType::Static, value },
            ServerWebhookConf::FromEnv { from_env } => Self {
                url_type: UrlType::Env,
                value: from_env,
            },
        }
    }
}

impl From<UrlConf> for ServerWebhookConf {
    fn from(conf: UrlConf) -> Self {
        match conf.url_type {
            UrlType::Static => Self::Url(conf.value),
            UrlType::Env => Self::FromEnv { from_env: conf.value },
        }
    }
}

// ---------------------------------------------------------------------------
// Retry policies
// ---------------------------------------------------------------------------

/// Retry policy of an event trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConf {
    pub num_retries: u32,
    pub interval_sec: u32,
    pub timeout_sec: u32,
    pub tolerance_sec: Option<u32>,
}

impl Default for RetryConf {
    fn default() -> Self {
        Self {
            num_retries: 0,
            interval_sec: 10,
            timeout_sec: 60,
            tolerance_sec: None,
        }
    }
}

/// Retry policy of a scheduled trigger.  Same idea as [`RetryConf`], but the
/// server names every field differently and `tolerance_seconds` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRetryConf {
    pub num_retries: u32,
    pub retry_interval_seconds: u32,
    pub timeout_seconds: u32,
    pub tolerance_seconds: u32,
}

impl Default for ScheduledRetryConf {
    fn default() -> Self {
        Self {
            num_retries: 0,
            retry_interval_seconds: 10,
            timeout_seconds: 60,
            tolerance_seconds: 21600,
        }
    }
}

// ---------------------------------------------------------------------------
// Event triggers
// ---------------------------------------------------------------------------

/// Literal the server uses for "every column".
pub const ALL_COLUMNS: &str = "*";

/// Columns an operation watches: every column (`"*"`) or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationColumns {
    All,
    Only(Vec<String>),
}

impl OperationColumns {
    /// Build the column list from the form's checkbox rows.
    pub fn from_selection(columns: &[OperationColumn]) -> Self {
        Self::Only(
            columns
                .iter()
                .filter(|c| c.enabled)
                .map(|c| c.name.clone())
                .collect(),
        )
    }

    pub fn includes(&self, column: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(columns) => columns.iter().any(|c| c == column),
        }
    }

    /// An empty explicit list means the operation never fires.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(columns) if columns.is_empty())
    }
}

impl Serialize for OperationColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL_COLUMNS),
            Self::Only(columns) => columns.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for OperationColumns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Wildcard(String),
            Columns(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Wildcard(s) if s == ALL_COLUMNS => Ok(Self::All),
            Raw::Wildcard(other) => Err(de::Error::invalid_value(
                Unexpected::Str(&other),
                &"\"*\" or a list of column names",
            )),
            Raw::Columns(columns) => Ok(Self::Only(columns)),
        }
    }
}

/// A column checkbox row in the trigger form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub columns: OperationColumns,
}

impl OperationDefinition {
    pub fn all() -> Self {
        Self { columns: OperationColumns::All }
    }

    pub fn only<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: OperationColumns::Only(columns.into_iter().map(Into::into).collect()),
        }
    }

    pub fn none() -> Self {
        Self { columns: OperationColumns::Only(Vec::new()) }
    }
}

/// Per-operation column definitions.  Every operation kind is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDefinitions {
    pub insert: OperationDefinition,
    pub update: OperationDefinition,
    pub delete: OperationDefinition,
    pub enable_manual: OperationDefinition,
}

impl OperationDefinitions {
    pub fn get(&self, op: EventTriggerOperation) -> &OperationDefinition {
        match op {
            EventTriggerOperation::Insert => &self.insert,
            EventTriggerOperation::Update => &self.update,
            EventTriggerOperation::Delete => &self.delete,
            EventTriggerOperation::EnableManual => &self.enable_manual,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventTriggerOperation, &OperationDefinition)> {
        EventTriggerOperation::ALL.iter().map(move |&op| (op, self.get(op)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTriggerConfiguration {
    pub definition: OperationDefinitions,
    #[serde(default)]
    pub headers: Vec<ServerHeader>,
    pub retry_conf: RetryConf,
    pub webhook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_from_env: Option<String>,
}

/// Binds row operations on a table to a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTrigger {
    /// Unique within the schema.
    pub name: String,
    pub table_name: String,
    pub schema_name: String,
    pub comment: Option<String>,
    pub configuration: EventTriggerConfiguration,
}

impl EventTrigger {
    /// Resolve the webhook source.
    ///
    /// # Errors
    /// - [`EventsError::MissingWebhook`] if neither field is set.
    /// - [`EventsError::AmbiguousWebhook`] if both are.
    pub fn webhook_conf(&self) -> Result<ServerWebhookConf, EventsError> {
        let conf = &self.configuration;
        match (&conf.webhook, &conf.webhook_from_env) {
            (Some(url), None) => Ok(ServerWebhookConf::Url(url.clone())),
            (None, Some(env)) => Ok(ServerWebhookConf::FromEnv { from_env: env.clone() }),
            (None, None) => Err(EventsError::MissingWebhook(self.name.clone())),
            (Some(_), Some(_)) => Err(EventsError::AmbiguousWebhook(self.name.clone())),
        }
    }

    /// Operations with a non-empty column set.
    pub fn enabled_operations(&self) -> Vec<EventTriggerOperation> {
        self.configuration
            .definition
            .iter()
            .filter(|(_, def)| !def.columns.is_empty())
            .map(|(op, _)| op)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scheduled triggers
// ---------------------------------------------------------------------------

/// A webhook invoked on a cron schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTrigger {
    pub name: String,
    #[serde(default)]
    pub header_conf: Vec<ServerHeader>,
    /// Opaque; forwarded to the webhook untouched.
    #[serde(default)]
    pub payload: serde_json::Value,
    pub webhook_conf: String,
    pub cron_schedule: String,
    pub retry_conf: ScheduledRetryConf,
    #[serde(default)]
    pub include_in_metadata: bool,
    pub comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregate state and routing
// ---------------------------------------------------------------------------

/// Both trigger lists as held in application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triggers {
    pub scheduled: Vec<ScheduledTrigger>,
    pub event: Vec<EventTrigger>,
}

impl Triggers {
    pub fn find_event(&self, name: &str) -> Option<&EventTrigger> {
        self.event.iter().find(|t| t.name == name)
    }

    pub fn find_scheduled(&self, name: &str) -> Option<&ScheduledTrigger> {
        self.scheduled.iter().find(|t| t.name == name)
    }

    /// Names of one kind of trigger, in list order.
    pub fn names(&self, kind: TriggerKind) -> Vec<&str> {
        match kind {
            TriggerKind::Event => self.event.iter().map(|t| t.name.as_str()).collect(),
            TriggerKind::Cron => self.scheduled.iter().map(|t| t.name.as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.event.is_empty()
    }
}

/// Route parameters of the trigger detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRouteParams {
    #[serde(rename = "triggerName")]
    pub trigger_name: String,
}
