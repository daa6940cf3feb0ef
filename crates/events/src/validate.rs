//! Structural validation — run this on trigger metadata before it reaches
//! application state.
//!
//! Rules enforced:
//! 1. Names (and an event trigger's table/schema) are non-empty.
//! 2. An event trigger has exactly one of `webhook` / `webhook_from_env`.
//! 3. Headers carry exactly one of `value` / `value_from_env`.
//! 4. Retry timeouts are strictly positive.
//! 5. Trigger names are unique within each list.
//!
//! Cron expressions are passed through unchecked; the server parses them.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    EventTrigger, OperationColumns, RetryConf, ScheduledRetryConf, ScheduledTrigger,
    ServerHeader, Triggers,
};
use crate::EventsError;

/// Check an event trigger's retry policy.
pub fn validate_retry_conf(trigger: &str, conf: &RetryConf) -> Result<(), EventsError> {
    if conf.timeout_sec == 0 {
        return Err(EventsError::InvalidRetryConf {
            trigger: trigger.to_owned(),
            field: "timeout_sec",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Check a scheduled trigger's retry policy.
pub fn validate_scheduled_retry_conf(
    trigger: &str,
    conf: &ScheduledRetryConf,
) -> Result<(), EventsError> {
    if conf.timeout_seconds == 0 {
        return Err(EventsError::InvalidRetryConf {
            trigger: trigger.to_owned(),
            field: "timeout_seconds",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn validate_headers(trigger: &str, headers: &[ServerHeader]) -> Result<(), EventsError> {
    for header in headers {
        if header.name.is_empty() {
            return Err(EventsError::EmptyField {
                trigger: trigger.to_owned(),
                field: "header name",
            });
        }
        if header.value.is_some() == header.value_from_env.is_some() {
            return Err(EventsError::InvalidHeader {
                trigger: trigger.to_owned(),
                header: header.name.clone(),
            });
        }
    }
    Ok(())
}

fn require(trigger: &str, field: &'static str, value: &str) -> Result<(), EventsError> {
    if value.trim().is_empty() {
        return Err(EventsError::EmptyField {
            trigger: trigger.to_owned(),
            field,
        });
    }
    Ok(())
}

/// Validate one event trigger.
///
/// # Errors
/// - [`EventsError::EmptyField`] for a blank name, table, schema, or header name.
/// - [`EventsError::MissingWebhook`] / [`EventsError::AmbiguousWebhook`] unless
///   exactly one webhook source is set.
/// - [`EventsError::InvalidHeader`], [`EventsError::InvalidRetryConf`],
///   [`EventsError::DuplicateColumn`] for malformed configuration.
pub fn validate_event_trigger(trigger: &EventTrigger) -> Result<(), EventsError> {
    let name = trigger.name.as_str();
    require(name, "name", name)?;
    require(name, "table_name", &trigger.table_name)?;
    require(name, "schema_name", &trigger.schema_name)?;

    trigger.webhook_conf()?;

    let conf = &trigger.configuration;
    validate_headers(name, &conf.headers)?;
    validate_retry_conf(name, &conf.retry_conf)?;

    for (op, def) in conf.definition.iter() {
        if let OperationColumns::Only(columns) = &def.columns {
            let mut seen: HashSet<&str> = HashSet::new();
            for column in columns {
                if !seen.insert(column.as_str()) {
                    return Err(EventsError::DuplicateColumn {
                        trigger: name.to_owned(),
                        operation: op.as_str(),
                        column: column.clone(),
                    });
                }
            }
        }
    }

    debug!(trigger = name, "event trigger is well-formed");
    Ok(())
}

/// Validate one scheduled trigger.
pub fn validate_scheduled_trigger(trigger: &ScheduledTrigger) -> Result<(), EventsError> {
    let name = trigger.name.as_str();
    require(name, "name", name)?;
    require(name, "webhook_conf", &trigger.webhook_conf)?;
    require(name, "cron_schedule", &trigger.cron_schedule)?;
    validate_headers(name, &trigger.header_conf)?;
    validate_scheduled_retry_conf(name, &trigger.retry_conf)?;

    debug!(trigger = name, "scheduled trigger is well-formed");
    Ok(())
}

/// Validate a full snapshot, returning the first problem found.
///
/// Scheduled triggers are checked before event triggers, each list in order.
pub fn validate_triggers(triggers: &Triggers) -> Result<(), EventsError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for trigger in &triggers.scheduled {
        validate_scheduled_trigger(trigger)?;
        if !seen.insert(trigger.name.as_str()) {
            return Err(EventsError::DuplicateTriggerName {
                kind: "cron",
                name: trigger.name.clone(),
            });
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for trigger in &triggers.event {
        validate_event_trigger(trigger)?;
        if !seen.insert(trigger.name.as_str()) {
            return Err(EventsError::DuplicateTriggerName {
                kind: "event",
                name: trigger.name.clone(),
            });
        }
    }

    debug!(
        scheduled = triggers.scheduled.len(),
        event = triggers.event.len(),
        "trigger snapshot validated"
    );
    Ok(())
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventTriggerConfiguration, OperationDefinition, OperationDefinitions};

    fn make_event(name: &str) -> EventTrigger {
        EventTrigger {
            name: name.into(),
            table_name: "orders".into(),
            schema_name: "public".into(),
            comment: None,
            configuration: EventTriggerConfiguration {
                definition: OperationDefinitions {
                    insert: OperationDefinition::all(),
                    update: OperationDefinition::none(),
                    delete: OperationDefinition::none(),
                    enable_manual: OperationDefinition::none(),
                },
                headers: vec![],
                retry_conf: RetryConf::default(),
                webhook: Some("https://example.com/hook".into()),
                webhook_from_env: None,
            },
        }
    }

    fn make_scheduled(name: &str) -> ScheduledTrigger {
        ScheduledTrigger {
            name: name.into(),
            header_conf: vec![],
            payload: serde_json::Value::Null,
            webhook_conf: "https://example.com/cron".into(),
            cron_schedule: "0 * * * *".into(),
            retry_conf: ScheduledRetryConf::default(),
            include_in_metadata: true,
            comment: None,
        }
    }

    #[test]
    fn minimal_event_trigger_is_valid() {
        validate_event_trigger(&make_event("t")).expect("should be valid");
    }

    #[test]
    fn missing_webhook_is_rejected() {
        let mut trigger = make_event("t");
        trigger.configuration.webhook = None;
        assert!(matches!(
            validate_event_trigger(&trigger),
            Err(EventsError::MissingWebhook(name)) if name == "t"
        ));
    }

    #[test]
    fn both_webhooks_are_rejected() {
        let mut trigger = make_event("t");
        trigger.configuration.webhook_from_env = Some("HOOK_URL".into());
        assert!(matches!(validate_event_trigger(&trigger), Err(EventsError::AmbiguousWebhook(_))));
    }

    #[test]
    fn env_webhook_alone_is_valid() {
        let mut trigger = make_event("t");
        trigger.configuration.webhook = None;
        trigger.configuration.webhook_from_env = Some("HOOK_URL".into());
        validate_event_trigger(&trigger).expect("env webhook should be valid");
    }

    #[test]
    fn blank_table_is_rejected() {
        let mut trigger = make_event("t");
        trigger.table_name = "  ".into();
        assert!(matches!(
            validate_event_trigger(&trigger),
            Err(EventsError::EmptyField { field: "table_name", .. })
        ));
    }

    #[test]
    fn literal_and_env_headers_are_valid() {
        let mut trigger = make_event("t");
        trigger.configuration.headers = vec![
            ServerHeader::literal("x-source", "console"),
            ServerHeader::from_env("x-api-key", "ORDERS_API_KEY"),
        ];
        validate_event_trigger(&trigger).expect("headers should be valid");

        let mut scheduled = make_scheduled("s");
        scheduled.header_conf = vec![ServerHeader::from_env("x-api-key", "CRON_API_KEY")];
        validate_scheduled_trigger(&scheduled).expect("env header should be valid");
    }

    #[test]
    fn header_with_both_sources_is_rejected() {
        let mut trigger = make_event("t");
        let mut header = ServerHeader::literal("x-secret", "a");
        header.value_from_env = Some("SECRET".into());
        trigger.configuration.headers.push(header);
        assert!(matches!(
            validate_event_trigger(&trigger),
            Err(EventsError::InvalidHeader { header, .. }) if header == "x-secret"
        ));
    }

    #[test]
    fn header_without_value_is_rejected() {
        let mut scheduled = make_scheduled("s");
        let mut header = ServerHeader::from_env("x-api-key", "CRON_API_KEY");
        header.value_from_env = None;
        scheduled.header_conf.push(header);
        assert!(matches!(
            validate_scheduled_trigger(&scheduled),
            Err(EventsError::InvalidHeader { header, .. }) if header == "x-api-key"
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut trigger = make_event("t");
        trigger.configuration.retry_conf.timeout_sec = 0;
        assert!(matches!(
            validate_event_trigger(&trigger),
            Err(EventsError::InvalidRetryConf { field: "timeout_sec", .. })
        ));

        let mut scheduled = make_scheduled("s");
        scheduled.retry_conf.timeout_seconds = 0;
        assert!(matches!(
            validate_scheduled_trigger(&scheduled),
            Err(EventsError::InvalidRetryConf { field: "timeout_seconds", .. })
        ));
    }

    #[test]
    fn repeated_column_is_rejected() {
        let mut trigger = make_event("t");
        trigger.configuration.definition.update = OperationDefinition::only(["status", "status"]);
        assert!(matches!(
            validate_event_trigger(&trigger),
            Err(EventsError::DuplicateColumn { operation: "update", .. })
        ));
    }

    #[test]
    fn empty_cron_schedule_is_rejected() {
        let mut scheduled = make_scheduled("s");
        scheduled.cron_schedule = String::new();
        assert!(matches!(
            validate_scheduled_trigger(&scheduled),
            Err(EventsError::EmptyField { field: "cron_schedule", .. })
        ));
    }

    #[test]
    fn duplicate_names_within_a_list_are_rejected() {
        let triggers = Triggers {
            scheduled: vec![make_scheduled("nightly"), make_scheduled("nightly")],
            event: vec![],
        };
        assert!(matches!(
            validate_triggers(&triggers),
            Err(EventsError::DuplicateTriggerName { kind: "cron", name }) if name == "nightly"
        ));
    }

    #[test]
    fn same_name_across_lists_is_allowed() {
        let triggers = Triggers {
            scheduled: vec![make_scheduled("shared")],
            event: vec![make_event("shared")],
        };
        validate_triggers(&triggers).expect("lists are independent");
    }
}
