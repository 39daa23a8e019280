//! Query Event Logger
//!
//! Structured per-query lifecycle events (cache hit, dispatch, fallback,
//! completion, failure) emitted on the `query_events` tracing target, which
//! the file layer writes as NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use triton_core::{Backend, QuerySource, Target};

use crate::redact::redact_sensitive_data;

pub const QUERY_EVENTS_TARGET: &str = "query_events";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryEvent {
    CacheHit,
    Dispatched {
        task: String,
        target: Target,
    },
    Fallback {
        failed: Target,
        next: Option<Backend>,
        error_msg: String,
    },
    Completed {
        source: QuerySource,
        processing_time_ms: u64,
        fallback: bool,
    },
    Failed {
        error_msg: String,
    },
}

impl QueryEvent {
    fn is_failure(&self) -> bool {
        matches!(self, QueryEvent::Fallback { .. } | QueryEvent::Failed { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct QueryEventEntry {
    pub query_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: QueryEvent,
}

pub struct QueryEventLogger;

impl QueryEventLogger {
    /// Build a log entry with error text scrubbed of secrets.
    pub fn entry(query_id: &str, mut event: QueryEvent) -> QueryEventEntry {
        match &mut event {
            QueryEvent::Fallback { error_msg, .. } | QueryEvent::Failed { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            _ => {}
        }
        QueryEventEntry {
            query_id: query_id.to_string(),
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn log_event(query_id: &str, event: QueryEvent) {
        let entry = Self::entry(query_id, event);
        let payload = serde_json::to_string(&entry).unwrap_or_default();
        if entry.event.is_failure() {
            warn!(target: QUERY_EVENTS_TARGET, query_id = %entry.query_id, event = %payload, "Query event");
        } else {
            info!(target: QUERY_EVENTS_TARGET, query_id = %entry.query_id, event = %payload, "Query event");
        }
    }
}
