//! Structured logging for Triton.
//!
//! Console and rolling NDJSON output, secret redaction, and per-query lifecycle events.

pub mod logger;
pub mod query_events;
pub mod redact;

pub use logger::init_logger;
pub use query_events::{QueryEvent, QueryEventEntry, QueryEventLogger, QUERY_EVENTS_TARGET};
pub use redact::redact_sensitive_data;
