//! Triton Gateway HTTP API
//!
//! JSON endpoints over the query orchestrator: query, backend status,
//! stats, and cache management.

pub mod health_api;
pub mod query_api;
pub mod server;
pub mod stats_api;

pub use server::{router, start_server, GatewayState};
