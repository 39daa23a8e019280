//! Availability edges worth reporting.

use triton_core::{Backend, BackendAvailability};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BackendDown(Backend),
    BackendUp(Backend),
    EnteredOffline,
    LeftOffline,
}

/// Edges between two snapshots.
///
/// Before the first check nothing has been observed, so a never-checked
/// `prev` is compared as if both backends were up: a first check that finds
/// a backend down reports it.
pub fn diff(prev: &BackendAvailability, next: &BackendAvailability) -> Vec<Transition> {
    let baseline = if prev.last_checked.is_none() {
        BackendAvailability {
            remote_available: true,
            local_available: true,
            last_checked: None,
        }
    } else {
        *prev
    };

    let mut out = Vec::new();
    for backend in [Backend::Remote, Backend::Local] {
        match (baseline.is_available(backend), next.is_available(backend)) {
            (true, false) => out.push(Transition::BackendDown(backend)),
            (false, true) => out.push(Transition::BackendUp(backend)),
            _ => {}
        }
    }
    match (baseline.is_offline(), next.is_offline()) {
        (false, true) => out.push(Transition::EnteredOffline),
        (true, false) => out.push(Transition::LeftOffline),
        _ => {}
    }
    out
}
