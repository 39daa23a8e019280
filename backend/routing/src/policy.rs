/// Routing policy: resolve a preference against current availability.
use tracing::debug;
use triton_core::{BackendAvailability, PreferredBackend, Target, TaskCategory};

use crate::table::RoutingTable;

/// Resolve a preference to a reachable target.
///
/// Nothing up means `Offline` regardless of preference. An unavailable
/// preference degrades to whichever backend is up, local first.
pub fn resolve_target(preferred: PreferredBackend, availability: &BackendAvailability) -> Target {
    let remote = availability.remote_available;
    let local = availability.local_available;

    match (preferred, remote, local) {
        (_, false, false) => Target::Offline,
        (PreferredBackend::Remote, true, _) => Target::Remote,
        (PreferredBackend::Local, _, true) => Target::Local,
        (PreferredBackend::Both, true, true) => Target::Both,
        (_, _, true) => Target::Local,
        (_, true, false) => Target::Remote,
    }
}

#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    table: RoutingTable,
}

impl RoutingPolicy {
    pub fn new(table: RoutingTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, task: &TaskCategory, availability: &BackendAvailability) -> Target {
        let preferred = self.table.preferred(task);
        let target = resolve_target(preferred, availability);
        debug!(task = %task.as_str(), %preferred, %target, "Resolved routing target");
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PreferredBackend::{Both, Local, Remote};

    fn avail(remote: bool, local: bool) -> BackendAvailability {
        BackendAvailability {
            remote_available: remote,
            local_available: local,
            last_checked: None,
        }
    }

    #[test]
    fn routing_correctness_table() {
        let cases = [
            (true, true, Remote, Target::Remote),
            (true, true, Local, Target::Local),
            (true, true, Both, Target::Both),
            (true, false, Remote, Target::Remote),
            (true, false, Local, Target::Remote),
            (false, true, Remote, Target::Local),
            (false, false, Remote, Target::Offline),
            (false, false, Local, Target::Offline),
            (false, false, Both, Target::Offline),
        ];
        for (remote, local, pref, expected) in cases {
            assert_eq!(
                resolve_target(pref, &avail(remote, local)),
                expected,
                "remote={remote} local={local} pref={pref}"
            );
        }
    }

    #[test]
    fn both_with_one_side_down_picks_the_live_one() {
        assert_eq!(resolve_target(Both, &avail(true, false)), Target::Remote);
        assert_eq!(resolve_target(Both, &avail(false, true)), Target::Local);
    }

    #[test]
    fn policy_uses_table_default_for_unknown_tasks() {
        let policy = RoutingPolicy::new(RoutingTable::new(
            [(TaskCategory::WeatherAnalysis, Remote)],
            Local,
        ));
        let up = avail(true, true);
        assert_eq!(policy.resolve(&TaskCategory::WeatherAnalysis, &up), Target::Remote);
        assert_eq!(policy.resolve(&TaskCategory::from("crew-roster"), &up), Target::Local);
    }
}
