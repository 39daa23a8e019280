/// Routing table: task category → preferred backend.
///
/// Built once from config at startup and never mutated afterwards.
use std::collections::HashMap;

use anyhow::{anyhow, Result};
use triton_config::RoutingConfig;
use triton_core::{PreferredBackend, TaskCategory};

#[derive(Debug, Clone)]
pub struct RoutingTable {
    routes: HashMap<TaskCategory, PreferredBackend>,
    default: PreferredBackend,
}

impl RoutingTable {
    pub fn new(
        routes: impl IntoIterator<Item = (TaskCategory, PreferredBackend)>,
        default: PreferredBackend,
    ) -> Self {
        Self {
            routes: routes.into_iter().collect(),
            default,
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self> {
        let default = config
            .default_backend
            .parse::<PreferredBackend>()
            .map_err(|e| anyhow!("routing.defaultBackend: {e}"))?;

        let mut routes = HashMap::with_capacity(config.tasks.len());
        for (task, pref) in &config.tasks {
            let pref = pref
                .parse::<PreferredBackend>()
                .map_err(|e| anyhow!("routing.tasks.{task}: {e}"))?;
            routes.insert(TaskCategory::from(task.as_str()), pref);
        }
        Ok(Self { routes, default })
    }

    /// Preference for `task`, or the table default when unlisted.
    pub fn preferred(&self, task: &TaskCategory) -> PreferredBackend {
        self.routes.get(task).copied().unwrap_or(self.default)
    }

    pub fn default_backend(&self) -> PreferredBackend {
        self.default
    }

    /// Entries sorted by category label, for display.
    pub fn entries(&self) -> Vec<(TaskCategory, PreferredBackend)> {
        let mut entries: Vec<_> = self.routes.iter().map(|(t, p)| (t.clone(), *p)).collect();
        entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        entries
    }
}
