//! `triton-providers`: completion backend clients.
//!
//! - [`RemoteClient`]: structured prompt, bearer auth, `text` reply field
//! - [`LocalClient`]: raw input plus context object, `output` reply field
//! - [`ScriptedBackend`]: fixed replies with call counting

pub mod local;
pub mod mock;
pub mod prompt;
pub mod remote;

pub use local::LocalClient;
pub use mock::ScriptedBackend;
pub use prompt::build_remote_prompt;
pub use remote::RemoteClient;

use std::sync::Arc;

use triton_config::BackendsConfig;
use triton_core::{Backend, BackendClient};

/// The remote and local clients, looked up by [`Backend`].
#[derive(Clone)]
pub struct BackendSet {
    remote: Arc<dyn BackendClient>,
    local: Arc<dyn BackendClient>,
}

impl BackendSet {
    pub fn new(remote: Arc<dyn BackendClient>, local: Arc<dyn BackendClient>) -> Self {
        Self { remote, local }
    }

    /// HTTP clients for both backends.
    pub fn from_config(config: &BackendsConfig) -> Self {
        Self::new(
            Arc::new(RemoteClient::new(&config.remote)),
            Arc::new(LocalClient::new(&config.local)),
        )
    }

    pub fn get(&self, backend: Backend) -> &Arc<dyn BackendClient> {
        match backend {
            Backend::Remote => &self.remote,
            Backend::Local => &self.local,
        }
    }
}
