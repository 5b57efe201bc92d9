use std::time::Duration;

use anyhow::Context;
use kb_client::BackendClient;
use kb_config::KbConfig;
use kb_store::{DirStorage, PersistedStore};
use kb_workbench::{SearchSettings, Workbench};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: KbConfig,
    pub workbench: Workbench<BackendClient>,
}

impl AppContext {
    /// Open the saved session against the configured backend.
    pub fn init(config: KbConfig) -> anyhow::Result<Self> {
        let dir = config
            .storage
            .resolve_dir()
            .context("failed to resolve storage directory")?;
        tracing::debug!(dir = %dir.display(), root = config.backend.normalized_root(), "opening session");

        let client = BackendClient::new(
            config.backend.normalized_root(),
            Duration::from_secs(config.backend.timeout_secs),
        );
        let store = PersistedStore::new(DirStorage::new(dir));
        let workbench = Workbench::open(client, store, SearchSettings::from(&config.search));

        Ok(Self { config, workbench })
    }

    pub const fn client(&self) -> &BackendClient {
        self.workbench.backend()
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings::from(&self.config.search)
    }
}
