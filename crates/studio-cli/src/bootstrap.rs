//! Composition root: builds the storage, transport, store and lifecycle.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use studio_application::{
    ChatbotService, LifecycleController, LifecycleHandle, LogMessageSender, RemoteSyncService,
    Store, ThemeFlag,
};
use studio_core::config::AppConfig;
use studio_core::storage::KeyValueStore;
use studio_infrastructure::{
    ApiClient, FileKeyValueStore, KeyValueSnapshotRepository, KeyValueTokenRepository,
};

pub struct AppBootstrap {
    pub handle: LifecycleHandle,
    pub theme: ThemeFlag,
    pub chatbot: ChatbotService,
    pub api_base_url: String,
    pub data_dir: PathBuf,
}

impl AppBootstrap {
    pub async fn init(config: &AppConfig, data_dir: PathBuf) -> Result<Self> {
        tracing::info!("[Bootstrap] Data directory: {}", data_dir.display());
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(data_dir.clone()));

        let tokens = Arc::new(KeyValueTokenRepository::new(Arc::clone(&kv)));
        let api = ApiClient::new(&config.api, tokens.clone())
            .map_err(|e| anyhow!("Failed to create API client: {}", e))?;
        let api_base_url = api.base_url().to_string();
        tracing::info!("[Bootstrap] Remote service: {}", api_base_url);

        let store = Arc::new(Store::open(tokens).await);
        let theme = ThemeFlag::new();

        let handle = LifecycleController::new(
            store,
            Arc::new(KeyValueSnapshotRepository::new(kv)),
            Arc::new(RemoteSyncService::new(Arc::new(api))),
            Arc::new(theme.clone()),
        )
        .start()
        .await;
        tracing::info!("[Bootstrap] Lifecycle started in phase {}", handle.phase());

        Ok(Self {
            handle,
            theme,
            chatbot: ChatbotService::new(Arc::new(LogMessageSender)),
            api_base_url,
            data_dir,
        })
    }

    pub fn store(&self) -> &Arc<Store> {
        self.handle.store()
    }

    /// Lets pending work finish and writes the final snapshot.
    pub async fn shutdown(&self) {
        self.handle.shutdown().await;
    }
}
