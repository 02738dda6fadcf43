use crate::client::core::ApiClient;
use crate::config::{normalize_base_url, ClientConfig};
use crate::form_cache::FormCache;
use crate::session::Session;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Builder for [`ApiClient`].
///
/// Starts from [`ClientConfig::from_env`]; every setter overrides the
/// environment.
pub struct ApiClientBuilder {
    config: ClientConfig,
    storage: Option<Arc<dyn Storage>>,
    token_storage: Option<Arc<dyn Storage>>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            storage: None,
            token_storage: None,
        }
    }

    /// Prefix for every request path. Empty means same-origin.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.config.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    /// Origin that same-origin paths resolve against.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Route every request through `proxy_url`; overrides `HOUSING_PROXY_URL`.
    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Backing store for the token and the cached form.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Separate store for the token only (e.g. the OS keyring).
    pub fn token_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.token_storage = Some(storage);
        self
    }

    /// Build the client.
    ///
    /// Without an explicit storage, the configured state file is used, and
    /// failing that an in-memory store.
    pub fn build(self) -> Result<ApiClient> {
        let transport = Arc::new(HttpTransport::new(&self.config)?);

        let storage: Arc<dyn Storage> = match self.storage {
            Some(storage) => storage,
            None => match self.config.state_file_path() {
                Some(path) => Arc::new(FileStorage::new(path)),
                None => Arc::new(MemoryStorage::new()),
            },
        };
        let token_storage = self.token_storage.unwrap_or_else(|| storage.clone());

        info!(
            api_base = self.config.api_base_label(),
            storage = storage.name(),
            token_storage = token_storage.name(),
            "client ready"
        );

        Ok(ApiClient {
            transport,
            session: Session::new(token_storage),
            form_cache: FormCache::new(storage),
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
