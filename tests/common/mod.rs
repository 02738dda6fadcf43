//! Mock backend fixture shared by the integration tests.

#![allow(dead_code)]

use housing_client::config::ClientConfig;
use housing_client::storage::MemoryStorage;
use housing_client::{ApiClient, ApiClientBuilder};
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;

pub struct MockBackend {
    pub server: ServerGuard,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Client pointed at the mock server with in-memory storage.
    pub fn client(&self) -> ApiClient {
        ApiClientBuilder::from_config(ClientConfig::default())
            .base_url(self.url())
            .storage(Arc::new(MemoryStorage::new()))
            .build()
            .expect("client should build")
    }

    /// Same client, already holding `token`.
    pub fn signed_in_client(&self, token: &str) -> ApiClient {
        let client = self.client();
        client.session().set_token(token);
        client
    }
}

/// Matches `path` with or without a query string.
pub fn path(path: &str) -> Matcher {
    Matcher::Regex(format!(r"^{}(\?.*)?$", regex::escape(path)))
}

pub fn page_query(offset: u32, limit: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("offset".into(), offset.to_string()),
        Matcher::UrlEncoded("limit".into(), limit.to_string()),
    ])
}
