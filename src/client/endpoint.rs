//! Endpoint paths and pagination

use url::form_urlencoded;

pub const USERS_PATH: &str = "/users";
pub const LOGIN_PATH: &str = "/login";
pub const PREDICT_PATH: &str = "/predict";
pub const PREDICTIONS_PATH: &str = "/predictions";
pub const HEALTH_PATH: &str = "/health";

/// Offset/limit pair passed straight through to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Default page for `GET /users`.
    pub const USERS: Page = Page {
        offset: 0,
        limit: 100,
    };
    /// Default page for `GET /predictions`.
    pub const PREDICTIONS: Page = Page {
        offset: 0,
        limit: 20,
    };

    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    pub fn query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("offset", &self.offset.to_string())
            .append_pair("limit", &self.limit.to_string())
            .finish()
    }
}

/// `path?offset=..&limit=..`
pub fn paged_path(path: &str, page: Page) -> String {
    format!("{}?{}", path, page.query())
}
