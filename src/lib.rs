//! # housing-client
//!
//! Typed client for the Housing Price Predictor API: registration, login,
//! price predictions and the registered-user listing.
//!
//! ## Overview
//!
//! The crate is a thin client. It keeps a bearer token in a pluggable
//! [`storage::Storage`], attaches it to authenticated calls, and turns every
//! non-2xx response into a typed [`Error`] that can be rendered for the user
//! with [`format::format_error`] or [`Error::user_message`].
//!
//! ## Key Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | JSON request helper and HTTP error normalization |
//! | [`client`] | API operations and the client builder |
//! | [`session`] | Token store and authentication gate |
//! | [`storage`] | Key-value persistence (memory, JSON file, OS keyring) |
//! | [`form_cache`] | Last submitted prediction form |
//! | [`pages`] | Routes, redirects and page view-models |
//! | [`format`] | Error-to-message formatting |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use housing_client::{ApiClientBuilder, PredictionRequest};
//!
//! #[tokio::main]
//! async fn main() -> housing_client::Result<()> {
//!     let client = ApiClientBuilder::new()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!
//!     let token = client.login("me@example.com", "correct horse").await?;
//!     client.session().set_token(&token.access_token);
//!
//!     let result = client.predict(&PredictionRequest::default()).await?;
//!     println!("{}", result.prediction);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod form_cache;
pub mod format;
pub mod pages;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, Page};
pub use config::ClientConfig;
pub use form_cache::FormCache;
pub use session::Session;
pub use types::{
    prediction::{OceanProximity, PredictionRequest, PredictionResult},
    user::{Credentials, HealthStatus, TokenResponse, User},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorKind, HttpError};
