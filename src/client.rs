//! API client for the Housing Price Predictor backend.
//!
//! Keep the public surface small: build an [`ApiClient`] with
//! [`ApiClientBuilder`], then call one method per backend operation.

pub mod builder;
pub mod core;
pub mod endpoint;

pub use builder::ApiClientBuilder;
pub use self::core::ApiClient;
pub use endpoint::Page;
