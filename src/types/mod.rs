//! # Types Module
//!
//! Request and response bodies of the Housing Price Predictor API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PredictionRequest`] | Nine-field prediction form |
//! | [`OceanProximity`] | Categorical `ocean_proximity` value |
//! | [`PredictionResult`] | `{prediction}` response |
//! | [`User`] | `{id, email}` projection |
//! | [`Credentials`] | Register/login body |
//! | [`TokenResponse`] | Login response |

pub mod prediction;
pub mod user;

pub use prediction::{OceanProximity, PredictionRecord, PredictionRequest, PredictionResult};
pub use user::{Credentials, HealthStatus, TokenResponse, User};
