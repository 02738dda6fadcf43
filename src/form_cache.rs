//! Last prediction form, restored on the next load.
//!
//! Written on every field change and read once when the dashboard opens.
//! A missing or unreadable entry falls back to [`PredictionRequest::default`].

use crate::storage::Storage;
use crate::types::PredictionRequest;
use std::sync::Arc;
use tracing::{debug, warn};

pub const FORM_KEY: &str = "predict_form";

#[derive(Clone)]
pub struct FormCache {
    storage: Arc<dyn Storage>,
}

impl FormCache {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The cached form, or `None` when nothing usable is stored.
    pub fn restore(&self) -> Option<PredictionRequest> {
        let raw = match self.storage.get_item(FORM_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(backend = self.storage.name(), error = %e, "failed to read cached form");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(form) => Some(form),
            Err(e) => {
                debug!(error = %e, "ignoring unparsable cached form");
                None
            }
        }
    }

    pub fn load(&self) -> PredictionRequest {
        self.restore().unwrap_or_default()
    }

    pub fn save(&self, form: &PredictionRequest) {
        let raw = match serde_json::to_string(form) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to encode form");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(FORM_KEY, &raw) {
            warn!(backend = self.storage.name(), error = %e, "failed to cache form");
        }
    }
}
