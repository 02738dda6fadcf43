//! OS credential store backend.
//!
//! Each key becomes one keyring entry under a fixed service name, so the
//! bearer token never touches the state file.

use super::Storage;
use crate::{Error, Result};
use keyring::Entry;

pub const DEFAULT_SERVICE: &str = "housing-client";

pub struct KeyringStorage {
    service: String,
}

impl KeyringStorage {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).map_err(keyring_error)
    }
}

impl Default for KeyringStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

fn keyring_error(e: keyring::Error) -> Error {
    Error::storage(format!("keyring: {}", e))
}

impl Storage for KeyringStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value).map_err(keyring_error)
    }
    fn remove_item(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(e)),
        }
    }
    fn name(&self) -> &'static str {
        "keyring"
    }
}
