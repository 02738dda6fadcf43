//! Key-value persistence for client state.
//!
//! Client state (the bearer token and the cached form) lives in a
//! [`Storage`] implementation chosen at startup:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStorage`] | tests and one-shot processes |
//! | [`FileStorage`] | a JSON object on disk, shared across runs |
//! | [`KeyringStorage`] | OS credential store, for the bearer token |

mod backend;
mod credential;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use credential::KeyringStorage;
