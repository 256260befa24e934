//! In-memory data stores
//!
//! Bookings are never persisted; sessions live for one visit and are
//! dropped on confirmation or discard.

pub mod sessions;

pub use sessions::SessionStore;

/// Container for all stores
#[derive(Clone, Default)]
pub struct Store {
    pub sessions: SessionStore,
}

impl Store {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new(),
        }
    }
}
