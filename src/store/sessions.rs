//! Booking session store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::booking::BookingSession;

/// Process-local session map keyed by session id
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, BookingSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a fresh, empty session
    pub async fn create(&self) -> BookingSession {
        let session = BookingSession::new();
        self.inner.write().await.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookingSession> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Booking session {} not found", id)))
    }

    /// Run a mutation against a session while holding the write lock
    pub async fn with_session<T, F>(&self, id: Uuid, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut BookingSession) -> AppResult<T>,
    {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Booking session {} not found", id)))?;
        let result = f(session);
        if result.is_ok() {
            session.updated_at = chrono::Utc::now();
        }
        result
    }

    /// Drop a session; discarding an unknown id is a not-found error
    pub async fn remove(&self, id: Uuid) -> AppResult<BookingSession> {
        self.inner
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Booking session {} not found", id)))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_remove() {
        let store = SessionStore::new();
        let session = store.create().await;
        assert_eq!(store.len().await, 1);

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);

        store.remove(session.id).await.unwrap();
        assert_eq!(store.len().await, 0);
        assert!(store.get(session.id).await.is_err());
    }

    #[tokio::test]
    async fn with_session_touches_updated_at() {
        let store = SessionStore::new();
        let session = store.create().await;
        let before = store.get(session.id).await.unwrap().updated_at;

        store
            .with_session(session.id, |s| {
                s.draft.set(crate::models::BookingField::Name, "Jane");
                Ok(())
            })
            .await
            .unwrap();

        let after = store.get(session.id).await.unwrap();
        assert_eq!(after.draft.name.as_deref(), Some("Jane"));
        assert!(after.updated_at >= before);
    }
}
