use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::User;

/// Credentials cached for the running application
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Shared in-memory credential store
///
/// Owned by the composition root and handed to the API client, which reads
/// the token for each authenticated request.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: Session) {
        let mut inner = self.inner.write().await;
        *inner = Some(session);
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        *inner = None;
    }

    pub async fn token(&self) -> Option<String> {
        let inner = self.inner.read().await;
        inner.as_ref().map(|s| s.access_token.clone())
    }

    pub async fn user(&self) -> Option<User> {
        let inner = self.inner.read().await;
        inner.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        let inner = self.inner.read().await;
        inner.is_some()
    }
}
