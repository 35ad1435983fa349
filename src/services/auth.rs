use std::sync::Arc;

use serde::Serialize;

use crate::{
    api::ApiClient,
    error::ClientResult,
    models::{AuthResponse, User},
    session::{Session, SessionStore},
};

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Account registration, login and the cached session
pub struct AuthService {
    client: Arc<ApiClient>,
    session: SessionStore,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Creates an account and caches the returned credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post_json(
                "/auth/register",
                &RegisterRequest {
                    email,
                    password,
                    name,
                },
            )
            .await?;

        self.cache_session(&response).await;
        Ok(response)
    }

    /// Exchanges credentials for a token and caches it.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;

        self.cache_session(&response).await;
        Ok(response)
    }

    /// Drops the cached session.
    pub async fn logout(&self) {
        self.session.clear().await;
        tracing::debug!("Session cleared");
    }

    /// Fetches the authenticated profile from the backend.
    pub async fn profile(&self) -> ClientResult<User> {
        self.client.get_json("/auth/me", &[]).await
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    async fn cache_session(&self, response: &AuthResponse) {
        self.session
            .set(Session {
                access_token: response.access_token.clone(),
                user: response.user.clone(),
            })
            .await;
        tracing::debug!(user_id = response.user.id, "Session cached");
    }
}
