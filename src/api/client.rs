use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::Config,
    error::{ClientError, ClientResult},
    models::{InteractionAck, InteractionEvent},
    services::InteractionTransport,
    session::SessionStore,
};

/// HTTP wrapper over the discovery backend
///
/// Owns the shared reqwest client, the base URL and the session store; every
/// request is sent with the cached bearer token when one exists.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> ClientResult<Self> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(request).await
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request).await
    }

    /// DELETE a resource, discarding any response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.http.delete(self.url(path));
        let request = self.authorize(request).await;
        let response = request.send().await.map_err(classify_send_error)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = self.authorize(request).await;
        let response = request.send().await.map_err(classify_send_error)?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            _ => ClientError::Api(format!("API returned status {}: {}", status, body)),
        })
    }
}

/// Maps transport-level send failures, splitting out the connect class so
/// callers can tell "the network is gone" from every other failure.
fn classify_send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() {
        ClientError::Offline(e.to_string())
    } else {
        ClientError::Http(e)
    }
}

#[async_trait::async_trait]
impl InteractionTransport for ApiClient {
    async fn send(&self, event: InteractionEvent) -> ClientResult<InteractionAck> {
        self.post_json("/interactions", &event).await
    }
}
