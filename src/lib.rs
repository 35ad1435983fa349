//! Client-side core of the discovery application: a typed API client for the
//! catalog/search/rating/recommendation endpoints, an in-memory session
//! store, and the interaction tracker that ships behavioral telemetry with
//! debouncing and offline replay.

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

use std::sync::Arc;

use api::ApiClient;
use config::{Config, TrackerConfig};
use connectivity::ConnectivityMonitor;
use error::ClientResult;
use services::{
    AuthService, CatalogService, InteractionTracker, RatingsService, RecommendationsService,
};
use session::SessionStore;

/// Composition root wiring the client services together
///
/// One instance per running application. Must be constructed inside a Tokio
/// runtime (the interaction tracker spawns its connectivity watcher here).
pub struct DiscoveryClient {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub ratings: RatingsService,
    pub recommendations: RecommendationsService,
    pub tracker: InteractionTracker,
    pub session: SessionStore,
    pub connectivity: ConnectivityMonitor,
}

impl DiscoveryClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let session = SessionStore::new();
        let api = Arc::new(ApiClient::new(config, session.clone())?);
        let connectivity = ConnectivityMonitor::new();
        let tracker = InteractionTracker::new(
            api.clone(),
            connectivity.subscribe(),
            TrackerConfig::default(),
        );

        Ok(Self {
            auth: AuthService::new(api.clone(), session.clone()),
            catalog: CatalogService::new(api.clone()),
            ratings: RatingsService::new(api.clone()),
            recommendations: RecommendationsService::new(api),
            tracker,
            session,
            connectivity,
        })
    }

    /// Builds a client from environment variables (`.env` supported).
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(&config)?)
    }
}
