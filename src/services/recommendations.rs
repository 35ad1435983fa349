use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::ApiClient,
    error::ClientResult,
    models::{Book, Movie, PersonalizedResponse, PopularResponse, SimilarResponse},
};

/// Recommendation surfaces: personalized, popular and item-to-item
///
/// All ranking happens server-side; this service only shapes the requests.
pub struct RecommendationsService {
    client: Arc<ApiClient>,
}

impl RecommendationsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Collaborative-filtering recommendations for the authenticated user.
    pub async fn personalized(&self, limit: u32) -> ClientResult<PersonalizedResponse> {
        self.client
            .get_json(
                "/recommendations/personalized",
                &[("limit", limit.to_string())],
            )
            .await
    }

    /// Popularity-ranked items, available without authentication.
    pub async fn popular(&self, limit: u32) -> ClientResult<PopularResponse> {
        self.client
            .get_json("/recommendations/popular", &[("limit", limit.to_string())])
            .await
    }

    pub async fn similar_movies(
        &self,
        id: Uuid,
        limit: u32,
    ) -> ClientResult<SimilarResponse<Movie>> {
        self.client
            .get_json(
                &format!("/recommendations/similar/movie/{}", id),
                &[("limit", limit.to_string())],
            )
            .await
    }

    pub async fn similar_books(&self, id: Uuid, limit: u32) -> ClientResult<SimilarResponse<Book>> {
        self.client
            .get_json(
                &format!("/recommendations/similar/book/{}", id),
                &[("limit", limit.to_string())],
            )
            .await
    }
}
