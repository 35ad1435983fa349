use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
    models::{ItemKind, Rating, RatingRequest},
};

/// Star-rating CRUD for the authenticated user
pub struct RatingsService {
    client: Arc<ApiClient>,
}

impl RatingsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists the user's ratings, optionally limited to one item kind.
    pub async fn my_ratings(&self, kind: Option<ItemKind>) -> ClientResult<Vec<Rating>> {
        let mut query = Vec::new();
        if let Some(kind) = kind {
            query.push(("item_type", kind.to_string()));
        }
        self.client.get_json("/ratings/my", &query).await
    }

    /// Creates or updates a 1-5 star rating.
    pub async fn rate(&self, item_id: Uuid, kind: ItemKind, rating: u8) -> ClientResult<Rating> {
        if !(1..=5).contains(&rating) {
            return Err(ClientError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }

        self.client
            .post_json(
                "/ratings",
                &RatingRequest {
                    item_id,
                    item_type: kind,
                    rating,
                },
            )
            .await
    }

    pub async fn delete(&self, rating_id: i64) -> ClientResult<()> {
        self.client.delete(&format!("/ratings/{}", rating_id)).await
    }
}
