use serde::Deserialize;
use uuid::Uuid;

use super::interaction::ItemKind;

/// One recommended item, shared across the recommendation surfaces
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationItem {
    pub item_id: Uuid,
    pub item_type: ItemKind,
    pub title: String,
    #[serde(default)]
    pub predicted_rating: Option<f64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// Response of `GET /recommendations/personalized`
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalizedResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Response of `GET /recommendations/popular`
#[derive(Debug, Clone, Deserialize)]
pub struct PopularResponse {
    #[serde(default)]
    pub popular_items: Vec<RecommendationItem>,
}

/// Response of `GET /recommendations/similar/{type}/{id}`
///
/// The element type matches the item kind in the path, so the response is
/// generic over it.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarResponse<T> {
    #[serde(default = "Vec::new")]
    pub similar_items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personalized_response_defaults() {
        let response: PersonalizedResponse =
            serde_json::from_str(r#"{"method": "collaborative"}"#).unwrap();
        assert!(response.recommendations.is_empty());
        assert_eq!(response.method.as_deref(), Some("collaborative"));
    }

    #[test]
    fn test_recommendation_item_minimal() {
        let item: RecommendationItem = serde_json::from_str(
            r#"{
                "item_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "item_type": "movie",
                "title": "Stalker",
                "similarity": 0.87
            }"#,
        )
        .unwrap();
        assert_eq!(item.item_type, ItemKind::Movie);
        assert_eq!(item.similarity, Some(0.87));
        assert_eq!(item.predicted_rating, None);
    }
}
