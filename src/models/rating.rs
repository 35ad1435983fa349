use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interaction::ItemKind;

/// A stored star rating for a catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub item_id: Uuid,
    pub item_type: ItemKind,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /ratings`
#[derive(Debug, Clone, Serialize)]
pub struct RatingRequest {
    pub item_id: Uuid,
    pub item_type: ItemKind,
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_request_wire_format() {
        let request = RatingRequest {
            item_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap(),
            item_type: ItemKind::Book,
            rating: 4,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "item_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "item_type": "book",
                "rating": 4,
            })
        );
    }
}
