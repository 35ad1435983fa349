use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie as returned by the catalog endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: Uuid,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A book as returned by the catalog endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: Uuid,
    #[serde(default)]
    pub google_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Paged movie listing from `GET /movies`
#[derive(Debug, Clone, Deserialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
}

/// Paged book listing from `GET /books`
#[derive(Debug, Clone, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
}

/// Ranked results from `GET /search/semantic`
///
/// The result element type follows the `type` parameter of the request, so
/// the response is generic over it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    pub query: String,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_minimal_payload() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "title": "Solaris"}"#,
        )
        .unwrap();
        assert_eq!(movie.title, "Solaris");
        assert_eq!(movie.tmdb_id, None);
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_search_response_movies() {
        let response: SearchResponse<Movie> = serde_json::from_str(
            r#"{
                "query": "space station",
                "results": [
                    {"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "title": "Solaris"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.query, "space station");
        assert_eq!(response.results.len(), 1);
    }
}
