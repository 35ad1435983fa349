use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
    models::{Book, BooksResponse, Movie, MoviesResponse, SearchResponse},
};

/// Browsing and semantic search over the movie/book catalog
pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_movies(&self, limit: u32) -> ClientResult<MoviesResponse> {
        self.client
            .get_json("/movies", &[("limit", limit.to_string())])
            .await
    }

    pub async fn movie(&self, id: Uuid) -> ClientResult<Movie> {
        self.client
            .get_json(
                &format!("/movies/{}", id),
                &[("include_details", "true".to_string())],
            )
            .await
    }

    pub async fn list_books(&self, limit: u32) -> ClientResult<BooksResponse> {
        self.client
            .get_json("/books", &[("limit", limit.to_string())])
            .await
    }

    pub async fn book(&self, id: Uuid) -> ClientResult<Book> {
        self.client.get_json(&format!("/books/{}", id), &[]).await
    }

    /// Semantic search over movies, ranked by embedding similarity.
    pub async fn search_movies(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> ClientResult<SearchResponse<Movie>> {
        self.search(query, "movie", limit, threshold).await
    }

    /// Semantic search over books, ranked by embedding similarity.
    pub async fn search_books(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> ClientResult<SearchResponse<Book>> {
        self.search(query, "book", limit, threshold).await
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        kind: &str,
        limit: u32,
        threshold: f64,
    ) -> ClientResult<SearchResponse<T>> {
        if query.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.client
            .get_json(
                "/search/semantic",
                &[
                    ("q", query.to_string()),
                    ("type", kind.to_string()),
                    ("limit", limit.to_string()),
                    ("threshold", threshold.to_string()),
                ],
            )
            .await
    }
}
