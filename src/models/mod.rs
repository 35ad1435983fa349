mod catalog;
mod interaction;
mod rating;
mod recommendation;
mod user;

pub use catalog::{Book, BooksResponse, Movie, MoviesResponse, SearchResponse};
pub use interaction::{
    parse_item_id, EventKind, InteractionAck, InteractionEvent, ItemKind, QueuedEvent,
};
pub use rating::{Rating, RatingRequest};
pub use recommendation::{
    PersonalizedResponse, PopularResponse, RecommendationItem, SimilarResponse,
};
pub use user::{AuthResponse, User};
