mod media;
mod normalize;
mod tmdb;

#[cfg(test)]
pub mod testing;

use std::future::Future;

use serde_json::Value;

use crate::error::ApiError;

pub use media::{CastMember, MediaItem, MediaKind, SourceContext, TimeWindow, Video};
pub use normalize::normalize;
pub use tmdb::{backdrop_url, poster_url, TmdbClient};

/// Remote catalog the rest of the app reads from.
///
/// Every call may fail; callers decide how to degrade.
pub trait MetadataSource: Send + Sync {
    /// Raw detail record for a single title
    fn details(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    fn videos(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> impl Future<Output = Result<Vec<Video>, ApiError>> + Send;

    fn credits(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> impl Future<Output = Result<Vec<CastMember>, ApiError>> + Send;

    /// First page of movie search results
    fn search_movies(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<MediaItem>, ApiError>> + Send;

    fn trending(
        &self,
        kind: MediaKind,
        window: TimeWindow,
    ) -> impl Future<Output = Result<Vec<MediaItem>, ApiError>> + Send;

    fn top_rated(
        &self,
        kind: MediaKind,
    ) -> impl Future<Output = Result<Vec<MediaItem>, ApiError>> + Send;
}
