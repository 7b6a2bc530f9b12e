//! In-memory metadata source for tests.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::api::{CastMember, MediaItem, MediaKind, MetadataSource, TimeWindow, Video};
use crate::error::ApiError;

#[derive(Default)]
pub struct FakeSource {
    pub details: HashMap<(MediaKind, u64), Value>,
    pub videos: HashMap<(MediaKind, u64), Vec<Video>>,
    pub credits: HashMap<(MediaKind, u64), Vec<CastMember>>,
    pub trending: HashMap<MediaKind, Vec<MediaItem>>,
    pub top_rated: HashMap<MediaKind, Vec<MediaItem>>,
    pub search: Vec<MediaItem>,
    /// Endpoints that answer with a transport failure
    pub failing: HashSet<&'static str>,
}

impl FakeSource {
    pub fn with_details(mut self, kind: MediaKind, id: u64, raw: Value) -> Self {
        self.details.insert((kind, id), raw);
        self
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    fn check(&self, endpoint: &'static str) -> Result<(), ApiError> {
        if self.failing.contains(endpoint) {
            Err(ApiError::Status(503))
        } else {
            Ok(())
        }
    }
}

/// Minimal normalized item for fixtures
pub fn item(kind: MediaKind, id: u64, title: &str) -> MediaItem {
    MediaItem {
        id,
        kind,
        title: title.to_string(),
        poster_path: None,
        backdrop_path: None,
        overview: String::new(),
        release_year: String::new(),
        rating: None,
    }
}

impl MetadataSource for FakeSource {
    async fn details(&self, kind: MediaKind, id: u64) -> Result<Value, ApiError> {
        self.check("details")?;
        self.details
            .get(&(kind, id))
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, ApiError> {
        self.check("videos")?;
        Ok(self.videos.get(&(kind, id)).cloned().unwrap_or_default())
    }

    async fn credits(&self, kind: MediaKind, id: u64) -> Result<Vec<CastMember>, ApiError> {
        self.check("credits")?;
        Ok(self.credits.get(&(kind, id)).cloned().unwrap_or_default())
    }

    async fn search_movies(&self, _query: &str) -> Result<Vec<MediaItem>, ApiError> {
        self.check("search")?;
        Ok(self.search.clone())
    }

    async fn trending(&self, kind: MediaKind, _window: TimeWindow) -> Result<Vec<MediaItem>, ApiError> {
        self.check("trending")?;
        Ok(self.trending.get(&kind).cloned().unwrap_or_default())
    }

    async fn top_rated(&self, kind: MediaKind) -> Result<Vec<MediaItem>, ApiError> {
        self.check("top_rated")?;
        Ok(self.top_rated.get(&kind).cloned().unwrap_or_default())
    }
}
