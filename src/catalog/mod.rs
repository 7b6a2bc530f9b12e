//! View models assembled from the metadata source.
//!
//! Each independently fetched part of a view is a [`Section`], so one failed
//! request marks only its own part unavailable.

mod detail;

use crate::api::{MediaItem, MediaKind, MetadataSource, TimeWindow};
use crate::error::{ApiError, FailureKind};

pub use detail::{load_detail, TitleDetail, CAST_LIMIT};

/// Items shown per home row
pub const ROW_LIMIT: usize = 18;
/// Items shown in the home grid
pub const GRID_LIMIT: usize = 40;

/// One independently fetched part of a view
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    /// Fetched fine, nothing to show
    Empty,
    /// The fetch failed
    Unavailable(FailureKind),
}

impl<T> Section<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Section::Unavailable(_))
    }
}

impl<T> Section<Vec<T>> {
    /// Wrap a list result, mapping an empty list to [`Section::Empty`]
    pub fn from_list(result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Section::Empty,
            Ok(items) => Section::Ready(items),
            Err(e) => Section::Unavailable(degrade(e)),
        }
    }

    /// Items to render; empty unless ready
    pub fn items(&self) -> &[T] {
        self.as_ready().map(Vec::as_slice).unwrap_or(&[])
    }
}

pub(crate) fn degrade(error: ApiError) -> FailureKind {
    tracing::warn!(error = %error, "Section unavailable");
    error.failure_kind()
}

/// Landing page content
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub trending: Section<Vec<MediaItem>>,
    pub top_rated: Section<Vec<MediaItem>>,
    pub featured: Option<MediaItem>,
    pub grid: Vec<MediaItem>,
}

/// Load trending and top rated movies concurrently
pub async fn load_home<M: MetadataSource>(source: &M) -> HomeFeed {
    let (trending, top_rated) = tokio::join!(
        source.trending(MediaKind::Movie, TimeWindow::Week),
        source.top_rated(MediaKind::Movie)
    );

    let trending = trending.map(|mut items| {
        items.truncate(GRID_LIMIT);
        items
    });
    let grid = trending.as_ref().map(Vec::clone).unwrap_or_default();
    let featured = pick_featured(&grid).cloned();

    HomeFeed {
        trending: Section::from_list(trending.map(|items| truncated(items, ROW_LIMIT))),
        top_rated: Section::from_list(top_rated.map(|items| truncated(items, ROW_LIMIT))),
        featured,
        grid,
    }
}

/// Trending series of the week, for the TV listing
pub async fn load_tv_shows<M: MetadataSource>(source: &M) -> Section<Vec<MediaItem>> {
    Section::from_list(source.trending(MediaKind::TvSeries, TimeWindow::Week).await)
}

/// Movie search; blank queries skip the request
pub async fn search<M: MetadataSource>(source: &M, query: &str) -> Section<Vec<MediaItem>> {
    let query = query.trim();
    if query.is_empty() {
        return Section::Empty;
    }
    Section::from_list(source.search_movies(query).await)
}

/// First title with artwork, falling back to the first title
pub fn pick_featured(items: &[MediaItem]) -> Option<&MediaItem> {
    items
        .iter()
        .find(|item| item.has_artwork())
        .or_else(|| items.first())
}

fn truncated(mut items: Vec<MediaItem>, limit: usize) -> Vec<MediaItem> {
    items.truncate(limit);
    items
}
