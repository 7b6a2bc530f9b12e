use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Category of a catalog title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(rename = "tv")]
    TvSeries,
}

impl MediaKind {
    /// Path segment used by TMDB and by the watchlist storage format
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::TvSeries => "tv",
        }
    }

    /// Parse a path segment back into a kind
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::TvSeries),
            _ => None,
        }
    }

    /// Get a display label for the media kind
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::TvSeries => "TV",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trending time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Which upstream endpoint produced a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceContext {
    Search,
    Trending(TimeWindow),
    TopRated,
    /// A single-title lookup; the requested id backs up a record without one
    Details { id: u64 },
}

/// Unified display record for movies and TV series
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    pub kind: MediaKind,
    /// Display title, never empty
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    /// First four characters of the release/first-air date, or empty
    pub release_year: String,
    /// Average score (0.0-10.0)
    pub rating: Option<f64>,
}

impl MediaItem {
    /// Render the item back into a raw record that normalizes to itself
    pub fn to_raw(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "poster_path": self.poster_path,
            "backdrop_path": self.backdrop_path,
            "overview": self.overview,
            "release_year": self.release_year,
            "vote_average": self.rating,
        })
    }

    /// Overview cut down to `max` characters, with an ellipsis when cut
    pub fn synopsis(&self, max: usize) -> String {
        if self.overview.chars().count() <= max {
            self.overview.clone()
        } else {
            format!("{}...", self.overview.chars().take(max).collect::<String>())
        }
    }

    /// Whether the item has any artwork to show
    pub fn has_artwork(&self) -> bool {
        self.backdrop_path.is_some() || self.poster_path.is_some()
    }
}

/// A video attached to a title
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

impl Video {
    /// Whether this is a YouTube-hosted trailer
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.video_type == "Trailer"
    }

    /// URL a player or browser can open
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

/// A billed cast member
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_segments() {
        assert_eq!(MediaKind::Movie.as_str(), "movie");
        assert_eq!(MediaKind::TvSeries.as_str(), "tv");
        assert_eq!(MediaKind::from_segment("tv"), Some(MediaKind::TvSeries));
        assert_eq!(MediaKind::from_segment("Movie"), None);
    }

    #[test]
    fn test_synopsis_truncates() {
        let item = MediaItem {
            id: 1,
            kind: MediaKind::Movie,
            title: "A".into(),
            poster_path: None,
            backdrop_path: None,
            overview: "abcdefghij".into(),
            release_year: String::new(),
            rating: None,
        };
        assert_eq!(item.synopsis(4), "abcd...");
        assert_eq!(item.synopsis(10), "abcdefghij");
        assert!(!item.has_artwork());
    }

    #[test]
    fn test_trailer_detection() {
        let video: Video = serde_json::from_value(json!({
            "key": "abc123",
            "site": "YouTube",
            "type": "Trailer",
            "name": "Official Trailer"
        }))
        .unwrap();
        assert!(video.is_youtube_trailer());
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc123");

        let teaser = Video {
            video_type: "Teaser".into(),
            ..video
        };
        assert!(!teaser.is_youtube_trailer());
    }
}
