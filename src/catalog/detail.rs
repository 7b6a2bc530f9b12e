use serde_json::Value;

use crate::api::{normalize, CastMember, MediaItem, MediaKind, MetadataSource, SourceContext, Video};
use crate::catalog::{degrade, Section};
use crate::error::ApiError;

/// Billed cast members shown in the detail view
pub const CAST_LIMIT: usize = 12;

/// Everything the detail view shows for one title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDetail {
    pub item: MediaItem,
    pub genres: Vec<String>,
    /// Minutes; first episode runtime for series
    pub runtime: Option<u64>,
    pub seasons: Option<u64>,
    pub cast: Section<Vec<CastMember>>,
    pub trailer: Section<Video>,
}

impl TitleDetail {
    /// Build from the three responses; only the details record is required
    pub fn assemble(
        kind: MediaKind,
        id: u64,
        raw: &Value,
        videos: Result<Vec<Video>, ApiError>,
        credits: Result<Vec<CastMember>, ApiError>,
    ) -> Self {
        let trailer = match videos {
            Ok(videos) => videos
                .into_iter()
                .find(Video::is_youtube_trailer)
                .map_or(Section::Empty, Section::Ready),
            Err(e) => Section::Unavailable(degrade(e)),
        };

        let cast = Section::from_list(credits.map(|mut cast| {
            cast.truncate(CAST_LIMIT);
            cast
        }));

        let runtime = match kind {
            MediaKind::Movie => raw.get("runtime").and_then(Value::as_u64),
            MediaKind::TvSeries => raw
                .get("episode_run_time")
                .and_then(|r| r.get(0))
                .and_then(Value::as_u64),
        }
        .filter(|&minutes| minutes > 0);

        Self {
            item: normalize(raw, kind, SourceContext::Details { id }),
            genres: genres(raw),
            runtime,
            seasons: raw.get("number_of_seasons").and_then(Value::as_u64),
            cast,
            trailer,
        }
    }

    /// "1999 • Drama, Thriller • 139m • ★ 8.4", skipping missing parts
    pub fn meta_line(&self) -> String {
        let mut parts = Vec::new();
        if !self.item.release_year.is_empty() {
            parts.push(self.item.release_year.clone());
        }
        if !self.genres.is_empty() {
            parts.push(self.genres.join(", "));
        }
        if let Some(minutes) = self.runtime {
            parts.push(format!("{}m", minutes));
        }
        if let Some(seasons) = self.seasons {
            let noun = if seasons == 1 { "season" } else { "seasons" };
            parts.push(format!("{} {}", seasons, noun));
        }
        match self.item.rating {
            Some(rating) if rating > 0.0 => parts.push(format!("★ {:.1}", rating)),
            _ => parts.push("★ N/A".to_string()),
        }
        parts.join(" • ")
    }
}

/// Fetch details, videos and credits concurrently.
///
/// Fails only when the details record itself cannot be fetched.
pub async fn load_detail<M: MetadataSource>(
    source: &M,
    kind: MediaKind,
    id: u64,
) -> Result<TitleDetail, ApiError> {
    let (details, videos, credits) = tokio::join!(
        source.details(kind, id),
        source.videos(kind, id),
        source.credits(kind, id)
    );

    let raw = details?;
    Ok(TitleDetail::assemble(kind, id, &raw, videos, credits))
}

fn genres(raw: &Value) -> Vec<String> {
    raw.get("genres")
        .and_then(Value::as_array)
        .map(|genres| {
            genres
                .iter()
                .filter_map(|g| g.get("name").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
