//! Maps raw TMDB movie and TV records onto [`MediaItem`].
//!
//! Movie and series records share most field names but disagree on title and
//! date fields. The caller always says which kind a record is; nothing here
//! guesses from the shape.

use serde_json::Value;

use crate::api::media::{MediaItem, MediaKind, SourceContext};

/// Title used when a record carries none
pub const UNTITLED: &str = "Untitled";

const MOVIE_TITLE_FIELDS: &[&str] = &["title", "original_title", "name"];
const TV_TITLE_FIELDS: &[&str] = &["name", "original_name", "title"];

const MOVIE_DATE_FIELDS: &[&str] = &["release_date", "release_year"];
const TV_DATE_FIELDS: &[&str] = &["first_air_date", "release_date", "release_year"];

/// Normalize a raw record into a display item. Never fails.
pub fn normalize(raw: &Value, kind: MediaKind, context: SourceContext) -> MediaItem {
    let (title_fields, date_fields) = match kind {
        MediaKind::Movie => (MOVIE_TITLE_FIELDS, MOVIE_DATE_FIELDS),
        MediaKind::TvSeries => (TV_TITLE_FIELDS, TV_DATE_FIELDS),
    };

    let title = first_text(raw, title_fields)
        .unwrap_or(UNTITLED)
        .to_string();

    let release_year = first_text(raw, date_fields)
        .map(|date| date.chars().take(4).collect())
        .unwrap_or_default();

    MediaItem {
        id: resolve_id(raw, kind, context),
        kind,
        title,
        poster_path: text(raw, "poster_path").map(String::from),
        backdrop_path: text(raw, "backdrop_path").map(String::from),
        overview: text(raw, "overview").unwrap_or_default().to_string(),
        release_year,
        rating: raw.get("vote_average").and_then(Value::as_f64),
    }
}

/// Normalize every record of a listing, skipping entries that are not objects
pub fn normalize_all(raw: &[Value], kind: MediaKind, context: SourceContext) -> Vec<MediaItem> {
    raw.iter()
        .filter(|record| record.is_object())
        .map(|record| normalize(record, kind, context))
        .collect()
}

fn resolve_id(raw: &Value, kind: MediaKind, context: SourceContext) -> u64 {
    if let Some(id) = raw.get("id").and_then(Value::as_u64) {
        return id;
    }
    match context {
        SourceContext::Details { id } => id,
        _ => {
            tracing::warn!(kind = %kind, ?context, "Record without an id");
            0
        }
    }
}

/// A non-empty string field
fn text<'a>(raw: &'a Value, field: &str) -> Option<&'a str> {
    raw.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn first_text<'a>(raw: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields.iter().find_map(|field| text(raw, field))
}
