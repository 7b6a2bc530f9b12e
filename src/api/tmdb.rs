use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::media::{CastMember, MediaItem, MediaKind, SourceContext, TimeWindow, Video};
use crate::api::normalize::normalize_all;
use crate::api::MetadataSource;
use crate::config::TmdbConfig;
use crate::error::ApiError;

const TMDB_API_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/500x750/000000/FFFFFF?text=No+Image";

/// Poster URL at the given size, or a placeholder image when there is no poster
pub fn poster_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) => format!("{}/{}{}", TMDB_IMAGE_BASE, size, p),
        None => POSTER_PLACEHOLDER.to_string(),
    }
}

/// Backdrop URL at the given size
pub fn backdrop_url(path: Option<&str>, size: &str) -> Option<String> {
    path.map(|p| format!("{}/{}{}", TMDB_IMAGE_BASE, size, p))
}

/// TMDB API client
pub struct TmdbClient {
    client: Client,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    /// Check if the client is configured (has API key)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Build the full request URL for a path and extra query parameters
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            TMDB_API_URL,
            path,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        if !self.is_configured() {
            return Err(ApiError::NotConfigured);
        }

        tracing::debug!(path, "TMDB request");
        let response = self.client.get(self.endpoint(path, params)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_payload(&body)
    }

    async fn listing(
        &self,
        path: &str,
        params: &[(&str, &str)],
        kind: MediaKind,
        context: SourceContext,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let payload = self.get_json(path, params).await?;
        let records: Vec<Value> = results(payload)?;
        Ok(normalize_all(&records, kind, context))
    }
}

impl MetadataSource for TmdbClient {
    async fn details(&self, kind: MediaKind, id: u64) -> Result<Value, ApiError> {
        self.get_json(&format!("/{}/{}", kind, id), &[]).await
    }

    async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, ApiError> {
        let payload = self.get_json(&format!("/{}/{}/videos", kind, id), &[]).await?;
        results(payload)
    }

    async fn credits(&self, kind: MediaKind, id: u64) -> Result<Vec<CastMember>, ApiError> {
        let payload = self.get_json(&format!("/{}/{}/credits", kind, id), &[]).await?;
        let credits: CreditsResponse = decode(payload)?;
        Ok(credits.cast)
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<MediaItem>, ApiError> {
        self.listing(
            "/search/movie",
            &[("query", query), ("page", "1"), ("include_adult", "false")],
            MediaKind::Movie,
            SourceContext::Search,
        )
        .await
    }

    async fn trending(&self, kind: MediaKind, window: TimeWindow) -> Result<Vec<MediaItem>, ApiError> {
        self.listing(
            &format!("/trending/{}/{}", kind, window.as_str()),
            &[],
            kind,
            SourceContext::Trending(window),
        )
        .await
    }

    async fn top_rated(&self, kind: MediaKind) -> Result<Vec<MediaItem>, ApiError> {
        self.listing(
            &format!("/{}/top_rated", kind),
            &[("page", "1")],
            kind,
            SourceContext::TopRated,
        )
        .await
    }
}

/// Parse a response body, surfacing TMDB's `{"success": false}` envelopes as errors
fn parse_payload(body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Malformed(format!("Failed to parse response: {}", e)))?;

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("request rejected");
        return Err(ApiError::Tmdb(message.to_string()));
    }

    if !value.is_object() {
        return Err(ApiError::Malformed("expected a JSON object".to_string()));
    }

    Ok(value)
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload)
        .map_err(|e| ApiError::Malformed(format!("Unexpected response shape: {}", e)))
}

fn results<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, ApiError> {
    decode::<ResultsPage<T>>(payload).map(|page| page.results)
}

// Response types for TMDB API

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}
