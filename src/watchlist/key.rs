use std::fmt;
use std::str::FromStr;

use crate::api::{MediaItem, MediaKind};
use crate::error::KeyParseError;

/// Identifies a saved title: `(kind, id)`, stored as `"<kind>:<id>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchlistKey {
    pub kind: MediaKind,
    pub id: u64,
}

impl WatchlistKey {
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn movie(id: u64) -> Self {
        Self::new(MediaKind::Movie, id)
    }

    pub fn tv(id: u64) -> Self {
        Self::new(MediaKind::TvSeries, id)
    }

    /// Older watchlists stored bare movie ids
    pub(crate) fn from_legacy(raw: &str) -> Option<Self> {
        parse_id(raw).ok().map(Self::movie)
    }
}

impl fmt::Display for WatchlistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for WatchlistKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| KeyParseError::MissingSeparator(s.to_string()))?;

        let kind = MediaKind::from_segment(kind)
            .ok_or_else(|| KeyParseError::UnknownKind(kind.to_string()))?;

        Ok(Self::new(kind, parse_id(id)?))
    }
}

impl From<&MediaItem> for WatchlistKey {
    fn from(item: &MediaItem) -> Self {
        Self::new(item.kind, item.id)
    }
}

/// Canonical decimal only, so that parsing and display stay inverse
fn parse_id(raw: &str) -> Result<u64, KeyParseError> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));

    if !canonical {
        return Err(KeyParseError::InvalidId(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| KeyParseError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(WatchlistKey::movie(27205).to_string(), "movie:27205");
        assert_eq!(WatchlistKey::tv(1396).to_string(), "tv:1396");
    }

    #[test]
    fn test_round_trip() {
        for s in ["movie:550", "tv:1396", "movie:0", "tv:18446744073709551615"] {
            let key: WatchlistKey = s.parse().unwrap();
            assert_eq!(key.to_string(), s);
        }

        for key in [WatchlistKey::movie(1), WatchlistKey::tv(1), WatchlistKey::tv(u64::MAX)] {
            assert_eq!(key.to_string().parse::<WatchlistKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_same_id_different_kind_is_distinct() {
        assert_ne!(WatchlistKey::movie(1), WatchlistKey::tv(1));
        assert_ne!(WatchlistKey::movie(1).to_string(), WatchlistKey::tv(1).to_string());
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(
            "550".parse::<WatchlistKey>(),
            Err(KeyParseError::MissingSeparator("550".into()))
        );
        assert_eq!(
            "show:1".parse::<WatchlistKey>(),
            Err(KeyParseError::UnknownKind("show".into()))
        );
        for bad in ["movie:", "movie:abc", "movie:+5", "movie:007", "tv:1:2", "movie:-1"] {
            assert!(matches!(
                bad.parse::<WatchlistKey>(),
                Err(KeyParseError::InvalidId(_))
            ), "{bad}");
        }
    }

    #[test]
    fn test_legacy_ids() {
        assert_eq!(WatchlistKey::from_legacy("27205"), Some(WatchlistKey::movie(27205)));
        assert_eq!(WatchlistKey::from_legacy("tv:1"), None);
    }
}
