use crate::watchlist::key::WatchlistKey;

/// Insertion-ordered set of watchlist keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    keys: Vec<WatchlistKey>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &WatchlistKey) -> bool {
        self.keys.contains(key)
    }

    /// Add a key; returns false if it was already present
    pub fn insert(&mut self, key: WatchlistKey) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove a key; returns false if it was not present
    pub fn remove(&mut self, key: &WatchlistKey) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Flip membership of a key and return whether it is now a member
    pub fn toggle(&mut self, key: WatchlistKey) -> bool {
        if self.remove(&key) {
            false
        } else {
            self.keys.push(key);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchlistKey> {
        self.keys.iter()
    }

    /// Persisted form: a JSON array of `"<kind>:<id>"` strings
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        serde_json::to_string(&entries)
    }

    /// Parse the persisted form. Anything that is not an array of strings
    /// yields an empty watchlist; entries that are not keys are skipped.
    pub fn decode(raw: &str) -> Self {
        let entries: Vec<String> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Stored watchlist is corrupt, starting empty");
                return Self::new();
            }
        };

        entries
            .iter()
            .filter_map(|entry| match entry.parse::<WatchlistKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    let legacy = WatchlistKey::from_legacy(entry);
                    if legacy.is_none() {
                        tracing::warn!(entry = %entry, error = %e, "Skipping unreadable watchlist entry");
                    }
                    legacy
                }
            })
            .collect()
    }
}

impl FromIterator<WatchlistKey> for Watchlist {
    fn from_iter<I: IntoIterator<Item = WatchlistKey>>(iter: I) -> Self {
        let mut watchlist = Self::new();
        for key in iter {
            watchlist.insert(key);
        }
        watchlist
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a WatchlistKey;
    type IntoIter = std::slice::Iter<'a, WatchlistKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
