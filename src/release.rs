// src/release.rs
//
// One version's entry on the release-notes page.
// `scraped_at` is bookkeeping only; equality looks at version + content.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    pub content: Vec<String>,
    #[serde(with = "timestamp")]
    pub scraped_at: DateTime<Utc>,
}

impl Release {
    /// Build a release, dropping blank fragments and repeats (first one wins).
    pub fn new(
        version: impl Into<String>,
        fragments: impl IntoIterator<Item = String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: version.into(),
            content: dedup_fragments(fragments),
            scraped_at,
        }
    }

    /// Non-blank fragments, in order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(String::as_str).filter(|s| !s.trim().is_empty())
    }
}

impl PartialEq for Release {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.content == other.content
    }
}

impl Eq for Release {}

/// Order-preserving exact-match dedup; whitespace-only fragments are dropped.
pub fn dedup_fragments(fragments: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for f in fragments {
        if f.trim().is_empty() { continue; }
        if seen.insert(f.clone()) {
            out.push(f);
        }
    }
    out
}

// RFC 3339 on the way out. On the way in, naive ISO stamps
// ("2025-01-30T09:12:44.123456") are accepted and read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&t.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        if let Ok(t) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(t.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|n| n.and_utc())
            .map_err(|e| D::Error::custom(format!("bad scraped_at {raw:?}: {e}")))
    }
}
