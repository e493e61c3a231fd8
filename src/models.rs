// Core data structures for the ucpnz extractor

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::crawler::filter::{display_zone, to_display_zone};
use crate::utils::hash_id;

/// Extracted news article
///
/// Only the persisted view lives here; raw bytes and the parsed document
/// belong to [`crate::crawler::pipeline::PageContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Hash of `source_url`
    pub id: String,
    pub title: String,
    /// Final markdown document (header, metadata, body, footer)
    pub content: String,
    /// Hash of `website_domain`
    pub website_id: String,
    pub website_domain: String,
    pub website_title: String,
    #[serde(with = "timestamp_format")]
    pub update_time: DateTime<FixedOffset>,
    pub source_url: String,
}

impl Article {
    /// Empty article carrying only the site-derived fields
    pub fn for_site(site: &SiteConfig) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            content: String::new(),
            website_id: hash_id(&site.domain),
            website_domain: site.domain.clone(),
            website_title: site.title.clone(),
            update_time: DateTime::<Utc>::default().with_timezone(&display_zone()),
            source_url: String::new(),
        }
    }

    /// Interchange representation of `update_time`
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from(self.update_time)
    }
}

/// Order articles by ascending update time
pub fn sort_by_update_time(articles: &mut [Article]) {
    articles.sort_by(|a, b| a.update_time.cmp(&b.update_time));
}

/// Seconds and nanoseconds since the Unix epoch, UTC
///
/// This is the timestamp shape handed to service layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }
}

impl Timestamp {
    /// Instant in UTC, `None` when out of chrono's range
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

mod timestamp_format {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Timestamp::from(*dt).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ts = Timestamp::deserialize(deserializer)?;
        ts.to_utc()
            .map(to_display_zone)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ts:?}")))
    }
}
