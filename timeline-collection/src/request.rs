use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use timeline_core::CollectionFilter;

/// A collection fetch before it is turned into a concrete URL.
#[derive(Debug, Clone, Copy)]
pub struct CollectionRequest<'a> {
    pub base_url: &'a str,
    pub filter: Option<&'a CollectionFilter>,
    /// When false a `time` parameter defeats intermediate caches.
    pub cache: bool,
}

impl<'a> CollectionRequest<'a> {
    pub fn new(base_url: &'a str, filter: Option<&'a CollectionFilter>, cache: bool) -> Self {
        Self {
            base_url,
            filter,
            cache,
        }
    }

    /// `<base>[/<tag|category>/<value>]?format=json[&time=<epoch ms>]`
    pub fn url(&self, now: DateTime<Utc>) -> String {
        let mut url = match self.filter {
            Some(filter) => format!(
                "{}/{}/{}",
                self.base_url.trim_end_matches('/'),
                filter.kind(),
                filter.value()
            ),
            None => self.base_url.to_string(),
        };

        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str("format=json");
        if !self.cache {
            let _ = write!(url, "&time={}", now.timestamp_millis());
        }
        url
    }
}
