//! Collection items as delivered by the remote content API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded collection payload. Only `items` is kept; other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

/// One dated entry of a collection.
///
/// Missing or `null` fields decode to empty values instead of failing the
/// whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// HTML.
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    /// HTML.
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(with = "publish_on")]
    pub publish_on: Option<DateTime<Utc>>,
    pub asset_url: Option<String>,
    pub media_focal_point: Option<FocalPoint>,
}

/// Visually important point of an image as fractions of its width and height.
/// A missing coordinate is centered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl FocalPoint {
    /// Parses the packed `"x,y"` form used by image data attributes.
    pub fn parse_packed(raw: &str) -> Option<Self> {
        let (x, y) = raw.split_once(',')?;
        Some(Self {
            x: x.trim().parse().ok()?,
            y: y.trim().parse().ok()?,
        })
    }

    /// Both coordinates as CSS percentages, e.g. `("50%", "25%")`.
    pub fn percentages(&self) -> (String, String) {
        (
            format!("{}%", self.x * 100.0),
            format!("{}%", self.y * 100.0),
        )
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `publishOn` arrives as epoch milliseconds; RFC 3339 strings are accepted too.
mod publish_on {
    use chrono::{DateTime, Utc};
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        FractionalMillis(f64),
        Text(String),
        Unusable(IgnoredAny),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_some(&timestamp.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| match raw {
            RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis),
            RawTimestamp::FractionalMillis(millis) => {
                DateTime::from_timestamp_millis(millis as i64)
            }
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|timestamp| timestamp.with_timezone(&Utc)),
            RawTimestamp::Unusable(_) => None,
        }))
    }
}
