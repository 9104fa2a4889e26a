//! Resolution of raw host element attributes into a validated [`HostConfig`].
//!
//! Attributes are user-editable text, so resolution is a total function:
//! anything unset or unrecognized falls back to the field's default and no
//! error is ever produced.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ATTR_COLLECTION: &str = "data-collection";
pub const ATTR_FILTER: &str = "data-filter";
pub const ATTR_CACHE: &str = "data-cache";
pub const ATTR_MEDIA: &str = "data-media";
pub const ATTR_DATE: &str = "data-date";
pub const ATTR_TITLE_FORMAT: &str = "data-title-format";
pub const ATTR_CONTENT: &str = "data-content";
pub const ATTR_DATE_FORMAT: &str = "data-date-format";
pub const ATTR_REVERSE: &str = "data-reverse";

/// Read access to string attributes by name. `None` means the attribute is unset.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<A: AttributeSource + ?Sized> AttributeSource for &A {
    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

/// Declares an attribute-backed enumeration. The first literal of each
/// variant is the canonical spelling, any further literals are aliases.
macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            default $default:ident => $default_lit:literal $(| $default_alias:literal)*,
            $($variant:ident => $lit:literal $(| $alias:literal)*),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            #[serde(rename = $default_lit)]
            $default,
            $(
                #[serde(rename = $lit)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [Self] = &[Self::$default, $(Self::$variant),*];

            /// Parses an exact attribute literal.
            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $default_lit $(| $default_alias)* => Some(Self::$default),
                    $($lit $(| $alias)* => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Resolves a possibly unset raw value, falling back to the default.
            pub fn resolve(raw: Option<&str>) -> Self {
                raw.and_then(Self::parse).unwrap_or_default()
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    Self::$default => $default_lit,
                    $(Self::$variant => $lit,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

attribute_enum! {
    /// Marker drawn in the media column of each event.
    MediaStyle {
        default Dot => "dot",
        Image => "image",
    }
}

attribute_enum! {
    /// Where the event date is placed relative to the content card.
    DatePosition {
        default Opposite => "opposite",
        AboveTitle => "above-title" | "above title",
        BelowTitle => "below-title" | "below title",
        None => "none",
    }
}

attribute_enum! {
    /// Typographic style of event titles.
    TitleFormat {
        default H3 => "h3",
        H1 => "h1",
        H2 => "h2",
        H4 => "h4",
        P1 => "p1",
        P2 => "p2",
        P3 => "p3",
        Mono => "mono",
    }
}

attribute_enum! {
    /// Which part of an item is shown as the event body.
    BodyContent {
        default Excerpt => "excerpt",
        Body => "body",
        None => "none",
    }
}

attribute_enum! {
    /// Date rendering style.
    DateFormat {
        default Normal => "normal",
        Time => "time",
        Time24 => "time-24",
        Weekday => "weekday",
        Month => "month",
        Year => "year",
    }
}

/// Optional narrowing of a collection to one tag or category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CollectionFilter {
    Tag(String),
    Category(String),
}

impl CollectionFilter {
    /// Parses `tag:<value>` or `category:<value>`. Other shapes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (kind, value) = raw.trim().split_once(':')?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match kind.trim() {
            "tag" => Some(Self::Tag(value.to_string())),
            "category" => Some(Self::Category(value.to_string())),
            _ => None,
        }
    }

    /// Path segment naming the filter kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tag(_) => "tag",
            Self::Category(_) => "category",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Tag(value) | Self::Category(value) => value,
        }
    }
}

impl fmt::Display for CollectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}

/// Fully resolved display configuration for one host element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Opaque collection path or URL. Empty when the host did not set one.
    pub collection_url: String,
    pub filter: Option<CollectionFilter>,
    pub cache: bool,
    pub media: MediaStyle,
    pub date_position: DatePosition,
    pub title_format: TitleFormat,
    pub content: BodyContent,
    pub date_format: DateFormat,
    pub reverse: bool,
}

impl HostConfig {
    /// Reads every `data-*` attribute once and resolves it to a valid value.
    pub fn resolve<A: AttributeSource + ?Sized>(attributes: &A) -> Self {
        let read = |name: &str| attributes.attribute(name);

        let filter = read(ATTR_FILTER).and_then(|raw| {
            let parsed = CollectionFilter::parse(&raw);
            if parsed.is_none() {
                log::warn!("ignoring malformed {ATTR_FILTER} value {raw:?}");
            }
            parsed
        });

        Self {
            collection_url: read(ATTR_COLLECTION).unwrap_or_default(),
            filter,
            cache: resolve_flag(read(ATTR_CACHE).as_deref()),
            media: MediaStyle::resolve(read(ATTR_MEDIA).as_deref()),
            date_position: DatePosition::resolve(read(ATTR_DATE).as_deref()),
            title_format: TitleFormat::resolve(read(ATTR_TITLE_FORMAT).as_deref()),
            content: BodyContent::resolve(read(ATTR_CONTENT).as_deref()),
            date_format: DateFormat::resolve(read(ATTR_DATE_FORMAT).as_deref()),
            reverse: resolve_flag(read(ATTR_REVERSE).as_deref()),
        }
    }
}

/// Only the exact literal `"true"` enables a flag.
fn resolve_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}
