//! Pure formatting rules for a single event: date text, title markup,
//! body selection and ordering of the whole sequence.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::item::CollectionItem;
use crate::settings::{BodyContent, DateFormat, TitleFormat};

/// Rendering context shared by every event of one timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatContext {
    /// Offset dates are displayed in.
    pub offset: FixedOffset,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl FormatContext {
    /// Builds a context east of UTC by `minutes`. Out-of-range offsets fall back to UTC.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

/// Formats `timestamp` with long en-US style patterns.
pub fn format_date(timestamp: DateTime<Utc>, format: DateFormat, context: &FormatContext) -> String {
    let pattern = match format {
        DateFormat::Normal => "%A, %B %-d",
        DateFormat::Time => "%-I:%M %p",
        DateFormat::Time24 => "%H:%M",
        DateFormat::Weekday => "%A",
        DateFormat::Month => "%B",
        DateFormat::Year => "%Y",
    };
    timestamp
        .with_timezone(&context.offset)
        .format(pattern)
        .to_string()
}

/// Tag, class and monospace flag used to render a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSpec {
    pub tag: &'static str,
    pub class: &'static str,
    /// Wraps the title text in an inline `<code>` span.
    pub mono: bool,
}

pub fn resolve_title_format(format: TitleFormat) -> TitleSpec {
    let (tag, class, mono) = match format {
        TitleFormat::H1 => ("h1", "", false),
        TitleFormat::H2 => ("h2", "", false),
        TitleFormat::H3 => ("h3", "", false),
        TitleFormat::H4 => ("h4", "", false),
        TitleFormat::P1 => ("p", "sqsrte-large", false),
        TitleFormat::P2 => ("p", "", false),
        TitleFormat::P3 => ("p", "sqsrte-small", false),
        TitleFormat::Mono => ("pre", "", true),
    };
    TitleSpec { tag, class, mono }
}

/// Selects the body markup for an item.
///
/// `BodyContent::None` shows the excerpt, same as the default.
pub fn resolve_body(item: &CollectionItem, content: BodyContent) -> &str {
    match content {
        BodyContent::Body => &item.body,
        BodyContent::Excerpt | BodyContent::None => &item.excerpt,
    }
}

/// Items in display order: source order, or the whole sequence inverted when `reverse` is set.
pub fn order_items(items: &[CollectionItem], reverse: bool) -> Vec<&CollectionItem> {
    if reverse {
        items.iter().rev().collect()
    } else {
        items.iter().collect()
    }
}
