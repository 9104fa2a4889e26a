//! HTML fragments for events and the surrounding timeline wrapper.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::format::{format_date, order_items, resolve_body, resolve_title_format, FormatContext};
use crate::item::CollectionItem;
use crate::settings::{DatePosition, HostConfig, MediaStyle};

pub const WRAPPER_CLASS: &str = "timeline-wrapper";
pub const EVENT_CLASS: &str = "tl-event";

/// Markup pieces of one event. Built once per item per render pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedEvent {
    /// Formatted date text, empty when the item has no publish date.
    pub date: String,
    pub date_position: DatePosition,
    pub title: String,
    pub body: String,
    pub media: String,
}

impl RenderedEvent {
    /// The card always carries the date so stylesheets can show it on narrow
    /// layouts; `opposite` adds a second copy outside the card.
    pub fn to_markup(&self) -> String {
        let date = format!(r#"<div class="tl-date"><p>{}</p></div>"#, escape_html(&self.date));
        let (above, below) = match self.date_position {
            DatePosition::BelowTitle => ("", date.as_str()),
            _ => (date.as_str(), ""),
        };
        let opposite = if self.date_position == DatePosition::Opposite {
            date.as_str()
        } else {
            ""
        };

        format!(
            concat!(
                r#"<div class="tl-event">"#,
                "{opposite}",
                r#"<div class="tl-content sqs-block-html">"#,
                r#"<span class="arrow"></span>"#,
                "{above}{title}{below}",
                r#"<div class="tl-body">{body}</div>"#,
                "</div>",
                "{media}",
                "</div>"
            ),
            opposite = opposite,
            above = above,
            title = self.title,
            below = below,
            body = self.body,
            media = self.media,
        )
    }
}

/// Renders a single item with the host's settings.
pub fn render_event(item: &CollectionItem, config: &HostConfig, context: &FormatContext) -> RenderedEvent {
    let date = item
        .publish_on
        .map(|timestamp| format_date(timestamp, config.date_format, context))
        .unwrap_or_default();

    let spec = resolve_title_format(config.title_format);
    let class = if spec.class.is_empty() {
        "tl-title".to_string()
    } else {
        format!("tl-title {}", spec.class)
    };
    let text = escape_html(&item.title);
    let title = if spec.mono {
        format!(r#"<{tag} class="{class}"><code>{text}</code></{tag}>"#, tag = spec.tag)
    } else {
        format!(r#"<{tag} class="{class}">{text}</{tag}>"#, tag = spec.tag)
    };

    let mut media = String::from(r#"<div class="tl-media""#);
    if let Some(point) = item.media_focal_point {
        let _ = write!(media, r#" style="--x: {}; --y: {};""#, point.x, point.y);
    }
    media.push('>');
    if config.media == MediaStyle::Image {
        if let Some(url) = item.asset_url.as_deref().filter(|url| !url.is_empty()) {
            let _ = write!(media, r#"<img src="{}">"#, escape_html(url));
        }
    }
    media.push_str("</div>");

    RenderedEvent {
        date,
        date_position: config.date_position,
        title,
        body: resolve_body(item, config.content).to_string(),
        media,
    }
}

/// Renders every item in display order.
pub fn render_events(items: &[CollectionItem], config: &HostConfig, context: &FormatContext) -> Vec<RenderedEvent> {
    order_items(items, config.reverse)
        .into_iter()
        .map(|item| render_event(item, config, context))
        .collect()
}

/// Wraps events together with the trailing decorative bar.
pub fn wrap_timeline(events: &[RenderedEvent]) -> String {
    let mut html = format!(r#"<div class="{WRAPPER_CLASS}">"#);
    for event in events {
        html.push_str(&event.to_markup());
    }
    html.push_str(r#"<div class="tl-bar"><span></span></div></div>"#);
    html
}

/// Full timeline markup plus the number of events it contains.
pub fn render_timeline(items: &[CollectionItem], config: &HostConfig, context: &FormatContext) -> (String, usize) {
    let events = render_events(items, config, context);
    (wrap_timeline(&events), events.len())
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
