//! Bridge WASM <-> JavaScript trung lập framework: phân giải cấu hình và
//! render markup timeline mà không cần chạm vào DOM.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::settings::{
    ATTR_CACHE, ATTR_COLLECTION, ATTR_CONTENT, ATTR_DATE, ATTR_DATE_FORMAT, ATTR_FILTER,
    ATTR_MEDIA, ATTR_REVERSE, ATTR_TITLE_FORMAT,
};
use timeline_core::{render_timeline, AttributeSource, FormatContext, HostConfig, TimelineError};
use wasm_bindgen::prelude::*;

/// Attribute bag passed from JS, keyed by the host's `data-*` names.
#[derive(Debug, Default, Deserialize)]
struct JsHostAttributes {
    #[serde(default, rename = "data-collection")]
    collection: Option<String>,
    #[serde(default, rename = "data-filter")]
    filter: Option<String>,
    #[serde(default, rename = "data-cache")]
    cache: Option<String>,
    #[serde(default, rename = "data-media")]
    media: Option<String>,
    #[serde(default, rename = "data-date")]
    date: Option<String>,
    #[serde(default, rename = "data-title-format")]
    title_format: Option<String>,
    #[serde(default, rename = "data-content")]
    content: Option<String>,
    #[serde(default, rename = "data-date-format")]
    date_format: Option<String>,
    #[serde(default, rename = "data-reverse")]
    reverse: Option<String>,
}

impl AttributeSource for JsHostAttributes {
    fn attribute(&self, name: &str) -> Option<String> {
        let value = match name {
            ATTR_COLLECTION => &self.collection,
            ATTR_FILTER => &self.filter,
            ATTR_CACHE => &self.cache,
            ATTR_MEDIA => &self.media,
            ATTR_DATE => &self.date,
            ATTR_TITLE_FORMAT => &self.title_format,
            ATTR_CONTENT => &self.content,
            ATTR_DATE_FORMAT => &self.date_format,
            ATTR_REVERSE => &self.reverse,
            _ => return None,
        };
        value.clone()
    }
}

impl From<JsHostAttributes> for HostConfig {
    fn from(attributes: JsHostAttributes) -> Self {
        HostConfig::resolve(&attributes)
    }
}

fn read_attributes(attributes: Option<JsValue>) -> Result<JsHostAttributes, JsValue> {
    match attributes {
        Some(js_attributes) => from_value(js_attributes)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được thuộc tính host: {err}"))),
        None => Ok(JsHostAttributes::default()),
    }
}

/// Phân giải thuộc tính host thành cấu hình đã kiểm tra.
#[wasm_bindgen(js_name = resolveSettings)]
pub fn resolve_settings(attributes: Option<JsValue>) -> Result<JsValue, JsValue> {
    let config = HostConfig::from(read_attributes(attributes)?);
    to_value(&config).map_err(|err| JsValue::from_str(&format!("Không serialize cấu hình: {err}")))
}

/// Render payload collection (JSON đã parse) thành markup timeline.
#[wasm_bindgen(js_name = renderCollection)]
pub fn render_collection(
    payload: JsValue,
    attributes: Option<JsValue>,
    utc_offset_minutes: Option<i32>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload = from_value::<serde_json::Value>(payload)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON collection: {err}")))?;
    let collection = timeline_collection::parse_collection_value(payload)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    let config = HostConfig::from(read_attributes(attributes)?);
    let context = utc_offset_minutes
        .map(FormatContext::from_offset_minutes)
        .unwrap_or_default();

    let (html, _) = render_timeline(&collection.items, &config, &context);
    Ok(html)
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
