#![cfg(target_arch = "wasm32")]

use async_trait::async_trait;
use timeline_collection::{FetchError, FragmentExtractor, HttpResponse, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomParser, Response, SupportedType, Window};

/// Transport dùng `window.fetch` của trình duyệt.
#[derive(Clone)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(js_error)?;
        let response: Response = response.dyn_into().map_err(js_error)?;
        let status = response.status();
        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok(HttpResponse {
            status,
            body: body.as_string().unwrap_or_default(),
        })
    }
}

/// Tách một phần của trang HTML bằng `DOMParser`.
pub struct DomFragmentExtractor;

impl FragmentExtractor for DomFragmentExtractor {
    fn extract(&self, html: &str, selector: &str) -> Option<String> {
        let parser = DomParser::new().ok()?;
        let document = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .ok()?;
        let section = document.query_selector(selector).ok()??;
        Some(section.inner_html())
    }
}

fn js_error(err: JsValue) -> FetchError {
    FetchError::Transport(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}
