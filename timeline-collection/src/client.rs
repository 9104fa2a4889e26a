use async_trait::async_trait;
use chrono::{DateTime, Utc};
use timeline_core::{Collection, CollectionFilter, CollectionSource, Diagnostic, TimelineError};

use crate::parse_collection_str;
use crate::request::CollectionRequest;
use crate::transport::{FetchError, Transport};

/// Pulls one section out of a fetched HTML page.
pub trait FragmentExtractor {
    /// Inner HTML of the first element matching `selector`.
    fn extract(&self, html: &str, selector: &str) -> Option<String>;
}

/// Section holding page content for the given site template version.
pub fn fragment_selector(template_version: Option<&str>) -> &'static str {
    match template_version {
        Some("7") => "main > *:first-child",
        _ => "#sections",
    }
}

/// Fetches collections and page fragments over a [`Transport`].
pub struct CollectionClient<T> {
    transport: T,
    clock: fn() -> DateTime<Utc>,
}

impl<T: Transport> CollectionClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for cache-busting parameters.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and decodes a collection. Any failure becomes a [`Diagnostic`]
    /// naming the configured URL and filter.
    pub async fn fetch(
        &self,
        url: &str,
        filter: Option<&CollectionFilter>,
        cache: bool,
    ) -> Result<Collection, Diagnostic> {
        let request = CollectionRequest::new(url, filter, cache);
        self.try_fetch(request).await.map_err(|err| {
            log::warn!("collection fetch for {url} failed: {err}");
            Diagnostic::collection(url, filter.map(ToString::to_string), err.to_string())
        })
    }

    async fn try_fetch(&self, request: CollectionRequest<'_>) -> Result<Collection, FetchError> {
        let target = request.url((self.clock)());
        log::debug!("GET {target}");
        let response = self.transport.get(&target).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }
        parse_collection_str(&response.body).map_err(|err| match err {
            TimelineError::Parse(reason) => FetchError::Payload(reason),
            other => FetchError::Payload(other.to_string()),
        })
    }

    /// Fetches a page and returns the inner HTML of its content section.
    pub async fn fetch_fragment<E: FragmentExtractor + ?Sized>(
        &self,
        url: &str,
        template_version: Option<&str>,
        extractor: &E,
    ) -> Result<String, Diagnostic> {
        let selector = fragment_selector(template_version);
        let result: Result<String, FetchError> = async {
            let response = self.transport.get(url).await?;
            if !response.is_success() {
                return Err(FetchError::Status(response.status));
            }
            extractor
                .extract(&response.body, selector)
                .ok_or_else(|| FetchError::MissingSection(selector.to_string()))
        }
        .await;

        result.map_err(|err| {
            log::warn!("fragment fetch for {url} failed: {err}");
            Diagnostic::fragment(url, err.to_string())
        })
    }
}

#[async_trait(?Send)]
impl<T: Transport> CollectionSource for CollectionClient<T> {
    async fn fetch_collection(
        &self,
        url: &str,
        filter: Option<&CollectionFilter>,
        cache: bool,
    ) -> Result<Collection, Diagnostic> {
        self.fetch(url, filter, cache).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use timeline_core::DiagnosticKind;

    struct ScriptedTransport {
        response: Result<HttpResponse, String>,
        requested: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: Err("connection refused".to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.response.clone().map_err(FetchError::Transport)
        }
    }

    struct FirstMatch;

    impl FragmentExtractor for FirstMatch {
        fn extract(&self, html: &str, selector: &str) -> Option<String> {
            let marker = format!("<section data-selector=\"{selector}\">");
            let start = html.find(&marker)? + marker.len();
            let end = html[start..].find("</section>")? + start;
            Some(html[start..end].to_string())
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn client(transport: ScriptedTransport) -> CollectionClient<ScriptedTransport> {
        CollectionClient::new(transport).with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn success_decodes_items_and_ignores_extras() {
        let client = client(ScriptedTransport::answering(
            200,
            r#"{ "website": {}, "pagination": { "nextPage": true },
                 "items": [ { "title": "One", "excerpt": "<p>1</p>", "publishOn": 1700000000000, "urlId": "one" } ] }"#,
        ));
        let filter = CollectionFilter::parse("tag:launch").unwrap();

        let collection = client.fetch("https://x/blog", Some(&filter), false).await.unwrap();

        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].title, "One");
        assert_eq!(
            client.transport().requested.borrow().as_slice(),
            ["https://x/blog/tag/launch?format=json&time=1700000000000"]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_a_diagnostic() {
        let client = client(ScriptedTransport::answering(404, "<html>not found</html>"));

        let diagnostic = client.fetch("https://x/blog", None, true).await.unwrap_err();

        assert_eq!(diagnostic.kind, DiagnosticKind::Collection);
        assert_eq!(diagnostic.url, "https://x/blog");
        assert!(diagnostic.reason.contains("404"));
        assert!(diagnostic.to_markup().contains("https://x/blog"));
    }

    #[tokio::test]
    async fn transport_error_is_a_diagnostic_with_filter() {
        let client = client(ScriptedTransport::unreachable());
        let filter = CollectionFilter::parse("category:news").unwrap();

        let diagnostic = client
            .fetch_collection("/blog", Some(&filter), false)
            .await
            .unwrap_err();

        assert_eq!(diagnostic.filter.as_deref(), Some("category:news"));
        assert!(diagnostic.reason.contains("connection refused"));
        assert!(diagnostic.to_markup().contains("/blog, category:news"));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_diagnostic() {
        let client = client(ScriptedTransport::answering(200, "<html>not json</html>"));

        let diagnostic = client.fetch("/blog", None, true).await.unwrap_err();

        assert!(diagnostic.reason.starts_with("invalid collection payload"));
    }

    #[tokio::test]
    async fn sloppy_items_still_load() {
        let client = client(ScriptedTransport::answering(
            200,
            r#"{ "items": [
                { "title": "A", "excerpt": null },
                { "title": null, "mediaFocalPoint": { "x": 0.5 } }
            ] }"#,
        ));

        let collection = client.fetch("/blog", None, true).await.unwrap();

        assert_eq!(collection.items.len(), 2);
        assert_eq!(collection.items[0].excerpt, "");
        assert_eq!(collection.items[1].title, "");
    }

    #[tokio::test]
    async fn fragment_success_and_failure() {
        let page = "<html><section data-selector=\"#sections\"><p>Hi</p></section></html>";
        let ok = client(ScriptedTransport::answering(200, page));
        assert_eq!(
            ok.fetch_fragment("/about", None, &FirstMatch).await.unwrap(),
            "<p>Hi</p>"
        );

        let missing = ok
            .fetch_fragment("/about", Some("7"), &FirstMatch)
            .await
            .unwrap_err();
        assert_eq!(missing.kind, DiagnosticKind::Fragment);
        assert!(missing.reason.contains("main > *:first-child"));

        let failed = client(ScriptedTransport::answering(500, ""))
            .fetch_fragment("/about", None, &FirstMatch)
            .await
            .unwrap_err();
        assert!(failed.to_markup().contains("<code>/about</code>"));
    }

    #[test]
    fn selector_by_template_version() {
        assert_eq!(fragment_selector(Some("7")), "main > *:first-child");
        assert_eq!(fragment_selector(Some("7.1")), "#sections");
        assert_eq!(fragment_selector(None), "#sections");
    }
}
