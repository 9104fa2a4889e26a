//! Failure payloads shown inline in the host element instead of a timeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markup::escape_html;

const SUPPORT_URL: &str = "https://will-myers.com/ask";

/// What was being loaded when the failure happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Collection,
    Fragment,
}

/// A fetch that did not produce usable data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// URL as configured on the host, before filter and query parameters are applied.
    pub url: String,
    pub filter: Option<String>,
    pub reason: String,
}

impl Diagnostic {
    pub fn collection(url: impl Into<String>, filter: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Collection,
            url: url.into(),
            filter,
            reason: reason.into(),
        }
    }

    pub fn fragment(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Fragment,
            url: url.into(),
            filter: None,
            reason: reason.into(),
        }
    }

    /// Alert markup meant for the content editor.
    pub fn to_markup(&self) -> String {
        let url = escape_html(&self.url);
        match self.kind {
            DiagnosticKind::Collection => {
                let (noun, target) = match &self.filter {
                    Some(filter) => (
                        "url and category or tag filter",
                        format!("{url}, {}", escape_html(filter)),
                    ),
                    None => ("url", url),
                };
                format!(
                    concat!(
                        r#"<div class="wm-alert">"#,
                        r#"<p>Hey there, it seems that the {noun} you are using, <strong><code>{target}</code></strong>, doesn't exist. "#,
                        r#"Make sure to replace the <code>data-collection</code> attribute value in the code block with the right URL for the blog collection you'd like to use.</p>"#,
                        r#"<p>This note is only showing in the Squarespace Editor, not on the live site. "#,
                        r#"If you continue to have issues, reach out to our team here: <a href="{support}" target="_blank">{support}</a></p>"#,
                        r#"</div>"#
                    ),
                    noun = noun,
                    target = target,
                    support = SUPPORT_URL,
                )
            }
            DiagnosticKind::Fragment => format!(
                concat!(
                    r#"<div class="load-plugin wm-alert">"#,
                    r#"<p>Hey there, it looks like the url you are using, <code>{url}</code>, doesn't exist. "#,
                    r#"Check the URL in the code block. And don't worry, this note is only showing in the Squarespace Editor, not on the live site.</p>"#,
                    r#"<p>If you continue to have issues, reach out to our team here: <a>{support}</a></p>"#,
                    r#"</div>"#
                ),
                url = url,
                support = SUPPORT_URL,
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load {}", self.url)?;
        if let Some(filter) = &self.filter {
            write!(f, " ({filter})")?;
        }
        write!(f, ": {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_markup_embeds_url_and_filter() {
        let diagnostic = Diagnostic::collection("/blog", Some("tag:launch".into()), "status 404");
        let markup = diagnostic.to_markup();

        assert!(markup.starts_with(r#"<div class="wm-alert">"#));
        assert!(markup.contains("<code>/blog, tag:launch</code>"));
        assert!(markup.contains("url and category or tag filter"));
    }

    #[test]
    fn collection_markup_without_filter() {
        let markup = Diagnostic::collection("/news", None, "status 500").to_markup();
        assert!(markup.contains("the url you are using, <strong><code>/news</code>"));
    }

    #[test]
    fn markup_escapes_url() {
        let markup = Diagnostic::fragment("/x?a=<b>", "boom").to_markup();
        assert!(markup.contains("/x?a=&lt;b&gt;"));
        assert!(markup.starts_with(r#"<div class="load-plugin wm-alert">"#));
    }

    #[test]
    fn display_includes_reason() {
        let diagnostic = Diagnostic::collection("/blog", Some("category:news".into()), "status 404");
        assert_eq!(
            diagnostic.to_string(),
            "could not load /blog (category:news): status 404"
        );
    }
}
