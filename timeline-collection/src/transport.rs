use async_trait::async_trait;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("invalid collection payload: {0}")]
    Payload(String),
    #[error("section `{0}` not found in page")]
    MissingSection(String),
}

/// Issues GET requests. Implemented over `reqwest` natively and over
/// `fetch` in the browser.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}
