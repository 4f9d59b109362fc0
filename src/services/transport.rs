use crate::error::{Result, StatsError};
use crate::utils::http_client::create_http_client;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::Client;

/// The parts of an HTTP response the pipeline looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Link` header, if the server sent one.
    pub link: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the GitHub API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`, sending `token` as the credential when present.
    /// Only connection-level failures are errors; any status is returned as is.
    async fn get(&self, url: &str, token: Option<&str>) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = create_http_client().map_err(|e| StatsError::Transport {
            url: String::new(),
            message: format!("failed to create HTTP client: {}", e),
        })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, token: Option<&str>) -> Result<HttpResponse> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| StatsError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .map(header_text);

        let body = response.text().await.map_err(|e| StatsError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, link, body })
    }
}

/// Non-ASCII header bytes are decoded lossily instead of discarding the header.
fn header_text(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let mut response = HttpResponse {
            status: 200,
            link: None,
            body: "[]".to_string(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 403;
        assert!(!response.is_success());
    }

    #[test]
    fn test_header_text_keeps_non_ascii() {
        let ascii = HeaderValue::from_static("<https://api.github.com/x?page=2>; rel=\"next\"");
        assert_eq!(header_text(&ascii), "<https://api.github.com/x?page=2>; rel=\"next\"");

        let utf8 = HeaderValue::from_bytes("<https://api.github.com/x?label=café&page=2>; rel=\"next\"".as_bytes()).unwrap();
        assert_eq!(header_text(&utf8), "<https://api.github.com/x?label=café&page=2>; rel=\"next\"");

        let latin1 = HeaderValue::from_bytes(b"<https://api.github.com/x?label=caf\xe9>; rel=next").unwrap();
        assert!(header_text(&latin1).starts_with("<https://api.github.com/x?label=caf"));
        assert!(header_text(&latin1).ends_with("rel=next"));
    }
}
