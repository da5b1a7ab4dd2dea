//! REST client for the hub API.

pub mod articles;
mod error;
pub mod newsletter;
mod payload;
pub mod tool_of_day;

pub use articles::{Article, ArticlePage, DEFAULT_PAGE_SIZE};
pub use newsletter::{SubscribeResponse, is_valid_email};
pub use tool_of_day::ToolOfTheDay;

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use url::Url;

use crate::config::{ConfigError, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, HubSettings, keys};
use crate::observability::RequestSpan;
use crate::{Error, Result};
use error::ErrorResponse;
use newsletter::SubscribeRequest;

const USER_AGENT: &str = concat!("ai-tools-hub/", env!("CARGO_PKG_VERSION"));

/// One attempt per call; no retries.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn with_http(base_url: Url, http: reqwest::Client) -> Self {
        Self { http, base_url }
    }

    pub fn from_settings(settings: &HubSettings) -> Result<Self> {
        Self::builder()
            .base_url(settings.api_url.clone())
            .timeout(settings.request_timeout)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/articles?page&limit`. Pages start at 1.
    pub async fn articles(&self, page: u32, limit: u32) -> Result<ArticlePage> {
        if page == 0 || limit == 0 {
            return Err(Error::InvalidRequest(
                "page and limit must be at least 1".into(),
            ));
        }
        let mut url = self.endpoint(&["api", "articles"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let body = self.send(self.http.get(url.clone()), Method::GET, &url).await?;
        articles::parse_page(body, page, limit)
    }

    /// `GET /api/articles/:slug`.
    pub async fn article(&self, slug: &str) -> Result<Article> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(Error::InvalidRequest("article slug must not be empty".into()));
        }
        let url = self.endpoint(&["api", "articles", slug])?;
        let body = self.send(self.http.get(url.clone()), Method::GET, &url).await?;
        articles::parse_article(body, slug)
    }

    /// `GET /api/tools/tool-of-the-day`.
    pub async fn tool_of_the_day(&self) -> Result<ToolOfTheDay> {
        let url = self.endpoint(&["api", "tools", "tool-of-the-day"])?;
        let body = self.send(self.http.get(url.clone()), Method::GET, &url).await?;
        tool_of_day::parse_tool_of_the_day(body)
    }

    /// `POST /api/newsletter/subscribe`. Invalid addresses are rejected
    /// before any request is made.
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeResponse> {
        let request = SubscribeRequest::new(email)?;
        let url = self.endpoint(&["api", "newsletter", "subscribe"])?;
        let body = self.post(&url, &request).await?;
        SubscribeResponse::from_body(body)
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &Url, body: &B) -> Result<Value> {
        self.send(self.http.post(url.clone()).json(body), Method::POST, url)
            .await
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::invalid(keys::API_URL, format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        method: Method,
        url: &Url,
    ) -> Result<Value> {
        let span = RequestSpan::new(method.as_str(), url.path());
        let result = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .instrument(span.span().clone())
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let latency_ms = span.finish();
                tracing::debug!(%method, path = url.path(), latency_ms, error = %e, "Request failed");
                return Err(Error::Network(e));
            }
        };

        let status = response.status();
        span.record_status(status.as_u16());
        let text = response.text().await.map_err(Error::Network)?;
        let latency_ms = span.finish();
        tracing::debug!(
            %method,
            path = url.path(),
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );

        if !status.is_success() {
            return Err(ErrorResponse::parse(&text).into_error(status));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<Url>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Parses `url`; errors surface from [`build`](Self::build).
    pub fn base_url_str(self, url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| ConfigError::invalid(keys::API_URL, e.to_string()))?;
        Ok(self.base_url(url))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured HTTP client; `timeout` and `user_agent` are
    /// then ignored.
    pub fn http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_API_URL)
                .map_err(|e| ConfigError::invalid(keys::API_URL, e.to_string()))?,
        };

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
                .user_agent(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()))
                .build()
                .map_err(Error::Network)?,
        };

        Ok(Client { http, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::builder().base_url_str(base).unwrap().build().unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://localhost:5000");
        assert_eq!(
            c.endpoint(&["api", "articles"]).unwrap().as_str(),
            "http://localhost:5000/api/articles"
        );

        let c = client("https://example.com/hub/");
        assert_eq!(
            c.endpoint(&["api", "articles", "a b/c"]).unwrap().as_str(),
            "https://example.com/hub/api/articles/a%20b%2Fc"
        );
    }

    #[test]
    fn test_default_base_url() {
        let c = Client::builder().build().unwrap();
        assert_eq!(c.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_non_base_url_rejected() {
        let c = client("mailto:ops@example.com");
        assert!(matches!(c.endpoint(&["api"]), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let c = client("http://localhost:5000");
        assert!(matches!(c.articles(0, 10).await, Err(Error::InvalidRequest(_))));
        assert!(matches!(c.article("  ").await, Err(Error::InvalidRequest(_))));
        assert!(matches!(c.subscribe("bad").await, Err(Error::InvalidRequest(_))));
    }
}
