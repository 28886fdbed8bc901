use crate::error::{CrawlError, FetchFailure, Result};
use crate::extract::extract_links;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Larger response bodies are refused rather than buffered.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Navigation milestone a renderer waits for before reporting the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WaitUntil {
    Load,
    #[default]
    NetworkIdle,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { wait_until: WaitUntil::default(), timeout: DEFAULT_TIMEOUT }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Where the renderer ended up after redirects.
    pub url: Url,
    /// `href` values of every anchor, in DOM order.
    pub links: Vec<String>,
    pub html: String,
}

/// A session that can load pages and expose their DOM.
///
/// Implementations must keep concurrent `render` calls isolated from each
/// other (no shared cookies or navigation state).
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<RenderedPage>;

    /// Release the session. Called exactly once, after the last `render`.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: PageRenderer + ?Sized> PageRenderer for std::sync::Arc<T> {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<RenderedPage> {
        (**self).render(url, options).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}

/// Static renderer: plain HTTP GET plus HTML parsing, no script execution.
/// Both [`WaitUntil`] values therefore behave like `Load`.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(user_agent: &str) -> Result<Self> {
        // no cookie store: every request starts from a clean context
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| CrawlError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

fn classify(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_redirect() {
        FetchFailure::Navigation(e.to_string())
    } else {
        FetchFailure::Network(e.to_string())
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &Url, options: &RenderOptions) -> Result<RenderedPage> {
        tracing::debug!(%url, wait_until = ?options.wait_until, "rendering");
        let resp = self
            .client
            .get(url.clone())
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), classify(e)))?;

        if !resp.status().is_success() {
            return Err(CrawlError::fetch(url.as_str(), FetchFailure::Status(resp.status().as_u16())));
        }
        if let Some(ct) = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !is_html(ct) {
                return Err(CrawlError::fetch(url.as_str(), FetchFailure::Navigation(format!("not HTML: {ct}"))));
            }
        }
        let too_large = || {
            CrawlError::fetch(url.as_str(), FetchFailure::Navigation(format!("body exceeds {MAX_BODY_BYTES} bytes")))
        };
        if resp.content_length().is_some_and(|n| n > MAX_BODY_BYTES as u64) {
            return Err(too_large());
        }
        let final_url = resp.url().clone();
        let body = resp.bytes().await.map_err(|e| CrawlError::fetch(url.as_str(), classify(e)))?;
        if body.len() > MAX_BODY_BYTES {
            return Err(too_large());
        }
        let html = String::from_utf8_lossy(&body).into_owned();
        let links = extract_links(&html);
        Ok(RenderedPage { url: final_url, links, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_content_types() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+xml"));
        assert!(!is_html("application/json"));
        assert!(!is_html("image/png"));
    }

    #[tokio::test]
    async fn renders_page_and_collects_links() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(r#"<p>hi</p><a href="https://x.example/">x</a><a href="rel">r</a>"#)
            .create_async()
            .await;

        let renderer = HttpRenderer::new("test-agent").unwrap();
        let url = Url::parse(&format!("{}/page", server.url())).unwrap();
        let page = renderer.render(&url, &RenderOptions::default()).await.unwrap();
        assert_eq!(page.links, vec!["https://x.example/", "rel"]);
        assert!(page.html.contains("<p>hi</p>"));
        assert_eq!(page.url, url);
    }

    #[tokio::test]
    async fn non_success_and_non_html_are_fetch_errors() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
        let _json = server
            .mock("GET", "/data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let renderer = HttpRenderer::new("test-agent").unwrap();
        let opts = RenderOptions::default();

        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        match renderer.render(&url, &opts).await {
            Err(CrawlError::Fetch { reason: FetchFailure::Status(404), .. }) => {}
            other => panic!("expected 404 fetch error, got {other:?}"),
        }

        let url = Url::parse(&format!("{}/data", server.url())).unwrap();
        match renderer.render(&url, &opts).await {
            Err(CrawlError::Fetch { reason: FetchFailure::Navigation(_), .. }) => {}
            other => panic!("expected navigation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let mut server = mockito::Server::new_async().await;
        let big = format!("<p>{}</p>", "x".repeat(MAX_BODY_BYTES));
        let _m = server
            .mock("GET", "/big")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(big)
            .create_async()
            .await;

        let renderer = HttpRenderer::new("test-agent").unwrap();
        let url = Url::parse(&format!("{}/big", server.url())).unwrap();
        match renderer.render(&url, &RenderOptions::default()).await {
            Err(CrawlError::Fetch { reason: FetchFailure::Navigation(msg), .. }) => assert!(msg.contains("exceeds")),
            other => panic!("expected size refusal, got {other:?}"),
        }
    }
}
