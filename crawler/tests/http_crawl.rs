use crawler::report::site_keywords;
use crawler::{CrawlConfig, Crawler, FetchFailure, HttpRenderer, RenderOptions};
use sitekeys_core::TfIdfConfig;
use std::time::Duration;

#[tokio::test]
async fn crawls_a_served_site_over_http() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let seed_body = format!(
        r#"<html><body>
            <a href="{base}/tools">Tools</a>
            <a href="/relative">Relative</a>
            <a href="{base}/guide">Guide</a>
            <a href="{base}/gone">Gone</a>
            <a href="{base}/tools">Tools again</a>
        </body></html>"#
    );
    let _seed = server.mock("GET", "/").with_header("content-type", "text/html").with_body(seed_body).create_async().await;
    let _tools = server
        .mock("GET", "/tools")
        .with_header("content-type", "text/html")
        .with_body("<h1>Keyword tools</h1><p>Keyword research tools for sites.</p>")
        .create_async()
        .await;
    let _guide = server
        .mock("GET", "/guide")
        .with_header("content-type", "text/html")
        .with_body("<h2>Guide</h2><p>A guide to sites.</p>")
        .create_async()
        .await;
    let _gone = server.mock("GET", "/gone").with_status(500).create_async().await;

    let config = CrawlConfig {
        render: RenderOptions { timeout: Duration::from_secs(5), ..Default::default() },
        ..Default::default()
    };
    let renderer = HttpRenderer::new("sitekeys-test").unwrap();
    let report = Crawler::new(renderer, config).run(&format!("{base}/")).await.unwrap();

    let pages: Vec<&str> = report.corpus.urls().collect();
    assert_eq!(pages, vec![format!("{base}/tools"), format!("{base}/guide")]);
    assert_eq!(report.invalid_links, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reason, FetchFailure::Status(500));

    let tfidf = report.corpus.index(TfIdfConfig::default());
    // keyword x2, tools x2, research x1, for x1 are unique to /tools; "sites" is shared
    assert_eq!(site_keywords(&tfidf, 3), vec!["keyword", "tools", "research"]);
}
