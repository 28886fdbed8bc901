use crate::error::{CrawlError, FetchFailure, Result};
use crate::extract::{declared_keywords, ExtractorConfig, TextExtractor};
use crate::frontier::{Frontier, Offer};
use crate::render::{PageRenderer, RenderOptions, RenderedPage};
use crate::validate::parse_valid;
use futures::{stream, StreamExt};
use sitekeys_core::{Corpus, DocId};
use std::pin::pin;
use url::Url;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Pages at this many hops from the seed are indexed but not expanded.
    pub max_depth: u32,
    /// Upper bound on page fetch attempts, not counting the seed.
    pub max_pages: Option<usize>,
    /// In-flight fetches per traversal level. 1 fetches strictly one at a time.
    pub concurrency: usize,
    pub render: RenderOptions,
    pub extractor: ExtractorConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            max_pages: None,
            concurrency: 1,
            render: RenderOptions::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFetch {
    pub url: String,
    pub reason: FetchFailure,
}

/// Everything one crawl produced. Lives only for the run.
#[derive(Debug)]
pub struct CrawlReport {
    pub seed: Url,
    pub corpus: Corpus,
    /// `data-keyword` values per document, indexed like the corpus.
    pub declared: Vec<Vec<String>>,
    pub failures: Vec<FailedFetch>,
    /// Discovered links dropped by URL validation.
    pub invalid_links: usize,
}

impl CrawlReport {
    fn new(seed: Url) -> Self {
        Self { seed, corpus: Corpus::new(), declared: Vec::new(), failures: Vec::new(), invalid_links: 0 }
    }

    pub fn declared_for(&self, doc: DocId) -> &[String] {
        self.declared.get(doc as usize).map_or(&[], Vec::as_slice)
    }
}

/// Breadth-first crawl from one seed. Owns the renderer session for the
/// duration of [`Crawler::run`].
pub struct Crawler<R: PageRenderer> {
    renderer: R,
    config: CrawlConfig,
}

impl<R: PageRenderer> Crawler<R> {
    /// Configuration problems surface from [`Crawler::run`], after which the
    /// renderer is still closed.
    pub fn new(renderer: R, config: CrawlConfig) -> Self {
        Self { renderer, config }
    }

    /// Crawl from `seed`, then close the renderer whatever the outcome.
    pub async fn run(self, seed: &str) -> Result<CrawlReport> {
        let result = self.crawl(seed).await;
        if let Err(e) = self.renderer.close().await {
            tracing::warn!(error = %e, "renderer did not close cleanly");
        }
        result
    }

    async fn crawl(&self, seed: &str) -> Result<CrawlReport> {
        let extractor = TextExtractor::new(&self.config.extractor)?;
        let seed_url = parse_valid(seed).ok_or_else(|| CrawlError::InvalidInput(seed.to_string()))?;
        let mut frontier = Frontier::new();
        frontier.mark_visited(&seed_url);
        let mut report = CrawlReport::new(seed_url.clone());

        tracing::info!(seed = %seed_url, max_depth = self.config.max_depth, concurrency = self.config.concurrency, "crawl started");
        let seed_page = self.render(&seed_url).await?;
        tracing::info!(links = seed_page.links.len(), "seed page rendered");
        if self.config.max_depth > 0 {
            self.discover(&mut frontier, &seed_page.links, 1, &mut report);
        }
        tracing::info!(valid_links = frontier.pending_len(), invalid_links = report.invalid_links, "links on seed page");

        let mut attempts = 0usize;
        loop {
            let budget = self.config.max_pages.map_or(usize::MAX, |m| m.saturating_sub(attempts));
            if budget == 0 {
                tracing::info!(pending = frontier.pending_len(), "page limit reached");
                break;
            }
            let batch = frontier.pop_level(budget);
            if batch.is_empty() { break; }
            attempts += batch.len();

            // `buffered` yields in submission order, so the corpus sees discovery order
            let mut results = pin!(stream::iter(batch)
                .map(|entry| async move {
                    let res = self.render(&entry.url).await;
                    (entry, res)
                })
                .buffered(self.config.concurrency.max(1)));

            while let Some((entry, res)) = results.next().await {
                match res {
                    Ok(page) => {
                        if page.url != entry.url {
                            tracing::debug!(from = %entry.url, to = %page.url, "redirected");
                        }
                        let text = extractor.extract(&page.html);
                        if report.corpus.insert(entry.key.clone(), text).is_some() {
                            report.declared.push(declared_keywords(&page.html));
                        }
                        if entry.depth < self.config.max_depth {
                            self.discover(&mut frontier, &page.links, entry.depth + 1, &mut report);
                        }
                    }
                    Err(e) => {
                        let failure = match e {
                            CrawlError::Fetch { url, reason } => FailedFetch { url, reason },
                            other => FailedFetch { url: entry.key, reason: FetchFailure::Navigation(other.to_string()) },
                        };
                        tracing::warn!(url = %failure.url, reason = %failure.reason, "skipping page");
                        report.failures.push(failure);
                    }
                }
            }
        }

        tracing::info!(
            documents = report.corpus.len(),
            failures = report.failures.len(),
            visited = frontier.visited_len(),
            "crawl finished"
        );
        Ok(report)
    }

    async fn render(&self, url: &Url) -> Result<RenderedPage> {
        let opts = &self.config.render;
        match tokio::time::timeout(opts.timeout, self.renderer.render(url, opts)).await {
            Ok(res) => res,
            Err(_) => Err(CrawlError::fetch(url.as_str(), FetchFailure::Timeout)),
        }
    }

    fn discover(&self, frontier: &mut Frontier, links: &[String], depth: u32, report: &mut CrawlReport) {
        for link in links {
            match frontier.offer(link, depth) {
                Offer::Queued => {}
                Offer::Duplicate => tracing::debug!(%link, "already seen"),
                Offer::Invalid => {
                    tracing::debug!(%link, "invalid link");
                    report.invalid_links += 1;
                }
            }
        }
    }
}
