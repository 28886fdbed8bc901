pub mod crawl;
pub mod error;
pub mod extract;
pub mod frontier;
pub mod render;
pub mod report;
pub mod synonyms;
pub mod validate;
pub mod wordnet;

pub use crawl::{CrawlConfig, CrawlReport, Crawler, FailedFetch};
pub use error::{CrawlError, FetchFailure, Result};
pub use render::{HttpRenderer, PageRenderer, RenderOptions, RenderedPage, WaitUntil};
pub use validate::is_valid;
