use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single page could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Timeout,
    Status(u16),
    Network(String),
    /// The page loaded but could not be used as a document (wrong content type, unreadable body).
    Navigation(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Navigation(e) => write!(f, "navigation error: {e}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL: {0:?}")]
    InvalidInput(String),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: FetchFailure },

    #[error("lexical lookup failed for {word:?}: {reason}")]
    LexicalLookup { word: String, reason: String },

    #[error("could not write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl CrawlError {
    pub fn fetch(url: impl Into<String>, reason: FetchFailure) -> Self {
        Self::Fetch { url: url.into(), reason }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
