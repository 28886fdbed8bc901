use crate::crawl::CrawlReport;
use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use sitekeys_core::{top_n, DocId, TfIdf};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Site-wide top keywords on stdout.
    #[default]
    Console,
    /// `(page, keyword)` rows in a CSV file.
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KeywordSource {
    /// Top TF-IDF terms of each page.
    #[default]
    Tfidf,
    /// Keywords the page declares in `data-keyword` attributes.
    Declared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRow {
    pub page: String,
    pub keyword: String,
}

/// Top `n` terms of the first indexed page, scored against the whole corpus.
pub fn site_keywords(tfidf: &TfIdf, n: usize) -> Vec<String> {
    top_n(&tfidf.score_terms(0), n)
}

/// One row per (page, keyword), pages in corpus order.
pub fn page_rows(report: &CrawlReport, tfidf: &TfIdf, source: KeywordSource, n: usize) -> Vec<KeywordRow> {
    let mut rows = Vec::new();
    for (i, doc) in report.corpus.iter().enumerate() {
        let keywords = match source {
            KeywordSource::Tfidf => top_n(&tfidf.score_terms(i as DocId), n),
            KeywordSource::Declared => report.declared_for(i as DocId).to_vec(),
        };
        rows.extend(keywords.into_iter().map(|keyword| KeywordRow { page: doc.url().to_string(), keyword }));
    }
    rows
}

/// Serialize every row to a temp file next to `path`, then rename it into
/// place. A failed write leaves any existing file untouched.
pub fn write_csv(path: &Path, rows: &[KeywordRow]) -> Result<()> {
    let wrap = |source: io::Error| CrawlError::OutputWrite { path: path.to_path_buf(), source };
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(tmp.as_file_mut());
        for row in rows {
            wtr.serialize(row).map_err(|e| wrap(e.into()))?;
        }
        wtr.flush().map_err(wrap)?;
    }
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "keywords written");
    Ok(())
}

/// Parse a file written by [`write_csv`].
pub fn read_csv(path: &Path) -> csv::Result<Vec<KeywordRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(false).from_path(path)?;
    rdr.deserialize().collect()
}

pub fn print_console<W: Write>(
    out: &mut W,
    report: &CrawlReport,
    keywords: &[String],
    variations: &[(String, BTreeSet<String>)],
) -> io::Result<()> {
    writeln!(out, "Site: {}", report.seed)?;
    writeln!(out, "Pages indexed: {} ({} failed)", report.corpus.len(), report.failures.len())?;
    if keywords.is_empty() {
        writeln!(out, "No keywords found.")?;
    } else {
        writeln!(out, "The most relevant keywords for the website are: {}", keywords.join(", "))?;
    }
    for (keyword, syns) in variations {
        if syns.is_empty() { continue; }
        let joined: Vec<&str> = syns.iter().map(String::as_str).collect();
        writeln!(out, "  {keyword}: {}", joined.join(", "))?;
    }
    for f in &report.failures {
        writeln!(out, "  skipped {} ({})", f.url, f.reason)?;
    }
    Ok(())
}
