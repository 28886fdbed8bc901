use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crawler::extract::{ExtractorConfig, TextExtractor, DEFAULT_SELECTORS};
use crawler::report::{page_rows, print_console, site_keywords, write_csv, KeywordSource, OutputMode};
use crawler::synonyms::SynonymExpander;
use crawler::wordnet::WordNet;
use crawler::{is_valid, CrawlConfig, Crawler, HttpRenderer, RenderOptions, WaitUntil};
use sitekeys_core::{IdfScheme, TfIdfConfig, TokenizerConfig, DEFAULT_TOP_N};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl a site from one page and rank its most significant keywords by TF-IDF")]
struct Cli {
    /// Seed page; must be an absolute URL with a host
    url: String,
    /// Link hops to follow from the seed (1 = pages linked from the seed only)
    #[arg(long, default_value_t = 1)]
    max_depth: u32,
    /// Maximum number of pages to fetch, not counting the seed
    #[arg(long)]
    max_pages: Option<usize>,
    /// Pages fetched in parallel
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    /// Per-page timeout seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[arg(long, value_enum, default_value_t = WaitUntil::NetworkIdle)]
    wait_until: WaitUntil,
    #[arg(long, default_value = concat!("sitekeys/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,
    /// Comma-separated CSS selectors for text-bearing elements
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SELECTORS.map(String::from))]
    selectors: Vec<String>,
    /// Drop tokens shorter than this many characters
    #[arg(long, default_value_t = 1)]
    min_token_length: usize,
    /// Remove English stop words before scoring
    #[arg(long)]
    stopwords: bool,
    /// Stem tokens (English Snowball)
    #[arg(long)]
    stem: bool,
    /// Use ln(1 + N/df) instead of ln(N/df)
    #[arg(long)]
    smoothed_idf: bool,
    /// Keywords reported per page / for the site
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
    #[arg(long, value_enum, default_value_t = OutputMode::Console)]
    mode: OutputMode,
    /// CSV destination (csv mode)
    #[arg(long, default_value = "seo-keywords.csv")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = KeywordSource::Tfidf)]
    keyword_source: KeywordSource,
    /// WordNet database directory; enables synonym expansion of the site keywords
    #[arg(long)]
    wordnet: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Cli::parse();
    if !is_valid(&args.url) {
        return Err(anyhow!("invalid seed URL {:?}: expected an absolute URL with a scheme and host", args.url));
    }

    let config = CrawlConfig {
        max_depth: args.max_depth,
        max_pages: args.max_pages,
        concurrency: args.concurrency.max(1),
        render: RenderOptions { wait_until: args.wait_until, timeout: Duration::from_secs(args.timeout_secs) },
        extractor: ExtractorConfig { selectors: args.selectors.clone() },
    };
    // Load the lexical database up front so a bad path fails before crawling.
    let expander = match &args.wordnet {
        Some(dir) => Some(SynonymExpander::new(WordNet::open(dir).await?)),
        None => None,
    };

    // Reject a bad selector list before a renderer session exists.
    TextExtractor::new(&config.extractor)?;

    let renderer = HttpRenderer::new(&args.user_agent)?;
    let report = Crawler::new(renderer, config).run(&args.url).await?;

    let tfidf = report.corpus.index(TfIdfConfig {
        tokenizer: TokenizerConfig {
            min_token_length: args.min_token_length,
            remove_stopwords: args.stopwords,
            stem: args.stem,
        },
        idf: if args.smoothed_idf { IdfScheme::Smoothed } else { IdfScheme::Standard },
    });
    let rows = page_rows(&report, &tfidf, args.keyword_source, args.top_n);
    tracing::info!(pages = report.corpus.len(), keywords = rows.len(), terms = tfidf.num_terms(), "ranking complete");

    match args.mode {
        OutputMode::Csv => {
            write_csv(&args.output, &rows)?;
            eprintln!("wrote {} rows for {} pages -> {}", rows.len(), report.corpus.len(), args.output.display());
        }
        OutputMode::Console => {
            let keywords = site_keywords(&tfidf, args.top_n);
            let variations = match &expander {
                Some(ex) => ex.expand_all(&keywords).await,
                None => Vec::new(),
            };
            let stdout = std::io::stdout();
            print_console(&mut stdout.lock(), &report, &keywords, &variations).context("writing report")?;
        }
    }
    Ok(())
}
