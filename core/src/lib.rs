pub mod corpus;
pub mod ranker;
pub mod tfidf;
pub mod tokenizer;

pub use corpus::{Corpus, Document};
pub use ranker::{top_n, DEFAULT_TOP_N};
pub use tfidf::{IdfScheme, ScoredTerm, TfIdf, TfIdfConfig};
pub use tokenizer::{tokenize, Tokenizer, TokenizerConfig};

pub type TermId = u32;
pub type DocId = u32;
