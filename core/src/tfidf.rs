use crate::tokenizer::{Tokenizer, TokenizerConfig};
use crate::{DocId, TermId};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdfScheme {
    /// `ln(N / df)`
    #[default]
    Standard,
    /// `ln(1 + N / df)`, never zero, so single-page corpora still rank by frequency.
    Smoothed,
}

#[derive(Debug, Clone, Default)]
pub struct TfIdfConfig {
    pub tokenizer: TokenizerConfig,
    pub idf: IdfScheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: String,
    pub tf: u32,
    pub df: u32,
    pub idf: f64,
    pub score: f64,
}

/// Incremental TF-IDF statistics over a growing set of documents.
///
/// Term ids are handed out in first-seen order across the whole corpus, and
/// that order is the tie-break for equal scores.
#[derive(Debug, Default)]
pub struct TfIdf {
    idf_scheme: IdfScheme,
    tokenizer: Tokenizer,
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    df: Vec<u32>,
    docs: Vec<BTreeMap<TermId, u32>>,
}

impl TfIdf {
    pub fn new(config: TfIdfConfig) -> Self {
        Self { idf_scheme: config.idf, tokenizer: Tokenizer::new(config.tokenizer), ..Default::default() }
    }

    /// Tokenize `text` and fold it into the running statistics. Returns the new document's index.
    pub fn add_document(&mut self, text: &str) -> DocId {
        let doc_id = self.docs.len() as DocId;
        let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in self.tokenizer.tokenize(text) {
            let tid = match self.dictionary.get(&term) {
                Some(&tid) => tid,
                None => {
                    let tid = self.terms.len() as TermId;
                    self.dictionary.insert(term.clone(), tid);
                    self.terms.push(term);
                    self.df.push(0);
                    tid
                }
            };
            *tf_counts.entry(tid).or_insert(0) += 1;
        }
        for tid in tf_counts.keys() {
            self.df[*tid as usize] += 1;
        }
        tracing::debug!(doc_id, distinct_terms = tf_counts.len(), vocabulary = self.terms.len(), "document added");
        self.docs.push(tf_counts);
        doc_id
    }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    /// Number of documents containing `term` at least once.
    pub fn df(&self, term: &str) -> u32 {
        self.dictionary.get(term).map_or(0, |&tid| self.df[tid as usize])
    }

    /// Raw occurrence count of `term` in document `doc`; 0 for unknown terms or documents.
    pub fn tf(&self, term: &str, doc: DocId) -> u32 {
        let Some(&tid) = self.dictionary.get(term) else { return 0 };
        self.docs.get(doc as usize).and_then(|d| d.get(&tid)).copied().unwrap_or(0)
    }

    /// Corpus-relative weight of `term`. Document frequency is floored at 1 and
    /// corpus size at 1, so the result is always finite.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf_for_df(self.df(term))
    }

    fn idf_for_df(&self, df: u32) -> f64 {
        let n = self.docs.len().max(1) as f64;
        let df = df.max(1) as f64;
        match self.idf_scheme {
            IdfScheme::Standard => (n / df).ln(),
            IdfScheme::Smoothed => (1.0 + n / df).ln(),
        }
    }

    /// `tf * idf`, defined as 0 when the term does not occur in `doc`.
    pub fn tfidf(&self, term: &str, doc: DocId) -> f64 {
        let tf = self.tf(term, doc);
        if tf == 0 { return 0.0; }
        tf as f64 * self.idf(term)
    }

    /// Every term of document `doc` with its score, highest first. Equal scores
    /// keep vocabulary order. An unknown document index yields an empty list.
    pub fn score_terms(&self, doc: DocId) -> Vec<ScoredTerm> {
        let Some(counts) = self.docs.get(doc as usize) else { return Vec::new() };
        let mut scored: Vec<ScoredTerm> = counts
            .iter()
            .map(|(&tid, &tf)| {
                let df = self.df[tid as usize];
                let idf = self.idf_for_df(df);
                ScoredTerm { term: self.terms[tid as usize].clone(), tf, df, idf, score: tf as f64 * idf }
            })
            .collect();
        // stable: BTreeMap iteration is already in term id order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}
