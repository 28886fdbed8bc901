use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalEntry {
    pub synonym: String,
}

/// An external word database queried one lemma at a time.
#[async_trait]
pub trait LexicalDatabase: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<Vec<LexicalEntry>>;
}

pub struct SynonymExpander<D> {
    db: D,
}

impl<D: LexicalDatabase> SynonymExpander<D> {
    pub fn new(db: D) -> Self { Self { db } }

    /// Distinct synonyms of `keyword`, excluding the keyword itself. A failed
    /// lookup is logged and yields an empty set.
    pub async fn expand(&self, keyword: &str) -> BTreeSet<String> {
        match self.db.lookup(keyword).await {
            Ok(entries) => entries
                .into_iter()
                .map(|e| e.synonym)
                .filter(|s| !s.eq_ignore_ascii_case(keyword))
                .collect(),
            Err(e) => {
                tracing::warn!(keyword, error = %e, "synonym lookup failed");
                BTreeSet::new()
            }
        }
    }

    /// Expand each keyword in turn, keeping the input order.
    pub async fn expand_all(&self, keywords: &[String]) -> Vec<(String, BTreeSet<String>)> {
        let mut out = Vec::with_capacity(keywords.len());
        for k in keywords {
            out.push((k.clone(), self.expand(k).await));
        }
        out
    }
}
