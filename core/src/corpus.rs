use crate::tfidf::{TfIdf, TfIdfConfig};
use crate::DocId;
use std::collections::HashMap;

/// Extracted text of one page. Never mutated after it enters a [`Corpus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    text: String,
}

impl Document {
    pub fn url(&self) -> &str { &self.url }
    pub fn text(&self) -> &str { &self.text }
}

/// URL-keyed documents in insertion order. Insertion order is what the
/// TF-IDF engine sees, so it decides tie-breaks downstream.
#[derive(Debug, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    by_url: HashMap<String, DocId>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    /// Append a document. Returns `None` and leaves the corpus untouched when
    /// `url` is already present.
    pub fn insert(&mut self, url: impl Into<String>, text: impl Into<String>) -> Option<DocId> {
        let url = url.into();
        if self.by_url.contains_key(&url) { return None; }
        let doc_id = self.docs.len() as DocId;
        self.by_url.insert(url.clone(), doc_id);
        self.docs.push(Document { url, text: text.into() });
        Some(doc_id)
    }

    pub fn get(&self, url: &str) -> Option<&Document> {
        self.by_url.get(url).map(|&id| &self.docs[id as usize])
    }

    pub fn doc_id(&self, url: &str) -> Option<DocId> { self.by_url.get(url).copied() }

    pub fn contains(&self, url: &str) -> bool { self.by_url.contains_key(url) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.docs.iter() }

    pub fn urls(&self) -> impl Iterator<Item = &str> { self.docs.iter().map(|d| d.url.as_str()) }

    /// Feed every document, in insertion order, into a fresh TF-IDF engine.
    /// Document indices in the engine match [`Corpus::doc_id`].
    pub fn index(&self, config: TfIdfConfig) -> TfIdf {
        let mut tfidf = TfIdf::new(config);
        for doc in &self.docs {
            tfidf.add_document(&doc.text);
        }
        tfidf
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;
    fn into_iter(self) -> Self::IntoIter { self.docs.iter() }
}
