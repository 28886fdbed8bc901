//! Read-only access to a WordNet 3.x database directory.
//!
//! Only the `index.<pos>` and `data.<pos>` files are used. Index lines map a
//! lemma to synset byte offsets; the data line at each offset lists the
//! synset's member words.

use crate::error::{CrawlError, Result};
use crate::synonyms::{LexicalDatabase, LexicalEntry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

const PARTS: [&str; 4] = ["noun", "verb", "adj", "adv"];

struct PartOfSpeech {
    name: &'static str,
    index: HashMap<String, Vec<usize>>,
    data: Vec<u8>,
}

pub struct WordNet {
    parts: Vec<PartOfSpeech>,
}

impl WordNet {
    /// Load every part of speech present under `dir`. Missing parts are
    /// skipped; a directory with none of them is an error.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut parts = Vec::new();
        for name in PARTS {
            let index_path = dir.join(format!("index.{name}"));
            let data_path = dir.join(format!("data.{name}"));
            let (Ok(index), Ok(data)) = (tokio::fs::read(&index_path).await, tokio::fs::read(&data_path).await) else {
                tracing::debug!(part = name, dir = %dir.display(), "wordnet part not found");
                continue;
            };
            let index = parse_index(&String::from_utf8_lossy(&index));
            tracing::debug!(part = name, lemmas = index.len(), "wordnet part loaded");
            parts.push(PartOfSpeech { name, index, data });
        }
        if parts.is_empty() {
            return Err(CrawlError::Config(format!("no WordNet index/data files in {}", dir.display())));
        }
        Ok(Self { parts })
    }
}

fn parse_index(text: &str) -> HashMap<String, Vec<usize>> {
    let mut index = HashMap::new();
    for line in text.lines() {
        // license header lines start with two spaces
        if line.starts_with("  ") || line.trim().is_empty() { continue; }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 { continue; }
        let Ok(synset_cnt) = fields[2].parse::<usize>() else { continue };
        if synset_cnt > fields.len() { continue; }
        let offsets: Vec<usize> = fields[fields.len() - synset_cnt..]
            .iter()
            .filter_map(|f| f.parse().ok())
            .collect();
        index.insert(fields[0].to_string(), offsets);
    }
    index
}

/// Member words of the synset line starting at `offset`.
fn synset_words(data: &[u8], offset: usize) -> Option<Vec<String>> {
    let rest = data.get(offset..)?;
    let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    let line = String::from_utf8_lossy(&rest[..end]);
    let fields: Vec<&str> = line.split_whitespace().collect();
    // offset lex_filenum ss_type w_cnt (word lex_id)*
    if fields.first()?.parse::<usize>().ok()? != offset { return None; }
    let w_cnt = usize::from_str_radix(fields.get(3)?, 16).ok()?;
    let mut words = Vec::with_capacity(w_cnt);
    for i in 0..w_cnt {
        let raw = fields.get(4 + 2 * i)?;
        // adjective markers: "(a)", "(p)", "(ip)"
        let word = raw.split('(').next().unwrap_or(raw);
        words.push(word.replace('_', " "));
    }
    Some(words)
}

#[async_trait]
impl LexicalDatabase for WordNet {
    async fn lookup(&self, word: &str) -> Result<Vec<LexicalEntry>> {
        let lemma = word.trim().to_lowercase().replace(' ', "_");
        let mut out = Vec::new();
        for part in &self.parts {
            let Some(offsets) = part.index.get(&lemma) else { continue };
            for &offset in offsets {
                let words = synset_words(&part.data, offset).ok_or_else(|| CrawlError::LexicalLookup {
                    word: word.to_string(),
                    reason: format!("corrupt data.{} entry at offset {offset}", part.name),
                })?;
                out.extend(words.into_iter().map(|synonym| LexicalEntry { synonym }));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonyms::SynonymExpander;
    use std::fmt::Write as _;

    /// Build a data file whose synset lines sit at their own byte offsets.
    fn data_file(synsets: &[&str]) -> (String, Vec<usize>) {
        let mut data = String::from("  1 This software and database is provided by Princeton\n");
        let mut offsets = Vec::new();
        for rest in synsets {
            let offset = data.len();
            offsets.push(offset);
            writeln!(data, "{offset:08} {rest}").unwrap();
        }
        (data, offsets)
    }

    async fn fixture() -> (tempfile::TempDir, WordNet) {
        let dir = tempfile::tempdir().unwrap();
        let (data, offs) = data_file(&[
            "06 n 04 car 0 auto 0 automobile 0 motorcar 0 000 | a motor vehicle",
            "06 n 02 car 1 railcar 0 000 | a wheeled vehicle",
            "06 n 02 search_engine 0 web_search 0 000 | finds pages",
        ]);
        let index = format!(
            "  1 license header\ncar n 2 1 @ 2 0 {:08} {:08}\nsearch_engine n 1 1 @ 1 0 {:08}\n",
            offs[0], offs[1], offs[2]
        );
        std::fs::write(dir.path().join("data.noun"), data).unwrap();
        std::fs::write(dir.path().join("index.noun"), index).unwrap();
        let wn = WordNet::open(dir.path()).await.unwrap();
        (dir, wn)
    }

    #[tokio::test]
    async fn looks_up_all_synsets_of_a_lemma() {
        let (_dir, wn) = fixture().await;
        let words: Vec<String> = wn.lookup("Car").await.unwrap().into_iter().map(|e| e.synonym).collect();
        assert_eq!(words, vec!["car", "auto", "automobile", "motorcar", "car", "railcar"]);
    }

    #[tokio::test]
    async fn multiword_lemmas_and_expansion() {
        let (_dir, wn) = fixture().await;
        let ex = SynonymExpander::new(wn);
        let syns: Vec<String> = ex.expand("search engine").await.into_iter().collect();
        assert_eq!(syns, vec!["web search"]);
        assert!(ex.expand("unknownword").await.is_empty());
    }

    #[tokio::test]
    async fn empty_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(WordNet::open(dir.path()).await, Err(CrawlError::Config(_))));
    }

    #[test]
    fn strips_adjective_markers() {
        let (data, offs) = data_file(&["00 s 02 big(a) 0 large(p) 0 000 | above average"]);
        assert_eq!(synset_words(data.as_bytes(), offs[0]).unwrap(), vec!["big", "large"]);
        assert!(synset_words(data.as_bytes(), offs[0] + 1).is_none());
    }
}
