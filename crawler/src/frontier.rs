use crate::validate::{norm, parse_valid};
use std::collections::{HashMap, VecDeque};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Visited,
}

#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,
    /// Normalized form, used as the corpus key.
    pub key: String,
    /// Hops from the seed.
    pub depth: u32,
}

/// Result of offering a discovered link to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Queued,
    Duplicate,
    Invalid,
}

/// FIFO work queue plus the per-URL state map. A URL gets at most one entry
/// for the lifetime of the frontier, so it can be handed out at most once.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<FrontierEntry>,
    states: HashMap<String, EntryState>,
}

impl Frontier {
    pub fn new() -> Self { Self::default() }

    /// Mark a URL visited without queueing it (the seed is fetched outside the queue).
    pub fn mark_visited(&mut self, url: &Url) -> String {
        let key = norm(url);
        self.states.insert(key.clone(), EntryState::Visited);
        key
    }

    pub fn push(&mut self, url: Url, depth: u32) -> Offer {
        let key = norm(&url);
        if self.states.contains_key(&key) { return Offer::Duplicate; }
        self.states.insert(key.clone(), EntryState::Pending);
        self.pending.push_back(FrontierEntry { url, key, depth });
        Offer::Queued
    }

    /// Validate a raw `href` value and queue it if it is new.
    pub fn offer(&mut self, candidate: &str, depth: u32) -> Offer {
        match parse_valid(candidate) {
            Some(url) => self.push(url, depth),
            None => Offer::Invalid,
        }
    }

    /// Dequeue the next entry, moving it to the visited state.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.pending.pop_front()?;
        self.states.insert(entry.key.clone(), EntryState::Visited);
        Some(entry)
    }

    /// Dequeue up to `limit` entries that share the depth of the queue head.
    /// Entries are queued breadth-first, so this is one traversal level in
    /// discovery order.
    pub fn pop_level(&mut self, limit: usize) -> Vec<FrontierEntry> {
        let Some(depth) = self.pending.front().map(|e| e.depth) else { return Vec::new() };
        let mut batch = Vec::new();
        while batch.len() < limit && self.pending.front().is_some_and(|e| e.depth == depth) {
            if let Some(entry) = self.pop() { batch.push(entry); }
        }
        batch
    }

    pub fn pending_len(&self) -> usize { self.pending.len() }

    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    pub fn visited_len(&self) -> usize {
        self.states.values().filter(|s| **s == EntryState::Visited).count()
    }
}
