//! Frontier queue and visited set for one crawl run
//!
//! Both structures are owned by a single run and dropped with it.

use crate::url::canonicalize;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be crawled, with its distance from the start page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL as discovered
    pub url: Url,

    /// Number of link hops from the start URL
    pub depth: u32,
}

/// FIFO queue of URLs awaiting a crawl
///
/// Entries are consumed exactly once, in insertion order. The same URL may be
/// queued more than once when it is discovered from several pages before it
/// is visited; the visited set filters the repeats at pop time.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    enqueued: usize,
}

impl Frontier {
    /// Creates a frontier seeded with the start URL at depth 0
    pub fn seeded(start: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(start, 0);
        frontier
    }

    /// Appends an entry at the tail
    pub fn push(&mut self, url: Url, depth: u32) {
        self.queue.push_back(FrontierEntry { url, depth });
        self.enqueued += 1;
    }

    /// Removes and returns the head entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Number of entries still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total number of entries ever pushed
    pub fn total_enqueued(&self) -> usize {
        self.enqueued
    }

    /// Drops every waiting entry, returning how many were discarded
    pub fn discard(&mut self) -> usize {
        let remaining = self.queue.len();
        self.queue.clear();
        remaining
    }
}

/// Canonical URLs already processed in this run
///
/// Grows monotonically; entries are never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    /// Returns true if the canonical form of `url` has been visited
    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(&canonicalize(url))
    }

    /// Marks `url` visited, returning false if it already was
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(canonicalize(url))
    }

    /// Number of distinct canonical URLs visited
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been visited
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
