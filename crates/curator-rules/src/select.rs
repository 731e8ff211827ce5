//! Per-key variant selection.

use std::collections::HashMap;

use crate::{normalize_key, score, CandidateScore, DedupKey};

/// A variant that won its dedup group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected<T> {
    pub key: DedupKey,
    pub score: CandidateScore,
    pub item: T,
}

/// Keeps the best-scoring item per dedup key.
///
/// Groups are reported in the order their key was first seen. A later
/// candidate only replaces the winner on a strictly greater score, so equal
/// scores keep the earliest candidate.
#[derive(Debug, Clone)]
pub struct Selector<T> {
    groups: Vec<Selected<T>>,
    index: HashMap<DedupKey, usize>,
    offered: usize,
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            offered: 0,
        }
    }
}

impl<T> Selector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate with a precomputed key and score.
    pub fn offer_scored(&mut self, key: DedupKey, score: CandidateScore, item: T) {
        self.offered += 1;
        match self.index.get(&key) {
            Some(&i) => {
                let group = &mut self.groups[i];
                if score > group.score {
                    group.score = score;
                    group.item = item;
                }
            }
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(Selected { key, score, item });
            }
        }
    }

    /// Offer a candidate identified by `filename`, keyed and scored with the
    /// built-in rules.
    pub fn offer(&mut self, filename: &str, item: T) {
        self.offer_scored(normalize_key(filename), score(filename), item);
    }

    /// Number of candidates offered so far.
    pub fn offered(&self) -> usize {
        self.offered
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Winners in first-seen key order.
    pub fn into_selected(self) -> Vec<Selected<T>> {
        self.groups
    }
}
