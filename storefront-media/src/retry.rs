//! Session-scoped retry bookkeeping for images that fail to load.
//!
//! Each product id moves through `Initial → Loaded`, or
//! `Initial → Retry1 → Retry2 → Failed`. Once an id has failed it is never
//! retried again in the same session.

use std::collections::{HashMap, VecDeque};

/// Maximum substitutions per product id per session.
pub const MAX_RETRIES: u32 = 2;

/// Number of product ids tracked before older non-failed ids are forgotten.
pub const DEFAULT_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Initial,
    Loaded,
    Retry1,
    Retry2,
    Failed,
}

impl LoadState {
    fn after_attempt(attempts: u32) -> Self {
        match attempts {
            0 => Self::Initial,
            1 => Self::Retry1,
            _ => Self::Retry2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// What the caller should render after a load error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Swap in this URL and try again.
    Retry { url: String, attempt: u32 },
    /// Give up and show the placeholder.
    Placeholder,
}

#[derive(Debug, Clone)]
struct Entry {
    state: LoadState,
    attempts: u32,
    tried: Vec<String>,
}

impl Entry {
    fn new() -> Self {
        Self {
            state: LoadState::Initial,
            attempts: 0,
            tried: Vec::new(),
        }
    }
}

/// Bounded map of product id → retry state for one browsing session.
#[derive(Debug, Clone)]
pub struct RetryController {
    entries: HashMap<String, Entry>,
    order: VecDeque<String>,
    capacity: usize,
    max_retries: u32,
}

impl Default for RetryController {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryController {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            max_retries: MAX_RETRIES,
        }
    }

    pub fn state(&self, id: &str) -> LoadState {
        self.entries
            .get(&key(id))
            .map(|e| e.state)
            .unwrap_or(LoadState::Initial)
    }

    pub fn attempts(&self, id: &str) -> u32 {
        self.entries.get(&key(id)).map(|e| e.attempts).unwrap_or(0)
    }

    pub fn is_failed(&self, id: &str) -> bool {
        self.state(id) == LoadState::Failed
    }

    /// Number of product ids currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The image for `id` rendered successfully.
    pub fn on_loaded(&mut self, id: &str) {
        let entry = self.entry_mut(id);
        if entry.state != LoadState::Failed {
            entry.state = LoadState::Loaded;
        }
    }

    /// The image for `id` failed to load from `failing_url`.
    ///
    /// `candidates` are substitutes in order of preference (see
    /// `ImageResolver::retry_candidates`). Returns the next untried candidate
    /// while under the retry cap, otherwise marks the id failed.
    pub fn on_error(&mut self, id: &str, failing_url: &str, candidates: &[String]) -> RetryDecision {
        let max_retries = self.max_retries;
        let entry = self.entry_mut(id);

        // Both terminal states stay put; a late error never restarts the chain.
        if entry.state.is_terminal() {
            return RetryDecision::Placeholder;
        }
        if !entry.tried.iter().any(|u| u == failing_url) {
            entry.tried.push(failing_url.to_string());
        }

        let next = if entry.attempts < max_retries {
            candidates
                .iter()
                .find(|c| !c.is_empty() && !entry.tried.contains(c))
                .cloned()
        } else {
            None
        };

        match next {
            Some(url) => {
                entry.attempts += 1;
                entry.state = LoadState::after_attempt(entry.attempts);
                entry.tried.push(url.clone());
                log::debug!("Image for '{id}' failed at {failing_url}; retry {} with {url}", entry.attempts);
                RetryDecision::Retry {
                    url,
                    attempt: entry.attempts,
                }
            }
            None => {
                entry.state = LoadState::Failed;
                log::debug!("Image for '{id}' exhausted after {} retries", entry.attempts);
                RetryDecision::Placeholder
            }
        }
    }

    /// Forget all state, as at the start of a new session.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn entry_mut(&mut self, id: &str) -> &mut Entry {
        let k = key(id);
        if !self.entries.contains_key(&k) {
            while self.entries.len() >= self.capacity {
                if !self.evict_one() {
                    break;
                }
            }
            self.order.push_back(k.clone());
            self.entries.insert(k.clone(), Entry::new());
        }
        self.entries.entry(k).or_insert_with(Entry::new)
    }
}

impl RetryController {
    /// Drop the oldest id that has not failed, so failed ids keep their
    /// placeholder for the session. Falls back to the oldest id when every
    /// tracked id has failed.
    fn evict_one(&mut self) -> bool {
        let pos = self
            .order
            .iter()
            .position(|k| {
                self.entries
                    .get(k)
                    .is_none_or(|e| e.state != LoadState::Failed)
            })
            .unwrap_or(0);
        match self.order.remove(pos) {
            Some(evicted) => {
                self.entries.remove(&evicted);
                true
            }
            None => false,
        }
    }
}

fn key(id: &str) -> String {
    id.trim().to_lowercase()
}

#[cfg(test)]
#[path = "tests/retry_tests.rs"]
mod tests;
