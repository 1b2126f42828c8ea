// src/crawler/state.rs
// =============================================================================
// This module holds the state shared by every crawl task in one crawl.
//
// Two pieces of shared data:
// - visited: the set of URLs some branch has already claimed
// - word_counts: the running word histogram across all fetched pages
//
// Both live behind a Mutex because many crawl tasks mutate them at the same
// time. The important invariant is that "check if visited, then mark visited"
// is ONE operation: HashSet::insert under a single lock acquisition tells us
// atomically whether we were first. Done as two steps (contains, then add),
// two branches could both fetch the same page and double-count its words.
//
// Rust concepts:
// - Mutex<T>: Mutual exclusion - only one thread can touch T at a time
// - Arc<T>: Shared ownership across spawned tasks (used by our callers)
// - HashSet / HashMap: O(1) membership checks and counters
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

// State shared by all crawl tasks of a single crawl() invocation.
//
// One CrawlState is created per crawl and dropped when the crawl finishes,
// so results and dedup info never leak between unrelated crawls.
#[derive(Debug, Default)]
pub struct CrawlState {
    // URLs that some branch has claimed. Insertion order doesn't matter,
    // only membership does.
    visited: Mutex<HashSet<String>>,

    // word -> total count across every visited page so far
    word_counts: Mutex<HashMap<String, usize>>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    // Atomically claims a URL for the calling branch.
    //
    // Returns true if the URL was newly added (the caller owns the fetch),
    // false if some other branch already claimed it (the caller must stop).
    //
    // HashSet::insert already returns exactly this, and holding the lock
    // for the single insert call makes the test-and-add indivisible.
    pub fn try_claim(&self, url: &str) -> bool {
        self.visited
            .lock()
            .expect("visited lock poisoned")
            .insert(url.to_string())
    }

    // Merges one page's word counts into the shared aggregate.
    //
    // All additions for the page happen under one lock acquisition, so the
    // final totals are the same no matter how concurrent merges interleave
    // (addition commutes - order can't change the sums).
    pub fn merge(&self, page_word_counts: &HashMap<String, usize>) {
        let mut counts = self
            .word_counts
            .lock()
            .expect("word_counts lock poisoned");
        for (word, count) in page_word_counts {
            *counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    // How many distinct URLs were claimed.
    pub fn visited_count(&self) -> usize {
        self.visited.lock().expect("visited lock poisoned").len()
    }

    // Takes the aggregated word counts out of the state.
    //
    // Called by the coordinator once every task has been joined, so there
    // are no concurrent writers left at that point.
    pub fn take_word_counts(&self) -> HashMap<String, usize> {
        std::mem::take(&mut *self.word_counts.lock().expect("word_counts lock poisoned"))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Mutex and not RwLock?
//    - Every access here is a write (insert or add)
//    - RwLock only helps when most accesses are reads
//    - The critical sections are tiny, so a plain Mutex is the simple choice
//
// 2. Why .expect() on lock()?
//    - lock() only fails if another thread panicked while holding the lock
//      (a "poisoned" mutex)
//    - That means the program is already broken, so panicking is correct
//
// 3. What does std::mem::take do?
//    - Replaces the value with its Default (an empty map) and returns the
//      original
//    - Lets us move the map out from behind the lock without cloning it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_is_idempotent() {
        let state = CrawlState::new();
        assert!(state.try_claim("https://example.com"));
        assert!(!state.try_claim("https://example.com"));
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_concurrent_claims_yield_one_winner() {
        let state = Arc::new(CrawlState::new());

        // Many threads race to claim the same URL; exactly one may win.
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.try_claim("https://example.com/page"))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_merge_accumulates() {
        let state = CrawlState::new();
        state.merge(&HashMap::from([("x".to_string(), 2), ("y".to_string(), 1)]));
        state.merge(&HashMap::from([("x".to_string(), 1)]));

        let counts = state.take_word_counts();
        assert_eq!(counts.get("x"), Some(&3));
        assert_eq!(counts.get("y"), Some(&1));
    }

    #[test]
    fn test_concurrent_merges_lose_no_updates() {
        let state = Arc::new(CrawlState::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        state.merge(&HashMap::from([("word".to_string(), 1)]));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let counts = state.take_word_counts();
        assert_eq!(counts.get("word"), Some(&1600));
    }
}
