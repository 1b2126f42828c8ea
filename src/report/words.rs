// src/report/words.rs
// =============================================================================
// This module ranks the word aggregate into the final histogram.
//
// The ordering is a three-key comparison:
//   1. count, descending        (more popular first)
//   2. word length, descending  (longer word wins a tie)
//   3. the word itself, ascending alphabetically
//
// Rust concepts:
// - sort_by with Ordering::then: Chaining comparison keys
// - cmp on reversed arguments: The standard way to sort descending
// =============================================================================

use std::collections::HashMap;

// Sorts the aggregated counts by popularity and keeps the top `cutoff`
// entries.
//
// Example:
//   counts = {"the": 3, "cat": 3, "a": 1}, cutoff = 2
//   result = [("the", 3), ("cat", 3)]
//   ("the" beats "cat" on the alphabetical tie-break; both beat "a")
pub fn sort_word_counts(counts: HashMap<String, usize>, cutoff: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();

    ranked.sort_by(|(word_a, count_a), (word_b, count_b)| {
        count_b
            .cmp(count_a)  // count descending
            .then(word_b.len().cmp(&word_a.len()))  // length descending
            .then(word_a.cmp(word_b))  // alphabetical ascending
    });

    ranked.truncate(cutoff);
    ranked
}
