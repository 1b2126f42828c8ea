// src/report/mod.rs
// =============================================================================
// This module is the result sink: it turns the raw word aggregate into the
// final ranked histogram and writes the crawl result out as JSON.
//
// Submodules:
// - words: the popularity ordering (count, then length, then alphabet)
// - writer: JSON output to a file or any io::Write
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod words;
mod writer;

pub use words::sort_word_counts;
pub use writer::{write_result, write_result_to};
