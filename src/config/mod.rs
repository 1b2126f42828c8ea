// src/config/mod.rs
// =============================================================================
// This module loads and validates the crawl configuration.
//
// The crawl engine consumes an already-validated CrawlConfig value; anything
// wrong with the external JSON (bad syntax, invalid regex) is rejected here,
// before a crawl ever starts.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod loader;

// Re-export the configuration type and loading functions
pub use loader::{load_config, parse_config, CrawlConfig};
