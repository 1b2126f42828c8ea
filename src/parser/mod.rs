// src/parser/mod.rs
// =============================================================================
// This module turns a URL into "what words are on that page and where does
// it link to" - the fetch-and-parse step of the crawl.
//
// The crawl engine only talks to the PageParser trait defined here. That
// seam exists so tests can drive the engine with a fake in-memory parser
// instead of real HTTP requests.
//
// Submodules:
// - page: the real implementation (reqwest fetch + scraper HTML parsing)
//
// Rust concepts:
// - Traits: Interfaces the engine can depend on without knowing the impl
// - async-trait: Allows async methods in trait definitions
// =============================================================================

mod page;

pub use page::HttpPageParser;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

// What one page contributed to the crawl
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// word -> how many times it appeared on this page
    pub word_counts: HashMap<String, usize>,

    /// Outgoing links found on this page, in document order
    pub links: Vec<String>,
}

// The fetch-and-parse collaborator.
//
// The crawl engine calls parse() exactly once per URL it successfully
// claims. An Err is a recoverable per-URL failure: the engine logs it and
// treats the page as contributing no words and no links.
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<PageResult>;
}
