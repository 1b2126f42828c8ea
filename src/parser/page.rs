// src/parser/page.rs
// =============================================================================
// The real PageParser: fetches a page over HTTP and extracts its words and
// outgoing links.
//
// How it works:
// 1. GET the URL with reqwest (10s timeout, limited redirects)
// 2. Parse the HTML with scraper
// 3. Words: walk the text nodes (skipping <script>/<style>/<noscript>),
//    lowercase, split on non-alphanumeric characters, drop words matching
//    an ignored-word pattern
// 4. Links: every <a href>, resolved against the page URL, HTTP(S) only
//
// Rust concepts:
// - async/await: The fetch is network I/O; parsing itself is synchronous
// - Recursion over a tree: Walking the HTML DOM
// - Closures: The split predicate |c| !c.is_alphanumeric()
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ego_tree::NodeRef;
use regex::Regex;
use reqwest::Client;
use scraper::node::Node;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use super::{PageParser, PageResult};

// Fetches pages over HTTP and parses them with scraper
pub struct HttpPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HttpPageParser {
    // Creates a parser with its own HTTP client.
    //
    // The client is reused across all fetches (connection pooling), so one
    // parser serves the whole crawl.
    pub fn new(ignored_words: Vec<Regex>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))  // 10 second timeout per request
            .redirect(reqwest::redirect::Policy::limited(5))  // Follow up to 5 redirects
            .build()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> Result<PageResult> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let html = response.text().await?;
        // Everything below is synchronous: the parsed DOM never crosses an
        // await point (scraper's Html is not Send).
        Ok(extract_page(&html, url, &self.ignored_words))
    }
}

// Extracts words and links from HTML content.
//
// Split out as a plain function so it can be tested without any HTTP.
fn extract_page(html: &str, page_url: &str, ignored_words: &[Regex]) -> PageResult {
    let document = Html::parse_document(html);

    let mut word_counts = HashMap::new();
    count_words(document.tree.root(), ignored_words, &mut word_counts);

    PageResult {
        word_counts,
        links: extract_links(&document, page_url),
    }
}

// Walks the DOM and tallies the words in every visible text node.
//
// <script>, <style> and <noscript> subtrees are skipped - their text is
// code, not page content.
fn count_words(node: NodeRef<Node>, ignored_words: &[Regex], counts: &mut HashMap<String, usize>) {
    match node.value() {
        Node::Element(element) => {
            if matches!(element.name(), "script" | "style" | "noscript") {
                return;
            }
        }
        Node::Text(text) => {
            for word in split_words(&text) {
                if ignored_words.iter().any(|pattern| pattern.is_match(&word)) {
                    continue;
                }
                *counts.entry(word).or_insert(0) += 1;
            }
            return;  // Text nodes have no children
        }
        _ => {}  // Document, comments, doctype: just descend
    }

    for child in node.children() {
        count_words(child, ignored_words, counts);
    }
}

// Splits raw text into lowercase words.
//
// A "word" is a maximal run of alphanumeric characters, so "Hello, world!"
// yields ["hello", "world"] and "don't" yields ["don", "t"].
fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}

// Extracts all outgoing links from the document, in document order.
//
// Relative hrefs are resolved against the page URL; anything that isn't
// HTTP or HTTPS (mailto:, javascript:, ...) is dropped.
fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Our selector is a constant and known to be valid, so unwrap is safe
    let selector = Selector::parse("a[href]").unwrap();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            // Without a valid base we can't resolve relative links
            eprintln!("Warning: Invalid page URL: {}", page_url);
            return links;
        }
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                if is_crawlable_link(&absolute_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "javascript:void(0)" -> Some(...), filtered out by the caller
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => {
            // Likely a relative URL, try joining with base
            match base.join(href) {
                Ok(url) => Some(url.to_string()),
                Err(_) => None,  // Invalid URL, skip it
            }
        }
    }
}

// Only HTTP(S) pages can be fetched and parsed
fn is_crawlable_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why walk the tree by hand instead of Html::root_element().text()?
//    - .text() yields EVERY text node, including the contents of <script>
//      and <style> tags
//    - Inline JavaScript would pollute the word histogram, so we skip
//      those subtrees while walking
//
// 2. What is NodeRef?
//    - scraper stores the DOM in an ego_tree::Tree
//    - NodeRef is a lightweight handle to one node, with .children() for
//      traversal and .value() for the node data
//
// 3. Why is the DOM never held across .await?
//    - scraper's Html type is not Send (it uses non-atomic refcounts)
//    - async-trait futures must be Send so tokio can move them between
//      worker threads
//    - Doing all parsing inside a synchronous helper keeps the DOM out of
//      the future's state entirely
// -----------------------------------------------------------------------------
