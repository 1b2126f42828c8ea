// src/crawler/coordinator.rs
// =============================================================================
// This module is the entry point of a crawl: it owns the lifecycle of one
// crawl() invocation.
//
// What happens here:
// 1. Build fresh shared state (never reused across crawls)
// 2. Turn the timeout into an absolute deadline
// 3. Clamp the requested parallelism to the host's cores and build the
//    fetch semaphore from it
// 4. Submit the root crawl task and wait for it (and all of its children)
// 5. Sort and truncate the word histogram into the final CrawlResult
//
// Rust concepts:
// - Arc: The context is shared with every spawned crawl task
// - serde Serialize: CrawlResult becomes the JSON the result writer emits
// =============================================================================

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::config::CrawlConfig;
use crate::parser::PageParser;
use crate::report::sort_word_counts;

use super::state::CrawlState;
use super::task::{CrawlContext, CrawlTask};

// The final, immutable outcome of one crawl
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// The most popular words with their totals, most popular first
    ///
    /// Kept as an ordered Vec (a HashMap would lose the ranking) but
    /// serialized as a JSON object: {"word": count, ...}
    #[serde(serialize_with = "serialize_word_counts")]
    pub word_counts: Vec<(String, usize)>,

    /// How many distinct URLs were visited
    pub urls_visited: usize,
}

// Serializes the ordered (word, count) pairs as a JSON map, preserving
// their order.
fn serialize_word_counts<S>(counts: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (word, count) in counts {
        map.serialize_entry(word, count)?;
    }
    map.end()
}

// Crawls from the seed URLs and returns the aggregated result.
//
// Parameters:
//   seed_urls: where the crawl starts (the root task's frontier)
//   config: depth/deadline/pattern/parallelism policy for this crawl
//   parser: the fetch-and-parse collaborator (real HTTP, or a fake in tests)
//
// Degenerate inputs are not errors: zero seeds, an already-expired
// deadline, or a zero word cutoff all just produce an empty or minimal
// result.
pub async fn crawl(
    seed_urls: Vec<String>,
    config: &CrawlConfig,
    parser: Arc<dyn PageParser>,
) -> CrawlResult {
    let max_depth = config.max_depth;
    let popular_word_count = config.popular_word_count;

    // The context lives exactly as long as this invocation; nothing in it
    // (state, semaphore) is shared with any other crawl.
    let ctx = Arc::new(CrawlContext {
        deadline: Instant::now() + config.timeout(),
        fetch_slots: Semaphore::new(config.effective_parallelism()),
        state: CrawlState::new(),
        parser,
        config: config.clone(),
    });

    // Blocks until the root task AND all transitively spawned children are
    // done - the structured join inside CrawlTask guarantees that.
    CrawlTask::root(seed_urls, max_depth, Arc::clone(&ctx)).run().await;

    let counts = ctx.state.take_word_counts();
    let urls_visited = ctx.state.visited_count();

    // Sorting an empty map is a no-op; skipping it mirrors the fast path
    // for a crawl that never got to fetch anything.
    let word_counts = if counts.is_empty() {
        Vec::new()
    } else {
        sort_word_counts(counts, popular_word_count)
    };

    CrawlResult {
        word_counts,
        urls_visited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::parser::{PageParser, PageResult};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // An in-memory parser: a map from URL to a canned page, plus a log of
    // every fetch so tests can assert "fetched exactly once".
    struct FakeParser {
        pages: HashMap<String, PageResult>,
        fetch_log: Mutex<Vec<String>>,
    }

    impl FakeParser {
        fn new(pages: Vec<(&str, Vec<(&str, usize)>, Vec<&str>)>) -> Self {
            let pages = pages
                .into_iter()
                .map(|(url, words, links)| {
                    (
                        url.to_string(),
                        PageResult {
                            word_counts: words
                                .into_iter()
                                .map(|(w, c)| (w.to_string(), c))
                                .collect(),
                            links: links.into_iter().map(str::to_string).collect(),
                        },
                    )
                })
                .collect();
            Self {
                pages,
                fetch_log: Mutex::new(Vec::new()),
            }
        }

        fn fetches(&self) -> Vec<String> {
            self.fetch_log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageParser for FakeParser {
        async fn parse(&self, url: &str) -> anyhow::Result<PageResult> {
            self.fetch_log.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("no such page: {}", url))
        }
    }

    fn config(json: &str) -> crate::config::CrawlConfig {
        parse_config(json).unwrap()
    }

    // Hands crawl() the trait-object view of the fake while the test keeps
    // the concrete handle for fetches() assertions. The return type is what
    // coerces Arc<FakeParser> into Arc<dyn PageParser>; writing
    // Arc::clone at the call site would instead make inference
    // demand an Arc<dyn PageParser> argument and fail.
    fn shared(parser: &Arc<FakeParser>) -> Arc<dyn PageParser> {
        parser.clone()
    }

    // The two-page scenario from the design discussion: a -> b, and the
    // words of both pages summed.
    #[tokio::test]
    async fn test_two_page_crawl_aggregates_words() {
        let parser = Arc::new(FakeParser::new(vec![
            ("a", vec![("x", 2), ("y", 1)], vec!["b"]),
            ("b", vec![("x", 1)], vec![]),
        ]));
        let cfg = config(r#"{"maxDepth": 2, "popularWordCount": 10}"#);

        let result = crawl(vec!["a".to_string()], &cfg, parser).await;

        assert_eq!(result.urls_visited, 2);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("x"), Some(&3));
        assert_eq!(counts.get("y"), Some(&1));
    }

    #[tokio::test]
    async fn test_popular_word_cutoff_truncates() {
        let parser = Arc::new(FakeParser::new(vec![
            ("a", vec![("x", 2), ("y", 1)], vec!["b"]),
            ("b", vec![("x", 1)], vec![]),
        ]));
        let cfg = config(r#"{"maxDepth": 2, "popularWordCount": 1}"#);

        let result = crawl(vec!["a".to_string()], &cfg, parser).await;

        assert_eq!(result.word_counts, vec![("x".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_depth_zero_fetches_nothing() {
        let parser = Arc::new(FakeParser::new(vec![("a", vec![("x", 1)], vec![])]));
        let cfg = config(r#"{"maxDepth": 0}"#);

        let result = crawl(vec!["a".to_string()], &cfg, shared(&parser)).await;

        assert_eq!(result.urls_visited, 0);
        assert!(result.word_counts.is_empty());
        assert!(parser.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_depth_one_fetches_only_seeds() {
        let parser = Arc::new(FakeParser::new(vec![
            ("a", vec![("x", 1)], vec!["b", "c"]),
            ("b", vec![("y", 1)], vec![]),
            ("c", vec![("z", 1)], vec![]),
        ]));
        let cfg = config(r#"{"maxDepth": 1}"#);

        let result = crawl(vec!["a".to_string()], &cfg, shared(&parser)).await;

        assert_eq!(result.urls_visited, 1);
        assert_eq!(parser.fetches(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_duplicate_seeds_fetched_once() {
        let parser = Arc::new(FakeParser::new(vec![("a", vec![("x", 1)], vec![])]));
        let cfg = config(r#"{"maxDepth": 2}"#);

        let result = crawl(
            vec!["a".to_string(), "a".to_string()],
            &cfg,
            shared(&parser),
        )
        .await;

        assert_eq!(result.urls_visited, 1);
        assert_eq!(parser.fetches().len(), 1);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("x"), Some(&1));
    }

    #[tokio::test]
    async fn test_link_cycles_do_not_double_count() {
        // a and b link to each other; each page must contribute exactly once
        let parser = Arc::new(FakeParser::new(vec![
            ("a", vec![("x", 1)], vec!["b"]),
            ("b", vec![("x", 1)], vec!["a"]),
        ]));
        let cfg = config(r#"{"maxDepth": 5}"#);

        let result = crawl(vec!["a".to_string()], &cfg, shared(&parser)).await;

        assert_eq!(result.urls_visited, 2);
        assert_eq!(parser.fetches().len(), 2);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("x"), Some(&2));
    }

    #[tokio::test]
    async fn test_ignored_seed_is_never_visited() {
        let parser = Arc::new(FakeParser::new(vec![
            ("https://example.com/skip-me", vec![("x", 1)], vec![]),
            ("https://example.com/keep", vec![("y", 1)], vec![]),
        ]));
        let cfg = config(r#"{"maxDepth": 1, "ignoredUrls": ["skip"]}"#);

        let result = crawl(
            vec![
                "https://example.com/skip-me".to_string(),
                "https://example.com/keep".to_string(),
            ],
            &cfg,
            shared(&parser),
        )
        .await;

        assert_eq!(result.urls_visited, 1);
        assert_eq!(parser.fetches(), vec!["https://example.com/keep"]);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("x"), None);
        assert_eq!(counts.get("y"), Some(&1));
    }

    #[tokio::test]
    async fn test_expired_deadline_returns_empty_result() {
        let parser = Arc::new(FakeParser::new(vec![("a", vec![("x", 1)], vec![])]));
        // timeoutSeconds 0 means the deadline has already passed when the
        // root task first checks it
        let cfg = config(r#"{"maxDepth": 2, "timeoutSeconds": 0}"#);

        let result = crawl(vec!["a".to_string()], &cfg, shared(&parser)).await;

        assert_eq!(result.urls_visited, 0);
        assert!(result.word_counts.is_empty());
        assert!(parser.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_zero_seeds_is_not_an_error() {
        let parser = Arc::new(FakeParser::new(vec![]));
        let cfg = config(r#"{"maxDepth": 2}"#);

        let result = crawl(Vec::new(), &cfg, parser).await;

        assert_eq!(result.urls_visited, 0);
        assert!(result.word_counts.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated_to_its_branch() {
        // "bad" is not in the fake's page map, so fetching it errors; its
        // sibling must still contribute normally.
        let parser = Arc::new(FakeParser::new(vec![("good", vec![("x", 1)], vec![])]));
        let cfg = config(r#"{"maxDepth": 2}"#);

        let result = crawl(
            vec!["bad".to_string(), "good".to_string()],
            &cfg,
            shared(&parser),
        )
        .await;

        // Both were claimed (the failure happened after the claim), but
        // only the good page contributed words.
        assert_eq!(result.urls_visited, 2);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("x"), Some(&1));
    }

    #[tokio::test]
    async fn test_wide_fanout_visits_every_reachable_page() {
        // One seed linking to many children, each with a distinct word
        let children: Vec<String> = (0..20).map(|i| format!("child-{}", i)).collect();
        let mut pages = vec![(
            "root",
            vec![("root", 1)],
            children.iter().map(String::as_str).collect::<Vec<_>>(),
        )];
        for child in &children {
            pages.push((child.as_str(), vec![("leaf", 1)], vec![]));
        }
        let parser = Arc::new(FakeParser::new(pages));
        let cfg = config(r#"{"maxDepth": 2, "popularWordCount": 50, "parallelism": 4}"#);

        let result = crawl(vec!["root".to_string()], &cfg, shared(&parser)).await;

        assert_eq!(result.urls_visited, 21);
        let counts: HashMap<_, _> = result.word_counts.iter().cloned().collect();
        assert_eq!(counts.get("leaf"), Some(&20));
        assert_eq!(counts.get("root"), Some(&1));
    }

    #[test]
    fn test_result_serializes_with_camel_case_keys() {
        let result = CrawlResult {
            word_counts: vec![("x".to_string(), 3), ("y".to_string(), 1)],
            urls_visited: 2,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["urlsVisited"], 2);
        assert_eq!(json["wordCounts"]["x"], 3);
        assert_eq!(json["wordCounts"]["y"], 1);
    }
}
