// src/config/loader.rs
// =============================================================================
// This module loads the crawl configuration from a JSON file.
//
// The file uses camelCase keys, for example:
//
//   {
//     "startPages": ["https://example.com"],
//     "ignoredUrls": [".*\\.pdf$"],
//     "ignoredWords": ["^.{1,3}$"],
//     "maxDepth": 2,
//     "timeoutSeconds": 10,
//     "popularWordCount": 5,
//     "parallelism": 8,
//     "resultPath": "crawl_result.json"
//   }
//
// Malformed JSON or an invalid regex fails HERE, with context, before the
// crawler ever runs. The crawl engine only ever sees a valid configuration.
//
// Rust concepts:
// - serde derive: Automatically generates JSON (de)serialization code
// - #[serde(deserialize_with = ...)]: Custom parsing for one field
// - Option<T>: Fields the config file may leave out
// =============================================================================

use anyhow::{Context, Result};
use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

// The full crawl configuration, constructed once per crawl.
//
// #[serde(rename_all = "camelCase")] maps Rust snake_case field names to
// the camelCase keys used in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CrawlConfig {
    /// The seed URLs the crawl starts from
    #[serde(default)]
    pub start_pages: Vec<String>,

    /// A URL matching any of these patterns is never visited.
    ///
    /// Patterns are unanchored (substring match); anchor with ^...$ in the
    /// config file when a full match is intended.
    #[serde(default, deserialize_with = "deserialize_patterns")]
    pub ignored_urls: Vec<Regex>,

    /// A word matching any of these patterns is dropped while parsing pages
    #[serde(default, deserialize_with = "deserialize_patterns")]
    pub ignored_words: Vec<Regex>,

    /// Hop budget from a seed: 0 = fetch nothing, 1 = seeds only, ...
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Wall-clock budget for the whole crawl
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// How many of the most popular words the final histogram keeps
    #[serde(default = "default_popular_word_count")]
    pub popular_word_count: usize,

    /// Requested worker count; omitted = use all available cores
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Where to write the crawl result JSON (omitted = print to stdout)
    #[serde(default)]
    pub result_path: Option<PathBuf>,

    /// Where to write the method timing report (omitted = print to stdout)
    #[serde(default)]
    pub profile_output_path: Option<PathBuf>,
}

fn default_max_depth() -> usize {
    1
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_popular_word_count() -> usize {
    10
}

impl CrawlConfig {
    // The wall-clock budget as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    // True if the URL matches any ignored-URL pattern
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.iter().any(|pattern| pattern.is_match(url))
    }

    // The worker count actually used: the requested value clamped to the
    // host's available parallelism, and never less than 1.
    pub fn effective_parallelism(&self) -> usize {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.parallelism
            .unwrap_or(available)
            .min(available)
            .max(1)
    }
}

// Parses a list of regex strings into compiled patterns.
//
// An invalid pattern turns into a serde error, which load_config wraps
// with file context below.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<Regex>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .map(|pattern| {
            Regex::new(&pattern)
                .map_err(|e| D::Error::custom(format!("invalid pattern '{}': {}", pattern, e)))
        })
        .collect()
}

// Loads the configuration from a JSON file on disk
pub fn load_config(path: &Path) -> Result<CrawlConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

// Parses the configuration from a JSON string (split out for testing)
pub fn parse_config(json: &str) -> Result<CrawlConfig> {
    let config: CrawlConfig = serde_json::from_str(json)?;
    Ok(config)
}
