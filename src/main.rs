// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the crawl configuration from its JSON file
// 3. Run the parallel crawl with a profiled HTTP page parser
// 4. Print/write the word histogram and the timing report
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts:
// - async/await: The crawl fetches many pages concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc: Sharing the parser and profiler with every crawl branch
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config/ - loading the crawl configuration
mod crawler;   // src/crawler/ - the parallel crawl engine
mod parser;    // src/parser/ - fetching and parsing pages
mod profiler;  // src/profiler/ - method timing
mod report;    // src/report/ - ranking and writing the result

use cli::Cli;
use clap::Parser;  // Parser trait enables the parse() method
use parser::{HttpPageParser, PageParser};
use profiler::{ProfiledParser, Profiler};

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed
//   Err = configuration or I/O error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let args = Cli::parse();

    println!("🕷️  Loading crawl configuration: {}", args.config.display());
    let mut config = config::load_config(&args.config)?;

    // Command-line flags win over the config file
    if let Some(output) = args.output {
        config.result_path = Some(output);
    }
    if let Some(profile_output) = args.profile_output {
        config.profile_output_path = Some(profile_output);
    }

    println!(
        "🔍 Crawling {} seed page(s), max depth {}, timeout {}s, {} worker(s)",
        config.start_pages.len(),
        config.max_depth,
        config.timeout_seconds,
        config.effective_parallelism()
    );

    // The profiler times exactly these two operations: the whole crawl,
    // and every individual page parse (through the decorator).
    let profiler = Arc::new(Profiler::new(&["crawl", "parse"]));

    let http_parser = HttpPageParser::new(config.ignored_words.clone())?;
    let parser: Arc<dyn PageParser> =
        Arc::new(ProfiledParser::new(Arc::new(http_parser), Arc::clone(&profiler)));

    // Run the crawl and time it
    let started = Instant::now();
    let result = crawler::crawl(config.start_pages.clone(), &config, parser).await;
    profiler.record("crawl", started.elapsed());

    println!("\n📄 Visited {} page(s)\n", result.urls_visited);

    // Print results in the requested format
    if args.json {
        report::write_result_to(&result, std::io::stdout())?;
    } else {
        print_histogram(&result);
    }

    // Optionally persist the result and the timing report
    if let Some(path) = &config.result_path {
        report::write_result(&result, path)?;
        println!("💾 Result written to {}", path.display());
    }

    match &config.profile_output_path {
        Some(path) => {
            profiler.write_report_to_file(path)?;
            println!("⏱️  Timing report written to {}", path.display());
        }
        None => {
            println!();
            profiler.write_report(std::io::stdout())?;
        }
    }

    Ok(0)
}

// Prints the word histogram as a human-readable table in the terminal
fn print_histogram(result: &crawler::CrawlResult) {
    if result.word_counts.is_empty() {
        println!("⚠️  No words counted");
        return;
    }

    // Print table header
    println!("{:<30} {:>10}", "WORD", "COUNT");
    println!("{}", "=".repeat(41));

    // Print each ranked word
    for (word, count) in &result.word_counts {
        println!("{:<30} {:>10}", display_word(word), count);
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   📄 Pages visited: {}", result.urls_visited);
    println!("   🔤 Words ranked: {}", result.word_counts.len());
}

// Truncates a word that is too long for the table column.
//
// Counted in characters, not bytes: words come from arbitrary page text,
// and byte-slicing a multi-byte word (Cyrillic, CJK, ...) mid-character
// panics.
fn display_word(word: &str) -> String {
    if word.chars().count() > 27 {
        format!("{}...", word.chars().take(27).collect::<String>())
    } else {
        word.to_string()
    }
}
