// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - PathBuf: An owned filesystem path
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version = "0.1.0",
    about = "A CLI tool that crawls websites in parallel and counts the most popular words",
    long_about = "word-crawler starts from the seed pages in a JSON configuration file, follows \
                  links up to a depth limit within a wall-clock deadline, and reports the most \
                  popular words across every page it visited."
)]
pub struct Cli {
    /// Path to the crawl configuration JSON file
    ///
    /// This is a positional argument (required, no flag needed)
    pub config: PathBuf,

    /// Output the crawl result as JSON instead of a table
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,

    /// Write the crawl result to this file (overrides resultPath in the config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the timing report to this file (overrides profileOutputPath in the config)
    #[arg(long)]
    pub profile_output: Option<PathBuf>,
}
