// src/crawler/mod.rs
// =============================================================================
// This module is the parallel crawl engine.
//
// Submodules:
// - coordinator: owns one crawl() invocation end to end
// - task: the recursively splittable crawl task (fork/join)
// - state: the visited-URL set and word aggregate shared by all tasks
//
// How the pieces fit:
// coordinator::crawl() builds fresh shared state, submits one root task,
// and waits. The task recursively forks one child per frontier URL and
// joins them all; every branch mutates the shared state through its two
// atomic operations (claim a URL, merge a page's words). When the root
// task returns, the coordinator turns the aggregate into a sorted result.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod coordinator;
mod state;
mod task;

// Re-export the public API of the engine; the shared state stays internal
// (only the coordinator and tasks ever touch it)
pub use coordinator::{crawl, CrawlResult};
