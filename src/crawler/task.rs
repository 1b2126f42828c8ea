// src/crawler/task.rs
// =============================================================================
// This module implements the recursive crawl task - the unit of work the
// whole parallel crawl is built from.
//
// A task owns a frontier (URLs to consider at the current depth) and a
// remaining depth budget. Each loop iteration it decides:
//
// - deadline passed?           -> stop (and so do all descendants)
// - depth used up / no URLs?   -> stop (this branch is exhausted)
// - more than one URL?         -> SPLIT: one child task per URL, run them
//                                 all concurrently, wait for every one
// - exactly one URL?           -> LEAF: claim it, fetch it, merge its words,
//                                 continue in place with its links, one
//                                 depth level down
//
// The "continue in place" part matters: a long single-link chain loops
// inside one task instead of spawning a new task per hop.
//
// Rust concepts:
// - BoxFuture: An async fn can't directly call itself; boxing the future
//   breaks the infinitely-sized type cycle
// - JoinSet: Spawn a batch of tasks and wait for all of them (fork/join)
// - Arc: Shared, immutable view of config + shared state across tasks
// =============================================================================

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::CrawlConfig;
use crate::parser::PageParser;

use super::state::CrawlState;

// Everything a crawl task needs to share with its siblings: the (immutable)
// configuration and deadline, the shared crawl state, the parser, and the
// semaphore bounding how many fetches run at once.
//
// One CrawlContext is built per crawl() invocation and dropped when the
// crawl finishes.
pub(crate) struct CrawlContext {
    pub config: CrawlConfig,
    pub deadline: Instant,
    pub state: CrawlState,
    pub parser: Arc<dyn PageParser>,
    pub fetch_slots: Semaphore,
}

// One recursively splittable unit of crawl work.
//
// A task runs exactly once and holds no state afterwards; its only visible
// effect is what it merged into the shared CrawlState.
pub(crate) struct CrawlTask {
    frontier: Vec<String>,
    depth_remaining: usize,
    ctx: Arc<CrawlContext>,
}

impl CrawlTask {
    // The root task the coordinator submits: the whole seed list at the
    // full depth budget.
    pub fn root(seed_urls: Vec<String>, max_depth: usize, ctx: Arc<CrawlContext>) -> Self {
        Self {
            frontier: seed_urls,
            depth_remaining: max_depth,
            ctx,
        }
    }

    // Runs this task to completion, including all transitively spawned
    // children (a parent only finishes after every child has).
    //
    // Returns BoxFuture because the task is recursive: children created in
    // the split step run this same function.
    pub fn run(mut self) -> BoxFuture<'static, ()> {
        async move {
            loop {
                // Cooperative cancellation: checked before every unit of
                // work. A fetch already in flight is never aborted, but
                // nothing new starts past the deadline.
                if Instant::now() >= self.ctx.deadline {
                    return;
                }

                // Terminal: this branch is exhausted. Checked before the
                // split so a zero-depth batch doesn't spawn children that
                // would all stop immediately.
                if self.depth_remaining == 0 || self.frontier.is_empty() {
                    return;
                }

                // Split rule: a multi-URL frontier becomes one child task
                // per URL, all running concurrently. Children inherit the
                // current depth unchanged - the budget is only spent when a
                // page is actually fetched (see the leaf step below).
                if self.frontier.len() > 1 {
                    let mut children = JoinSet::new();
                    for url in self.frontier.drain(..) {
                        children.spawn(
                            CrawlTask {
                                frontier: vec![url],
                                depth_remaining: self.depth_remaining,
                                ctx: Arc::clone(&self.ctx),
                            }
                            .run(),
                        );
                    }

                    // Structured join: wait for every child. A panicked
                    // branch is reported and absorbed so its siblings (and
                    // the rest of the crawl) keep going.
                    while let Some(joined) = children.join_next().await {
                        if let Err(e) = joined {
                            eprintln!("  Warning: crawl branch failed: {}", e);
                        }
                    }
                    return;
                }

                // Leaf rule: exactly one URL left.
                let url = self.frontier.remove(0);

                if self.ctx.config.is_ignored(&url) {
                    return;
                }

                // Atomic test-and-insert: whichever branch gets true owns
                // the fetch; everyone else stops here. This is what keeps a
                // page from being fetched (and its words counted) twice.
                if !self.ctx.state.try_claim(&url) {
                    return;
                }

                println!("  Crawling [depth {}]: {}", self.depth_remaining, url);

                // The permit bounds how many fetches run at once across the
                // whole crawl (the worker-pool size).
                let page = {
                    let _permit = self
                        .ctx
                        .fetch_slots
                        .acquire()
                        .await
                        .expect("fetch semaphore closed");
                    self.ctx.parser.parse(&url).await
                };

                match page {
                    Ok(page) => {
                        self.ctx.state.merge(&page.word_counts);

                        // Tail continuation: keep looping in this task with
                        // the discovered links, one hop deeper. No new task,
                        // no extra pool capacity.
                        self.frontier = page.links;
                        self.depth_remaining -= 1;
                    }
                    Err(e) => {
                        // A failed page contributes nothing; the rest of
                        // the crawl is unaffected.
                        eprintln!("  Warning: failed to fetch {}: {}", url, e);
                        return;
                    }
                }
            }
        }
        .boxed()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture instead of a plain async fn?
//    - run() conceptually calls itself (children run the same code)
//    - A recursive async fn would have an infinitely-sized future type
//    - Boxing puts the future on the heap, making its size finite
//
// 2. Why do split children keep the SAME depth?
//    - The depth budget means "how many fetches deep may this branch go"
//    - Splitting a batch into siblings doesn't fetch anything, so it
//      shouldn't cost a hop; only a successful fetch decrements
//    - This keeps hop counting identical for a URL that was split off a
//      batch and one reached by the in-place continuation
//
// 3. What is a JoinSet?
//    - A collection of spawned tokio tasks
//    - join_next() resolves as each task finishes; draining it is exactly
//      the "parent waits for all children" barrier we need
//    - Dropping a JoinSet aborts its tasks, which is why we drain it fully
//
// 4. Why a Semaphore instead of a fixed thread pool?
//    - tokio tasks are cheap; the scarce resource is in-flight fetches
//    - N permits = at most N pages being fetched at once, which is the
//      async equivalent of an N-thread worker pool
// -----------------------------------------------------------------------------
