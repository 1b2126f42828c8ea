// src/profiler/timing.rs
// =============================================================================
// Method timing for the crawler.
//
// How it works:
// 1. Build a Profiler with the names of the operations to time
//    (e.g. Profiler::new(&["crawl", "parse"]))
// 2. Measure around a call boundary and report it: record(op, elapsed).
//    Operations not on the list are silently ignored.
// 3. ProfiledParser does step 2 automatically for every parse() call
// 4. write_report() emits a small text summary
//
// Rust concepts:
// - Instant::elapsed: Monotonic wall-clock measurement
// - Mutex<HashMap>: Records arrive concurrently from many crawl branches
// - Trait objects: The decorator wraps Arc<dyn PageParser>
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::parser::{PageParser, PageResult};

// Accumulated timings for one operation
#[derive(Debug, Clone, Copy, Default)]
struct MethodTiming {
    calls: usize,
    total: Duration,
}

// Collects call counts and total durations for a fixed set of operations.
//
// The set of timed operations is supplied up front at construction;
// record() calls for anything else are dropped.
pub struct Profiler {
    started_at: DateTime<Local>,
    timed_ops: HashSet<String>,
    records: Mutex<HashMap<String, MethodTiming>>,
}

impl Profiler {
    pub fn new(timed_ops: &[&str]) -> Self {
        Self {
            started_at: Local::now(),
            timed_ops: timed_ops.iter().map(|op| op.to_string()).collect(),
            records: Mutex::new(HashMap::new()),
        }
    }

    // Adds one measured call for an operation.
    //
    // Safe to call from any number of concurrent crawl branches.
    pub fn record(&self, op: &str, elapsed: Duration) {
        if !self.timed_ops.contains(op) {
            return;
        }
        let mut records = self.records.lock().expect("profiler lock poisoned");
        let timing = records.entry(op.to_string()).or_default();
        timing.calls += 1;
        timing.total += elapsed;
    }

    // Writes the timing report as text to any writer
    pub fn write_report(&self, mut writer: impl Write) -> Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let records = self.records.lock().expect("profiler lock poisoned");

        // Sorted by name so the report is deterministic
        let mut ops: Vec<_> = records.iter().collect();
        ops.sort_by(|(op_a, _), (op_b, _)| op_a.cmp(op_b));

        for (op, timing) in ops {
            let average = timing.total / timing.calls.max(1) as u32;
            writeln!(
                writer,
                "  {}: {} call(s), total {:?}, average {:?}",
                op, timing.calls, timing.total, average
            )?;
        }
        Ok(())
    }

    // Writes the timing report to a file (overwriting any previous report)
    pub fn write_report_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create profile output: {}", path.display()))?;
        self.write_report(file)
    }
}

// A PageParser decorator that times every parse() call.
//
// It holds the real parser plus a shared Profiler, measures around the
// delegated call, and reports under the "parse" operation name. Failures
// are timed too - a slow failing fetch is still time spent.
pub struct ProfiledParser {
    inner: Arc<dyn PageParser>,
    profiler: Arc<Profiler>,
}

impl ProfiledParser {
    pub fn new(inner: Arc<dyn PageParser>, profiler: Arc<Profiler>) -> Self {
        Self { inner, profiler }
    }
}

#[async_trait]
impl PageParser for ProfiledParser {
    async fn parse(&self, url: &str) -> Result<PageResult> {
        let started = Instant::now();
        let result = self.inner.parse(url).await;
        self.profiler.record("parse", started.elapsed());
        result
    }
}
