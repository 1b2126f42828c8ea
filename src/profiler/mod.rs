// src/profiler/mod.rs
// =============================================================================
// This module measures how long the interesting operations take.
//
// There is no reflection or magic here: a Profiler is built with an
// explicit list of operation names it should time, callers (or the
// ProfiledParser decorator) measure around the call boundary and report
// the elapsed time, and a text report sums it all up at the end.
//
// Rust concepts:
// - Decorator pattern: ProfiledParser wraps any PageParser
// - Shared state: The Profiler is Arc-shared between main and the decorator
// =============================================================================

mod timing;

pub use timing::{ProfiledParser, Profiler};
