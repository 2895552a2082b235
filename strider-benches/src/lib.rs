//! Benchmark support crate for strider.
//!
//! Provides seeded graph fixtures and parameter types used by the Criterion
//! benchmarks for the three hot paths: BFS reachability, the walk engine and
//! the text-format parser.

pub mod error;
pub mod params;
pub mod source;
