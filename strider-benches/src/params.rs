//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label, so reports group
//! runs by graph size and selection rule.

use std::fmt;

use strider_core::SelectionMode;

/// Parameters for a walk benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct WalkBenchParams {
    /// Number of vertices in the scale-free graph.
    pub vertices: usize,
    /// Neighbour selection rule.
    pub mode: SelectionMode,
    /// Whether neighbours are credited on observation.
    pub discover: bool,
}

impl fmt::Display for WalkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},mode={}", self.vertices, self.mode)?;
        if self.discover {
            f.write_str(",discover")?;
        }
        Ok(())
    }
}

/// Parameters for a graph-size-only benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.vertices, self.edges)
    }
}
