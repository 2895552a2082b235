//! Breadth-first reachability check.
//!
//! Labels every vertex with its hop distance from a start vertex and reports
//! how much of the graph a walk from that vertex could ever discover. The
//! walk manager refuses to launch runs whose coverage or target lies beyond
//! what this check reports.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::{
    Result,
    graph::{Graph, VertexId},
};

/// Outcome of a BFS pass.
///
/// Distances and parents are written into each vertex's
/// [`TraversalScratch`](crate::TraversalScratch); this summary keeps the
/// counters needed to gate walk runs.
///
/// # Examples
/// ```
/// use strider_core::{Reachability, generators};
///
/// let mut graph = generators::complete(5)?;
/// let reach = Reachability::run(&mut graph, "0")?;
/// assert_eq!(reach.reached(), 5);
/// assert_eq!(reach.coverage(), 100);
/// assert!(reach.is_connected());
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reachability {
    start: VertexId,
    reached: usize,
    total: usize,
}

impl Reachability {
    /// Runs BFS from `start` over outgoing adjacency.
    ///
    /// Every vertex's distance and parent are cleared first, so the result
    /// never mixes labels from an earlier pass.
    ///
    /// # Errors
    /// Returns [`crate::StriderError::VertexNotFound`] when `start` is absent.
    #[instrument(
        name = "core.bfs",
        err,
        skip(graph),
        fields(vertices = graph.vertex_count()),
    )]
    pub fn run(graph: &mut Graph, start: &str) -> Result<Self> {
        let origin = graph.vertex_by_name(start)?;
        graph.reset_bfs_state();

        let mut context = BfsContext::new(origin);
        graph.scratch_mut(origin).bfs_distance = Some(0);
        while let Some(current) = context.queue.pop_front() {
            expand(graph, current, &mut context);
        }

        let summary = Self {
            start: origin,
            reached: context.reached,
            total: graph.vertex_count(),
        };
        debug!(
            reached = summary.reached,
            coverage = summary.coverage(),
            "reachability computed"
        );
        Ok(summary)
    }

    /// Vertex the pass started from.
    #[rustfmt::skip]
    #[must_use]
    pub const fn start(&self) -> VertexId { self.start }

    /// Number of vertices reached, including the start.
    #[rustfmt::skip]
    #[must_use]
    pub const fn reached(&self) -> usize { self.reached }

    /// Number of vertices in the graph.
    #[rustfmt::skip]
    #[must_use]
    pub const fn total(&self) -> usize { self.total }

    /// Percentage of vertices reached, truncated to an integer.
    #[must_use]
    pub fn coverage(&self) -> u8 {
        percent_of(self.reached, self.total)
    }

    /// Whether every vertex is reachable from the start.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.reached == self.total
    }

    /// Whether `name` received a distance label in this pass.
    ///
    /// Reads the labels stored on `graph`, which must be the graph the pass
    /// ran on and must not have been traversed by BFS since.
    ///
    /// # Errors
    /// Returns [`crate::StriderError::VertexNotFound`] when `name` is absent.
    pub fn is_reachable(&self, graph: &Graph, name: &str) -> Result<bool> {
        let id = graph.vertex_by_name(name)?;
        Ok(graph.scratch(id).bfs_distance.is_some())
    }
}

struct BfsContext {
    queue: VecDeque<VertexId>,
    reached: usize,
}

impl BfsContext {
    fn new(origin: VertexId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(origin);
        Self { queue, reached: 1 }
    }
}

fn expand(graph: &mut Graph, current: VertexId, context: &mut BfsContext) {
    let next_distance = graph
        .scratch(current)
        .bfs_distance
        .map_or(0, |distance| distance + 1);
    let neighbours = graph.node(current).neighbours().to_vec();
    for neighbour in neighbours {
        let scratch = graph.scratch_mut(neighbour);
        if scratch.bfs_distance.is_some() {
            continue;
        }
        scratch.bfs_distance = Some(next_distance);
        scratch.parent = Some(current);
        context.reached += 1;
        context.queue.push_back(neighbour);
    }
}

/// Integer percentage `part / whole * 100`, floored. An empty whole is 100%.
pub(crate) fn percent_of(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 100;
    }
    let scaled = (part as u128 * 100) / whole as u128;
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
