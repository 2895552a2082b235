//! Random walks over a [`Graph`].
//!
//! A walk starts at a named vertex and repeatedly moves to a neighbour picked
//! by its [`SelectionMode`]. Coverage runs stop once a requested percentage of
//! vertices has been discovered; path runs stop once a target vertex has been
//! discovered. In discover mode, visiting a vertex also discovers all of its
//! neighbours without moving to them.
//!
//! [`DirectedWalk`] and [`UndirectedWalk`] only differ in the graphs and modes
//! they accept. Both delegate to one shared state machine.

mod config;
mod cover;
mod engine;
mod selection;

use crate::{
    Result,
    error::StriderError,
    graph::{Graph, VertexId},
};

pub use config::{DEFAULT_PROGRESS_INTERVAL, DEFAULT_STEP_LIMIT, WalkConfig, WalkConfigBuilder};
pub use cover::{COVER_SLOTS, PercentageCover};
pub use selection::{
    ParseSelectionModeError, SelectionMode, select_inverse, select_next, select_proportional,
    select_uniform,
};

use engine::WalkCore;

/// Summary of one completed run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkOutcome {
    /// Number of vertex visits performed.
    pub time: u64,
    /// Number of vertices discovered.
    pub visited: usize,
    /// Number of vertices in the graph.
    pub total: usize,
    /// Vertex the walk stood on when it stopped.
    pub last: VertexId,
    /// Forward-filled percentage-cover curve.
    pub percentage_cover: PercentageCover,
}

/// Operations shared by every walk variant.
///
/// Each call resets the walk fields of the bound graph, so a run's counters
/// reflect that run alone. Runs borrow the graph mutably; results stay
/// readable through [`RandomWalk::graph`] until the next run.
pub trait RandomWalk {
    /// Walks from `start` until at least `coverage` percent of vertices are discovered.
    ///
    /// # Errors
    /// Returns [`StriderError::VertexNotFound`] for an unknown start,
    /// [`StriderError::CoverageOutOfRange`] when `coverage > 100`,
    /// [`StriderError::WalkStalled`] at a dead end, and
    /// [`StriderError::StepLimitExceeded`] when the step cap is hit.
    fn run_cover(&mut self, start: &str, coverage: u8) -> Result<WalkOutcome>;

    /// Walks from `start` until `target` is discovered.
    ///
    /// # Errors
    /// Returns [`StriderError::VertexNotFound`] for unknown endpoints,
    /// [`StriderError::WalkStalled`] at a dead end, and
    /// [`StriderError::StepLimitExceeded`] when the step cap is hit.
    fn run_find_path(&mut self, start: &str, target: &str) -> Result<WalkOutcome>;

    /// Graph carrying the counters of the most recent run.
    fn graph(&self) -> &Graph;

    /// Settings shared by every run.
    fn config(&self) -> &WalkConfig;

    /// Curve of the most recent run.
    fn percentage_cover(&self) -> &PercentageCover;
}

/// Walk over the arcs of a directed graph.
///
/// # Examples
/// ```
/// use strider_core::{DirectedWalk, GraphBuilder, RandomWalk, WalkConfig};
///
/// let mut builder = GraphBuilder::new(true, false);
/// builder.add_edge("a", "b")?.add_edge("b", "c")?.add_edge("c", "a")?;
/// let mut graph = builder.build();
///
/// let config = WalkConfig::builder().with_seed(1).build()?;
/// let mut walk = DirectedWalk::new(&mut graph, config)?;
/// let outcome = walk.run_cover("a", 100)?;
/// assert_eq!(outcome.visited, 3);
/// assert_eq!(outcome.time, 3);
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Debug)]
pub struct DirectedWalk<'g> {
    graph: &'g mut Graph,
    core: WalkCore,
}

impl<'g> DirectedWalk<'g> {
    /// Binds a walk to a directed graph.
    ///
    /// # Errors
    /// Returns [`StriderError::InvalidParameter`] when `graph` is undirected.
    pub fn new(graph: &'g mut Graph, config: WalkConfig) -> Result<Self> {
        if !graph.is_directed() {
            return Err(StriderError::invalid_parameter(
                "graph",
                "directed walks need a directed graph",
            ));
        }
        Ok(Self {
            graph,
            core: WalkCore::new(config),
        })
    }
}

/// Walk over the symmetric adjacency of an undirected graph.
///
/// # Examples
/// ```
/// use strider_core::{RandomWalk, UndirectedWalk, WalkConfig, generators};
///
/// let mut graph = generators::complete(2)?;
/// let mut walk = UndirectedWalk::new(&mut graph, WalkConfig::default())?;
/// let outcome = walk.run_cover("0", 100)?;
/// assert!(outcome.time <= 2);
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Debug)]
pub struct UndirectedWalk<'g> {
    graph: &'g mut Graph,
    core: WalkCore,
}

impl<'g> UndirectedWalk<'g> {
    /// Binds a walk to an undirected graph.
    ///
    /// # Errors
    /// Returns [`StriderError::InvalidParameter`] when `graph` is directed and
    /// [`StriderError::ModeRequiresDirected`] for in-degree selection modes.
    pub fn new(graph: &'g mut Graph, config: WalkConfig) -> Result<Self> {
        if graph.is_directed() {
            return Err(StriderError::invalid_parameter(
                "graph",
                "undirected walks need an undirected graph",
            ));
        }
        ensure_mode_supported(graph, &config)?;
        Ok(Self {
            graph,
            core: WalkCore::new(config),
        })
    }
}

macro_rules! impl_random_walk {
    ($walk:ident) => {
        impl RandomWalk for $walk<'_> {
            fn run_cover(&mut self, start: &str, coverage: u8) -> Result<WalkOutcome> {
                self.core.cover(&mut *self.graph, start, coverage)
            }

            fn run_find_path(&mut self, start: &str, target: &str) -> Result<WalkOutcome> {
                self.core.find_path(&mut *self.graph, start, target)
            }

            fn graph(&self) -> &Graph {
                &*self.graph
            }

            fn config(&self) -> &WalkConfig {
                self.core.config()
            }

            fn percentage_cover(&self) -> &PercentageCover {
                self.core.percentage_cover()
            }
        }
    };
}

impl_random_walk!(DirectedWalk);
impl_random_walk!(UndirectedWalk);

/// Binds the walk variant matching the orientation of `graph`.
///
/// # Errors
/// Returns [`StriderError::ModeRequiresDirected`] when an in-degree mode is
/// requested for an undirected graph.
pub fn walk_for<'g>(graph: &'g mut Graph, config: WalkConfig) -> Result<Box<dyn RandomWalk + 'g>> {
    if graph.is_directed() {
        Ok(Box::new(DirectedWalk::new(graph, config)?))
    } else {
        Ok(Box::new(UndirectedWalk::new(graph, config)?))
    }
}

/// Rejects selection modes the graph cannot support.
///
/// # Errors
/// Returns [`StriderError::ModeRequiresDirected`] for in-degree modes on
/// undirected graphs.
pub fn ensure_mode_supported(graph: &Graph, config: &WalkConfig) -> Result<()> {
    let mode = config.mode();
    if mode.requires_directed() && !graph.is_directed() {
        return Err(StriderError::ModeRequiresDirected { mode });
    }
    Ok(())
}
