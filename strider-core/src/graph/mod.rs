//! Graph model shared by every traversal in the crate.
//!
//! Vertices live in an arena addressed by [`VertexId`]. Topology is fixed once
//! [`GraphBuilder::build`] returns; afterwards only the per-vertex
//! [`TraversalScratch`] record changes, and only as a side effect of the BFS
//! and walk algorithms.

mod builder;

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{Result, error::StriderError};

pub use builder::GraphBuilder;

/// Index of a vertex inside the [`Graph`] arena that minted it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(usize);

impl VertexId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Degree flavour used when bucketing or weighting vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DegreeKind {
    /// Out-degree plus in-degree for directed graphs; neighbour count otherwise.
    Total,
    /// Number of arcs pointing at the vertex. Zero in undirected graphs.
    In,
    /// Number of arcs leaving the vertex; the neighbour count.
    Out,
}

impl DegreeKind {
    /// Returns the label used in file names and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Total => "degree",
            Self::In => "in_degree",
            Self::Out => "out_degree",
        }
    }
}

/// Mutable per-vertex state written by traversal algorithms.
///
/// Each field has exactly one writer: the walk owns `visit_count` and
/// `first_visit`, BFS owns `bfs_distance`, and both rebind `parent` when they
/// start a traversal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TraversalScratch {
    /// Number of times the walk stood on (or, in discover mode, observed) the vertex.
    pub visit_count: u64,
    /// Simulation time of the first discovery; `None` until discovered.
    pub first_visit: Option<u64>,
    /// Hop count from the last BFS origin; `None` when unreached.
    pub bfs_distance: Option<u64>,
    /// Vertex the current traversal arrived from.
    pub parent: Option<VertexId>,
}

impl TraversalScratch {
    /// Clears the fields written by a walk.
    pub fn reset_walk(&mut self) {
        self.visit_count = 0;
        self.first_visit = None;
        self.parent = None;
    }

    /// Clears the fields written by BFS.
    pub fn reset_bfs(&mut self) {
        self.bfs_distance = None;
        self.parent = None;
    }
}

/// A named vertex with its adjacency and traversal scratch.
#[derive(Clone, Debug)]
pub struct Vertex {
    name: Arc<str>,
    neighbours: Vec<VertexId>,
    weights: Option<Vec<i64>>,
    in_degree: usize,
    scratch: TraversalScratch,
}

impl Vertex {
    fn new(name: Arc<str>, weighted: bool) -> Self {
        Self {
            name,
            neighbours: Vec::new(),
            weights: weighted.then(Vec::new),
            in_degree: 0,
            scratch: TraversalScratch::default(),
        }
    }

    /// Unique name of the vertex.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the vertex name.
    #[must_use]
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Neighbours in insertion order.
    #[must_use]
    pub fn neighbours(&self) -> &[VertexId] {
        &self.neighbours
    }

    /// Edge weights parallel to [`Vertex::neighbours`], present only in weighted graphs.
    #[must_use]
    pub fn weights(&self) -> Option<&[i64]> {
        self.weights.as_deref()
    }

    /// Weight of the edge to the neighbour at `position`.
    #[must_use]
    pub fn weight_at(&self, position: usize) -> Option<i64> {
        self.weights.as_ref()?.get(position).copied()
    }

    /// Number of neighbours.
    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Number of arcs pointing at this vertex.
    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    /// Current traversal scratch.
    #[must_use]
    pub fn scratch(&self) -> &TraversalScratch {
        &self.scratch
    }
}

/// One edge as stored in the graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    /// Source vertex; for undirected edges, the endpoint with the lower id.
    pub from: VertexId,
    /// Target vertex.
    pub to: VertexId,
    /// Edge weight when the graph is weighted.
    pub weight: Option<i64>,
}

/// Immutable-topology graph with per-vertex traversal scratch.
///
/// # Examples
/// ```
/// use strider_core::GraphBuilder;
///
/// let mut builder = GraphBuilder::new(false, false);
/// builder.add_edge("a", "b")?.add_edge("b", "c")?;
/// let graph = builder.build();
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(!graph.is_directed());
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    directed: bool,
    weighted: bool,
    vertices: Vec<Vertex>,
    index: HashMap<Arc<str>, VertexId>,
    edge_count: usize,
}

impl Graph {
    /// Whether edges are one-way arcs.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_directed(&self) -> bool { self.directed }

    /// Whether edges carry integer weights.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_weighted(&self) -> bool { self.weighted }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges; undirected edges count once.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Whether the graph holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates vertices in insertion order together with their ids.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (VertexId::new(index), vertex))
    }

    /// Iterates vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + use<> {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Returns the vertex with `id`, if it belongs to this graph.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// Resolves a vertex name to its id.
    ///
    /// # Errors
    /// Returns [`StriderError::VertexNotFound`] when no vertex carries `name`.
    pub fn vertex_by_name(&self, name: &str) -> Result<VertexId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| StriderError::vertex_not_found(name))
    }

    /// Name of the vertex with `id`.
    #[must_use]
    pub fn name_of(&self, id: VertexId) -> &str {
        self.node(id).name()
    }

    /// Degree of `id` under `kind`.
    #[must_use]
    pub fn degree(&self, id: VertexId, kind: DegreeKind) -> usize {
        let vertex = self.node(id);
        match kind {
            DegreeKind::Out => vertex.out_degree(),
            DegreeKind::In => vertex.in_degree(),
            DegreeKind::Total if self.directed => vertex.out_degree() + vertex.in_degree(),
            DegreeKind::Total => vertex.out_degree(),
        }
    }

    /// Traversal scratch of `id`.
    #[must_use]
    pub fn scratch(&self, id: VertexId) -> &TraversalScratch {
        &self.node(id).scratch
    }

    /// Mutable traversal scratch of `id`. Topology stays untouched.
    pub fn scratch_mut(&mut self, id: VertexId) -> &mut TraversalScratch {
        &mut self.node_mut(id).scratch
    }

    /// Iterates every stored edge once.
    ///
    /// Directed graphs yield each arc. Undirected graphs yield each edge from
    /// the endpoint with the lower id.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices().flat_map(move |(from, vertex)| {
            vertex
                .neighbours
                .iter()
                .enumerate()
                .filter(move |&(_, &to)| self.directed || from <= to)
                .map(move |(position, &to)| Edge {
                    from,
                    to,
                    weight: vertex.weight_at(position),
                })
        })
    }

    /// Deep copy with every traversal field reset.
    ///
    /// # Examples
    /// ```
    /// use strider_core::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new(true, false);
    /// builder.add_edge("a", "b")?;
    /// let mut graph = builder.build();
    /// let a = graph.vertex_by_name("a")?;
    /// graph.scratch_mut(a).visit_count = 7;
    ///
    /// let copy = graph.pristine_copy();
    /// assert_eq!(copy.scratch(a).visit_count, 0);
    /// assert_eq!(copy.edge_count(), 1);
    /// # Ok::<(), strider_core::StriderError>(())
    /// ```
    #[must_use]
    pub fn pristine_copy(&self) -> Self {
        let mut copy = self.clone();
        for vertex in &mut copy.vertices {
            vertex.scratch = TraversalScratch::default();
        }
        copy
    }

    pub(crate) fn reset_walk_state(&mut self) {
        for vertex in &mut self.vertices {
            vertex.scratch.reset_walk();
        }
    }

    pub(crate) fn reset_bfs_state(&mut self) {
        for vertex in &mut self.vertices {
            vertex.scratch.reset_bfs();
        }
    }

    /// Panics when `id` was minted by another graph.
    pub(crate) fn node(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    fn node_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.0]
    }
}
