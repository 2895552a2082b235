//! Incremental construction of [`Graph`] values.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{Result, error::StriderError};

use super::{Graph, Vertex, VertexId};

/// Collects vertices and edges, then freezes them into a [`Graph`].
///
/// Directedness and weighting are fixed when the builder is created. Edges
/// create missing endpoints on demand, duplicate edges are ignored, and
/// undirected edges are recorded on both endpoints with the same weight.
///
/// # Examples
/// ```
/// use strider_core::GraphBuilder;
///
/// let mut builder = GraphBuilder::new(true, true);
/// builder.add_vertex("isolated");
/// builder.add_weighted_edge("a", "b", 4)?;
/// let graph = builder.build();
///
/// let b = graph.vertex_by_name("b")?;
/// assert_eq!(graph.vertex(b).map(|v| v.in_degree()), Some(1));
/// assert_eq!(graph.vertex_count(), 3);
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    directed: bool,
    weighted: bool,
    vertices: Vec<Vertex>,
    index: HashMap<Arc<str>, VertexId>,
    arcs: HashSet<(VertexId, VertexId)>,
    edge_count: usize,
}

impl GraphBuilder {
    /// Starts an empty graph with fixed orientation and weighting.
    #[must_use]
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            vertices: Vec::new(),
            index: HashMap::new(),
            arcs: HashSet::new(),
            edge_count: 0,
        }
    }

    /// Whether the graph under construction is directed.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_directed(&self) -> bool { self.directed }

    /// Whether the graph under construction is weighted.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_weighted(&self) -> bool { self.weighted }

    /// Number of vertices added so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Adds `name` if absent and returns its id.
    pub fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VertexId::new(self.vertices.len());
        let name: Arc<str> = Arc::from(name);
        self.vertices.push(Vertex::new(Arc::clone(&name), self.weighted));
        self.index.insert(name, id);
        id
    }

    /// Adds an unweighted edge.
    ///
    /// # Errors
    /// Returns [`StriderError::EdgeWeightMismatch`] when the graph is weighted.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        if self.weighted {
            return Err(self.weight_mismatch(from, to));
        }
        self.insert_edge(from, to, None);
        Ok(self)
    }

    /// Adds a weighted edge.
    ///
    /// # Errors
    /// Returns [`StriderError::EdgeWeightMismatch`] when the graph is unweighted.
    pub fn add_weighted_edge(&mut self, from: &str, to: &str, weight: i64) -> Result<&mut Self> {
        if !self.weighted {
            return Err(self.weight_mismatch(from, to));
        }
        self.insert_edge(from, to, Some(weight));
        Ok(self)
    }

    /// Freezes the topology.
    #[must_use]
    pub fn build(self) -> Graph {
        Graph {
            directed: self.directed,
            weighted: self.weighted,
            vertices: self.vertices,
            index: self.index,
            edge_count: self.edge_count,
        }
    }

    fn insert_edge(&mut self, from: &str, to: &str, weight: Option<i64>) {
        let a = self.add_vertex(from);
        let b = self.add_vertex(to);
        let inserted = self.link(a, b, weight);
        if self.directed {
            if inserted {
                self.vertex_mut(b).in_degree += 1;
            }
        } else if a != b {
            self.link(b, a, weight);
        }
        if inserted {
            self.edge_count += 1;
        }
    }

    fn link(&mut self, from: VertexId, to: VertexId, weight: Option<i64>) -> bool {
        if !self.arcs.insert((from, to)) {
            return false;
        }
        let vertex = self.vertex_mut(from);
        vertex.neighbours.push(to);
        if let (Some(weights), Some(value)) = (vertex.weights.as_mut(), weight) {
            weights.push(value);
        }
        true
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    fn weight_mismatch(&self, from: &str, to: &str) -> StriderError {
        StriderError::EdgeWeightMismatch {
            from: from.into(),
            to: to.into(),
            weighted: self.weighted,
        }
    }
}
