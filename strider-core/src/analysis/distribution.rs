//! Degree distribution and structural summary of a graph.

use std::fmt;

use crate::graph::{DegreeKind, Graph};

use super::DegreeTable;

/// Counts vertices per degree under `kind`, omitting degrees nobody has.
///
/// # Examples
/// ```
/// use strider_core::{DegreeKind, degree_distribution, generators};
///
/// let graph = generators::tree(1, 3)?;
/// let table = degree_distribution(&graph, DegreeKind::Total);
/// assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, 3), (3, 1)]);
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[must_use]
pub fn degree_distribution(graph: &Graph, kind: DegreeKind) -> DegreeTable {
    let mut counts = std::collections::BTreeMap::<usize, u64>::new();
    for id in graph.vertex_ids() {
        *counts.entry(graph.degree(id, kind)).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Smallest and largest degree observed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DegreeRange {
    /// Smallest degree.
    pub min: usize,
    /// Largest degree.
    pub max: usize,
}

impl DegreeRange {
    fn of(graph: &Graph, kind: DegreeKind) -> Option<Self> {
        let mut degrees = graph.vertex_ids().map(|id| graph.degree(id, kind));
        let first = degrees.next()?;
        Some(degrees.fold(Self { min: first, max: first }, |range, degree| Self {
            min: range.min.min(degree),
            max: range.max.max(degree),
        }))
    }
}

/// Structural facts reported by the `analyze` command.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSummary {
    /// Whether the graph is directed.
    pub directed: bool,
    /// Whether the graph is weighted.
    pub weighted: bool,
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
    /// Total degree range; `None` for an empty graph.
    pub degree: Option<DegreeRange>,
    /// In-degree range; directed graphs only.
    pub in_degree: Option<DegreeRange>,
    /// Out-degree range; directed graphs only.
    pub out_degree: Option<DegreeRange>,
}

impl GraphSummary {
    /// Summarises `graph`.
    #[must_use]
    pub fn of(graph: &Graph) -> Self {
        let directed = graph.is_directed();
        Self {
            directed,
            weighted: graph.is_weighted(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            degree: DegreeRange::of(graph, DegreeKind::Total),
            in_degree: directed
                .then(|| DegreeRange::of(graph, DegreeKind::In))
                .flatten(),
            out_degree: directed
                .then(|| DegreeRange::of(graph, DegreeKind::Out))
                .flatten(),
        }
    }

    /// Edges per vertex; zero for an empty graph.
    #[must_use]
    pub fn edge_ratio(&self) -> f64 {
        if self.vertices == 0 {
            return 0.0;
        }
        self.edges as f64 / self.vertices as f64
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "directed={}", self.directed)?;
        writeln!(f, "weighted={}", self.weighted)?;
        writeln!(f, "vertices={}", self.vertices)?;
        writeln!(f, "edges={}", self.edges)?;
        writeln!(f, "ratio={:.4}", self.edge_ratio())?;
        let ranges = [
            ("degree", self.degree),
            ("in_degree", self.in_degree),
            ("out_degree", self.out_degree),
        ];
        for (label, range) in ranges {
            if let Some(DegreeRange { min, max }) = range {
                writeln!(f, "min_{label}={min}")?;
                writeln!(f, "max_{label}={max}")?;
            }
        }
        Ok(())
    }
}
