//! Builds a [`Graph`] from text-format input.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use strider_core::{Graph, GraphBuilder};
use tracing::{Span, debug, field, instrument};

use crate::{
    error::{MalformedLine, TextFormatError},
    parser::{EdgeLine, ParsedLine, parse_line},
};

/// Loads a graph from the file at `path`.
///
/// # Errors
/// Returns [`TextFormatError::Io`] when the file cannot be read and
/// [`TextFormatError::Malformed`] for the first rejected line.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, TextFormatError> {
    let file = File::open(path.as_ref())?;
    read_graph(BufReader::new(file))
}

/// Parses a graph held in memory.
///
/// # Examples
/// ```
/// use strider_providers_text::parse_graph;
///
/// let graph = parse_graph("[A] -> [B]\n[B] <- [C]\n[lonely]\n")?;
/// assert!(graph.is_directed());
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), strider_providers_text::TextFormatError>(())
/// ```
///
/// # Errors
/// Returns [`TextFormatError::Malformed`] for the first rejected line.
pub fn parse_graph(text: &str) -> Result<Graph, TextFormatError> {
    read_graph(text.as_bytes())
}

/// Reads a graph line by line.
///
/// The first edge fixes whether the graph is directed and weighted; every
/// later edge must agree. A file without edges yields an undirected,
/// unweighted graph. Names from vertex-only lines are added after all edges.
///
/// # Errors
/// Returns [`TextFormatError::Io`] on read failures and
/// [`TextFormatError::Malformed`] for the first rejected line.
#[instrument(
    name = "text.load",
    err,
    skip(reader),
    fields(lines = field::Empty, vertices = field::Empty, edges = field::Empty),
)]
pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph, TextFormatError> {
    let mut loader = Loader::default();
    let mut lines = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        lines = index + 1;
        loader.accept(lines, parse_line(&line))?;
    }
    let graph = loader.finish();

    let span = Span::current();
    span.record("lines", lines);
    span.record("vertices", graph.vertex_count());
    span.record("edges", graph.edge_count());
    debug!(directed = graph.is_directed(), weighted = graph.is_weighted(), "graph loaded");
    Ok(graph)
}

#[derive(Default)]
struct Loader {
    builder: Option<GraphBuilder>,
    isolated: Vec<String>,
}

impl Loader {
    fn accept(&mut self, line: usize, parsed: ParsedLine) -> Result<(), TextFormatError> {
        let malformed = |reason| TextFormatError::Malformed { line, reason };
        match parsed {
            ParsedLine::Empty => {}
            ParsedLine::VertexOnly(name) => self.isolated.push(name),
            ParsedLine::Error(reason) => return Err(malformed(reason)),
            ParsedLine::Edge(edge) => {
                let builder = self.builder_for(&edge);
                check_structure(builder, &edge).map_err(malformed)?;
                add_edge(builder, &edge)?;
            }
        }
        Ok(())
    }

    fn builder_for(&mut self, edge: &EdgeLine) -> &mut GraphBuilder {
        self.builder
            .get_or_insert_with(|| GraphBuilder::new(edge.op.is_directed(), edge.weight.is_some()))
    }

    fn finish(self) -> Graph {
        let mut builder = self
            .builder
            .unwrap_or_else(|| GraphBuilder::new(false, false));
        for name in &self.isolated {
            builder.add_vertex(name);
        }
        builder.build()
    }
}

fn check_structure(builder: &GraphBuilder, edge: &EdgeLine) -> Result<(), MalformedLine> {
    if builder.is_directed() != edge.op.is_directed() {
        return Err(MalformedLine::DirectednessConflict {
            graph_directed: builder.is_directed(),
        });
    }
    if builder.is_weighted() != edge.weight.is_some() {
        return Err(MalformedLine::WeightednessConflict {
            graph_weighted: builder.is_weighted(),
        });
    }
    Ok(())
}

fn add_edge(builder: &mut GraphBuilder, edge: &EdgeLine) -> Result<(), TextFormatError> {
    let (from, to) = edge.endpoints();
    match edge.weight {
        Some(weight) => builder.add_weighted_edge(from, to, weight)?,
        None => builder.add_edge(from, to)?,
    };
    Ok(())
}
