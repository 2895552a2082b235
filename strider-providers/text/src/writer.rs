//! Serialises a [`Graph`] back into the text format.

use std::io::{self, Write};

use strider_core::Graph;

/// Writes `graph` so that [`crate::parse_graph`] rebuilds an equal graph.
///
/// A comment header records the orientation, weighting and sizes, followed
/// by one `[name]` line per vertex without edges and one line per edge.
/// Both groups are sorted and undirected edges name their smaller endpoint
/// first, so the output does not depend on insertion order.
/// Orientation and weighting survive only when the graph has at least one
/// edge; an edgeless graph reads back as undirected and unweighted.
///
/// # Examples
/// ```
/// use strider_core::GraphBuilder;
/// use strider_providers_text::graph_to_string;
///
/// let mut builder = GraphBuilder::new(false, true);
/// builder.add_weighted_edge("b", "a", 3)?;
/// builder.add_vertex("c");
/// let text = graph_to_string(&builder.build());
/// assert!(text.ends_with("[c]\n[a] -- [b] 3\n"));
/// # Ok::<(), strider_core::StriderError>(())
/// ```
///
/// # Errors
/// Propagates failures of `writer`.
pub fn write_graph<W: Write>(graph: &Graph, mut writer: W) -> io::Result<()> {
    writeln!(writer, "# Directed: {}", graph.is_directed())?;
    writeln!(writer, "# Weighted: {}", graph.is_weighted())?;
    writeln!(writer, "# Vertices: {}", graph.vertex_count())?;
    writeln!(writer, "# Edges: {}", graph.edge_count())?;
    writeln!(writer)?;

    let mut isolated: Vec<&str> = graph
        .vertices()
        .filter(|(_, vertex)| vertex.out_degree() == 0 && vertex.in_degree() == 0)
        .map(|(_, vertex)| vertex.name())
        .collect();
    isolated.sort_unstable();
    for name in isolated {
        writeln!(writer, "[{name}]")?;
    }

    let op = if graph.is_directed() { "->" } else { "--" };
    let mut lines: Vec<String> = graph
        .edges()
        .map(|edge| {
            let (from, to) = (graph.name_of(edge.from), graph.name_of(edge.to));
            let (from, to) = if graph.is_directed() || from <= to {
                (from, to)
            } else {
                (to, from)
            };
            match edge.weight {
                Some(weight) => format!("[{from}] {op} [{to}] {weight}"),
                None => format!("[{from}] {op} [{to}]"),
            }
        })
        .collect();
    lines.sort_unstable();
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Renders `graph` into a `String`.
#[must_use]
pub fn graph_to_string(graph: &Graph) -> String {
    let mut buffer = Vec::new();
    match write_graph(graph, &mut buffer) {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        Err(err) => {
            tracing::warn!(error = %err, "graph rendering failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::GraphBuilder;

    #[test]
    fn header_reports_structure() {
        let mut builder = GraphBuilder::new(true, false);
        builder
            .add_edge("x", "y")
            .and_then(|b| b.add_edge("y", "x"))
            .expect("edges are unweighted");
        let text = graph_to_string(&builder.build());
        assert_eq!(
            text,
            "# Directed: true\n# Weighted: false\n# Vertices: 2\n# Edges: 2\n\n[x] -> [y]\n[y] -> [x]\n"
        );
    }

    #[test]
    fn undirected_edges_ignore_insertion_order() {
        let render = |first: &str, second: &str| {
            let mut builder = GraphBuilder::new(false, false);
            builder.add_vertex(first);
            builder.add_vertex(second);
            builder.add_edge("y", "x").expect("edge is unweighted");
            graph_to_string(&builder.build())
        };
        let forward = render("x", "y");
        assert_eq!(forward, render("y", "x"));
        assert!(forward.ends_with("\n[x] -- [y]\n"));
    }

    #[test]
    fn directed_sinks_are_not_written_as_isolated() {
        let mut builder = GraphBuilder::new(true, false);
        builder.add_edge("a", "sink").expect("edge is unweighted");
        let text = graph_to_string(&builder.build());
        assert!(!text.lines().any(|line| line == "[sink]"));
        assert!(text.contains("[a] -> [sink]\n"));
    }
}
