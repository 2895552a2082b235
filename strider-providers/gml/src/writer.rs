//! GML serialisation of a [`Graph`].

use std::io::{self, Write};

use strider_core::Graph;
use tracing::debug;

use crate::shading::{Shading, ValueRange};

/// Writes `graph` as a GML document.
///
/// Vertices are emitted in arena order, then edges as returned by
/// [`Graph::edges`]. With a shading other than [`Shading::None`] every vertex
/// gets a grey fill scaled between the smallest and largest counter of the
/// discovered vertices, and its label carries the counter, or `-` when the
/// walk never reached it.
///
/// # Examples
/// ```
/// use strider_core::GraphBuilder;
/// use strider_providers_gml::{Shading, write_gml};
///
/// let mut builder = GraphBuilder::new(true, false);
/// builder.add_edge("a", "b")?;
/// let mut out = Vec::new();
/// write_gml(&builder.build(), Shading::None, &mut out)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.starts_with("graph [\n    directed 1\n"));
/// assert!(text.contains("arrow \"last\""));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Propagates failures of `writer`.
pub fn write_gml<W: Write>(graph: &Graph, shading: Shading, mut writer: W) -> io::Result<()> {
    writeln!(writer, "graph [")?;
    if graph.is_directed() {
        writeln!(writer, "    directed 1")?;
    }

    let range = ValueRange::of(graph, shading);
    for (_, vertex) in graph.vertices() {
        let name = escape(vertex.name());
        writeln!(writer)?;
        writeln!(writer, "    node [")?;
        writeln!(writer, "        name \"{name}\"")?;
        if shading == Shading::None {
            writeln!(writer, "        label \"{name}\"")?;
        } else {
            let value = shading.value(vertex.scratch());
            let (label, fill) = match (value, range) {
                (Some(value), Some(range)) => (value.to_string(), range.grey(value)),
                _ => ("-".to_owned(), "ffffff".to_owned()),
            };
            writeln!(writer, "        label \"{name} ({label})\"")?;
            writeln!(writer, "        graphics [")?;
            writeln!(writer, "            type \"ellipse\"")?;
            writeln!(writer, "            outline \"#000000\"")?;
            writeln!(writer, "            fill \"#{fill}\"")?;
            writeln!(writer, "        ]")?;
            writeln!(writer, "        LabelGraphics [")?;
            writeln!(writer, "            color \"#ff0000\"")?;
            writeln!(writer, "        ]")?;
        }
        writeln!(writer, "    ]")?;
    }

    for edge in graph.edges() {
        writeln!(writer)?;
        writeln!(writer, "    edge [")?;
        writeln!(writer, "        source \"{}\"", escape(graph.name_of(edge.from)))?;
        writeln!(writer, "        target \"{}\"", escape(graph.name_of(edge.to)))?;
        if let Some(weight) = edge.weight {
            writeln!(writer, "        label \"{weight}\"")?;
        }
        if graph.is_directed() {
            writeln!(writer, "        graphics [")?;
            writeln!(writer, "            arrow \"last\"")?;
            writeln!(writer, "        ]")?;
        }
        writeln!(writer, "    ]")?;
    }
    writeln!(writer, "]")?;

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        ?shading,
        "gml written"
    );
    writer.flush()
}

/// GML strings cannot contain a bare quote.
fn escape(name: &str) -> std::borrow::Cow<'_, str> {
    if name.contains('"') {
        name.replace('"', "&quot;").into()
    } else {
        name.into()
    }
}
