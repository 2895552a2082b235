//! Text graph format for strider.
//!
//! Each line is blank, a `#` comment, a lone vertex `[name]`, or an edge
//! `[a] op [b] [weight]` with `op` one of `--`, `->` and `<-`. The first edge
//! of a file decides whether the whole graph is directed and weighted.
//!
//! ```
//! use strider_providers_text::{graph_to_string, parse_graph};
//!
//! let graph = parse_graph("# demo\n[A] -- [B] 5\n[C]\n")?;
//! let reread = parse_graph(&graph_to_string(&graph))?;
//! assert_eq!(reread.edge_count(), 1);
//! assert_eq!(reread.vertex_count(), 3);
//! # Ok::<(), strider_providers_text::TextFormatError>(())
//! ```

mod error;
mod loader;
mod parser;
mod writer;

pub use crate::{
    error::{MalformedLine, TextFormatError, TextFormatErrorCode},
    loader::{load_graph, parse_graph, read_graph},
    parser::{EdgeLine, EdgeOp, ParsedLine, parse_line},
    writer::{graph_to_string, write_graph},
};
