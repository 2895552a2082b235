//! GML export for strider graphs.
//!
//! The same writer renders plain topology and the two shaded views used after
//! a walk experiment: visit counts and first-visit times, both taken from the
//! vertices' traversal scratch.

mod shading;
mod writer;

pub use crate::{shading::Shading, writer::write_gml};
