//! Shared test utilities for `strider-core`.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use strider_test_support::ci::property_test_profile::ProptestRunProfile;
use test_strategy::Arbitrary;

use crate::{
    Result,
    graph::{Graph, GraphBuilder},
};

/// Proptest configuration for a core suite, scaled by `PROGTEST_CASES` and
/// `STRIDER_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestRunProfile::load(default_cases, false).config()
}

/// Undirected star with a `"hub"` joined to `"leaf-0"`, `"leaf-1"`, ...
pub(crate) fn star(leaves: usize) -> Result<Graph> {
    let mut builder = GraphBuilder::new(false, false);
    builder.add_vertex("hub");
    for leaf in 0..leaves {
        builder.add_edge("hub", &format!("leaf-{leaf}"))?;
    }
    Ok(builder.build())
}

/// Directed path following `names` in order.
pub(crate) fn directed_chain(names: &[&str]) -> Result<Graph> {
    let mut builder = GraphBuilder::new(true, false);
    for name in names {
        builder.add_vertex(name);
    }
    for pair in names.windows(2) {
        builder.add_edge(pair[0], pair[1])?;
    }
    Ok(builder.build())
}

/// Shape of a small random graph used by property suites.
#[derive(Arbitrary, Clone, Debug)]
pub(crate) struct GraphShape {
    pub(crate) directed: bool,
    #[strategy(1_usize..12)]
    pub(crate) vertices: usize,
    #[strategy(proptest::collection::vec((0_usize..12, 0_usize..12), 0..30))]
    pub(crate) arcs: Vec<(usize, usize)>,
    #[strategy(0_usize..12)]
    pub(crate) start: usize,
}

impl GraphShape {
    /// Materialises the shape; endpoints wrap onto the vertex range.
    pub(crate) fn build(&self) -> Result<(Graph, String)> {
        let mut builder = GraphBuilder::new(self.directed, false);
        for index in 0..self.vertices {
            builder.add_vertex(&index.to_string());
        }
        for &(from, to) in &self.arcs {
            let from = (from % self.vertices).to_string();
            let to = (to % self.vertices).to_string();
            builder.add_edge(&from, &to)?;
        }
        let start = (self.start % self.vertices).to_string();
        Ok((builder.build(), start))
    }
}

/// Strategy yielding a small graph together with the name of one of its vertices.
pub(crate) fn arb_graph() -> impl Strategy<Value = (Graph, String)> {
    any::<GraphShape>().prop_filter_map("shape builds", |shape| shape.build().ok())
}

/// Strategy yielding a connected undirected graph and one of its vertices.
///
/// A spanning path over all vertices is laid down before the extra edges.
pub(crate) fn arb_connected_graph() -> impl Strategy<Value = (Graph, String)> {
    any::<GraphShape>().prop_filter_map("shape builds", |mut shape| {
        shape.directed = false;
        let spine = (1..shape.vertices).map(|index| (index - 1, index));
        shape.arcs.splice(0..0, spine);
        shape.build().ok()
    })
}
