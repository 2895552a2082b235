//! Seeded graph fixtures for benchmarks.
//!
//! Every fixture is a pure function of its parameters and a seed, so
//! successive benchmark runs measure the same graphs.

use rand::{SeedableRng, rngs::SmallRng};
use strider_core::{Graph, generators};
use strider_providers_text::graph_to_string;

use crate::error::BenchSetupError;

/// Edges each new vertex attaches with in the scale-free fixtures.
pub const SCALE_FREE_CONNECT: usize = 3;

/// Barabási–Albert graph with [`SCALE_FREE_CONNECT`] links per newcomer.
///
/// The result is connected, so full-coverage walks always terminate.
///
/// # Errors
/// Propagates generator failures.
pub fn scale_free(vertices: usize, seed: u64) -> Result<Graph, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok(generators::scale_free(vertices, SCALE_FREE_CONNECT, &mut rng)?)
}

/// Text-format rendering of a uniform random graph.
///
/// # Errors
/// Propagates generator failures.
pub fn random_graph_text(vertices: usize, edges: usize, seed: u64) -> Result<String, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = generators::random(vertices, edges, &mut rng)?;
    Ok(graph_to_string(&graph))
}
