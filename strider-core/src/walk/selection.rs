//! Neighbour selection strategies.
//!
//! Every strategy is a free function over a neighbour slice. The degree-biased
//! strategies take a degree accessor so out-degree and in-degree weighting share
//! one implementation. All of them return `None` when the slice is empty.

use std::{fmt, str::FromStr};

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use crate::graph::{DegreeKind, Graph, VertexId};

/// Rule used to pick the next vertex of a walk.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    /// Uniform choice among neighbours.
    #[default]
    Classic,
    /// Probability proportional to neighbour out-degree + 1.
    OutDegree,
    /// Probability biased towards neighbours with low out-degree.
    ReverseOutDegree,
    /// Probability proportional to neighbour in-degree + 1. Directed graphs only.
    InDegree,
    /// Probability biased towards neighbours with low in-degree. Directed graphs only.
    ReverseInDegree,
}

impl SelectionMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::OutDegree,
        Self::ReverseOutDegree,
        Self::InDegree,
        Self::ReverseInDegree,
    ];

    /// Configuration name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::OutDegree => "outdegree",
            Self::ReverseOutDegree => "routdegree",
            Self::InDegree => "indegree",
            Self::ReverseInDegree => "rindegree",
        }
    }

    /// Whether the mode reads in-degrees and so needs a directed graph.
    #[must_use]
    pub const fn requires_directed(self) -> bool {
        matches!(self, Self::InDegree | Self::ReverseInDegree)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a selection mode name is not recognised.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown selection mode `{provided}`; expected classic, outdegree, routdegree, indegree or rindegree")]
pub struct ParseSelectionModeError {
    /// The rejected input.
    pub provided: String,
}

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseSelectionModeError {
                provided: raw.to_owned(),
            })
    }
}

/// Picks a neighbour uniformly at random.
pub fn select_uniform<R: Rng + ?Sized>(neighbours: &[VertexId], rng: &mut R) -> Option<VertexId> {
    neighbours.choose(rng).copied()
}

/// Picks a neighbour with probability proportional to `degree_of(n) + 1`.
pub fn select_proportional<R, F>(
    neighbours: &[VertexId],
    degree_of: F,
    rng: &mut R,
) -> Option<VertexId>
where
    R: Rng + ?Sized,
    F: Fn(VertexId) -> usize,
{
    let weights: Vec<u64> = neighbours
        .iter()
        .map(|&id| degree_weight(degree_of(id)))
        .collect();
    pick_cumulative(neighbours, &weights, rng)
}

/// Picks a neighbour with probability proportional to `S - w(n)`, where
/// `w(n) = degree_of(n) + 1` and `S` sums `w` over all neighbours.
///
/// A single neighbour is returned directly since its reverse weight is zero.
pub fn select_inverse<R, F>(neighbours: &[VertexId], degree_of: F, rng: &mut R) -> Option<VertexId>
where
    R: Rng + ?Sized,
    F: Fn(VertexId) -> usize,
{
    match neighbours {
        [] => None,
        [only] => Some(*only),
        _ => {
            let weights: Vec<u64> = neighbours
                .iter()
                .map(|&id| degree_weight(degree_of(id)))
                .collect();
            let sum: u64 = weights.iter().sum();
            let reversed: Vec<u64> = weights.iter().map(|weight| sum - weight).collect();
            pick_cumulative(neighbours, &reversed, rng)
        }
    }
}

/// Applies `mode` to the neighbours of `vertex`.
pub fn select_next<R: Rng + ?Sized>(
    graph: &Graph,
    vertex: VertexId,
    mode: SelectionMode,
    rng: &mut R,
) -> Option<VertexId> {
    let neighbours = graph.node(vertex).neighbours();
    let out_degree = |id: VertexId| graph.degree(id, DegreeKind::Out);
    let in_degree = |id: VertexId| graph.degree(id, DegreeKind::In);
    match mode {
        SelectionMode::Classic => select_uniform(neighbours, rng),
        SelectionMode::OutDegree => select_proportional(neighbours, out_degree, rng),
        SelectionMode::ReverseOutDegree => select_inverse(neighbours, out_degree, rng),
        SelectionMode::InDegree => select_proportional(neighbours, in_degree, rng),
        SelectionMode::ReverseInDegree => select_inverse(neighbours, in_degree, rng),
    }
}

fn degree_weight(degree: usize) -> u64 {
    u64::try_from(degree).map_or(u64::MAX, |value| value.saturating_add(1))
}

/// Draws an integer in `0..Σweights` and returns the neighbour whose
/// cumulative interval contains it.
fn pick_cumulative<R: Rng + ?Sized>(
    neighbours: &[VertexId],
    weights: &[u64],
    rng: &mut R,
) -> Option<VertexId> {
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    let mut upper = 0_u64;
    for (&id, &weight) in neighbours.iter().zip(weights) {
        upper += weight;
        if draw < upper {
            return Some(id);
        }
    }
    neighbours.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::{GraphBuilder, test_utils::star};

    const TRIALS: usize = 20_000;

    #[rstest]
    #[case("classic", SelectionMode::Classic)]
    #[case("OutDegree", SelectionMode::OutDegree)]
    #[case(" routdegree ", SelectionMode::ReverseOutDegree)]
    #[case("indegree", SelectionMode::InDegree)]
    #[case("rindegree", SelectionMode::ReverseInDegree)]
    fn mode_names_parse(#[case] raw: &str, #[case] expected: SelectionMode) {
        assert_eq!(raw.parse::<SelectionMode>(), Ok(expected));
        assert_eq!(expected.as_str().parse::<SelectionMode>(), Ok(expected));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "lazy".parse::<SelectionMode>().expect_err("lazy is not a mode");
        assert_eq!(err.provided, "lazy");
    }

    #[rstest]
    #[case(SelectionMode::Classic)]
    #[case(SelectionMode::OutDegree)]
    #[case(SelectionMode::ReverseOutDegree)]
    #[case(SelectionMode::InDegree)]
    #[case(SelectionMode::ReverseInDegree)]
    fn every_mode_returns_none_without_neighbours(#[case] mode: SelectionMode) {
        let mut builder = GraphBuilder::new(true, false);
        let lonely = builder.add_vertex("lonely");
        let graph = builder.build();
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(select_next(&graph, lonely, mode, &mut rng), None);
    }

    #[rstest]
    #[case(SelectionMode::OutDegree)]
    #[case(SelectionMode::ReverseOutDegree)]
    fn leaf_of_star_always_returns_to_hub(#[case] mode: SelectionMode) {
        let graph = star(6).expect("star builds");
        let hub = graph.vertex_by_name("hub").expect("hub exists");
        let leaf = graph.vertex_by_name("leaf-0").expect("leaf exists");
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(select_next(&graph, leaf, mode, &mut rng), Some(hub));
        }
    }

    #[test]
    fn hub_of_star_picks_leaves_uniformly_under_out_degree_weighting() {
        let leaves = 4;
        let graph = star(leaves).expect("star builds");
        let hub = graph.vertex_by_name("hub").expect("hub exists");
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts = vec![0_usize; graph.vertex_count()];
        for _ in 0..TRIALS {
            let next = select_next(&graph, hub, SelectionMode::OutDegree, &mut rng)
                .expect("hub has neighbours");
            counts[next.index()] += 1;
        }
        let expected = TRIALS / leaves;
        for (id, vertex) in graph.vertices() {
            if id == hub {
                assert_eq!(counts[id.index()], 0);
                continue;
            }
            let observed = counts[id.index()];
            assert!(
                observed.abs_diff(expected) < expected / 10,
                "{} chosen {observed} times, expected about {expected}",
                vertex.name()
            );
        }
    }

    #[test]
    fn proportional_selection_follows_degree_weights() {
        let neighbours = [VertexId::new(0), VertexId::new(1)];
        let degrees = [0_usize, 2];
        let mut rng = SmallRng::seed_from_u64(3);
        let mut heavy = 0_usize;
        for _ in 0..TRIALS {
            let picked = select_proportional(&neighbours, |id| degrees[id.index()], &mut rng);
            if picked == Some(VertexId::new(1)) {
                heavy += 1;
            }
        }
        // Weights 1 and 3.
        let expected = TRIALS * 3 / 4;
        assert!(heavy.abs_diff(expected) < TRIALS / 50, "heavy chosen {heavy} times");
    }

    #[test]
    fn inverse_selection_prefers_low_degree() {
        let neighbours = [VertexId::new(0), VertexId::new(1)];
        let degrees = [0_usize, 2];
        let mut rng = SmallRng::seed_from_u64(5);
        let mut light = 0_usize;
        for _ in 0..TRIALS {
            let picked = select_inverse(&neighbours, |id| degrees[id.index()], &mut rng);
            if picked == Some(VertexId::new(0)) {
                light += 1;
            }
        }
        // Reverse weights 3 and 1.
        let expected = TRIALS * 3 / 4;
        assert!(light.abs_diff(expected) < TRIALS / 50, "light chosen {light} times");
    }

    #[test]
    fn inverse_selection_short_circuits_single_neighbour() {
        let only = VertexId::new(9);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(select_inverse(&[only], |_| 0, &mut rng), Some(only));
    }
}
