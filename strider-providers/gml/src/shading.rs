//! Grey-scale shading of vertices by a walk counter.

use strider_core::{Graph, TraversalScratch, VertexId};

/// Which counter, if any, colours the vertices.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Shading {
    /// Topology only.
    #[default]
    None,
    /// Darker vertices were visited more often.
    VisitCount,
    /// Darker vertices were discovered later.
    FirstVisit,
}

impl Shading {
    /// Counter shown for a vertex; `None` when the walk never discovered it.
    pub(crate) fn value(self, scratch: &TraversalScratch) -> Option<u64> {
        let discovered = scratch.first_visit?;
        match self {
            Self::None => None,
            Self::VisitCount => Some(scratch.visit_count),
            Self::FirstVisit => Some(discovered),
        }
    }
}

/// Smallest and largest shaded value over the discovered vertices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ValueRange {
    min: u64,
    max: u64,
}

impl ValueRange {
    pub(crate) fn of(graph: &Graph, shading: Shading) -> Option<Self> {
        graph
            .vertex_ids()
            .filter_map(|id: VertexId| shading.value(graph.scratch(id)))
            .fold(None, |range, value| {
                Some(match range {
                    None => Self { min: value, max: value },
                    Some(Self { min, max }) => Self {
                        min: min.min(value),
                        max: max.max(value),
                    },
                })
            })
    }

    /// Hex `rrggbb` grey for `value`: white at the minimum, black at the maximum.
    pub(crate) fn grey(self, value: u64) -> String {
        let level = if self.max == self.min {
            255
        } else {
            let span = (self.max - self.min) as f64;
            let offset = value.saturating_sub(self.min) as f64;
            let darkness = (255.0 / span * offset).clamp(0.0, 255.0) as u8;
            255 - darkness
        };
        format!("{level:02x}{level:02x}{level:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::minimum(0, "ffffff")]
    #[case::maximum(10, "000000")]
    #[case::middle(5, "808080")]
    #[case::one_step(1, "e6e6e6")]
    fn grey_levels_interpolate(#[case] value: u64, #[case] expected: &str) {
        let range = ValueRange { min: 0, max: 10 };
        assert_eq!(range.grey(value), expected);
    }

    #[test]
    fn flat_range_renders_white() {
        let range = ValueRange { min: 4, max: 4 };
        assert_eq!(range.grey(4), "ffffff");
    }

    #[test]
    fn undiscovered_vertices_have_no_value() {
        let scratch = TraversalScratch {
            visit_count: 3,
            ..TraversalScratch::default()
        };
        assert_eq!(Shading::VisitCount.value(&scratch), None);
        let seen = TraversalScratch {
            visit_count: 3,
            first_visit: Some(8),
            ..TraversalScratch::default()
        };
        assert_eq!(Shading::VisitCount.value(&seen), Some(3));
        assert_eq!(Shading::FirstVisit.value(&seen), Some(8));
        assert_eq!(Shading::None.value(&seen), None);
    }
}
