//! Statistical reduction of walk runs.
//!
//! [`WalkResult::from_run`] buckets the vertices of a walked graph by degree
//! and by BFS distance. [`WalkResult::average`] folds several runs into one
//! result. Vertices a run never discovered are left out of every bucket rather
//! than counted as zero.

mod distribution;
mod table;

use std::collections::BTreeMap;

use tracing::instrument;

use crate::{
    Result,
    error::StriderError,
    graph::{DegreeKind, Graph},
    walk::{COVER_SLOTS, PercentageCover},
};

pub use distribution::{DegreeRange, GraphSummary, degree_distribution};
pub use table::DegreeTable;

use table::{MeanAccumulator, RatioAccumulator};

/// The three degree-keyed statistics computed for one degree flavour.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MetricTables {
    /// Mean visit count of visited vertices.
    pub visits: DegreeTable,
    /// Mean first-visit time of discovered vertices.
    pub first_visit: DegreeTable,
    /// Sum of first-visit times divided by sum of BFS distances.
    pub first_visit_per_distance: DegreeTable,
}

/// Statistics of one run, or the average of several.
///
/// # Examples
/// ```
/// use strider_core::{RandomWalk, Reachability, UndirectedWalk, WalkConfig, WalkResult, generators};
///
/// let mut graph = generators::complete(4)?;
/// Reachability::run(&mut graph, "0")?;
/// let config = WalkConfig::builder().with_seed(3).build()?;
/// let mut walk = UndirectedWalk::new(&mut graph, config)?;
/// let outcome = walk.run_cover("0", 100)?;
///
/// let result = WalkResult::from_run(walk.graph(), &outcome.percentage_cover);
/// assert_eq!(result.degree().visits.keys().collect::<Vec<_>>(), vec![3]);
/// assert!(result.in_degree().is_none());
/// # Ok::<(), strider_core::StriderError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkResult {
    directed: bool,
    degree: MetricTables,
    in_degree: Option<MetricTables>,
    out_degree: Option<MetricTables>,
    distance_visits: DegreeTable,
    distance_first_visit: DegreeTable,
    percentage_cover: PercentageCover,
}

impl WalkResult {
    /// Buckets the counters left on `graph` by a completed run.
    ///
    /// BFS distances must come from a reachability pass from the walk's start
    /// vertex; vertices without a distance are skipped in distance tables.
    #[must_use]
    pub fn from_run(graph: &Graph, cover: &PercentageCover) -> Self {
        let directed = graph.is_directed();
        let mut distance_visits = MeanAccumulator::default();
        let mut distance_first_visit = MeanAccumulator::default();
        for (_, vertex) in graph.vertices() {
            let scratch = vertex.scratch();
            let Some(distance) = scratch.bfs_distance.and_then(|d| usize::try_from(d).ok()) else {
                continue;
            };
            if scratch.visit_count != 0 {
                distance_visits.add(distance, scratch.visit_count);
            }
            if let Some(time) = scratch.first_visit {
                distance_first_visit.add(distance, time);
            }
        }

        Self {
            directed,
            degree: metric_tables(graph, DegreeKind::Total),
            in_degree: directed.then(|| metric_tables(graph, DegreeKind::In)),
            out_degree: directed.then(|| metric_tables(graph, DegreeKind::Out)),
            distance_visits: distance_visits.finish(),
            distance_first_visit: distance_first_visit.finish(),
            percentage_cover: cover.clone(),
        }
    }

    /// Averages `results` table by table.
    ///
    /// Each value contributes `value / N` to a running floating-point sum over
    /// the union of keys seen in any run; the sums are truncated at the end.
    /// Orientation comes from the first result.
    ///
    /// # Errors
    /// Returns [`StriderError::EmptyResultSet`] when `results` is empty.
    #[instrument(name = "core.average", err, skip(results), fields(runs = results.len()))]
    pub fn average(results: &[Self]) -> Result<Self> {
        let first = results.first().ok_or(StriderError::EmptyResultSet)?;
        let directed = first.directed;
        let runs = results.len() as f64;

        let average_metrics = |select: fn(&Self) -> Option<&MetricTables>| MetricTables {
            visits: average_tables(results.iter().filter_map(select).map(|m| &m.visits), runs),
            first_visit: average_tables(
                results.iter().filter_map(select).map(|m| &m.first_visit),
                runs,
            ),
            first_visit_per_distance: average_tables(
                results
                    .iter()
                    .filter_map(select)
                    .map(|m| &m.first_visit_per_distance),
                runs,
            ),
        };

        let mut cover = [0.0_f64; COVER_SLOTS];
        for result in results {
            for (slot, value) in cover.iter_mut().zip(result.percentage_cover.as_slice()) {
                *slot += to_f64(*value) / runs;
            }
        }

        Ok(Self {
            directed,
            degree: average_metrics(|r| Some(&r.degree)),
            in_degree: directed.then(|| average_metrics(|r| r.in_degree.as_ref())),
            out_degree: directed.then(|| average_metrics(|r| r.out_degree.as_ref())),
            distance_visits: average_tables(results.iter().map(|r| &r.distance_visits), runs),
            distance_first_visit: average_tables(
                results.iter().map(|r| &r.distance_first_visit),
                runs,
            ),
            percentage_cover: PercentageCover::from_slots(cover.map(truncate)),
        })
    }

    /// Whether the walked graph was directed.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_directed(&self) -> bool { self.directed }

    /// Tables keyed by total degree.
    #[rustfmt::skip]
    #[must_use]
    pub const fn degree(&self) -> &MetricTables { &self.degree }

    /// Tables keyed by in-degree; directed graphs only.
    #[must_use]
    pub const fn in_degree(&self) -> Option<&MetricTables> {
        self.in_degree.as_ref()
    }

    /// Tables keyed by out-degree; directed graphs only.
    #[must_use]
    pub const fn out_degree(&self) -> Option<&MetricTables> {
        self.out_degree.as_ref()
    }

    /// Tables for `kind`, if computed.
    #[must_use]
    pub const fn by_degree(&self, kind: DegreeKind) -> Option<&MetricTables> {
        match kind {
            DegreeKind::Total => Some(&self.degree),
            DegreeKind::In => self.in_degree(),
            DegreeKind::Out => self.out_degree(),
        }
    }

    /// Mean visit count keyed by BFS distance.
    #[rustfmt::skip]
    #[must_use]
    pub const fn distance_visits(&self) -> &DegreeTable { &self.distance_visits }

    /// Mean first-visit time keyed by BFS distance.
    #[rustfmt::skip]
    #[must_use]
    pub const fn distance_first_visit(&self) -> &DegreeTable { &self.distance_first_visit }

    /// Percentage-cover curve.
    #[rustfmt::skip]
    #[must_use]
    pub const fn percentage_cover(&self) -> &PercentageCover { &self.percentage_cover }
}

fn metric_tables(graph: &Graph, kind: DegreeKind) -> MetricTables {
    let mut visits = MeanAccumulator::default();
    let mut first_visit = MeanAccumulator::default();
    let mut per_distance = RatioAccumulator::default();
    for id in graph.vertex_ids() {
        let degree = graph.degree(id, kind);
        let scratch = graph.scratch(id);
        if scratch.visit_count != 0 {
            visits.add(degree, scratch.visit_count);
        }
        if let Some(time) = scratch.first_visit {
            first_visit.add(degree, time);
            if let Some(distance) = scratch.bfs_distance {
                per_distance.add(degree, time, distance);
            }
        }
    }
    MetricTables {
        visits: visits.finish(),
        first_visit: first_visit.finish(),
        first_visit_per_distance: per_distance.finish(),
    }
}

fn average_tables<'a>(tables: impl Iterator<Item = &'a DegreeTable>, runs: f64) -> DegreeTable {
    let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
    for table in tables {
        for (key, value) in table.iter() {
            *sums.entry(key).or_default() += to_f64(value) / runs;
        }
    }
    sums.into_iter().map(|(key, sum)| (key, truncate(sum))).collect()
}

fn to_f64(value: u64) -> f64 {
    value as f64
}

/// Drops the fractional part; averages of `u64` values are never negative.
fn truncate(value: f64) -> u64 {
    value as u64
}
