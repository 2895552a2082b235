//! Multi-run orchestration.
//!
//! [`WalkManager`] checks an [`Experiment`] against BFS reachability, runs it
//! the requested number of times and reduces the runs into an
//! [`ExperimentReport`].

use std::{
    num::{NonZeroU64, NonZeroUsize},
    sync::Arc,
};

use tracing::{info, instrument};

use crate::{
    Result,
    analysis::WalkResult,
    bfs::Reachability,
    error::StriderError,
    graph::Graph,
    walk::{WalkConfig, WalkOutcome, ensure_mode_supported, walk_for},
};

/// When a run stops.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Termination {
    /// Stop once this percentage of vertices has been discovered.
    Coverage(u8),
    /// Stop once the named vertex has been discovered.
    Target(Arc<str>),
}

/// A validated request for `runs` walks from one start vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Experiment {
    start: Arc<str>,
    termination: Termination,
    runs: NonZeroUsize,
}

impl Experiment {
    /// Coverage experiment.
    ///
    /// # Errors
    /// Returns [`StriderError::CoverageOutOfRange`] when `coverage > 100` and
    /// [`StriderError::InvalidParameter`] when `runs` is zero.
    pub fn coverage(start: impl Into<Arc<str>>, coverage: u32, runs: usize) -> Result<Self> {
        let percent = u8::try_from(coverage)
            .ok()
            .filter(|percent| *percent <= 100)
            .ok_or(StriderError::CoverageOutOfRange { requested: coverage })?;
        Self::new(start.into(), Termination::Coverage(percent), runs)
    }

    /// Path-finding experiment.
    ///
    /// # Errors
    /// Returns [`StriderError::InvalidParameter`] when `runs` is zero.
    pub fn path(start: impl Into<Arc<str>>, target: impl Into<Arc<str>>, runs: usize) -> Result<Self> {
        Self::new(start.into(), Termination::Target(target.into()), runs)
    }

    fn new(start: Arc<str>, termination: Termination, runs: usize) -> Result<Self> {
        let runs = NonZeroUsize::new(runs)
            .ok_or_else(|| StriderError::invalid_parameter("runs", "must be at least 1"))?;
        Ok(Self {
            start,
            termination,
            runs,
        })
    }

    /// Start vertex name.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Stopping rule.
    #[rustfmt::skip]
    #[must_use]
    pub const fn termination(&self) -> &Termination { &self.termination }

    /// Number of runs.
    #[rustfmt::skip]
    #[must_use]
    pub const fn runs(&self) -> NonZeroUsize { self.runs }
}

/// Everything one manager session produced.
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    result: WalkResult,
    runs: Vec<WalkResult>,
    outcomes: Vec<WalkOutcome>,
    average_graph: Graph,
    reachability: Reachability,
}

impl ExperimentReport {
    /// Statistics averaged over every run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn result(&self) -> &WalkResult { &self.result }

    /// Per-run statistics in run order.
    #[must_use]
    pub fn runs(&self) -> &[WalkResult] {
        &self.runs
    }

    /// Per-run outcomes in run order.
    #[must_use]
    pub fn outcomes(&self) -> &[WalkOutcome] {
        &self.outcomes
    }

    /// Copy of the base graph whose scratch holds per-vertex means.
    ///
    /// `visit_count` is the integer mean over all runs. `first_visit` is the
    /// integer mean over the runs that discovered the vertex and stays `None`
    /// when none did. `parent` is the one left by the last run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn average_graph(&self) -> &Graph { &self.average_graph }

    /// Reachability measured before the first run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn reachability(&self) -> &Reachability { &self.reachability }

    /// Integer mean of the run times.
    #[must_use]
    pub fn mean_time(&self) -> u64 {
        let runs = self.outcomes.len().max(1) as u128;
        let total: u128 = self.outcomes.iter().map(|o| u128::from(o.time)).sum();
        u64::try_from(total / runs).unwrap_or(u64::MAX)
    }
}

/// Runs experiments against one base graph.
#[derive(Debug)]
pub struct WalkManager {
    graph: Graph,
    config: WalkConfig,
}

impl WalkManager {
    /// Takes ownership of `graph` for the duration of the sessions.
    #[must_use]
    pub fn new(graph: Graph, config: WalkConfig) -> Self {
        Self { graph, config }
    }

    /// Base graph; its scratch holds the counters of the last run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Walk settings shared by every run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn config(&self) -> &WalkConfig { &self.config }

    /// Returns the base graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Checks `experiment` against the graph, then runs it.
    ///
    /// # Errors
    /// Returns [`StriderError::ModeRequiresDirected`] for in-degree modes on
    /// undirected graphs, [`StriderError::VertexNotFound`] for unknown
    /// endpoints, [`StriderError::CoverageUnattainable`] or
    /// [`StriderError::TargetUnreachable`] when BFS shows the run could never
    /// finish, and any error raised by a run.
    #[instrument(
        name = "core.session",
        err,
        skip(self, experiment),
        fields(
            start = experiment.start(),
            runs = experiment.runs().get(),
            mode = %self.config.mode(),
            directed = self.graph.is_directed(),
        ),
    )]
    pub fn run(&mut self, experiment: &Experiment) -> Result<ExperimentReport> {
        ensure_mode_supported(&self.graph, &self.config)?;
        let reachability = self.precheck(experiment)?;

        let runs = experiment.runs().get();
        let mut average_graph = self.graph.pristine_copy();
        let mut discoveries = vec![0_u64; average_graph.vertex_count()];
        let mut results = Vec::with_capacity(runs);
        let mut outcomes = Vec::with_capacity(runs);
        {
            let mut walk = walk_for(&mut self.graph, self.config.clone())?;
            for _ in 0..runs {
                let outcome = match experiment.termination() {
                    Termination::Coverage(coverage) => {
                        walk.run_cover(experiment.start(), *coverage)?
                    }
                    Termination::Target(target) => walk.run_find_path(experiment.start(), target)?,
                };
                results.push(WalkResult::from_run(walk.graph(), &outcome.percentage_cover));
                accumulate(walk.graph(), &mut average_graph, &mut discoveries)?;
                outcomes.push(outcome);
            }
        }
        divide_by_runs(&mut average_graph, runs as u64, &discoveries);
        let result = WalkResult::average(&results)?;

        let report = ExperimentReport {
            result,
            runs: results,
            outcomes,
            average_graph,
            reachability,
        };
        info!(
            runs,
            mean_time = report.mean_time(),
            reached = report.reachability.reached(),
            total = report.reachability.total(),
            "experiment finished"
        );
        Ok(report)
    }

    fn precheck(&mut self, experiment: &Experiment) -> Result<Reachability> {
        let reachability = Reachability::run(&mut self.graph, experiment.start())?;
        match experiment.termination() {
            Termination::Coverage(requested) => {
                let achievable = reachability.coverage();
                if achievable < *requested {
                    return Err(StriderError::CoverageUnattainable {
                        start: experiment.start.clone(),
                        requested: *requested,
                        achievable,
                    });
                }
            }
            Termination::Target(target) => {
                if !reachability.is_reachable(&self.graph, target)? {
                    return Err(StriderError::TargetUnreachable {
                        start: experiment.start.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(reachability)
    }
}

/// Adds the counters of one run into `average`, matching vertices by name.
///
/// `discoveries` counts, per vertex of `average`, the runs that discovered it.
fn accumulate(run: &Graph, average: &mut Graph, discoveries: &mut [u64]) -> Result<()> {
    for (_, vertex) in run.vertices() {
        let target = average.vertex_by_name(vertex.name())?;
        let parent = vertex
            .scratch()
            .parent
            .map(|id| average.vertex_by_name(run.name_of(id)))
            .transpose()?;
        let seen = *vertex.scratch();
        let slot = average.scratch_mut(target);
        slot.visit_count = slot.visit_count.saturating_add(seen.visit_count);
        if let Some(time) = seen.first_visit {
            slot.first_visit = Some(slot.first_visit.unwrap_or(0).saturating_add(time));
            if let Some(hits) = discoveries.get_mut(target.index()) {
                *hits += 1;
            }
        }
        slot.parent = parent;
    }
    Ok(())
}

fn divide_by_runs(average: &mut Graph, runs: u64, discoveries: &[u64]) {
    for (id, &hits) in average.vertex_ids().zip(discoveries) {
        let slot = average.scratch_mut(id);
        slot.visit_count /= runs;
        slot.first_visit = slot
            .first_visit
            .zip(NonZeroU64::new(hits))
            .map(|(sum, hits)| sum / hits);
    }
}
