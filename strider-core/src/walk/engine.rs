//! Shared walk state machine used by both orientation variants.

use rand::rngs::SmallRng;
use tracing::{Span, debug, field, info, instrument};

use crate::{
    Result,
    bfs::percent_of,
    error::StriderError,
    graph::{Graph, VertexId},
};

use super::{PercentageCover, WalkConfig, WalkOutcome, selection::select_next};

/// Counters and random source for one walk instance.
///
/// Each run resets the counters, clears the walk fields of every vertex and
/// draws a fresh random source, so runs never share state.
#[derive(Debug)]
pub(super) struct WalkCore {
    config: WalkConfig,
    rng: SmallRng,
    runs_started: usize,
    time: u64,
    visited: usize,
    total: usize,
    cover: PercentageCover,
}

impl WalkCore {
    pub(super) fn new(config: WalkConfig) -> Self {
        let rng = config.run_rng(0);
        Self {
            config,
            rng,
            runs_started: 0,
            time: 0,
            visited: 0,
            total: 0,
            cover: PercentageCover::default(),
        }
    }

    pub(super) const fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub(super) const fn percentage_cover(&self) -> &PercentageCover {
        &self.cover
    }

    #[instrument(
        name = "core.walk.cover",
        err,
        skip(self, graph),
        fields(mode = %self.config.mode(), discover = self.config.discover(), run = field::Empty),
    )]
    pub(super) fn cover(&mut self, graph: &mut Graph, start: &str, coverage: u8) -> Result<WalkOutcome> {
        if coverage > 100 {
            return Err(StriderError::CoverageOutOfRange {
                requested: u32::from(coverage),
            });
        }
        let origin = graph.vertex_by_name(start)?;
        self.begin(graph);

        let mut current = origin;
        loop {
            let stop = self.process(graph, current, Some(coverage));
            if stop || self.visited == self.total {
                break;
            }
            current = self.step(graph, current)?;
        }
        Ok(self.finish(current))
    }

    #[instrument(
        name = "core.walk.find_path",
        err,
        skip(self, graph),
        fields(mode = %self.config.mode(), discover = self.config.discover(), run = field::Empty),
    )]
    pub(super) fn find_path(&mut self, graph: &mut Graph, start: &str, target: &str) -> Result<WalkOutcome> {
        let origin = graph.vertex_by_name(start)?;
        let goal = graph.vertex_by_name(target)?;
        self.begin(graph);

        let mut current = origin;
        loop {
            self.process(graph, current, None);
            if graph.scratch(goal).first_visit.is_some() {
                break;
            }
            current = self.step(graph, current)?;
        }
        Ok(self.finish(current))
    }

    fn begin(&mut self, graph: &mut Graph) {
        graph.reset_walk_state();
        self.rng = self.config.run_rng(self.runs_started);
        Span::current().record("run", self.runs_started);
        self.runs_started += 1;
        self.time = 0;
        self.visited = 0;
        self.total = graph.vertex_count();
        self.cover = PercentageCover::default();
    }

    /// Visits `vertex` and reports whether the coverage target has been met.
    fn process(&mut self, graph: &mut Graph, vertex: VertexId, coverage: Option<u8>) -> bool {
        self.credit(graph, vertex);

        let mut stop = false;
        if self.config.discover() {
            let mut position = 0;
            while let Some(&neighbour) = graph.node(vertex).neighbours().get(position) {
                self.credit(graph, neighbour);
                position += 1;
            }
            stop |= self.record_cover(coverage);
        }

        self.time += 1;
        if let Some(interval) = self.config.progress_interval() {
            if self.time % interval.get() == 0 {
                info!(
                    time = self.time,
                    visited = self.visited,
                    total = self.total,
                    "walk progress"
                );
            }
        }

        stop |= self.record_cover(coverage);
        stop
    }

    fn credit(&mut self, graph: &mut Graph, vertex: VertexId) {
        let scratch = graph.scratch_mut(vertex);
        if scratch.first_visit.is_none() {
            scratch.first_visit = Some(self.time);
            self.visited += 1;
        }
        scratch.visit_count += 1;
    }

    fn record_cover(&mut self, coverage: Option<u8>) -> bool {
        let percent = percent_of(self.visited, self.total);
        self.cover.record(percent, self.time);
        coverage.is_some_and(|requested| percent >= requested)
    }

    fn step(&mut self, graph: &mut Graph, vertex: VertexId) -> Result<VertexId> {
        let limit = self.config.step_limit().get();
        if self.time >= limit {
            return Err(StriderError::StepLimitExceeded { limit });
        }
        let next = select_next(graph, vertex, self.config.mode(), &mut self.rng).ok_or_else(|| {
            StriderError::WalkStalled {
                vertex: graph.node(vertex).name_arc().clone(),
                time: self.time,
            }
        })?;
        graph.scratch_mut(next).parent = Some(vertex);
        Ok(next)
    }

    fn finish(&mut self, last: VertexId) -> WalkOutcome {
        self.cover.fill_forward();
        debug!(time = self.time, visited = self.visited, total = self.total, "walk run finished");
        WalkOutcome {
            time: self.time,
            visited: self.visited,
            total: self.total,
            last,
            percentage_cover: self.cover.clone(),
        }
    }
}
