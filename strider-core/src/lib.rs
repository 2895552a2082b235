//! Strider core library.
//!
//! Models a graph as an arena of named vertices, walks it at random under a
//! choice of neighbour-selection rules, and reduces repeated runs to
//! degree- and distance-keyed statistics.
//!
//! # Examples
//! ```
//! use strider_core::{Experiment, WalkConfig, WalkManager, generators};
//!
//! let graph = generators::complete(6)?;
//! let config = WalkConfig::builder().with_seed(9).build()?;
//! let mut manager = WalkManager::new(graph, config);
//! let report = manager.run(&Experiment::coverage("0", 100, 4)?)?;
//! assert_eq!(report.runs().len(), 4);
//! assert_eq!(report.result().percentage_cover().get(0), Some(0));
//! # Ok::<(), strider_core::StriderError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod bfs;
mod error;
pub mod generators;
mod graph;
mod manager;
mod walk;

#[cfg(test)]
mod test_utils;

pub use crate::{
    analysis::{
        DegreeRange, DegreeTable, GraphSummary, MetricTables, WalkResult, degree_distribution,
    },
    bfs::Reachability,
    error::{ErrorCategory, Result, StriderError, StriderErrorCode},
    generators::GeneratorSpec,
    graph::{DegreeKind, Edge, Graph, GraphBuilder, TraversalScratch, Vertex, VertexId},
    manager::{Experiment, ExperimentReport, Termination, WalkManager},
    walk::{
        COVER_SLOTS, DEFAULT_PROGRESS_INTERVAL, DEFAULT_STEP_LIMIT, DirectedWalk,
        ParseSelectionModeError, PercentageCover, RandomWalk, SelectionMode, UndirectedWalk,
        WalkConfig, WalkConfigBuilder, WalkOutcome, ensure_mode_supported, select_inverse,
        select_next, select_proportional, select_uniform, walk_for,
    },
};
