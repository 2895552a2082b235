//! Files written next to a template path.
//!
//! Every table is plain text with one `key    value` row per line, which is
//! what the plotting scripts consuming these reports expect.

use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use strider_core::{
    DegreeKind, Experiment, Graph, GraphSummary, SelectionMode, Termination, WalkConfig,
    WalkResult, degree_distribution,
};
use strider_providers_gml::{Shading, write_gml};
use tracing::{debug, instrument};

use super::CliError;

const COLUMN_GAP: &str = "    ";

/// Settings of a walk session, as recorded in `<template>_config.txt`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportConfig {
    /// Selection rule of the walks.
    pub selection: SelectionMode,
    /// Number of runs averaged.
    pub runs: usize,
    /// Whether the graph was directed.
    pub directed: bool,
    /// Stop condition of each run.
    pub termination: Termination,
    /// Whether neighbours were credited on observation.
    pub discover: bool,
    /// Base seed; `None` when runs drew from OS entropy.
    pub seed: Option<u64>,
}

impl ReportConfig {
    /// Captures the settings of `experiment` run with `config` on `graph`.
    #[must_use]
    pub fn new(experiment: &Experiment, config: &WalkConfig, graph: &Graph) -> Self {
        Self {
            selection: config.mode(),
            runs: experiment.runs().get(),
            directed: graph.is_directed(),
            termination: experiment.termination().clone(),
            discover: config.discover(),
            seed: config.seed(),
        }
    }

    /// `cover` or `path`.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self.termination {
            Termination::Coverage(_) => "cover",
            Termination::Target(_) => "path",
        }
    }
}

/// Writes report files named `<template>_<suffix>`.
///
/// # Examples
/// ```
/// use strider_cli::cli::ResultExporter;
///
/// let exporter = ResultExporter::new("out/k5");
/// assert_eq!(
///     exporter.path_for("degree_time.txt"),
///     std::path::PathBuf::from("out/k5_degree_time.txt"),
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultExporter {
    template: PathBuf,
}

impl ResultExporter {
    /// Creates an exporter rooted at `template`.
    #[must_use]
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Template every output path starts with.
    #[must_use]
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Path of the output file with the given suffix.
    #[must_use]
    pub fn path_for(&self, suffix: &str) -> PathBuf {
        let mut name = self.template.clone().into_os_string();
        name.push("_");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Writes the degree, distance and coverage tables of `result`.
    ///
    /// Directed results also get `in_degree_*` and `out_degree_*` tables.
    ///
    /// # Errors
    /// Returns [`CliError::Io`] naming the file that could not be written.
    #[instrument(name = "cli.export", err, skip(self, result), fields(template = %self.template.display()))]
    pub fn write_result(&self, result: &WalkResult) -> Result<Vec<PathBuf>, CliError> {
        let mut written = Vec::new();
        for kind in [DegreeKind::Total, DegreeKind::In, DegreeKind::Out] {
            let Some(tables) = result.by_degree(kind) else {
                continue;
            };
            let label = kind.as_str();
            written.push(self.write_rows(&format!("{label}_visited.txt"), tables.visits.iter())?);
            written.push(self.write_rows(&format!("{label}_time.txt"), tables.first_visit.iter())?);
            written.push(self.write_rows(
                &format!("{label}_time_length.txt"),
                tables.first_visit_per_distance.iter(),
            )?);
        }
        written.push(self.write_rows("length_visited.txt", result.distance_visits().iter())?);
        written.push(self.write_rows("length_time.txt", result.distance_first_visit().iter())?);
        written.push(self.write_rows("coverage.txt", result.percentage_cover().iter())?);
        debug!(files = written.len(), "result tables written");
        Ok(written)
    }

    /// Writes `<template>_config.txt` as `key=value` lines.
    ///
    /// The `seed` line is omitted for entropy-seeded sessions.
    ///
    /// # Errors
    /// Returns [`CliError::Io`] when the file cannot be written.
    pub fn write_config(&self, config: &ReportConfig) -> Result<PathBuf, CliError> {
        self.write_file("config.txt", |out| {
            writeln!(out, "template={}", self.template.display())?;
            writeln!(out, "mode={}", config.mode())?;
            writeln!(out, "rwmode={}", config.selection)?;
            writeln!(out, "runs={}", config.runs)?;
            writeln!(out, "directed={}", config.directed)?;
            match &config.termination {
                Termination::Coverage(coverage) => writeln!(out, "coverage={coverage}")?,
                Termination::Target(target) => writeln!(out, "target={target}")?,
            }
            writeln!(out, "discover={}", config.discover)?;
            if let Some(seed) = config.seed {
                writeln!(out, "seed={seed}")?;
            }
            Ok(())
        })
    }

    /// Renders `graph` twice: shaded by visits and by first-visit time.
    ///
    /// # Errors
    /// Returns [`CliError::Io`] when either file cannot be written.
    pub fn write_shaded_graphs(&self, graph: &Graph) -> Result<Vec<PathBuf>, CliError> {
        Ok(vec![
            self.write_file("coverage.gml", |out| write_gml(graph, Shading::VisitCount, out))?,
            self.write_file("time.gml", |out| write_gml(graph, Shading::FirstVisit, out))?,
        ])
    }

    /// Writes degree distributions and the structural summary of `graph`.
    ///
    /// Produces `_deg.txt` and `_info.txt`, plus `_in_deg.txt` and
    /// `_out_deg.txt` for directed graphs.
    ///
    /// # Errors
    /// Returns [`CliError::Io`] naming the file that could not be written.
    pub fn write_analysis(&self, graph: &Graph) -> Result<Vec<PathBuf>, CliError> {
        let mut kinds = vec![(DegreeKind::Total, "deg.txt")];
        if graph.is_directed() {
            kinds.push((DegreeKind::In, "in_deg.txt"));
            kinds.push((DegreeKind::Out, "out_deg.txt"));
        }
        let mut written = Vec::with_capacity(kinds.len() + 1);
        for (kind, suffix) in kinds {
            written.push(self.write_rows(suffix, degree_distribution(graph, kind).iter())?);
        }
        let summary = GraphSummary::of(graph);
        written.push(self.write_file("info.txt", |out| write!(out, "{summary}"))?);
        Ok(written)
    }

    fn write_rows<K, V>(
        &self,
        suffix: &str,
        rows: impl Iterator<Item = (K, V)>,
    ) -> Result<PathBuf, CliError>
    where
        K: Display,
        V: Display,
    {
        self.write_file(suffix, |out| {
            for (key, value) in rows {
                writeln!(out, "{key}{COLUMN_GAP}{value}")?;
            }
            Ok(())
        })
    }

    fn write_file<F>(&self, suffix: &str, body: F) -> Result<PathBuf, CliError>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let path = self.path_for(suffix);
        let io_error = |source| CliError::Io {
            path: path.clone(),
            source,
        };
        let mut out = BufWriter::new(File::create(&path).map_err(io_error)?);
        body(&mut out).and_then(|()| out.flush()).map_err(io_error)?;
        Ok(path)
    }
}
