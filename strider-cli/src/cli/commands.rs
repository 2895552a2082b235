//! Command implementations and argument parsing for the strider CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use strider_core::{
    Experiment, GeneratorSpec, Graph, GraphSummary, SelectionMode, StriderError, WalkConfig,
    WalkManager,
};
use strider_providers_gml::{Shading, write_gml};
use strider_providers_text::{TextFormatError, read_graph, write_graph};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::report::{ReportConfig, ResultExporter};

const DEFAULT_VERTEX: &str = "0";
const DEFAULT_COVERAGE: u32 = 100;
const DEFAULT_RUNS: usize = 10;
const GRAPH_EXTENSION: &str = "graph";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "strider",
    about = "Simulate random walks on graphs and report how quickly they cover them."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a structural graph and save it in the text format.
    Generate(GenerateArgs),
    /// Render a text-format graph as GML.
    Convert(ConvertArgs),
    /// Write degree distributions and a structural summary of a graph.
    Analyze(AnalyzeArgs),
    /// Walk until a share of the vertices has been discovered.
    Cover(CoverArgs),
    /// Walk until a target vertex has been discovered.
    Path(PathArgs),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Generator descriptor: `K<n>`, `T<arity>-<depth>`, `R<vertices>-<edges>` or `SF<connect>-<vertices>`.
    pub descriptor: String,

    /// File the generated graph is written to.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Seed for the random generators; OS entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `convert` command.
#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    /// Text-format graph to read.
    pub input: PathBuf,

    /// Output path prefix (defaults to the input path without `.graph`).
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Text-format graph to read.
    pub input: PathBuf,

    /// Output path prefix (defaults to the input path without `.graph`).
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Neighbour selection rules, as spelled on the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Uniform choice among neighbours.
    #[default]
    Classic,
    /// Prefer neighbours with high out-degree.
    Outdegree,
    /// Prefer neighbours with low out-degree.
    Routdegree,
    /// Prefer neighbours with high in-degree (directed graphs only).
    Indegree,
    /// Prefer neighbours with low in-degree (directed graphs only).
    Rindegree,
}

impl From<ModeArg> for SelectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => Self::Classic,
            ModeArg::Outdegree => Self::OutDegree,
            ModeArg::Routdegree => Self::ReverseOutDegree,
            ModeArg::Indegree => Self::InDegree,
            ModeArg::Rindegree => Self::ReverseInDegree,
        }
    }
}

/// Options shared by the walking commands.
#[derive(Debug, Args, Clone)]
pub struct WalkArgs {
    /// Text-format graph to walk.
    pub input: PathBuf,

    /// Name of the vertex every run starts from.
    #[arg(long, default_value = DEFAULT_VERTEX)]
    pub start: String,

    /// Number of runs averaged into the report.
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Neighbour selection rule.
    #[arg(long, value_enum, default_value_t = ModeArg::Classic)]
    pub mode: ModeArg,

    /// Also credit the neighbours of every visited vertex as discovered.
    #[arg(long)]
    pub discover: bool,

    /// Base seed making every run reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also render the averaged graph as shaded GML.
    #[arg(long)]
    pub gml: bool,

    /// Output path prefix (defaults to the input path without `.graph`).
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Log walk progress every STEPS steps (1000000 when no value is given).
    #[arg(long, value_name = "STEPS", num_args = 0..=1, default_missing_value = "1000000")]
    pub progress: Option<u64>,
}

/// Options accepted by the `cover` command.
#[derive(Debug, Args, Clone)]
pub struct CoverArgs {
    /// Shared walk options.
    #[command(flatten)]
    pub walk: WalkArgs,

    /// Percentage of vertices each run must discover.
    #[arg(long, default_value_t = DEFAULT_COVERAGE)]
    pub coverage: u32,
}

/// Options accepted by the `path` command.
#[derive(Debug, Args, Clone)]
pub struct PathArgs {
    /// Shared walk options.
    #[command(flatten)]
    pub walk: WalkArgs,

    /// Name of the vertex each run must reach.
    #[arg(long, default_value = DEFAULT_VERTEX)]
    pub target: String,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading a graph or writing a report.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input graph could not be parsed.
    #[error(transparent)]
    Text(#[from] TextFormatError),
    /// Graph construction or a walk session failed.
    #[error(transparent)]
    Core(#[from] StriderError),
}

impl CliError {
    /// Stable machine-readable code of the failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STRIDER_CLI_IO",
            Self::Text(err) => err.code().as_str(),
            Self::Core(err) => err.code().as_str(),
        }
    }
}

/// Walk statistics reported by the `cover` and `path` commands.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WalkSummary {
    /// Selection rule used.
    pub mode: SelectionMode,
    /// Number of runs performed.
    pub runs: usize,
    /// Integer mean of the run times.
    pub mean_time: u64,
    /// Vertices reachable from the start vertex.
    pub reachable: usize,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Subcommand that ran.
    pub command: &'static str,
    /// Structure of the graph the command worked on.
    pub graph: GraphSummary,
    /// Walk statistics; walking commands only.
    pub walk: Option<WalkSummary>,
    /// Files written, in creation order.
    pub outputs: Vec<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, walking or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use strider_cli::cli::{Cli, Command, CoverArgs, ModeArg, WalkArgs, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let input = dir.path().join("pair.graph");
/// std::fs::write(&input, "[0] -- [1]\n")?;
/// let cli = Cli {
///     command: Command::Cover(CoverArgs {
///         walk: WalkArgs {
///             input,
///             start: "0".into(),
///             runs: 2,
///             mode: ModeArg::Classic,
///             discover: false,
///             seed: Some(7),
///             gml: false,
///             template: None,
///             progress: None,
///         },
///         coverage: 100,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.walk.map(|walk| walk.mean_time), Some(2));
/// assert!(dir.path().join("pair_coverage.txt").exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Generate(args) => {
            span.record("command", "generate");
            run_generate(args)
        }
        Command::Convert(args) => {
            span.record("command", "convert");
            run_convert(args)
        }
        Command::Analyze(args) => {
            span.record("command", "analyze");
            run_analyze(args)
        }
        Command::Cover(args) => {
            span.record("command", "cover");
            let experiment =
                Experiment::coverage(args.walk.start.as_str(), args.coverage, args.walk.runs)?;
            run_walk("cover", args.walk, &experiment)
        }
        Command::Path(args) => {
            span.record("command", "path");
            let experiment = Experiment::path(
                args.walk.start.as_str(),
                args.target.as_str(),
                args.walk.runs,
            )?;
            run_walk("path", args.walk, &experiment)
        }
    }?;
    info!(
        command = summary.command,
        outputs = summary.outputs.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.generate",
    err,
    skip(args),
    fields(descriptor = %args.descriptor, output = %args.output.display()),
)]
pub(super) fn run_generate(args: GenerateArgs) -> Result<ExecutionSummary, CliError> {
    let spec: GeneratorSpec = args.descriptor.parse()?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let graph = spec.generate(&mut rng)?;
    let file = create_file(&args.output)?;
    write_graph(&graph, BufWriter::new(file)).map_err(|source| CliError::Io {
        path: args.output.clone(),
        source,
    })?;
    Ok(ExecutionSummary {
        command: "generate",
        graph: GraphSummary::of(&graph),
        walk: None,
        outputs: vec![args.output],
    })
}

#[instrument(name = "cli.convert", err, skip(args), fields(input = %args.input.display()))]
pub(super) fn run_convert(args: ConvertArgs) -> Result<ExecutionSummary, CliError> {
    let graph = open_graph(&args.input)?;
    let mut output = derive_template(&args.input, args.template.as_deref()).into_os_string();
    output.push(".gml");
    let output = PathBuf::from(output);
    let file = create_file(&output)?;
    write_gml(&graph, Shading::None, BufWriter::new(file)).map_err(|source| CliError::Io {
        path: output.clone(),
        source,
    })?;
    Ok(ExecutionSummary {
        command: "convert",
        graph: GraphSummary::of(&graph),
        walk: None,
        outputs: vec![output],
    })
}

#[instrument(name = "cli.analyze", err, skip(args), fields(input = %args.input.display()))]
pub(super) fn run_analyze(args: AnalyzeArgs) -> Result<ExecutionSummary, CliError> {
    let graph = open_graph(&args.input)?;
    let exporter = ResultExporter::new(derive_template(&args.input, args.template.as_deref()));
    let outputs = exporter.write_analysis(&graph)?;
    Ok(ExecutionSummary {
        command: "analyze",
        graph: GraphSummary::of(&graph),
        walk: None,
        outputs,
    })
}

#[instrument(
    name = "cli.walk",
    err,
    skip(args, experiment),
    fields(input = %args.input.display(), mode = ?args.mode, runs = args.runs),
)]
pub(super) fn run_walk(
    command: &'static str,
    args: WalkArgs,
    experiment: &Experiment,
) -> Result<ExecutionSummary, CliError> {
    let config = walk_config(&args)?;
    let graph = open_graph(&args.input)?;
    let exporter = ResultExporter::new(derive_template(&args.input, args.template.as_deref()));

    let mut manager = WalkManager::new(graph, config);
    let report = manager.run(experiment)?;

    let mut outputs = exporter.write_result(report.result())?;
    let settings = ReportConfig::new(experiment, manager.config(), manager.graph());
    outputs.push(exporter.write_config(&settings)?);
    if args.gml {
        outputs.extend(exporter.write_shaded_graphs(report.average_graph())?);
    }

    Ok(ExecutionSummary {
        command,
        graph: GraphSummary::of(manager.graph()),
        walk: Some(WalkSummary {
            mode: manager.config().mode(),
            runs: report.outcomes().len(),
            mean_time: report.mean_time(),
            reachable: report.reachability().reached(),
        }),
        outputs,
    })
}

pub(super) fn walk_config(args: &WalkArgs) -> Result<WalkConfig, CliError> {
    let mut builder = WalkConfig::builder()
        .with_mode(args.mode.into())
        .with_discover(args.discover)
        .with_optional_seed(args.seed);
    if let Some(interval) = args.progress {
        builder = builder.with_progress_interval(interval);
    }
    Ok(builder.build()?)
}

#[instrument(name = "cli.open_graph", err, fields(path = %path.display()))]
pub(super) fn open_graph(path: &Path) -> Result<Graph, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_graph(BufReader::new(file))?)
}

fn create_file(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Output prefix: the override, or `input` without a trailing `.graph`.
pub(super) fn derive_template(input: &Path, override_template: Option<&Path>) -> PathBuf {
    if let Some(template) = override_template {
        return template.to_path_buf();
    }
    if input.extension().is_some_and(|ext| ext == GRAPH_EXTENSION) {
        input.with_extension("")
    } else {
        input.to_path_buf()
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use strider_cli::cli::{ExecutionSummary, render_summary};
/// # use strider_core::{GraphSummary, generators};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     command: "analyze",
///     graph: GraphSummary::of(&generators::complete(3)?),
///     walk: None,
///     outputs: vec!["k3_deg.txt".into()],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "command: analyze\ngraph: 3 vertices, 3 edges, undirected, unweighted\nwrote: k3_deg.txt\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let graph = &summary.graph;
    writeln!(writer, "command: {}", summary.command)?;
    writeln!(
        writer,
        "graph: {} vertices, {} edges, {}, {}",
        graph.vertices,
        graph.edges,
        if graph.directed { "directed" } else { "undirected" },
        if graph.weighted { "weighted" } else { "unweighted" },
    )?;
    if let Some(walk) = &summary.walk {
        writeln!(writer, "mode: {}", walk.mode)?;
        writeln!(writer, "runs: {}", walk.runs)?;
        writeln!(writer, "mean time: {}", walk.mean_time)?;
        writeln!(writer, "reachable: {}/{}", walk.reachable, graph.vertices)?;
    }
    for output in &summary.outputs {
        writeln!(writer, "wrote: {}", output.display())?;
    }
    Ok(())
}
