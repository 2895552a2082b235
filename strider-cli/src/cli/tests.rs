//! Unit tests for the CLI commands and report files.

use super::commands::{derive_template, walk_config};
use super::test_helpers::{
    cover, create_graph_file, path, read_rows, run_cli_expecting_error, temp_dir, walk_args,
};
use super::{
    AnalyzeArgs, Cli, CliError, Command, ConvertArgs, ExecutionSummary, GenerateArgs, ModeArg,
    WalkSummary, render_summary, run_cli,
};

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;
use strider_core::{
    DEFAULT_PROGRESS_INTERVAL, GraphSummary, SelectionMode, StriderError, generators,
};
use strider_providers_text::{TextFormatError, load_graph};
use strider_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TRIANGLE: &str = "[0] -- [1]\n[1] -- [2]\n[2] -- [0]\n";
const DIRECTED_CHAIN: &str = "[0] -> [1]\n[1] -> [2]\n[2] -> [3]\n";

fn file_names(outputs: &[PathBuf]) -> Vec<String> {
    outputs
        .iter()
        .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[case::graph_extension("/tmp/k5.graph", None, "/tmp/k5")]
#[case::other_extension("/tmp/k5.txt", None, "/tmp/k5.txt")]
#[case::no_extension("/tmp/k5", None, "/tmp/k5")]
#[case::dotted_stem("/tmp/t2.10.graph", None, "/tmp/t2.10")]
#[case::override_template("/tmp/k5.graph", Some("/out/run"), "/out/run")]
fn templates_drop_the_graph_extension(
    #[case] input: &str,
    #[case] override_template: Option<&str>,
    #[case] expected: &str,
) {
    let template = derive_template(Path::new(input), override_template.map(Path::new));
    assert_eq!(template, PathBuf::from(expected));
}

#[rstest]
#[case(ModeArg::Classic, SelectionMode::Classic)]
#[case(ModeArg::Outdegree, SelectionMode::OutDegree)]
#[case(ModeArg::Routdegree, SelectionMode::ReverseOutDegree)]
#[case(ModeArg::Indegree, SelectionMode::InDegree)]
#[case(ModeArg::Rindegree, SelectionMode::ReverseInDegree)]
fn mode_arguments_map_onto_selection_modes(#[case] arg: ModeArg, #[case] mode: SelectionMode) {
    assert_eq!(SelectionMode::from(arg), mode);
    let spelled = clap::ValueEnum::to_possible_value(&arg).map(|value| value.get_name().to_owned());
    assert_eq!(spelled.as_deref(), Some(mode.as_str()));
}

#[rstest]
fn cover_defaults_match_the_documented_values() -> TestResult {
    let cli = Cli::try_parse_from(["strider", "cover", "graph.graph"])?;
    let Command::Cover(args) = cli.command else {
        panic!("expected the cover command");
    };
    assert_eq!(args.coverage, 100);
    assert_eq!(args.walk.runs, 10);
    assert_eq!(args.walk.start, "0");
    assert_eq!(args.walk.mode, ModeArg::Classic);
    assert!(!args.walk.discover && !args.walk.gml);
    assert_eq!(args.walk.progress, None);
    Ok(())
}

#[rstest]
#[case::bare_flag(&["--progress"], Some(DEFAULT_PROGRESS_INTERVAL))]
#[case::with_value(&["--progress", "500"], Some(500))]
#[case::absent(&[], None)]
fn progress_accepts_an_optional_interval(#[case] extra: &[&str], #[case] expected: Option<u64>) -> TestResult {
    let mut argv = vec!["strider", "path", "g.graph", "--target", "3", "--mode", "rindegree"];
    argv.extend_from_slice(extra);
    let cli = Cli::try_parse_from(argv)?;
    let Command::Path(args) = cli.command else {
        panic!("expected the path command");
    };
    assert_eq!(args.target, "3");
    assert_eq!(args.walk.mode, ModeArg::Rindegree);
    assert_eq!(args.walk.progress, expected);
    let config = walk_config(&args.walk)?;
    assert_eq!(config.progress_interval().map(|interval| interval.get()), expected);
    Ok(())
}

#[rstest]
fn zero_progress_interval_is_rejected() {
    let mut args = walk_args(PathBuf::from("unused.graph"));
    args.progress = Some(0);
    let err = walk_config(&args).expect_err("zero interval must fail");
    assert_eq!(err.code(), "STRIDER_INVALID_PARAMETER");
}

#[rstest]
fn cover_writes_every_undirected_table() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", TRIANGLE)?;
    let summary = run_cli(cover(walk_args(input), 100))?;

    assert_eq!(summary.command, "cover");
    assert_eq!(
        file_names(&summary.outputs),
        [
            "tri_degree_visited.txt",
            "tri_degree_time.txt",
            "tri_degree_time_length.txt",
            "tri_length_visited.txt",
            "tri_length_time.txt",
            "tri_coverage.txt",
            "tri_config.txt",
        ]
    );
    let walk = summary.walk.ok_or("cover reports walk statistics")?;
    assert_eq!(walk.runs, 3);
    assert_eq!(walk.reachable, 3);
    assert!(walk.mean_time >= 3);

    let coverage = read_rows(&dir.path().join("tri_coverage.txt"))?;
    assert_eq!(coverage.len(), 101);
    assert!(coverage.iter().enumerate().all(|(index, &(key, _))| key == index as u64));
    assert!(coverage.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    let full = coverage.last().map_or(0, |row| row.1);
    assert!(full.abs_diff(walk.mean_time) <= 1, "{full} vs {}", walk.mean_time);

    let degree_time = read_rows(&dir.path().join("tri_degree_time.txt"))?;
    assert_eq!(degree_time.iter().map(|row| row.0).collect::<Vec<_>>(), [2]);
    Ok(())
}

#[rstest]
fn directed_paths_add_in_and_out_tables() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "chain.graph", DIRECTED_CHAIN)?;
    let mut args = walk_args(input);
    args.runs = 2;
    let summary = run_cli(path(args, "3"))?;

    let names = file_names(&summary.outputs);
    for table in ["in_degree_visited", "out_degree_time", "in_degree_time_length"] {
        assert!(names.contains(&format!("chain_{table}.txt")), "{table} missing from {names:?}");
    }
    assert_eq!(names.len(), 3 * 3 + 3 + 1);
    assert_eq!(summary.walk.map(|walk| walk.mean_time), Some(4));

    let lengths = read_rows(&dir.path().join("chain_length_time.txt"))?;
    assert_eq!(lengths, [(0, 0), (1, 1), (2, 2), (3, 3)]);

    let config = fs::read_to_string(dir.path().join("chain_config.txt"))?;
    let template = dir.path().join("chain");
    assert_eq!(
        config,
        format!(
            "template={}\nmode=path\nrwmode=classic\nruns=2\ndirected=true\ntarget=3\ndiscover=false\nseed=11\n",
            template.display()
        )
    );
    Ok(())
}

#[rstest]
fn gml_flag_renders_both_shadings() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", TRIANGLE)?;
    let mut args = walk_args(input);
    args.gml = true;
    args.template = Some(dir.path().join("shaded"));
    let summary = run_cli(cover(args, 100))?;

    let names = file_names(&summary.outputs);
    assert!(names.ends_with(&["shaded_coverage.gml".to_owned(), "shaded_time.gml".to_owned()]));
    let time = fs::read_to_string(dir.path().join("shaded_time.gml"))?;
    assert!(time.contains("label \"0 (0)\""));
    assert!(time.contains("fill \"#ffffff\""));
    Ok(())
}

#[rstest]
fn in_degree_modes_are_rejected_on_undirected_graphs() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", TRIANGLE)?;
    let mut args = walk_args(input);
    args.mode = ModeArg::Indegree;
    let err = run_cli_expecting_error(cover(args, 100), "in-degree needs a directed graph");
    assert!(matches!(
        err,
        CliError::Core(StriderError::ModeRequiresDirected {
            mode: SelectionMode::InDegree
        })
    ));
    assert_eq!(fs::read_dir(dir.path())?.count(), 1, "no report may be written");
    Ok(())
}

#[rstest]
#[case::unreachable_target(DIRECTED_CHAIN, "3", "0", "STRIDER_TARGET_UNREACHABLE")]
#[case::unknown_target(TRIANGLE, "0", "9", "STRIDER_VERTEX_NOT_FOUND")]
#[case::unknown_start(TRIANGLE, "x", "1", "STRIDER_VERTEX_NOT_FOUND")]
fn path_failures_carry_core_codes(
    #[case] graph: &str,
    #[case] start: &str,
    #[case] target: &str,
    #[case] code: &str,
) -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "g.graph", graph)?;
    let mut args = walk_args(input);
    args.start = start.into();
    let err = run_cli_expecting_error(path(args, target), "path must fail");
    assert_eq!(err.code(), code);
    Ok(())
}

#[rstest]
fn coverage_above_the_reachable_share_is_rejected() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "g.graph", "[0] -- [1]\n[2]\n")?;
    let err = run_cli_expecting_error(cover(walk_args(input), 90), "only 66% is reachable");
    assert!(matches!(
        err,
        CliError::Core(StriderError::CoverageUnattainable { achievable: 66, .. })
    ));
    Ok(())
}

#[rstest]
fn missing_inputs_name_the_path() {
    let dir = temp_dir();
    let input = dir.path().join("absent.graph");
    let err = run_cli_expecting_error(cover(walk_args(input.clone()), 100), "file is missing");
    assert_eq!(err.code(), "STRIDER_CLI_IO");
    match err {
        CliError::Io { path, .. } => assert_eq!(path, input),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn malformed_inputs_surface_the_line() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "bad.graph", "[0] -- [1]\n[1] => [2]\n")?;
    let err = run_cli_expecting_error(cover(walk_args(input), 100), "line 2 is malformed");
    assert_eq!(err.code(), "TEXT_FORMAT_MALFORMED_LINE");
    assert!(matches!(err, CliError::Text(TextFormatError::Malformed { line: 2, .. })));
    Ok(())
}

#[rstest]
#[case::complete("K4", 4, 6)]
#[case::tree("T2-2", 7, 6)]
#[case::random("R10-12", 10, 12)]
fn generated_graphs_reload(
    #[case] descriptor: &str,
    #[case] vertices: usize,
    #[case] edges: usize,
) -> TestResult {
    let dir = temp_dir();
    let output = dir.path().join("generated.graph");
    let summary = run_cli(Cli {
        command: Command::Generate(GenerateArgs {
            descriptor: descriptor.into(),
            output: output.clone(),
            seed: Some(5),
        }),
    })?;
    assert_eq!(summary.graph.vertices, vertices);
    assert_eq!(summary.graph.edges, edges);
    let graph = load_graph(&output)?;
    assert_eq!(graph.vertex_count(), vertices);
    assert_eq!(graph.edge_count(), edges);
    Ok(())
}

#[rstest]
fn seeded_generation_is_reproducible() -> TestResult {
    let dir = temp_dir();
    let mut contents = Vec::new();
    for name in ["a.graph", "b.graph"] {
        let output = dir.path().join(name);
        run_cli(Cli {
            command: Command::Generate(GenerateArgs {
                descriptor: "SF2-30".into(),
                output: output.clone(),
                seed: Some(99),
            }),
        })?;
        contents.push(fs::read_to_string(output)?);
    }
    assert_eq!(contents[0], contents[1]);
    Ok(())
}

#[rstest]
fn bad_descriptors_are_rejected() {
    let dir = temp_dir();
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Generate(GenerateArgs {
                descriptor: "Q7".into(),
                output: dir.path().join("never.graph"),
                seed: None,
            }),
        },
        "Q is not a generator",
    );
    assert_eq!(err.code(), "STRIDER_INVALID_PARAMETER");
}

#[rstest]
fn analyze_writes_directed_distributions() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "chain.graph", DIRECTED_CHAIN)?;
    let summary = run_cli(Cli {
        command: Command::Analyze(AnalyzeArgs {
            input,
            template: None,
        }),
    })?;
    assert_eq!(
        file_names(&summary.outputs),
        ["chain_deg.txt", "chain_in_deg.txt", "chain_out_deg.txt", "chain_info.txt"]
    );
    assert_eq!(read_rows(&dir.path().join("chain_deg.txt"))?, [(1, 2), (2, 2)]);
    assert_eq!(read_rows(&dir.path().join("chain_in_deg.txt"))?, [(0, 1), (1, 3)]);
    let info = fs::read_to_string(dir.path().join("chain_info.txt"))?;
    assert!(info.starts_with("directed=true\nweighted=false\nvertices=4\nedges=3\n"));
    Ok(())
}

#[rstest]
fn analyze_skips_orientation_tables_for_undirected_graphs() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", TRIANGLE)?;
    let summary = run_cli(Cli {
        command: Command::Analyze(AnalyzeArgs {
            input,
            template: Some(dir.path().join("report")),
        }),
    })?;
    assert_eq!(file_names(&summary.outputs), ["report_deg.txt", "report_info.txt"]);
    assert_eq!(read_rows(&dir.path().join("report_deg.txt"))?, [(2, 3)]);
    Ok(())
}

#[rstest]
fn convert_writes_plain_gml() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", "[0] -- [1] 4\n[1] -- [2] 5\n")?;
    let summary = run_cli(Cli {
        command: Command::Convert(ConvertArgs {
            input,
            template: None,
        }),
    })?;
    assert_eq!(file_names(&summary.outputs), ["tri.gml"]);
    let gml = fs::read_to_string(dir.path().join("tri.gml"))?;
    assert_eq!(gml.matches("edge [").count(), 2);
    assert!(gml.contains("label \"5\""));
    assert!(!gml.contains("fill"));
    Ok(())
}

#[rstest]
fn walk_summaries_render_statistics() -> TestResult {
    let summary = ExecutionSummary {
        command: "cover",
        graph: GraphSummary::of(&generators::complete(4)?),
        walk: Some(WalkSummary {
            mode: SelectionMode::ReverseOutDegree,
            runs: 10,
            mean_time: 9,
            reachable: 4,
        }),
        outputs: vec![PathBuf::from("k4_coverage.txt")],
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "command: cover\n\
         graph: 4 vertices, 6 edges, undirected, unweighted\n\
         mode: routdegree\n\
         runs: 10\n\
         mean time: 9\n\
         reachable: 4/4\n\
         wrote: k4_coverage.txt\n"
    );
    Ok(())
}

#[rstest]
fn commands_record_their_span() -> TestResult {
    let dir = temp_dir();
    let input = create_graph_file(&dir, "tri.graph", TRIANGLE)?;
    let (result, layer) = RecordingLayer::capture(|| run_cli(cover(walk_args(input), 100)));
    result?;

    let run = layer.span_named("cli.run").ok_or("cli.run span must exist")?;
    assert_eq!(run.field("command"), Some("cover"));
    let walk = layer.span_named("cli.walk").ok_or("cli.walk span must exist")?;
    assert_eq!(walk.field("runs"), Some("3"));
    assert_eq!(layer.spans_named("core.session").len(), 1);
    assert_eq!(layer.events_with_message("command completed").len(), 1);
    Ok(())
}
