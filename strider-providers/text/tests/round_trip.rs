#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Integration tests covering loading and writing the text graph format.

use std::{collections::BTreeSet, io::Write as _};

use proptest::prelude::*;
use rstest::rstest;
use strider_core::{ErrorCategory, Graph, GraphBuilder};
use strider_providers_text::{
    MalformedLine, TextFormatError, TextFormatErrorCode, graph_to_string, load_graph, parse_graph,
    write_graph,
};
use strider_test_support::{
    ci::property_test_profile::ProptestRunProfile, tracing::RecordingLayer,
};
use tracing_subscriber::layer::SubscriberExt;

type EdgeSet = BTreeSet<(String, String, Option<i64>)>;

fn edge_set(graph: &Graph) -> EdgeSet {
    graph
        .edges()
        .map(|edge| {
            let mut from = graph.name_of(edge.from).to_owned();
            let mut to = graph.name_of(edge.to).to_owned();
            if !graph.is_directed() && to < from {
                std::mem::swap(&mut from, &mut to);
            }
            (from, to, edge.weight)
        })
        .collect()
}

fn vertex_set(graph: &Graph) -> BTreeSet<String> {
    graph
        .vertices()
        .map(|(_, vertex)| vertex.name().to_owned())
        .collect()
}

#[rstest]
fn mixed_orientation_fails_on_second_line() {
    let err = parse_graph("[A] -- [B] 5\n[A] -> [C]\n").expect_err("orientation conflict");
    assert_eq!(err.code(), TextFormatErrorCode::Malformed);
    assert_eq!(err.category(), ErrorCategory::MalformedInput);
    assert_eq!(err.line(), Some(2));
    assert!(matches!(
        err,
        TextFormatError::Malformed {
            reason: MalformedLine::DirectednessConflict { .. },
            ..
        }
    ));
}

#[rstest]
fn files_load_from_disk() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "# triangle")?;
    writeln!(file, "[a] -> [b]")?;
    writeln!(file, "[b] -> [c]")?;
    writeln!(file, "[a] <- [c]")?;
    writeln!(file, "[spare]")?;
    file.flush()?;

    let graph = load_graph(file.path())?;
    assert!(graph.is_directed());
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    let c = graph.vertex_by_name("c")?;
    let a = graph.vertex_by_name("a")?;
    assert_eq!(graph.vertex(c).map(|v| v.neighbours().to_vec()), Some(vec![a]));
    Ok(())
}

#[rstest]
fn missing_files_are_io_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_graph(dir.path().join("absent.graph")).expect_err("file is missing");
    assert_eq!(err.code(), TextFormatErrorCode::Io);
}

#[rstest]
fn loading_records_a_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let graph = tracing::subscriber::with_default(subscriber, || {
        parse_graph("[A] -- [B]\n\n[C]\n")
    })
    .expect("graph parses");
    assert_eq!(graph.vertex_count(), 3);

    let spans = layer.spans();
    let load = spans
        .iter()
        .find(|span| span.name == "text.load")
        .expect("text.load span must exist");
    assert_eq!(load.fields.get("lines"), Some(&"3".to_owned()));
    assert_eq!(load.fields.get("vertices"), Some(&"3".to_owned()));
    assert_eq!(load.fields.get("edges"), Some(&"1".to_owned()));
}

#[rstest]
fn written_files_reload() -> anyhow::Result<()> {
    let mut builder = GraphBuilder::new(false, true);
    builder.add_weighted_edge("left node", "right#1", -4)?;
    builder.add_vertex("alone");
    let graph = builder.build();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.graph");
    write_graph(&graph, std::fs::File::create(&path)?)?;
    let reread = load_graph(&path)?;
    assert_eq!(vertex_set(&reread), vertex_set(&graph));
    assert_eq!(edge_set(&reread), edge_set(&graph));
    assert!(reread.is_weighted());
    Ok(())
}

#[derive(Clone, Debug)]
struct GraphSpec {
    directed: bool,
    weighted: bool,
    names: Vec<String>,
    edges: Vec<(usize, usize, i64)>,
}

impl GraphSpec {
    fn build(&self) -> Graph {
        let mut builder = GraphBuilder::new(self.directed, self.weighted);
        for name in &self.names {
            builder.add_vertex(name);
        }
        for &(from, to, weight) in &self.edges {
            let from = &self.names[from % self.names.len()];
            let to = &self.names[to % self.names.len()];
            if self.weighted {
                builder
                    .add_weighted_edge(from, to, weight)
                    .expect("weighted builder accepts weights");
            } else {
                builder.add_edge(from, to).expect("plain builder accepts edges");
            }
        }
        builder.build()
    }
}

fn graph_spec() -> impl Strategy<Value = GraphSpec> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec("[a-zA-Z0-9_#<> -]{0,5}", 1..10),
        prop::collection::vec((0_usize..10, 0_usize..10, -50_i64..50), 1..25),
    )
        .prop_map(|(directed, weighted, suffixes, edges)| GraphSpec {
            directed,
            weighted,
            names: suffixes
                .into_iter()
                .enumerate()
                .map(|(index, suffix)| format!("v{index}{suffix}"))
                .collect(),
            edges,
        })
}

proptest! {
    #![proptest_config(ProptestRunProfile::load(128, false).config())]

    #[test]
    fn writing_then_parsing_preserves_the_graph(spec in graph_spec()) {
        let graph = spec.build();
        let text = graph_to_string(&graph);
        let reread = parse_graph(&text).expect("written graphs parse");
        prop_assert_eq!(reread.is_directed(), graph.is_directed());
        prop_assert_eq!(reread.is_weighted(), graph.is_weighted());
        prop_assert_eq!(vertex_set(&reread), vertex_set(&graph));
        prop_assert_eq!(edge_set(&reread), edge_set(&graph));
        prop_assert_eq!(reread.edge_count(), graph.edge_count());
        prop_assert_eq!(graph_to_string(&reread), text);
    }
}
