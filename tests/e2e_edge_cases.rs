//! Edge-case behavior: size gating, empty graphs, curvature failures, and the
//! full-graph Ricci backend — none of which may take the run down with them.

use std::fs;
use std::path::{Path, PathBuf};

use curvnet::{
    Adjacency, CurvatureEngine, CurvatureValues, FeaturePipeline, FeatureWriter,
    GraphCurvatureBackend, MeasureKind, NetworkRecord, PathStatus,
    PipelineConfig, RicciBackendDispatcher, SkipReason,
};

fn write_edgelist(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn record(name: &str, path: &Path, status: PathStatus) -> NetworkRecord {
    NetworkRecord {
        name: name.into(),
        network_type: "plant-herbivore".into(),
        interaction_type: "Antagonism".into(),
        interaction_subtype: String::new(),
        nlinks: None,
        connectance: None,
        nrows: None,
        ncols: None,
        file_path: path.display().to_string(),
        path_status: status,
    }
}

/// Engine that fails on any network with more than 3 nodes.
struct FlakyEngine;

impl CurvatureEngine for FlakyEngine {
    fn prefixes(&self) -> Vec<&'static str> {
        vec!["orc"]
    }

    fn compute(&self, adjacency: &Adjacency) -> curvnet::Result<Vec<CurvatureValues>> {
        if adjacency.node_count() > 3 {
            return Err(curvnet::Error::Curvature("synthetic divergence".into()));
        }
        Ok(vec![CurvatureValues {
            prefix: "orc",
            kind: MeasureKind::Edge,
            values: vec![0.1; adjacency.edge_count()],
        }])
    }
}

// ============================================================================
// 1. Oversize network skips; the next one still processes
// ============================================================================

#[test]
fn test_max_edges_gate_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();

    // 11 distinct edges, over a gate of 10
    let big: String = (0..11).map(|k| format!("hub,leaf{k}\n")).collect();
    let big = write_edgelist(dir.path(), "big.csv", &big);
    let small = write_edgelist(dir.path(), "small.csv", "a,b\nb,c\n");

    let index = vec![
        record("big", &big, PathStatus::Ok),
        record("small", &small, PathStatus::Ok),
    ];

    let pipeline = FeaturePipeline::new(
        FlakyEngine,
        PipelineConfig { max_edges: 10, ..PipelineConfig::default() },
    );
    let mut writer = FeatureWriter::new(Vec::new(), pipeline.engine().prefixes());
    let summary = pipeline.run(&index, None, &mut writer).unwrap();

    assert_eq!(summary.skip_count(SkipReason::TooLarge), 1);
    assert_eq!(summary.processed, 1);

    let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert!(out.contains("small,"));
    assert!(!out.contains("big,"));
}

// ============================================================================
// 2. Empty-node-set gate
// ============================================================================

#[test]
fn test_empty_edge_list_skips_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    // nothing but short rows, so no usable edge and no nodes
    let empty = write_edgelist(dir.path(), "empty.csv", "lonely\n\n");
    let index = vec![record("empty", &empty, PathStatus::Ok)];

    let pipeline = FeaturePipeline::new(FlakyEngine, PipelineConfig::default());
    let mut writer = FeatureWriter::new(Vec::new(), pipeline.engine().prefixes());
    let summary = pipeline.run(&index, None, &mut writer).unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skip_count(SkipReason::Empty), 1);
}

// ============================================================================
// 3. Curvature failure skips the network, keeps the batch alive
// ============================================================================

#[test]
fn test_curvature_error_skips_only_that_network() {
    let dir = tempfile::tempdir().unwrap();
    let ok_before = write_edgelist(dir.path(), "before.csv", "a,b\nb,c\n");
    let poison = write_edgelist(dir.path(), "poison.csv", "a,b\nb,c\nc,d\nd,e\n");
    let ok_after = write_edgelist(dir.path(), "after.csv", "x,y\n");

    let index = vec![
        record("before", &ok_before, PathStatus::Ok),
        record("poison", &poison, PathStatus::Ok),
        record("after", &ok_after, PathStatus::Ok),
    ];

    let pipeline = FeaturePipeline::new(FlakyEngine, PipelineConfig::default());
    let mut writer = FeatureWriter::new(Vec::new(), pipeline.engine().prefixes());
    let summary = pipeline.run(&index, None, &mut writer).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skip_count(SkipReason::CurvatureError), 1);

    let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert!(out.contains("before,"));
    assert!(out.contains("after,"));
    // no partial row for the failed network
    assert!(!out.contains("poison"));
}

// ============================================================================
// 4. Full-graph Ricci backend end-to-end
// ============================================================================

/// Backend fake: Ollivier = alpha everywhere, Forman = 4 − deg(i) − deg(j).
struct FakeRicciBackend;

impl GraphCurvatureBackend for FakeRicciBackend {
    fn ollivier_ricci(&self, adjacency: &Adjacency, alpha: f64) -> curvnet::Result<Vec<f64>> {
        Ok(vec![alpha; adjacency.edge_count()])
    }

    fn forman_ricci(&self, adjacency: &Adjacency) -> curvnet::Result<Vec<f64>> {
        Ok(adjacency
            .edge_pairs()
            .iter()
            .map(|p| 4.0 - (adjacency.degree(p.i) + adjacency.degree(p.j)) as f64)
            .collect())
    }
}

#[test]
fn test_ricci_backend_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let cycle = write_edgelist(dir.path(), "cycle.csv", "a,b\nb,c\nc,d\nd,a\n");
    let index = vec![record("cycle", &cycle, PathStatus::Ok)];

    let engine = RicciBackendDispatcher::new(Box::new(FakeRicciBackend), 0.5).unwrap();
    let pipeline = FeaturePipeline::new(engine, PipelineConfig::default());

    let mut writer = FeatureWriter::new(Vec::new(), pipeline.engine().prefixes());
    let summary = pipeline.run(&index, None, &mut writer).unwrap();
    assert_eq!(summary.processed, 1);

    let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let header = out.lines().next().unwrap();
    assert!(header.contains("orc_count"));
    assert!(header.contains("frc_count"));

    // all degrees are 2 in a 4-cycle: orc = 0.5, frc = 0 on every edge
    let row = out.lines().nth(1).unwrap();
    assert!(row.starts_with("cycle,"));
    assert!(row.contains(",4,0.5,0,0.5,0.5,0.5,0.5,0.5,0,"));
}

// ============================================================================
// 5. Weighted loading leaves structure untouched
// ============================================================================

#[test]
fn test_weights_do_not_change_structure() {
    let dir = tempfile::tempdir().unwrap();
    let weighted = write_edgelist(dir.path(), "w.csv", "a,b,3.5\nb,c,oops\nc,a\n");
    let index = vec![record("weighted", &weighted, PathStatus::Ok)];

    let pipeline = FeaturePipeline::new(
        FlakyEngine,
        PipelineConfig { use_weights: true, ..PipelineConfig::default() },
    );
    let mut writer = FeatureWriter::new(Vec::new(), pipeline.engine().prefixes());
    let summary = pipeline.run(&index, None, &mut writer).unwrap();

    assert_eq!(summary.processed, 1);
    let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    // triangle: 3 nodes, 3 unique pairs, malformed weight notwithstanding
    assert!(out.lines().nth(1).unwrap().starts_with("weighted,plant-herbivore,Antagonism,,3,3,"));
}
