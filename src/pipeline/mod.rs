//! # Dataset Feature Pipeline
//!
//! The per-run driver: iterates dataset-index rows, applies the gates in
//! order, runs loading → adjacency → curvature → statistics per network, and
//! emits one feature row per success while folding skip reasons into the run
//! summary.
//!
//! Per-network failure is data, not control flow: every row reduces to a
//! `NetworkOutcome`, and nothing a single network does can terminate the run.
//! Only an unreadable index or an unwritable output destination is fatal.
//!
//! Processing is strictly single-threaded and sequential — curvature is
//! CPU-bound and the adjacency matrix is O(n²) memory, so `max_edges` is the
//! safeguard that matters, not parallelism.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::curvature::CurvatureEngine;
use crate::edgelist::EdgeList;
use crate::model::{Adjacency, FeatureRow, NetworkRecord, SplitFilter};
use crate::stats::Summary;
use crate::Result;

pub mod writer;

pub use writer::{FeatureWriter, RunManifest};

// ============================================================================
// Skip accounting
// ============================================================================

/// Why a network was passed over. Each variant is one counter in the run
/// summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Unresolved/ambiguous index path, or the file is gone.
    MissingPath,
    /// Raw edge count over the `max_edges` gate.
    TooLarge,
    /// Edge list produced no nodes.
    Empty,
    /// A curvature provider or backend failed.
    CurvatureError,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingPath => "missing_path",
            SkipReason::TooLarge => "too_large",
            SkipReason::Empty => "empty",
            SkipReason::CurvatureError => "curvature_error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-network processing outcome — a complete row or a counted skip.
#[derive(Debug)]
pub enum NetworkOutcome {
    Processed(Box<FeatureRow>),
    Skipped(SkipReason),
}

/// End-of-run accounting: successes plus one counter per skip reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl RunSummary {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Log the summary the way the run reports it: one line for successes,
    /// one per skip reason.
    pub fn log(&self) {
        info!(processed = self.processed, "run complete");
        for (reason, count) in &self.skipped {
            info!(reason = %reason, count, "skipped networks");
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Run-level gates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineConfig {
    /// Skip networks whose raw edge-list length exceeds this (0 = unbounded).
    pub max_edges: usize,
    /// Stop after this many successful rows (0 = unbounded).
    pub limit: usize,
    /// Interpret a third edge-list column as a weight.
    pub use_weights: bool,
}

// ============================================================================
// FeaturePipeline
// ============================================================================

/// The per-run driver, generic over the curvature strategy.
pub struct FeaturePipeline<E: CurvatureEngine> {
    engine: E,
    config: PipelineConfig,
}

impl<E: CurvatureEngine> FeaturePipeline<E> {
    pub fn new(engine: E, config: PipelineConfig) -> FeaturePipeline<E> {
        FeaturePipeline { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every index row against an already-open writer.
    ///
    /// Rows outside the split filter are passed over silently; everything
    /// else becomes a success or a counted skip. Returns the run summary.
    pub fn run<W: Write>(
        &self,
        index: &[NetworkRecord],
        split: Option<&SplitFilter>,
        writer: &mut FeatureWriter<W>,
    ) -> Result<RunSummary> {
        writer.write_header()?;
        let mut summary = RunSummary::default();

        for record in index {
            if let Some(filter) = split {
                if !filter.allows(&record.name) {
                    continue;
                }
            }

            match self.process_network(record) {
                NetworkOutcome::Processed(row) => {
                    writer.write_row(&row)?;
                    summary.processed += 1;
                    if self.config.limit > 0 && summary.processed >= self.config.limit {
                        debug!(limit = self.config.limit, "row limit reached");
                        break;
                    }
                }
                NetworkOutcome::Skipped(reason) => summary.record_skip(reason),
            }
        }

        writer.flush()?;
        summary.log();
        Ok(summary)
    }

    /// Convenience driver: create the output file (and parent directories),
    /// write the manifest sidecar, and run. Failure to open or write the
    /// output is fatal for the whole run.
    pub fn run_to_path(
        &self,
        index: &[NetworkRecord],
        split: Option<&SplitFilter>,
        output: &Path,
    ) -> Result<RunSummary> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let prefixes = self.engine.prefixes();
        let manifest_path = output.with_extension("manifest.json");
        RunManifest::new(&prefixes, &self.config)
            .write_json(fs::File::create(&manifest_path)?)?;

        let file = fs::File::create(output)?;
        let mut writer = FeatureWriter::new(file, prefixes);
        self.run(index, split, &mut writer)
    }

    /// Apply the per-network gates in order. Infallible by design: every
    /// failure mode reduces to a `SkipReason`.
    pub fn process_network(&self, record: &NetworkRecord) -> NetworkOutcome {
        // (a) the index could not pin the file down
        if !record.path_status.is_resolved() {
            debug!(network = %record.name, status = %record.path_status, "unresolved path");
            return NetworkOutcome::Skipped(SkipReason::MissingPath);
        }

        // (b) the file is missing on disk
        let path = Path::new(&record.file_path);
        if record.file_path.is_empty() || !path.exists() {
            debug!(network = %record.name, path = %record.file_path, "edge list not found");
            return NetworkOutcome::Skipped(SkipReason::MissingPath);
        }

        let list = match EdgeList::load(path, self.config.use_weights) {
            Ok(list) => list,
            Err(err) => {
                warn!(network = %record.name, error = %err, "failed to read edge list");
                return NetworkOutcome::Skipped(SkipReason::MissingPath);
            }
        };

        // (c) size gate on the raw edge count, before any O(n²) work
        if self.config.max_edges > 0 && list.raw_edge_count() > self.config.max_edges {
            debug!(
                network = %record.name,
                edges = list.raw_edge_count(),
                max_edges = self.config.max_edges,
                "over size gate"
            );
            return NetworkOutcome::Skipped(SkipReason::TooLarge);
        }

        // (d) nothing to build a graph from
        if list.is_empty() {
            return NetworkOutcome::Skipped(SkipReason::Empty);
        }

        // (e) canonicalize, dispatch, summarize; all-or-nothing
        let adjacency = Adjacency::build(list.nodes(), list.pairs());
        let summaries = match self.engine.compute(&adjacency) {
            Ok(results) => results
                .into_iter()
                .map(|cv| (cv.prefix, Summary::of(&cv.values)))
                .collect(),
            Err(err) => {
                warn!(network = %record.name, error = %err, "curvature computation failed");
                return NetworkOutcome::Skipped(SkipReason::CurvatureError);
            }
        };

        NetworkOutcome::Processed(Box::new(FeatureRow {
            name: record.name.clone(),
            network_type: record.network_type.clone(),
            interaction_type: record.interaction_type.clone(),
            interaction_subtype: record.interaction_subtype.clone(),
            node_count: adjacency.node_count(),
            edge_count: adjacency.edge_count(),
            summaries,
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================
