//! # curvnet — Curvature Features for Bipartite Interaction Networks
//!
//! Extracts geometric/topological curvature features from empirical bipartite
//! interaction networks (ecological mutualism/antagonism webs), producing one
//! row of robust summary statistics per network for a downstream classifier.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `EdgeCurvatureProvider` / `VertexCurvatureProvider` are
//!    the contract between the pipeline and any curvature algorithm library
//! 2. **Clean DTOs**: `NetworkRecord`, `Adjacency`, `Summary`, `FeatureRow`
//!    cross all boundaries
//! 3. **Canonical graphs**: every network becomes a deduplicated, symmetric
//!    adjacency matrix over a sorted node ordering before anything touches it
//! 4. **Failure is data**: per-network problems become `SkipReason` counters,
//!    never a crashed run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use curvnet::{
//!     CurvatureConfig, CurvatureDispatcher, FeaturePipeline,
//!     NetworkRecord, PipelineConfig, ProviderRegistry,
//! };
//!
//! fn main() -> curvnet::Result<()> {
//!     // Concrete curvature algorithms are injected by the embedding
//!     // application; the registry maps each measure to one provider.
//!     let registry = ProviderRegistry::new();
//!     let config = CurvatureConfig::default();
//!     let dispatcher = CurvatureDispatcher::new(config, registry)?;
//!
//!     let pipeline = FeaturePipeline::new(
//!         dispatcher,
//!         PipelineConfig { max_edges: 20_000, ..PipelineConfig::default() },
//!     );
//!
//!     let index = NetworkRecord::read_index(Path::new("data/dataset_index.csv"))?;
//!     let summary = pipeline.run_to_path(
//!         &index,
//!         None,
//!         Path::new("data/features/curvature_features.csv"),
//!     )?;
//!     println!("processed {}", summary.processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Measures
//!
//! | Prefix | Axis | Measure |
//! |--------|------|---------|
//! | `orc` | edge | Ollivier-Ricci |
//! | `orc_idl` | edge | Ollivier-Ricci with idleness |
//! | `lly` | edge | Lin-Lu-Yau |
//! | `nnlly` | edge | Lin-Lu-Yau, non-normalized |
//! | `be_non_norm` | vertex | Bakry-Émery, non-normalized |
//! | `be_norm` | vertex | Bakry-Émery, normalized |
//! | `be_non_norm_dim` | vertex | Bakry-Émery, non-normalized, finite N |
//! | `be_norm_dim` | vertex | Bakry-Émery, normalized, finite N |
//! | `steiner` | vertex | Steinerberger |
//! | `node_res` | vertex | node resistance |
//! | `link_res` | edge | link resistance |
//!
//! The secondary full-graph backend (`RicciBackendDispatcher`) emits `orc`
//! and `frc` (Forman-Ricci) instead.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod edgelist;
pub mod stats;
pub mod curvature;
pub mod pipeline;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Adjacency, EdgePair, FeatureRow, NetworkRecord, PathStatus,
    SplitFilter, SplitRecord, SplitSet,
};

// ============================================================================
// Re-exports: Loading & statistics
// ============================================================================

pub use edgelist::{EdgeList, RawEdge};
pub use stats::Summary;

// ============================================================================
// Re-exports: Curvature
// ============================================================================

pub use curvature::{
    CurvatureConfig, CurvatureDispatcher, CurvatureEngine, CurvatureValues,
    EdgeCurvatureProvider, GraphCurvatureBackend, Measure, MeasureKind,
    ProviderRegistry, RicciBackendDispatcher, VertexCurvatureProvider,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use pipeline::{
    FeaturePipeline, FeatureWriter, NetworkOutcome, PipelineConfig,
    RunManifest, RunSummary, SkipReason,
};

// ============================================================================
// Error Types
// ============================================================================

/// Fatal error conditions.
///
/// Recoverable per-network conditions (unresolved paths, oversize graphs,
/// empty graphs, curvature failures) are not errors here — they reduce to
/// [`SkipReason`] counters and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("curvature computation failed: {0}")]
    Curvature(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no provider registered for enabled measure '{0}'")]
    MissingProvider(Measure),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
