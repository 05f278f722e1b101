//! # Curvature Provider Seams
//!
//! These traits are THE contract between the pipeline and the external
//! curvature algorithm libraries. The crate never computes curvature itself;
//! concrete implementations are supplied by dependency injection at startup
//! and looked up per measure through the `ProviderRegistry`.
//!
//! | Seam | Signature | Used by |
//! |------|-----------|---------|
//! | `EdgeCurvatureProvider` | `curvature(&Adjacency, EdgePair)` | per-edge measures |
//! | `VertexCurvatureProvider` | `curvature(&Adjacency, usize)` | per-vertex measures |
//! | `GraphCurvatureBackend` | whole-graph arrays | `RicciBackendDispatcher` |

use hashbrown::HashMap;

use crate::model::{Adjacency, EdgePair};
use crate::Result;

use super::Measure;

// ============================================================================
// Provider traits
// ============================================================================

/// Edge-level curvature algorithm.
pub trait EdgeCurvatureProvider: Send + Sync {
    /// Curvature of one canonical edge pair of `adjacency`.
    fn curvature(&self, adjacency: &Adjacency, edge: EdgePair) -> Result<f64>;
}

/// Vertex-level curvature algorithm.
pub trait VertexCurvatureProvider: Send + Sync {
    /// Curvature of one vertex index of `adjacency`.
    fn curvature(&self, adjacency: &Adjacency, node: usize) -> Result<f64>;
}

/// Full-graph Ricci backend — the secondary variant that computes
/// Ollivier-Ricci and Forman-Ricci over the whole network in one call.
///
/// The adjacency already carries contiguous integer indices, so no further
/// relabeling is needed. Returned arrays must align with
/// `adjacency.edge_pairs()`, one value per pair in pair order.
pub trait GraphCurvatureBackend: Send + Sync {
    /// Ollivier-Ricci curvature for every edge pair.
    fn ollivier_ricci(&self, adjacency: &Adjacency, alpha: f64) -> Result<Vec<f64>>;

    /// Forman-Ricci curvature for every edge pair.
    fn forman_ricci(&self, adjacency: &Adjacency) -> Result<Vec<f64>>;
}

// ============================================================================
// ProviderRegistry
// ============================================================================

/// Measure → provider mapping, filled by the embedder at startup.
///
/// Registration itself is unchecked; `CurvatureDispatcher::new` is the single
/// validation point and rejects any enabled measure without a provider of the
/// matching kind.
#[derive(Default)]
pub struct ProviderRegistry {
    edge: HashMap<Measure, Box<dyn EdgeCurvatureProvider>>,
    vertex: HashMap<Measure, Box<dyn VertexCurvatureProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> ProviderRegistry {
        ProviderRegistry::default()
    }

    /// Register an edge provider for `measure`. The latest registration wins.
    pub fn with_edge(
        mut self,
        measure: Measure,
        provider: Box<dyn EdgeCurvatureProvider>,
    ) -> Self {
        self.edge.insert(measure, provider);
        self
    }

    /// Register a vertex provider for `measure`. The latest registration wins.
    pub fn with_vertex(
        mut self,
        measure: Measure,
        provider: Box<dyn VertexCurvatureProvider>,
    ) -> Self {
        self.vertex.insert(measure, provider);
        self
    }

    pub fn edge_provider(&self, measure: Measure) -> Option<&dyn EdgeCurvatureProvider> {
        self.edge.get(&measure).map(|p| p.as_ref())
    }

    pub fn vertex_provider(&self, measure: Measure) -> Option<&dyn VertexCurvatureProvider> {
        self.vertex.get(&measure).map(|p| p.as_ref())
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("edge", &self.edge.keys().collect::<Vec<_>>())
            .field("vertex", &self.vertex.keys().collect::<Vec<_>>())
            .finish()
    }
}
