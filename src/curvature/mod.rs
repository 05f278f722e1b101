//! # Curvature Measure Dispatch
//!
//! Maps an explicit, validated configuration of enabled measures onto the
//! injected provider implementations, producing named value arrays aligned to
//! the canonical edge-pair list or node ordering.
//!
//! Dispatch is all-or-nothing per network: if any single enabled measure
//! fails, the whole network's curvature computation fails and no partial
//! results escape.

use std::fmt;

use crate::model::Adjacency;
use crate::{Error, Result};

pub mod provider;

pub use provider::{
    EdgeCurvatureProvider, GraphCurvatureBackend, ProviderRegistry,
    VertexCurvatureProvider,
};

// ============================================================================
// Measures
// ============================================================================

/// Whether a measure produces one value per edge pair or per vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Edge,
    Vertex,
}

/// Every recognized curvature measure.
///
/// `ALL` fixes the canonical output order; column prefixes and configuration
/// option names are both derived from the variant, so the three never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measure {
    Ollivier,
    OllivierIdleness,
    LinLuYau,
    LinLuYauNonnormalized,
    BakryEmeryNonnorm,
    BakryEmeryNorm,
    BakryEmeryNonnormFiniteDim,
    BakryEmeryNormFiniteDim,
    Steinerberger,
    NodeResistance,
    LinkResistance,
}

impl Measure {
    /// Canonical output order.
    pub const ALL: [Measure; 11] = [
        Measure::Ollivier,
        Measure::OllivierIdleness,
        Measure::LinLuYau,
        Measure::LinLuYauNonnormalized,
        Measure::BakryEmeryNonnorm,
        Measure::BakryEmeryNorm,
        Measure::BakryEmeryNonnormFiniteDim,
        Measure::BakryEmeryNormFiniteDim,
        Measure::Steinerberger,
        Measure::NodeResistance,
        Measure::LinkResistance,
    ];

    /// Output column prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Measure::Ollivier => "orc",
            Measure::OllivierIdleness => "orc_idl",
            Measure::LinLuYau => "lly",
            Measure::LinLuYauNonnormalized => "nnlly",
            Measure::BakryEmeryNonnorm => "be_non_norm",
            Measure::BakryEmeryNorm => "be_norm",
            Measure::BakryEmeryNonnormFiniteDim => "be_non_norm_dim",
            Measure::BakryEmeryNormFiniteDim => "be_norm_dim",
            Measure::Steinerberger => "steiner",
            Measure::NodeResistance => "node_res",
            Measure::LinkResistance => "link_res",
        }
    }

    /// Configuration option name.
    pub fn option_name(&self) -> &'static str {
        match self {
            Measure::Ollivier => "orc",
            Measure::OllivierIdleness => "orc_idleness",
            Measure::LinLuYau => "lly",
            Measure::LinLuYauNonnormalized => "lly_nonnormalized",
            Measure::BakryEmeryNonnorm => "bakry_emery_nonnorm",
            Measure::BakryEmeryNorm => "bakry_emery_norm",
            Measure::BakryEmeryNonnormFiniteDim => "bakry_emery_nonnorm_finite_dim",
            Measure::BakryEmeryNormFiniteDim => "bakry_emery_norm_finite_dim",
            Measure::Steinerberger => "steinerberger",
            Measure::NodeResistance => "node_resistance",
            Measure::LinkResistance => "link_resistance",
        }
    }

    pub fn from_option_name(name: &str) -> Option<Measure> {
        Measure::ALL.iter().copied().find(|m| m.option_name() == name)
    }

    pub fn kind(&self) -> MeasureKind {
        match self {
            Measure::Ollivier
            | Measure::OllivierIdleness
            | Measure::LinLuYau
            | Measure::LinLuYauNonnormalized
            | Measure::LinkResistance => MeasureKind::Edge,
            _ => MeasureKind::Vertex,
        }
    }

    /// Finite-dimension Bakry-Émery variants are inert while `N == 0`.
    fn requires_finite_dimension(&self) -> bool {
        matches!(
            self,
            Measure::BakryEmeryNonnormFiniteDim | Measure::BakryEmeryNormFiniteDim
        )
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.option_name())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Explicit, validated measure configuration.
///
/// Every recognized option appears as a named field with its default; unknown
/// option names are rejected by `enable()` at construction time rather than
/// silently ignored at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureConfig {
    pub orc: bool,
    pub orc_idleness: bool,
    pub lly: bool,
    pub lly_nonnormalized: bool,
    pub bakry_emery_nonnorm: bool,
    pub bakry_emery_norm: bool,
    pub bakry_emery_nonnorm_finite_dim: bool,
    pub bakry_emery_norm_finite_dim: bool,
    pub steinerberger: bool,
    pub node_resistance: bool,
    pub link_resistance: bool,
    /// Lazy-walk parameter for the idle Ollivier variant. Must lie in [0, 1].
    pub idleness: f64,
    /// Finite dimension N for the Bakry-Émery variants; 0 disables them.
    pub finite_dimension: f64,
}

impl Default for CurvatureConfig {
    /// The default run computes the two infinite-dimension Bakry-Émery
    /// measures; everything else is opt-in.
    fn default() -> CurvatureConfig {
        CurvatureConfig {
            orc: false,
            orc_idleness: false,
            lly: false,
            lly_nonnormalized: false,
            bakry_emery_nonnorm: true,
            bakry_emery_norm: true,
            bakry_emery_nonnorm_finite_dim: false,
            bakry_emery_norm_finite_dim: false,
            steinerberger: false,
            node_resistance: false,
            link_resistance: false,
            idleness: 0.5,
            finite_dimension: 0.0,
        }
    }
}

impl CurvatureConfig {
    /// Enable one option by its configuration name.
    pub fn enable(&mut self, option: &str) -> Result<()> {
        let measure = Measure::from_option_name(option)
            .ok_or_else(|| Error::Config(format!("unknown curvature option '{option}'")))?;
        *self.flag_mut(measure) = true;
        Ok(())
    }

    /// Disable one option by its configuration name.
    pub fn disable(&mut self, option: &str) -> Result<()> {
        let measure = Measure::from_option_name(option)
            .ok_or_else(|| Error::Config(format!("unknown curvature option '{option}'")))?;
        *self.flag_mut(measure) = false;
        Ok(())
    }

    /// Range-check the numeric parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.idleness.is_finite() || !(0.0..=1.0).contains(&self.idleness) {
            return Err(Error::Config(format!(
                "idleness must lie in [0, 1], got {}",
                self.idleness
            )));
        }
        if !self.finite_dimension.is_finite() || self.finite_dimension < 0.0 {
            return Err(Error::Config(format!(
                "finite_dimension must be 0 (disabled) or positive, got {}",
                self.finite_dimension
            )));
        }
        Ok(())
    }

    /// Enabled measures in canonical order, after parameter gating: the
    /// finite-dimension variants drop out while `finite_dimension == 0`.
    pub fn enabled(&self) -> Vec<Measure> {
        Measure::ALL
            .iter()
            .copied()
            .filter(|m| self.flag(*m))
            .filter(|m| !m.requires_finite_dimension() || self.finite_dimension > 0.0)
            .collect()
    }

    fn flag(&self, measure: Measure) -> bool {
        match measure {
            Measure::Ollivier => self.orc,
            Measure::OllivierIdleness => self.orc_idleness,
            Measure::LinLuYau => self.lly,
            Measure::LinLuYauNonnormalized => self.lly_nonnormalized,
            Measure::BakryEmeryNonnorm => self.bakry_emery_nonnorm,
            Measure::BakryEmeryNorm => self.bakry_emery_norm,
            Measure::BakryEmeryNonnormFiniteDim => self.bakry_emery_nonnorm_finite_dim,
            Measure::BakryEmeryNormFiniteDim => self.bakry_emery_norm_finite_dim,
            Measure::Steinerberger => self.steinerberger,
            Measure::NodeResistance => self.node_resistance,
            Measure::LinkResistance => self.link_resistance,
        }
    }

    fn flag_mut(&mut self, measure: Measure) -> &mut bool {
        match measure {
            Measure::Ollivier => &mut self.orc,
            Measure::OllivierIdleness => &mut self.orc_idleness,
            Measure::LinLuYau => &mut self.lly,
            Measure::LinLuYauNonnormalized => &mut self.lly_nonnormalized,
            Measure::BakryEmeryNonnorm => &mut self.bakry_emery_nonnorm,
            Measure::BakryEmeryNorm => &mut self.bakry_emery_norm,
            Measure::BakryEmeryNonnormFiniteDim => &mut self.bakry_emery_nonnorm_finite_dim,
            Measure::BakryEmeryNormFiniteDim => &mut self.bakry_emery_norm_finite_dim,
            Measure::Steinerberger => &mut self.steinerberger,
            Measure::NodeResistance => &mut self.node_resistance,
            Measure::LinkResistance => &mut self.link_resistance,
        }
    }
}

// ============================================================================
// Engine contract & value arrays
// ============================================================================

/// One measure's values, aligned to edge pairs or node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureValues {
    pub prefix: &'static str,
    pub kind: MeasureKind,
    pub values: Vec<f64>,
}

/// The contract between the pipeline driver and a curvature strategy.
///
/// Two strategies exist: the per-measure `CurvatureDispatcher` over injected
/// providers, and the full-graph `RicciBackendDispatcher`. Both fail
/// all-or-nothing per network.
pub trait CurvatureEngine {
    /// Column prefixes this engine emits, in canonical order.
    fn prefixes(&self) -> Vec<&'static str>;

    /// Compute every enabled measure for one network.
    fn compute(&self, adjacency: &Adjacency) -> Result<Vec<CurvatureValues>>;
}

// ============================================================================
// CurvatureDispatcher — per-measure providers
// ============================================================================

/// Dispatches each enabled measure to its registered provider.
#[derive(Debug)]
pub struct CurvatureDispatcher {
    config: CurvatureConfig,
    enabled: Vec<Measure>,
    registry: ProviderRegistry,
}

impl CurvatureDispatcher {
    /// Validate the configuration and check that every enabled measure has a
    /// provider of the matching kind. Construction is the only place this is
    /// checked, so a dispatcher that exists can always dispatch.
    pub fn new(config: CurvatureConfig, registry: ProviderRegistry) -> Result<CurvatureDispatcher> {
        config.validate()?;
        let enabled = config.enabled();
        for &measure in &enabled {
            let present = match measure.kind() {
                MeasureKind::Edge => registry.edge_provider(measure).is_some(),
                MeasureKind::Vertex => registry.vertex_provider(measure).is_some(),
            };
            if !present {
                return Err(Error::MissingProvider(measure));
            }
        }
        Ok(CurvatureDispatcher { config, enabled, registry })
    }

    pub fn config(&self) -> &CurvatureConfig {
        &self.config
    }

    pub fn enabled_measures(&self) -> &[Measure] {
        &self.enabled
    }

    fn compute_measure(&self, measure: Measure, adjacency: &Adjacency) -> Result<Vec<f64>> {
        match measure.kind() {
            MeasureKind::Edge => {
                let provider = self
                    .registry
                    .edge_provider(measure)
                    .ok_or(Error::MissingProvider(measure))?;
                adjacency
                    .edge_pairs()
                    .iter()
                    .map(|&pair| provider.curvature(adjacency, pair))
                    .collect()
            }
            MeasureKind::Vertex => {
                let provider = self
                    .registry
                    .vertex_provider(measure)
                    .ok_or(Error::MissingProvider(measure))?;
                (0..adjacency.node_count())
                    .map(|node| provider.curvature(adjacency, node))
                    .collect()
            }
        }
    }
}

impl CurvatureEngine for CurvatureDispatcher {
    fn prefixes(&self) -> Vec<&'static str> {
        self.enabled.iter().map(|m| m.prefix()).collect()
    }

    fn compute(&self, adjacency: &Adjacency) -> Result<Vec<CurvatureValues>> {
        let mut out = Vec::with_capacity(self.enabled.len());
        for &measure in &self.enabled {
            let values = self
                .compute_measure(measure, adjacency)
                .map_err(|e| Error::Curvature(format!("{}: {e}", measure.option_name())))?;
            out.push(CurvatureValues {
                prefix: measure.prefix(),
                kind: measure.kind(),
                values,
            });
        }
        Ok(out)
    }
}

// ============================================================================
// RicciBackendDispatcher — full-graph backend
// ============================================================================

/// Secondary variant: Ollivier-Ricci + Forman-Ricci via one full-graph
/// algorithm library call each, emitted under the `orc`/`frc` prefixes.
pub struct RicciBackendDispatcher {
    backend: Box<dyn GraphCurvatureBackend>,
    alpha: f64,
}

impl RicciBackendDispatcher {
    /// `alpha` is the Ollivier laziness parameter; must lie in [0, 1].
    pub fn new(backend: Box<dyn GraphCurvatureBackend>, alpha: f64) -> Result<RicciBackendDispatcher> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(Error::Config(format!("alpha must lie in [0, 1], got {alpha}")));
        }
        Ok(RicciBackendDispatcher { backend, alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn check_alignment(prefix: &str, got: usize, want: usize) -> Result<()> {
        if got != want {
            return Err(Error::Curvature(format!(
                "{prefix}: backend returned {got} values for {want} edge pairs"
            )));
        }
        Ok(())
    }
}

impl CurvatureEngine for RicciBackendDispatcher {
    fn prefixes(&self) -> Vec<&'static str> {
        vec!["orc", "frc"]
    }

    fn compute(&self, adjacency: &Adjacency) -> Result<Vec<CurvatureValues>> {
        let want = adjacency.edge_count();

        let orc = self
            .backend
            .ollivier_ricci(adjacency, self.alpha)
            .map_err(|e| Error::Curvature(format!("orc: {e}")))?;
        Self::check_alignment("orc", orc.len(), want)?;

        let frc = self
            .backend
            .forman_ricci(adjacency)
            .map_err(|e| Error::Curvature(format!("frc: {e}")))?;
        Self::check_alignment("frc", frc.len(), want)?;

        Ok(vec![
            CurvatureValues { prefix: "orc", kind: MeasureKind::Edge, values: orc },
            CurvatureValues { prefix: "frc", kind: MeasureKind::Edge, values: frc },
        ])
    }
}

// ============================================================================
// Tests
// ============================================================================
